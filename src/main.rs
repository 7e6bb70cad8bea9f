use actix_web::{middleware::Logger, App, HttpServer};
use env_logger::Env;
use log::info;

use trip_planner_api::app::{self, AppServices};
use trip_planner_api::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let config = AppConfig::from_env();
    let services = AppServices::from_config(&config);

    info!("Attempting to bind to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(app::cors())
            .wrap(Logger::default())
            .configure(move |cfg| app::configure(cfg, &services))
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
