use actix_cors::Cors;
use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::config::AppConfig;
use crate::routes;
use crate::services::flight_service::FlightService;
use crate::services::itinerary_generation_service::TravelPlanner;
use crate::services::places_service::PlacesService;

/// Long-lived services shared by every worker. Built once from config.
#[derive(Clone)]
pub struct AppServices {
    pub planner: web::Data<TravelPlanner>,
    pub flights: web::Data<FlightService>,
    pub places: web::Data<PlacesService>,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            planner: web::Data::new(TravelPlanner::new(&config.gemini)),
            flights: web::Data::new(FlightService::new(&config.flights)),
            places: web::Data::new(PlacesService::new(&config.places)),
        }
    }
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Routing table shared by the binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig, services: &AppServices) {
    // Body errors get the same `{"error": ...}` shape as handler errors.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    });

    cfg.app_data(services.planner.clone())
        .app_data(services.flights.clone())
        .app_data(services.places.clone())
        .app_data(json_config)
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .route("/places", web::get().to(routes::places::get_places))
                .route(
                    "/travel-plan",
                    web::post().to(routes::travel_plan::create),
                )
                .route("/flights", web::get().to(routes::flights::get_flights)),
        );
}
