use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;

use crate::services::flight_service::FlightService;
use crate::services::itinerary_generation_service::TravelPlanner;
use crate::services::places_service::PlacesService;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: BTreeMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn provider(configured: bool, live: &str, fallback: &str) -> Self {
        if configured {
            ServiceStatus {
                status: "ok".to_string(),
                details: Some(live.to_string()),
            }
        } else {
            ServiceStatus {
                status: "fallback".to_string(),
                details: Some(fallback.to_string()),
            }
        }
    }
}

/*
    /health
*/
pub async fn health_check(
    planner: web::Data<TravelPlanner>,
    flights: web::Data<FlightService>,
    places: web::Data<PlacesService>,
) -> impl Responder {
    let mut services = BTreeMap::new();
    services.insert(
        "gemini".to_string(),
        ServiceStatus::provider(
            planner.is_ai_enabled(),
            "Itineraries generated by Gemini",
            "GEMINI_API_KEY not configured, serving curated itineraries",
        ),
    );
    services.insert(
        "flights".to_string(),
        ServiceStatus::provider(
            flights.is_configured(),
            "Flight search via SerpApi",
            "SERPAPI_KEY not configured, serving demo flights",
        ),
    );
    services.insert(
        "places".to_string(),
        ServiceStatus::provider(
            places.is_configured(),
            "Autocomplete via Google Places",
            "GOOGLE_PLACES_API_KEY not configured, serving mock cities",
        ),
    );

    // Fallbacks keep every endpoint answering, so this is "degraded", never "error".
    let status = if services.values().all(|s| s.status == "ok") {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
