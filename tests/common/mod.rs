#![allow(dead_code)]

use actix_web::App;
use serde_json::{json, Value};

use trip_planner_api::app::{configure, AppServices};
use trip_planner_api::config::{AppConfig, FlightSearchConfig, GeminiConfig, PlacesConfig};

pub const TEST_GEMINI_KEY: &str = "test-gemini-key";
pub const TEST_SERPAPI_KEY: &str = "test-serpapi-key";
pub const TEST_PLACES_KEY: &str = "test-places-key";
pub const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

pub struct TestApp {
    pub config: AppConfig,
}

impl TestApp {
    /// No provider keys: every endpoint answers from its fallback.
    pub fn offline() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_gemini(base_url: &str) -> Self {
        let mut config = AppConfig::default();
        config.gemini = GeminiConfig {
            api_key: Some(TEST_GEMINI_KEY.to_string()),
            base_url: base_url.to_string(),
            ..GeminiConfig::default()
        };
        Self { config }
    }

    pub fn with_flights(base_url: &str) -> Self {
        let mut config = AppConfig::default();
        config.flights = FlightSearchConfig {
            api_key: Some(TEST_SERPAPI_KEY.to_string()),
            base_url: base_url.to_string(),
        };
        Self { config }
    }

    pub fn with_places(base_url: &str) -> Self {
        let mut config = AppConfig::default();
        config.places = PlacesConfig {
            api_key: Some(TEST_PLACES_KEY.to_string()),
            base_url: base_url.to_string(),
        };
        Self { config }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let services = AppServices::from_config(&self.config);
        App::new().configure(move |cfg| configure(cfg, &services))
    }
}

pub fn paris_trip() -> Value {
    json!({
        "source": "New York (JFK)",
        "destination": "Paris, France",
        "startDate": "2024-06-01",
        "endDate": "2024-06-03",
        "budget": "1500",
        "currency": "USD",
        "travelers": "2",
        "interests": ["culture", "food"]
    })
}

/// A `generateContent` reply whose only candidate says `text`.
pub fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
