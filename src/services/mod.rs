pub mod fallback_itinerary;
pub mod flight_service;
pub mod gemini_service;
pub mod itinerary_extractor;
pub mod itinerary_generation_service;
pub mod places_service;
pub mod prompt_builder;
pub mod request_normalizer;
