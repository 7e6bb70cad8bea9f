use log::{error, info, warn};

use crate::config::GeminiConfig;
use crate::errors::{PlanError, ProviderError};
use crate::models::itinerary::Itinerary;
use crate::models::trip::TripRequest;
use crate::services::fallback_itinerary::fallback_for_request;
use crate::services::gemini_service::GeminiService;
use crate::services::itinerary_extractor::extract_itinerary;
use crate::services::prompt_builder::build_itinerary_prompt;

/// Runs a trip request through prompt → model → extraction, degrading to a
/// curated itinerary whenever the model is absent or answers badly.
#[derive(Clone)]
pub struct TravelPlanner {
    gemini: Option<GeminiService>,
}

impl TravelPlanner {
    pub fn new(config: &GeminiConfig) -> Self {
        // A missing key is not fatal: plans are served from the fallback guides.
        let gemini = match GeminiService::new(config) {
            Ok(service) => {
                info!("Gemini generation enabled with model {}", service.model());
                Some(service)
            }
            Err(e) => {
                warn!("{}. Using fallback itineraries.", e);
                None
            }
        };

        Self { gemini }
    }

    pub fn with_service(gemini: Option<GeminiService>) -> Self {
        Self { gemini }
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.gemini.is_some()
    }

    /// Provider failures propagate; a badly formatted answer never does.
    pub async fn generate_itinerary(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        let gemini = match &self.gemini {
            Some(gemini) => gemini,
            None => {
                info!(
                    "No Gemini client configured, serving fallback itinerary for {}",
                    request.destination
                );
                return Ok(fallback_for_request(request));
            }
        };

        let prompt = build_itinerary_prompt(request);
        let raw = gemini.generate(&prompt).await.map_err(|e: ProviderError| {
            error!("Error generating travel plan with Gemini: {}", e);
            PlanError::from(e)
        })?;

        let fallback = fallback_for_request(request);
        match extract_itinerary(&raw) {
            Ok(mut itinerary) => {
                itinerary.backfill_lists(&fallback);
                Ok(itinerary)
            }
            Err(failure) => {
                warn!(
                    "Could not extract itinerary from Gemini response ({}), serving fallback",
                    failure
                );
                Ok(fallback)
            }
        }
    }
}
