use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failure talking to the generative model. Distinct from an extraction
/// failure: this one reaches the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Generation request failed with status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Generation response contained no text: {0}")]
    EmptyResponse(String),

    #[error("Failed to decode generation response: {0}")]
    DecodeError(String),
}

/// The model answered, but not with a parseable itinerary.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("malformed itinerary JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to generate travel plan")]
    Provider(#[from] ProviderError),
}

impl ResponseError for PlanError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlanError::Validation(_) => StatusCode::BAD_REQUEST,
            PlanError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
