use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::PlacesConfig;
use crate::models::place::{PlacePrediction, PlacesResponse};

const MOCK_CITIES: [(&str, &str); 5] = [
    ("1", "New York, USA"),
    ("2", "New Delhi, India"),
    ("3", "London, UK"),
    ("4", "Tokyo, Japan"),
    ("5", "Paris, France"),
];

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Places request failed with status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Places API returned status {0}")]
    ApiStatus(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawAutocompleteResponse {
    #[serde(default)]
    predictions: Vec<RawPrediction>,
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPrediction {
    place_id: Option<String>,
    description: Option<String>,
}

/// Canned suggestions served when no Places key is configured.
pub fn mock_predictions() -> PlacesResponse {
    PlacesResponse {
        predictions: MOCK_CITIES
            .iter()
            .map(|(id, description)| PlacePrediction {
                place_id: id.to_string(),
                description: description.to_string(),
            })
            .collect(),
    }
}

#[derive(Clone)]
pub struct PlacesService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl PlacesService {
    pub fn new(config: &PlacesConfig) -> Self {
        if config.api_key.is_none() {
            warn!("GOOGLE_PLACES_API_KEY is not set, serving mock place suggestions");
        }
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// City autocomplete for `query`.
    pub async fn autocomplete(&self, query: &str) -> Result<PlacesResponse, PlacesError> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Ok(mock_predictions()),
        };

        debug!("Fetching place predictions for '{}'", query);
        let response = self
            .client
            .get(format!("{}/maps/api/place/autocomplete/json", self.base_url))
            .query(&[
                ("input", query),
                ("types", "(cities)"),
                ("key", api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PlacesError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let raw: RawAutocompleteResponse = response.json().await?;
        match raw.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(other) => return Err(PlacesError::ApiStatus(other.to_string())),
        }

        let predictions = raw
            .predictions
            .into_iter()
            .filter_map(|p| {
                Some(PlacePrediction {
                    place_id: p.place_id?,
                    description: p.description?,
                })
            })
            .collect();

        Ok(PlacesResponse { predictions })
    }
}
