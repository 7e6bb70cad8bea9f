use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::itinerary::Itinerary;

/// Trip form as posted by the UI. Everything is optional here so that a
/// missing field becomes a validation error rather than a body parse error.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    // The form sends numbers as strings, so these stay raw until normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validated trip parameters. Only built by the request normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub source: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: u64,
    pub currency: String,
    pub travelers: u32,
    pub interests: Vec<String>,
    pub additional_notes: Option<String>,
}

impl TripRequest {
    /// Inclusive day count.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Response for `POST /api/travel-plan`: the submitted form echoed back with
/// the itinerary attached.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    #[serde(flatten)]
    pub request: TripPlanForm,
    pub itinerary: Itinerary,
    pub created_at: DateTime<Utc>,
}

// Keys the response sets itself; a form copy of them would be emitted twice.
const RESPONSE_KEYS: [&str; 2] = ["itinerary", "createdAt"];

impl TravelPlan {
    pub fn new(mut request: TripPlanForm, itinerary: Itinerary) -> Self {
        for key in RESPONSE_KEYS {
            request.extra.remove(key);
        }
        Self {
            request,
            itinerary,
            created_at: Utc::now(),
        }
    }
}
