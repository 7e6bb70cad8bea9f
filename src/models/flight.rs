use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecommendations {
    pub flights: Vec<FlightOption>,
    pub source: AirportSummary,
    pub destination: AirportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_insights: Option<PriceInsights>,
    /// True when the flights are demo data rather than provider results.
    pub is_fallback: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    pub price: f64,
    /// Minutes.
    pub total_duration: u32,
    pub flights: Vec<FlightSegment>,
    pub layovers: Vec<Layover>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightSegment {
    pub airline: String,
    pub airline_logo_url: String,
    pub flight_number: String,
    pub departure_airport: AirportStop,
    pub arrival_airport: AirportStop,
    pub duration: u32,
    pub travel_class: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirportStop {
    pub name: String,
    pub code: String,
    pub local_time: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Layover {
    pub duration: u32,
    pub airport: String,
    pub airport_code: String,
    pub overnight: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AirportSummary {
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport: Option<AirportRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl AirportSummary {
    pub fn city_only(city: &str) -> Self {
        Self {
            city: city.to_string(),
            airport: None,
            country: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AirportRef {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typical_price_range: Option<(f64, f64)>,
}
