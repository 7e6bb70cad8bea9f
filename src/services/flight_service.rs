//! Flight recommendations from SerpApi's Google Flights engine.
//!
//! The provider payload is read into all-optional `Raw*` types and then
//! converted field by field, so a partially filled answer still yields
//! whatever flights are usable. Every failure on this path is logged and
//! answered with demo flights; callers never see an error.

use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::FlightSearchConfig;
use crate::models::flight::{
    AirportRef, AirportStop, AirportSummary, FlightOption, FlightRecommendations, FlightSegment,
    Layover, PriceInsights,
};

const MAX_RECOMMENDED_FLIGHTS: usize = 3;
const DEMO_AIRLINE_LOGO: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c5/Airplane_silhouette.svg/1024px-Airplane_silhouette.svg.png";

#[derive(Debug, Error)]
pub enum FlightSearchError {
    #[error("SERPAPI_KEY is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Flight search failed with status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Flight provider reported an error: {0}")]
    ProviderError(String),

    #[error("Malformed flight search response: {0}")]
    MalformedResponse(String),

    #[error("Flight search returned no usable flights")]
    NoFlights,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFlightSearchResponse {
    #[serde(default)]
    pub best_flights: Option<Vec<Value>>,
    #[serde(default)]
    pub other_flights: Option<Vec<Value>>,
    #[serde(default)]
    pub airports: Option<Vec<RawAirportGroup>>,
    #[serde(default)]
    pub price_insights: Option<RawPriceInsights>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFlightOption {
    pub price: Option<f64>,
    pub total_duration: Option<u32>,
    pub flights: Option<Vec<RawFlightSegment>>,
    pub layovers: Option<Vec<RawLayover>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFlightSegment {
    pub airline: Option<String>,
    pub airline_logo: Option<String>,
    pub flight_number: Option<String>,
    pub departure_airport: Option<RawAirportStop>,
    pub arrival_airport: Option<RawAirportStop>,
    pub duration: Option<u32>,
    pub travel_class: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAirportStop {
    pub name: Option<String>,
    pub id: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLayover {
    pub duration: Option<u32>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub overnight: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAirportGroup {
    pub departure: Option<Vec<RawAirportInfo>>,
    pub arrival: Option<Vec<RawAirportInfo>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAirportInfo {
    pub airport: Option<RawAirportRef>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAirportRef {
    pub name: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPriceInsights {
    pub lowest_price: Option<f64>,
    pub typical_price_range: Option<Vec<f64>>,
}

/// `"New York (JFK)"` gives `JFK`. Without a parenthesized code, the first
/// three letters of the first word are used, upper-cased.
pub fn extract_airport_code(location: &str) -> String {
    static CODE_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = CODE_PATTERN.get_or_init(|| Regex::new(r"\(([A-Z]{3})\)").expect("valid regex"));

    if let Some(code) = pattern.captures(location).and_then(|c| c.get(1)) {
        return code.as_str().to_string();
    }

    location
        .trim()
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or("")
        .chars()
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

fn to_airport_stop(raw: RawAirportStop) -> Option<AirportStop> {
    Some(AirportStop {
        code: raw.id?,
        name: raw.name.unwrap_or_default(),
        local_time: raw.time.unwrap_or_default(),
    })
}

fn to_flight_segment(raw: RawFlightSegment) -> Option<FlightSegment> {
    Some(FlightSegment {
        departure_airport: to_airport_stop(raw.departure_airport?)?,
        arrival_airport: to_airport_stop(raw.arrival_airport?)?,
        airline: raw.airline.unwrap_or_default(),
        airline_logo_url: raw.airline_logo.unwrap_or_default(),
        flight_number: raw.flight_number.unwrap_or_default(),
        duration: raw.duration.unwrap_or(0),
        travel_class: raw.travel_class.unwrap_or_default(),
    })
}

fn to_layover(raw: RawLayover) -> Layover {
    Layover {
        duration: raw.duration.unwrap_or(0),
        airport: raw.name.unwrap_or_default(),
        airport_code: raw.id.unwrap_or_default(),
        overnight: raw.overnight.unwrap_or(false),
    }
}

/// An option needs a price and at least one fully described segment.
pub fn to_flight_option(raw: RawFlightOption) -> Option<FlightOption> {
    let price = raw.price?;
    let flights: Vec<FlightSegment> = raw
        .flights
        .unwrap_or_default()
        .into_iter()
        .filter_map(to_flight_segment)
        .collect();
    if flights.is_empty() {
        return None;
    }

    let layovers: Vec<Layover> = raw
        .layovers
        .unwrap_or_default()
        .into_iter()
        .map(to_layover)
        .collect();

    let total_duration = raw.total_duration.unwrap_or_else(|| {
        flights.iter().map(|f| f.duration).sum::<u32>()
            + layovers.iter().map(|l| l.duration).sum::<u32>()
    });

    Some(FlightOption {
        price,
        total_duration,
        flights,
        layovers,
    })
}

fn to_airport_summary(raw: Option<RawAirportInfo>, fallback_city: &str) -> AirportSummary {
    match raw {
        Some(info) => AirportSummary {
            city: info.city.unwrap_or_else(|| fallback_city.to_string()),
            airport: info.airport.and_then(|a| {
                Some(AirportRef {
                    code: a.id?,
                    name: a.name.unwrap_or_default(),
                })
            }),
            country: info.country,
        },
        None => AirportSummary::city_only(fallback_city),
    }
}

fn to_price_insights(raw: RawPriceInsights) -> PriceInsights {
    let typical_price_range = raw.typical_price_range.and_then(|range| match range.as_slice() {
        [low, high, ..] => Some((*low, *high)),
        _ => None,
    });
    PriceInsights {
        lowest_price: raw.lowest_price,
        typical_price_range,
    }
}

/// Reshapes a provider payload: best then other flights, capped at three.
pub fn reshape_search_response(
    response: RawFlightSearchResponse,
    source_code: &str,
    destination_code: &str,
) -> Result<FlightRecommendations, FlightSearchError> {
    if let Some(message) = response.error {
        return Err(FlightSearchError::ProviderError(message));
    }

    let flights: Vec<FlightOption> = response
        .best_flights
        .unwrap_or_default()
        .into_iter()
        .chain(response.other_flights.unwrap_or_default())
        .filter_map(|value| serde_json::from_value::<RawFlightOption>(value).ok())
        .filter_map(to_flight_option)
        .take(MAX_RECOMMENDED_FLIGHTS)
        .collect();

    if flights.is_empty() {
        return Err(FlightSearchError::NoFlights);
    }

    let group = response.airports.and_then(|groups| groups.into_iter().next());
    let (departure, arrival) = match group {
        Some(group) => (
            group.departure.and_then(|d| d.into_iter().next()),
            group.arrival.and_then(|a| a.into_iter().next()),
        ),
        None => (None, None),
    };

    Ok(FlightRecommendations {
        flights,
        source: to_airport_summary(departure, source_code),
        destination: to_airport_summary(arrival, destination_code),
        price_insights: response.price_insights.map(to_price_insights),
        is_fallback: false,
    })
}

/// Two demo itineraries so the UI always has flight cards to show.
pub fn fallback_flights(source: &str, destination: &str) -> FlightRecommendations {
    let source_code = extract_airport_code(source);
    let destination_code = extract_airport_code(destination);
    let source_airport = format!("{} Airport", source);
    let destination_airport = format!("{} Airport", destination);

    let demo = |airline: &str, number: &str, price: f64, minutes: u32, departs: &str, arrives: &str| {
        FlightOption {
            price,
            total_duration: minutes,
            flights: vec![FlightSegment {
                airline: airline.to_string(),
                airline_logo_url: DEMO_AIRLINE_LOGO.to_string(),
                flight_number: number.to_string(),
                departure_airport: AirportStop {
                    name: source_airport.clone(),
                    code: source_code.clone(),
                    local_time: departs.to_string(),
                },
                arrival_airport: AirportStop {
                    name: destination_airport.clone(),
                    code: destination_code.clone(),
                    local_time: arrives.to_string(),
                },
                duration: minutes,
                travel_class: "Economy".to_string(),
            }],
            layovers: vec![],
        }
    };

    let flights = vec![
        demo("Demo Airlines", "DA123", 550.0, 360, "08:00", "14:00"),
        demo("Demo Express", "DE456", 450.0, 420, "10:30", "17:30"),
    ];

    FlightRecommendations {
        flights,
        source: AirportSummary {
            city: source.to_string(),
            airport: Some(AirportRef {
                name: source_airport.clone(),
                code: source_code.clone(),
            }),
            country: Some("Unknown".to_string()),
        },
        destination: AirportSummary {
            city: destination.to_string(),
            airport: Some(AirportRef {
                name: destination_airport.clone(),
                code: destination_code.clone(),
            }),
            country: Some("Unknown".to_string()),
        },
        price_insights: Some(PriceInsights {
            lowest_price: Some(450.0),
            typical_price_range: Some((450.0, 650.0)),
        }),
        is_fallback: true,
    }
}

#[derive(Clone)]
pub struct FlightService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl FlightService {
    pub fn new(config: &FlightSearchConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// One Google Flights query. Codes must already be airport codes.
    pub async fn search_flights(
        &self,
        source_code: &str,
        destination_code: &str,
        departure_date: &str,
        return_date: Option<&str>,
    ) -> Result<RawFlightSearchResponse, FlightSearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FlightSearchError::MissingCredential)?;

        // SerpApi trip types: 1 = round trip, 2 = one way.
        let trip_type = if return_date.is_some() { "1" } else { "2" };
        let mut params = vec![
            ("engine", "google_flights"),
            ("api_key", api_key),
            ("departure_id", source_code),
            ("arrival_id", destination_code),
            ("outbound_date", departure_date),
            ("hl", "en"),
            ("currency", "USD"),
            ("type", trip_type),
        ];
        if let Some(return_date) = return_date {
            params.push(("return_date", return_date));
        }

        info!(
            "Searching flights {} -> {} on {} (return: {:?})",
            source_code, destination_code, departure_date, return_date
        );

        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FlightSearchError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RawFlightSearchResponse>()
            .await
            .map_err(|e| FlightSearchError::MalformedResponse(e.to_string()))
    }

    /// Never fails: any provider problem is logged and answered with demo
    /// flights.
    pub async fn get_recommended_flights(
        &self,
        source: &str,
        destination: &str,
        departure_date: &str,
        return_date: Option<&str>,
    ) -> FlightRecommendations {
        let source_code = extract_airport_code(source);
        let destination_code = extract_airport_code(destination);

        let result = match self
            .search_flights(&source_code, &destination_code, departure_date, return_date)
            .await
        {
            Ok(response) => reshape_search_response(response, &source_code, &destination_code),
            Err(e) => Err(e),
        };

        match result {
            Ok(recommendations) => recommendations,
            Err(e) => {
                warn!("Error getting recommended flights, using demo data: {}", e);
                fallback_flights(source, destination)
            }
        }
    }
}
