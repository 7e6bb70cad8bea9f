use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::services::flight_service::FlightService;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    source: Option<String>,
    destination: Option<String>,
    departure_date: Option<String>,
    return_date: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/*
    /api/flights
*/
pub async fn get_flights(
    flights: web::Data<FlightService>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let (source, destination, departure_date) = match (
        present(&params.source),
        present(&params.destination),
        present(&params.departure_date),
    ) {
        (Some(s), Some(d), Some(date)) => (s, d, date),
        _ => {
            return HttpResponse::BadRequest().json(json!({
                "error": "source, destination and departureDate are required"
            }))
        }
    };

    let recommendations = flights
        .get_recommended_flights(
            source,
            destination,
            departure_date,
            present(&params.return_date),
        )
        .await;

    HttpResponse::Ok().json(recommendations)
}
