use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde_json::json;

use crate::services::places_service::PlacesService;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    query: Option<String>,
}

/*
    /api/places
*/
pub async fn get_places(
    places: web::Data<PlacesService>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let query = match params.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => query,
        _ => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "Query parameter is required" }))
        }
    };

    match places.autocomplete(query).await {
        Ok(predictions) => HttpResponse::Ok().json(predictions),
        Err(err) => {
            error!("Error fetching places: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch places" }))
        }
    }
}
