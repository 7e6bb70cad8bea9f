use actix_web::{web, HttpResponse};
use log::info;

use crate::errors::PlanError;
use crate::models::trip::{TravelPlan, TripPlanForm};
use crate::services::itinerary_generation_service::TravelPlanner;
use crate::services::request_normalizer::normalize_trip_request;

/*
    /api/travel-plan
*/
pub async fn create(
    planner: web::Data<TravelPlanner>,
    input: web::Json<TripPlanForm>,
) -> Result<HttpResponse, PlanError> {
    let form = input.into_inner();
    let request = normalize_trip_request(&form)?;

    info!(
        "Planning {}-day trip from {} to {}",
        request.duration_days(),
        request.source,
        request.destination
    );
    let itinerary = planner.generate_itinerary(&request).await?;

    Ok(HttpResponse::Ok().json(TravelPlan::new(form, itinerary)))
}
