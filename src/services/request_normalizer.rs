use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::errors::PlanError;
use crate::models::trip::{TripPlanForm, TripRequest};

const DATE_FORMAT: &str = "%Y-%m-%d";
// Longest trip, in days, that gets planned day by day.
pub const MAX_TRIP_DAYS: i64 = 90;

/// Shapes a posted trip form into a `TripRequest`.
pub fn normalize_trip_request(form: &TripPlanForm) -> Result<TripRequest, PlanError> {
    let (source, destination, start_raw, end_raw) = match (
        non_blank(&form.source),
        non_blank(&form.destination),
        non_blank(&form.start_date),
        non_blank(&form.end_date),
    ) {
        (Some(source), Some(destination), Some(start), Some(end)) => {
            (source, destination, start, end)
        }
        _ => return Err(PlanError::Validation("Missing required fields".to_string())),
    };

    let start_date = parse_trip_date(&start_raw)
        .ok_or_else(|| PlanError::Validation(format!("Invalid start date: {}", start_raw)))?;
    let end_date = parse_trip_date(&end_raw)
        .ok_or_else(|| PlanError::Validation(format!("Invalid end date: {}", end_raw)))?;

    if start_date > end_date {
        return Err(PlanError::Validation(
            "Start date must be on or before end date".to_string(),
        ));
    }
    if (end_date - start_date).num_days() + 1 > MAX_TRIP_DAYS {
        return Err(PlanError::Validation(format!(
            "Trips can be at most {} days long",
            MAX_TRIP_DAYS
        )));
    }

    let budget = form
        .budget
        .as_ref()
        .and_then(parse_positive_integer)
        .ok_or_else(|| PlanError::Validation("Budget must be a positive number".to_string()))?;

    let travelers = form
        .travelers
        .as_ref()
        .and_then(parse_positive_integer)
        .and_then(|count| u32::try_from(count).ok())
        .ok_or_else(|| {
            PlanError::Validation("Travelers must be a positive number".to_string())
        })?;

    let currency = non_blank(&form.currency)
        .map(|code| code.to_uppercase())
        .filter(|code| code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .ok_or_else(|| {
            PlanError::Validation("Currency must be a three-letter ISO code".to_string())
        })?;

    let mut interests: Vec<String> = Vec::new();
    for interest in form.interests.iter().flatten() {
        let interest = interest.trim();
        if !interest.is_empty() && !interests.iter().any(|seen| seen == interest) {
            interests.push(interest.to_string());
        }
    }
    if interests.is_empty() {
        return Err(PlanError::Validation(
            "Please select at least one interest".to_string(),
        ));
    }

    Ok(TripRequest {
        source,
        destination,
        start_date,
        end_date,
        budget,
        currency,
        travelers,
        interests,
        additional_notes: non_blank(&form.additional_notes),
    })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accepts `2024-06-01` or a full RFC 3339 timestamp.
fn parse_trip_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

// The form posts numbers as strings, API clients post real numbers.
fn parse_positive_integer(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paris_form() -> TripPlanForm {
        serde_json::from_value(json!({
            "source": "New York (JFK)",
            "destination": "Paris, France",
            "startDate": "2024-06-01",
            "endDate": "2024-06-03",
            "budget": "1500",
            "currency": "usd",
            "travelers": "2",
            "interests": ["culture", "food", " culture ", ""],
            "additionalNotes": "   "
        }))
        .unwrap()
    }

    #[test]
    fn test_normalizes_valid_form() {
        let request = normalize_trip_request(&paris_form()).unwrap();

        assert_eq!(request.source, "New York (JFK)");
        assert_eq!(request.destination, "Paris, France");
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(request.duration_days(), 3);
        assert_eq!(request.budget, 1500);
        assert_eq!(request.currency, "USD");
        assert_eq!(request.travelers, 2);
        assert_eq!(request.interests, vec!["culture", "food"]);
        assert_eq!(request.additional_notes, None);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        for field in ["source", "destination", "startDate", "endDate"] {
            let mut value = serde_json::to_value(paris_form()).unwrap();
            value[field] = json!("  ");
            let form: TripPlanForm = serde_json::from_value(value).unwrap();

            match normalize_trip_request(&form) {
                Err(PlanError::Validation(msg)) => assert_eq!(msg, "Missing required fields"),
                other => panic!("expected validation error for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let mut form = paris_form();
        form.start_date = Some("2024-06-05".to_string());
        assert!(matches!(
            normalize_trip_request(&form),
            Err(PlanError::Validation(_))
        ));
    }

    #[test]
    fn test_single_day_trip_is_allowed() {
        let mut form = paris_form();
        form.end_date = Some("2024-06-01".to_string());
        let request = normalize_trip_request(&form).unwrap();
        assert_eq!(request.duration_days(), 1);
    }

    #[test]
    fn test_accepts_rfc3339_dates_and_numeric_fields() {
        let mut form = paris_form();
        form.start_date = Some("2024-06-01T00:00:00.000Z".to_string());
        form.budget = Some(json!(2500));
        form.travelers = Some(json!(3.0));

        let request = normalize_trip_request(&form).unwrap();
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(request.budget, 2500);
        assert_eq!(request.travelers, 3);
    }

    #[test]
    fn test_rejects_bad_budget_currency_and_interests() {
        let mut form = paris_form();
        form.budget = Some(json!("0"));
        assert!(normalize_trip_request(&form).is_err());

        let mut form = paris_form();
        form.currency = Some("Euro".to_string());
        assert!(normalize_trip_request(&form).is_err());

        let mut form = paris_form();
        form.interests = Some(vec![]);
        assert!(normalize_trip_request(&form).is_err());
    }

    #[test]
    fn test_keeps_additional_notes() {
        let mut form = paris_form();
        form.additional_notes = Some(" Vegetarian please ".to_string());
        let request = normalize_trip_request(&form).unwrap();
        assert_eq!(request.additional_notes.as_deref(), Some("Vegetarian please"));
    }

    #[test]
    fn test_trip_length_is_capped() {
        let mut form = paris_form();
        form.start_date = Some("2024-01-01".to_string());
        form.end_date = Some("2024-03-30".to_string());
        assert_eq!(normalize_trip_request(&form).unwrap().duration_days(), MAX_TRIP_DAYS);

        form.end_date = Some("2024-03-31".to_string());
        assert!(matches!(
            normalize_trip_request(&form),
            Err(PlanError::Validation(_))
        ));

        form.start_date = Some("0001-01-01".to_string());
        form.end_date = Some("9999-12-31".to_string());
        assert!(normalize_trip_request(&form).is_err());
    }
}
