use crate::models::trip::TripRequest;

const PROMPT_DATE_FORMAT: &str = "%b %-d, %Y";

/// JSON contract the model is asked to follow. Field names must match
/// `models::itinerary` exactly, since the extractor deserializes into it.
pub const ITINERARY_SCHEMA: &str = r#"{
  "days": [
    {
      "title": "Day title/theme",
      "morning": {
        "activities": [
          {
            "title": "Activity name",
            "description": "Detailed description",
            "location": "Specific location name",
            "time": "Recommended time"
          }
        ]
      },
      "afternoon": {
        "activities": [...]
      },
      "evening": {
        "activities": [...]
      }
    }
  ],
  "tips": ["tip 1", "tip 2", ...],
  "mustSeeLocations": ["location 1", "location 2", ...],
  "foodRecommendations": ["food 1", "food 2", ...]
}"#;

/// Renders the generation prompt for a trip. Pure: the same request always
/// yields the same string.
pub fn build_itinerary_prompt(request: &TripRequest) -> String {
    let notes_line = match &request.additional_notes {
        Some(notes) => format!("Additional Notes: {}\n", notes),
        None => String::new(),
    };

    format!(
        "You are an expert travel planner. Create a detailed day-by-day travel itinerary for a trip with the following details:

Source: {source}
Destination: {destination}
Dates: {start} to {end} ({days} days)
Budget: {currency} {budget}
Number of Travelers: {travelers}
Interests: {interests}
{notes_line}
For each day, please provide:
1. A day title/theme
2. Morning activities (1-3 activities with descriptions, locations, and recommended times)
3. Afternoon activities (1-3 activities with descriptions, locations, and recommended times)
4. Evening activities (1-3 activities with descriptions, locations, and recommended times)

Also include:
- 5-7 practical travel tips specific to the destination
- 5 must-see locations that shouldn't be missed
- 5 food recommendations typical of the destination

Generate the response in a structured JSON format with the following schema:
{schema}

Ensure all recommendations stay within the specified budget and match the travelers' interests.",
        source = request.source,
        destination = request.destination,
        start = request.start_date.format(PROMPT_DATE_FORMAT),
        end = request.end_date.format(PROMPT_DATE_FORMAT),
        days = request.duration_days(),
        currency = request.currency,
        budget = request.budget,
        travelers = request.travelers,
        interests = request.interests.join(", "),
        notes_line = notes_line,
        schema = ITINERARY_SCHEMA,
    )
}
