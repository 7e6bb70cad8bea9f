use crate::errors::ExtractionFailure;
use crate::models::itinerary::Itinerary;

/// Pulls the itinerary JSON out of free-form model text: everything from
/// the first `{` to the last `}`. Any syntactically valid object of roughly
/// the right shape is accepted; `null`s and stray scalars are absorbed by the
/// `Itinerary` deserializers.
pub fn extract_itinerary(raw: &str) -> Result<Itinerary, ExtractionFailure> {
    let start = raw.find('{').ok_or(ExtractionFailure::NoJsonObject)?;
    let end = raw.rfind('}').ok_or(ExtractionFailure::NoJsonObject)?;
    if end <= start {
        return Err(ExtractionFailure::NoJsonObject);
    }

    let itinerary = serde_json::from_str::<Itinerary>(&raw[start..=end])?;
    Ok(itinerary)
}
