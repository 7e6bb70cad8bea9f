use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Day-by-day plan. Field names mirror the JSON contract embedded in the
/// generation prompt, so keep the two in sync.
///
/// Model output is loosely typed: `null` stands in for any missing value and
/// scalars may come back as numbers. Only the overall shape is enforced.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub days: Vec<Day>,
    #[serde(default, deserialize_with = "deserialize_text_list")]
    pub tips: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_text_list")]
    pub must_see_locations: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_text_list")]
    pub food_recommendations: Vec<String>,
}

impl Itinerary {
    /// Fills any empty list from `fallback`. Days are left untouched.
    pub fn backfill_lists(&mut self, fallback: &Itinerary) {
        if self.tips.is_empty() {
            self.tips = fallback.tips.clone();
        }
        if self.must_see_locations.is_empty() {
            self.must_see_locations = fallback.must_see_locations.clone();
        }
        if self.food_recommendations.is_empty() {
            self.food_recommendations = fallback.food_recommendations.clone();
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Day {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub morning: TimeBlock,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub afternoon: TimeBlock,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub evening: TimeBlock,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct TimeBlock {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub activities: Vec<Activity>,
}

impl TimeBlock {
    pub fn single(activity: Activity) -> Self {
        Self {
            activities: vec![activity],
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    // Free-form window like "9:00 AM - 12:00 PM"; not parsed.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
}

// `null` reads as the type's default.
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value))
}

// Non-scalar entries are dropped; a lone scalar becomes a one-item list.
fn deserialize_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    };
    Ok(items)
}
