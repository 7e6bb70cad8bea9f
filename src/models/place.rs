use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlacePrediction {
    pub place_id: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlacesResponse {
    pub predictions: Vec<PlacePrediction>,
}
