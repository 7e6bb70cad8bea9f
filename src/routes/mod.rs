pub mod flights;
pub mod health;
pub mod places;
pub mod travel_plan;
