pub mod flight;
pub mod itinerary;
pub mod place;
pub mod trip;
