//! Geospatial metrics
//!
//! - Haversine distance and travel-time estimates
//! - Aggregates over location collections (counts, radius filters, averages, rankings)
//! - Dataset validation and stored-distance drift reports

pub mod aggregate;
pub mod distance;
pub mod validation;

pub use aggregate::{
    average_distance, count_by_category, count_within_radius, nearest_n, of_category,
    within_radius,
};
pub use distance::{
    DEFAULT_MINUTES_PER_KM, EARTH_RADIUS_KM, distance_between, distance_km,
    estimated_travel_minutes,
};
pub use validation::{DistanceDrift, distance_drift, validate_locations};
