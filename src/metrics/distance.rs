//! Great-circle distance and travel-time estimates

use crate::error::{Result, SiteMetricsError};
use crate::models::{GeoPoint, ReferencePoint};
use tracing::debug;

/// Mean Earth radius in kilometers, as used by `haversine::Units::Kilometers`
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average road pace used for route estimates
pub const DEFAULT_MINUTES_PER_KM: f64 = 3.0;

/// Haversine distance in kilometers between two points.
///
/// Fails with [`SiteMetricsError::InvalidCoordinate`] when either point is out
/// of range or non-finite.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> Result<f64> {
    a.validate()?;
    b.validate()?;

    Ok(haversine::distance(
        to_haversine(a),
        to_haversine(b),
        haversine::Units::Kilometers,
    ))
}

fn to_haversine(point: GeoPoint) -> haversine::Location {
    haversine::Location {
        latitude: point.latitude,
        longitude: point.longitude,
    }
}

/// Distance between two reference sites
pub fn distance_between(a: &ReferencePoint, b: &ReferencePoint) -> Result<f64> {
    let distance = distance_km(a.position, b.position)?;
    debug!("{} -> {}: {:.3} km", a.name, b.name, distance);
    Ok(distance)
}

/// `round(distance_km * minutes_per_km)`, halves rounded up
pub fn estimated_travel_minutes(distance_km: f64, minutes_per_km: f64) -> Result<f64> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(SiteMetricsError::invalid_argument(format!(
            "distance must be a non-negative number of kilometers, got {distance_km}"
        )));
    }
    if !minutes_per_km.is_finite() || minutes_per_km <= 0.0 {
        return Err(SiteMetricsError::invalid_argument(format!(
            "minutes per km must be positive, got {minutes_per_km}"
        )));
    }
    let minutes = distance_km * minutes_per_km;
    if !minutes.is_finite() {
        return Err(SiteMetricsError::invalid_argument(format!(
            "travel time for {distance_km} km at {minutes_per_km} min/km is out of range"
        )));
    }
    Ok(minutes.round())
}
