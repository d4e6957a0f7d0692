//! Dataset integrity checks.
//!
//! Stored site distances are static data. [`distance_drift`] compares them
//! with a live Haversine calculation and reports the gap; nothing here
//! rewrites the stored values.

use crate::error::{Result, SiteMetricsError};
use crate::metrics::distance::distance_km;
use crate::models::{DistanceField, Location, ReferencePoint};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Check coordinates, ids, names and stored distances of every location
pub fn validate_locations(locations: &[Location]) -> Result<()> {
    let mut seen = HashSet::with_capacity(locations.len());

    for location in locations {
        location.position.validate()?;

        if location.id.trim().is_empty() {
            return Err(SiteMetricsError::validation(format!(
                "location '{}' has an empty id",
                location.name
            )));
        }
        if !seen.insert(location.id.as_str()) {
            return Err(SiteMetricsError::validation(format!(
                "duplicate location id '{}'",
                location.id
            )));
        }
        if location.name.trim().is_empty() {
            return Err(SiteMetricsError::validation(format!(
                "location '{}' has an empty name",
                location.id
            )));
        }
        for field in [DistanceField::SiteA, DistanceField::SiteB] {
            let distance = location.distance(field);
            if !distance.is_finite() || distance < 0.0 {
                return Err(SiteMetricsError::validation(format!(
                    "location '{}' has an invalid {field:?} distance {distance}",
                    location.id
                )));
            }
        }
    }

    debug!("Validated {} locations", locations.len());
    Ok(())
}

/// A stored distance that disagrees with the live calculation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceDrift {
    pub location_id: String,
    pub field: DistanceField,
    pub stored_km: f64,
    pub computed_km: f64,
}

impl DistanceDrift {
    #[must_use]
    pub fn difference_km(&self) -> f64 {
        (self.stored_km - self.computed_km).abs()
    }
}

/// Stored distances farther than `tolerance_km` from the Haversine value
pub fn distance_drift(
    locations: &[Location],
    site_a: &ReferencePoint,
    site_b: &ReferencePoint,
    tolerance_km: f64,
) -> Result<Vec<DistanceDrift>> {
    if tolerance_km.is_nan() || tolerance_km < 0.0 {
        return Err(SiteMetricsError::invalid_argument(format!(
            "tolerance must not be negative, got {tolerance_km}"
        )));
    }

    let mut drift = Vec::new();
    for location in locations {
        for (field, site) in [(DistanceField::SiteA, site_a), (DistanceField::SiteB, site_b)] {
            let computed_km = distance_km(location.position, site.position)?;
            let stored_km = location.distance(field);
            if (stored_km - computed_km).abs() > tolerance_km {
                warn!(
                    "Location {} stores {:.2} km to {} but is {:.2} km away",
                    location.id, stored_km, site.name, computed_km
                );
                drift.push(DistanceDrift {
                    location_id: location.id.clone(),
                    field,
                    stored_km,
                    computed_km,
                });
            }
        }
    }
    Ok(drift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, GeoPoint};

    fn yard() -> ReferencePoint {
        ReferencePoint::new("New yard", GeoPoint::new(13.6463, 100.2794))
    }

    fn distillery() -> ReferencePoint {
        ReferencePoint::new(
            "Distillery",
            GeoPoint::new(13.617_180_906_024_69, 100.289_584_616_788_94),
        )
    }

    fn shop(id: &str) -> Location {
        Location {
            id: id.to_string(),
            name: format!("Shop {id}"),
            category: Category::RecyclingShop,
            position: GeoPoint::new(13.634_933, 100.284_467),
            distance_from_site_a: 1.4,
            distance_from_site_b: 2.1,
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_dataset() {
        assert!(validate_locations(&[shop("1"), shop("2")]).is_ok());
        assert!(validate_locations(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let err = validate_locations(&[shop("1"), shop("1")]).unwrap_err();
        assert!(err.to_string().contains("duplicate location id '1'"));
    }

    #[test]
    fn test_empty_name_and_id() {
        let mut unnamed = shop("1");
        unnamed.name = "  ".to_string();
        assert!(matches!(
            validate_locations(&[unnamed]),
            Err(SiteMetricsError::Validation { .. })
        ));

        let mut anonymous = shop("");
        anonymous.name = "Somewhere".to_string();
        assert!(matches!(
            validate_locations(&[anonymous]),
            Err(SiteMetricsError::Validation { .. })
        ));
    }

    #[test]
    fn test_out_of_range_position() {
        let mut lost = shop("1");
        lost.position = GeoPoint::new(13.6, 200.0);
        assert!(matches!(
            validate_locations(&[lost]),
            Err(SiteMetricsError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_negative_stored_distance() {
        let mut odd = shop("1");
        odd.distance_from_site_b = -2.0;
        assert!(matches!(
            validate_locations(&[odd]),
            Err(SiteMetricsError::Validation { .. })
        ));
    }

    #[test]
    fn test_no_drift_for_consistent_site() {
        let drift = distance_drift(&[shop("1")], &yard(), &distillery(), 0.1).unwrap();
        assert!(drift.is_empty());
    }

    #[test]
    fn test_drift_is_reported_not_fixed() {
        let mut stale = shop("1");
        stale.distance_from_site_a = 4.0;
        let locations = vec![stale];

        let drift = distance_drift(&locations, &yard(), &distillery(), 0.1).unwrap();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].location_id, "1");
        assert_eq!(drift[0].field, DistanceField::SiteA);
        assert_eq!(drift[0].stored_km, 4.0);
        assert!(drift[0].difference_km() > 2.5);
        assert_eq!(locations[0].distance_from_site_a, 4.0);
    }

    #[test]
    fn test_drift_rejects_negative_tolerance() {
        assert!(distance_drift(&[shop("1")], &yard(), &distillery(), -0.1).is_err());
    }
}
