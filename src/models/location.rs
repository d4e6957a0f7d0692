//! Location model for geographic coordinates and business sites

use crate::error::{Result, SiteMetricsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point without checking bounds
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a point, rejecting out-of-range or non-finite values
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self::new(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Check latitude in [-90, 90] and longitude in [-180, 180]
    pub fn validate(&self) -> Result<()> {
        // NaN fails both range checks
        let lat_ok = (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(SiteMetricsError::invalid_coordinate(
                self.latitude,
                self.longitude,
            ))
        }
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self, precision: usize) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.latitude,
            self.longitude,
            prec = precision
        )
    }
}

impl FromStr for GeoPoint {
    type Err = SiteMetricsError;

    /// Parse `"lat,lon"`
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| SiteMetricsError::invalid_argument(format!("expected 'lat,lon', got '{s}'")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| SiteMetricsError::invalid_argument(format!("'{}': {e}", part.trim())))
        };
        Self::try_new(parse(lat)?, parse(lon)?)
    }
}

/// Kind of business at a location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    RecyclingShop,
    PaperFactory,
    PlasticFactory,
}

/// Display attributes of a [`Category`]
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub label: &'static str,
    /// Marker color as a hex string
    pub color: &'static str,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::RecyclingShop,
        Category::PaperFactory,
        Category::PlasticFactory,
    ];

    /// Tag used in serialized data and on the command line
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Category::RecyclingShop => "recycling-shop",
            Category::PaperFactory => "paper-factory",
            Category::PlasticFactory => "plastic-factory",
        }
    }

    #[must_use]
    pub fn style(self) -> CategoryStyle {
        match self {
            Category::RecyclingShop => CategoryStyle {
                label: "Recycling shop",
                color: "#10b981",
            },
            Category::PaperFactory => CategoryStyle {
                label: "Paper factory",
                color: "#3b82f6",
            },
            Category::PlasticFactory => CategoryStyle {
                label: "Plastic pellet factory",
                color: "#f97316",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.style().label)
    }
}

impl FromStr for Category {
    type Err = SiteMetricsError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.tag() == s)
            .ok_or_else(|| {
                SiteMetricsError::invalid_argument(format!(
                    "unknown category '{s}'. Must be one of: recycling-shop, paper-factory, plastic-factory"
                ))
            })
    }
}

/// Which precomputed reference distance an aggregate reads
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceField {
    /// Distance to the new yard
    SiteA,
    /// Distance to the distillery
    SiteB,
}

/// A business site with precomputed distances to both reference sites.
///
/// `distance_from_site_a` and `distance_from_site_b` are static data and are
/// not derived from `position`. Use
/// [`distance_drift`](crate::metrics::validation::distance_drift) to see how
/// far they are from a live calculation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub position: GeoPoint,
    /// Kilometers to site A
    pub distance_from_site_a: f64,
    /// Kilometers to site B
    pub distance_from_site_b: f64,
    pub notes: String,
}

impl Location {
    /// Read the selected precomputed distance
    #[must_use]
    pub fn distance(&self, field: DistanceField) -> f64 {
        match field {
            DistanceField::SiteA => self.distance_from_site_a,
            DistanceField::SiteB => self.distance_from_site_b,
        }
    }
}

/// A fixed, named site of interest
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReferencePoint {
    pub name: String,
    pub position: GeoPoint,
}

impl ReferencePoint {
    #[must_use]
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(13.6463, 100.2794)]
    fn test_valid_points(#[case] lat: f64, #[case] lon: f64) {
        assert!(GeoPoint::try_new(lat, lon).is_ok());
    }

    #[rstest]
    #[case(90.000_1, 0.0)]
    #[case(-91.0, 0.0)]
    #[case(0.0, 180.5)]
    #[case(0.0, -181.0)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    #[case(f64::NEG_INFINITY, 0.0)]
    fn test_invalid_points(#[case] lat: f64, #[case] lon: f64) {
        let err = GeoPoint::try_new(lat, lon).unwrap_err();
        assert!(matches!(err, SiteMetricsError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_parse_point() {
        let point: GeoPoint = "13.6463, 100.2794".parse().unwrap();
        assert_eq!(point, GeoPoint::new(13.6463, 100.2794));

        assert!("13.6463".parse::<GeoPoint>().is_err());
        assert!("abc,1".parse::<GeoPoint>().is_err());
        assert!(matches!(
            "95,1".parse::<GeoPoint>(),
            Err(SiteMetricsError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_format_coordinates() {
        let point = GeoPoint::new(13.617_180_906_024_69, 100.289_584_616_788_94);
        assert_eq!(point.format_coordinates(4), "13.6172, 100.2896");
    }

    #[test]
    fn test_category_tags_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.tag().parse::<Category>().unwrap(), category);
        }
        assert!("metal-yard".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_tag() {
        let json = serde_json::to_string(&Category::PaperFactory).unwrap();
        assert_eq!(json, "\"paper-factory\"");
    }

    #[test]
    fn test_category_styles_are_distinct() {
        let colors: Vec<_> = Category::ALL.iter().map(|c| c.style().color).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_distance_field_selection() {
        let location = Location {
            id: "x".to_string(),
            name: "X".to_string(),
            category: Category::RecyclingShop,
            position: GeoPoint::new(13.6, 100.3),
            distance_from_site_a: 1.5,
            distance_from_site_b: 2.5,
            notes: String::new(),
        };
        assert_eq!(location.distance(DistanceField::SiteA), 1.5);
        assert_eq!(location.distance(DistanceField::SiteB), 2.5);
    }
}
