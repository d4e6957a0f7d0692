//! Route table entries between named points

use crate::error::Result;
use crate::metrics::distance::estimated_travel_minutes;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RouteCategory {
    /// Empty bottles returned from the distillery
    BottleDelivery,
    MaterialCollection,
    General,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

/// A distance and traversal estimate between two named points
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteSegment {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    /// Computed once when the segment is built, never refreshed
    pub estimated_minutes: f64,
    pub route_category: RouteCategory,
    pub difficulty: Difficulty,
}

impl RouteSegment {
    /// Build a segment whose minutes come from `round(distance * minutes_per_km)`
    pub fn derived(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_km: f64,
        minutes_per_km: f64,
        route_category: RouteCategory,
        difficulty: Difficulty,
    ) -> Result<Self> {
        let estimated_minutes = estimated_travel_minutes(distance_km, minutes_per_km)?;
        Ok(Self {
            origin: origin.into(),
            destination: destination.into(),
            distance_km,
            estimated_minutes,
            route_category,
            difficulty,
        })
    }

    /// Build a segment that keeps a literal minutes value from a route table
    #[must_use]
    pub fn with_fixture_minutes(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_km: f64,
        estimated_minutes: f64,
        route_category: RouteCategory,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            distance_km,
            estimated_minutes,
            route_category,
            difficulty,
        }
    }

    /// Average speed in km/h rounded to a whole number, `None` for a zero-minute route
    #[must_use]
    pub fn average_speed_kmh(&self) -> Option<f64> {
        if self.estimated_minutes > 0.0 {
            Some((self.distance_km / self.estimated_minutes * 60.0).round())
        } else {
            None
        }
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteCategory::BottleDelivery => write!(f, "Bottle delivery"),
            RouteCategory::MaterialCollection => write!(f, "Material collection"),
            RouteCategory::General => write!(f, "General"),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Difficult => write!(f, "Difficult"),
        }
    }
}
