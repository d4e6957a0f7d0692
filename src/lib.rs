//! `SiteMetrics` - distance and competitor metrics for recycling sites
//!
//! This library provides Haversine distances between reference sites,
//! aggregate statistics over a fixed set of recycling businesses, and the
//! dashboard figures derived from them.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;

// Re-export core types for public API
pub use config::{LoggingConfig, MetricsConfig, SiteMetricsConfig};
pub use dashboard::{CompetitorTier, DashboardSummary};
pub use dataset::{Dataset, reference_dataset};
pub use error::{Result, SiteMetricsError};
pub use metrics::{
    DistanceDrift, average_distance, count_by_category, distance_drift, distance_km,
    estimated_travel_minutes, nearest_n, validate_locations, within_radius,
};
pub use models::{Category, DistanceField, GeoPoint, Location, ReferencePoint, RouteSegment};
