pub mod analysis;
pub mod location;
pub mod route;

pub use analysis::{AdvantageCategory, Impact, StrategicAdvantage};
pub use location::{Category, CategoryStyle, DistanceField, GeoPoint, Location, ReferencePoint};
pub use route::{Difficulty, RouteCategory, RouteSegment};
