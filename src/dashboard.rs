//! Dashboard figures derived from a [`Dataset`]
//!
//! Competitors are recycling shops, factories are every other category.
//! All radius figures read the stored site A distances.

use crate::config::MetricsConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::metrics::aggregate::{
    average_distance, count_by_category, count_within_radius, nearest_n, of_category, within_radius,
};
use crate::metrics::distance::estimated_travel_minutes;
use crate::models::{Category, DistanceField, Location, RouteSegment};
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CompetitorTier {
    Near,
    Far,
}

impl fmt::Display for CompetitorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitorTier::Near => write!(f, "Near"),
            CompetitorTier::Far => write!(f, "Far"),
        }
    }
}

/// A ranked competitor
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorEntry {
    pub rank: usize,
    pub location: Location,
    pub tier: CompetitorTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// A route table row with its derived average speed
#[derive(Debug, Clone, Serialize)]
pub struct RouteRow {
    #[serde(flatten)]
    pub route: RouteSegment,
    pub average_speed_kmh: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub site_a: String,
    pub site_b: String,
    pub site_distance_km: f64,
    pub site_travel_minutes: f64,
    pub total_locations: usize,
    pub category_counts: Vec<CategoryCount>,
    pub competitor_radius_km: f64,
    pub competitors_within_radius: usize,
    pub total_competitors: usize,
    pub average_competitor_distance_km: f64,
    pub factory_radius_km: f64,
    pub factories_within_radius: usize,
    pub paper_factories_within_radius: usize,
    pub plastic_factories_within_radius: usize,
    pub nearest_competitors: Vec<CompetitorEntry>,
    pub routes: Vec<RouteRow>,
}

impl DashboardSummary {
    pub fn compute(dataset: &Dataset, config: &MetricsConfig) -> Result<Self> {
        let locations = &dataset.locations;
        let field = DistanceField::SiteA;

        let site_distance_km = dataset.site_distance_km()?;
        let site_travel_minutes = estimated_travel_minutes(site_distance_km, config.minutes_per_km)?;

        let competitors = of_category(locations, Category::RecyclingShop);
        let competitors_within_radius =
            within_radius(competitors.iter().copied(), field, config.competitor_radius_km)?.len();
        let average_competitor_distance_km = average_distance(competitors.iter().copied(), field)?;

        let factories_within = |category: Option<Category>| {
            count_within_radius(locations, field, config.factory_radius_km, |l| match category {
                Some(category) => l.category == category,
                None => l.category != Category::RecyclingShop,
            })
        };

        let top = i64::try_from(config.top_competitors).unwrap_or(i64::MAX);
        let nearest_competitors = nearest_n(competitors.iter().copied(), field, top)?
            .into_iter()
            .enumerate()
            .map(|(index, location)| CompetitorEntry {
                rank: index + 1,
                tier: if location.distance(field) <= config.near_competitor_km {
                    CompetitorTier::Near
                } else {
                    CompetitorTier::Far
                },
                location: location.clone(),
            })
            .collect();

        let routes = dataset
            .routes
            .iter()
            .map(|route| RouteRow {
                average_speed_kmh: route.average_speed_kmh(),
                route: route.clone(),
            })
            .collect();

        let summary = Self {
            site_a: dataset.site_a.name.clone(),
            site_b: dataset.site_b.name.clone(),
            site_distance_km,
            site_travel_minutes,
            total_locations: locations.len(),
            category_counts: Category::ALL
                .into_iter()
                .map(|category| CategoryCount {
                    category,
                    count: count_by_category(locations, category),
                })
                .collect(),
            competitor_radius_km: config.competitor_radius_km,
            competitors_within_radius,
            total_competitors: competitors.len(),
            average_competitor_distance_km,
            factory_radius_km: config.factory_radius_km,
            factories_within_radius: factories_within(None)?,
            paper_factories_within_radius: factories_within(Some(Category::PaperFactory))?,
            plastic_factories_within_radius: factories_within(Some(Category::PlasticFactory))?,
            nearest_competitors,
            routes,
        };
        debug!("Dashboard summary: {:?}", summary);
        Ok(summary)
    }
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} -> {}", self.site_a, self.site_b)?;
        writeln!(
            f,
            "  Distance: {:.2} km (about {} min)",
            self.site_distance_km, self.site_travel_minutes
        )?;
        writeln!(f)?;

        writeln!(f, "Locations: {}", self.total_locations)?;
        for entry in &self.category_counts {
            writeln!(f, "  {}: {}", entry.category, entry.count)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Competitors within {} km: {} of {}",
            self.competitor_radius_km, self.competitors_within_radius, self.total_competitors
        )?;
        writeln!(
            f,
            "Average competitor distance: {:.1} km",
            self.average_competitor_distance_km
        )?;
        writeln!(
            f,
            "Factories within {} km: {} (paper {} | plastic {})",
            self.factory_radius_km,
            self.factories_within_radius,
            self.paper_factories_within_radius,
            self.plastic_factories_within_radius
        )?;
        writeln!(f)?;

        writeln!(f, "Nearest competitors:")?;
        for entry in &self.nearest_competitors {
            writeln!(
                f,
                "  #{} {} - {} km ({}), {} km from {}",
                entry.rank,
                entry.location.name,
                entry.location.distance_from_site_a,
                entry.tier,
                entry.location.distance_from_site_b,
                self.site_b
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Routes:")?;
        for row in &self.routes {
            let speed = row
                .average_speed_kmh
                .map_or_else(|| "-".to_string(), |s| format!("{s} km/h"));
            writeln!(
                f,
                "  {} -> {}: {:.2} km, {} min, {} [{}, {}]",
                row.route.origin,
                row.route.destination,
                row.route.distance_km,
                row.route.estimated_minutes,
                speed,
                row.route.route_category,
                row.route.difficulty
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::reference_dataset;

    fn summary() -> DashboardSummary {
        DashboardSummary::compute(reference_dataset().unwrap(), &MetricsConfig::default()).unwrap()
    }

    #[test]
    fn test_competitor_figures() {
        let summary = summary();
        assert_eq!(summary.total_competitors, 7);
        assert_eq!(summary.competitors_within_radius, 4);
        assert!((summary.average_competitor_distance_km - 36.1 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_factory_figures() {
        let summary = summary();
        assert_eq!(summary.paper_factories_within_radius, 3);
        // the 10.0 km pellet plant sits on the boundary and counts
        assert_eq!(summary.plastic_factories_within_radius, 3);
        assert_eq!(summary.factories_within_radius, 6);
    }

    #[test]
    fn test_nearest_competitors() {
        let summary = summary();
        let ids: Vec<&str> = summary
            .nearest_competitors
            .iter()
            .map(|e| e.location.id.as_str())
            .collect();
        assert_eq!(ids, vec!["5", "2", "3", "4", "7"]);
        assert_eq!(summary.nearest_competitors[0].rank, 1);
        assert_eq!(summary.nearest_competitors[0].tier, CompetitorTier::Near);
        assert_eq!(summary.nearest_competitors[1].tier, CompetitorTier::Far);
    }

    #[test]
    fn test_route_rows() {
        let summary = summary();
        assert_eq!(summary.routes.len(), 3);
        assert_eq!(summary.routes[1].average_speed_kmh, Some(17.0));
        assert_eq!(summary.routes[2].average_speed_kmh, Some(23.0));
    }

    #[test]
    fn test_custom_thresholds() {
        let config = MetricsConfig {
            competitor_radius_km: 2.0,
            top_competitors: 2,
            ..MetricsConfig::default()
        };
        let summary = DashboardSummary::compute(reference_dataset().unwrap(), &config).unwrap();
        assert_eq!(summary.competitors_within_radius, 1);
        assert_eq!(summary.nearest_competitors.len(), 2);
    }

    #[test]
    fn test_render_text() {
        let text = summary().to_string();
        assert!(text.contains("Competitors within 5 km: 4 of 7"));
        assert!(text.contains("Average competitor distance: 5.2 km"));
        assert!(text.contains("paper 3 | plastic 3"));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(summary()).unwrap();
        assert_eq!(json["competitors_within_radius"], 4);
        assert_eq!(json["routes"][0]["route_category"], "bottle-delivery");
        assert_eq!(json["nearest_competitors"][0]["tier"], "near");
    }
}
