//! Reference dataset: recycling businesses around the new yard in Samut Sakhon.
//!
//! Built once on first access and shared read-only afterwards.

use crate::error::{Result, SiteMetricsError};
use crate::metrics::distance::{DEFAULT_MINUTES_PER_KM, distance_between};
use crate::metrics::validation::validate_locations;
use crate::models::{
    AdvantageCategory, Category, Difficulty, GeoPoint, Impact, Location, ReferencePoint,
    RouteCategory, RouteSegment, StrategicAdvantage,
};
use serde::Serialize;
use std::sync::LazyLock;
use tracing::info;

/// Locations, the two reference sites, and the commentary derived from them
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    /// The new yard
    pub site_a: ReferencePoint,
    /// The distillery
    pub site_b: ReferencePoint,
    pub locations: Vec<Location>,
    pub routes: Vec<RouteSegment>,
    pub strategic_analysis: Vec<StrategicAdvantage>,
}

impl Dataset {
    /// Assemble a dataset, rejecting invalid reference points or locations
    pub fn new(
        site_a: ReferencePoint,
        site_b: ReferencePoint,
        locations: Vec<Location>,
        routes: Vec<RouteSegment>,
        strategic_analysis: Vec<StrategicAdvantage>,
    ) -> Result<Self> {
        site_a.position.validate()?;
        site_b.position.validate()?;
        validate_locations(&locations)?;
        Ok(Self {
            site_a,
            site_b,
            locations,
            routes,
            strategic_analysis,
        })
    }

    /// Live Haversine distance between site A and site B
    pub fn site_distance_km(&self) -> Result<f64> {
        distance_between(&self.site_a, &self.site_b)
    }

    #[must_use]
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }
}

static REFERENCE: LazyLock<Result<Dataset>> = LazyLock::new(build_reference_dataset);

/// The built-in Samut Sakhon dataset
pub fn reference_dataset() -> Result<&'static Dataset> {
    REFERENCE
        .as_ref()
        .map_err(|e| SiteMetricsError::validation(format!("reference dataset: {e}")))
}

fn location(
    id: &str,
    name: &str,
    category: Category,
    (latitude, longitude): (f64, f64),
    distance_from_site_a: f64,
    distance_from_site_b: f64,
    notes: &str,
) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        category,
        position: GeoPoint::new(latitude, longitude),
        distance_from_site_a,
        distance_from_site_b,
        notes: notes.to_string(),
    }
}

fn reference_locations() -> Vec<Location> {
    use Category::{PaperFactory, PlasticFactory, RecyclingShop};

    vec![
        location(
            "1",
            "บริษัท ช. ทิพย์เกื้อกูล สตีล จำกัด",
            RecyclingShop,
            (13.584_350, 100.307_817),
            7.5,
            4.1,
            "Mostly scrap metal, with high-power baling and cutting",
        ),
        location(
            "2",
            "บริษัท ชวนไท่ เทรดดิ้ง จำกัด",
            RecyclingShop,
            (13.623_127, 100.253_019),
            3.8,
            4.0,
            "Buys and sorts mixed recyclables (plastic, metal, paper) and makes recycled pellets",
        ),
        location(
            "3",
            "เอส.เค.พลาสติก",
            RecyclingShop,
            (13.679_583, 100.287_733),
            3.8,
            7.0,
            "Sorts recyclables and melts plastic into recycled pellets",
        ),
        location(
            "4",
            "บริษัท ไทยเม็ททอลพลาสติกส์ จำกัด",
            RecyclingShop,
            (13.607_870, 100.281_864),
            4.3,
            1.3,
            "Buys scrap metal and plastic from factories and households for sorting",
        ),
        location(
            "5",
            "บริษัท พี.เอ็น.ที.สยาม พลาสติก จำกัด",
            RecyclingShop,
            (13.634_933, 100.284_467),
            1.4,
            2.1,
            "Sorts waste and melts grade B pellets, also makes recycled plastic goods",
        ),
        location(
            "6",
            "บริษัท สยามรุ่งเรืองพลาสเทค จำกัด",
            RecyclingShop,
            (13.633_801, 100.355_720),
            8.4,
            7.4,
            "Sorts plastic and metal, turns plastic into baskets and crates",
        ),
        location(
            "7",
            "บริษัท ที.โอ.พี. (กระดาษหมุนเวียน) จำกัด",
            RecyclingShop,
            (13.621_333, 100.338_233),
            6.9,
            5.3,
            "Mainly used paper, also plastic and metal",
        ),
        location(
            "8",
            "บริษัท ปัญจพลไฟเบอร์คอนเทนเนอร์ จำกัด",
            PaperFactory,
            (13.586_267, 100.241_950),
            7.8,
            6.2,
            "Large kraft and board mill for corrugated boxes, about 15,000 t/month from waste paper",
        ),
        location(
            "9",
            "บริษัท อุตสาหกรรมกระดาษซินกวงฮั้ว (ประเทศไทย) จำกัด",
            PaperFactory,
            (13.540_917, 100.201_900),
            14.4,
            12.7,
            "Small mulberry paper workshop, about 15 t/month",
        ),
        location(
            "10",
            "บริษัท ลี เปเปอร์ อินดัสเตรียล จำกัด",
            PaperFactory,
            (13.523_333, 100.186_783),
            16.9,
            15.2,
            "Corrugated paper and packaging boxes",
        ),
        location(
            "11",
            "บริษัท ลี้ไฟเบอร์บอร์ด จำกัด",
            PaperFactory,
            (13.577_217, 100.284_900),
            7.7,
            4.4,
            "Corrugated board and boxes from recycled paper",
        ),
        location(
            "12",
            "บริษัท รอยัล เปเปอร์ อินดัสตรีย์ จำกัด",
            PaperFactory,
            (13.632_790, 100.345_870),
            7.3,
            6.3,
            "Corrugated sheets from recycled pulp",
        ),
        location(
            "13",
            "บริษัท เซิ้นฟา จำกัด",
            PlasticFactory,
            (13.536_524, 100.163_292),
            17.5,
            16.3,
            "Grade B pellets from used plastic, with on-site sorting",
        ),
        location(
            "14",
            "บริษัท เอ็น.บี.เจ.โพลิเมอร์ (ประเทศไทย) จำกัด",
            PlasticFactory,
            (13.573_341, 100.225_501),
            10.0,
            8.4,
            "Grade B recycled pellets for general use",
        ),
        location(
            "15",
            "บริษัท มิราเคิล เคมีภัณฑ์ จำกัด",
            PlasticFactory,
            (13.520_940, 100.190_500),
            16.9,
            15.1,
            "Grade B pellets from old plastic",
        ),
        location(
            "16",
            "บริษัท บางกอก โตโย อินดัสเตรียล จำกัด",
            PlasticFactory,
            (13.612_052, 100.303_332),
            4.6,
            1.6,
            "Grade B pellets and moulded products from used plastic",
        ),
        location(
            "17",
            "บริษัท สยามพลาสติก อินดัสตรี จำกัด",
            PlasticFactory,
            (13.600_210, 100.227_680),
            7.6,
            6.9,
            "Recycled pellets and products from mixed scrap (PP, HDPE)",
        ),
    ]
}

fn reference_routes(site_a: &ReferencePoint, site_b: &ReferencePoint, site_distance_km: f64) -> Result<Vec<RouteSegment>> {
    Ok(vec![
        RouteSegment::derived(
            &site_a.name,
            &site_b.name,
            site_distance_km,
            DEFAULT_MINUTES_PER_KM,
            RouteCategory::BottleDelivery,
            Difficulty::Easy,
        )?,
        // literal rows from the route table; their minutes do not follow the 3 min/km rule
        RouteSegment::with_fixture_minutes(
            &site_a.name,
            "บริษัท พี.เอ็น.ที.สยาม พลาสติก",
            1.4,
            5.0,
            RouteCategory::MaterialCollection,
            Difficulty::Easy,
        ),
        RouteSegment::with_fixture_minutes(
            &site_a.name,
            "บริษัท ปัญจพลไฟเบอร์คอนเทนเนอร์",
            7.8,
            20.0,
            RouteCategory::MaterialCollection,
            Difficulty::Medium,
        ),
    ])
}

fn reference_analysis(site_distance_km: f64) -> Vec<StrategicAdvantage> {
    vec![
        StrategicAdvantage::new(
            "Central commercial position",
            "On Yorak Road, the main link between Samut Sakhon town and the surrounding industrial areas",
            Impact::High,
            AdvantageCategory::Location,
        ),
        StrategicAdvantage::new(
            "Short bottle haul",
            format!(
                "Only {site_distance_km:.2} km from the distillery, suited to returning empty bottles for recycling"
            ),
            Impact::High,
            AdvantageCategory::Logistics,
        ),
        StrategicAdvantage::new(
            "Reach to large factories",
            "Within a workable radius of large paper and plastic mills that can become major buyers",
            Impact::High,
            AdvantageCategory::Market,
        ),
        StrategicAdvantage::new(
            "Convenient logistics",
            "Reachable from both Setthakit Road and Yorak Road, suitable for large trucks",
            Impact::High,
            AdvantageCategory::Logistics,
        ),
        StrategicAdvantage::new(
            "Room to grow",
            "Surrounded by both communities and industry, giving varied sources of material and customers",
            Impact::Medium,
            AdvantageCategory::Market,
        ),
        StrategicAdvantage::new(
            "Lower bottle transport cost",
            format!(
                "A {site_distance_km:.2} km haul cuts fuel and time for moving empty bottles from the distillery"
            ),
            Impact::Medium,
            AdvantageCategory::Logistics,
        ),
    ]
}

fn build_reference_dataset() -> Result<Dataset> {
    let site_a = ReferencePoint::new("ลานกระทิงแดงใหม่", GeoPoint::new(13.6463, 100.2794));
    let site_b = ReferencePoint::new(
        "โรงงานสุรากระทิงแดง (1988) จำกัด",
        GeoPoint::new(13.617_180_906_024_69, 100.289_584_616_788_94),
    );

    let site_distance_km = distance_between(&site_a, &site_b)?;
    let routes = reference_routes(&site_a, &site_b, site_distance_km)?;
    let strategic_analysis = reference_analysis(site_distance_km);

    let dataset = Dataset::new(
        site_a,
        site_b,
        reference_locations(),
        routes,
        strategic_analysis,
    )?;
    info!(
        "Loaded reference dataset with {} locations",
        dataset.locations.len()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregate::count_by_category;

    #[test]
    fn test_reference_dataset_loads() {
        let dataset = reference_dataset().unwrap();
        assert_eq!(dataset.locations.len(), 17);
        assert_eq!(dataset.routes.len(), 3);
        assert_eq!(dataset.strategic_analysis.len(), 6);
    }

    #[test]
    fn test_reference_category_counts() {
        let dataset = reference_dataset().unwrap();
        assert_eq!(count_by_category(&dataset.locations, Category::RecyclingShop), 7);
        assert_eq!(count_by_category(&dataset.locations, Category::PaperFactory), 5);
        assert_eq!(count_by_category(&dataset.locations, Category::PlasticFactory), 5);
    }

    #[test]
    fn test_bottle_route_uses_live_distance() {
        let dataset = reference_dataset().unwrap();
        let route = &dataset.routes[0];
        assert_eq!(route.distance_km, dataset.site_distance_km().unwrap());
        assert_eq!(route.estimated_minutes, 10.0);
    }

    #[test]
    fn test_narrative_quotes_site_distance() {
        let dataset = reference_dataset().unwrap();
        let quoted = format!("{:.2}", dataset.site_distance_km().unwrap());
        let mentions = dataset
            .strategic_analysis
            .iter()
            .filter(|a| a.description.contains(&quoted))
            .count();
        assert_eq!(mentions, 2);
    }

    #[test]
    fn test_lookup_by_id() {
        let dataset = reference_dataset().unwrap();
        assert_eq!(dataset.location("5").unwrap().distance_from_site_a, 1.4);
        assert!(dataset.location("99").is_none());
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let dataset = reference_dataset().unwrap();
        let mut locations = dataset.locations.clone();
        locations.push(dataset.locations[0].clone());
        let result = Dataset::new(
            dataset.site_a.clone(),
            dataset.site_b.clone(),
            locations,
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(result, Err(SiteMetricsError::Validation { .. })));
    }
}
