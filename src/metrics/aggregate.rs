//! Summary statistics over a location collection.
//!
//! Every function reads its input slice only. Filters keep input order and
//! rankings sort a vector of references, so the caller's data is never
//! reordered.

use crate::error::{Result, SiteMetricsError};
use crate::models::{Category, DistanceField, Location};

/// Number of locations in `category`
#[must_use]
pub fn count_by_category(locations: &[Location], category: Category) -> usize {
    locations
        .iter()
        .filter(|location| location.category == category)
        .count()
}

/// Locations in `category`, in input order
#[must_use]
pub fn of_category(locations: &[Location], category: Category) -> Vec<&Location> {
    locations
        .iter()
        .filter(|location| location.category == category)
        .collect()
}

/// Locations whose selected distance is `<= radius_km`, in input order
pub fn within_radius<'a, I>(locations: I, field: DistanceField, radius_km: f64) -> Result<Vec<&'a Location>>
where
    I: IntoIterator<Item = &'a Location>,
{
    check_radius(radius_km)?;
    Ok(locations
        .into_iter()
        .filter(|location| location.distance(field) <= radius_km)
        .collect())
}

/// Count of locations matching `predicate` within `radius_km`
pub fn count_within_radius<P>(
    locations: &[Location],
    field: DistanceField,
    radius_km: f64,
    predicate: P,
) -> Result<usize>
where
    P: Fn(&Location) -> bool,
{
    check_radius(radius_km)?;
    Ok(locations
        .iter()
        .filter(|location| predicate(*location) && location.distance(field) <= radius_km)
        .count())
}

/// Arithmetic mean of the selected distance
pub fn average_distance<'a, I>(locations: I, field: DistanceField) -> Result<f64>
where
    I: IntoIterator<Item = &'a Location>,
{
    let (sum, count) = locations
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), location| {
            (sum + location.distance(field), count + 1)
        });

    if count == 0 {
        return Err(SiteMetricsError::empty_collection(
            "average distance needs at least one location",
        ));
    }
    Ok(sum / count as f64)
}

/// The `n` locations with the smallest selected distance, ascending.
///
/// Ties keep input order. Returns every location when there are fewer than
/// `n`.
pub fn nearest_n<'a, I>(locations: I, field: DistanceField, n: i64) -> Result<Vec<&'a Location>>
where
    I: IntoIterator<Item = &'a Location>,
{
    let n = usize::try_from(n)
        .map_err(|_| SiteMetricsError::invalid_argument(format!("n must not be negative, got {n}")))?;

    let mut ranked: Vec<&Location> = locations.into_iter().collect();
    // sort_by is stable, total_cmp orders NaN last
    ranked.sort_by(|a, b| a.distance(field).total_cmp(&b.distance(field)));
    ranked.truncate(n);
    Ok(ranked)
}

fn check_radius(radius_km: f64) -> Result<()> {
    // NaN fails the comparison
    if radius_km >= 0.0 {
        Ok(())
    } else {
        Err(SiteMetricsError::invalid_argument(format!(
            "radius must not be negative, got {radius_km}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use rstest::{fixture, rstest};

    fn site(id: &str, category: Category, a: f64, b: f64) -> Location {
        Location {
            id: id.to_string(),
            name: format!("Site {id}"),
            category,
            position: GeoPoint::new(13.6, 100.3),
            distance_from_site_a: a,
            distance_from_site_b: b,
            notes: String::new(),
        }
    }

    #[fixture]
    fn sites() -> Vec<Location> {
        vec![
            site("1", Category::RecyclingShop, 7.5, 4.1),
            site("2", Category::RecyclingShop, 3.8, 4.0),
            site("3", Category::PaperFactory, 5.0, 6.2),
            site("4", Category::RecyclingShop, 5.0, 1.3),
            site("5", Category::PlasticFactory, 1.4, 2.1),
            site("6", Category::RecyclingShop, 3.8, 7.0),
        ]
    }

    fn ids(locations: &[&Location]) -> Vec<String> {
        locations.iter().map(|l| l.id.clone()).collect()
    }

    #[rstest]
    fn test_count_by_category(sites: Vec<Location>) {
        assert_eq!(count_by_category(&sites, Category::RecyclingShop), 4);
        assert_eq!(count_by_category(&sites, Category::PaperFactory), 1);
        assert_eq!(count_by_category(&sites, Category::PlasticFactory), 1);
        assert_eq!(count_by_category(&[], Category::PlasticFactory), 0);
    }

    #[rstest]
    fn test_within_radius_is_inclusive_and_stable(sites: Vec<Location>) {
        let shops = of_category(&sites, Category::RecyclingShop);
        let near = within_radius(shops, DistanceField::SiteA, 5.0).unwrap();
        assert_eq!(ids(&near), vec!["2", "4", "6"]);
    }

    #[rstest]
    fn test_within_radius_other_field(sites: Vec<Location>) {
        let near = within_radius(&sites, DistanceField::SiteB, 2.1).unwrap();
        assert_eq!(ids(&near), vec!["4", "5"]);
    }

    #[rstest]
    fn test_within_zero_radius(sites: Vec<Location>) {
        assert!(within_radius(&sites, DistanceField::SiteA, 0.0).unwrap().is_empty());
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f64::NAN)]
    fn test_within_radius_rejects(sites: Vec<Location>, #[case] radius: f64) {
        assert!(matches!(
            within_radius(&sites, DistanceField::SiteA, radius),
            Err(SiteMetricsError::InvalidArgument { .. })
        ));
    }

    #[rstest]
    fn test_count_within_radius(sites: Vec<Location>) {
        let factories = count_within_radius(&sites, DistanceField::SiteA, 5.0, |l| {
            l.category != Category::RecyclingShop
        })
        .unwrap();
        assert_eq!(factories, 2);
        assert!(count_within_radius(&sites, DistanceField::SiteA, -1.0, |_| true).is_err());
    }

    #[rstest]
    fn test_average_distance(sites: Vec<Location>) {
        let avg = average_distance(&sites, DistanceField::SiteA).unwrap();
        assert!((avg - 26.5 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_distance_single() {
        let one = vec![site("1", Category::PaperFactory, 7.3, 6.3)];
        assert_eq!(average_distance(&one, DistanceField::SiteA).unwrap(), 7.3);
        assert_eq!(average_distance(&one, DistanceField::SiteB).unwrap(), 6.3);
    }

    #[test]
    fn test_average_distance_empty() {
        let none: Vec<Location> = Vec::new();
        assert!(matches!(
            average_distance(&none, DistanceField::SiteA),
            Err(SiteMetricsError::EmptyCollection { .. })
        ));
    }

    #[rstest]
    fn test_nearest_n_orders_and_breaks_ties_by_input(sites: Vec<Location>) {
        let nearest = nearest_n(&sites, DistanceField::SiteA, 3).unwrap();
        assert_eq!(ids(&nearest), vec!["5", "2", "6"]);

        let distances: Vec<f64> = nearest.iter().map(|l| l.distance_from_site_a).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[rstest]
    fn test_nearest_n_tie_at_cutoff(sites: Vec<Location>) {
        let nearest = nearest_n(&sites, DistanceField::SiteA, 4).unwrap();
        assert_eq!(ids(&nearest), vec!["5", "2", "6", "3"]);
    }

    #[rstest]
    fn test_nearest_n_short_input(sites: Vec<Location>) {
        let nearest = nearest_n(&sites, DistanceField::SiteB, 100).unwrap();
        assert_eq!(nearest.len(), sites.len());
        assert!(nearest_n(&sites, DistanceField::SiteB, 0).unwrap().is_empty());
    }

    #[rstest]
    fn test_nearest_n_does_not_reorder_input(sites: Vec<Location>) {
        let before = sites.clone();
        let _ = nearest_n(&sites, DistanceField::SiteA, 3).unwrap();
        assert_eq!(sites, before);
    }

    #[rstest]
    fn test_nearest_n_negative(sites: Vec<Location>) {
        assert!(matches!(
            nearest_n(&sites, DistanceField::SiteA, -1),
            Err(SiteMetricsError::InvalidArgument { .. })
        ));
    }
}
