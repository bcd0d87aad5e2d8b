use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::settings::SizeCategory;

/// A target ilot area drawn from one size category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IlotRequest {
    /// Position in generation order, used as the stable tie-break.
    pub sequence: usize,
    /// Index of the originating size category.
    pub category: usize,
    /// Target area in m².
    pub area: f64,
}

/// Expands a size distribution into concrete ilot requests.
///
/// Each category covers `percentage` of the walkable area with ilots whose
/// area is drawn uniformly from `[min_area, max_area]`. Sampling uses a
/// seeded ChaCha stream, so a fixed seed reproduces the same requests.
#[derive(Debug)]
pub struct GenerateIlots<'a> {
    categories: &'a [SizeCategory],
    walkable_area: f64,
    seed: u64,
}

impl<'a> GenerateIlots<'a> {
    /// Creates a generator over `walkable_area` (m²).
    #[must_use]
    pub fn new(categories: &'a [SizeCategory], walkable_area: f64, seed: u64) -> Self {
        Self {
            categories,
            walkable_area,
            seed,
        }
    }

    /// Number of requests a category yields:
    /// `floor(walkable_area * percentage / 100 / average_area)`.
    ///
    /// Zero for a category whose average area is zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count_for(&self, category: &SizeCategory) -> usize {
        let average = category.average_area();
        if average <= 0.0 {
            return 0;
        }
        let count = (self.walkable_area * category.percentage_of_area / 100.0 / average).floor();
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }

    /// Executes the generation, returning requests in generation order.
    #[must_use]
    pub fn execute(&self) -> Vec<IlotRequest> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut requests = Vec::new();

        for (index, category) in self.categories.iter().enumerate() {
            let count = self.count_for(category);
            if count == 0 {
                debug!(category = index, "size category yields no ilots");
                continue;
            }
            let span = category.max_area - category.min_area;
            requests.reserve(count);
            for _ in 0..count {
                let area = category.min_area + rng.gen::<f64>() * span;
                requests.push(IlotRequest {
                    sequence: requests.len(),
                    category: index,
                    area,
                });
            }
            debug!(category = index, count, "generated ilot requests");
        }

        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_exact_floor() {
        let categories = [SizeCategory::new(100.0, 10.0, 10.0)];
        let requests = GenerateIlots::new(&categories, 10_000.0, 7).execute();
        assert_eq!(requests.len(), 1_000);
        assert!(requests.iter().all(|r| (r.area - 10.0).abs() < f64::EPSILON));
    }

    #[test]
    fn categories_are_additive_in_order() {
        // 1000 m²: 30 % of 20 m² avg -> 15, 50 % of 7 m² avg -> floor(71.43) = 71
        let categories = [
            SizeCategory::new(30.0, 10.0, 30.0),
            SizeCategory::new(50.0, 4.0, 10.0),
        ];
        let requests = GenerateIlots::new(&categories, 1_000.0, 1).execute();
        assert_eq!(requests.len(), 15 + 71);
        assert!(requests[..15].iter().all(|r| r.category == 0));
        assert!(requests[15..].iter().all(|r| r.category == 1));
        assert!(requests
            .iter()
            .enumerate()
            .all(|(i, r)| r.sequence == i));
    }

    #[test]
    fn areas_stay_in_range() {
        let categories = [SizeCategory::new(100.0, 5.0, 25.0)];
        let requests = GenerateIlots::new(&categories, 2_000.0, 99).execute();
        assert!(!requests.is_empty());
        assert!(requests.iter().all(|r| (5.0..=25.0).contains(&r.area)));
    }

    #[test]
    fn zero_average_is_skipped() {
        let categories = [
            SizeCategory::new(50.0, 0.0, 0.0),
            SizeCategory::new(50.0, 10.0, 10.0),
        ];
        let requests = GenerateIlots::new(&categories, 100.0, 0).execute();
        assert_eq!(requests.len(), 5);
        assert!(requests.iter().all(|r| r.category == 1));
    }

    #[test]
    fn same_seed_same_requests() {
        let categories = [SizeCategory::new(80.0, 8.0, 40.0)];
        let a = GenerateIlots::new(&categories, 5_000.0, 42).execute();
        let b = GenerateIlots::new(&categories, 5_000.0, 42).execute();
        let c = GenerateIlots::new(&categories, 5_000.0, 43).execute();
        assert_eq!(a, b);
        assert_eq!(a.len(), c.len());
        assert_ne!(a, c);
    }

    #[test]
    fn empty_floor_yields_nothing() {
        let categories = [SizeCategory::new(100.0, 10.0, 20.0)];
        assert!(GenerateIlots::new(&categories, 0.0, 0).execute().is_empty());
    }
}
