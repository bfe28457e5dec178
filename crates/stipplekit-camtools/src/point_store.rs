//! Point Store
//!
//! Sampled points grouped by brightness level. Each level keeps its points in
//! the order the sampler emitted them, which is the order the plotter visits
//! them.

use crate::classifier::classify_level;
use serde::Serialize;
use stipplekit_core::{SampledPoint, MAX_LAYERS};

/// Points bucketed into ordered brightness levels
///
/// Built fresh for every generation run; it is never merged with the result
/// of a previous run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointsByLevel {
    levels: Vec<Vec<SampledPoint>>,
}

impl PointsByLevel {
    /// Create `num_layers` empty levels
    ///
    /// The count is clamped into `1..=MAX_LAYERS`.
    pub fn new(num_layers: u32) -> Self {
        Self {
            levels: vec![Vec::new(); num_layers.clamp(1, MAX_LAYERS) as usize],
        }
    }

    /// Classify every sample, in order
    pub fn from_samples<I>(num_layers: u32, samples: I) -> Self
    where
        I: IntoIterator<Item = SampledPoint>,
    {
        let mut store = Self::new(num_layers);
        for point in samples {
            store.classify_and_insert(point);
        }
        store
    }

    /// Append a point to the level its brightness falls in
    ///
    /// Returns the level index.
    pub fn classify_and_insert(&mut self, point: SampledPoint) -> usize {
        let level = classify_level(point.brightness, self.levels.len() as u32);
        self.levels[level].push(point);
        level
    }

    /// Number of levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Points in one level
    pub fn level(&self, index: usize) -> Option<&[SampledPoint]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// Every level's points, indexed by level
    pub fn levels(&self) -> &[Vec<SampledPoint>] {
        &self.levels
    }

    /// Total number of points across all levels
    pub fn total_points(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Point count of every level, indexed by level
    pub fn counts(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    /// Iterate over `(level, points)` pairs from darkest to lightest
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[SampledPoint])> {
        self.levels
            .iter()
            .enumerate()
            .map(|(level, points)| (level, points.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, brightness: f64) -> SampledPoint {
        SampledPoint::new(x, 0.0, brightness)
    }

    #[test]
    fn test_insert_preserves_order_within_level() {
        let mut store = PointsByLevel::new(2);
        assert_eq!(store.classify_and_insert(point(1.0, 10.0)), 0);
        assert_eq!(store.classify_and_insert(point(2.0, 90.0)), 1);
        assert_eq!(store.classify_and_insert(point(3.0, 20.0)), 0);

        let dark: Vec<f64> = store.level(0).unwrap().iter().map(|p| p.x).collect();
        assert_eq!(dark, vec![1.0, 3.0]);
        assert_eq!(store.counts(), vec![2, 1]);
        assert_eq!(store.total_points(), 3);
    }

    #[test]
    fn test_no_deduplication() {
        let p = point(5.0, 50.0);
        let store = PointsByLevel::from_samples(1, [p, p, p]);
        assert_eq!(store.level(0).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_levels_exist() {
        let store = PointsByLevel::new(4);
        assert_eq!(store.level_count(), 4);
        assert!(store.iter().all(|(_, pts)| pts.is_empty()));
        assert!(store.level(4).is_none());
    }

    #[test]
    fn test_zero_layers_treated_as_one() {
        let mut store = PointsByLevel::new(0);
        assert_eq!(store.level_count(), 1);
        assert_eq!(store.classify_and_insert(point(0.0, 100.0)), 0);
    }

    #[test]
    fn test_layer_count_capped() {
        let store = PointsByLevel::new(u32::MAX);
        assert_eq!(store.level_count(), MAX_LAYERS as usize);
    }
}
