use nalgebra as na;

use crate::source::WindSource;

/// Total wind at `position` and simulation time `time` from a snapshot of sources.
///
/// Contributions are summed without clamping, so overlapping sources can exceed any
/// single source's strength. Non-finite inputs give the zero vector.
pub fn wind_at(sources: &[WindSource], position: &na::Vector3<f32>, time: f32) -> na::Vector3<f32> {
    if !time.is_finite() || position.iter().any(|v| !v.is_finite()) {
        return na::Vector3::zeros();
    }

    sources
        .iter()
        .map(|source| source.contribution(position, time))
        .fold(na::Vector3::zeros(), |total, wind| total + wind)
}

/// Borrowed, read-only view over a snapshot of wind sources
#[derive(Debug, Clone, Copy)]
pub struct WindField<'a> {
    sources: &'a [WindSource],
}

impl<'a> WindField<'a> {
    pub fn new(sources: &'a [WindSource]) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &'a [WindSource] {
        self.sources
    }

    pub fn wind_at(&self, position: &na::Vector3<f32>, time: f32) -> na::Vector3<f32> {
        wind_at(self.sources, position, time)
    }

    /// Number of enabled sources whose radius covers `position`
    pub fn active_count(&self, position: &na::Vector3<f32>) -> usize {
        self.sources
            .iter()
            .filter(|source| source.enabled && (position - source.position).norm() <= source.radius)
            .count()
    }
}
