//! Lofting between circular cross-sections stacked along +Z.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Interpolation curve used between two loft stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// `3t² - 2t³`
    SmoothStep,
    /// `6t⁵ - 15t⁴ + 10t³`, flat first and second derivative at both ends
    SmootherStep,
}

impl Easing {
    /// Map `t` in `[0, 1]` onto the curve. Values outside the range are clamped.
    pub fn apply(self, t: Real) -> Real {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::SmootherStep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
        }
    }
}

/// A circular cross-section of `radius` at height `z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoftStation {
    pub z: Real,
    pub radius: Real,
}

impl LoftStation {
    pub const fn new(z: Real, radius: Real) -> Self {
        Self { z, radius }
    }
}

/// Expand `stations` into rings, inserting `steps - 1` eased rings between
/// each consecutive pair. Heights are spaced evenly, radii follow `easing`.
pub fn interpolate_stations(stations: &[LoftStation], easing: Easing, steps: usize) -> Vec<(Real, Real)> {
    let steps = steps.max(1);
    let mut rings = Vec::with_capacity(stations.len().saturating_sub(1) * steps + 1);

    for pair in stations.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        for k in 0..steps {
            let t = k as Real / steps as Real;
            let z = from.z + (to.z - from.z) * t;
            let radius = from.radius + (to.radius - from.radius) * easing.apply(t);
            rings.push((z, radius));
        }
    }
    if let Some(last) = stations.last() {
        rings.push((last.z, last.radius));
    }
    rings
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Loft a closed solid through circular `stations` ordered by increasing `z`.
    ///
    /// Between each pair of stations `steps` bands are generated; the radius of
    /// the intermediate rings follows `easing`.
    pub fn loft(
        stations: &[LoftStation],
        easing: Easing,
        steps: usize,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        if let Some(station) = stations.iter().find(|s| !s.z.is_finite()) {
            return Err(ValidationError::LoftStations(format!(
                "station height {} is not finite",
                station.z
            )));
        }
        let rings = interpolate_stations(stations, easing, steps);
        Mesh::revolve_rings(&rings, segments, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CSG;

    #[test]
    fn easing_end_points() {
        for easing in [Easing::Linear, Easing::SmoothStep, Easing::SmootherStep] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-12);
        }
        assert!(Easing::SmootherStep.apply(0.1) < Easing::SmoothStep.apply(0.1));
        assert!(Easing::SmoothStep.apply(0.1) < Easing::Linear.apply(0.1));
    }

    #[test]
    fn interpolated_rings_keep_stations() {
        let stations = [LoftStation::new(0.0, 2.0), LoftStation::new(4.0, 1.0)];
        let rings = interpolate_stations(&stations, Easing::SmoothStep, 4);
        assert_eq!(rings.len(), 5);
        assert_eq!(rings[0], (0.0, 2.0));
        assert_eq!(rings[4], (4.0, 1.0));
        assert_eq!(rings[2], (2.0, 1.5));
        assert!(rings.windows(2).all(|w| w[1].0 > w[0].0));
    }

    #[test]
    fn loft_spans_station_heights() {
        let stations = [
            LoftStation::new(0.0, 3.0),
            LoftStation::new(2.0, 2.0),
            LoftStation::new(5.0, 0.5),
        ];
        let mesh: Mesh<()> = Mesh::loft(&stations, Easing::SmootherStep, 3, 16, None)
            .expect("valid stations");
        let bb = mesh.bounding_box();
        assert!((bb.mins.z - 0.0).abs() < 1e-12);
        assert!((bb.maxs.z - 5.0).abs() < 1e-12);
        assert!((bb.maxs.x - 3.0).abs() < 1e-12);
        assert!(mesh.volume() > 0.0);
    }
}
