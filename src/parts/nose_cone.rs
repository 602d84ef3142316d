use crate::dimensions::Resolution;
use crate::float_types::Real;
use crate::mesh::loft::{Easing, LoftStation};
use crate::node::{Material, Node};

/// Stations along the cone, as fractions of its length from the base.
pub const NOSE_STATION_FRACTIONS: [Real; 7] = [0.0, 0.15, 0.40, 0.65, 0.85, 0.95, 1.0];

/// Cone diameter at each station, as fractions of the float diameter.
/// The last one stays above zero so the tip is rounded off rather than sharp.
pub const NOSE_DIAMETER_FRACTIONS: [Real; 7] = [1.0, 0.97, 0.86, 0.68, 0.45, 0.26, 0.12];

pub fn nose_stations(diameter: Real, length: Real) -> Vec<LoftStation> {
    NOSE_STATION_FRACTIONS
        .iter()
        .zip(NOSE_DIAMETER_FRACTIONS)
        .map(|(z, d)| LoftStation::new(z * length, d * diameter / 2.0))
        .collect()
}

/// Smoothly tapered nose along +Z, full `diameter` at z=0 and tip at z=`length`.
pub fn nose_cone(diameter: Real, length: Real, resolution: &Resolution) -> Node {
    Node::loft(
        nose_stations(diameter, length),
        Easing::SmootherStep,
        resolution.loft_steps,
        resolution.segments,
    )
    .with_material(Material::Polyethylene)
}
