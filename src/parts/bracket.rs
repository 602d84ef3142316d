use crate::float_types::{PI, Real};
use crate::node::{Material, Node, Profile};
use crate::traits::CSG;

/// Half-annulus over the top of a float of `pontoon_diameter`, with a flat
/// tab running outward from each open end. Drawn in the XY plane, the float
/// axis at the origin and Y up.
pub fn c_bracket_profile(
    pontoon_diameter: Real,
    thickness: Real,
    tab_length: Real,
    segments: usize,
) -> Profile {
    let inner = pontoon_diameter / 2.0;
    let outer = inner + thickness;
    let tip = outer + tab_length;
    let steps = (segments / 2).max(2);
    let arc = |radius: Real, k: usize| {
        let theta = PI * k as Real / steps as Real;
        [radius * theta.cos(), radius * theta.sin()]
    };

    let mut points = vec![[tip, -thickness], [tip, 0.0]];
    points.extend((0..=steps).map(|k| arc(outer, k)));
    points.extend([[-tip, 0.0], [-tip, -thickness], [-inner, -thickness]]);
    points.extend((0..=steps).rev().map(|k| arc(inner, k)));
    points.push([inner, -thickness]);
    Profile::polygon(points)
}

/// C-bracket centred on the float axis, `width` along Y.
pub fn c_bracket(
    pontoon_diameter: Real,
    thickness: Real,
    width: Real,
    tab_length: Real,
    segments: usize,
) -> Node {
    let profile = c_bracket_profile(pontoon_diameter, thickness, tab_length, segments);
    // rotate 90 about X stands the profile up and runs the extrusion along -Y
    Node::extrude(profile, width)
        .rotate(90.0, 0.0, 0.0)
        .translate(0.0, width / 2.0, 0.0)
        .with_material(Material::Steel)
}

/// Disc closing the open stern of a float, from y=-`thickness` to y=0.
pub fn transom_cap(diameter: Real, thickness: Real, segments: usize) -> Node {
    Node::cylinder(diameter / 2.0, thickness, segments)
        .rotate(90.0, 0.0, 0.0)
        .with_material(Material::Polyethylene)
}

/// Upright plate centred on x=0, from y=0 to y=`thickness` and z=0 to z=`height`.
pub fn transom_bracket(width: Real, height: Real, thickness: Real) -> Node {
    Node::cuboid(width, thickness, height)
        .translate(-width / 2.0, 0.0, 0.0)
        .with_material(Material::Aluminum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_wraps_float() {
        let bracket = c_bracket(27.0, 0.25, 2.0, 2.0, 16);
        let bb = bracket.bounds();
        assert!((bb.maxs.x - (13.5 + 0.25 + 2.0)).abs() < 1e-9);
        assert!((bb.mins.y + 1.0).abs() < 1e-9);
        assert!((bb.maxs.y - 1.0).abs() < 1e-9);
        assert!((bb.mins.z + 0.25).abs() < 1e-9);
        assert!((bb.maxs.z - 13.75).abs() < 1e-9);
    }

    #[test]
    fn cap_sits_behind_stern() {
        let bb = transom_cap(27.0, 0.5, 16).bounds();
        assert!((bb.mins.y + 0.5).abs() < 1e-9);
        assert!(bb.maxs.y.abs() < 1e-9);
    }
}
