use crate::dimensions::{FloatDimensions, Resolution};
use crate::float_types::Real;
use crate::node::Node;
use crate::parts::{float_section, nose_cone};
use crate::traits::CSG;

/// Where each segment of a float starts along +Y, stern at y=0.
#[derive(Debug, Clone, PartialEq)]
pub struct PontoonLayout {
    /// The rear nose occupies `0..rear_nose`
    pub rear_nose: Option<Real>,
    pub section_offsets: Vec<Real>,
    pub front_nose: Option<Real>,
    pub total_length: Real,
}

impl PontoonLayout {
    /// Segments are laid end to end: each starts where the previous one ends.
    pub fn new(float: &FloatDimensions) -> Self {
        let base = if float.rear_nose { float.nose_length } else { 0.0 };
        let section_offsets = (0..float.straight_count)
            .map(|i| base + i as Real * float.straight_length)
            .collect();
        let straight_end = base + float.straight_total();
        PontoonLayout {
            rear_nose: float.rear_nose.then_some(float.nose_length),
            section_offsets,
            front_nose: float.front_nose.then_some(straight_end),
            total_length: float.total_length(),
        }
    }

    /// Offset of the first straight section
    pub fn straight_start(&self) -> Real {
        self.rear_nose.unwrap_or(0.0)
    }
}

/// A complete float along +Y from y=0, axis at x=z=0.
pub fn pontoon(float: &FloatDimensions, resolution: &Resolution) -> Node {
    let layout = PontoonLayout::new(float);
    let cone = nose_cone(float.diameter, float.nose_length, resolution);
    let section = float_section(
        float.diameter,
        float.straight_length,
        float.channels,
        &float.channel,
        &float.rib,
        resolution,
    );

    let mut pieces = Vec::with_capacity(float.straight_count + 2);
    if let Some(base) = layout.rear_nose {
        // nose pointing to -Y, its base where the first section starts
        pieces.push(cone.rotate(90.0, 0.0, 0.0).translate(0.0, base, 0.0));
    }
    pieces.extend(layout.section_offsets.iter().map(|&y| section.translate(0.0, y, 0.0)));
    if let Some(offset) = layout.front_nose {
        pieces.push(cone.rotate(-90.0, 0.0, 0.0).translate(0.0, offset, 0.0));
    }

    log::debug!(
        "pontoon: {} sections with {} channels, {} noses, {} long",
        float.straight_count,
        float.channels.count(),
        float.nose_count(),
        layout.total_length
    );
    Node::union_all(pieces)
}
