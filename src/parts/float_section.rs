use crate::dimensions::{ChannelDimensions, Channels, Resolution, RibDimensions};
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::node::{Material, Node};
use crate::traits::CSG;

/// How far a channel cut rises past the top of the ribs
const CUT_CLEARANCE: Real = 0.5;

/// Centres of the ribs along a section of `length`, `spacing` apart and
/// centred on the section. `floor(length / spacing)` ribs.
pub fn rib_positions(length: Real, spacing: Real) -> Vec<Real> {
    if !(length > 0.0 && spacing > 0.0) {
        return Vec::new();
    }
    let count = (length / spacing).floor() as usize;
    if count == 0 {
        return Vec::new();
    }
    let start = (length - (count - 1) as Real * spacing) / 2.0;
    (0..count).map(|i| start + i as Real * spacing).collect()
}

/// A box removed from the top of a float section, in section coordinates
/// (float axis on Y, section from y=0 to its length).
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCut {
    pub x_min: Real,
    pub width: Real,
    pub y_start: Real,
    pub length: Real,
    pub z_bottom: Real,
    pub height: Real,
}

impl ChannelCut {
    pub fn x_max(&self) -> Real {
        self.x_min + self.width
    }

    pub fn node(&self) -> Node {
        Node::cuboid(self.width, self.length, self.height).translate(
            self.x_min,
            self.y_start,
            self.z_bottom,
        )
    }

    /// Depth below the top of the float
    pub fn depth(&self, radius: Real) -> Real {
        radius - self.z_bottom
    }

    /// The cut stays within the section and bites into its surface without
    /// reaching the axis.
    pub fn check(&self, radius: Real, length: Real) -> Result<(), ValidationError> {
        let depth = self.depth(radius);
        if depth >= radius {
            return Err(ValidationError::ChannelTooDeep { depth, radius });
        }
        let edge = self.x_min.abs().max(self.x_max().abs());
        let inside_laterally = edge < radius && (radius * radius - edge * edge).sqrt() > self.z_bottom;
        let inside_longitudinally =
            self.y_start >= 0.0 && self.y_start + self.length <= length + Real::EPSILON;
        if !(inside_laterally && inside_longitudinally) {
            return Err(ValidationError::ChannelOutsideSection {
                x_min: self.x_min,
                x_max: self.x_max(),
                y_min: self.y_start,
                y_max: self.y_start + self.length,
                radius,
                length,
            });
        }
        Ok(())
    }
}

/// Channel boxes for a section of `radius` and `length`, full length, their
/// floor `channel.depth` below the top of the float.
pub fn channel_cuts(
    radius: Real,
    length: Real,
    channels: Channels,
    channel: &ChannelDimensions,
    rib_height: Real,
) -> Vec<ChannelCut> {
    channels
        .offsets(channel.spacing)
        .into_iter()
        .map(|x| ChannelCut {
            x_min: x - channel.width / 2.0,
            width: channel.width,
            y_start: 0.0,
            length,
            z_bottom: radius - channel.depth,
            height: channel.depth + rib_height + CUT_CLEARANCE,
        })
        .collect()
}

pub fn validate_channels(
    radius: Real,
    length: Real,
    channels: Channels,
    channel: &ChannelDimensions,
) -> Result<(), ValidationError> {
    ValidationError::check_positive("channel width", channel.width)?;
    ValidationError::check_positive("channel depth", channel.depth)?;
    if channels == Channels::Double && channel.spacing <= channel.width {
        return Err(ValidationError::Other(
            format!(
                "channels {} apart merge at width {}",
                channel.spacing, channel.width
            ),
            None,
        ));
    }
    channel_cuts(radius, length, channels, channel, 0.0)
        .iter()
        .try_for_each(|cut| cut.check(radius, length))
}

/// Straight float section along +Y from y=0 to y=`length`, axis at x=z=0.
///
/// Ribs are unioned on before the channels are cut, so the channels run
/// through them.
pub fn float_section(
    diameter: Real,
    length: Real,
    channels: Channels,
    channel: &ChannelDimensions,
    rib: &RibDimensions,
    resolution: &Resolution,
) -> Node {
    let radius = diameter / 2.0;
    let segments = resolution.segments;

    // rotate -90 about X turns the +Z cylinder onto +Y
    let body = Node::cylinder(radius, length, segments).rotate(-90.0, 0.0, 0.0);
    let ribs = rib_positions(length, rib.spacing).into_iter().map(|y| {
        Node::cylinder(radius + rib.height, rib.width, segments)
            .rotate(-90.0, 0.0, 0.0)
            .translate(0.0, y - rib.width / 2.0, 0.0)
    });
    let solid = Node::union_all(std::iter::once(body).chain(ribs));

    channel_cuts(radius, length, channels, channel, rib.height)
        .iter()
        .fold(solid, |acc, cut| acc.difference(&cut.node()))
        .with_material(Material::Polyethylene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ribs_are_centred() {
        assert_eq!(rib_positions(36.0, 12.0), vec![6.0, 18.0, 30.0]);
        assert_eq!(rib_positions(30.0, 12.0), vec![9.0, 21.0]);
        assert!(rib_positions(10.0, 12.0).is_empty());
    }

    #[test]
    fn double_channels_are_symmetric() {
        let channel = ChannelDimensions::default();
        let cuts = channel_cuts(13.5, 36.0, Channels::Double, &channel, 0.25);
        assert_eq!(cuts.len(), 2);
        assert_eq!(cuts[0].x_min, -cuts[1].x_max());
        assert_eq!(cuts[0].depth(13.5), channel.depth);
        assert!(cuts.iter().all(|c| c.check(13.5, 36.0).is_ok()));
    }

    #[test]
    fn cut_past_section_end_is_flagged() {
        let mut cut = channel_cuts(13.5, 36.0, Channels::Single, &ChannelDimensions::default(), 0.0)
            .remove(0);
        cut.length = 40.0;
        assert!(matches!(
            cut.check(13.5, 36.0),
            Err(ValidationError::ChannelOutsideSection { .. })
        ));
    }
}
