use crate::dimensions::{BeamDimensions, Dimensions, HatChannelDimensions, SquareTubeDimensions};
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::node::{Material, Node};
use crate::parts::{c_bracket, hat_channel_profile, square_tube_profile, t_beam_profile};
use crate::traits::CSG;

/// Centres of `count` crossmembers spread evenly over `length`: `length / count`
/// apart, the first half a spacing in.
pub fn crossmember_positions(length: Real, count: usize) -> Vec<Real> {
    if count == 0 {
        return Vec::new();
    }
    let spacing = length / count as Real;
    (0..count).map(|i| (i as Real + 0.5) * spacing).collect()
}

/// Checked crossmember layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub spacing: Real,
    pub positions: Vec<Real>,
}

impl FrameLayout {
    /// Fails when crossmembers `footprint` wide would touch their neighbours
    /// or stick out of the frame.
    pub fn new(length: Real, count: usize, footprint: Real) -> Result<Self, ValidationError> {
        ValidationError::check_positive("frame length", length)?;
        if count == 0 {
            return Err(ValidationError::NonPositive { what: "crossmember count", value: 0.0 });
        }
        let spacing = length / count as Real;
        if spacing <= footprint {
            return Err(ValidationError::CrossmemberOverlap { spacing, footprint });
        }
        Ok(FrameLayout { spacing, positions: crossmember_positions(length, count) })
    }

    /// Centre of the bow square tube, `bow_offset` back from the end of the
    /// frame. Fails when the tube would reach past the bow or into the last
    /// hat crossmember, whose footprint is `hat_footprint`.
    pub fn bow_tube(
        &self,
        length: Real,
        tube: &SquareTubeDimensions,
        hat_footprint: Real,
    ) -> Result<Real, ValidationError> {
        let y = length - tube.bow_offset;
        if y + tube.outer / 2.0 > length {
            return Err(ValidationError::Other(
                format!(
                    "square tube {} wide at {} back from the bow sticks out of the frame",
                    tube.outer, tube.bow_offset
                ),
                None,
            ));
        }
        if let Some(&last) = self.positions.last() {
            let clearance = (hat_footprint + tube.outer) / 2.0;
            if y - last <= clearance {
                return Err(ValidationError::CrossmemberOverlap {
                    spacing: y - last,
                    footprint: clearance,
                });
            }
        }
        Ok(y)
    }
}

/// T-beam of `length` along +Y from y=0, stem bottom at z=0.
pub fn main_beam(beam: &BeamDimensions, length: Real) -> Node {
    let profile = t_beam_profile(
        beam.flange_width,
        beam.flange_thickness,
        beam.stem_height,
        beam.stem_thickness,
    );
    // rotate 90 about X: profile up along Z, extrusion along -Y
    Node::extrude(profile, length)
        .rotate(90.0, 0.0, 0.0)
        .translate(0.0, length, 0.0)
        .with_material(Material::Aluminum)
}

/// Hat crossmember `span` long across X centred on x=0, flanges at z=0,
/// centred on y=0.
pub fn hat_crossmember(hat: &HatChannelDimensions, span: Real) -> Node {
    let profile = hat_channel_profile(
        hat.top_width,
        hat.base_width,
        hat.height,
        hat.flange_width,
        hat.thickness,
    );
    // profile x -> Y, profile y -> Z, extrusion -> X
    Node::extrude(profile, span)
        .rotate(90.0, 0.0, 90.0)
        .translate(-span / 2.0, 0.0, 0.0)
        .with_material(Material::Aluminum)
}

/// Square tube `span` long across X, centred on x=0 and y=0, bottom at z=0.
pub fn square_tube_crossmember(tube: &SquareTubeDimensions, span: Real) -> Node {
    Node::extrude(square_tube_profile(tube.outer, tube.wall), span)
        .rotate(90.0, 0.0, 90.0)
        .translate(-span / 2.0, 0.0, tube.outer / 2.0)
        .with_material(Material::Aluminum)
}

/// Beams seated in the channels of both main floats, crossmembers resting on
/// the beams and a C-bracket on each float at every crossmember.
pub fn frame(dims: &Dimensions, boat_length: Real, spacing: Real, count: usize) -> Node {
    let main = &dims.main_float;
    let radius = main.radius();
    let beam_z = radius - main.channel.depth;
    let deck_z = radius + dims.beam_stack();
    let span = spacing + main.diameter;
    let float_xs = [-spacing / 2.0, spacing / 2.0];
    let positions = crossmember_positions(boat_length, count);

    let beam = &main_beam(&dims.main_beam, boat_length);
    let beams = float_xs.iter().flat_map(|&float_x| {
        main.channels
            .offsets(main.channel.spacing)
            .into_iter()
            .map(move |offset| beam.translate(float_x + offset, 0.0, beam_z))
    });

    let hat = hat_crossmember(&dims.hat_channel, span);
    let hats = positions.iter().map(|&y| hat.translate(0.0, y, deck_z));

    let tube_y = boat_length - dims.square_tube.bow_offset;
    let tube = square_tube_crossmember(&dims.square_tube, span).translate(0.0, tube_y, deck_z);

    let bracket = c_bracket(
        main.diameter,
        dims.bracket.thickness,
        dims.bracket.width,
        dims.bracket.tab_length,
        dims.resolution.segments,
    );
    let brackets = positions
        .iter()
        .copied()
        .chain(std::iter::once(tube_y))
        .flat_map(|y| float_xs.map(|x| bracket.translate(x, y, 0.0)));

    let pieces: Vec<Node> = beams
        .chain(hats)
        .chain(std::iter::once(tube))
        .chain(brackets)
        .collect();
    log::debug!("frame: {} crossmembers over {boat_length}, {} pieces", count + 1, pieces.len());
    Node::union_all(pieces)
}
