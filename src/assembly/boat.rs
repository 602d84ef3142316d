use crate::assembly::frame::frame;
use crate::assembly::pontoon::{PontoonLayout, pontoon};
use crate::dimensions::Dimensions;
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::node::Node;
use crate::parts::{transom_bracket, transom_cap};
use crate::traits::CSG;

/// Placement of the four auxiliary floats: a stern pair and a bow pair, each
/// pair symmetric about x=0 and recessed below the main floats.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxLayout {
    pub x: Real,
    pub z: Real,
    pub stern_start: Real,
    pub bow_start: Real,
    pub length: Real,
}

impl AuxLayout {
    pub fn new(dims: &Dimensions) -> Self {
        let layout = &dims.layout;
        let length = dims.aux_float.total_length();
        AuxLayout {
            x: layout.aux_lateral_spacing / 2.0,
            z: -layout.aux_recess,
            stern_start: layout.aux_stern_offset,
            bow_start: dims.boat_length() + layout.aux_bow_offset - length,
            length,
        }
    }

    /// The stern pair must end before the bow pair begins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let stern_end = self.stern_start + self.length;
        if stern_end > self.bow_start {
            return Err(ValidationError::Other(
                format!(
                    "auxiliary floats overlap: stern pair ends at {stern_end}, bow pair starts at {}",
                    self.bow_start
                ),
                None,
            ));
        }
        Ok(())
    }
}

/// Stern caps on both main floats plus the transom plate standing on the beams.
pub fn transom_mount(dims: &Dimensions) -> Node {
    let main = &dims.main_float;
    let transom = &dims.transom;
    let half = dims.layout.main_spacing / 2.0;
    let deck_z = main.radius() + dims.beam_stack();

    let cap = transom_cap(main.diameter, transom.cap_thickness, dims.resolution.segments);
    let plate = transom_bracket(transom.width, transom.height, transom.thickness)
        .translate(0.0, 0.0, deck_z);

    Node::union_all([cap.translate(-half, 0.0, 0.0), cap.translate(half, 0.0, 0.0), plate])
}

/// The complete boat: main floats, auxiliary floats, frame and transom.
pub fn boat(dims: &Dimensions) -> Node {
    let res = &dims.resolution;
    let half = dims.layout.main_spacing / 2.0;

    // the frame starts where the straight sections of the main floats do
    let main_start = PontoonLayout::new(&dims.main_float).straight_start();
    let mains = pontoon(&dims.main_float, res)
        .translate(half, -main_start, 0.0)
        .symmetric_about_yz();

    let aux = AuxLayout::new(dims);
    let aux_float = pontoon(&dims.aux_float, res);
    let aux_pairs = [aux.stern_start, aux.bow_start]
        .map(|y| aux_float.translate(aux.x, y, aux.z).symmetric_about_yz());

    let frame = frame(
        dims,
        dims.boat_length(),
        dims.layout.main_spacing,
        dims.hat_channel.count,
    );

    log::debug!(
        "boat: main floats at x = ±{half}, aux floats at x = ±{} from y = {} and {}",
        aux.x,
        aux.stern_start,
        aux.bow_start
    );
    Node::union_all(
        std::iter::once(mains)
            .chain(aux_pairs)
            .chain([frame, transom_mount(dims)]),
    )
}
