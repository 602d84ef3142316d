mod support;

use pontoon::assembly::{
    AuxLayout, FrameLayout, PontoonLayout, boat, crossmember_positions, frame, main_beam, pontoon,
    transom_mount,
};
use pontoon::dimensions::{Channels, Dimensions, FloatDimensions};
use pontoon::errors::ValidationError;
use pontoon::float_types::Real;
use pontoon::CSG;
use pontoon::node::Material;
use support::{approx_eq, coarse_dimensions};

const EPS: Real = 1e-6;

#[test]
fn segments_are_laid_end_to_end() {
    let float = FloatDimensions {
        rear_nose: true,
        ..FloatDimensions::default()
    };
    let layout = PontoonLayout::new(&float);

    assert_eq!(layout.rear_nose, Some(35.4));
    let expected = [35.4, 71.4, 107.4, 143.4];
    assert_eq!(layout.section_offsets.len(), expected.len());
    for (got, want) in layout.section_offsets.iter().zip(expected) {
        assert!(approx_eq(*got, want, EPS), "{got} vs {want}");
    }
    let front = layout.front_nose.expect("front nose");
    assert!(approx_eq(front, 179.4, EPS));
    assert!(approx_eq(layout.total_length, 35.4 * 2.0 + 144.0, EPS));
}

#[test]
fn main_float_without_rear_nose_starts_straight() {
    let layout = PontoonLayout::new(&FloatDimensions::default());
    assert_eq!(layout.rear_nose, None);
    assert_eq!(layout.straight_start(), 0.0);
    assert!(approx_eq(layout.front_nose.unwrap_or_default(), 144.0, EPS));
}

#[test]
fn pontoon_bounds_cover_its_length() {
    let dims = coarse_dimensions();
    let aux = &dims.aux_float;
    let bb = pontoon(aux, &dims.resolution).bounds();
    assert!(approx_eq(bb.mins.y, 0.0, EPS));
    assert!(approx_eq(bb.maxs.y, aux.total_length(), EPS));
    assert!(approx_eq(bb.maxs.x, aux.radius() + aux.rib.height, EPS));
}

#[test]
fn aux_pontoon_evaluates() {
    let dims = coarse_dimensions();
    let mesh = pontoon(&dims.aux_float, &dims.resolution)
        .to_mesh()
        .expect("valid auxiliary float");
    let bb = mesh.bounding_box();
    assert!(approx_eq(bb.mins.y, 0.0, 1e-6));
    assert!(approx_eq(bb.maxs.y, 72.0, 1e-6));
    assert!(mesh.volume() > 0.0);
}

#[test]
fn crossmembers_are_evenly_spaced() {
    let positions = crossmember_positions(144.0, 8);
    assert_eq!(positions.len(), 8);
    assert!(approx_eq(positions[0], 9.0, EPS));
    for pair in positions.windows(2) {
        assert!(approx_eq(pair[1] - pair[0], 18.0, EPS));
    }
    assert!(positions.iter().all(|&y| y > 0.0 && y < 144.0));

    let dims = Dimensions::default();
    let layout = FrameLayout::new(144.0, 8, dims.hat_channel.footprint()).expect("roomy frame");
    assert!(layout.spacing > dims.hat_channel.footprint());
    assert_eq!(layout.positions, positions);
}

#[test]
fn crowded_frame_is_rejected() {
    let mut dims = Dimensions::default();
    dims.hat_channel.count = 40;
    assert!(matches!(
        dims.validate(),
        Err(ValidationError::CrossmemberOverlap { .. })
    ));
}

#[test]
fn bow_tube_must_clear_the_hats() {
    let mut dims = Dimensions::default();
    dims.hat_channel.count = 20;
    assert!(matches!(
        dims.validate(),
        Err(ValidationError::CrossmemberOverlap { .. })
    ));

    dims.hat_channel.count = 8;
    dims.square_tube.bow_offset = 0.5;
    assert!(dims.validate().is_err());
}

#[test]
fn bow_tube_gets_brackets() {
    let dims = coarse_dimensions();
    let length = dims.boat_length();
    let node = frame(&dims, length, dims.layout.main_spacing, dims.hat_channel.count);
    let mesh = node.to_mesh().expect("valid frame");

    // steel faces of the tube brackets reach within half a bracket of the bow
    let tube_y = length - dims.square_tube.bow_offset;
    let reach = mesh
        .polygons
        .iter()
        .filter(|p| p.metadata == Some(Material::Steel))
        .flat_map(|p| p.vertices.iter().map(|v| v.pos.y))
        .fold(Real::MIN, Real::max);
    assert!(approx_eq(reach, tube_y + dims.bracket.width / 2.0, 1e-6), "reach {reach}");
}

#[test]
fn main_beam_runs_the_frame() {
    let dims = Dimensions::default();
    let bb = main_beam(&dims.main_beam, 144.0).bounds();
    assert!(approx_eq(bb.mins.y, 0.0, EPS));
    assert!(approx_eq(bb.maxs.y, 144.0, EPS));
    assert!(approx_eq(bb.mins.z, 0.0, EPS));
    assert!(approx_eq(bb.maxs.z, dims.main_beam.height(), EPS));
    assert!(approx_eq(bb.maxs.x, dims.main_beam.flange_width / 2.0, EPS));
}

#[test]
fn frame_is_symmetric_and_sits_on_the_floats() {
    let dims = Dimensions::default();
    let node = frame(&dims, dims.boat_length(), dims.layout.main_spacing, dims.hat_channel.count);
    let bb = node.bounds();
    assert!(bb.is_symmetric_about(0));
    assert!(approx_eq(bb.mins.y, 0.0, EPS));
    assert!(bb.maxs.y <= dims.boat_length() + EPS);

    // crossmembers stand on the beams, which sit in the channels
    let deck = dims.main_float.radius() + dims.beam_stack();
    let tallest = dims.hat_channel.height.max(dims.square_tube.outer);
    assert!(approx_eq(bb.maxs.z, deck + tallest, EPS));
}

#[test]
fn boat_is_symmetric() {
    let dims = Dimensions::default();
    let bb = boat(&dims).bounds();
    assert!(bb.is_symmetric_about(0));

    let half = dims.layout.main_spacing / 2.0 + dims.main_float.radius();
    assert!(bb.maxs.x >= half);
}

#[test]
fn boat_tree_is_deterministic() {
    let dims = Dimensions::default();
    let first = boat(&dims);
    let second = boat(&dims);
    assert_eq!(first, second);
    assert_eq!(
        first.describe().expect("serialisable"),
        second.describe().expect("serialisable")
    );
    assert_eq!(first.primitive_count(), second.primitive_count());
}

#[test]
fn boat_primitive_count() {
    let dims = Dimensions::default();
    // main float: 4 sections of body, 3 ribs and 2 channels, plus the front nose
    let main = 4 * (1 + 3 + 2) + 1;
    // aux float: 1 section of body and 3 ribs, plus two noses
    let aux = (1 + 3) + 2;
    // 4 beams, 8 hats, the bow tube and a bracket per crossmember per float
    let frame = 4 + 8 + 1 + 2 * 9;
    let transom = 3;
    assert_eq!(boat(&dims).primitive_count(), 2 * main + 4 * aux + frame + transom);
}

#[test]
fn aux_pairs_do_not_overlap() {
    let dims = Dimensions::default();
    let aux = AuxLayout::new(&dims);
    assert!(aux.validate().is_ok());
    assert!(aux.stern_start + aux.length <= aux.bow_start);
    assert!(aux.z < 0.0);

    let mut long = Dimensions::default();
    long.aux_float.straight_count = 3;
    assert!(AuxLayout::new(&long).validate().is_err());
    assert!(long.validate().is_err());
}

#[test]
fn main_floats_need_channels() {
    let mut dims = Dimensions::default();
    dims.main_float.channels = Channels::None;
    assert!(dims.validate().is_err());
}

#[test]
fn too_deep_channels_fail_validation() {
    let mut dims = Dimensions::default();
    dims.main_float.channel.depth = dims.main_float.radius();
    assert!(matches!(
        dims.validate(),
        Err(ValidationError::ChannelTooDeep { .. })
    ));
}

#[test]
fn transom_mount_spans_both_floats() {
    let dims = coarse_dimensions();
    let mesh = transom_mount(&dims).to_mesh().expect("valid transom mount");
    let bb = mesh.bounding_box();
    let half = dims.layout.main_spacing / 2.0;
    assert!(bb.maxs.x >= half + dims.main_float.radius() - 1e-6);
    assert!(approx_eq(bb.mins.y, -dims.transom.cap_thickness, 1e-6));
    assert!(approx_eq(
        bb.maxs.z,
        dims.main_float.radius() + dims.beam_stack() + dims.transom.height,
        1e-6
    ));
}
