//! Primitive component builders.
//!
//! Builders take explicit measurements rather than the whole dimension table
//! so the main and auxiliary floats share them. They never fail: ranges are
//! checked up front by the `validate_*` functions, and anything left over
//! surfaces when the returned [`Node`](crate::node::Node) is evaluated.

mod bracket;
mod float_section;
mod nose_cone;
mod profiles;

pub use bracket::{c_bracket, c_bracket_profile, transom_bracket, transom_cap};
pub use float_section::{ChannelCut, channel_cuts, float_section, rib_positions, validate_channels};
pub use nose_cone::{NOSE_DIAMETER_FRACTIONS, NOSE_STATION_FRACTIONS, nose_cone, nose_stations};
pub use profiles::{
    hat_channel_profile, square_tube_profile, t_beam_profile, validate_hat_channel,
    validate_square_tube, validate_t_beam,
};
