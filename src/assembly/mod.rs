//! Assembly builders: parts positioned and unioned into sub-assemblies, and
//! the whole boat.
//!
//! World axes: X across the boat, Y from stern to bow, Z up. The main float
//! axes lie at z=0 and the frame starts (y=0) where the straight sections of
//! the main floats begin.

mod boat;
mod frame;
mod pontoon;

pub use boat::{AuxLayout, boat, transom_mount};
pub use frame::{
    FrameLayout, crossmember_positions, frame, hat_crossmember, main_beam,
    square_tube_crossmember,
};
pub use pontoon::{PontoonLayout, pontoon};
