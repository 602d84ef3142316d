// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used by plane classification and bounds checks.
/// Model dimensions are in inches, so the default is coarser than a millimetre
/// based kernel would use. It can be overridden:
/// at build time through the `PONTOON_TOLERANCE` env var
/// (e.g. `PONTOON_TOLERANCE=1e-6 cargo build`).
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-5
}

/// Returns the current tolerance value.
/// If not set yet, it tries `PONTOON_TOLERANCE` (parsed as `Real`) and
/// falls back to the default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("PONTOON_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Unit conversion
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// The dimension table is expressed in inches; exported meshes keep that unit.
pub const FOOT: Real = 12.0;
