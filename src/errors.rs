//! Validation errors

use crate::float_types::Real;
use nalgebra::Point3;

/// All the parameter and geometry issues detected before or during evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A length, diameter, thickness or spacing is zero, negative or not finite
    #[error("(NonPositive) `{what}` must be a positive finite value, got {value}")]
    NonPositive { what: &'static str, value: Real },

    /// A float channel reaches the centreline of the float
    #[error("(ChannelTooDeep) channel depth {depth} must be less than the float radius {radius}")]
    ChannelTooDeep { depth: Real, radius: Real },

    /// A float channel sticks out of its section, laterally or longitudinally
    #[error("(ChannelOutsideSection) channel spanning x {x_min}..{x_max}, y {y_min}..{y_max} leaves a section of radius {radius} and length {length}")]
    ChannelOutsideSection {
        x_min: Real,
        x_max: Real,
        y_min: Real,
        y_max: Real,
        radius: Real,
        length: Real,
    },

    /// A wall would meet itself in the middle of a hollow or thin profile
    #[error("(WallTooThick) `{what}` wall thickness {thickness} must be less than half of {outer}")]
    WallTooThick { what: &'static str, thickness: Real, outer: Real },

    /// A flange must overhang the web it is attached to
    #[error("(FlangeTooNarrow) `{what}` flange width {flange} must exceed web width {web}")]
    FlangeTooNarrow { what: &'static str, flange: Real, web: Real },

    /// Two evenly spaced crossmembers would overlap
    #[error("(CrossmemberOverlap) crossmember spacing {spacing} is smaller than the crossmember footprint {footprint}")]
    CrossmemberOverlap { spacing: Real, footprint: Real },

    /// Too few segments to approximate a circle
    #[error("(TooFewSegments) at least 3 segments are required, got {0}")]
    TooFewSegments(usize),

    /// Loft stations must be increasing along the axis with positive radii
    #[error("(LoftStations) {0}")]
    LoftStations(String),

    /// The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),

    /// A transform collapses space and can not be applied to a solid
    #[error("(SingularTransform) {0}")]
    SingularTransform(String),

    /// In general, anything else
    #[error("{0}")]
    Other(String, Option<Point3<Real>>),
}

impl ValidationError {
    /// Checks `value` is strictly positive and finite.
    pub fn check_positive(what: &'static str, value: Real) -> Result<(), ValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ValidationError::NonPositive { what, value })
        }
    }
}
