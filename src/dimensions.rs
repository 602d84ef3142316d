//! The dimension table: every measurement of the boat, in inches.
//!
//! Values are grouped by component and deserialised from JSON with every
//! field optional, so an override file only names what it changes.

use crate::errors::ValidationError;
use crate::float_types::{FOOT, Real};
use crate::io::IoError;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Number of longitudinal channels cut into the top of a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channels {
    #[default]
    None,
    /// One channel on the centreline
    Single,
    /// Two channels symmetric about the centreline
    Double,
}

impl Channels {
    pub const fn count(self) -> usize {
        match self {
            Channels::None => 0,
            Channels::Single => 1,
            Channels::Double => 2,
        }
    }

    /// Lateral channel centres relative to the float axis.
    pub fn offsets(self, spacing: Real) -> Vec<Real> {
        match self {
            Channels::None => Vec::new(),
            Channels::Single => vec![0.0],
            Channels::Double => vec![-spacing / 2.0, spacing / 2.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelDimensions {
    pub width: Real,
    /// Measured down from the top of the float
    pub depth: Real,
    /// Centre to centre, for [`Channels::Double`]
    pub spacing: Real,
}

impl Default for ChannelDimensions {
    fn default() -> Self {
        Self { width: 3.0, depth: 2.0, spacing: 6.0 }
    }
}

/// Thin rings standing proud of the float surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibDimensions {
    pub spacing: Real,
    /// Radial height above the float surface
    pub height: Real,
    /// Extent along the float
    pub width: Real,
}

impl Default for RibDimensions {
    fn default() -> Self {
        Self { spacing: 12.0, height: 0.25, width: 0.5 }
    }
}

/// A float: optional nose cones at either end of `straight_count` sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatDimensions {
    pub diameter: Real,
    pub nose_length: Real,
    pub straight_length: Real,
    pub straight_count: usize,
    pub front_nose: bool,
    pub rear_nose: bool,
    pub channels: Channels,
    pub channel: ChannelDimensions,
    pub rib: RibDimensions,
}

impl Default for FloatDimensions {
    /// The main float
    fn default() -> Self {
        Self {
            diameter: 27.0,
            nose_length: 35.4,
            straight_length: 3.0 * FOOT,
            straight_count: 4,
            front_nose: true,
            rear_nose: false,
            channels: Channels::Double,
            channel: ChannelDimensions::default(),
            rib: RibDimensions::default(),
        }
    }
}

impl FloatDimensions {
    /// The auxiliary float: smaller, a nose at each end, no channels.
    pub fn auxiliary() -> Self {
        Self {
            diameter: 14.0,
            nose_length: 18.0,
            straight_length: 3.0 * FOOT,
            straight_count: 1,
            front_nose: true,
            rear_nose: true,
            channels: Channels::None,
            ..Self::default()
        }
    }

    pub fn radius(&self) -> Real {
        self.diameter / 2.0
    }

    pub fn nose_count(&self) -> usize {
        usize::from(self.front_nose) + usize::from(self.rear_nose)
    }

    /// Length of the straight part of the float
    pub fn straight_total(&self) -> Real {
        self.straight_length * self.straight_count as Real
    }

    /// nose length × (front + rear) + straight length × section count
    pub fn total_length(&self) -> Real {
        self.nose_length * self.nose_count() as Real + self.straight_total()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_positive("float diameter", self.diameter)?;
        ValidationError::check_positive("float straight length", self.straight_length)?;
        if self.straight_count == 0 {
            return Err(ValidationError::NonPositive {
                what: "float straight count",
                value: 0.0,
            });
        }
        if self.nose_count() > 0 {
            ValidationError::check_positive("float nose length", self.nose_length)?;
        }

        ValidationError::check_positive("rib spacing", self.rib.spacing)?;
        ValidationError::check_positive("rib height", self.rib.height)?;
        ValidationError::check_positive("rib width", self.rib.width)?;
        if self.rib.width >= self.rib.spacing {
            return Err(ValidationError::Other(
                format!("ribs {} wide touch at spacing {}", self.rib.width, self.rib.spacing),
                None,
            ));
        }

        if self.channels != Channels::None {
            crate::parts::validate_channels(
                self.radius(),
                self.straight_length,
                self.channels,
                &self.channel,
            )?;
        }
        Ok(())
    }
}

/// Overrides for a float; unset fields come from the float they are applied to.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FloatOverrides {
    diameter: Option<Real>,
    nose_length: Option<Real>,
    straight_length: Option<Real>,
    straight_count: Option<usize>,
    front_nose: Option<bool>,
    rear_nose: Option<bool>,
    channels: Option<Channels>,
    channel: Option<ChannelDimensions>,
    rib: Option<RibDimensions>,
}

impl FloatOverrides {
    fn apply(self, base: FloatDimensions) -> FloatDimensions {
        FloatDimensions {
            diameter: self.diameter.unwrap_or(base.diameter),
            nose_length: self.nose_length.unwrap_or(base.nose_length),
            straight_length: self.straight_length.unwrap_or(base.straight_length),
            straight_count: self.straight_count.unwrap_or(base.straight_count),
            front_nose: self.front_nose.unwrap_or(base.front_nose),
            rear_nose: self.rear_nose.unwrap_or(base.rear_nose),
            channels: self.channels.unwrap_or(base.channels),
            channel: self.channel.unwrap_or(base.channel),
            rib: self.rib.unwrap_or(base.rib),
        }
    }
}

fn auxiliary_over_defaults<'de, D>(deserializer: D) -> Result<FloatDimensions, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = FloatOverrides::deserialize(deserializer)?;
    Ok(overrides.apply(FloatDimensions::auxiliary()))
}

/// T-beam running under a main float: stem below, flange on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamDimensions {
    pub flange_width: Real,
    pub flange_thickness: Real,
    pub stem_height: Real,
    pub stem_thickness: Real,
}

impl Default for BeamDimensions {
    fn default() -> Self {
        Self {
            flange_width: 3.0,
            flange_thickness: 0.375,
            stem_height: 3.0,
            stem_thickness: 0.5,
        }
    }
}

impl BeamDimensions {
    pub fn height(&self) -> Real {
        self.stem_height + self.flange_thickness
    }
}

/// Trapezoidal hat-channel crossmember with flanges along its base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HatChannelDimensions {
    pub top_width: Real,
    /// Outer width where the webs meet the flanges
    pub base_width: Real,
    pub height: Real,
    pub flange_width: Real,
    pub thickness: Real,
    /// Crossmembers spread evenly along the frame
    pub count: usize,
}

impl Default for HatChannelDimensions {
    fn default() -> Self {
        Self {
            top_width: 1.5,
            base_width: 3.0,
            height: 2.0,
            flange_width: 1.0,
            thickness: 0.125,
            count: 8,
        }
    }
}

impl HatChannelDimensions {
    /// Overall width across both flanges, the footprint along the frame
    pub fn footprint(&self) -> Real {
        self.base_width + 2.0 * self.flange_width
    }
}

/// Hollow square crossmember near the bow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareTubeDimensions {
    pub outer: Real,
    pub wall: Real,
    /// Distance of its centre back from the bow end of the frame
    pub bow_offset: Real,
}

impl Default for SquareTubeDimensions {
    fn default() -> Self {
        Self { outer: 2.0, wall: 0.125, bow_offset: 2.0 }
    }
}

/// C-bracket clamping the frame to a main float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketDimensions {
    pub thickness: Real,
    /// Extent along the float
    pub width: Real,
    pub tab_length: Real,
}

impl Default for BracketDimensions {
    fn default() -> Self {
        Self { thickness: 0.25, width: 2.0, tab_length: 2.0 }
    }
}

/// Transom plate standing on the beams at the stern, plus the discs capping
/// the open stern ends of the main floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransomDimensions {
    pub width: Real,
    pub height: Real,
    pub thickness: Real,
    pub cap_thickness: Real,
}

impl Default for TransomDimensions {
    fn default() -> Self {
        Self { width: 100.0, height: 20.0, thickness: 1.0, cap_thickness: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDimensions {
    /// Centre to centre distance of the main floats
    pub main_spacing: Real,
    /// Centre to centre distance of the two auxiliary floats in a pair
    pub aux_lateral_spacing: Real,
    /// How far the auxiliary float axes sit below the main float axes
    pub aux_recess: Real,
    /// Stern pair starts this far ahead of the stern
    pub aux_stern_offset: Real,
    /// Bow pair ends this far past the bow end of the frame
    pub aux_bow_offset: Real,
}

impl Default for LayoutDimensions {
    fn default() -> Self {
        Self {
            main_spacing: 8.0 * FOOT,
            aux_lateral_spacing: 30.0,
            aux_recess: 8.0,
            aux_stern_offset: 4.0,
            aux_bow_offset: 8.0,
        }
    }
}

/// Tessellation density; coarse values keep tests quick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    /// Segments around every circle
    pub segments: usize,
    /// Eased bands between two loft stations
    pub loft_steps: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Self { segments: 32, loft_steps: 4 }
    }
}

/// The complete dimension table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub main_float: FloatDimensions,
    /// Fields missing from an override keep their auxiliary defaults
    #[serde(deserialize_with = "auxiliary_over_defaults")]
    pub aux_float: FloatDimensions,
    pub main_beam: BeamDimensions,
    pub hat_channel: HatChannelDimensions,
    pub square_tube: SquareTubeDimensions,
    pub bracket: BracketDimensions,
    pub transom: TransomDimensions,
    pub layout: LayoutDimensions,
    pub resolution: Resolution,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            main_float: FloatDimensions::default(),
            aux_float: FloatDimensions::auxiliary(),
            main_beam: BeamDimensions::default(),
            hat_channel: HatChannelDimensions::default(),
            square_tube: SquareTubeDimensions::default(),
            bracket: BracketDimensions::default(),
            transom: TransomDimensions::default(),
            layout: LayoutDimensions::default(),
            resolution: Resolution::default(),
        }
    }
}

impl Dimensions {
    /// Parse a JSON dimension table; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, IoError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Length of the frame: the straight part of the main floats.
    pub fn boat_length(&self) -> Real {
        self.main_float.straight_total()
    }

    /// Height of the beams above the bottom of the channels they sit in.
    pub fn beam_stack(&self) -> Real {
        self.main_beam.height() - self.main_float.channel.depth
    }

    /// Lateral span of every crossmember: across both main floats
    pub fn crossmember_span(&self) -> Real {
        self.layout.main_spacing + self.main_float.diameter
    }

    /// Check every range the builders rely on. Builders themselves never fail,
    /// so this runs before any geometry is produced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.main_float.validate()?;
        self.aux_float.validate()?;

        if self.main_float.channels == Channels::None {
            return Err(ValidationError::Other(
                "the main floats need channels to seat the beams".into(),
                None,
            ));
        }

        let beam = &self.main_beam;
        crate::parts::validate_t_beam(
            beam.flange_width,
            beam.flange_thickness,
            beam.stem_height,
            beam.stem_thickness,
        )?;
        if beam.stem_thickness >= self.main_float.channel.width {
            return Err(ValidationError::FlangeTooNarrow {
                what: "main float channel",
                flange: self.main_float.channel.width,
                web: beam.stem_thickness,
            });
        }
        ValidationError::check_positive("beam stack height", self.beam_stack())?;

        let hat = &self.hat_channel;
        crate::parts::validate_hat_channel(
            hat.top_width,
            hat.base_width,
            hat.height,
            hat.flange_width,
            hat.thickness,
        )?;
        crate::parts::validate_square_tube(self.square_tube.outer, self.square_tube.wall)?;
        let frame =
            crate::assembly::FrameLayout::new(self.boat_length(), hat.count, hat.footprint())?;
        ValidationError::check_positive("square tube bow offset", self.square_tube.bow_offset)?;
        frame.bow_tube(self.boat_length(), &self.square_tube, hat.footprint())?;

        let bracket = &self.bracket;
        ValidationError::check_positive("bracket thickness", bracket.thickness)?;
        ValidationError::check_positive("bracket width", bracket.width)?;
        ValidationError::check_positive("bracket tab length", bracket.tab_length)?;

        let transom = &self.transom;
        ValidationError::check_positive("transom width", transom.width)?;
        ValidationError::check_positive("transom height", transom.height)?;
        ValidationError::check_positive("transom thickness", transom.thickness)?;
        ValidationError::check_positive("transom cap thickness", transom.cap_thickness)?;

        let layout = &self.layout;
        ValidationError::check_positive("main float spacing", layout.main_spacing)?;
        if layout.main_spacing <= self.main_float.diameter {
            return Err(ValidationError::Other(
                format!(
                    "main floats {} apart would overlap at diameter {}",
                    layout.main_spacing, self.main_float.diameter
                ),
                None,
            ));
        }
        ValidationError::check_positive("aux float spacing", layout.aux_lateral_spacing)?;
        if layout.aux_lateral_spacing <= self.aux_float.diameter {
            return Err(ValidationError::Other(
                format!(
                    "auxiliary floats {} apart would overlap at diameter {}",
                    layout.aux_lateral_spacing, self.aux_float.diameter
                ),
                None,
            ));
        }
        crate::assembly::AuxLayout::new(self).validate()?;

        if self.resolution.segments < 3 {
            return Err(ValidationError::TooFewSegments(self.resolution.segments));
        }
        if self.resolution.loft_steps == 0 {
            return Err(ValidationError::NonPositive { what: "loft steps", value: 0.0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let dims = Dimensions::default();
        dims.validate().expect("default table validates");
        assert_eq!(dims.boat_length(), 144.0);
        assert!((dims.main_float.total_length() - 179.4).abs() < 1e-9);
        assert_eq!(dims.aux_float.total_length(), 72.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dims = Dimensions::from_json_str(
            r#"{ "main_beam": { "flange_width": 3.5 }, "resolution": { "segments": 12 } }"#,
        )
        .expect("valid json");
        assert_eq!(dims.main_beam.flange_width, 3.5);
        assert_eq!(dims.main_beam.stem_height, 3.0);
        assert_eq!(dims.resolution.segments, 12);
        assert_eq!(dims.aux_float, FloatDimensions::auxiliary());
    }

    #[test]
    fn partial_aux_float_keeps_auxiliary_defaults() {
        let dims = Dimensions::from_json_str(r#"{ "aux_float": { "straight_count": 2 } }"#)
            .expect("valid json");
        let aux = &dims.aux_float;
        assert_eq!(aux.straight_count, 2);
        assert_eq!(aux.diameter, 14.0);
        assert_eq!(aux.nose_length, 18.0);
        assert!(aux.front_nose && aux.rear_nose);
        assert_eq!(aux.channels, Channels::None);
        assert_eq!(aux.total_length(), 108.0);
        // the longer pairs now collide under the frame
        assert!(crate::assembly::AuxLayout::new(&dims).validate().is_err());

        let dims = Dimensions::from_json_str(r#"{ "aux_float": { "diameter": 12.0 } }"#)
            .expect("valid json");
        assert_eq!(dims.aux_float.total_length(), 72.0);
        assert_eq!(dims.aux_float.straight_count, 1);
        dims.validate().expect("narrower auxiliary floats still fit");
    }

    #[test]
    fn square_tube_into_last_hat_is_rejected() {
        let mut dims = Dimensions::default();
        dims.hat_channel.count = 20;
        assert!(matches!(
            dims.validate(),
            Err(ValidationError::CrossmemberOverlap { .. })
        ));
    }

    #[test]
    fn missing_file_keeps_the_io_error() {
        let path = std::env::temp_dir().join("pontoon-no-such-dimensions.json");
        assert!(matches!(Dimensions::from_json_file(&path), Err(IoError::StdIo(_))));
    }

    #[test]
    fn rejects_deep_channel() {
        let mut dims = Dimensions::default();
        dims.main_float.channel.depth = dims.main_float.radius();
        assert!(matches!(
            dims.validate(),
            Err(ValidationError::ChannelTooDeep { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_length() {
        let mut dims = Dimensions::default();
        dims.aux_float.straight_length = 0.0;
        assert_eq!(
            dims.validate(),
            Err(ValidationError::NonPositive { what: "float straight length", value: 0.0 })
        );
    }

    #[test]
    fn malformed_json_is_an_io_error() {
        assert!(matches!(Dimensions::from_json_str("{ nope"), Err(IoError::Json(_))));
    }
}
