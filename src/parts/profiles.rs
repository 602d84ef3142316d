//! Crossmember and beam cross-sections, drawn in the XY plane with Y up.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::node::Profile;

/// Horizontal thickness of a sloped web of perpendicular `thickness`
fn web_run(thickness: Real, rise: Real, run: Real) -> Real {
    thickness * (rise * rise + run * run).sqrt() / rise
}

pub fn validate_hat_channel(
    top_width: Real,
    base_width: Real,
    height: Real,
    flange_width: Real,
    thickness: Real,
) -> Result<(), ValidationError> {
    ValidationError::check_positive("hat channel top width", top_width)?;
    ValidationError::check_positive("hat channel base width", base_width)?;
    ValidationError::check_positive("hat channel height", height)?;
    ValidationError::check_positive("hat channel flange width", flange_width)?;
    ValidationError::check_positive("hat channel thickness", thickness)?;

    if 2.0 * thickness >= top_width {
        return Err(ValidationError::WallTooThick {
            what: "hat channel crown",
            thickness,
            outer: top_width,
        });
    }
    if 2.0 * thickness >= height {
        return Err(ValidationError::WallTooThick { what: "hat channel", thickness, outer: height });
    }
    if flange_width <= thickness {
        return Err(ValidationError::FlangeTooNarrow {
            what: "hat channel",
            flange: flange_width,
            web: thickness,
        });
    }
    if base_width < top_width {
        return Err(ValidationError::Other(
            format!("hat channel base {base_width} is narrower than its top {top_width}"),
            None,
        ));
    }

    // the inside of the crown must stay open
    let (a, b) = (top_width / 2.0, base_width / 2.0);
    let run = web_run(thickness, height, b - a);
    if run >= a + (b - a) * thickness / height {
        return Err(ValidationError::WallTooThick {
            what: "hat channel web",
            thickness,
            outer: top_width,
        });
    }
    Ok(())
}

/// Trapezoidal hat section, flanges at y=0 and crown at y=`height`, centred on x=0.
///
/// ```text
///           +-------+
///          / +---+ \
///         / /     \ \
///   +----+ /       \ +----+
///   +-----+         +-----+
/// ```
pub fn hat_channel_profile(
    top_width: Real,
    base_width: Real,
    height: Real,
    flange_width: Real,
    thickness: Real,
) -> Profile {
    let (a, b, f, t, h) = (top_width / 2.0, base_width / 2.0, flange_width, thickness, height);
    let run = web_run(t, h, b - a);
    // outer web line x = b - (b - a) y / h, inner web parallel and `run` further in
    let outer_at = |y: Real| b - (b - a) * y / h;
    let inner_at = |y: Real| outer_at(y) - run;

    Profile::polygon(vec![
        [-b - f, 0.0],
        [-inner_at(0.0), 0.0],
        [-inner_at(h - t), h - t],
        [inner_at(h - t), h - t],
        [inner_at(0.0), 0.0],
        [b + f, 0.0],
        [b + f, t],
        [outer_at(t), t],
        [a, h],
        [-a, h],
        [-outer_at(t), t],
        [-b - f, t],
    ])
}

pub fn validate_t_beam(
    flange_width: Real,
    flange_thickness: Real,
    stem_height: Real,
    stem_thickness: Real,
) -> Result<(), ValidationError> {
    ValidationError::check_positive("T-beam flange width", flange_width)?;
    ValidationError::check_positive("T-beam flange thickness", flange_thickness)?;
    ValidationError::check_positive("T-beam stem height", stem_height)?;
    ValidationError::check_positive("T-beam stem thickness", stem_thickness)?;
    if flange_width <= stem_thickness {
        return Err(ValidationError::FlangeTooNarrow {
            what: "T-beam",
            flange: flange_width,
            web: stem_thickness,
        });
    }
    Ok(())
}

/// T section: stem from y=0 up to `stem_height`, flange on top of it, centred on x=0.
pub fn t_beam_profile(
    flange_width: Real,
    flange_thickness: Real,
    stem_height: Real,
    stem_thickness: Real,
) -> Profile {
    let (fw, st) = (flange_width / 2.0, stem_thickness / 2.0);
    let top = stem_height + flange_thickness;
    Profile::polygon(vec![
        [-st, 0.0],
        [st, 0.0],
        [st, stem_height],
        [fw, stem_height],
        [fw, top],
        [-fw, top],
        [-fw, stem_height],
        [-st, stem_height],
    ])
}

pub fn validate_square_tube(outer: Real, wall: Real) -> Result<(), ValidationError> {
    ValidationError::check_positive("square tube size", outer)?;
    ValidationError::check_positive("square tube wall", wall)?;
    if 2.0 * wall >= outer {
        return Err(ValidationError::WallTooThick { what: "square tube", thickness: wall, outer });
    }
    Ok(())
}

/// Hollow square centred on the origin.
pub fn square_tube_profile(outer: Real, wall: Real) -> Profile {
    let square = |half: Real| vec![[-half, -half], [half, -half], [half, half], [-half, half]];
    Profile::Polygon {
        outer: square(outer / 2.0),
        holes: vec![square(outer / 2.0 - wall)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_beam_area() {
        let profile = t_beam_profile(3.0, 0.5, 3.0, 0.5);
        assert!((profile.area() - (3.0 * 0.5 + 3.0 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn square_tube_area() {
        let profile = square_tube_profile(2.0, 0.25);
        assert!((profile.area() - (4.0 - 1.5 * 1.5)).abs() < 1e-9);
        assert!(validate_square_tube(2.0, 1.0).is_err());
    }

    #[test]
    fn hat_channel_is_a_thin_shell() {
        let profile = hat_channel_profile(1.5, 3.0, 2.0, 1.0, 0.125);
        let area = profile.area();
        // far less than the filled trapezoid plus flanges
        assert!(area > 0.0 && area < 1.5);
        validate_hat_channel(1.5, 3.0, 2.0, 1.0, 0.125).expect("default hat channel");
        assert!(matches!(
            validate_hat_channel(1.5, 3.0, 2.0, 0.1, 0.125),
            Err(ValidationError::FlangeTooNarrow { .. })
        ));
    }
}
