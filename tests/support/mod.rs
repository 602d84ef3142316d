#![allow(dead_code)]

use pontoon::dimensions::{Dimensions, Resolution};
use pontoon::float_types::Real;
use std::path::PathBuf;

/// Returns `true` if `a` and `b` are within `eps` of each other.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Default boat at a resolution cheap enough for debug-build tests.
pub fn coarse_dimensions() -> Dimensions {
    Dimensions {
        resolution: Resolution { segments: 12, loft_steps: 1 },
        ..Dimensions::default()
    }
}

/// Fresh, empty scratch directory unique to this process and `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("pontoon-tests")
        .join(format!("{name}-{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("clear scratch dir");
    }
    dir
}

/// Area of a regular `n`-gon inscribed in a circle of `radius`
pub fn ngon_area(radius: Real, n: usize) -> Real {
    0.5 * n as Real * radius * radius * (pontoon::float_types::TAU / n as Real).sin()
}
