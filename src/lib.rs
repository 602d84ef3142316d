//! A parametric **pontoon boat** described as a tree of
//! [constructive solid geometry](https://en.wikipedia.org/wiki/Constructive_solid_geometry)
//! operations and exported to STL.
//!
//! The crate is layered bottom-up:
//! - [`dimensions`]: the dimension table, every measurement in inches
//! - [`parts`]: nose cones, float sections, crossmember profiles, brackets
//! - [`assembly`]: pontoons, the frame, the transom mount and the whole boat
//! - [`export`]: the named outputs and the STL exporter
//!
//! Geometry is declared as an immutable [`node::Node`] tree and only turned
//! into polygons when evaluated with [`node::Node::to_mesh`], which runs the
//! [BSP](mesh::bsp) boolean kernel in [`mesh`].
//!
//! ```no_run
//! use pontoon::{dimensions::Dimensions, export::{StlExporter, run}};
//!
//! let mut exporter = StlExporter::new("stl");
//! run(&Dimensions::default(), &mut exporter).expect("export");
//! ```

#![forbid(unsafe_code)]
#![warn(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod assembly;
pub mod dimensions;
pub mod errors;
pub mod export;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod node;
pub mod parts;
pub mod sketch;
pub mod traits;

pub use node::Node;
pub use traits::CSG;
