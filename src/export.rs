//! Named outputs and the exporters that write them.

use crate::assembly::{
    boat, frame, hat_crossmember, main_beam, pontoon, square_tube_crossmember, transom_mount,
};
use crate::dimensions::Dimensions;
use crate::errors::ValidationError;
use crate::io::IoError;
use crate::mesh::Mesh;
use crate::node::{Material, Node};
use crate::parts::{c_bracket, float_section, nose_cone};
use std::path::{Path, PathBuf};

/// Every output the generator writes, in order.
pub const OUTPUTS: [&str; 11] = [
    "boat",
    "frame",
    "main_pontoon",
    "aux_pontoon",
    "nose_cone",
    "float_section",
    "hat_channel",
    "square_tube",
    "main_beam",
    "c_bracket",
    "transom_mount",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid geometry: {0}")]
    Validation(#[from] ValidationError),

    #[error("export failed: {0}")]
    Io(#[from] IoError),

    #[error("unknown output `{0}`")]
    UnknownOutput(String),
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(IoError::StdIo(value))
    }
}

/// Receives one evaluated mesh per named output.
pub trait MeshExporter {
    fn export(&mut self, name: &str, mesh: &Mesh<Material>) -> Result<(), ExportError>;
}

/// Writes `<dir>/<name>.stl`, binary unless `ascii` is set.
#[derive(Debug, Clone)]
pub struct StlExporter {
    pub dir: PathBuf,
    pub ascii: bool,
}

impl StlExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        StlExporter { dir: dir.into(), ascii: false }
    }

    pub const fn ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.stl"))
    }

    fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
        if dir.exists() && !dir.is_dir() {
            return Err(IoError::MalformedPath(format!("{} is not a directory", dir.display())).into());
        }
        std::fs::create_dir_all(dir)?;
        Ok(())
    }
}

impl MeshExporter for StlExporter {
    fn export(&mut self, name: &str, mesh: &Mesh<Material>) -> Result<(), ExportError> {
        Self::ensure_dir(&self.dir)?;
        let path = self.path_for(name);
        let bytes = if self.ascii {
            mesh.to_stl_ascii(name).into_bytes()
        } else {
            mesh.to_stl_binary()?
        };
        std::fs::write(&path, bytes)?;
        log::info!("wrote {} ({} triangles)", path.display(), mesh.triangle_count());
        Ok(())
    }
}

/// Build the geometry tree of a named output.
pub fn build_output(name: &str, dims: &Dimensions) -> Result<Node, ExportError> {
    let res = &dims.resolution;
    let main = &dims.main_float;
    let span = dims.crossmember_span();

    let node = match name {
        "boat" => boat(dims),
        "frame" => frame(dims, dims.boat_length(), dims.layout.main_spacing, dims.hat_channel.count),
        "main_pontoon" => pontoon(main, res),
        "aux_pontoon" => pontoon(&dims.aux_float, res),
        "nose_cone" => nose_cone(main.diameter, main.nose_length, res),
        "float_section" => float_section(
            main.diameter,
            main.straight_length,
            main.channels,
            &main.channel,
            &main.rib,
            res,
        ),
        "hat_channel" => hat_crossmember(&dims.hat_channel, span),
        "square_tube" => square_tube_crossmember(&dims.square_tube, span),
        "main_beam" => main_beam(&dims.main_beam, dims.boat_length()),
        "c_bracket" => c_bracket(
            main.diameter,
            dims.bracket.thickness,
            dims.bracket.width,
            dims.bracket.tab_length,
            res.segments,
        ),
        "transom_mount" => transom_mount(dims),
        other => return Err(ExportError::UnknownOutput(other.to_string())),
    };
    Ok(node)
}

/// Validate the table, then build, evaluate and export every output in turn.
/// Stops at the first failure.
pub fn run<E: MeshExporter>(dims: &Dimensions, exporter: &mut E) -> Result<usize, ExportError> {
    dims.validate()?;
    for name in OUTPUTS {
        log::info!("building {name}");
        let node = build_output(name, dims)?;
        log::debug!("{name}: {} primitives", node.primitive_count());
        let mesh = node.to_mesh()?;
        exporter.export(name, &mesh)?;
    }
    Ok(OUTPUTS.len())
}
