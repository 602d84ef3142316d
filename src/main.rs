// main.rs
//
// Build every named output of the pontoon boat and write one STL file each.
//
// Environment:
//   PONTOON_DIMENSIONS  JSON file overriding parts of the dimension table
//   PONTOON_OUT_DIR     output directory, `stl` by default
//   PONTOON_STL_ASCII   write ASCII instead of binary STL when set
//   RUST_LOG            log filter, `info` by default

use pontoon::dimensions::Dimensions;
use pontoon::export::{ExportError, StlExporter, run};
use std::env;

fn load_dimensions() -> Result<Dimensions, ExportError> {
    match env::var_os("PONTOON_DIMENSIONS") {
        Some(path) => {
            log::info!("reading dimensions from {}", path.to_string_lossy());
            Ok(Dimensions::from_json_file(path)?)
        },
        None => Ok(Dimensions::default()),
    }
}

fn generate() -> Result<usize, ExportError> {
    let dims = load_dimensions()?;
    let out_dir = env::var_os("PONTOON_OUT_DIR").unwrap_or_else(|| "stl".into());
    let mut exporter =
        StlExporter::new(out_dir).ascii(env::var_os("PONTOON_STL_ASCII").is_some());
    run(&dims, &mut exporter)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match generate() {
        Ok(count) => log::info!("exported {count} files"),
        Err(error) => {
            log::error!("{error}");
            std::process::exit(1);
        },
    }
}
