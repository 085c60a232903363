//! Shared fixture helpers for the integration tests.

use std::path::PathBuf;

use airnav_lib::{load_airspace, load_graph_from_path, AirSpace, AirSpaceFiles, Graph};

/// Path to the fixtures directory shared by the library and CLI tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn catalonia_files() -> AirSpaceFiles {
    AirSpaceFiles::for_region(fixtures_dir(), "Cat")
}

#[allow(dead_code)]
pub fn catalonia() -> AirSpace {
    load_airspace(&catalonia_files()).expect("fixture airspace loads")
}

#[allow(dead_code)]
pub fn square_graph() -> Graph {
    load_graph_from_path(&fixtures_dir().join("square_graph.txt")).expect("fixture graph loads")
}

#[allow(dead_code)]
pub fn key(name: &str) -> String {
    name.to_string()
}
