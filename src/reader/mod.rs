// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading [Graphs](Graph) from semicolon-delimited text files.
//!
//! Points files start with the `ID;Name;Latitude;Longitude` header,
//! followed by one point per line:
//!
//! ```text
//! ID;Name;Latitude;Longitude
//! #NAT;Natal;-5.7945;-35.2110
//! #JPA;João Pessoa;-7.1195;-34.8450
//! ```
//!
//! Routes files start with the `ID;Name;Endpoint 1;Endpoint 2;Length` header,
//! followed by one route per line, with lengths in kilometers:
//!
//! ```text
//! ID;Name;Endpoint 1;Endpoint 2;Length
//! &BR101;BR-101;#NAT;#JPA;185
//! ```
//!
//! The Portuguese headers `ID;Nome;Latitude;Longitude` and
//! `ID;Nome;Extremidade 1;Extremidade 2;Comprimento` are accepted as well.
//!
//! All loading functions are atomic: on error, the provided graph is left untouched.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::Graph;

mod records;

pub use records::{ParseError, POINTS_HEADER, ROUTES_HEADER};

/// Which of the two input files a [LoadError] concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Points,
    Routes,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Points => write!(f, "points"),
            Self::Routes => write!(f, "routes"),
        }
    }
}

/// Error returned when a map can't be loaded.
#[derive(Debug, thiserror::Error)]
#[error("{file} file: {source}")]
pub struct LoadError {
    pub file: FileKind,
    #[source]
    pub source: ParseError,
}

impl LoadError {
    fn points(source: ParseError) -> Self {
        Self {
            file: FileKind::Points,
            source,
        }
    }

    fn routes(source: ParseError) -> Self {
        Self {
            file: FileKind::Routes,
            source,
        }
    }
}

/// Replaces the contents of a [Graph] with points and routes parsed
/// from two readers.
///
/// The provided streams will be automatically wrapped in buffered readers.
pub fn load_from_io<P: io::Read, R: io::Read>(
    g: &mut Graph,
    points: P,
    routes: R,
) -> Result<(), LoadError> {
    let mut fresh = Graph::default();
    records::add_points(&mut fresh, io::BufReader::new(points)).map_err(LoadError::points)?;
    records::add_routes(&mut fresh, io::BufReader::new(routes)).map_err(LoadError::routes)?;

    log::debug!(
        "loaded {} points and {} routes",
        fresh.len(),
        fresh.route_count()
    );
    *g = fresh;
    Ok(())
}

/// Replaces the contents of a [Graph] with points and routes parsed
/// from files at the provided paths.
pub fn load_from_file<P: AsRef<Path>, R: AsRef<Path>>(
    g: &mut Graph,
    points_path: P,
    routes_path: R,
) -> Result<(), LoadError> {
    let points = File::open(points_path).map_err(|e| LoadError::points(e.into()))?;
    let routes = File::open(routes_path).map_err(|e| LoadError::routes(e.into()))?;
    load_from_io(g, points, routes)
}

/// Replaces the contents of a [Graph] with points and routes parsed
/// from in-memory buffers.
pub fn load_from_buffer(g: &mut Graph, points: &[u8], routes: &[u8]) -> Result<(), LoadError> {
    load_from_io(g, points, routes)
}
