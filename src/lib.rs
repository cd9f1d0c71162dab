// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest paths over small maps of named points and routes.
//!
//! A map is a set of [Points](Point) (named lat-lon positions) and undirected
//! [Routes](Route) between them. Maps are usually loaded from semicolon-delimited
//! text files with the [reader] module, and then searched with [find_path],
//! an A* implementation using great-circle distance as its heuristic.
//!
//! # Example
//!
//! ```no_run
//! let mut g = waypoint::Graph::default();
//! waypoint::reader::load_from_file(&mut g, "path/to/points.txt", "path/to/routes.txt")
//!     .expect("failed to load the map");
//!
//! let origin: waypoint::PointId = "#SP".parse().unwrap();
//! let destination: waypoint::PointId = "#RJ".parse().unwrap();
//! let outcome = waypoint::find_path(&g, &origin, &destination).expect("unknown points");
//!
//! match outcome.found {
//!     Some(found) => println!("{} km: {:?}", found.length, found.steps),
//!     None => println!("no path"),
//! }
//! ```

mod astar;
mod distance;
mod graph;
mod ids;
pub mod reader;

pub use astar::{
    find_path, AStarError, FoundPath, PathReport, Search, SearchOutcome, SearchState,
};
pub use distance::{distance, earth_distance, EARTH_RADIUS};
pub use graph::{Graph, GraphError};
pub use ids::{IdError, PointId, RouteId};

/// A named position on the map.
///
/// `name` must have at least 2 characters, `lat` must be within [-90, 90]
/// and `lon` within [-180, 180] degrees. [Graph::insert_point] enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }
}

/// An undirected connection between two [Points](Point).
///
/// `length` is expressed in kilometers, and must not be shorter than the
/// great-circle distance between the ends, otherwise [find_path] may
/// return sub-optimal paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub ends: [PointId; 2],
    pub length: f64,
}

impl Route {
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// Given one end of the route, returns the other one.
    /// Returns `None` if `point` is not an end of this route.
    pub fn other_end(&self, point: &PointId) -> Option<&PointId> {
        if self.ends[0] == *point {
            Some(&self.ends[1])
        } else if self.ends[1] == *point {
            Some(&self.ends[0])
        } else {
            None
        }
    }
}

/// A single element of a [Path].
///
/// `route` leads from the previous step's point to `point`,
/// and is `None` only for the first step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub route: Option<RouteId>,
    pub point: PointId,
}

/// Ordered sequence of [Steps](Step) from an origin to a destination.
/// Empty paths represent the absence of a path.
pub type Path = Vec<Step>;
