// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::PointId;

/// Error conditions which may occur during [find_path](crate::find_path).
///
/// Note that the absence of a path is not an error, see
/// [SearchOutcome::found](crate::SearchOutcome::found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AStarError {
    /// The graph has no points.
    EmptyGraph,

    /// The origin or destination point doesn't exist in the graph.
    InvalidReference(PointId),

    /// The search state references a point which can't be resolved.
    /// This can only happen if the [Graph](crate::Graph) invariants are broken.
    Inconsistent(PointId),
}

impl AStarError {
    /// Returns true if the error was caused by the arguments
    /// of [find_path](crate::find_path), rather than by a broken graph.
    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, Self::EmptyGraph | Self::InvalidReference(_))
    }
}

impl std::fmt::Display for AStarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "empty graph"),
            Self::InvalidReference(point_id) => write!(f, "invalid point: {}", point_id),
            Self::Inconsistent(point_id) => {
                write!(f, "inconsistent search state at point {}", point_id)
            }
        }
    }
}

impl std::error::Error for AStarError {}
