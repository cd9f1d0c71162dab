// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{AStarError, Path, SearchOutcome};

/// Flat summary of a [find_path](crate::find_path) call, with failures
/// encoded as negative numbers.
///
/// | Outcome            | `length` | `path`   | `open_count`, `closed_count` |
/// |--------------------|----------|----------|------------------------------|
/// | path found         | >= 0     | non-empty| >= 0                         |
/// | no path            | -1       | empty    | >= 0                         |
/// | invalid parameters | -1       | empty    | -1                           |
#[derive(Debug, Clone, PartialEq)]
pub struct PathReport {
    pub length: f64,
    pub path: Path,
    pub open_count: i64,
    pub closed_count: i64,
}

impl PathReport {
    /// Value used for `length` when there is no path, and for the
    /// counters when the query was invalid.
    pub const NONE: i64 = -1;

    pub fn invalid() -> Self {
        Self {
            length: Self::NONE as f64,
            path: Path::default(),
            open_count: Self::NONE,
            closed_count: Self::NONE,
        }
    }

    /// Returns true if a path was found.
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Returns true if the search could not run at all.
    pub fn is_invalid(&self) -> bool {
        self.open_count < 0 || self.closed_count < 0
    }
}

impl From<SearchOutcome> for PathReport {
    fn from(outcome: SearchOutcome) -> Self {
        let (length, path) = match outcome.found {
            Some(found) => (found.length, found.steps),
            None => (Self::NONE as f64, Path::default()),
        };

        Self {
            length,
            path,
            open_count: outcome.open_count as i64,
            closed_count: outcome.closed_count as i64,
        }
    }
}

impl From<Result<SearchOutcome, AStarError>> for PathReport {
    fn from(result: Result<SearchOutcome, AStarError>) -> Self {
        match result {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                if !e.is_invalid_parameters() {
                    log::error!("path search failed: {}", e);
                }
                Self::invalid()
            }
        }
    }
}
