// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod report;
mod search;

pub use error::AStarError;
pub use report::PathReport;
pub use search::{find_path, FoundPath, Search, SearchOutcome, SearchState};
