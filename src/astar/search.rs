// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use crate::{distance, AStarError, Graph, Path, Point, PointId, RouteId, Step};

/// Element of the open and closed sets.
#[derive(Debug, Clone)]
struct SearchNode {
    point: PointId,
    route: Option<RouteId>,
    g: f64,
    h: f64,
}

impl SearchNode {
    #[inline]
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Entry of the priority queue. Entries whose `seq` no longer matches
/// the open set are stale and skipped when popped.
#[derive(Debug, Clone)]
struct QueueItem {
    point: PointId,
    score: f64,
    seq: u64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores (and earlier insertions on ties) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Path found by [find_path](crate::find_path).
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    /// Sum of lengths of all routes on the path, in kilometers.
    pub length: f64,
    pub steps: Path,
}

/// Result of a search with valid parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The shortest path, or `None` if the destination is unreachable from the origin.
    pub found: Option<FoundPath>,

    /// Number of points left in the open set when the search has finished.
    pub open_count: usize,

    /// Number of points expanded during the search, including the destination.
    pub closed_count: usize,
}

/// State of a [Search] after a call to [Search::step].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// A point has been expanded and the search may continue.
    Running,

    /// The destination has been reached.
    Found(FoundPath),

    /// The open set is empty and the destination was never reached.
    Exhausted,
}

/// A single run of the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// over a [Graph], advanced one expansion at a time with [Search::step].
///
/// Points are expanded in the order of increasing `g + h`, where `g` is the length
/// of the best known path from the origin and `h` is the great-circle distance to
/// the destination. Among points with equal scores, the one which entered
/// (or was last updated in) the open set first is expanded first.
///
/// Expanded points are never re-opened, which is correct as route lengths are
/// non-negative and great-circle distance never overestimates the remaining cost.
#[derive(Debug)]
pub struct Search<'a> {
    g: &'a Graph,
    destination: &'a Point,
    queue: BinaryHeap<QueueItem>,
    open: HashMap<PointId, (u64, SearchNode)>,
    closed: HashMap<PointId, SearchNode>,
    next_seq: u64,
    finished: Option<SearchState>,
}

impl<'a> Search<'a> {
    /// Prepares a search between two points of a graph.
    ///
    /// Fails with [AStarError::EmptyGraph] or [AStarError::InvalidReference]
    /// if the query can't be answered.
    pub fn new(g: &'a Graph, origin: &PointId, destination: &PointId) -> Result<Self, AStarError> {
        if g.is_empty() {
            return Err(AStarError::EmptyGraph);
        }

        let origin = g
            .get_point(origin)
            .ok_or_else(|| AStarError::InvalidReference(origin.clone()))?;

        let destination = g
            .get_point(destination)
            .ok_or_else(|| AStarError::InvalidReference(destination.clone()))?;

        let mut search = Self {
            g,
            destination,
            queue: BinaryHeap::default(),
            open: HashMap::default(),
            closed: HashMap::default(),
            next_seq: 0,
            finished: None,
        };

        search.push(SearchNode {
            point: origin.id.clone(),
            route: None,
            g: 0.0,
            h: distance(origin, destination),
        });

        Ok(search)
    }

    /// Number of points discovered, but not yet expanded.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Number of points already expanded.
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Expands the most promising point from the open set.
    ///
    /// Once [SearchState::Found] or [SearchState::Exhausted] is returned,
    /// further calls return the same state without doing any work.
    pub fn step(&mut self) -> Result<SearchState, AStarError> {
        if let Some(state) = &self.finished {
            return Ok(state.clone());
        }

        let state = match self.pop() {
            None => SearchState::Exhausted,
            Some(current) if current.point == self.destination.id => {
                let length = current.g;
                self.closed.insert(current.point.clone(), current.clone());
                let steps = self.reconstruct(&current)?;
                SearchState::Found(FoundPath { length, steps })
            }
            Some(current) => {
                self.expand(current)?;
                SearchState::Running
            }
        };

        if state != SearchState::Running {
            self.finished = Some(state.clone());
        }
        Ok(state)
    }

    /// Runs the search until the destination is reached or the open set is exhausted.
    pub fn run(mut self) -> Result<SearchOutcome, AStarError> {
        loop {
            match self.step()? {
                SearchState::Running => {}
                SearchState::Found(found) => return Ok(self.outcome(Some(found))),
                SearchState::Exhausted => return Ok(self.outcome(None)),
            }
        }
    }

    fn outcome(&self, found: Option<FoundPath>) -> SearchOutcome {
        SearchOutcome {
            found,
            open_count: self.open_len(),
            closed_count: self.closed_len(),
        }
    }

    fn push(&mut self, node: SearchNode) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.queue.push(QueueItem {
            point: node.point.clone(),
            score: node.f(),
            seq,
        });
        self.open.insert(node.point.clone(), (seq, node));
    }

    fn pop(&mut self) -> Option<SearchNode> {
        // Updating a node in the open set leaves its previous queue entry behind.
        while let Some(item) = self.queue.pop() {
            if self
                .open
                .get(&item.point)
                .is_some_and(|&(seq, _)| seq == item.seq)
            {
                return self.open.remove(&item.point).map(|(_, node)| node);
            }
        }
        None
    }

    fn expand(&mut self, current: SearchNode) -> Result<(), AStarError> {
        let g = self.g;
        self.closed.insert(current.point.clone(), current.clone());

        for route in g.routes_from(&current.point) {
            let neighbor_id = route
                .other_end(&current.point)
                .ok_or_else(|| AStarError::Inconsistent(current.point.clone()))?;

            if self.closed.contains_key(neighbor_id) {
                continue;
            }

            let neighbor = g
                .get_point(neighbor_id)
                .ok_or_else(|| AStarError::Inconsistent(neighbor_id.clone()))?;

            let neighbor_g = current.g + route.length;
            let neighbor_h = distance(neighbor, self.destination);

            // Only replace an open node if this is a strictly better way to it
            if let Some((_, existing)) = self.open.get(neighbor_id) {
                if neighbor_g + neighbor_h >= existing.f() {
                    continue;
                }
            }

            self.push(SearchNode {
                point: neighbor_id.clone(),
                route: Some(route.id.clone()),
                g: neighbor_g,
                h: neighbor_h,
            });
        }

        Ok(())
    }

    fn reconstruct(&self, last: &SearchNode) -> Result<Path, AStarError> {
        let mut path = Vec::default();
        let mut node = last;

        loop {
            path.push(Step {
                route: node.route.clone(),
                point: node.point.clone(),
            });

            let Some(route_id) = &node.route else {
                break;
            };

            let before = self
                .g
                .get_route(route_id)
                .and_then(|route| route.other_end(&node.point))
                .ok_or_else(|| AStarError::Inconsistent(node.point.clone()))?;

            node = self
                .closed
                .get(before)
                .ok_or_else(|| AStarError::Inconsistent(before.clone()))?;
        }

        path.reverse();
        Ok(path)
    }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest path between two points in the provided graph.
///
/// Returns an [AStarError] if the graph is empty or either point doesn't exist.
/// An unreachable destination is reported with [SearchOutcome::found] set to `None`.
pub fn find_path(
    g: &Graph,
    origin: &PointId,
    destination: &PointId,
) -> Result<SearchOutcome, AStarError> {
    log::debug!("searching for a path from {} to {}", origin, destination);

    let outcome = Search::new(g, origin, destination)?.run()?;

    match &outcome.found {
        Some(found) => log::debug!(
            "found a {} km path from {} to {} with {} steps (open: {}, closed: {})",
            found.length,
            origin,
            destination,
            found.steps.len(),
            outcome.open_count,
            outcome.closed_count,
        ),
        None => log::debug!(
            "no path from {} to {} (closed: {})",
            origin,
            destination,
            outcome.closed_count,
        ),
    }

    Ok(outcome)
}
