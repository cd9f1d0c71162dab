// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{Point, PointId, Route, RouteId};

/// Minimum number of characters in a [Point] name.
const MIN_POINT_NAME_LEN: usize = 2;

/// Reasons for rejecting a [Point] or a [Route] in [Graph::insert_point]
/// or [Graph::insert_route].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("point has an invalid id")]
    InvalidPointId,

    #[error("point {0} already exists")]
    DuplicatePoint(PointId),

    #[error("point {id} has a name shorter than 2 characters: {name:?}")]
    InvalidName { id: PointId, name: String },

    #[error("point {id} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { id: PointId, lat: f64, lon: f64 },

    #[error("route has an invalid id")]
    InvalidRouteId,

    #[error("route {0} already exists")]
    DuplicateRoute(RouteId),

    #[error("route {route} references unknown point {point}")]
    UnknownEnd { route: RouteId, point: PointId },

    #[error("route {route} has invalid length {length}")]
    InvalidLength { route: RouteId, length: f64 },
}

/// Represents a map as a set of [Points](Point) and undirected [Routes](Route)
/// between them.
///
/// Every route end is guaranteed to reference a point in the graph.
/// Points and routes are kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    points: Vec<Point>,
    routes: Vec<Route>,
    point_index: HashMap<PointId, usize>,
    route_index: HashMap<RouteId, usize>,

    /// Indices of routes touching a given point, in insertion order.
    adjacency: HashMap<PointId, Vec<usize>>,
}

impl Graph {
    /// Returns the number of points in the graph.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of routes in the graph.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if there are no points in the graph.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Removes all points and routes.
    pub fn clear(&mut self) {
        self.points.clear();
        self.routes.clear();
        self.point_index.clear();
        self.route_index.clear();
        self.adjacency.clear();
    }

    /// Returns an iterator over all [Points](Point) in the graph.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Returns an iterator over all [Routes](Route) in the graph.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Retrieves a [Point] with the provided id.
    pub fn get_point(&self, id: &PointId) -> Option<&Point> {
        self.point_index.get(id).map(|&idx| &self.points[idx])
    }

    /// Retrieves a [Route] with the provided id.
    pub fn get_route(&self, id: &RouteId) -> Option<&Route> {
        self.route_index.get(id).map(|&idx| &self.routes[idx])
    }

    /// Returns all [Routes](Route) with an end at the given point.
    /// A route connecting a point with itself is returned once.
    pub fn routes_from<'a>(&'a self, point: &PointId) -> impl Iterator<Item = &'a Route> + 'a {
        self.adjacency
            .get(point)
            .map(|indices| indices.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&idx| &self.routes[idx])
    }

    /// Adds a new [Point] to the graph.
    pub fn insert_point(&mut self, point: Point) -> Result<(), GraphError> {
        if !point.is_valid() {
            return Err(GraphError::InvalidPointId);
        }

        if point.name.chars().count() < MIN_POINT_NAME_LEN {
            return Err(GraphError::InvalidName {
                id: point.id,
                name: point.name,
            });
        }

        if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lon) {
            return Err(GraphError::InvalidCoordinates {
                id: point.id,
                lat: point.lat,
                lon: point.lon,
            });
        }

        match self.point_index.entry(point.id.clone()) {
            Entry::Occupied(e) => Err(GraphError::DuplicatePoint(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(self.points.len());
                self.points.push(point);
                Ok(())
            }
        }
    }

    /// Adds a new [Route] to the graph. Both ends must already be in the graph.
    pub fn insert_route(&mut self, route: Route) -> Result<(), GraphError> {
        if !route.is_valid() {
            return Err(GraphError::InvalidRouteId);
        }

        if !(route.length.is_finite() && route.length >= 0.0) {
            return Err(GraphError::InvalidLength {
                route: route.id,
                length: route.length,
            });
        }

        if let Some(end) = route
            .ends
            .iter()
            .find(|&end| !self.point_index.contains_key(end))
        {
            return Err(GraphError::UnknownEnd {
                route: route.id.clone(),
                point: end.clone(),
            });
        }

        if self.route_index.contains_key(&route.id) {
            return Err(GraphError::DuplicateRoute(route.id));
        }

        let idx = self.routes.len();
        self.route_index.insert(route.id.clone(), idx);
        self.adjacency
            .entry(route.ends[0].clone())
            .or_default()
            .push(idx);
        if route.ends[1] != route.ends[0] {
            self.adjacency
                .entry(route.ends[1].clone())
                .or_default()
                .push(idx);
        }
        self.routes.push(route);
        Ok(())
    }
}
