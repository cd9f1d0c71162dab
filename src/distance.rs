// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Point;

/// Mean radius of Earth, in kilometers.
pub const EARTH_RADIUS: f64 = 6371.0;

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the [spherical law of cosines](https://en.wikipedia.org/wiki/Great-circle_distance).
/// Returns the result in kilometers.
pub fn earth_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();

    // acos is NaN outside of [-1, 1], which rounding can push us into
    EARTH_RADIUS * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Calculates the great-circle distance between two [Points](Point), in kilometers.
///
/// Points with the same id are always 0 km apart.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    if p1.id == p2.id {
        return 0.0;
    }
    earth_distance(p1.lat, p1.lon, p2.lat, p2.lon)
}
