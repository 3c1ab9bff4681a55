//! Geometric utility functions for distance calculations and spatial operations.

use geo::{Contains, Coord, LineString, Point, Polygon};
use ndarray::Array1;

/// Squared Euclidean distance between two points of the plane.
pub fn distance_squared(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    (a - b).mapv(|x| x.powi(2)).sum()
}

/// Euclidean distance between two points of the plane.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    distance_squared(a, b).sqrt()
}

/// Unit vector pointing along `heading` (radians, counter-clockwise from +x).
pub fn heading_vector(heading: f32) -> Array1<f32> {
    Array1::from_vec(vec![heading.cos(), heading.sin()])
}

/// Wraps an angle into `[-π, π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU) - std::f32::consts::PI
}

/// Top-down view of a perspective frustum: a triangle with its apex at `origin`,
/// extending `depth` along `axis` with the given half-angle.
pub fn frustum_triangle(origin: &Array1<f32>, axis: f32, half_angle: f32, depth: f32) -> Polygon<f32> {
    let half_width = depth * half_angle.tan();
    let forward = heading_vector(axis) * depth;
    let side = heading_vector(axis + std::f32::consts::FRAC_PI_2) * half_width;

    let apex = Coord {
        x: origin[0],
        y: origin[1],
    };
    let left = Coord {
        x: origin[0] + forward[0] + side[0],
        y: origin[1] + forward[1] + side[1],
    };
    let right = Coord {
        x: origin[0] + forward[0] - side[0],
        y: origin[1] + forward[1] - side[1],
    };

    Polygon::new(LineString::from(vec![apex, left, right, apex]), vec![])
}

/// Checks whether a point lies strictly inside a polygon.
pub fn polygon_contains(polygon: &Polygon<f32>, point: &Array1<f32>) -> bool {
    polygon.contains(&Point::new(point[0], point[1]))
}
