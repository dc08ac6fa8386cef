//! Geometry kernel shared by the track builder and the vehicle model.
//!
//! All angles are in radians and, unless noted otherwise, normalized to
//! `[0, 2π)`. Degenerate inputs produce sentinel outputs instead of
//! errors: [`line_intersection`] returns [`NAN_VEC2`] for parallel lines
//! and [`slope_intercept`] returns an `f32::MAX` slope for vertical
//! segments. Callers treat these sentinels as "ignore this candidate".

use std::f32::consts::{PI, TAU};

use glam::Vec2;

pub mod rand_table;

/// Sentinel returned by [`line_intersection`] for parallel lines.
pub const NAN_VEC2: Vec2 = Vec2::new(f32::NAN, f32::NAN);

/// Returns true if `angle` lies in the shorter circular arc from `first`
/// to `second`.
///
/// The arc is half-open: the `first` endpoint is included, the `second`
/// is not. Wraparound is handled by rotating the longer arc through 2π
/// whenever the naive span exceeds π.
#[must_use]
pub fn angle_between(angle: f32, first: f32, second: f32) -> bool {
    let (mut first, mut second) = if first > second {
        (second, first)
    } else {
        (first, second)
    };

    if second - first > PI {
        (first, second) = (second, first + TAU);
    }

    if first <= angle && angle < second {
        return true;
    }

    let angle = angle + TAU;
    first <= angle && angle < second
}

/// Writes the angle of `(point - position)` for each point, in `[0, 2π)`.
pub fn relative_angles(points: &[Vec2], position: Vec2, out: &mut [f32]) {
    for (point, angle) in points.iter().zip(out) {
        let delta = *point - position;
        *angle = f32::atan2(delta.y, delta.x).rem_euclid(TAU);
    }
}

/// Approximate variant of [`relative_angles`] that avoids trigonometry.
///
/// Produces pseudo-angles that agree with the exact variant in angular
/// ORDER but not in magnitude. Suitable only for sorting points by
/// bearing in hot loops.
pub fn relative_angles_fast(points: &[Vec2], position: Vec2, out: &mut [f32]) {
    for (point, angle) in points.iter().zip(out) {
        let delta = *point - position;
        *angle = pseudo_angle(delta.x, delta.y);
    }
}

/// Monotonic stand-in for `atan2` on the unit circle.
///
/// Maps a direction to `[0, 6.28)` preserving circular order; the value
/// itself is not an angle.
#[must_use]
pub fn pseudo_angle(dx: f32, dy: f32) -> f32 {
    let p = dx / (dx.abs() + dy.abs());
    (if dy < 0.0 { 3.0 + p } else { 1.0 - p }) * 1.57
}

/// Writes `count` angles evenly spaced by `2π/count` starting at
/// `body_angle`, each reduced into `[0, 2π)`.
#[expect(clippy::cast_possible_truncation)]
pub fn vector_angles(count: usize, body_angle: f64, out: &mut [f32]) {
    let step = f64::from(TAU) / count as f64;
    let mut angle = 0.0f64;
    for slot in out.iter_mut().take(count) {
        *slot = ((body_angle + angle) % f64::from(TAU)) as f32;
        angle += step;
    }
}

/// Returns the slope and intercept of the line through two points, as
/// `(slope, intercept)`.
///
/// Vertical segments return the `(f32::MAX, -f32::MAX)` sentinel;
/// callers must special-case it rather than dividing. Horizontal
/// segments return a slope of exactly 0.
#[must_use]
pub fn slope_intercept(v1: Vec2, v2: Vec2) -> Vec2 {
    if v1.x - v2.x == 0.0 {
        return Vec2::new(f32::MAX, -f32::MAX);
    }
    if v1.y - v2.y == 0.0 {
        return Vec2::new(0.0, v1.y);
    }

    let slope = (v2.y - v1.y) / (v2.x - v1.x);
    Vec2::new(slope, v1.y - slope * v1.x)
}

/// Returns the intersection of the infinite lines through `(a, b)` and
/// `(c, d)`, or [`NAN_VEC2`] when the lines are parallel.
#[must_use]
pub fn line_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Vec2 {
    let delta_ab = b - a;
    let delta_cd = d - c;
    let denominator = delta_ab.perp_dot(delta_cd);
    if denominator == 0.0 {
        return NAN_VEC2;
    }

    let delta_ac = c - a;
    let t = delta_ac.perp_dot(delta_cd) / denominator;
    a + delta_ab * t
}

/// Distance from `point` to the infinite line through `start` and `end`.
#[must_use]
pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let a = end.y - start.y;
    let b = start.x - end.x;
    let c = a * start.x + b * start.y;

    (a * point.x + b * point.y - c).abs() / (a * a + b * b).sqrt()
}
