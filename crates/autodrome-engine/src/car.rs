//! Kinematic vehicle model with raycast vision.
//!
//! The model is deliberately not a rigid bicycle model: the only
//! "dynamics" coupling is that heading integrates as
//! `steering * dt * speed / 6`, and that the achievable speed relaxes
//! toward `max_speed / (|steering_deg|^0.35 + 0.1)`, so sharper steering
//! means a lower ceiling instead of a hard clamp.
//!
//! Vision casts evenly spaced rays around the current heading against
//! the track boundary. Boundary point angles and ray angles are each
//! sorted once per update, then swept jointly in a single pass: each
//! boundary edge is matched to the rays whose angular sector it spans,
//! and per spanning ray the edge is intersected in slope-intercept form.
//! Rays with no candidate keep the zero vector, meaning "no hit".

use glam::Vec2;

use crate::{VisionCountError, math, track::Track};

/// Immutable kinematic snapshot of a [`Car`].
///
/// Used to seed progenitor resets and to record mid-episode checkpoint
/// states without cloning vision buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarState {
    pub position: Vec2,
    pub body_angle: f64,
    pub wheel_angle: f64,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Car {
    position: Vec2,
    body_angle: f64,
    speed: f32,
    wheel_angle: f64,

    vision_count: usize,
    vision_points: Vec<Vec2>,
    min_vision_lengths: Vec<f32>,
    /// Remaining time (seconds) before vision must be recomputed.
    vision_budget: f64,

    // sweep scratch, reused across updates
    point_angles: Vec<f32>,
    sorted_point_angles: Vec<(usize, f32)>,
    ray_angles: Vec<f32>,
    sorted_ray_angles: Vec<(usize, f32)>,
    ray_slope_intercepts: Vec<Vec2>,
    hits: Vec<Vec<Vec2>>,
}

impl Car {
    /// Footprint half-extents are `WIDTH / 2` across and `HEIGHT / 2`
    /// along the heading.
    pub const WIDTH: f32 = 2.0;
    pub const HEIGHT: f32 = 4.0;
    pub const MAX_SPEED: f32 = 40.0;
    pub const DEFAULT_VISION_COUNT: usize = 14;

    /// Acceleration when pushing in the direction of travel.
    const DRIVE_ACCEL: f32 = 30.0;
    /// Deceleration when braking against the direction of travel.
    const BRAKE_ACCEL: f32 = 60.0;
    /// Passive decay rate used by [`Car::stop`].
    const STOP_DECEL: f32 = 10.0;

    const MAX_WHEEL_ANGLE: f64 = 30.0 * std::f64::consts::PI / 180.0;
    const TURN_RATE: f64 = 3.0;
    const TURN_DECAY: f64 = 2.0;

    #[must_use]
    pub fn new(position: Vec2, body_angle: f64) -> Self {
        let mut car = Self {
            position,
            body_angle,
            speed: 0.0,
            wheel_angle: 0.0,
            vision_count: 0,
            vision_points: Vec::new(),
            min_vision_lengths: Vec::new(),
            vision_budget: 0.0,
            point_angles: Vec::new(),
            sorted_point_angles: Vec::new(),
            ray_angles: Vec::new(),
            sorted_ray_angles: Vec::new(),
            ray_slope_intercepts: Vec::new(),
            hits: Vec::new(),
        };
        car.set_vision_count(Self::DEFAULT_VISION_COUNT)
            .expect("default vision count is valid");
        car
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn body_angle(&self) -> f64 {
        self.body_angle
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn wheel_angle(&self) -> f64 {
        self.wheel_angle
    }

    #[must_use]
    pub fn vision_count(&self) -> usize {
        self.vision_count
    }

    /// Latest vision hit points; the zero vector means "no hit".
    #[must_use]
    pub fn vision_points(&self) -> &[Vec2] {
        &self.vision_points
    }

    /// Per-ray minimum clearances derived from the footprint.
    #[must_use]
    pub fn min_vision_lengths(&self) -> &[f32] {
        &self.min_vision_lengths
    }

    /// Reconfigures the number of vision rays and derives the per-ray
    /// minimum clearances from the footprint.
    pub fn set_vision_count(&mut self, count: usize) -> Result<(), VisionCountError> {
        if count == 0 {
            return Err(VisionCountError);
        }
        self.vision_count = count;
        self.vision_points = vec![Vec2::ZERO; count];
        self.min_vision_lengths = min_vision_lengths(count);
        self.ray_angles = vec![0.0; count];
        self.sorted_ray_angles = vec![(0, 0.0); count];
        self.ray_slope_intercepts = vec![Vec2::ZERO; count];
        self.hits = vec![Vec::new(); count];
        self.vision_budget = 0.0;
        Ok(())
    }

    /// Kinematic snapshot of this car.
    #[must_use]
    pub fn state(&self) -> CarState {
        CarState {
            position: self.position,
            body_angle: self.body_angle,
            wheel_angle: self.wheel_angle,
            speed: self.speed,
        }
    }

    /// Restores a kinematic snapshot; vision is recomputed on the next
    /// scheduled update.
    pub fn apply_state(&mut self, state: &CarState) {
        self.position = state.position;
        self.body_angle = state.body_angle;
        self.wheel_angle = state.wheel_angle;
        self.speed = state.speed;
        self.vision_budget = 0.0;
    }

    /// Resets to the track's progenitor pose: corridor midpoint at the
    /// track start, heading along the first boundary segment, at rest.
    pub fn reset_on(&mut self, track: &Track) {
        let boundary = track.boundary();
        let n = boundary.len();
        self.position = (boundary[1] + boundary[n - 2]) / 2.0;
        let along = boundary[2] - boundary[1];
        self.body_angle = f64::from(f32::atan2(along.y, along.x));
        self.wheel_angle = 0.0;
        self.speed = 0.0;
        self.vision_budget = 0.0;
        self.update_vision(track);
    }

    /// Accelerates forward, then relaxes speed toward the
    /// steering-dependent ceiling.
    pub fn speed_up(&mut self, dt: f32) {
        if self.speed >= 0.0 {
            self.speed += Self::DRIVE_ACCEL * dt;
        } else {
            self.speed += Self::BRAKE_ACCEL * dt;
        }

        let target = self
            .speed
            .min(self.steering_speed_ceiling())
            .min(Self::MAX_SPEED);
        self.speed += (target - self.speed) * dt * 2.0;
    }

    /// Accelerates backward, mirroring [`Car::speed_up`].
    pub fn speed_down(&mut self, dt: f32) {
        if self.speed <= 0.0 {
            self.speed -= Self::DRIVE_ACCEL * dt;
        } else {
            self.speed -= Self::BRAKE_ACCEL * dt;
        }

        let target = self
            .speed
            .max(-self.steering_speed_ceiling())
            .max(-Self::MAX_SPEED);
        self.speed += (target - self.speed) * dt * 2.0;
    }

    /// Decays speed linearly toward zero, clamped at the crossing.
    pub fn stop(&mut self, dt: f32) {
        if self.speed > 0.0 {
            self.speed = (self.speed - Self::STOP_DECEL * dt).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + Self::STOP_DECEL * dt).min(0.0);
        }
    }

    /// Steers left; steering authority shrinks with speed.
    pub fn turn_left(&mut self, dt: f32) {
        self.wheel_angle -= (Self::TURN_RATE - f64::from(self.speed.abs() / Self::MAX_SPEED))
            * f64::from(dt);
        self.wheel_angle = self.wheel_angle.max(-Self::MAX_WHEEL_ANGLE);
    }

    /// Steers right; steering authority shrinks with speed.
    pub fn turn_right(&mut self, dt: f32) {
        self.wheel_angle += (Self::TURN_RATE - f64::from(self.speed.abs() / Self::MAX_SPEED))
            * f64::from(dt);
        self.wheel_angle = self.wheel_angle.min(Self::MAX_WHEEL_ANGLE);
    }

    /// Decays steering linearly toward zero, clamped at the crossing.
    pub fn stop_turning(&mut self, dt: f32) {
        if self.wheel_angle > 0.0 {
            self.wheel_angle = (self.wheel_angle - Self::TURN_DECAY * f64::from(dt)).max(0.0);
        } else if self.wheel_angle < 0.0 {
            self.wheel_angle = (self.wheel_angle + Self::TURN_DECAY * f64::from(dt)).min(0.0);
        }
    }

    /// Integrates one tick of motion: heading by
    /// `steering * dt * speed / 6`, then translation along the heading.
    #[expect(clippy::cast_possible_truncation)]
    pub fn advance(&mut self, dt: f32) {
        if self.speed == 0.0 {
            return;
        }

        self.body_angle += self.wheel_angle * f64::from(dt) * f64::from(self.speed) / 6.0;
        self.position += Vec2::from_angle(self.body_angle as f32) * self.speed * dt;
    }

    /// Maximum speed magnitude achievable at the current steering angle.
    #[expect(clippy::cast_possible_truncation)]
    fn steering_speed_ceiling(&self) -> f32 {
        let steering_deg = self.wheel_angle.abs().to_degrees();
        (f64::from(Self::MAX_SPEED) / (steering_deg.powf(0.35) + 0.1)) as f32
    }

    /// True if any vision ray reports a hit closer than that ray's
    /// minimum clearance.
    #[must_use]
    pub fn is_collision(&self) -> bool {
        self.vision_points
            .iter()
            .zip(&self.min_vision_lengths)
            .any(|(hit, &min_len)| {
                let distance = self.position.distance(*hit);
                distance > 0.0 && distance < min_len
            })
    }

    /// Recomputes vision only when the adaptive budget has elapsed.
    ///
    /// The budget estimates how long it would take, at full acceleration,
    /// to close the smallest slack between a ray hit and that ray's
    /// minimum clearance. A non-positive estimate forces an immediate
    /// recomputation.
    pub fn update_vision_budgeted(&mut self, dt: f64, track: &Track) {
        if self.vision_budget - dt <= 0.0 {
            self.update_vision(track);
            self.vision_budget = self.vision_reaction_time();
        } else {
            self.vision_budget -= dt;
        }
    }

    fn vision_reaction_time(&self) -> f64 {
        let mut min_slack = f32::MAX;
        for (hit, &min_len) in self.vision_points.iter().zip(&self.min_vision_lengths) {
            let slack = self.position.distance(*hit) - min_len;
            if slack < min_slack {
                min_slack = slack;
            }
        }

        let v = f64::from(self.speed);
        let v_max = f64::from(Self::MAX_SPEED);
        let accel = f64::from(Self::DRIVE_ACCEL);
        (v_max - v) / accel
            + (f64::from(min_slack) - (v_max * v_max - v * v) / (2.0 * accel)) / v_max
    }

    /// Casts all vision rays against the track boundary.
    #[expect(clippy::cast_possible_truncation)]
    pub fn update_vision(&mut self, track: &Track) {
        let boundary = track.boundary();
        let n = boundary.len();
        if self.point_angles.len() != n {
            self.point_angles = vec![0.0; n];
            self.sorted_point_angles = vec![(0, 0.0); n];
        }

        let body_angle = self.body_angle.rem_euclid(f64::from(std::f32::consts::TAU));

        math::relative_angles(boundary, self.position, &mut self.point_angles);
        for (i, pair) in self.sorted_point_angles.iter_mut().enumerate() {
            *pair = (i, self.point_angles[i]);
        }
        self.sorted_point_angles.sort_by(|a, b| a.1.total_cmp(&b.1));

        math::vector_angles(self.vision_count, body_angle, &mut self.ray_angles);
        for (i, pair) in self.sorted_ray_angles.iter_mut().enumerate() {
            *pair = (i, self.ray_angles[i]);
        }
        self.sorted_ray_angles.sort_by(|a, b| a.1.total_cmp(&b.1));

        // rays in slope-intercept form, indexed by sorted position
        for (si, &(_, angle)) in self.ray_slope_intercepts.iter_mut().zip(&self.sorted_ray_angles) {
            let slope = (f64::from(angle).tan()) as f32;
            *si = Vec2::new(slope, self.position.y - slope * self.position.x);
        }

        // joint sweep: `t` walks boundary points by angle, `c` walks rays
        // by angle, `f` guards a full revolution of the ray index
        let mut c = 0usize;
        let mut t = 0usize;
        let mut f = 0usize;
        while t < n && f < self.vision_count + 1 {
            let prev_c = (c + self.vision_count - 1) % self.vision_count;
            if math::angle_between(
                self.sorted_point_angles[t].1,
                self.sorted_ray_angles[prev_c].1,
                self.sorted_ray_angles[c].1,
            ) {
                let second = (self.sorted_point_angles[t].0 + 1) % n;
                let edge = track.slope_intercepts()[second];
                let entry_c = c;
                let mut scanned = 0;
                while scanned < self.vision_count
                    && math::angle_between(
                        self.sorted_ray_angles[c].1,
                        self.sorted_point_angles[t].1,
                        self.point_angles[second],
                    )
                {
                    let ray = self.ray_slope_intercepts[c];
                    // equal slopes never intersect; this also skips the
                    // vertical-segment slope sentinel
                    if ray.x - edge.x != 0.0 && edge.x != f32::MAX {
                        let x = (edge.y - ray.y) / (ray.x - edge.x);
                        let y = edge.x * x + edge.y;
                        self.hits[self.sorted_ray_angles[c].0].push(Vec2::new(x, y));
                    }

                    c = (c + 1) % self.vision_count;
                    scanned += 1;
                }

                c = entry_c;
                t += 1;
            } else {
                c = (c + 1) % self.vision_count;
                f += 1;
            }
        }

        for (hit_candidates, vision_point) in self.hits.iter_mut().zip(&mut self.vision_points) {
            *vision_point = match hit_candidates.len() {
                0 => Vec2::ZERO,
                1 => hit_candidates[0],
                _ => {
                    let mut nearest = hit_candidates[0];
                    let mut min = self.position.distance(nearest);
                    for candidate in &hit_candidates[1..] {
                        let distance = self.position.distance(*candidate);
                        if distance < min {
                            min = distance;
                            nearest = *candidate;
                        }
                    }
                    nearest
                }
            };
            hit_candidates.clear();
        }
    }
}

/// Distance from the footprint center to the footprint edge along each
/// ray direction, with ray 0 pointing along the vehicle's long axis.
fn min_vision_lengths(count: usize) -> Vec<f32> {
    let corners = [
        Vec2::new(Car::WIDTH / 2.0, -Car::HEIGHT / 2.0),
        Vec2::new(Car::WIDTH / 2.0, Car::HEIGHT / 2.0),
        Vec2::new(-Car::WIDTH / 2.0, Car::HEIGHT / 2.0),
        Vec2::new(-Car::WIDTH / 2.0, -Car::HEIGHT / 2.0),
    ];

    let mut corner_angles = [0.0f32; 4];
    math::relative_angles(&corners, Vec2::ZERO, &mut corner_angles);

    // the footprint's long axis is +y in the local frame, so the forward
    // ray starts at 90 degrees
    let mut ray_angles = vec![0.0f32; count];
    math::vector_angles(count, std::f64::consts::FRAC_PI_2, &mut ray_angles);

    let mut result = vec![0.0f32; count];
    for (length, &angle) in result.iter_mut().zip(&ray_angles) {
        for edge in 0..corners.len() {
            let next = (edge + 1) % corners.len();
            if math::angle_between(angle, corner_angles[edge], corner_angles[next]) {
                let direction = Vec2::from_angle(angle);
                let hit =
                    math::line_intersection(Vec2::ZERO, direction, corners[edge], corners[next]);
                if hit.x.is_finite() {
                    *length = hit.length();
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 30.0;

    fn straight_track() -> Track {
        let centerline: Vec<Vec2> =
            (0..6u8).map(|i| Vec2::new(f32::from(i) * 100.0, 0.0)).collect();
        Track::new(&centerline, 10.0, 25.0, 3).unwrap()
    }

    mod kinematics {
        use super::*;

        #[test]
        fn speed_never_exceeds_the_straight_line_ceiling() {
            let mut car = Car::new(Vec2::ZERO, 0.0);
            for _ in 0..2000 {
                car.speed_up(DT);
                assert!(car.speed() <= Car::MAX_SPEED / 0.1 + 1.0);
            }
            // with zero steering the ceiling is max_speed / 0.1; the
            // asymptotic speed exceeds MAX_SPEED by design
            assert!(car.speed() > Car::MAX_SPEED);
        }

        #[test]
        fn steering_stays_within_the_envelope() {
            let mut car = Car::new(Vec2::ZERO, 0.0);
            for _ in 0..500 {
                car.turn_right(DT);
                assert!(car.wheel_angle() <= Car::MAX_WHEEL_ANGLE + 1e-9);
            }
            for _ in 0..1000 {
                car.turn_left(DT);
                assert!(car.wheel_angle() >= -Car::MAX_WHEEL_ANGLE - 1e-9);
            }
        }

        #[test]
        fn sharp_steering_lowers_the_achievable_speed() {
            let mut straight = Car::new(Vec2::ZERO, 0.0);
            let mut turning = Car::new(Vec2::ZERO, 0.0);
            for _ in 0..300 {
                turning.turn_right(DT);
            }
            for _ in 0..600 {
                straight.speed_up(DT);
                turning.speed_up(DT);
            }
            assert!(turning.speed() < straight.speed());
        }

        #[test]
        fn stop_clamps_at_zero_crossing() {
            let mut car = Car::new(Vec2::ZERO, 0.0);
            for _ in 0..30 {
                car.speed_up(DT);
            }
            for _ in 0..10_000 {
                car.stop(DT);
            }
            assert_eq!(car.speed(), 0.0);
        }

        #[test]
        fn stop_turning_decays_to_exactly_zero() {
            let mut car = Car::new(Vec2::ZERO, 0.0);
            for _ in 0..100 {
                car.turn_left(DT);
            }
            for _ in 0..1000 {
                car.stop_turning(DT);
            }
            assert_eq!(car.wheel_angle(), 0.0);
        }

        #[test]
        fn advance_moves_along_the_heading() {
            let mut car = Car::new(Vec2::ZERO, 0.0);
            for _ in 0..60 {
                car.speed_up(DT);
                car.advance(DT);
            }
            assert!(car.position().x > 0.0);
            assert!(car.position().y.abs() < 1e-4);
        }

        #[test]
        fn advance_at_rest_is_a_no_op() {
            let mut car = Car::new(Vec2::new(3.0, 4.0), 1.0);
            car.advance(DT);
            assert_eq!(car.position(), Vec2::new(3.0, 4.0));
        }

        #[test]
        fn state_roundtrip() {
            let mut car = Car::new(Vec2::ZERO, 0.5);
            for _ in 0..30 {
                car.speed_up(DT);
                car.turn_right(DT);
                car.advance(DT);
            }
            let state = car.state();

            let mut other = Car::new(Vec2::ZERO, 0.0);
            other.apply_state(&state);
            assert_eq!(other.state(), state);
        }
    }

    mod clearances {
        use super::*;

        #[test]
        fn axis_rays_match_the_half_extents() {
            let lengths = min_vision_lengths(4);
            // ray 0 is forward (long axis), rays 1 and 3 are sideways
            assert!((lengths[0] - Car::HEIGHT / 2.0).abs() < 1e-3);
            assert!((lengths[1] - Car::WIDTH / 2.0).abs() < 1e-3);
            assert!((lengths[2] - Car::HEIGHT / 2.0).abs() < 1e-3);
            assert!((lengths[3] - Car::WIDTH / 2.0).abs() < 1e-3);
        }

        #[test]
        fn diagonal_rays_reach_at_most_the_corner_distance() {
            let corner_distance =
                Vec2::new(Car::WIDTH / 2.0, Car::HEIGHT / 2.0).length();
            for length in min_vision_lengths(32) {
                assert!(length > 0.0);
                assert!(length <= corner_distance + 1e-3);
            }
        }
    }

    mod vision {
        use super::*;

        #[test]
        fn reset_places_the_car_on_the_corridor_midline() {
            let track = straight_track();
            let mut car = Car::new(Vec2::ZERO, 0.0);
            car.reset_on(&track);
            assert_eq!(car.position(), Vec2::new(50.0, 0.0));
            assert!(car.body_angle().abs() < 1e-6);
            assert_eq!(car.speed(), 0.0);
            assert_eq!(car.wheel_angle(), 0.0);
        }

        #[test]
        fn sideways_rays_hit_the_corridor_walls() {
            let track = straight_track();
            // tilt the heading so no ray coincides with a boundary corner
            let mut car = Car::new(Vec2::new(150.0, 0.0), 0.3);
            car.set_vision_count(4).unwrap();
            car.update_vision(&track);

            let hits = car.vision_points();
            // rays 1 and 3 are perpendicular to the heading; the walls sit
            // 10 units away, foreshortened by the tilt
            let expected = 10.0 / 0.3f32.cos();
            assert!((car.position().distance(hits[1]) - expected).abs() < 1e-2);
            assert!((car.position().distance(hits[3]) - expected).abs() < 1e-2);
            // rays 0 and 2 graze along the corridor at a shallow angle
            let grazing = 10.0 / 0.3f32.sin();
            assert!((car.position().distance(hits[0]) - grazing).abs() < 0.1);
            assert!((car.position().distance(hits[2]) - grazing).abs() < 0.1);
        }

        #[test]
        fn no_collision_on_the_midline() {
            let track = straight_track();
            let mut car = Car::new(Vec2::ZERO, 0.0);
            car.reset_on(&track);
            assert!(!car.is_collision());
        }

        #[test]
        fn collision_when_hugging_a_wall() {
            let track = straight_track();
            let mut car = Car::new(Vec2::ZERO, 0.0);
            car.reset_on(&track);

            let mut state = car.state();
            state.position.y = 9.5; // half a unit from the upper wall
            car.apply_state(&state);
            car.update_vision(&track);
            assert!(car.is_collision());
        }

        #[test]
        fn budgeted_update_reuses_stale_vision_within_the_budget() {
            let track = straight_track();
            let mut car = Car::new(Vec2::ZERO, 0.0);
            car.reset_on(&track);
            car.update_vision_budgeted(f64::from(DT), &track);
            let before = car.vision_points().to_vec();

            // a few ticks of driving stay well inside the ~0.9s budget
            // earned on the midline, so the hit points are not rewritten
            for _ in 0..5 {
                car.speed_up(DT);
                car.advance(DT);
                car.update_vision_budgeted(f64::from(DT), &track);
            }
            assert_eq!(car.vision_points(), before.as_slice());

            for _ in 0..40 {
                car.speed_up(DT);
                car.advance(DT);
                car.update_vision_budgeted(f64::from(DT), &track);
            }
            assert_ne!(car.vision_points(), before.as_slice());
        }

        #[test]
        fn vision_count_must_be_positive() {
            let mut car = Car::new(Vec2::ZERO, 0.0);
            assert_eq!(car.set_vision_count(0).unwrap_err(), VisionCountError);
        }
    }
}
