//! Track geometry: corridor boundary and checkpoint gates.
//!
//! A track is built once from an ordered centerline polyline. Each
//! centerline segment contributes a corridor cross-section: its midpoint
//! offset by the half-width to both sides. Left offsets occupy the front
//! half of the boundary array and right offsets the back half in reverse,
//! so the points at `i` and `len - 1 - i` always face each other across
//! the corridor.
//!
//! Checkpoint gates are cross-track segments spaced at least
//! `min_gate_spacing` apart along the reduced centerline. The gate list
//! is padded at the end with copies of the final cross-section so that
//! window-based training never indexes past the end.
//!
//! The track does not remember which gate an episode is at; callers own
//! their gate cursor and pass it to [`Track::on_gate`] by `&mut`. This
//! keeps a single `Track` shareable by reference across concurrently
//! simulated episodes.

use glam::Vec2;

use crate::{TrackError, math};

#[derive(Debug, Clone)]
pub struct Track {
    width: f32,
    min_gate_spacing: f32,
    step_width: usize,
    /// Input centerline, shifted so the second point is the origin.
    centerline: Vec<Vec2>,
    /// Reduced centerline: consecutive-segment midpoints.
    midline: Vec<Vec2>,
    boundary: Vec<Vec2>,
    /// Slope/intercept of boundary segment `(i - 1, i)`, stored at `i`;
    /// the wraparound segment is stored at 0.
    slope_intercepts: Vec<Vec2>,
    gates: Vec<(Vec2, Vec2)>,
    gate_centers: Vec<Vec2>,
}

impl Track {
    /// Builds a track corridor around `centerline`.
    ///
    /// `width` is the half-width of the corridor, `min_gate_spacing` the
    /// minimum arc length between checkpoint gates, and `step_width` the
    /// checkpoint-window width the gate list is padded for.
    pub fn new(
        centerline: &[Vec2],
        width: f32,
        min_gate_spacing: f32,
        step_width: usize,
    ) -> Result<Self, TrackError> {
        if width <= 0.0 {
            return Err(TrackError::NonPositiveWidth);
        }
        if min_gate_spacing <= 0.0 {
            return Err(TrackError::NonPositiveGateSpacing);
        }
        if centerline.len() < 3 {
            return Err(TrackError::TooFewPoints {
                found: centerline.len(),
            });
        }
        if step_width < 2 {
            return Err(TrackError::StepWidthTooSmall { found: step_width });
        }
        if let Some(index) = centerline.windows(2).position(|pair| pair[0] == pair[1]) {
            return Err(TrackError::DegenerateSegment { index });
        }

        let origin = centerline[1];
        let mut track = Self {
            width,
            min_gate_spacing,
            step_width,
            centerline: centerline.iter().map(|p| *p - origin).collect(),
            midline: Vec::new(),
            boundary: Vec::new(),
            slope_intercepts: Vec::new(),
            gates: Vec::new(),
            gate_centers: Vec::new(),
        };
        track.rebuild();

        // window arithmetic needs one full window plus the end sentinel
        let needed = step_width + 2;
        if track.gates.len() < needed {
            return Err(TrackError::NotEnoughGates {
                found: track.gates.len(),
                needed,
            });
        }
        Ok(track)
    }

    /// Corridor half-width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Changes the corridor width and rebuilds the boundary and gates.
    pub fn set_width(&mut self, width: f32) -> Result<(), TrackError> {
        if width <= 0.0 {
            return Err(TrackError::NonPositiveWidth);
        }
        self.width = width;
        self.rebuild();
        Ok(())
    }

    #[must_use]
    pub fn min_gate_spacing(&self) -> f32 {
        self.min_gate_spacing
    }

    /// Checkpoint-window width the gate list is padded for.
    #[must_use]
    pub fn step_width(&self) -> usize {
        self.step_width
    }

    /// Closed boundary polygon, left offsets first, right offsets
    /// mirrored in the back half.
    #[must_use]
    pub fn boundary(&self) -> &[Vec2] {
        &self.boundary
    }

    /// Reduced centerline (segment midpoints).
    #[must_use]
    pub fn midline(&self) -> &[Vec2] {
        &self.midline
    }

    /// Per-boundary-segment slope/intercepts, indexed by segment end.
    #[must_use]
    pub fn slope_intercepts(&self) -> &[Vec2] {
        &self.slope_intercepts
    }

    /// Checkpoint gate endpoint pairs, in track order.
    #[must_use]
    pub fn gates(&self) -> &[(Vec2, Vec2)] {
        &self.gates
    }

    /// Midpoints of the checkpoint gates.
    #[must_use]
    pub fn gate_centers(&self) -> &[Vec2] {
        &self.gate_centers
    }

    #[must_use]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Tests whether `position` is crossing the gate at `*cursor`.
    ///
    /// A cheap broad phase rejects positions farther from the gate center
    /// than the corridor width; the narrow phase measures the true
    /// distance to the gate segment against `tolerance`. On success the
    /// cursor advances by exactly one, wrapping past the last gate.
    ///
    /// # Panics
    ///
    /// Panics if `*cursor` is out of range.
    pub fn on_gate(&self, cursor: &mut usize, position: Vec2, tolerance: f32) -> bool {
        let (left, right) = self.gates[*cursor];

        if position.distance(self.gate_centers[*cursor]) > self.width {
            return false;
        }

        if math::distance_to_segment(position, left, right) < tolerance {
            *cursor = (*cursor + 1) % self.gates.len();
            return true;
        }

        false
    }

    fn rebuild(&mut self) {
        self.build_boundary();
        self.build_slope_intercepts();
        self.build_gates();
    }

    fn build_boundary(&mut self) {
        let points = &self.centerline;
        let n = points.len();
        let mut boundary = vec![Vec2::ZERO; (n - 1) * 2];
        let mut midline = Vec::with_capacity(n - 1);

        for i in 0..n - 1 {
            let half = (points[i + 1] - points[i]) / 2.0;
            let normal = (half.normalize() * self.width).perp();
            let mid = points[i] + half;
            boundary[i] = mid - normal;
            boundary[2 * (n - 1) - 1 - i] = mid + normal;
            midline.push(mid);
        }

        self.boundary = boundary;
        self.midline = midline;
    }

    fn build_slope_intercepts(&mut self) {
        let boundary = &self.boundary;
        let n = boundary.len();
        let mut slope_intercepts = vec![Vec2::ZERO; n];
        slope_intercepts[0] = math::slope_intercept(boundary[n - 1], boundary[0]);
        for i in 1..n {
            slope_intercepts[i] = math::slope_intercept(boundary[i - 1], boundary[i]);
        }
        self.slope_intercepts = slope_intercepts;
    }

    fn build_gates(&mut self) {
        let midline = &self.midline;
        let boundary = &self.boundary;
        let blen = boundary.len();

        let mut gates = Vec::new();
        let mut centers = Vec::new();
        let mut remainder = 0.0f32;

        for i in 1..midline.len().saturating_sub(1) {
            let segments = midline[i].distance(midline[i + 1]) / self.min_gate_spacing;
            let left_len = boundary[i].distance(boundary[i + 1]) / segments;
            let right_len = boundary[blen - 1 - i].distance(boundary[blen - 2 - i]) / segments;
            let left_step = (boundary[i + 1] - boundary[i]).normalize() * left_len;
            let right_step = (boundary[blen - 2 - i] - boundary[blen - 1 - i]).normalize() * right_len;

            let mut j = remainder;
            while j < segments {
                let left = boundary[i] + left_step * j;
                let right = boundary[blen - 1 - i] + right_step * j;
                gates.push((left, right));
                centers.push((left + right) / 2.0);
                j += 1.0;
            }

            // carry the fractional spacing left over into the next segment
            if remainder < segments {
                remainder = 1.0 - (segments - remainder) % 1.0;
            } else {
                remainder -= segments;
            }
        }

        // lookahead reserve: window arithmetic near the track end must
        // never index past the gate list
        let last_left = boundary[blen / 2 - 1];
        let last_right = boundary[blen / 2];
        for _ in 0..self.step_width.saturating_sub(2) {
            gates.push((last_left, last_right));
            centers.push((last_left + last_right) / 2.0);
        }

        self.gates = gates;
        self.gate_centers = centers;
    }
}
