//! The gene alphabet: action codes and the maneuvers they decode to.

use autodrome_engine::Car;

/// Number of distinct action codes a gene can hold.
pub const ACTION_COUNT: u8 = 9;

/// A single control primitive applied to the car for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    Stop,
    SpeedUp,
    SpeedDown,
    TurnLeft,
    TurnRight,
    StopTurning,
}

impl Maneuver {
    fn apply(self, car: &mut Car, dt: f32) {
        match self {
            Self::Stop => car.stop(dt),
            Self::SpeedUp => car.speed_up(dt),
            Self::SpeedDown => car.speed_down(dt),
            Self::TurnLeft => car.turn_left(dt),
            Self::TurnRight => car.turn_right(dt),
            Self::StopTurning => car.stop_turning(dt),
        }
    }
}

/// Ordered maneuver pairs for action codes `0..ACTION_COUNT`.
///
/// Code 0 coasts, 1–2 drive straight, 3–4 steer while coasting, 5–8
/// combine steering with throttle. Pair order matters: both maneuvers
/// run within the same tick against the same `dt`.
const ACTION_TABLE: [[Maneuver; 2]; ACTION_COUNT as usize] = [
    [Maneuver::StopTurning, Maneuver::Stop],
    [Maneuver::SpeedUp, Maneuver::StopTurning],
    [Maneuver::SpeedDown, Maneuver::StopTurning],
    [Maneuver::TurnLeft, Maneuver::Stop],
    [Maneuver::TurnRight, Maneuver::Stop],
    [Maneuver::TurnLeft, Maneuver::SpeedUp],
    [Maneuver::TurnRight, Maneuver::SpeedUp],
    [Maneuver::TurnLeft, Maneuver::SpeedDown],
    [Maneuver::TurnRight, Maneuver::SpeedDown],
];

/// Applies both maneuvers of action `code` to `car` for one tick.
///
/// # Panics
///
/// Panics if `code >= ACTION_COUNT`.
pub fn apply_action(code: u8, car: &mut Car, dt: f32) {
    for maneuver in ACTION_TABLE[usize::from(code)] {
        maneuver.apply(car, dt);
    }
}

/// Blends two parent action codes into a compromise code.
///
/// Opposing pairs cancel to coasting; agreeing throttle+steer pairs
/// reduce to their common component. Sums with no defined compromise
/// fall back to 0.
#[must_use]
pub fn blend_actions(first: u8, second: u8) -> u8 {
    match first + second {
        11 => 1,
        15 => 2,
        12 => 3,
        14 => 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    const DT: f32 = 1.0 / 30.0;

    #[test]
    fn throttle_codes_change_speed() {
        let mut car = Car::new(Vec2::ZERO, 0.0);
        apply_action(1, &mut car, DT);
        assert!(car.speed() > 0.0);

        let mut car = Car::new(Vec2::ZERO, 0.0);
        apply_action(2, &mut car, DT);
        assert!(car.speed() < 0.0);
    }

    #[test]
    fn steering_codes_change_wheel_angle() {
        let mut car = Car::new(Vec2::ZERO, 0.0);
        apply_action(3, &mut car, DT);
        assert!(car.wheel_angle() < 0.0);

        let mut car = Car::new(Vec2::ZERO, 0.0);
        apply_action(6, &mut car, DT);
        assert!(car.wheel_angle() > 0.0);
        assert!(car.speed() > 0.0);
    }

    #[test]
    fn coast_code_decays_both_channels() {
        let mut car = Car::new(Vec2::ZERO, 0.0);
        for _ in 0..30 {
            apply_action(5, &mut car, DT);
        }
        let (speed, wheel) = (car.speed(), car.wheel_angle());
        for _ in 0..10 {
            apply_action(0, &mut car, DT);
        }
        assert!(car.speed() < speed);
        assert!(car.wheel_angle() > wheel);
    }

    #[test]
    fn blend_resolves_the_defined_sums() {
        assert_eq!(blend_actions(5, 6), 1);
        assert_eq!(blend_actions(7, 8), 2);
        assert_eq!(blend_actions(5, 7), 3);
        assert_eq!(blend_actions(6, 8), 4);
        assert_eq!(blend_actions(1, 2), 0);
        assert_eq!(blend_actions(3, 4), 0);
    }

    #[test]
    fn undefined_sums_fall_back_to_coasting() {
        assert_eq!(blend_actions(0, 0), 0);
        assert_eq!(blend_actions(8, 8), 0);
        assert_eq!(blend_actions(1, 4), 0);
    }
}
