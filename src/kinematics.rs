// Differential-drive kinematics and pedal saturation
// Converts a body-frame motion request (vx, yaw rate) to per-side wheel
// speeds, then normalizes each side into a pedal position.

/// Convert a body-frame motion request to left/right wheel speeds.
///
/// Positive yaw rate turns toward the left side: the right wheel speeds
/// up and the left wheel slows down by `yaw_rate * track_width_half`.
/// Pure arithmetic, no error conditions; non-finite inputs flow through
/// to `pedal_position`, which maps them to a safe stop.
pub fn wheel_speeds(vx: f32, yaw_rate: f32, track_width_half: f32) -> (f32, f32) {
    let left = vx - yaw_rate * track_width_half;
    let right = vx + yaw_rate * track_width_half;
    (left, right)
}

/// Normalize a wheel speed against the configured maximum into a pedal
/// position strictly inside the unit interval.
///
/// Overflow on either side, including infinity, maps to exactly
/// 0.99 / -0.99 rather than 1.0, so a downstream proxy never sees the
/// boundary value. NaN maps to 0.0 (stop). `speed_max` is validated
/// positive at startup.
pub fn pedal_position(wheel_speed: f32, speed_max: f32) -> f32 {
    let ratio = wheel_speed / speed_max;
    if ratio.is_nan() {
        return 0.0;
    }
    if ratio > 1.0 {
        0.99
    } else if ratio < -1.0 {
        -0.99
    } else {
        ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_motion() {
        assert_eq!(wheel_speeds(0.0, 0.0, 0.5), (0.0, 0.0));
    }

    #[test]
    fn test_straight_line_speeds_are_equal() {
        let (left, right) = wheel_speeds(1.2, 0.0, 0.5);
        assert_eq!(left, 1.2);
        assert_eq!(right, 1.2);
    }

    #[test]
    fn test_positive_yaw_favors_right_wheel() {
        let (left, right) = wheel_speeds(1.0, 1.0, 0.5);
        assert_eq!(left, 0.5);
        assert_eq!(right, 1.5);
    }

    #[test]
    fn test_pure_rotation_is_antisymmetric() {
        let (left, right) = wheel_speeds(0.0, 2.0, 0.25);
        assert_eq!(left, -right);
        assert_eq!(right, 0.5);
    }

    #[test]
    fn test_kinematics_general_form() {
        for &(v, w, h) in &[(0.3, -1.7, 0.4), (-2.0, 0.9, 1.1), (5.5, 3.3, 0.05)] {
            let (left, right) = wheel_speeds(v, w, h);
            assert_eq!(left, v - w * h);
            assert_eq!(right, v + w * h);
        }
    }

    #[test]
    fn test_pedal_in_range_is_plain_ratio() {
        assert_eq!(pedal_position(0.5, 2.0), 0.25);
        assert_eq!(pedal_position(-1.0, 2.0), -0.5);
        assert_eq!(pedal_position(2.0, 2.0), 1.0);
        assert_eq!(pedal_position(-2.0, 2.0), -1.0);
    }

    #[test]
    fn test_pedal_overflow_clamps_to_near_boundary() {
        // Any overflow maps to the fixed 0.99, not proportional scaling
        assert_eq!(pedal_position(3.0, 2.0), 0.99);
        assert_eq!(pedal_position(2000.0, 2.0), 0.99);
        assert_eq!(pedal_position(-3.0, 2.0), -0.99);
        assert_eq!(pedal_position(f32::INFINITY, 2.0), 0.99);
        assert_eq!(pedal_position(f32::NEG_INFINITY, 2.0), -0.99);
    }

    #[test]
    fn test_pedal_nan_maps_to_stop() {
        assert_eq!(pedal_position(f32::NAN, 2.0), 0.0);
    }
}
