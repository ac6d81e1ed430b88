//! Shared utility functions

use std::f32::consts::PI;

/// Normalize angle to [-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle;
    while a > PI {
        a -= 2.0 * PI;
    }
    while a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Convert a wheel speed in RPM to an angular velocity in rad/s
#[inline]
pub fn rpm_to_rad_s(rpm: f32) -> f32 {
    rpm * 2.0 * PI / 60.0
}
