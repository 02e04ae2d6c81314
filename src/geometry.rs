//! Planar geometry helpers for tendril motion and drawing.
//! Small helpers for headings, bounded steering, and segment poses.
use glam::Vec2;

/// Returns the unit heading for an angle in radians, measured
/// counter-clockwise from the positive x-axis.
///
/// Non-finite angles fall back to `Vec2::X` so a bad input never poisons the
/// lead position with NaNs.
///
/// # Examples
/// ```
/// use magic_tendril::geometry::heading_from_angle;
/// let up = heading_from_angle(std::f32::consts::FRAC_PI_2);
/// assert!(up.x.abs() < 1e-6);
/// assert!((up.y - 1.0).abs() < 1e-6);
/// assert_eq!(heading_from_angle(f32::NAN), glam::Vec2::X);
/// ```
#[must_use]
pub fn heading_from_angle(angle: f32) -> Vec2 {
    if !angle.is_finite() {
        return Vec2::X;
    }
    Vec2::from_angle(angle).try_normalize().unwrap_or(Vec2::X)
}

/// Signed angle in radians that rotates `from` onto `to`.
///
/// Positive values turn counter-clockwise. Zero-length inputs yield `0.0`.
#[must_use]
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    if from == Vec2::ZERO || to == Vec2::ZERO {
        return 0.0;
    }
    from.perp_dot(to).atan2(from.dot(to))
}

/// Rotates `heading` toward `desired` by at most `max_turn` radians.
///
/// The result is always a unit vector. When `desired` is zero the heading is
/// returned unchanged.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use magic_tendril::geometry::steer_towards;
///
/// // Within the allowance: snaps onto the desired direction.
/// let snapped = steer_towards(Vec2::X, Vec2::new(1.0, 1.0), 1.0);
/// assert!((snapped - Vec2::new(1.0, 1.0).normalize()).length() < 1e-5);
///
/// // Beyond it: turns by exactly the allowance.
/// let limited = steer_towards(Vec2::X, Vec2::Y, 0.1);
/// assert!((limited.y.atan2(limited.x) - 0.1).abs() < 1e-5);
/// ```
#[must_use]
pub fn steer_towards(heading: Vec2, desired: Vec2, max_turn: f32) -> Vec2 {
    let delta = signed_angle(heading, desired);
    let limit = max_turn.max(0.0);
    let turn = delta.clamp(-limit, limit);
    Vec2::from_angle(turn)
        .rotate(heading)
        .try_normalize()
        .unwrap_or(heading)
}

/// Segment geometry handed to the presentation layer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TendrilPose {
    /// Anchored end, at the source ball.
    pub base: Vec2,
    /// Live end of the tendril.
    pub tip: Vec2,
}

impl TendrilPose {
    #[must_use]
    pub const fn new(base: Vec2, tip: Vec2) -> Self {
        Self { base, tip }
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        self.base.distance(self.tip)
    }

    #[must_use]
    pub fn midpoint(&self) -> Vec2 {
        (self.base + self.tip) * 0.5
    }

    /// Orientation of the segment in radians; `0.0` for a degenerate pose.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        let direction = self.tip - self.base;
        if direction == Vec2::ZERO {
            0.0
        } else {
            direction.y.atan2(direction.x)
        }
    }
}
