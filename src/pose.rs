//! Pose and point types for the planner workspace.
//!
//! Coordinates are in workspace units (the built-in arenas use centimeters),
//! X-forward, Y-left, counter-clockwise positive rotation.

/// A 2D pose: position plus heading.
///
/// The heading is deliberately NOT normalized on construction: the search
/// accumulates theta across integration steps and treats the raw value as
/// part of the state identity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    /// X position in workspace units
    pub x: f32,
    /// Y position in workspace units
    pub y: f32,
    /// Heading angle in radians, CCW positive from X-axis
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self { x, y, theta }
    }

    /// Get the position as a point.
    #[inline]
    pub fn position(self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

/// A point in the workspace (no heading).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    /// X coordinate in workspace units
    pub x: f32,
    /// Y coordinate in workspace units
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Angle from this point to another (radians, CCW from +X)
    #[inline]
    pub fn angle_to(&self, other: &WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx)
    }
}
