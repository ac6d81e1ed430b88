//! Workspace geometry and obstacle oracle.
//!
//! A [`Scene`] holds the workspace bounds plus an immutable list of
//! obstacles, each inflated once at construction by the safety margin
//! (vehicle radius + clearance). Point queries are pure and allocation-free
//! so they can run per integration substep inside the search hot loop.

use crate::pose::WorldPoint;

const SQRT_2: f32 = 1.4142;

/// A primitive obstacle shape.
///
/// Polygons must be convex with vertices in consistent winding order; the
/// winding sign is fixed at construction from the signed area so containment
/// works for either orientation.
#[derive(Clone, Debug)]
pub enum Obstacle {
    /// Circle: center and radius
    Circle { center: WorldPoint, radius: f32 },
    /// Axis-aligned ellipse: center and semi-axes
    Ellipse {
        center: WorldPoint,
        semi_x: f32,
        semi_y: f32,
    },
    /// Convex polygon: ordered vertices plus winding sign (+1 CCW, -1 CW)
    Polygon {
        vertices: Vec<WorldPoint>,
        winding: f32,
    },
}

impl Obstacle {
    /// Create a circle obstacle.
    pub fn circle(cx: f32, cy: f32, radius: f32) -> Self {
        Obstacle::Circle {
            center: WorldPoint::new(cx, cy),
            radius,
        }
    }

    /// Create an axis-aligned ellipse obstacle.
    pub fn ellipse(cx: f32, cy: f32, semi_x: f32, semi_y: f32) -> Self {
        Obstacle::Ellipse {
            center: WorldPoint::new(cx, cy),
            semi_x,
            semi_y,
        }
    }

    /// Create a convex polygon obstacle from ordered vertices.
    pub fn polygon(vertices: &[(f32, f32)]) -> Self {
        let vertices: Vec<WorldPoint> = vertices
            .iter()
            .map(|&(x, y)| WorldPoint::new(x, y))
            .collect();
        let winding = if signed_area(&vertices) >= 0.0 {
            1.0
        } else {
            -1.0
        };
        Obstacle::Polygon { vertices, winding }
    }

    /// Return a copy of this obstacle grown by `margin`.
    ///
    /// Circles and ellipses grow exactly. Polygon vertices are pushed away
    /// from the centroid by `sqrt(2) * margin` per axis, a straight corner
    /// offset rather than a true Minkowski sum.
    pub fn inflated(&self, margin: f32) -> Self {
        match self {
            Obstacle::Circle { center, radius } => Obstacle::Circle {
                center: *center,
                radius: radius + margin,
            },
            Obstacle::Ellipse {
                center,
                semi_x,
                semi_y,
            } => Obstacle::Ellipse {
                center: *center,
                semi_x: semi_x + margin,
                semi_y: semi_y + margin,
            },
            Obstacle::Polygon { vertices, winding } => {
                let c = centroid(vertices);
                let offset = SQRT_2 * margin;
                let vertices = vertices
                    .iter()
                    .map(|v| {
                        WorldPoint::new(
                            v.x + (v.x - c.x).signum() * offset,
                            v.y + (v.y - c.y).signum() * offset,
                        )
                    })
                    .collect();
                Obstacle::Polygon {
                    vertices,
                    winding: *winding,
                }
            }
        }
    }

    /// Test whether the point lies strictly inside this obstacle.
    ///
    /// Boundary-exclusive: a point exactly on the inflated outline is free.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Obstacle::Circle { center, radius } => {
                let dx = x - center.x;
                let dy = y - center.y;
                dx * dx + dy * dy < radius * radius
            }
            Obstacle::Ellipse {
                center,
                semi_x,
                semi_y,
            } => {
                let dx = (x - center.x) / semi_x;
                let dy = (y - center.y) / semi_y;
                dx * dx + dy * dy < 1.0
            }
            Obstacle::Polygon { vertices, winding } => {
                // Inside iff every edge cross-product agrees with the winding
                let n = vertices.len();
                for i in 0..n {
                    let a = vertices[i];
                    let b = vertices[(i + 1) % n];
                    let cross = (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x);
                    if cross * winding <= 0.0 {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Centroid of the shape (for sanity checks and polygon inflation).
    pub fn centroid(&self) -> WorldPoint {
        match self {
            Obstacle::Circle { center, .. } | Obstacle::Ellipse { center, .. } => *center,
            Obstacle::Polygon { vertices, .. } => centroid(vertices),
        }
    }
}

fn centroid(vertices: &[WorldPoint]) -> WorldPoint {
    let n = vertices.len() as f32;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
    WorldPoint::new(sx / n, sy / n)
}

fn signed_area(vertices: &[WorldPoint]) -> f32 {
    let n = vertices.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

/// Bounded workspace with a fixed obstacle library.
#[derive(Clone, Debug)]
pub struct Scene {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
    /// Vehicle radius + clearance; shrinks the usable workspace
    margin: f32,
    obstacles: Vec<Obstacle>,
}

impl Scene {
    /// Build a scene from raw obstacles, inflating each by `margin`.
    pub fn new(
        (x_min, x_max): (f32, f32),
        (y_min, y_max): (f32, f32),
        margin: f32,
        obstacles: &[Obstacle],
    ) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            margin,
            obstacles: obstacles.iter().map(|o| o.inflated(margin)).collect(),
        }
    }

    /// Workspace bounds test, shrunk by the safety margin.
    #[inline]
    pub fn is_valid(&self, x: f32, y: f32) -> bool {
        x >= self.x_min + self.margin
            && x <= self.x_max - self.margin
            && y >= self.y_min + self.margin
            && y <= self.y_max - self.margin
    }

    /// True if any obstacle contains the point.
    #[inline]
    pub fn is_obstacle(&self, x: f32, y: f32) -> bool {
        self.obstacles.iter().any(|o| o.contains(x, y))
    }

    /// In-bounds and outside every obstacle.
    #[inline]
    pub fn is_free(&self, x: f32, y: f32) -> bool {
        self.is_valid(x, y) && !self.is_obstacle(x, y)
    }

    /// The inflated obstacles of this scene.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The safety margin this scene was built with.
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

/// The 1000x1000 centered arena used by the kinematic planner:
/// four circles and three squares.
pub fn kinematic_arena(margin: f32) -> Scene {
    let obstacles = [
        Obstacle::circle(200.0, 300.0, 100.0),
        Obstacle::circle(-200.0, 300.0, 100.0),
        Obstacle::circle(-200.0, -300.0, 100.0),
        Obstacle::circle(0.0, 0.0, 100.0),
        Obstacle::polygon(&[
            (325.0, -75.0),
            (325.0, 75.0),
            (475.0, 75.0),
            (475.0, -75.0),
        ]),
        Obstacle::polygon(&[
            (-325.0, -75.0),
            (-325.0, 75.0),
            (-475.0, 75.0),
            (-475.0, -75.0),
        ]),
        Obstacle::polygon(&[
            (125.0, -375.0),
            (125.0, -225.0),
            (275.0, -225.0),
            (275.0, -375.0),
        ]),
    ];
    Scene::new((-500.0, 500.0), (-500.0, 500.0), margin, &obstacles)
}

/// The 200x300 course used by the grid planner: circle, ellipse, two
/// triangles, rhombus, quadrilateral and a thin rotated rod.
///
/// Coordinates are (row, col) with rows 1..=200 and cols 1..=300.
pub fn grid_course(margin: f32) -> Scene {
    let obstacles = [
        Obstacle::circle(150.0, 225.0, 25.0),
        Obstacle::ellipse(100.0, 150.0, 20.0, 40.0),
        Obstacle::polygon(&[(120.0, 20.0), (150.0, 50.0), (185.0, 25.0)]),
        Obstacle::polygon(&[(150.0, 50.0), (185.0, 25.0), (185.0, 75.0)]),
        Obstacle::polygon(&[(10.0, 225.0), (25.0, 200.0), (40.0, 225.0), (25.0, 250.0)]),
        Obstacle::polygon(&[
            (150.0, 50.0),
            (120.0, 75.0),
            (150.0, 100.0),
            (185.0, 75.0),
        ]),
        Obstacle::polygon(&[
            (30.0, 95.0),
            (38.66, 100.0),
            (76.15, 35.5),
            (67.5, 30.05),
        ]),
    ];
    Scene::new((1.0, 200.0), (1.0, 300.0), margin, &obstacles)
}
