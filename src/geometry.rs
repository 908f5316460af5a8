//! Planar value types shared by the input tables and the results.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Node location `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinates as a column vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Vector pointing from `self` to `other`.
    #[must_use]
    pub fn offset_to(self, other: Point) -> Vector2<f64> {
        other.to_vector() - self.to_vector()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        self.offset_to(other).norm()
    }
}

/// Nodal force or reaction `(Fx, Fy)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Force {
    /// Create a force from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Components as a column vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Force {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Nodal translation `(u, v)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
}

impl Displacement {
    /// Create a displacement from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Vector2<f64>> for Displacement {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Shorthand for [`Point::new`].
///
/// # Examples
/// ```
/// use truss2d::point;
///
/// let apex = point(1.0, 2.0);
/// assert_eq!(apex.y, 2.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Shorthand for [`Force::new`].
///
/// # Examples
/// ```
/// use truss2d::force;
///
/// let load = force(0.0, -5.0);
/// assert_eq!(load.y, -5.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64) -> Force {
    Force::new(x, y)
}
