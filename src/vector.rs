use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// An immutable 2D vector used for positions, velocities and forces.
///
/// All operations return new values. Normalizing or limiting a zero-length
/// vector yields the zero vector instead of NaN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, counter-clockwise from +x).
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }

    pub fn magnitude_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_sq().sqrt()
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 && mag.is_finite() {
            Self::new(self.x / mag, self.y / mag)
        } else {
            Self::ZERO
        }
    }

    /// Caps the magnitude at `max`, keeping the direction. The result's
    /// [`magnitude`](Vector2D::magnitude) never exceeds `max`.
    pub fn limit(&self, max: f64) -> Self {
        if self.magnitude() <= max {
            return *self;
        }
        let mut capped = self.normalize() * max;
        // Rounding in normalize can leave the product a few ulps long.
        for _ in 0..8 {
            if capped.magnitude() <= max {
                break;
            }
            capped = capped * (1.0 - f64::EPSILON);
        }
        capped
    }

    pub fn distance_sq(&self, other: &Vector2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Heading in radians, `atan2(y, x)`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component along `axis` (0 = x, 1 = y).
    #[inline]
    pub fn axis(&self, axis: usize) -> f64 {
        if axis == 0 { self.x } else { self.y }
    }
}

/// The closed-ball predicate shared by every spatial index.
///
/// All implementations must decide membership through this function so that
/// their results agree bit for bit on boundary points.
#[inline]
pub fn within_radius(point: &Vector2D, center: &Vector2D, radius_sq: f64) -> bool {
    point.distance_sq(center) <= radius_sq
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}
