use core::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimal 3D vector for deterministic traversal math.
///
/// Intentionally small: only the operations the traversal kernel needs,
/// with `Option`-returning normalization so degenerate inputs are explicit
/// at the call site instead of silently producing NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// XZ-plane distance, ignoring height.
    pub fn horizontal_distance(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn with_y(self, y: f32) -> Self {
        Self::new(self.x, y, self.z)
    }

    /// Unit vector, or `None` when the length is too small to divide by.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len <= f32::EPSILON {
            return None;
        }
        Some(self / len)
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Step toward `target` by at most `max_step`, arriving exactly.
    ///
    /// A non-positive step or a degenerate separation leaves `self` unchanged
    /// except when already within `max_step` of the target.
    pub fn move_towards(self, target: Self, max_step: f32) -> Self {
        let delta = target - self;
        let dist = delta.length();
        if dist <= max_step.max(0.0) || dist <= f32::EPSILON {
            return target;
        }
        self + delta * (max_step.max(0.0) / dist)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Heading about the world up axis, in radians, wrapped to `(-PI, PI]`.
///
/// Yaw 0 faces `+Z`; positive yaw turns toward `+X`. Agents in this kernel
/// never pitch or roll, so a single angle is the whole rotation state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Yaw(f32);

impl Yaw {
    pub const ZERO: Self = Self(0.0);

    pub fn radians(angle: f32) -> Self {
        Self(wrap_angle(angle))
    }

    pub fn angle(self) -> f32 {
        self.0
    }

    /// Heading that faces along the XZ projection of `dir`.
    ///
    /// `None` when the projection is too short to define a direction.
    pub fn from_direction(dir: Vec3) -> Option<Self> {
        let planar = dir.with_y(0.0);
        if planar.length_squared() <= f32::EPSILON * f32::EPSILON {
            return None;
        }
        Some(Self(planar.x.atan2(planar.z)))
    }

    /// Heading from one point toward another, projected onto the XZ plane.
    pub fn look_at(from: Vec3, to: Vec3) -> Option<Self> {
        Self::from_direction(to - from)
    }

    /// Heading turned 180 degrees.
    pub fn reversed(self) -> Self {
        Self(wrap_angle(self.0 + core::f32::consts::PI))
    }

    /// Unit direction in the XZ plane.
    pub fn direction(self) -> Vec3 {
        Vec3::new(self.0.sin(), 0.0, self.0.cos())
    }
}

fn wrap_angle(angle: f32) -> f32 {
    use core::f32::consts::{PI, TAU};
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}
