//! Two and three component vectors
//!
//! The same generic vector is instantiated with `i32`, `i64`, `f32` and `f64`
//! scalars. Legacy file offsets are frequently corrupt, so integer addition
//! and subtraction are overflow checked:
//! - [`Vector2::try_add`]/[`Vector2::try_sub`] return a [`GeometryError`]
//! - the `+`/`-` operators panic, since silently wrapped geometry cannot be
//!   used safely afterwards

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use crate::error::GeometryError;

/// Numeric type usable as a vector component.
pub trait Scalar:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;

    /// Addition returning `None` when the result is not representable.
    fn checked_add(self, rhs: Self) -> Option<Self>;
    /// Subtraction returning `None` when the result is not representable.
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    /// A total order, NaN included for floating point scalars.
    fn total_order(&self, other: &Self) -> Ordering;
    /// Lossy conversion to `f64`.
    fn to_f64(self) -> f64;
    /// Lossy conversion from `f64` (saturating for integers).
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_int_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            fn total_order(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            fn checked_add(self, rhs: Self) -> Option<Self> {
                Some(self + rhs)
            }

            fn checked_sub(self, rhs: Self) -> Option<Self> {
                Some(self - rhs)
            }

            fn total_order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_int_scalar!(i32, i64);
impl_float_scalar!(f32, f64);

/// A 2D vector (or point) with scalar components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

/// Integer vector, used for pixel dimensions and file coordinates.
pub type Vec2i = Vector2<i32>;
/// Wide integer vector.
pub type Vec2l = Vector2<i64>;
/// Single precision vector.
pub type Vec2f = Vector2<f32>;
/// Double precision vector, used by the shape model.
pub type Vec2d = Vector2<f64>;

impl<T: Scalar> Vector2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(T::ZERO, T::ZERO)
    }

    /// Componentwise addition that fails instead of overflowing.
    pub fn try_add(self, rhs: Self) -> Result<Self, GeometryError> {
        match (self.x.checked_add(rhs.x), self.y.checked_add(rhs.y)) {
            (Some(x), Some(y)) => Ok(Self::new(x, y)),
            _ => Err(GeometryError::Overflow { operation: "add" }),
        }
    }

    /// Componentwise subtraction that fails instead of overflowing.
    pub fn try_sub(self, rhs: Self) -> Result<Self, GeometryError> {
        match (self.x.checked_sub(rhs.x), self.y.checked_sub(rhs.y)) {
            (Some(x), Some(y)) => Ok(Self::new(x, y)),
            _ => Err(GeometryError::Overflow { operation: "sub" }),
        }
    }

    /// Lexicographic order, x first.
    pub fn cmp_x_major(&self, other: &Self) -> Ordering {
        self.x
            .total_order(&other.x)
            .then_with(|| self.y.total_order(&other.y))
    }

    /// Lexicographic order, y first.
    pub fn cmp_y_major(&self, other: &Self) -> Ordering {
        self.y
            .total_order(&other.y)
            .then_with(|| self.x.total_order(&other.x))
    }

    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    /// Componentwise product.
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    pub fn min_elem(self, other: Self) -> Self {
        let x = if other.x < self.x { other.x } else { self.x };
        let y = if other.y < self.y { other.y } else { self.y };
        Self::new(x, y)
    }

    pub fn max_elem(self, other: Self) -> Self {
        let x = if other.x > self.x { other.x } else { self.x };
        let y = if other.y > self.y { other.y } else { self.y };
        Self::new(x, y)
    }

    pub fn cast<U: Scalar>(self) -> Vector2<U> {
        Vector2::new(U::from_f64(self.x.to_f64()), U::from_f64(self.y.to_f64()))
    }
}

impl Vector2<f64> {
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, `None` for a zero-length vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            return None;
        }
        Some(Self::new(self.x / len, self.y / len))
    }

    /// The vector turned a quarter turn: `(x, y) -> (-y, x)`.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotates around the origin, using the same orientation as
    /// [`Transformation::rotation`](crate::transform::Transformation::rotation).
    pub fn rotated(self, angle_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Self::new(c * self.x - s * self.y, s * self.x + c * self.y)
    }

    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl<T: Eq> Eq for Vector2<T> {}

impl<T: Scalar> Add for Vector2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match self.try_add(rhs) {
            Ok(v) => v,
            Err(err) => panic!("{err}: {self} + {rhs}"),
        }
    }
}

impl<T: Scalar> Sub for Vector2<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match self.try_sub(rhs) {
            Ok(v) => v,
            Err(err) => panic!("{err}: {self} - {rhs}"),
        }
    }
}

impl<T: Scalar> AddAssign for Vector2<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Vector2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> Mul<T> for Vector2<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T> Index<usize> for Vector2<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2 index {index} out of range"),
        }
    }
}

impl<T> IndexMut<usize> for Vector2<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2 index {index} out of range"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// A 3 component vector; rows of a [`Transformation`](crate::transform::Transformation).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type Vec3i = Vector3<i32>;
pub type Vec3f = Vector3<f32>;
pub type Vec3d = Vector3<f64>;

impl<T: Scalar> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// The first two components.
    pub fn xy(self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }

    pub fn try_add(self, rhs: Self) -> Result<Self, GeometryError> {
        match (
            self.x.checked_add(rhs.x),
            self.y.checked_add(rhs.y),
            self.z.checked_add(rhs.z),
        ) {
            (Some(x), Some(y), Some(z)) => Ok(Self::new(x, y, z)),
            _ => Err(GeometryError::Overflow { operation: "add" }),
        }
    }

    pub fn try_sub(self, rhs: Self) -> Result<Self, GeometryError> {
        match (
            self.x.checked_sub(rhs.x),
            self.y.checked_sub(rhs.y),
            self.z.checked_sub(rhs.z),
        ) {
            (Some(x), Some(y), Some(z)) => Ok(Self::new(x, y, z)),
            _ => Err(GeometryError::Overflow { operation: "sub" }),
        }
    }

    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Lexicographic order, x then y then z.
    pub fn cmp_lexicographic(&self, other: &Self) -> Ordering {
        self.x
            .total_order(&other.x)
            .then_with(|| self.y.total_order(&other.y))
            .then_with(|| self.z.total_order(&other.z))
    }
}

impl<T: Scalar> Add for Vector3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match self.try_add(rhs) {
            Ok(v) => v,
            Err(err) => panic!("{err}: {self} + {rhs}"),
        }
    }
}

impl<T: Scalar> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match self.try_sub(rhs) {
            Ok(v) => v,
            Err(err) => panic!("{err}: {self} - {rhs}"),
        }
    }
}

impl<T: Scalar> Mul<T> for Vector3<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index {index} out of range"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
