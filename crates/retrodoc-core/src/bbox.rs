//! Axis-aligned boxes
//!
//! A [`Box2`] is always stored with `min <= max` componentwise: every
//! constructor sorts the two corners, so union and intersection never see a
//! reversed box. Decoders that read a (right, left) pair from a file can pass
//! it straight to [`Box2::new`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::vector::{Scalar, Vector2};

/// Box defined by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Box2<T> {
    min: Vector2<T>,
    max: Vector2<T>,
}

pub type Box2i = Box2<i32>;
pub type Box2l = Box2<i64>;
pub type Box2f = Box2<f32>;
pub type Box2d = Box2<f64>;

impl<T: Scalar> Box2<T> {
    /// Creates the box spanned by two opposite corners, in any order.
    pub fn new(a: Vector2<T>, b: Vector2<T>) -> Self {
        Self {
            min: a.min_elem(b),
            max: a.max_elem(b),
        }
    }

    /// The degenerate box containing a single point.
    pub fn from_point(p: Vector2<T>) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vector2<T>>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_point(first), |bbox, p| {
            bbox.union(&Self::from_point(p))
        }))
    }

    pub fn min(&self) -> Vector2<T> {
        self.min
    }

    pub fn max(&self) -> Vector2<T> {
        self.max
    }

    pub fn size(&self) -> Vector2<T> {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }

    pub fn contains(&self, p: Vector2<T>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min_elem(other.min),
            max: self.max.max_elem(other.max),
        }
    }

    /// Common part of both boxes, `None` when they do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min.max_elem(other.min);
        let max = self.max.min_elem(other.max);
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Self { min, max })
    }

    /// Grows the box by `margin` on every side (shrinks it when negative).
    pub fn extend(&self, margin: T) -> Self {
        let delta = Vector2::new(margin, margin);
        Self::new(self.min - delta, self.max + delta)
    }

    /// Keeps the minimum corner and sets the size.
    pub fn resize_from_min(&self, size: Vector2<T>) -> Self {
        Self::new(self.min, self.min + size)
    }

    /// Keeps the maximum corner and sets the size.
    pub fn resize_from_max(&self, size: Vector2<T>) -> Self {
        Self::new(self.max - size, self.max)
    }

    pub fn translate(&self, delta: Vector2<T>) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Scales both corners by `factor` (around the origin).
    pub fn scale(&self, factor: T) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    /// Scales both corners componentwise (around the origin).
    pub fn scale_elem(&self, factor: Vector2<T>) -> Self {
        Self::new(self.min.mul_elem(factor), self.max.mul_elem(factor))
    }

    /// The four corners: min, (max.x, min.y), (min.x, max.y), max.
    pub fn corners(&self) -> [Vector2<T>; 4] {
        [
            self.min,
            Vector2::new(self.max.x, self.min.y),
            Vector2::new(self.min.x, self.max.y),
            self.max,
        ]
    }

    /// Lexicographic comparison: min corner (y major) then max corner.
    pub fn cmp_lexicographic(&self, other: &Self) -> std::cmp::Ordering {
        self.min
            .cmp_y_major(&other.min)
            .then_with(|| self.max.cmp_y_major(&other.max))
    }
}

impl Box2<f64> {
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
        )
    }

    /// Keeps the center and sets the size.
    pub fn resize_from_center(&self, size: Vector2<f64>) -> Self {
        let center = self.center();
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.min.approx_eq(other.min, epsilon) && self.max.approx_eq(other.max, epsilon)
    }
}

impl Box2<i32> {
    pub fn center(&self) -> Vector2<i32> {
        Vector2::new(
            self.min.x + (self.max.x - self.min.x) / 2,
            self.min.y + (self.max.y - self.min.y) / 2,
        )
    }

    pub fn resize_from_center(&self, size: Vector2<i32>) -> Self {
        let center = self.center();
        let half = Vector2::new(size.x / 2, size.y / 2);
        Self::new(center - half, center - half + size)
    }
}

impl<T> Index<usize> for Box2<T> {
    type Output = Vector2<T>;

    fn index(&self, index: usize) -> &Vector2<T> {
        match index {
            0 => &self.min,
            1 => &self.max,
            _ => panic!("Box2 index {index} out of range"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Box2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}<->{})", self.min, self.max)
    }
}
