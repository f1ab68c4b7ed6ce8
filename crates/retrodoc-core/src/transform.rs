//! Affine transformations
//!
//! A [`Transformation`] stores the first two rows of a 3x3 matrix; the third
//! row is implicitly `[0, 0, 1]`. Values are immutable: composition and every
//! constructor return a new matrix, and the identity flag is computed once
//! when the value is built.
//!
//! Page space has the y axis pointing down, so a positive
//! [`Transformation::rotation`] turns clockwise on screen.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, Mul, MulAssign};

use crate::bbox::Box2d;
use crate::error::GeometryError;
use crate::vector::{Vec2d, Vec3d};

/// 2x3 affine matrix with a cached identity flag.
#[derive(Debug, Clone, Copy)]
pub struct Transformation {
    rows: [Vec3d; 2],
    identity: bool,
}

/// Result of [`Transformation::decompose`].
///
/// The original matrix equals
/// `shear(shearing, c) * rotation(rotation, c) * residual`, where `c` is the
/// image of the center passed to `decompose`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    /// Rotation angle in degrees, same orientation as [`Transformation::rotation`].
    pub rotation: f64,
    /// Shear factors, only the y component is ever non-zero.
    pub shearing: Vec2d,
    /// What is left once shear and rotation are factored out: scale and translation.
    pub residual: Transformation,
}

const IDENTITY_ROWS: [Vec3d; 2] = [Vec3d::new(1.0, 0.0, 0.0), Vec3d::new(0.0, 1.0, 0.0)];

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    pub fn identity() -> Self {
        Self {
            rows: IDENTITY_ROWS,
            identity: true,
        }
    }

    /// Builds the matrix `[x_row; y_row; 0 0 1]`.
    pub fn from_rows(x_row: Vec3d, y_row: Vec3d) -> Self {
        Self {
            rows: [x_row, y_row],
            identity: x_row == IDENTITY_ROWS[0] && y_row == IDENTITY_ROWS[1],
        }
    }

    pub fn translation(delta: Vec2d) -> Self {
        Self::from_rows(Vec3d::new(1.0, 0.0, delta.x), Vec3d::new(0.0, 1.0, delta.y))
    }

    pub fn scale(factor: Vec2d) -> Self {
        Self::from_rows(Vec3d::new(factor.x, 0.0, 0.0), Vec3d::new(0.0, factor.y, 0.0))
    }

    /// Rotation of `angle` degrees around `center`.
    pub fn rotation(angle: f64, center: Vec2d) -> Self {
        let (sin_a, cos_a) = angle.to_radians().sin_cos();
        Self::from_rows(
            Vec3d::new(cos_a, -sin_a, center.x - cos_a * center.x + sin_a * center.y),
            Vec3d::new(sin_a, cos_a, center.y - sin_a * center.x - cos_a * center.y),
        )
    }

    /// Shear keeping `center` fixed: `x += s.x * (y - c.y)`, `y += s.y * (x - c.x)`.
    pub fn shear(s: Vec2d, center: Vec2d) -> Self {
        Self::from_rows(
            Vec3d::new(1.0, s.x, -s.x * center.y),
            Vec3d::new(s.y, 1.0, -s.y * center.x),
        )
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    pub fn row(&self, index: usize) -> Vec3d {
        self.rows[index]
    }

    /// True when the off-diagonal terms vanish, i.e. the matrix only scales
    /// and translates.
    pub fn is_scale_translate(&self, epsilon: f64) -> bool {
        self.rows[0].y.abs() < epsilon && self.rows[1].x.abs() < epsilon
    }

    /// Applies `self` first, then `next`.
    pub fn then(&self, next: &Transformation) -> Transformation {
        *next * *self
    }

    pub fn determinant(&self) -> f64 {
        self.rows[0].x * self.rows[1].y - self.rows[0].y * self.rows[1].x
    }

    pub fn apply_point(&self, p: Vec2d) -> Vec2d {
        if self.identity {
            return p;
        }
        let d = self.apply_direction(p);
        Vec2d::new(d.x + self.rows[0].z, d.y + self.rows[1].z)
    }

    /// Applies the linear part only.
    pub fn apply_direction(&self, d: Vec2d) -> Vec2d {
        if self.identity {
            return d;
        }
        Vec2d::new(
            self.rows[0].x * d.x + self.rows[0].y * d.y,
            self.rows[1].x * d.x + self.rows[1].y * d.y,
        )
    }

    /// Bounding box of the four transformed corners.
    pub fn apply_box(&self, bbox: &Box2d) -> Box2d {
        if self.identity {
            return *bbox;
        }
        let corners = bbox.corners().map(|c| self.apply_point(c));
        corners[1..]
            .iter()
            .fold(Box2d::from_point(corners[0]), |acc, p| {
                acc.union(&Box2d::from_point(*p))
            })
    }

    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let det = self.determinant();
        if det.abs() < 1e-12 || !det.is_finite() {
            return Err(GeometryError::Singular { determinant: det });
        }
        let [r0, r1] = self.rows;
        let (a, b, c, d) = (r0.x / det, r0.y / det, r1.x / det, r1.y / det);
        Ok(Self::from_rows(
            Vec3d::new(d, -b, -(d * r0.z - b * r1.z)),
            Vec3d::new(-c, a, -(-c * r0.z + a * r1.z)),
        ))
    }

    /// Splits the matrix into a shear, a rotation and a residual
    /// scale/translation, all centered on the image of `center`.
    ///
    /// Returns `None` for the identity, when no shear along y can make the
    /// basis orthogonal (negative discriminant), or when the matrix collapses
    /// the x axis.
    pub fn decompose(&self, center: Vec2d) -> Option<Decomposition> {
        if self.identity {
            return None;
        }
        let [r0, r1] = self.rows;
        let (a, b, c, d) = (r0.x, r0.y, r1.x, r1.y);
        let epsilon = 1e-12 * (a * a + b * b + c * c + d * d).max(f64::MIN_POSITIVE);

        // [1 0; t 1] * M has orthogonal columns when
        // ab*t^2 + (ad+bc)*t + (ab+cd) = 0
        let qa = a * b;
        let qb = a * d + b * c;
        let qc = a * b + c * d;
        let t = if qa.abs() <= epsilon {
            if qb.abs() > epsilon {
                -qc / qb
            } else if qc.abs() <= epsilon {
                0.0
            } else {
                return None;
            }
        } else {
            let discriminant = qb * qb - 4.0 * qa * qc;
            if discriminant < 0.0 {
                return None;
            }
            let q = -0.5 * (qb + qb.signum() * discriminant.sqrt());
            let first = q / qa;
            let second = if q.abs() > epsilon { qc / q } else { first };
            if first.abs() < second.abs() {
                first
            } else {
                second
            }
        };

        let n00 = a;
        let n10 = c + t * a;
        if n00.abs() <= epsilon.sqrt() * 1e-3 && n10.abs() <= epsilon.sqrt() * 1e-3 {
            return None;
        }

        let new_center = self.apply_point(center);
        let unsheared = Self::shear(Vec2d::new(0.0, t), new_center) * *self;
        let rotation = n10.atan2(n00).to_degrees();
        let residual = Self::rotation(-rotation, new_center) * unsheared;
        Some(Decomposition {
            rotation,
            shearing: Vec2d::new(0.0, if t == 0.0 { 0.0 } else { -t }),
            residual,
        })
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows.iter().zip(other.rows.iter()).all(|(l, r)| {
            (l.x - r.x).abs() <= epsilon
                && (l.y - r.y).abs() <= epsilon
                && (l.z - r.z).abs() <= epsilon
        })
    }

    /// Lexicographic order over both rows.
    pub fn cmp_lexicographic(&self, other: &Self) -> Ordering {
        self.rows[0]
            .cmp_lexicographic(&other.rows[0])
            .then_with(|| self.rows[1].cmp_lexicographic(&other.rows[1]))
    }
}

impl PartialEq for Transformation {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Index<usize> for Transformation {
    type Output = Vec3d;

    fn index(&self, index: usize) -> &Vec3d {
        &self.rows[index]
    }
}

/// `self * rhs` applies `rhs` first, then `self`.
impl Mul for Transformation {
    type Output = Transformation;

    fn mul(self, rhs: Transformation) -> Transformation {
        if rhs.identity {
            return self;
        }
        if self.identity {
            return rhs;
        }
        let mut rows = [Vec3d::default(); 2];
        for (row, out) in rows.iter_mut().enumerate() {
            let l = self.rows[row];
            *out = Vec3d::new(
                l.x * rhs.rows[0].x + l.y * rhs.rows[1].x,
                l.x * rhs.rows[0].y + l.y * rhs.rows[1].y,
                l.x * rhs.rows[0].z + l.y * rhs.rows[1].z + l.z,
            );
        }
        Transformation::from_rows(rows[0], rows[1])
    }
}

impl MulAssign for Transformation {
    fn mul_assign(&mut self, rhs: Transformation) {
        *self = *self * rhs;
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identity {
            return write!(f, "identity");
        }
        write!(f, "[{}],[{}]", self.rows[0], self.rows[1])
    }
}
