//! SVG-like path commands
//!
//! Coordinates are absolute, in points. A command only stores the data its
//! action needs; the start of a segment is the end of the previous command,
//! so operations that need it take the current point explicitly.

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

use retrodoc_core::{PropertyList, Transformation, Vec2d};

/// One path instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2d),
    LineTo(Vec2d),
    HorizontalTo(f64),
    VerticalTo(f64),
    /// Quadratic curve reflecting the previous control point (`T`)
    SmoothQuadTo(Vec2d),
    QuadTo { ctrl: Vec2d, to: Vec2d },
    /// Cubic curve whose first control point reflects the previous one (`S`)
    SmoothCubicTo { ctrl: Vec2d, to: Vec2d },
    CubicTo { ctrl1: Vec2d, ctrl2: Vec2d, to: Vec2d },
    ArcTo {
        radius: Vec2d,
        /// x axis rotation in degrees
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Vec2d,
    },
    Close,
}

impl PathCommand {
    /// The SVG action letter.
    pub fn tag(&self) -> char {
        match self {
            PathCommand::MoveTo(_) => 'M',
            PathCommand::LineTo(_) => 'L',
            PathCommand::HorizontalTo(_) => 'H',
            PathCommand::VerticalTo(_) => 'V',
            PathCommand::SmoothQuadTo(_) => 'T',
            PathCommand::QuadTo { .. } => 'Q',
            PathCommand::SmoothCubicTo { .. } => 'S',
            PathCommand::CubicTo { .. } => 'C',
            PathCommand::ArcTo { .. } => 'A',
            PathCommand::Close => 'Z',
        }
    }

    /// Where the pen is after this command, `None` for `Close`.
    pub fn end_point(&self, current: Vec2d) -> Option<Vec2d> {
        match *self {
            PathCommand::MoveTo(to)
            | PathCommand::LineTo(to)
            | PathCommand::SmoothQuadTo(to)
            | PathCommand::QuadTo { to, .. }
            | PathCommand::SmoothCubicTo { to, .. }
            | PathCommand::CubicTo { to, .. }
            | PathCommand::ArcTo { to, .. } => Some(to),
            PathCommand::HorizontalTo(x) => Some(Vec2d::new(x, current.y)),
            PathCommand::VerticalTo(y) => Some(Vec2d::new(current.x, y)),
            PathCommand::Close => None,
        }
    }

    /// Every explicit point of the command: controls first, end point last.
    pub fn points(&self) -> SmallVec<[Vec2d; 3]> {
        let mut points = SmallVec::new();
        match *self {
            PathCommand::MoveTo(to)
            | PathCommand::LineTo(to)
            | PathCommand::SmoothQuadTo(to)
            | PathCommand::ArcTo { to, .. } => points.push(to),
            PathCommand::QuadTo { ctrl, to } | PathCommand::SmoothCubicTo { ctrl, to } => {
                points.push(ctrl);
                points.push(to);
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                points.push(ctrl1);
                points.push(ctrl2);
                points.push(to);
            }
            PathCommand::HorizontalTo(_) | PathCommand::VerticalTo(_) | PathCommand::Close => {}
        }
        points
    }

    /// Applies `f` to every explicit point, keeping the command kind.
    fn map_points(&self, f: impl Fn(Vec2d) -> Vec2d) -> Self {
        match *self {
            PathCommand::MoveTo(to) => PathCommand::MoveTo(f(to)),
            PathCommand::LineTo(to) => PathCommand::LineTo(f(to)),
            PathCommand::SmoothQuadTo(to) => PathCommand::SmoothQuadTo(f(to)),
            PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
            PathCommand::SmoothCubicTo { ctrl, to } => PathCommand::SmoothCubicTo {
                ctrl: f(ctrl),
                to: f(to),
            },
            PathCommand::CubicTo { ctrl1, ctrl2, to } => PathCommand::CubicTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            PathCommand::ArcTo {
                radius,
                rotation,
                large_arc,
                sweep,
                to,
            } => PathCommand::ArcTo {
                radius,
                rotation,
                large_arc,
                sweep,
                to: f(to),
            },
            other => other,
        }
    }

    pub fn translate(&self, delta: Vec2d) -> Self {
        match *self {
            PathCommand::HorizontalTo(x) => PathCommand::HorizontalTo(x + delta.x),
            PathCommand::VerticalTo(y) => PathCommand::VerticalTo(y + delta.y),
            _ => self.map_points(|p| p + delta),
        }
    }

    /// Componentwise scaling around the origin.
    pub fn scale(&self, factor: Vec2d) -> Self {
        self.transform(&Transformation::scale(factor), Vec2d::zero())
    }

    /// Rotation by `angle` degrees followed by a translation of `delta`.
    ///
    /// `H`/`V` are no longer axis aligned afterwards and become `L`.
    pub fn rotate(&self, angle: f64, delta: Vec2d, current: Vec2d) -> Self {
        let matrix = Transformation::translation(delta) * Transformation::rotation(angle, Vec2d::zero());
        self.transform(&matrix, current)
    }

    /// Applies `matrix` to every point.
    ///
    /// The ellipse of an arc is mapped as a whole: its radii and x axis
    /// rotation are those of the image ellipse, and a mirror reverses the
    /// sweep. `H`/`V` stay as they are only when the matrix keeps the axes;
    /// otherwise they become `L`, resolved against `current`.
    pub fn transform(&self, matrix: &Transformation, current: Vec2d) -> Self {
        if matrix.is_identity() {
            return *self;
        }
        let axis_aligned = matrix.is_scale_translate(1e-12);
        match *self {
            PathCommand::HorizontalTo(x) if axis_aligned => {
                PathCommand::HorizontalTo(matrix.apply_point(Vec2d::new(x, current.y)).x)
            }
            PathCommand::VerticalTo(y) if axis_aligned => {
                PathCommand::VerticalTo(matrix.apply_point(Vec2d::new(current.x, y)).y)
            }
            PathCommand::HorizontalTo(_) | PathCommand::VerticalTo(_) => match self.end_point(current) {
                Some(to) => PathCommand::LineTo(matrix.apply_point(to)),
                None => *self,
            },
            PathCommand::ArcTo {
                radius,
                rotation,
                large_arc,
                sweep,
                to,
            } => {
                let (radius, rotation) = transform_ellipse(matrix, radius, rotation);
                PathCommand::ArcTo {
                    radius,
                    rotation,
                    large_arc,
                    // a mirror reverses the direction of travel
                    sweep: if matrix.determinant() < 0.0 { !sweep } else { sweep },
                    to: matrix.apply_point(to),
                }
            }
            _ => self.map_points(|p| matrix.apply_point(p)),
        }
    }

    /// Writes the command into `list`, coordinates in points.
    pub fn add_to(&self, list: &mut PropertyList) {
        list.insert_string("librevenge:path-action", self.tag().to_string());
        match *self {
            PathCommand::HorizontalTo(x) => list.insert_point("svg:x", x),
            PathCommand::VerticalTo(y) => list.insert_point("svg:y", y),
            PathCommand::Close => {}
            PathCommand::MoveTo(to) | PathCommand::LineTo(to) | PathCommand::SmoothQuadTo(to) => {
                insert_point(list, "", to)
            }
            PathCommand::QuadTo { ctrl, to } | PathCommand::SmoothCubicTo { ctrl, to } => {
                insert_point(list, "", to);
                insert_point(list, "1", ctrl);
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                insert_point(list, "", to);
                insert_point(list, "1", ctrl1);
                insert_point(list, "2", ctrl2);
            }
            PathCommand::ArcTo {
                radius,
                rotation,
                large_arc,
                sweep,
                to,
            } => {
                insert_point(list, "", to);
                list.insert_point("svg:rx", radius.x);
                list.insert_point("svg:ry", radius.y);
                list.insert_bool("librevenge:large-arc", large_arc);
                list.insert_bool("librevenge:sweep", sweep);
                list.insert_generic("librevenge:rotate", rotation);
            }
        }
    }

    /// Numeric payload in a fixed order, used for total ordering.
    fn numbers(&self) -> SmallVec<[f64; 8]> {
        let mut values: SmallVec<[f64; 8]> = SmallVec::new();
        match *self {
            PathCommand::HorizontalTo(x) => values.push(x),
            PathCommand::VerticalTo(y) => values.push(y),
            PathCommand::ArcTo {
                radius,
                rotation,
                large_arc,
                sweep,
                to,
            } => values.extend([
                to.x,
                to.y,
                radius.x,
                radius.y,
                rotation,
                f64::from(u8::from(large_arc)),
                f64::from(u8::from(sweep)),
            ]),
            _ => {
                for p in self.points().iter().rev() {
                    values.push(p.x);
                    values.push(p.y);
                }
            }
        }
        values
    }

    /// Total order: action letter, then end point, then the other values.
    pub fn cmp_total(&self, other: &Self) -> Ordering {
        self.tag().cmp(&other.tag()).then_with(|| {
            let (l, r) = (self.numbers(), other.numbers());
            l.iter()
                .zip(r.iter())
                .map(|(a, b)| a.total_cmp(b))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| l.len().cmp(&r.len()))
        })
    }
}

fn insert_point(list: &mut PropertyList, suffix: &str, p: Vec2d) {
    list.insert_point(format!("svg:x{suffix}"), p.x);
    list.insert_point(format!("svg:y{suffix}"), p.y);
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::SmoothQuadTo(p) => {
                write!(f, "{} {} {}", self.tag(), p.x, p.y)
            }
            PathCommand::HorizontalTo(x) => write!(f, "H {x}"),
            PathCommand::VerticalTo(y) => write!(f, "V {y}"),
            PathCommand::QuadTo { ctrl, to } | PathCommand::SmoothCubicTo { ctrl, to } => {
                write!(f, "{} {} {} {} {}", self.tag(), ctrl.x, ctrl.y, to.x, to.y)
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => write!(
                f,
                "C {} {} {} {} {} {}",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            ),
            PathCommand::ArcTo {
                radius,
                rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {} {} {} {} {} {} {}",
                radius.x,
                radius.y,
                rotation,
                u8::from(large_arc),
                u8::from(sweep),
                to.x,
                to.y
            ),
            PathCommand::Close => write!(f, "Z"),
        }
    }
}

/// Translates a whole path.
pub fn translate_path(path: &[PathCommand], delta: Vec2d) -> Vec<PathCommand> {
    path.iter().map(|c| c.translate(delta)).collect()
}

/// Radii and x axis rotation (degrees, in `(-90, 90]`) of the image by
/// `matrix` of the ellipse with semi-axes `radius` turned by `rotation`.
///
/// The image of the unit circle under `A = M R(rotation) diag(rx, ry)` has
/// the singular values of `A` as semi-axes, the major one along the first
/// left singular vector. `rx` stays on the axis closest to the image of the
/// original x axis.
fn transform_ellipse(matrix: &Transformation, radius: Vec2d, rotation: f64) -> (Vec2d, f64) {
    let u = matrix.apply_direction(Vec2d::new(radius.x, 0.0).rotated(rotation));
    let v = matrix.apply_direction(Vec2d::new(0.0, radius.y).rotated(rotation));

    let e = (u.x + v.y) / 2.0;
    let f = (u.x - v.y) / 2.0;
    let g = (u.y + v.x) / 2.0;
    let h = (u.y - v.x) / 2.0;
    let q = e.hypot(h);
    let r = f.hypot(g);
    let major = q + r;
    let minor = (q - r).abs();
    if r <= major * 1e-12 {
        // the image is a circle, keep the turn of the x axis
        return (Vec2d::new(major, major), normalize_axis_angle(u.y.atan2(u.x).to_degrees()));
    }
    let mut angle = (g.atan2(f) + h.atan2(e)) / 2.0;

    let mut radius = Vec2d::new(major, minor);
    if u.length() > f64::EPSILON {
        let off_axis = angle - u.y.atan2(u.x);
        if off_axis.cos().abs() < off_axis.sin().abs() {
            radius = Vec2d::new(minor, major);
            angle += std::f64::consts::FRAC_PI_2;
        }
    }
    (radius, normalize_axis_angle(angle.to_degrees()))
}

/// An ellipse axis angle is defined modulo 180 degrees.
fn normalize_axis_angle(angle: f64) -> f64 {
    let angle = angle % 180.0;
    if angle > 90.0 {
        angle - 180.0
    } else if angle <= -90.0 {
        angle + 180.0
    } else {
        angle
    }
}

/// Transforms a whole path, tracking the current point for `H`/`V`.
pub fn transform_path(path: &[PathCommand], matrix: &Transformation) -> Vec<PathCommand> {
    let mut current = Vec2d::zero();
    let mut start = Vec2d::zero();
    path.iter()
        .map(|command| {
            let transformed = command.transform(matrix, current);
            advance(command, &mut current, &mut start);
            transformed
        })
        .collect()
}

/// Moves the pen past `command`; `Close` returns to the subpath start.
pub(crate) fn advance(command: &PathCommand, current: &mut Vec2d, start: &mut Vec2d) {
    match command.end_point(*current) {
        Some(p) => {
            if matches!(command, PathCommand::MoveTo(_)) {
                *start = p;
            }
            *current = p;
        }
        None => *current = *start,
    }
}

/// The `svg:d` value: one property list per command.
pub fn path_to_lists(path: &[PathCommand]) -> Vec<PropertyList> {
    path.iter()
        .map(|command| {
            let mut list = PropertyList::new();
            command.add_to(&mut list);
            list
        })
        .collect()
}

/// The path as an SVG `d` attribute.
pub fn path_to_svg(path: &[PathCommand]) -> String {
    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
