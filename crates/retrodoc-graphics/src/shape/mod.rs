//! Graphic shapes
//!
//! A [`GraphicShape`] couples a bounding box (the area the shape really
//! covers, line width and arrows included) with a [`ShapeKind`] holding the
//! geometry proper. Affine operations return new shapes; rotations and
//! general transformations turn the shape into a [`ShapeKind::Path`] since
//! rectangles and ellipses are not closed under them.

pub mod offset;
pub mod path;

use std::cmp::Ordering;
use std::fmt;

use retrodoc_core::{
    Box2d, DiagnosticKind, DiagnosticSink, Ignore, PropertyList, Transformation, Vec2d,
};

pub use offset::offset_vertices;
pub use path::{path_to_lists, path_to_svg, transform_path, translate_path, PathCommand};

/// Rotations closer than this (in degrees) to a full turn are skipped.
pub const DEFAULT_ROTATION_EPSILON: f64 = 1e-3;

/// Off-diagonal terms below this make a matrix a pure scale + translation.
const SCALE_TRANSLATE_EPSILON: f64 = 1e-5;

/// Control point distance of a quarter ellipse, relative to the radius.
const BEZIER_CIRCLE: f64 = 0.55228;

/// The kind of a shape, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeType {
    Line,
    Measure,
    Rectangle,
    Circle,
    Arc,
    Pie,
    Polygon,
    Polyline,
    Path,
    Unknown,
}

/// Geometry of a shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShapeKind {
    Line {
        from: Vec2d,
        to: Vec2d,
    },
    /// A line displayed with its length
    Measure {
        from: Vec2d,
        to: Vec2d,
    },
    /// Rectangle, rounded when both corner radii are positive
    Rectangle {
        form_box: Box2d,
        corner: Vec2d,
    },
    /// Ellipse inscribed in `form_box`
    Circle {
        form_box: Box2d,
    },
    /// Part of the ellipse inscribed in `form_box`, from `angles.x` to
    /// `angles.y` degrees counter clockwise
    Arc {
        form_box: Box2d,
        angles: Vec2d,
    },
    /// An arc closed through the ellipse center
    Pie {
        form_box: Box2d,
        angles: Vec2d,
    },
    Polygon {
        vertices: Vec<Vec2d>,
    },
    Polyline {
        vertices: Vec<Vec2d>,
    },
    Path {
        commands: Vec<PathCommand>,
    },
    #[default]
    Unknown,
}

/// Drawing primitive the sink must call after [`GraphicShape::add_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPrimitive {
    Ellipse,
    Path,
    Polyline,
    Polygon,
    Rectangle,
    /// Nothing could be serialized
    Bad,
}

impl DrawPrimitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawPrimitive::Ellipse => "ellipse",
            DrawPrimitive::Path => "path",
            DrawPrimitive::Polyline => "polyline",
            DrawPrimitive::Polygon => "polygon",
            DrawPrimitive::Rectangle => "rectangle",
            DrawPrimitive::Bad => "bad",
        }
    }
}

/// A shape with its bounding box.
#[derive(Debug, Clone, Default)]
pub struct GraphicShape {
    bounding_box: Box2d,
    kind: ShapeKind,
}

impl GraphicShape {
    pub fn line(from: Vec2d, to: Vec2d) -> Self {
        Self {
            bounding_box: Box2d::new(from, to),
            kind: ShapeKind::Line { from, to },
        }
    }

    pub fn measure(from: Vec2d, to: Vec2d) -> Self {
        Self {
            bounding_box: Box2d::new(from, to),
            kind: ShapeKind::Measure { from, to },
        }
    }

    /// A rectangle; `corner` holds the corner radii, zero for square corners.
    pub fn rectangle(form_box: Box2d, corner: Vec2d) -> Self {
        Self {
            bounding_box: form_box,
            kind: ShapeKind::Rectangle { form_box, corner },
        }
    }

    pub fn circle(form_box: Box2d) -> Self {
        Self {
            bounding_box: form_box,
            kind: ShapeKind::Circle { form_box },
        }
    }

    /// An arc of the ellipse inscribed in `circle_box`; `bounding_box` is the
    /// part actually covered.
    pub fn arc(bounding_box: Box2d, circle_box: Box2d, angles: Vec2d) -> Self {
        Self {
            bounding_box,
            kind: ShapeKind::Arc {
                form_box: circle_box,
                angles,
            },
        }
    }

    pub fn pie(bounding_box: Box2d, circle_box: Box2d, angles: Vec2d) -> Self {
        Self {
            bounding_box,
            kind: ShapeKind::Pie {
                form_box: circle_box,
                angles,
            },
        }
    }

    pub fn polygon(vertices: Vec<Vec2d>) -> Self {
        Self {
            bounding_box: Box2d::from_points(vertices.iter().copied()).unwrap_or_default(),
            kind: ShapeKind::Polygon { vertices },
        }
    }

    pub fn polyline(vertices: Vec<Vec2d>) -> Self {
        Self {
            bounding_box: Box2d::from_points(vertices.iter().copied()).unwrap_or_default(),
            kind: ShapeKind::Polyline { vertices },
        }
    }

    /// A path; the bounding box encloses every end and control point.
    pub fn path(commands: Vec<PathCommand>) -> Self {
        let mut current = Vec2d::zero();
        let mut start = Vec2d::zero();
        let mut points = Vec::new();
        for command in &commands {
            points.extend(command.points());
            if let Some(end) = command.end_point(current) {
                points.push(end);
            }
            path::advance(command, &mut current, &mut start);
        }
        Self {
            bounding_box: Box2d::from_points(points).unwrap_or_default(),
            kind: ShapeKind::Path { commands },
        }
    }

    /// Replaces the bounding box, e.g. to account for the line width.
    pub fn with_bounding_box(mut self, bounding_box: Box2d) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    pub fn bounding_box(&self) -> Box2d {
        self.bounding_box
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn shape_type(&self) -> ShapeType {
        match self.kind {
            ShapeKind::Line { .. } => ShapeType::Line,
            ShapeKind::Measure { .. } => ShapeType::Measure,
            ShapeKind::Rectangle { .. } => ShapeType::Rectangle,
            ShapeKind::Circle { .. } => ShapeType::Circle,
            ShapeKind::Arc { .. } => ShapeType::Arc,
            ShapeKind::Pie { .. } => ShapeType::Pie,
            ShapeKind::Polygon { .. } => ShapeType::Polygon,
            ShapeKind::Polyline { .. } => ShapeType::Polyline,
            ShapeKind::Path { .. } => ShapeType::Path,
            ShapeKind::Unknown => ShapeType::Unknown,
        }
    }

    /// The natural box of rectangles, circles, arcs and pies.
    pub fn form_box(&self) -> Option<Box2d> {
        match self.kind {
            ShapeKind::Rectangle { form_box, .. }
            | ShapeKind::Circle { form_box }
            | ShapeKind::Arc { form_box, .. }
            | ShapeKind::Pie { form_box, .. } => Some(form_box),
            _ => None,
        }
    }

    pub fn corner(&self) -> Option<Vec2d> {
        match self.kind {
            ShapeKind::Rectangle { corner, .. } => Some(corner),
            _ => None,
        }
    }

    pub fn arc_angles(&self) -> Option<Vec2d> {
        match self.kind {
            ShapeKind::Arc { angles, .. } | ShapeKind::Pie { angles, .. } => Some(angles),
            _ => None,
        }
    }

    /// End points of lines and measures.
    pub fn end_points(&self) -> Option<(Vec2d, Vec2d)> {
        match self.kind {
            ShapeKind::Line { from, to } | ShapeKind::Measure { from, to } => Some((from, to)),
            _ => None,
        }
    }

    pub fn vertices(&self) -> Option<&[Vec2d]> {
        match &self.kind {
            ShapeKind::Polygon { vertices } | ShapeKind::Polyline { vertices } => Some(vertices),
            _ => None,
        }
    }

    pub fn path_commands(&self) -> Option<&[PathCommand]> {
        match &self.kind {
            ShapeKind::Path { commands } => Some(commands),
            _ => None,
        }
    }

    pub fn translate(&self, delta: Vec2d) -> Self {
        self.transform(&Transformation::translation(delta))
    }

    /// Componentwise scaling around the origin.
    pub fn scale(&self, factor: Vec2d) -> Self {
        self.transform(&Transformation::scale(factor))
    }

    /// Rotates by `angle` degrees around `center`.
    pub fn rotate(&self, angle: f64, center: Vec2d) -> Self {
        self.rotate_with_epsilon(angle, center, DEFAULT_ROTATION_EPSILON)
    }

    /// Rotates by `angle` degrees around `center`; angles within `epsilon`
    /// of a multiple of 360 leave the shape unchanged.
    pub fn rotate_with_epsilon(&self, angle: f64, center: Vec2d, epsilon: f64) -> Self {
        let angle = angle % 360.0;
        if angle.abs() <= epsilon || 360.0 - angle.abs() <= epsilon {
            return self.clone();
        }
        let commands = self.get_path(true);
        if commands.is_empty() {
            tracing::debug!(shape = %self, "Cannot rotate a shape without path");
            return self.clone();
        }
        let matrix = Transformation::rotation(angle, center);
        Self {
            bounding_box: matrix.apply_box(&self.bounding_box),
            kind: ShapeKind::Path {
                commands: transform_path(&commands, &matrix),
            },
        }
    }

    /// Applies an affine transformation.
    pub fn transform(&self, matrix: &Transformation) -> Self {
        self.transform_reporting(matrix, &mut Ignore)
    }

    /// Same as [`transform`](Self::transform), reporting a matrix that
    /// cannot be decomposed to `sink`.
    ///
    /// A pure scale + translation keeps the shape kind. Anything else goes
    /// through the cubic path form, arcs carrying the ellipse the matrix
    /// maps theirs to. A matrix [`Transformation::decompose`] rejects is
    /// still applied.
    pub fn transform_reporting(&self, matrix: &Transformation, sink: &mut dyn DiagnosticSink) -> Self {
        if matrix.is_identity() {
            return self.clone();
        }
        if matrix.is_scale_translate(SCALE_TRANSLATE_EPSILON) {
            let kind = match &self.kind {
                ShapeKind::Line { from, to } => ShapeKind::Line {
                    from: matrix.apply_point(*from),
                    to: matrix.apply_point(*to),
                },
                ShapeKind::Measure { from, to } => ShapeKind::Measure {
                    from: matrix.apply_point(*from),
                    to: matrix.apply_point(*to),
                },
                ShapeKind::Rectangle { form_box, corner } => {
                    let corner = matrix.apply_direction(*corner);
                    ShapeKind::Rectangle {
                        form_box: matrix.apply_box(form_box),
                        corner: Vec2d::new(corner.x.abs(), corner.y.abs()),
                    }
                }
                ShapeKind::Circle { form_box } => ShapeKind::Circle {
                    form_box: matrix.apply_box(form_box),
                },
                ShapeKind::Arc { form_box, angles } => ShapeKind::Arc {
                    form_box: matrix.apply_box(form_box),
                    angles: mirror_angles(*angles, matrix),
                },
                ShapeKind::Pie { form_box, angles } => ShapeKind::Pie {
                    form_box: matrix.apply_box(form_box),
                    angles: mirror_angles(*angles, matrix),
                },
                ShapeKind::Polygon { vertices } => ShapeKind::Polygon {
                    vertices: vertices.iter().map(|v| matrix.apply_point(*v)).collect(),
                },
                ShapeKind::Polyline { vertices } => ShapeKind::Polyline {
                    vertices: vertices.iter().map(|v| matrix.apply_point(*v)).collect(),
                },
                ShapeKind::Path { commands } => ShapeKind::Path {
                    commands: transform_path(commands, matrix),
                },
                ShapeKind::Unknown => ShapeKind::Unknown,
            };
            return Self {
                bounding_box: matrix.apply_box(&self.bounding_box),
                kind,
            };
        }

        let commands = self.get_path(true);
        if commands.is_empty() {
            tracing::debug!(shape = %self, "Cannot transform a shape without path");
            return self.clone();
        }
        if matrix.decompose(self.bounding_box.center()).is_none() {
            sink.report(
                DiagnosticKind::BadDecomposition,
                &format!("cannot extract a rotation from {matrix}"),
            );
        }
        Self {
            bounding_box: matrix.apply_box(&self.bounding_box),
            kind: ShapeKind::Path {
                commands: transform_path(&commands, matrix),
            },
        }
    }

    /// The shape as path commands.
    ///
    /// With `for_transformation`, rounded corners, ellipses and arcs are
    /// approximated by cubic curves (at most a quarter turn each) so that a
    /// general affine transformation stays exact; otherwise they use arc
    /// commands. Returns an empty path for unknown shapes and polygons with
    /// fewer than two vertices.
    pub fn get_path(&self, for_transformation: bool) -> Vec<PathCommand> {
        match &self.kind {
            ShapeKind::Line { from, to } | ShapeKind::Measure { from, to } => {
                vec![PathCommand::MoveTo(*from), PathCommand::LineTo(*to)]
            }
            ShapeKind::Polygon { vertices } | ShapeKind::Polyline { vertices } => {
                if vertices.len() < 2 {
                    tracing::debug!(count = vertices.len(), "Polygon without enough vertices");
                    return Vec::new();
                }
                let mut res = Vec::with_capacity(vertices.len() + 1);
                res.push(PathCommand::MoveTo(vertices[0]));
                res.extend(vertices[1..].iter().map(|v| PathCommand::LineTo(*v)));
                if matches!(self.kind, ShapeKind::Polygon { .. }) {
                    res.push(PathCommand::Close);
                }
                res
            }
            ShapeKind::Rectangle { form_box, corner } => {
                rectangle_path(form_box, *corner, for_transformation)
            }
            ShapeKind::Circle { form_box } => ellipse_path(form_box, for_transformation),
            ShapeKind::Arc { form_box, angles } => {
                arc_path(form_box, *angles, false, for_transformation)
            }
            ShapeKind::Pie { form_box, angles } => {
                arc_path(form_box, *angles, true, for_transformation)
            }
            ShapeKind::Path { commands } => commands.clone(),
            ShapeKind::Unknown => {
                tracing::debug!("Unknown shape has no path");
                Vec::new()
            }
        }
    }

    /// Serializes the shape into `list`, coordinates shifted so that the
    /// bounding box starts at `origin`.
    ///
    /// Paths drawn `as_surface` are closed first, the renderer only fills
    /// closed paths.
    pub fn add_to(
        &self,
        origin: Vec2d,
        as_surface: bool,
        list: &mut PropertyList,
        sink: &mut dyn DiagnosticSink,
    ) -> DrawPrimitive {
        let delta = origin - self.bounding_box.min();
        match &self.kind {
            ShapeKind::Line { from, to } | ShapeKind::Measure { from, to } => {
                list.insert_list("svg:points", points_to_lists(&[*from + delta, *to + delta]));
                if matches!(self.kind, ShapeKind::Measure { .. }) {
                    list.insert_bool("draw:show-unit", true);
                }
                DrawPrimitive::Polyline
            }
            ShapeKind::Rectangle { form_box, corner } => {
                if corner.x > 0.0 && corner.y > 0.0 {
                    list.insert_point("svg:rx", corner.x);
                    list.insert_point("svg:ry", corner.y);
                }
                let min = form_box.min() + delta;
                let size = form_box.size();
                list.insert_point("svg:x", min.x);
                list.insert_point("svg:y", min.y);
                list.insert_point("svg:width", size.x);
                list.insert_point("svg:height", size.y);
                DrawPrimitive::Rectangle
            }
            ShapeKind::Circle { form_box } => {
                let center = form_box.center() + delta;
                let radius = form_box.size() * 0.5;
                list.insert_point("svg:cx", center.x);
                list.insert_point("svg:cy", center.y);
                list.insert_point("svg:rx", radius.x);
                list.insert_point("svg:ry", radius.y);
                DrawPrimitive::Ellipse
            }
            ShapeKind::Arc { .. } | ShapeKind::Pie { .. } => {
                let path = translate_path(&self.get_path(false), delta);
                list.insert_list("svg:d", path_to_lists(&path));
                DrawPrimitive::Path
            }
            ShapeKind::Polygon { vertices } | ShapeKind::Polyline { vertices } => {
                if vertices.len() < 2 {
                    sink.report(
                        DiagnosticKind::UnknownShape,
                        &format!("polygon with {} vertices", vertices.len()),
                    );
                    return DrawPrimitive::Bad;
                }
                let moved: Vec<Vec2d> = vertices.iter().map(|v| *v + delta).collect();
                list.insert_list("svg:points", points_to_lists(&moved));
                if matches!(self.kind, ShapeKind::Polygon { .. }) {
                    DrawPrimitive::Polygon
                } else {
                    DrawPrimitive::Polyline
                }
            }
            ShapeKind::Path { commands } => self.add_commands_to(commands, delta, as_surface, list, sink),
            ShapeKind::Unknown => {
                sink.report(DiagnosticKind::UnknownShape, "unknown shape type");
                DrawPrimitive::Bad
            }
        }
    }

    /// Serializes the path form of the shape, see [`add_to`](Self::add_to).
    pub fn add_path_to(
        &self,
        origin: Vec2d,
        as_surface: bool,
        list: &mut PropertyList,
        sink: &mut dyn DiagnosticSink,
    ) -> DrawPrimitive {
        let delta = origin - self.bounding_box.min();
        self.add_commands_to(&self.get_path(false), delta, as_surface, list, sink)
    }

    fn add_commands_to(
        &self,
        commands: &[PathCommand],
        delta: Vec2d,
        as_surface: bool,
        list: &mut PropertyList,
        sink: &mut dyn DiagnosticSink,
    ) -> DrawPrimitive {
        if commands.is_empty() {
            sink.report(DiagnosticKind::UnknownShape, &format!("no path for {self}"));
            return DrawPrimitive::Bad;
        }
        let mut path = translate_path(commands, delta);
        if as_surface && path.last() != Some(&PathCommand::Close) {
            path.push(PathCommand::Close);
        }
        list.insert_list("svg:d", path_to_lists(&path));
        DrawPrimitive::Path
    }

    /// The outline of the shape moved by `offset` along its normals.
    pub fn offset(&self, offset: f64) -> Option<Self> {
        let (commands, bounding_box) = offset_vertices(&self.get_path(true), offset)?;
        Some(Self {
            bounding_box,
            kind: ShapeKind::Path { commands },
        })
    }

    /// The path form as an SVG `d` attribute.
    pub fn to_svg_path(&self) -> String {
        path_to_svg(&self.get_path(false))
    }

    fn cmp_kind(&self, other: &Self) -> Ordering {
        match (&self.kind, &other.kind) {
            (ShapeKind::Line { from: f1, to: t1 }, ShapeKind::Line { from: f2, to: t2 })
            | (ShapeKind::Measure { from: f1, to: t1 }, ShapeKind::Measure { from: f2, to: t2 }) => {
                f1.cmp_y_major(f2).then_with(|| t1.cmp_y_major(t2))
            }
            (
                ShapeKind::Rectangle {
                    form_box: b1,
                    corner: c1,
                },
                ShapeKind::Rectangle {
                    form_box: b2,
                    corner: c2,
                },
            ) => b1.cmp_lexicographic(b2).then_with(|| c1.cmp_y_major(c2)),
            (ShapeKind::Circle { form_box: b1 }, ShapeKind::Circle { form_box: b2 }) => {
                b1.cmp_lexicographic(b2)
            }
            (
                ShapeKind::Arc {
                    form_box: b1,
                    angles: a1,
                },
                ShapeKind::Arc {
                    form_box: b2,
                    angles: a2,
                },
            )
            | (
                ShapeKind::Pie {
                    form_box: b1,
                    angles: a1,
                },
                ShapeKind::Pie {
                    form_box: b2,
                    angles: a2,
                },
            ) => b1.cmp_lexicographic(b2).then_with(|| a1.cmp_x_major(a2)),
            (ShapeKind::Polygon { vertices: v1 }, ShapeKind::Polygon { vertices: v2 })
            | (ShapeKind::Polyline { vertices: v1 }, ShapeKind::Polyline { vertices: v2 }) => v1
                .len()
                .cmp(&v2.len())
                .then_with(|| cmp_all(v1, v2, |a, b| a.cmp_y_major(b))),
            (ShapeKind::Path { commands: p1 }, ShapeKind::Path { commands: p2 }) => p1
                .len()
                .cmp(&p2.len())
                .then_with(|| cmp_all(p1, p2, PathCommand::cmp_total)),
            _ => Ordering::Equal,
        }
    }
}

fn cmp_all<T>(l: &[T], r: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    l.iter()
        .zip(r.iter())
        .map(|(a, b)| cmp(a, b))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Total order: kind, bounding box, then the kind's own data.
impl Ord for GraphicShape {
    fn cmp(&self, other: &Self) -> Ordering {
        self.shape_type()
            .cmp(&other.shape_type())
            .then_with(|| self.bounding_box.cmp_lexicographic(&other.bounding_box))
            .then_with(|| self.cmp_kind(other))
    }
}

impl PartialOrd for GraphicShape {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GraphicShape {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GraphicShape {}

impl fmt::Display for GraphicShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[box={}", self.shape_type(), self.bounding_box)?;
        match &self.kind {
            ShapeKind::Line { from, to } | ShapeKind::Measure { from, to } => {
                write!(f, ",from={from},to={to}")?
            }
            ShapeKind::Rectangle { form_box, corner } => {
                write!(f, ",form={form_box}")?;
                if corner.x > 0.0 || corner.y > 0.0 {
                    write!(f, ",corner={corner}")?;
                }
            }
            ShapeKind::Circle { form_box } => write!(f, ",form={form_box}")?,
            ShapeKind::Arc { form_box, angles } | ShapeKind::Pie { form_box, angles } => {
                write!(f, ",form={form_box},angles={angles}")?
            }
            ShapeKind::Polygon { vertices } | ShapeKind::Polyline { vertices } => {
                write!(f, ",vertices=[")?;
                for (i, v) in vertices.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")?;
            }
            ShapeKind::Path { commands } => write!(f, ",path=[{}]", path_to_svg(commands))?,
            ShapeKind::Unknown => {}
        }
        write!(f, "]")
    }
}

fn points_to_lists(points: &[Vec2d]) -> Vec<PropertyList> {
    points
        .iter()
        .map(|p| {
            let mut list = PropertyList::new();
            list.insert_point("svg:x", p.x);
            list.insert_point("svg:y", p.y);
            list
        })
        .collect()
}

/// Arc angles after a mirror: the sweep direction is reversed, so the two
/// ends swap.
fn mirror_angles(angles: Vec2d, matrix: &Transformation) -> Vec2d {
    let mut res = angles;
    if matrix.row(0).x < 0.0 {
        res = Vec2d::new(180.0 - res.y, 180.0 - res.x);
    }
    if matrix.row(1).y < 0.0 {
        res = Vec2d::new(-res.y, -res.x);
    }
    res
}

/// Cubic quarter of an ellipse from `from` to `to`, `corner` being the
/// corner of the enclosing box between them.
fn quarter(from: Vec2d, corner: Vec2d, to: Vec2d) -> PathCommand {
    PathCommand::CubicTo {
        ctrl1: from + (corner - from) * BEZIER_CIRCLE,
        ctrl2: to + (corner - to) * BEZIER_CIRCLE,
        to,
    }
}

fn corner_arc(radius: Vec2d, to: Vec2d) -> PathCommand {
    PathCommand::ArcTo {
        radius,
        rotation: 0.0,
        large_arc: false,
        sweep: true,
        to,
    }
}

/// Path of a rectangle, starting on the `min.y` edge where the first
/// corner begins.
///
/// Rounded corners give nine commands: `M`, then an arc per corner with a
/// line between consecutive arcs, then `Z` (the last edge is the closing
/// one). Four corner arcs do not fit in fewer. With `for_transformation`
/// each arc is a cubic using the 0.55228 circle factor. Square corners give
/// `M`, three `L` and `Z`.
fn rectangle_path(form_box: &Box2d, corner: Vec2d, for_transformation: bool) -> Vec<PathCommand> {
    let (min, max) = (form_box.min(), form_box.max());
    if corner.x <= 0.0 || corner.y <= 0.0 {
        return vec![
            PathCommand::MoveTo(min),
            PathCommand::LineTo(Vec2d::new(min.x, max.y)),
            PathCommand::LineTo(max),
            PathCommand::LineTo(Vec2d::new(max.x, min.y)),
            PathCommand::Close,
        ];
    }
    let size = form_box.size();
    let c = Vec2d::new(corner.x.min(size.x / 2.0), corner.y.min(size.y / 2.0));
    // clockwise from the top edge; each entry is (corner, arc end, next line end)
    let corners = [
        (
            Vec2d::new(max.x, min.y),
            Vec2d::new(max.x, min.y + c.y),
            Vec2d::new(max.x, max.y - c.y),
        ),
        (
            max,
            Vec2d::new(max.x - c.x, max.y),
            Vec2d::new(min.x + c.x, max.y),
        ),
        (
            Vec2d::new(min.x, max.y),
            Vec2d::new(min.x, max.y - c.y),
            Vec2d::new(min.x, min.y + c.y),
        ),
        (min, Vec2d::new(min.x + c.x, min.y), Vec2d::new(max.x - c.x, min.y)),
    ];
    let mut current = Vec2d::new(max.x - c.x, min.y);
    let mut res = vec![PathCommand::MoveTo(current)];
    for (i, (corner_point, arc_end, line_end)) in corners.into_iter().enumerate() {
        res.push(if for_transformation {
            quarter(current, corner_point, arc_end)
        } else {
            corner_arc(c, arc_end)
        });
        if i + 1 < corners.len() {
            res.push(PathCommand::LineTo(line_end));
        }
        current = line_end;
    }
    res.push(PathCommand::Close);
    res
}

fn ellipse_path(form_box: &Box2d, for_transformation: bool) -> Vec<PathCommand> {
    let (min, max) = (form_box.min(), form_box.max());
    let center = form_box.center();
    let left = Vec2d::new(min.x, center.y);
    let right = Vec2d::new(max.x, center.y);
    if for_transformation {
        let bottom = Vec2d::new(center.x, max.y);
        let top = Vec2d::new(center.x, min.y);
        return vec![
            PathCommand::MoveTo(right),
            quarter(right, max, bottom),
            quarter(bottom, Vec2d::new(min.x, max.y), left),
            quarter(left, min, top),
            quarter(top, Vec2d::new(max.x, min.y), right),
            PathCommand::Close,
        ];
    }
    let radius = form_box.size() * 0.5;
    let half = |to| PathCommand::ArcTo {
        radius,
        rotation: 0.0,
        large_arc: true,
        sweep: true,
        to,
    };
    vec![
        PathCommand::MoveTo(left),
        half(right),
        half(left),
        PathCommand::Close,
    ]
}

fn arc_path(form_box: &Box2d, angles: Vec2d, pie: bool, for_transformation: bool) -> Vec<PathCommand> {
    let center = form_box.center();
    let radius = form_box.size() * 0.5;
    let start = angles.x;
    let mut span = (angles.y - angles.x).rem_euclid(360.0);
    if span == 0.0 && angles.y != angles.x {
        span = 360.0;
    }
    // an exact half turn leaves the large arc flag ambiguous
    if (180.0..=180.02).contains(&span) {
        span += 0.01;
    }
    let point = |deg: f64| {
        let (s, c) = deg.to_radians().sin_cos();
        Vec2d::new(center.x + c * radius.x, center.y - s * radius.y)
    };

    let mut res = Vec::new();
    if pie {
        res.push(PathCommand::MoveTo(center));
        res.push(PathCommand::LineTo(point(start)));
    } else {
        res.push(PathCommand::MoveTo(point(start)));
    }
    if for_transformation {
        let count = (span / 90.0).ceil().max(1.0) as usize;
        let step = span / count as f64;
        let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();
        let derivative = |deg: f64| {
            let (s, c) = deg.to_radians().sin_cos();
            Vec2d::new(-s * radius.x, -c * radius.y)
        };
        for i in 0..count {
            let t0 = start + step * i as f64;
            let t1 = t0 + step;
            res.push(PathCommand::CubicTo {
                ctrl1: point(t0) + derivative(t0) * k,
                ctrl2: point(t1) - derivative(t1) * k,
                to: point(t1),
            });
        }
    } else {
        res.push(PathCommand::ArcTo {
            radius,
            rotation: 0.0,
            large_arc: span >= 180.0,
            sweep: false,
            to: point(start + span),
        });
    }
    if pie {
        res.push(PathCommand::Close);
    }
    res
}
