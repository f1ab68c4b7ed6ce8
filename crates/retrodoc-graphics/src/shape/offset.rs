//! Path offsetting
//!
//! Moves every vertex of a path along the normal of its local tangent, which
//! turns a stroke into an outline or insets/outsets a closed contour.
//!
//! The path is split into components at `M` and `Z`. Inside a component the
//! tangent at a vertex is the normalized sum of the unit directions of the
//! incoming and outgoing edges. Zero-length edges are skipped by walking to
//! the next distinct vertex in the same direction, so runs of repeated points
//! do not break the tangent estimate. When the two directions cancel out (the
//! path turns back on itself) the incoming direction is used.
//!
//! The displacement is `offset` times the left normal `(-t.y, t.x)` of the
//! tangent `t`. Control points follow the vertex that governs them: the
//! first control of a cubic and the control of a quadratic move with the
//! segment start, the second control of a cubic (and the control of `S`)
//! with the segment end. Arc radii are kept.

use retrodoc_core::{Box2d, Vec2d};

use super::path::{advance, PathCommand};

/// A run of commands sharing one vertex sequence.
struct Component {
    /// Index of the first command of the component.
    first: usize,
    /// One past the last command (the `Z` included when closed).
    end: usize,
    closed: bool,
}

fn split_components(path: &[PathCommand]) -> Vec<Component> {
    let mut components = Vec::new();
    let mut first = 0;
    for (i, command) in path.iter().enumerate() {
        match command {
            PathCommand::MoveTo(_) if i > first => {
                components.push(Component {
                    first,
                    end: i,
                    closed: false,
                });
                first = i;
            }
            PathCommand::Close => {
                components.push(Component {
                    first,
                    end: i + 1,
                    closed: true,
                });
                first = i + 1;
            }
            _ => {}
        }
    }
    if first < path.len() {
        components.push(Component {
            first,
            end: path.len(),
            closed: false,
        });
    }
    components
}

/// Unit direction from vertex `i` towards the nearest distinct vertex
/// reached by stepping `step` (+1 forward, -1 backward).
fn direction(points: &[Vec2d], i: usize, step: isize, wrap: bool) -> Option<Vec2d> {
    let n = points.len() as isize;
    let mut j = i as isize;
    for _ in 1..n {
        j += step;
        if wrap {
            j = j.rem_euclid(n);
        } else if j < 0 || j >= n {
            return None;
        }
        if j as usize == i {
            return None;
        }
        let delta = if step > 0 {
            points[j as usize] - points[i]
        } else {
            points[i] - points[j as usize]
        };
        if let Some(unit) = delta.normalized() {
            return Some(unit);
        }
    }
    None
}

fn displacements(points: &[Vec2d], closed: bool, offset: f64) -> Vec<Vec2d> {
    (0..points.len())
        .map(|i| {
            let incoming = direction(points, i, -1, closed);
            let outgoing = direction(points, i, 1, closed);
            let tangent = match (incoming, outgoing) {
                (Some(a), Some(b)) => (a + b).normalized().unwrap_or(a),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => return Vec2d::zero(),
            };
            tangent.perpendicular() * offset
        })
        .collect()
}

/// Offsets every vertex of `path` by `offset` along its normal.
///
/// Returns the displaced path (same commands, same length, `Z` kept) and
/// the bounding box of the displaced vertices, or `None` when the path has
/// no vertex.
pub fn offset_vertices(path: &[PathCommand], offset: f64) -> Option<(Vec<PathCommand>, Box2d)> {
    let mut result = path.to_vec();
    let mut bbox: Option<Box2d> = None;
    let mut current = Vec2d::zero();
    let mut start = Vec2d::zero();

    for component in split_components(path) {
        // vertex of every command; None for Z
        let mut ends = Vec::with_capacity(component.end - component.first);
        for command in &path[component.first..component.end] {
            ends.push(command.end_point(current));
            advance(command, &mut current, &mut start);
        }
        let mut points: Vec<Vec2d> = ends.iter().flatten().copied().collect();
        if points.is_empty() {
            continue;
        }
        // the closing vertex of a closed contour duplicates the first one
        let duplicate_end = component.closed
            && points.len() > 1
            && points[points.len() - 1].approx_eq(points[0], 1e-9);
        if duplicate_end {
            points.pop();
        }
        let mut moves = displacements(&points, component.closed, offset);
        if duplicate_end {
            moves.push(moves[0]);
        }

        let mut vertex = 0usize;
        for (k, command) in path[component.first..component.end].iter().enumerate() {
            let Some(end) = ends[k] else {
                continue;
            };
            let end_move = moves[vertex];
            let start_move = if vertex > 0 {
                moves[vertex - 1]
            } else {
                Vec2d::zero()
            };
            let displaced_end = end + end_move;
            result[component.first + k] = match *command {
                PathCommand::MoveTo(to) => PathCommand::MoveTo(to + end_move),
                PathCommand::LineTo(to) => PathCommand::LineTo(to + end_move),
                PathCommand::HorizontalTo(_) | PathCommand::VerticalTo(_) => {
                    PathCommand::LineTo(displaced_end)
                }
                PathCommand::SmoothQuadTo(to) => PathCommand::SmoothQuadTo(to + end_move),
                PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo {
                    ctrl: ctrl + start_move,
                    to: to + end_move,
                },
                PathCommand::SmoothCubicTo { ctrl, to } => PathCommand::SmoothCubicTo {
                    ctrl: ctrl + end_move,
                    to: to + end_move,
                },
                PathCommand::CubicTo { ctrl1, ctrl2, to } => PathCommand::CubicTo {
                    ctrl1: ctrl1 + start_move,
                    ctrl2: ctrl2 + end_move,
                    to: to + end_move,
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
                    to: to + end_move,
                },
                PathCommand::Close => PathCommand::Close,
            };
            let point_box = Box2d::from_point(displaced_end);
            bbox = Some(match bbox {
                Some(b) => b.union(&point_box),
                None => point_box,
            });
            vertex += 1;
        }
    }
    bbox.map(|b| (result, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo(Vec2d::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2d::new(10.0, 0.0)),
            PathCommand::LineTo(Vec2d::new(10.0, 10.0)),
            PathCommand::LineTo(Vec2d::new(0.0, 10.0)),
            PathCommand::LineTo(Vec2d::new(0.0, 0.0)),
            PathCommand::Close,
        ]
    }

    #[test]
    fn test_closed_path_keeps_shape() {
        let path = square();
        let (out, bbox) = offset_vertices(&path, 1.0).unwrap();
        assert_eq!(out.len(), path.len());
        assert_eq!(out.last(), Some(&PathCommand::Close));
        // corners move along the diagonal by exactly the offset, inwards
        // for this orientation
        let h = std::f64::consts::FRAC_1_SQRT_2;
        match out[0] {
            PathCommand::MoveTo(p) => assert!(p.approx_eq(Vec2d::new(h, h), 1e-9)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(out[0].end_point(Vec2d::zero()), out[4].end_point(Vec2d::zero()));
        assert!(bbox.approx_eq(
            &Box2d::new(Vec2d::new(h, h), Vec2d::new(10.0 - h, 10.0 - h)),
            1e-9
        ));

        let (outset, _) = offset_vertices(&path, -1.0).unwrap();
        match outset[2] {
            PathCommand::LineTo(p) => assert!(p.approx_eq(Vec2d::new(10.0 + h, 10.0 + h), 1e-9)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_open_line_moves_along_normal() {
        let path = [
            PathCommand::MoveTo(Vec2d::new(0.0, 0.0)),
            PathCommand::HorizontalTo(5.0),
        ];
        let (out, bbox) = offset_vertices(&path, 2.0).unwrap();
        assert_eq!(out[1], PathCommand::LineTo(Vec2d::new(5.0, 2.0)));
        assert_eq!(bbox, Box2d::new(Vec2d::new(0.0, 2.0), Vec2d::new(5.0, 2.0)));
    }

    #[test]
    fn test_consecutive_degenerate_edges() {
        let path = [
            PathCommand::MoveTo(Vec2d::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2d::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2d::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2d::new(4.0, 0.0)),
        ];
        let (out, _) = offset_vertices(&path, 1.0).unwrap();
        for command in &out {
            let p = command.end_point(Vec2d::zero()).unwrap();
            assert!((p.y - 1.0).abs() < 1e-12, "{command:?}");
        }
    }

    #[test]
    fn test_reversal_uses_incoming_direction() {
        let path = [
            PathCommand::MoveTo(Vec2d::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2d::new(4.0, 0.0)),
            PathCommand::LineTo(Vec2d::new(0.0, 0.0)),
        ];
        let (out, _) = offset_vertices(&path, 1.0).unwrap();
        assert_eq!(out[1], PathCommand::LineTo(Vec2d::new(4.0, 1.0)));
    }

    #[test]
    fn test_control_points_follow_their_vertex() {
        let path = [
            PathCommand::MoveTo(Vec2d::new(0.0, 0.0)),
            PathCommand::CubicTo {
                ctrl1: Vec2d::new(1.0, 0.0),
                ctrl2: Vec2d::new(2.0, 0.0),
                to: Vec2d::new(3.0, 0.0),
            },
            PathCommand::QuadTo {
                ctrl: Vec2d::new(4.0, 0.0),
                to: Vec2d::new(5.0, 0.0),
            },
        ];
        let (out, _) = offset_vertices(&path, 1.0).unwrap();
        assert_eq!(
            out[1],
            PathCommand::CubicTo {
                ctrl1: Vec2d::new(1.0, 1.0),
                ctrl2: Vec2d::new(2.0, 1.0),
                to: Vec2d::new(3.0, 1.0),
            }
        );
        assert_eq!(
            out[2],
            PathCommand::QuadTo {
                ctrl: Vec2d::new(4.0, 1.0),
                to: Vec2d::new(5.0, 1.0),
            }
        );
    }

    #[test]
    fn test_empty_path() {
        assert!(offset_vertices(&[], 1.0).is_none());
        assert!(offset_vertices(&[PathCommand::Close], 1.0).is_none());
    }
}
