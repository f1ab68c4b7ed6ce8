//! Property-Based Tests
//!
//! Laws of the shape model:
//! - scale + translation round trips keep the bounding box
//! - full turns leave shapes untouched
//! - offsetting a closed contour keeps its commands

use proptest::prelude::*;
use retrodoc_core::{Box2d, Transformation, Vec2d};
use retrodoc_graphics::{offset_vertices, GraphicShape, PathCommand};

fn any_box() -> impl Strategy<Value = Box2d> {
    (-1e3f64..1e3, -1e3f64..1e3, 1.0f64..500.0, 1.0f64..500.0)
        .prop_map(|(x, y, w, h)| Box2d::new(Vec2d::new(x, y), Vec2d::new(x + w, y + h)))
}

fn any_shape() -> impl Strategy<Value = GraphicShape> {
    (any_box(), 0usize..5, -360.0f64..360.0, 0.0f64..360.0).prop_map(|(b, kind, a0, span)| {
        match kind {
            0 => GraphicShape::rectangle(b, Vec2d::new(3.0, 2.0)),
            1 => GraphicShape::circle(b),
            2 => GraphicShape::pie(b, b, Vec2d::new(a0, a0 + span)),
            3 => GraphicShape::polygon(b.corners().to_vec()),
            _ => GraphicShape::line(b.min(), b.max()),
        }
    })
}

fn non_zero_factor() -> impl Strategy<Value = f64> {
    prop_oneof![0.1f64..10.0, -10.0f64..-0.1]
}

#[test]
fn proptest_scale_translate_round_trip() {
    proptest!(|(
        shape in any_shape(),
        sx in non_zero_factor(),
        sy in non_zero_factor(),
        dx in -1e3f64..1e3,
        dy in -1e3f64..1e3,
    )| {
        let matrix = Transformation::translation(Vec2d::new(dx, dy))
            * Transformation::scale(Vec2d::new(sx, sy));
        let inverse = matrix.inverse().unwrap();
        let back = shape.transform(&matrix).transform(&inverse);
        prop_assert_eq!(back.shape_type(), shape.shape_type());
        prop_assert!(back.bounding_box().approx_eq(&shape.bounding_box(), 1e-6));
    });
}

#[test]
fn proptest_full_turns_are_no_ops() {
    proptest!(|(
        shape in any_shape(),
        turns in -3i32..4,
        cx in -1e3f64..1e3,
        cy in -1e3f64..1e3,
    )| {
        let rotated = shape.rotate(360.0 * f64::from(turns), Vec2d::new(cx, cy));
        prop_assert_eq!(rotated, shape);
    });
}

#[test]
fn proptest_rotation_contains_rotated_corners() {
    proptest!(|(shape in any_shape(), angle in 1.0f64..359.0)| {
        let center = shape.bounding_box().center();
        let rotated = shape.rotate(angle, center);
        let matrix = Transformation::rotation(angle, center);
        let grown = rotated.bounding_box().extend(1e-6);
        for corner in shape.bounding_box().corners() {
            prop_assert!(grown.contains(matrix.apply_point(corner)));
        }
    });
}

#[test]
fn proptest_offset_keeps_closed_contours() {
    proptest!(|(
        points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..12),
        offset in -5.0f64..5.0,
    )| {
        let mut path: Vec<PathCommand> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let p = Vec2d::new(x, y);
                if i == 0 { PathCommand::MoveTo(p) } else { PathCommand::LineTo(p) }
            })
            .collect();
        path.push(PathCommand::LineTo(Vec2d::new(points[0].0, points[0].1)));
        path.push(PathCommand::Close);

        let (out, _) = offset_vertices(&path, offset).unwrap();
        prop_assert_eq!(out.len(), path.len());
        prop_assert_eq!(out.last(), Some(&PathCommand::Close));
        prop_assert_eq!(out[0].end_point(Vec2d::zero()), out[out.len() - 2].end_point(Vec2d::zero()));
    });
}
