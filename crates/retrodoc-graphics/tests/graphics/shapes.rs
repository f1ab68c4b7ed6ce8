use retrodoc_core::{Box2d, Collector, DiagnosticKind, Ignore, PropertyList, Transformation, Vec2d};
use retrodoc_graphics::{DrawPrimitive, GraphicShape, PathCommand, ShapeKind, ShapeType};

fn square() -> Box2d {
    Box2d::new(Vec2d::new(0.0, 0.0), Vec2d::new(10.0, 10.0))
}

fn end_points(path: &[PathCommand]) -> Vec<Vec2d> {
    let mut current = Vec2d::zero();
    let mut res = Vec::new();
    for command in path {
        if let Some(p) = command.end_point(current) {
            res.push(p);
            current = p;
        }
    }
    res
}

#[test]
fn test_rounded_rectangle_path() {
    let shape = GraphicShape::rectangle(square(), Vec2d::new(2.0, 2.0));
    let path = shape.get_path(false);
    assert_eq!(path[0], PathCommand::MoveTo(Vec2d::new(8.0, 0.0)));
    assert_eq!(path.last(), Some(&PathCommand::Close));
    assert_eq!(path.iter().filter(|c| c.tag() == 'A').count(), 4);
    assert_eq!(path.iter().filter(|c| c.tag() == 'L').count(), 3);
    assert_eq!(
        end_points(&path),
        vec![
            Vec2d::new(8.0, 0.0),
            Vec2d::new(10.0, 2.0),
            Vec2d::new(10.0, 8.0),
            Vec2d::new(8.0, 10.0),
            Vec2d::new(2.0, 10.0),
            Vec2d::new(0.0, 8.0),
            Vec2d::new(0.0, 2.0),
            Vec2d::new(2.0, 0.0),
        ]
    );
}

#[test]
fn test_rounded_rectangle_curves_for_transformation() {
    let shape = GraphicShape::rectangle(square(), Vec2d::new(2.0, 2.0));
    let arcs = shape.get_path(false);
    let curves = shape.get_path(true);
    assert_eq!(arcs.len(), curves.len());
    assert_eq!(curves.iter().filter(|c| c.tag() == 'C').count(), 4);
    assert_eq!(end_points(&arcs), end_points(&curves));
    match curves[1] {
        PathCommand::CubicTo { ctrl1, ctrl2, to } => {
            assert!(ctrl1.approx_eq(Vec2d::new(8.0 + 2.0 * 0.55228, 0.0), 1e-9));
            assert!(ctrl2.approx_eq(Vec2d::new(10.0, 2.0 - 2.0 * 0.55228), 1e-9));
            assert_eq!(to, Vec2d::new(10.0, 2.0));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_corner_is_clamped_to_half_size() {
    let shape = GraphicShape::rectangle(square(), Vec2d::new(20.0, 1.0));
    let path = shape.get_path(false);
    assert_eq!(path[0], PathCommand::MoveTo(Vec2d::new(5.0, 0.0)));
}

#[test]
fn test_plain_rectangle_path() {
    let path = GraphicShape::rectangle(square(), Vec2d::zero()).get_path(false);
    assert_eq!(path.len(), 5);
    assert_eq!(path[0], PathCommand::MoveTo(Vec2d::zero()));
    assert_eq!(path[4], PathCommand::Close);
}

#[test]
fn test_line_box_is_canonical() {
    let line = GraphicShape::line(Vec2d::new(10.0, 0.0), Vec2d::new(0.0, 5.0));
    assert_eq!(line.bounding_box().min(), Vec2d::new(0.0, 0.0));
    assert_eq!(line.bounding_box().max(), Vec2d::new(10.0, 5.0));
    assert_eq!(line.end_points(), Some((Vec2d::new(10.0, 0.0), Vec2d::new(0.0, 5.0))));
    assert_eq!(line.vertices(), None);
}

#[test]
fn test_arc_path() {
    let arc = GraphicShape::arc(square(), square(), Vec2d::new(0.0, 90.0));
    let path = arc.get_path(false);
    assert_eq!(path.len(), 2);
    assert_eq!(path[0], PathCommand::MoveTo(Vec2d::new(10.0, 5.0)));
    match path[1] {
        PathCommand::ArcTo {
            radius,
            large_arc,
            sweep,
            to,
            ..
        } => {
            assert_eq!(radius, Vec2d::new(5.0, 5.0));
            assert!(!large_arc);
            assert!(!sweep);
            assert!(to.approx_eq(Vec2d::new(5.0, 0.0), 1e-9));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_pie_is_closed_through_center() {
    let pie = GraphicShape::pie(square(), square(), Vec2d::new(0.0, 90.0));
    let path = pie.get_path(false);
    assert_eq!(path[0], PathCommand::MoveTo(Vec2d::new(5.0, 5.0)));
    assert_eq!(path[1], PathCommand::LineTo(Vec2d::new(10.0, 5.0)));
    assert_eq!(path.last(), Some(&PathCommand::Close));
}

#[test]
fn test_half_turn_uses_large_arc() {
    let arc = GraphicShape::arc(square(), square(), Vec2d::new(0.0, 180.0));
    match arc.get_path(false)[1] {
        PathCommand::ArcTo { large_arc, .. } => assert!(large_arc),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_arc_curves_are_quarters() {
    let arc = GraphicShape::arc(square(), square(), Vec2d::new(0.0, 270.0));
    let path = arc.get_path(true);
    assert_eq!(path.len(), 4);
    let ends = end_points(&path);
    assert!(ends[1].approx_eq(Vec2d::new(5.0, 0.0), 1e-9));
    assert!(ends[2].approx_eq(Vec2d::new(0.0, 5.0), 1e-9));
    assert!(ends[3].approx_eq(Vec2d::new(5.0, 10.0), 1e-9));

    // angles wrap around
    let wrapped = GraphicShape::arc(square(), square(), Vec2d::new(270.0, 0.0));
    assert_eq!(wrapped.get_path(true).len(), 2);
}

#[test]
fn test_circle_paths() {
    let circle = GraphicShape::circle(square());
    let arcs = circle.get_path(false);
    assert_eq!(arcs[0], PathCommand::MoveTo(Vec2d::new(0.0, 5.0)));
    assert_eq!(arcs.iter().filter(|c| c.tag() == 'A').count(), 2);
    let curves = circle.get_path(true);
    assert_eq!(curves.iter().filter(|c| c.tag() == 'C').count(), 4);
    assert_eq!(curves.last(), Some(&PathCommand::Close));
}

#[test]
fn test_polygon_paths() {
    let vertices = vec![Vec2d::new(0.0, 0.0), Vec2d::new(4.0, 0.0), Vec2d::new(4.0, 3.0)];
    let polygon = GraphicShape::polygon(vertices.clone());
    assert_eq!(polygon.get_path(false).len(), 4);
    assert_eq!(polygon.get_path(false).last(), Some(&PathCommand::Close));
    let polyline = GraphicShape::polyline(vertices);
    assert_eq!(polyline.get_path(false).len(), 3);
    assert!(GraphicShape::polygon(vec![Vec2d::zero()]).get_path(false).is_empty());
    assert_eq!(
        polygon.bounding_box(),
        Box2d::new(Vec2d::zero(), Vec2d::new(4.0, 3.0))
    );
}

#[test]
fn test_rotate_full_turn_is_a_no_op() {
    let shape = GraphicShape::rectangle(square(), Vec2d::new(2.0, 2.0));
    let rotated = shape.rotate(360.0, Vec2d::new(3.0, 7.0));
    assert_eq!(rotated.shape_type(), ShapeType::Rectangle);
    assert_eq!(rotated, shape);
    assert_eq!(shape.rotate(-720.0, Vec2d::zero()), shape);
    assert_eq!(shape.rotate(0.0005, Vec2d::zero()), shape);
}

#[test]
fn test_rotate_quarter_turn() {
    let shape = GraphicShape::rectangle(
        Box2d::new(Vec2d::new(0.0, 0.0), Vec2d::new(10.0, 4.0)),
        Vec2d::zero(),
    );
    let rotated = shape.rotate(90.0, Vec2d::new(5.0, 2.0));
    assert_eq!(rotated.shape_type(), ShapeType::Path);
    assert!(rotated.bounding_box().approx_eq(
        &Box2d::new(Vec2d::new(3.0, -3.0), Vec2d::new(7.0, 7.0)),
        1e-9
    ));
    let path = rotated.path_commands().unwrap();
    assert_eq!(path.len(), 5);
    for p in end_points(path) {
        assert!(rotated.bounding_box().extend(1e-9).contains(p));
    }
}

#[test]
fn test_scale_keeps_kind() {
    let circle = GraphicShape::circle(square());
    let scaled = circle.scale(Vec2d::new(2.0, 0.5));
    assert_eq!(scaled.shape_type(), ShapeType::Circle);
    assert_eq!(
        scaled.form_box(),
        Some(Box2d::new(Vec2d::zero(), Vec2d::new(20.0, 5.0)))
    );
}

#[test]
fn test_translate_moves_every_vertex() {
    let polyline = GraphicShape::polyline(vec![Vec2d::new(0.0, 0.0), Vec2d::new(1.0, 2.0)]);
    let moved = polyline.translate(Vec2d::new(3.0, 4.0));
    assert_eq!(
        moved.vertices(),
        Some(&[Vec2d::new(3.0, 4.0), Vec2d::new(4.0, 6.0)][..])
    );
    assert_eq!(moved.bounding_box().min(), Vec2d::new(3.0, 4.0));
}

#[test]
fn test_mirror_flips_arc_angles() {
    let arc = GraphicShape::arc(square(), square(), Vec2d::new(0.0, 90.0));
    let mirrored = arc.transform(&Transformation::scale(Vec2d::new(-1.0, 1.0)));
    assert_eq!(mirrored.arc_angles(), Some(Vec2d::new(90.0, 180.0)));
    let flipped = arc.transform(&Transformation::scale(Vec2d::new(1.0, -1.0)));
    assert_eq!(flipped.arc_angles(), Some(Vec2d::new(-90.0, 0.0)));
}

#[test]
fn test_shear_turns_shape_into_path() {
    let shape = GraphicShape::rectangle(square(), Vec2d::zero());
    let shear = Transformation::shear(Vec2d::new(0.5, 0.0), Vec2d::zero());
    let sheared = shape.transform(&shear);
    assert_eq!(sheared.shape_type(), ShapeType::Path);
    assert_eq!(sheared.bounding_box(), shear.apply_box(&square()));
}

#[test]
fn test_unknown_shape_is_bad() {
    let shape = GraphicShape::default();
    let mut list = PropertyList::new();
    let mut sink = Collector::new();
    assert_eq!(
        shape.add_to(Vec2d::zero(), false, &mut list, &mut sink),
        DrawPrimitive::Bad
    );
    assert!(list.is_empty());
    assert_eq!(sink.count(DiagnosticKind::UnknownShape), 1);
    assert_eq!(shape.rotate(45.0, Vec2d::zero()).kind(), &ShapeKind::Unknown);
}

#[test]
fn test_add_to_rectangle_relative_to_origin() {
    let shape = GraphicShape::rectangle(
        Box2d::new(Vec2d::new(10.0, 20.0), Vec2d::new(30.0, 60.0)),
        Vec2d::new(3.0, 3.0),
    );
    let mut list = PropertyList::new();
    let primitive = shape.add_to(Vec2d::new(1.0, 1.0), false, &mut list, &mut Ignore);
    assert_eq!(primitive, DrawPrimitive::Rectangle);
    assert_eq!(list.get_double("svg:x").unwrap(), 1.0);
    assert_eq!(list.get_double("svg:y").unwrap(), 1.0);
    assert_eq!(list.get_double("svg:width").unwrap(), 20.0);
    assert_eq!(list.get_double("svg:height").unwrap(), 40.0);
    assert_eq!(list.get_double("svg:rx").unwrap(), 3.0);
}

#[test]
fn test_add_to_circle() {
    let shape = GraphicShape::circle(Box2d::new(Vec2d::zero(), Vec2d::new(10.0, 20.0)));
    let mut list = PropertyList::new();
    assert_eq!(
        shape.add_to(Vec2d::zero(), true, &mut list, &mut Ignore),
        DrawPrimitive::Ellipse
    );
    assert_eq!(list.get_double("svg:cx").unwrap(), 5.0);
    assert_eq!(list.get_double("svg:cy").unwrap(), 10.0);
    assert_eq!(list.get_double("svg:rx").unwrap(), 5.0);
    assert_eq!(list.get_double("svg:ry").unwrap(), 10.0);
}

#[test]
fn test_add_to_measure_shows_unit() {
    let shape = GraphicShape::measure(Vec2d::new(0.0, 0.0), Vec2d::new(5.0, 0.0));
    let mut list = PropertyList::new();
    assert_eq!(
        shape.add_to(Vec2d::zero(), false, &mut list, &mut Ignore),
        DrawPrimitive::Polyline
    );
    assert!(list.get_bool("draw:show-unit").unwrap());
    assert_eq!(list.get_list("svg:points").unwrap().len(), 2);
}

#[test]
fn test_surface_path_is_closed() {
    let shape = GraphicShape::path(vec![
        PathCommand::MoveTo(Vec2d::new(0.0, 0.0)),
        PathCommand::LineTo(Vec2d::new(4.0, 0.0)),
        PathCommand::LineTo(Vec2d::new(4.0, 4.0)),
    ]);
    let mut list = PropertyList::new();
    assert_eq!(
        shape.add_to(Vec2d::zero(), true, &mut list, &mut Ignore),
        DrawPrimitive::Path
    );
    let commands = list.get_list("svg:d").unwrap();
    assert_eq!(commands.len(), 4);
    assert_eq!(
        commands[3].get_str("librevenge:path-action").unwrap(),
        "Z"
    );

    let mut open = PropertyList::new();
    shape.add_to(Vec2d::zero(), false, &mut open, &mut Ignore);
    assert_eq!(open.get_list("svg:d").unwrap().len(), 3);
}

#[test]
fn test_add_path_to_uses_path_form() {
    let shape = GraphicShape::circle(square());
    let mut list = PropertyList::new();
    assert_eq!(
        shape.add_path_to(Vec2d::zero(), false, &mut list, &mut Ignore),
        DrawPrimitive::Path
    );
    let commands = list.get_list("svg:d").unwrap();
    assert_eq!(commands[1].get_str("librevenge:path-action").unwrap(), "A");
}

#[test]
fn test_path_bounding_box_covers_controls() {
    let shape = GraphicShape::path(vec![
        PathCommand::MoveTo(Vec2d::new(0.0, 0.0)),
        PathCommand::CubicTo {
            ctrl1: Vec2d::new(0.0, -5.0),
            ctrl2: Vec2d::new(10.0, -5.0),
            to: Vec2d::new(10.0, 0.0),
        },
        PathCommand::VerticalTo(3.0),
    ]);
    assert_eq!(
        shape.bounding_box(),
        Box2d::new(Vec2d::new(0.0, -5.0), Vec2d::new(10.0, 3.0))
    );
}

#[test]
fn test_offset_square() {
    let shape = GraphicShape::polygon(vec![
        Vec2d::new(0.0, 0.0),
        Vec2d::new(10.0, 0.0),
        Vec2d::new(10.0, 10.0),
        Vec2d::new(0.0, 10.0),
    ]);
    let inset = shape.offset(1.0).unwrap();
    let path = inset.path_commands().unwrap();
    assert_eq!(path.len(), 5);
    assert_eq!(path.last(), Some(&PathCommand::Close));
    assert!(square().contains(inset.bounding_box().min()));
    assert!(square().contains(inset.bounding_box().max()));
    assert!(GraphicShape::default().offset(1.0).is_none());
}

#[test]
fn test_ordering_deduplicates() {
    let mut shapes = vec![
        GraphicShape::rectangle(square(), Vec2d::zero()),
        GraphicShape::line(Vec2d::zero(), Vec2d::new(1.0, 1.0)),
        GraphicShape::rectangle(square(), Vec2d::zero()),
        GraphicShape::circle(square()),
    ];
    shapes.sort();
    shapes.dedup();
    let kinds: Vec<ShapeType> = shapes.iter().map(GraphicShape::shape_type).collect();
    assert_eq!(
        kinds,
        vec![ShapeType::Line, ShapeType::Rectangle, ShapeType::Circle]
    );
}

#[test]
fn test_svg_path() {
    let line = GraphicShape::line(Vec2d::new(0.0, 0.0), Vec2d::new(3.0, 4.0));
    assert_eq!(line.to_svg_path(), "M 0 0 L 3 4");
    assert!(line.to_string().starts_with("Line[box="));
}
