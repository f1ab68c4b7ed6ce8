//! End to end: settings drive how a styled shape reaches the document sink.

use retrodoc::{
    init_logging, Box2d, Color, DrawPrimitive, EncoderBackend, GraphicShape, GraphicStyle,
    ImportContext, Pattern, PropertyList, ShapeType, Vec2d,
};
use tempfile::tempdir;

#[test]
fn test_styled_shape_with_settings() {
    init_logging().unwrap();
    // a second call is harmless
    init_logging().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[bitmap]\nbackend = \"pnm\"\n\n[geometry]\nrotation_epsilon = 0.5\n",
    )
    .unwrap();
    let mut context = ImportContext::load(&path).unwrap();
    assert_eq!(context.settings().bitmap.backend, EncoderBackend::Pnm);

    let rectangle = GraphicShape::rectangle(
        Box2d::new(Vec2d::new(72.0, 72.0), Vec2d::new(144.0, 108.0)),
        Vec2d::new(6.0, 6.0),
    );
    let center = Vec2d::new(108.0, 90.0);
    // below the configured tolerance
    assert_eq!(context.rotate(&rectangle, 0.25, center), rectangle);

    let shape = context.rotate(&rectangle, 30.0, center);
    assert_eq!(shape.shape_type(), ShapeType::Path);
    let mut shape_list = PropertyList::new();
    assert_eq!(
        context.add_shape(&shape, Vec2d::zero(), true, &mut shape_list),
        DrawPrimitive::Path
    );

    let style = GraphicStyle {
        line_dash: vec![3.0, 1.0],
        pattern: Some(Pattern::from_rows(
            [0x11, 0x22, 0x44, 0x88, 0x11, 0x22, 0x44, 0x88],
            [Color::white(), Color::black()],
        )),
        ..GraphicStyle::default()
    };
    let mut style_list = PropertyList::new();
    context.add_style(&style, false, &mut style_list);
    assert_eq!(style_list.get_str("draw:stroke").unwrap(), "dash");
    assert_eq!(style_list.get_str("librevenge:mime-type").unwrap(), "image/ppm");

    let json = serde_json::to_string(&shape_list).unwrap();
    assert!(json.contains("svg:d"));
}

#[test]
fn test_missing_settings_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let context = ImportContext::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(context.settings().geometry.rotation_epsilon, 1e-3);
}
