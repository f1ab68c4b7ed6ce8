use retrodoc_core::{Collector, Color, DiagnosticKind, Ignore, PropertyList, Vec2d};
use retrodoc_graphics::{Border, BorderStyle, BorderType, GraphicStyle};

fn frame(style: &GraphicStyle) -> PropertyList {
    let mut list = PropertyList::new();
    style.add_frame_to(&mut list, &mut Ignore);
    list
}

#[test]
fn test_default_frame_is_empty() {
    assert!(frame(&GraphicStyle::default()).is_empty());
}

#[test]
fn test_background() {
    let mut style = GraphicStyle::default();
    style.set_background_color(Color::rgb(0, 255, 0), 0.75);
    let list = frame(&style);
    assert_eq!(list.get_str("fo:background-color").unwrap(), "#00ff00");
    assert_eq!(
        list.get("style:background-transparency").unwrap().as_string(),
        "25%"
    );

    style.set_background_color(Color::white(), 0.0);
    let transparent = frame(&style);
    assert!(!transparent.contains_key("fo:background-color"));
    assert_eq!(
        transparent.get("style:background-transparency").unwrap().as_string(),
        "100%"
    );
}

#[test]
fn test_uniform_borders() {
    let mut style = GraphicStyle::default();
    let border = Border {
        width: 2.0,
        ..Border::default()
    };
    style.set_borders(
        GraphicStyle::LEFT | GraphicStyle::RIGHT | GraphicStyle::TOP | GraphicStyle::BOTTOM,
        &border,
    );
    let list = frame(&style);
    assert_eq!(list.get_str("fo:border").unwrap(), "2pt solid #000000");
    assert!(!list.contains_key("fo:border-left"));
}

#[test]
fn test_per_side_borders() {
    let mut style = GraphicStyle::default();
    style.set_borders(GraphicStyle::LEFT, &Border::default());
    style.set_borders(
        GraphicStyle::BOTTOM,
        &Border {
            style: BorderStyle::Dash,
            color: Color::rgb(255, 0, 0),
            ..Border::default()
        },
    );
    let list = frame(&style);
    assert!(!list.contains_key("fo:border"));
    assert_eq!(list.get_str("fo:border-left").unwrap(), "1pt solid #000000");
    assert_eq!(list.get_str("fo:border-bottom").unwrap(), "1pt dashed #ff0000");
    assert!(!list.contains_key("fo:border-top"));
}

#[test]
fn test_border_widths_reported_through_frame() {
    let mut style = GraphicStyle::default();
    style.set_borders(
        GraphicStyle::TOP,
        &Border {
            kind: BorderType::Triple,
            widths: vec![1.0, 1.0, 1.0, 1.0, 1.0],
            ..Border::default()
        },
    );
    let mut list = PropertyList::new();
    let mut sink = Collector::new();
    style.add_frame_to(&mut list, &mut sink);
    assert_eq!(list.get_str("fo:border-top").unwrap(), "1pt double #000000");
    assert_eq!(sink.count(DiagnosticKind::UnsupportedBorderWidths), 1);
}

#[test]
fn test_shadow_and_names() {
    let style = GraphicStyle {
        shadow_opacity: 1.0,
        shadow_offset: Vec2d::new(72.0, 36.0),
        frame_name: "Frame1".to_string(),
        next_frame_name: "Frame2".to_string(),
        ..GraphicStyle::default()
    };
    let list = frame(&style);
    assert_eq!(list.get_str("style:shadow").unwrap(), "#000000 1in 0.5in");
    assert_eq!(list.get_str("librevenge:frame-name").unwrap(), "Frame1");
    assert_eq!(list.get_str("librevenge:next-frame-name").unwrap(), "Frame2");
}
