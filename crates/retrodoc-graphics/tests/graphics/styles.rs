use retrodoc_bitmap::EncoderBackend;
use retrodoc_core::{Collector, Color, DiagnosticKind, Ignore, PropertyList, PropertyValue, Vec2d, Vec2i};
use retrodoc_graphics::{Arrow, Gradient, GraphicStyle, Hatch, LineCap, LineJoin, Pattern};

const RED: Color = Color::rgb(255, 0, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

fn serialize(style: &GraphicStyle, only_1d: bool) -> (PropertyList, Collector) {
    let mut list = PropertyList::new();
    let mut sink = Collector::new();
    style.add_to(&mut list, only_1d, &mut sink);
    (list, sink)
}

#[test]
fn test_solid_line() {
    let style = GraphicStyle {
        line_width: 2.0,
        line_color: RED,
        line_opacity: 0.5,
        line_cap: LineCap::Round,
        line_join: LineJoin::Bevel,
        ..GraphicStyle::default()
    };
    let (list, _) = serialize(&style, false);
    assert_eq!(list.get_str("draw:stroke").unwrap(), "solid");
    assert_eq!(list.get_str("svg:stroke-color").unwrap(), "#ff0000");
    assert_eq!(list.get("svg:stroke-width").unwrap().as_string(), "2pt");
    assert_eq!(list.get("svg:stroke-opacity").unwrap().as_string(), "50%");
    assert_eq!(list.get_str("svg:stroke-linecap").unwrap(), "round");
    assert_eq!(list.get_str("svg:stroke-linejoin").unwrap(), "bevel");
    assert_eq!(list.get_str("draw:fill").unwrap(), "none");
}

#[test]
fn test_no_line() {
    let (list, _) = serialize(&GraphicStyle::empty(), false);
    assert_eq!(list.get_str("draw:stroke").unwrap(), "none");
}

#[test]
fn test_single_dash() {
    let style = GraphicStyle {
        line_dash: vec![4.0, 2.0],
        ..GraphicStyle::default()
    };
    let (list, sink) = serialize(&style, true);
    assert_eq!(list.get_str("draw:stroke").unwrap(), "dash");
    assert_eq!(list.get("draw:dots1"), Some(&PropertyValue::Int(1)));
    assert_eq!(list.get_double("draw:dots1-length").unwrap(), 4.0);
    assert_eq!(list.get_double("draw:distance").unwrap(), 2.0);
    assert!(!list.contains_key("draw:dots2"));
    assert!(sink.is_empty());
}

#[test]
fn test_repeated_dash_stays_single_period() {
    let style = GraphicStyle {
        line_dash: vec![4.0, 2.0, 4.0, 2.0],
        ..GraphicStyle::default()
    };
    let (list, _) = serialize(&style, true);
    assert_eq!(list.get("draw:dots1"), Some(&PropertyValue::Int(2)));
    assert_eq!(list.get_double("draw:dots1-length").unwrap(), 4.0);
    assert_eq!(list.get_double("draw:distance").unwrap(), 2.0);
    assert!(!list.contains_key("draw:dots2"));
}

#[test]
fn test_arrows_and_shadow() {
    let style = GraphicStyle {
        arrows: [Arrow::plain(), Arrow::default()],
        shadow_opacity: 0.5,
        shadow_offset: Vec2d::new(72.0, 36.0),
        ..GraphicStyle::default()
    };
    let (list, _) = serialize(&style, true);
    assert!(list.contains_key("draw:marker-start-path"));
    assert!(!list.contains_key("draw:marker-end-path"));
    assert_eq!(list.get_str("draw:shadow").unwrap(), "visible");
    assert!((list.get_double("draw:shadow-offset-x").unwrap() - 2.54).abs() < 1e-12);
    assert!((list.get_double("draw:shadow-offset-y").unwrap() - 1.27).abs() < 1e-12);
}

#[test]
fn test_solid_surface() {
    let mut style = GraphicStyle::default();
    style.set_surface_color(BLUE, 0.25);
    style.fill_rule_even_odd = true;
    let (list, _) = serialize(&style, false);
    assert_eq!(list.get_str("svg:fill-rule").unwrap(), "evenodd");
    assert_eq!(list.get_str("draw:fill").unwrap(), "solid");
    assert_eq!(list.get_str("draw:fill-color").unwrap(), "#0000ff");
    assert_eq!(list.get("draw:opacity").unwrap().as_string(), "25%");

    let (line_only, _) = serialize(&style, true);
    assert_eq!(line_only.get_str("draw:fill").unwrap(), "none");
}

#[test]
fn test_gradient_wins_over_pattern() {
    let style = GraphicStyle {
        gradient: Some(Gradient::default()),
        pattern: Some(Pattern::from_rows([0xaa; 8], [RED, BLUE])),
        ..GraphicStyle::default()
    };
    let (list, _) = serialize(&style, false);
    assert_eq!(list.get_str("draw:fill").unwrap(), "gradient");
}

#[test]
fn test_hatch_with_solid_background() {
    let mut style = GraphicStyle {
        hatch: Some(Hatch::default()),
        ..GraphicStyle::default()
    };
    let (plain, _) = serialize(&style, false);
    assert_eq!(plain.get_str("draw:fill").unwrap(), "hatch");
    assert!(!plain.contains_key("draw:fill-hatch-solid"));

    style.set_surface_color(RED, 1.0);
    let (list, _) = serialize(&style, false);
    assert_eq!(list.get_str("draw:fill").unwrap(), "hatch");
    assert!(list.get_bool("draw:fill-hatch-solid").unwrap());
    assert_eq!(list.get_str("draw:fill-color").unwrap(), "#ff0000");
}

#[test]
fn test_pattern_with_equal_colors_is_solid() {
    let pattern = Pattern::from_rows([0x5a; 8], [RED, RED]);
    assert_eq!(pattern.unique_color(), Some(RED));
    let style = GraphicStyle {
        pattern: Some(pattern),
        ..GraphicStyle::default()
    };
    let (list, _) = serialize(&style, false);
    assert_eq!(list.get_str("draw:fill").unwrap(), "solid");
    assert_eq!(list.get_str("draw:fill-color").unwrap(), "#ff0000");
}

#[test]
fn test_pattern_fills_carry_surface_opacity() {
    let tiled = Pattern::from_rows([0x80, 0, 0, 0, 0, 0, 0, 0], [Color::white(), RED]);
    let broken = Pattern::from_picture(Vec2i::new(2, 2), Vec::new(), "image/png", BLUE);
    for pattern in [Pattern::from_rows([0x5a; 8], [RED, RED]), tiled, broken] {
        let mut style = GraphicStyle {
            pattern: Some(pattern),
            ..GraphicStyle::default()
        };
        let (list, _) = serialize(&style, false);
        assert_eq!(list.get("draw:opacity").unwrap().as_string(), "100%");

        style.surface_opacity = 0.5;
        let (list, _) = serialize(&style, false);
        assert_eq!(list.get("draw:opacity").unwrap().as_string(), "50%");
    }
}

#[test]
fn test_uniform_pattern_collapses() {
    let zeros = Pattern::from_rows([0; 8], [RED, BLUE]);
    assert_eq!(zeros.unique_color(), Some(RED));
    let ones = Pattern::new(16, [RED, BLUE], vec![0xff; 32]).unwrap();
    assert_eq!(ones.unique_color(), Some(BLUE));
}

#[test]
fn test_pattern_is_tiled_bitmap() {
    let style = GraphicStyle {
        pattern: Some(Pattern::from_rows([0x80, 0, 0, 0, 0, 0, 0, 0], [Color::white(), RED])),
        ..GraphicStyle::default()
    };
    let (list, _) = serialize(&style, false);
    assert_eq!(list.get_str("draw:fill").unwrap(), "bitmap");
    assert_eq!(list.get_str("librevenge:mime-type").unwrap(), "image/png");
    assert_eq!(list.get_double("draw:fill-image-width").unwrap(), 8.0);
    assert_eq!(list.get_str("draw:fill-image-ref-point").unwrap(), "top-left");
    let Some(PropertyValue::Binary(data)) = list.get("draw:fill-image") else {
        panic!("missing fill image");
    };
    let image = image::load_from_memory(data).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (8, 8));
    assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0]);
    assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255]);
}

#[test]
fn test_pattern_with_pnm_backend() {
    let style = GraphicStyle {
        pattern: Some(Pattern::from_rows([0xaa; 8], [Color::white(), RED])),
        ..GraphicStyle::default()
    };
    let mut list = PropertyList::new();
    style.add_to_with(&mut list, false, EncoderBackend::Pnm, &mut Ignore);
    assert_eq!(list.get_str("librevenge:mime-type").unwrap(), "image/ppm");
}

#[test]
fn test_broken_picture_falls_back_to_average() {
    let style = GraphicStyle {
        pattern: Some(Pattern::from_picture(Vec2i::new(2, 2), Vec::new(), "image/png", BLUE)),
        ..GraphicStyle::default()
    };
    let (list, sink) = serialize(&style, false);
    assert_eq!(list.get_str("draw:fill").unwrap(), "solid");
    assert_eq!(list.get_str("draw:fill-color").unwrap(), "#0000ff");
    assert_eq!(sink.count(DiagnosticKind::PatternNotRasterizable), 1);
}

#[test]
fn test_picture_pattern_from_bytes() {
    let mut png = Vec::new();
    image::RgbImage::from_pixel(3, 2, image::Rgb([0, 0, 255]))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let pattern = Pattern::from_picture_bytes(png.clone(), None).unwrap();
    assert_eq!(pattern.dim(), Vec2i::new(3, 2));
    assert_eq!(pattern.average_color(), BLUE);

    let style = GraphicStyle {
        pattern: Some(pattern),
        ..GraphicStyle::default()
    };
    let (list, _) = serialize(&style, false);
    assert_eq!(list.get_str("draw:fill").unwrap(), "bitmap");
    assert_eq!(list.get("draw:fill-image"), Some(&PropertyValue::Binary(png)));
}

#[test]
fn test_properties_serialize_to_json() {
    let (list, _) = serialize(&GraphicStyle::default(), false);
    let json = serde_json::to_value(&list).unwrap();
    assert!(json.get("svg:stroke-color").is_some());
    assert!(json.get("draw:fill").is_some());
}
