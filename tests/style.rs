use plothelper::style::*;
use plothelper::PlotError;

#[test]
fn default_style_is_valid() {
    FigureStyle::default().validate().unwrap();
}

#[test]
fn yaml_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("style.yaml");
    let mut style = FigureStyle::default();
    style.font_family = "Avenir".to_string();
    style.tick_direction = TickDirection::InOut;
    style.save(&path).unwrap();
    assert_eq!(FigureStyle::load(&path).unwrap(), style);
}

#[test]
fn json_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("style.json");
    let mut style = FigureStyle::default();
    style.major_tick_length = 10.0;
    style.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"major_tick_length\": 10.0"));
    assert_eq!(FigureStyle::load(&path).unwrap(), style);
}

#[test]
fn partial_yaml_fills_defaults() {
    let style = FigureStyle::from_yaml("font_size: 12\ntick_direction: out\nmargins:\n  left: 0.2\n").unwrap();
    assert_eq!(style.font_size, 12.0);
    assert_eq!(style.tick_direction, TickDirection::Out);
    assert_eq!(style.margins.left, 0.2);
    assert_eq!(style.margins.right, Margins::default().right);
    assert_eq!(style.major_tick_length, FigureStyle::default().major_tick_length);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = FigureStyle::default().save(dir.path().join("style.toml")).unwrap_err();
    assert!(matches!(err, PlotError::InvalidInput(_)));
}

#[test]
fn invalid_values_fail_validation() {
    let mut s = FigureStyle::default();
    s.font_size = 0.0;
    assert!(s.validate().is_err());

    let mut s = FigureStyle::default();
    s.margins.left = 0.9;
    s.margins.right = 0.1;
    assert!(s.validate().is_err());

    let mut s = FigureStyle::default();
    s.color_cycle.clear();
    assert!(s.validate().is_err());

    let mut s = FigureStyle::default();
    s.alpha = 1.5;
    assert!(s.validate().is_err());
}

#[test]
fn load_rejects_invalid_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "dpi: -3\n").unwrap();
    assert!(matches!(FigureStyle::load(&path), Err(PlotError::InvalidInput(_))));

    std::fs::write(&path, "font_size: [not, a, number]\n").unwrap();
    assert!(matches!(FigureStyle::load(&path), Err(PlotError::Yaml(_))));
}

#[test]
fn tick_direction_split() {
    assert_eq!(TickDirection::In.split(), (1.0, 0.0));
    assert_eq!(TickDirection::Out.split(), (0.0, 1.0));
    assert_eq!(TickDirection::InOut.split(), (0.5, 0.5));
}

#[test]
fn series_colors_cycle() {
    let s = FigureStyle::default();
    assert_eq!(s.series_color(0), s.color_cycle[0]);
    assert_eq!(s.series_color(s.color_cycle.len()), s.color_cycle[0]);
}
