use plothelper::layout::*;
use plothelper::style::{FigureStyle, TickDirection};
use plothelper::PlotError;

fn style() -> FigureStyle {
    FigureStyle::default()
}

#[test]
fn single_panel_has_boxed_inward_ticks() {
    let fig = makefig(PanelConfiguration::Single, 8.0, 6.0, &style()).unwrap();
    assert_eq!(fig.len(), 1);
    let ax = &fig.subregions()[0];
    for edge in Edge::ALL {
        assert!(ax.ticks.edge(edge).marks, "{edge:?} should carry marks");
    }
    assert!(ax.ticks.bottom.labels && ax.ticks.left.labels);
    assert!(!ax.ticks.top.labels && !ax.ticks.right.labels);
    assert_eq!(ax.ticks.direction, TickDirection::In);
    assert!(ax.ticks.minor_length < ax.ticks.major_length);
    assert_eq!(ax.ticks.major_length, style().major_tick_length);
    assert_eq!(ax.ticks.minor_length, style().minor_tick_length);
}

#[test]
fn single_panel_fills_plotting_area() {
    let s = style();
    let fig = makefig(PanelConfiguration::Single, 8.0, 6.0, &s).unwrap();
    let rect = fig.subregions()[0].rect;
    assert_eq!(rect, Rect::from(&s.margins));
    assert_eq!(fig.container().width, 8.0);
    assert_eq!(fig.container().height, 6.0);
    assert_eq!(fig.container().font.family, s.font_family);
    assert_eq!(fig.container().font.size, s.font_size);
}

#[test]
fn two_horizontal_shares_y_without_seam_ticks() {
    let fig = makefig(PanelConfiguration::TwoHorizontal, 8.0, 4.0, &style()).unwrap();
    assert_eq!(fig.len(), 2);
    let (left, right) = (&fig.subregions()[0], &fig.subregions()[1]);

    assert!(!left.ticks.right.marks);
    assert!(left.ticks.left.marks && left.ticks.left.labels);
    assert!(!right.ticks.left.marks && !right.ticks.left.labels);
    assert!(right.ticks.right.marks && right.ticks.bottom.labels);

    assert_eq!(right.share_y, Some(0));
    assert_eq!(fig.container().spacing.wspace, 0.0);
    assert!((left.rect.right() - right.rect.x).abs() < 1e-12);
    assert!((left.rect.width - right.rect.width).abs() < 1e-12);
    assert_eq!(left.rect.height, right.rect.height);
}

#[test]
fn two_vertical_respects_height_ratio() {
    let fig = makefig(PanelConfiguration::TwoVertical { height_ratio: 2.0 }, 6.0, 8.0, &style()).unwrap();
    assert_eq!(fig.len(), 2);
    let (top, bottom) = (&fig.subregions()[0], &fig.subregions()[1]);

    assert!((top.rect.height / bottom.rect.height - 2.0).abs() < 1e-12);
    assert_eq!(fig.container().spacing.hspace, 0.0);
    assert!((bottom.rect.top() - top.rect.y).abs() < 1e-12);

    assert!(!top.ticks.bottom.labels);
    assert!(top.ticks.bottom.marks);
    assert!(bottom.ticks.bottom.labels && bottom.ticks.left.labels);
    assert_eq!(bottom.share_x, Some(0));
}

#[test]
fn panel_count_matches_configuration() {
    for panels in [
        PanelConfiguration::Single,
        PanelConfiguration::TwoHorizontal,
        PanelConfiguration::TwoVertical { height_ratio: 0.5 },
    ] {
        let fig = makefig(panels, 5.0, 5.0, &style()).unwrap();
        assert_eq!(fig.len(), panels.panel_count());
        assert_eq!(fig.panels(), panels);
    }
}

#[test]
fn tags_select_configurations() {
    assert_eq!(PanelConfiguration::from_tag("1", 3.0).unwrap(), PanelConfiguration::Single);
    assert_eq!(PanelConfiguration::from_tag("2H", 3.0).unwrap(), PanelConfiguration::TwoHorizontal);
    assert_eq!(
        PanelConfiguration::from_tag("two-vertical", 3.0).unwrap(),
        PanelConfiguration::TwoVertical { height_ratio: 3.0 }
    );
    assert_eq!("2v".parse::<PanelConfiguration>().unwrap().tag(), "2v");
}

#[test]
fn unrecognized_tag_is_invalid_input() {
    let err = makefig_from_tag("3x", 1.0, 8.0, 6.0, &style()).unwrap_err();
    assert!(matches!(err, PlotError::InvalidInput(_)));
    assert!("".parse::<PanelConfiguration>().is_err());
}

#[test]
fn bad_sizes_are_rejected() {
    let s = style();
    assert!(matches!(makefig(PanelConfiguration::Single, 0.0, 6.0, &s), Err(PlotError::InvalidInput(_))));
    assert!(matches!(makefig(PanelConfiguration::Single, 8.0, f64::NAN, &s), Err(PlotError::InvalidInput(_))));
    assert!(matches!(
        makefig(PanelConfiguration::TwoVertical { height_ratio: -1.0 }, 8.0, 6.0, &s),
        Err(PlotError::InvalidInput(_))
    ));
}

#[test]
fn style_changes_do_not_leak_between_calls() {
    let mut big = style();
    big.font_size = 30.0;
    big.tick_direction = TickDirection::Out;
    let a = makefig(PanelConfiguration::Single, 8.0, 6.0, &big).unwrap();
    let b = makefig(PanelConfiguration::Single, 8.0, 6.0, &style()).unwrap();
    assert_eq!(a.container().font.size, 30.0);
    assert_eq!(b.container().font.size, 16.0);
    assert_eq!(a.subregions()[0].ticks.direction, TickDirection::Out);
    assert_eq!(b.subregions()[0].ticks.direction, TickDirection::In);
}

#[test]
fn plot_assigns_cycle_colors_and_checks_lengths() {
    let s = style();
    let mut fig = makefig(PanelConfiguration::Single, 8.0, 6.0, &s).unwrap();
    fig.plot(0, &[0.0, 1.0], &[1.0, 2.0]).unwrap();
    fig.plot(0, &[0.0, 1.0], &[2.0, 3.0]).unwrap();
    let series = &fig.subregions()[0].series;
    assert_eq!(series[0].color, s.color_cycle[0]);
    assert_eq!(series[1].color, s.color_cycle[1]);
    assert_eq!(series[0].width, s.line_width);

    assert!(matches!(fig.plot(0, &[0.0], &[1.0, 2.0]), Err(PlotError::InvalidInput(_))));
    assert!(matches!(fig.plot(3, &[0.0], &[1.0]), Err(PlotError::InvalidInput(_))));
    assert!(fig.axes(1).is_err());
}

#[test]
fn shared_axes_resolve_to_identical_limits() {
    let mut fig = makefig(PanelConfiguration::TwoHorizontal, 8.0, 4.0, &style()).unwrap();
    fig.plot(0, &[0.0, 1.0], &[0.0, 3.0]).unwrap();
    fig.plot(1, &[0.0, 10.0], &[-7.0, 1.0]).unwrap();
    let limits = fig.resolved_limits();
    assert_eq!(limits[0].y, limits[1].y);
    assert!(limits[0].y.0 <= -7.0 && limits[0].y.1 >= 3.0);
    // x is not shared in the side-by-side arrangement
    assert_ne!(limits[0].x, limits[1].x);
}

#[test]
fn explicit_limits_win_over_data() {
    let mut fig = makefig(PanelConfiguration::TwoVertical { height_ratio: 1.0 }, 8.0, 6.0, &style()).unwrap();
    fig.plot(1, &[0.0, 100.0], &[0.0, 1.0]).unwrap();
    fig.set_xlim(0, 20.0, 40.0).unwrap();
    let limits = fig.resolved_limits();
    assert_eq!(limits[0].x, (20.0, 40.0));
    assert_eq!(limits[1].x, (20.0, 40.0));
    assert!(fig.set_ylim(0, 1.0, 1.0).is_err());
}

#[test]
fn empty_regions_default_to_unit_span() {
    let fig = makefig(PanelConfiguration::Single, 8.0, 6.0, &style()).unwrap();
    let limits = fig.resolved_limits();
    assert_eq!(limits[0].x, (0.0, 1.0));
    assert_eq!(limits[0].y, (0.0, 1.0));
}

#[test]
fn descriptors_are_independent() {
    let mut a = makefig(PanelConfiguration::Single, 8.0, 6.0, &style()).unwrap();
    let b = makefig(PanelConfiguration::Single, 8.0, 6.0, &style()).unwrap();
    a.set_xlabel(0, "time").unwrap();
    assert_eq!(a.axes(0).unwrap().xlabel.as_deref(), Some("time"));
    assert_eq!(b.axes(0).unwrap().xlabel, None);
}
