//! Figure layout factory.
//!
//! [`makefig`] turns a [`PanelConfiguration`] and a figure size into a
//! [`LayoutDescriptor`]: one container plus one or two sub-regions with tick
//! placement, tick lengths, font and spacing already applied. The descriptor is
//! plain data owned by the caller; drawing it is the job of a
//! [`crate::backend::DrawingBackend`].

use std::str::FromStr;

use crate::data::number_format::TickFormatter;
use crate::data::ticks;
use crate::error::{PlotError, Result};
use crate::style::{FigureStyle, Margins, TickDirection};

// ─────────────────────────────────────────────────────────────────────────────
// PanelConfiguration
// ─────────────────────────────────────────────────────────────────────────────

/// The supported sub-region arrangements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelConfiguration {
    /// One axes filling the plotting area.
    Single,
    /// Two axes side by side sharing the y scale.
    TwoHorizontal,
    /// Two axes stacked vertically sharing the x scale; the top one is
    /// `height_ratio` times as tall as the bottom one.
    TwoVertical { height_ratio: f64 },
}

impl PanelConfiguration {
    /// Select a configuration from its textual tag.
    ///
    /// Accepts `"1"`/`"single"`, `"2h"`/`"two-horizontal"` and
    /// `"2v"`/`"two-vertical"` (case-insensitive). `height_ratio` is only used
    /// by the vertical arrangement. Anything else is rejected.
    pub fn from_tag(tag: &str, height_ratio: f64) -> Result<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "1" | "single" => Ok(PanelConfiguration::Single),
            "2h" | "two-horizontal" => Ok(PanelConfiguration::TwoHorizontal),
            "2v" | "two-vertical" => Ok(PanelConfiguration::TwoVertical { height_ratio }),
            other => Err(PlotError::invalid(format!(
                "unrecognized panel configuration '{other}' (expected 1, 2h or 2v)"
            ))),
        }
    }

    /// Short tag accepted by [`PanelConfiguration::from_tag`].
    pub fn tag(&self) -> &'static str {
        match self {
            PanelConfiguration::Single => "1",
            PanelConfiguration::TwoHorizontal => "2h",
            PanelConfiguration::TwoVertical { .. } => "2v",
        }
    }

    /// Number of sub-regions this arrangement produces.
    pub fn panel_count(&self) -> usize {
        match self {
            PanelConfiguration::Single => 1,
            PanelConfiguration::TwoHorizontal | PanelConfiguration::TwoVertical { .. } => 2,
        }
    }
}

impl FromStr for PanelConfiguration {
    type Err = PlotError;

    /// Parses the tag with a 1:1 height ratio for the vertical arrangement.
    fn from_str(s: &str) -> Result<Self> {
        PanelConfiguration::from_tag(s, 1.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry and tick settings
// ─────────────────────────────────────────────────────────────────────────────

/// Rectangle in figure fractions, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

impl From<&Margins> for Rect {
    fn from(m: &Margins) -> Self {
        Rect {
            x: m.left,
            y: m.bottom,
            width: m.right - m.left,
            height: m.top - m.bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Whether ticks on this edge mark x values.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

/// Visibility of tick marks and tick labels on one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeTicks {
    pub marks: bool,
    pub labels: bool,
}

/// Tick settings of one sub-region.
#[derive(Debug, Clone, PartialEq)]
pub struct TickParams {
    pub direction: TickDirection,
    /// Major tick length in points.
    pub major_length: f64,
    /// Minor tick length in points.
    pub minor_length: f64,
    pub width: f64,
    pub top: EdgeTicks,
    pub bottom: EdgeTicks,
    pub left: EdgeTicks,
    pub right: EdgeTicks,
}

impl TickParams {
    /// Marks on all four edges, labels on bottom and left. Lengths are zero
    /// until the factory applies the style's tick lengths.
    pub fn boxed(direction: TickDirection) -> Self {
        let marks_only = EdgeTicks {
            marks: true,
            labels: false,
        };
        let labelled = EdgeTicks {
            marks: true,
            labels: true,
        };
        Self {
            direction,
            major_length: 0.0,
            minor_length: 0.0,
            width: 0.0,
            top: marks_only,
            bottom: labelled,
            left: labelled,
            right: marks_only,
        }
    }

    pub fn edge(&self, edge: Edge) -> EdgeTicks {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    pub fn edge_mut(&mut self, edge: Edge) -> &mut EdgeTicks {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Base size in points.
    pub size: f64,
}

/// Gaps between neighbouring sub-regions, as fractions of the average
/// sub-region width (`wspace`) or height (`hspace`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub wspace: f64,
    pub hspace: f64,
}

/// The top-level drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    pub dpi: f64,
    pub font: FontSpec,
    pub margins: Margins,
    pub spacing: Spacing,
    pub axes_linewidth: f64,
}

impl Container {
    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpi).round().max(1.0) as u32,
            (self.height * self.dpi).round().max(1.0) as u32,
        )
    }
}

/// A plotted polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: Option<String>,
    pub points: Vec<[f64; 2]>,
    pub color: [u8; 3],
    pub width: f64,
    pub alpha: f64,
}

/// One axes inside the container.
#[derive(Debug, Clone, PartialEq)]
pub struct SubRegion {
    pub index: usize,
    pub rect: Rect,
    pub ticks: TickParams,
    /// Index of the sub-region whose x scale this one follows.
    pub share_x: Option<usize>,
    /// Index of the sub-region whose y scale this one follows.
    pub share_y: Option<usize>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub x_formatter: TickFormatter,
    pub y_formatter: TickFormatter,
    pub series: Vec<LineSeries>,
}

impl SubRegion {
    fn new(index: usize, rect: Rect, direction: TickDirection) -> Self {
        Self {
            index,
            rect,
            ticks: TickParams::boxed(direction),
            share_x: None,
            share_y: None,
            xlim: None,
            ylim: None,
            xlabel: None,
            ylabel: None,
            x_formatter: TickFormatter::Auto,
            y_formatter: TickFormatter::Auto,
            series: Vec::new(),
        }
    }

    fn data_extents(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        let xs = ticks::extents(self.series.iter().flat_map(|s| s.points.iter().map(|p| p[0])));
        let ys = ticks::extents(self.series.iter().flat_map(|s| s.points.iter().map(|p| p[1])));
        (xs, ys)
    }
}

/// Axis limits of one sub-region after sharing and auto-scaling, with the
/// major tick interval used for each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub x_interval: f64,
    pub y_interval: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// LayoutDescriptor
// ─────────────────────────────────────────────────────────────────────────────

/// A container with its sub-regions, as produced by [`makefig`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDescriptor {
    panels: PanelConfiguration,
    container: Container,
    regions: Vec<SubRegion>,
    style: FigureStyle,
}

impl LayoutDescriptor {
    pub fn panels(&self) -> PanelConfiguration {
        self.panels
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    pub fn subregions(&self) -> &[SubRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn axes(&self, index: usize) -> Result<&SubRegion> {
        let count = self.regions.len();
        self.regions
            .get(index)
            .ok_or_else(|| PlotError::invalid(format!("sub-region {index} out of range (layout has {count})")))
    }

    pub fn axes_mut(&mut self, index: usize) -> Result<&mut SubRegion> {
        let count = self.regions.len();
        self.regions
            .get_mut(index)
            .ok_or_else(|| PlotError::invalid(format!("sub-region {index} out of range (layout has {count})")))
    }

    /// Add a line through `(xs[i], ys[i])` to sub-region `index`, coloured by
    /// the style's colour cycle.
    pub fn plot(&mut self, index: usize, xs: &[f64], ys: &[f64]) -> Result<&mut LineSeries> {
        if xs.len() != ys.len() {
            return Err(PlotError::invalid(format!(
                "x and y lengths differ ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        let style = &self.style;
        let count = self.regions.len();
        let region = self
            .regions
            .get_mut(index)
            .ok_or_else(|| PlotError::invalid(format!("sub-region {index} out of range (layout has {count})")))?;
        let series = LineSeries {
            label: None,
            points: xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect(),
            color: style.series_color(region.series.len()),
            width: style.line_width,
            alpha: style.alpha,
        };
        region.series.push(series);
        let last = region.series.len() - 1;
        Ok(&mut region.series[last])
    }

    pub fn set_xlim(&mut self, index: usize, min: f64, max: f64) -> Result<()> {
        check_limits(min, max)?;
        self.axes_mut(index)?.xlim = Some((min, max));
        Ok(())
    }

    pub fn set_ylim(&mut self, index: usize, min: f64, max: f64) -> Result<()> {
        check_limits(min, max)?;
        self.axes_mut(index)?.ylim = Some((min, max));
        Ok(())
    }

    pub fn set_xlabel(&mut self, index: usize, text: &str) -> Result<()> {
        self.axes_mut(index)?.xlabel = Some(text.to_string());
        Ok(())
    }

    pub fn set_ylabel(&mut self, index: usize, text: &str) -> Result<()> {
        self.axes_mut(index)?.ylabel = Some(text.to_string());
        Ok(())
    }

    /// Axis limits for every sub-region.
    ///
    /// Sub-regions linked through `share_x`/`share_y` get identical limits on
    /// the shared axis: an explicit limit anywhere in the group wins (the
    /// owning region first), otherwise the union of the group's data extents
    /// is widened to whole ticks. Regions without data span `0..1`.
    pub fn resolved_limits(&self) -> Vec<AxisLimits> {
        let extents: Vec<_> = self.regions.iter().map(SubRegion::data_extents).collect();
        let x_group = |r: &SubRegion| r.share_x.unwrap_or(r.index);
        let y_group = |r: &SubRegion| r.share_y.unwrap_or(r.index);

        self.regions
            .iter()
            .map(|region| {
                let (x, x_interval) = self.resolve_axis(
                    x_group(region),
                    |r| x_group(r),
                    |r| r.xlim,
                    |i| extents[i].0,
                );
                let (y, y_interval) = self.resolve_axis(
                    y_group(region),
                    |r| y_group(r),
                    |r| r.ylim,
                    |i| extents[i].1,
                );
                AxisLimits {
                    x,
                    y,
                    x_interval,
                    y_interval,
                }
            })
            .collect()
    }

    fn resolve_axis(
        &self,
        group: usize,
        group_of: impl Fn(&SubRegion) -> usize,
        explicit: impl Fn(&SubRegion) -> Option<(f64, f64)>,
        data: impl Fn(usize) -> Option<(f64, f64)>,
    ) -> ((f64, f64), f64) {
        let members: Vec<&SubRegion> = self.regions.iter().filter(|r| group_of(*r) == group).collect();
        let fixed = members
            .iter()
            .find(|r| r.index == group)
            .and_then(|r| explicit(*r))
            .or_else(|| members.iter().find_map(|r| explicit(*r)));
        if let Some(limits) = fixed {
            return (limits, ticks::compute_tick_interval(limits.1 - limits.0));
        }
        let union = members
            .iter()
            .fold(None, |acc, r| ticks::union_extents(acc, data(r.index)));
        match union {
            Some((lo, hi)) => ticks::nice_limits(lo, hi),
            None => ((0.0, 1.0), ticks::compute_tick_interval(1.0)),
        }
    }
}

fn check_limits(min: f64, max: f64) -> Result<()> {
    if !(min.is_finite() && max.is_finite()) || min == max {
        return Err(PlotError::invalid(format!("axis limits ({min}, {max}) must be finite and distinct")));
    }
    Ok(())
}

fn check_extent(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlotError::invalid(format!("{name} must be a positive finite number, got {value}")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Factory
// ─────────────────────────────────────────────────────────────────────────────

/// Build a figure of `width` × `height` inches with the sub-region
/// arrangement selected by `panels`.
///
/// The style's font is applied to the container before the sub-regions are
/// created; tick lengths are applied to every sub-region afterwards.
///
/// ```
/// # use plothelper::layout::{makefig, PanelConfiguration};
/// # use plothelper::style::FigureStyle;
/// let fig = makefig(PanelConfiguration::TwoVertical { height_ratio: 2.0 }, 8.0, 6.0, &FigureStyle::default()).unwrap();
/// let (top, bottom) = (&fig.subregions()[0], &fig.subregions()[1]);
/// assert!((top.rect.height / bottom.rect.height - 2.0).abs() < 1e-12);
/// assert!(!top.ticks.bottom.labels);
/// ```
pub fn makefig(
    panels: PanelConfiguration,
    width: f64,
    height: f64,
    style: &FigureStyle,
) -> Result<LayoutDescriptor> {
    check_extent("figure width", width)?;
    check_extent("figure height", height)?;
    style.validate()?;

    let mut container = Container {
        width,
        height,
        dpi: style.dpi,
        font: FontSpec {
            family: style.font_family.clone(),
            size: style.font_size,
        },
        margins: style.margins,
        spacing: Spacing::default(),
        axes_linewidth: style.axes_linewidth,
    };

    let area = Rect::from(&style.margins);
    let direction = style.tick_direction;
    let mut regions = match panels {
        PanelConfiguration::Single => vec![SubRegion::new(0, area, direction)],
        PanelConfiguration::TwoHorizontal => {
            let half = area.width / 2.0;
            let mut left = SubRegion::new(
                0,
                Rect {
                    width: half,
                    ..area
                },
                direction,
            );
            let mut right = SubRegion::new(
                1,
                Rect {
                    x: area.x + half,
                    width: area.width - half,
                    ..area
                },
                direction,
            );
            // no doubled marks along the shared seam
            left.ticks.right.marks = false;
            right.ticks.left = EdgeTicks::default();
            right.share_y = Some(0);
            container.spacing.wspace = 0.0;
            vec![left, right]
        }
        PanelConfiguration::TwoVertical { height_ratio } => {
            check_extent("height ratio", height_ratio)?;
            let bottom_height = area.height / (height_ratio + 1.0);
            let mut top = SubRegion::new(
                0,
                Rect {
                    y: area.y + bottom_height,
                    height: area.height - bottom_height,
                    ..area
                },
                direction,
            );
            let mut bottom = SubRegion::new(
                1,
                Rect {
                    height: bottom_height,
                    ..area
                },
                direction,
            );
            // bottom labels of the top axes would collide with the lower axes
            top.ticks.bottom.labels = false;
            bottom.share_x = Some(0);
            container.spacing.hspace = 0.0;
            vec![top, bottom]
        }
    };

    for region in &mut regions {
        region.ticks.minor_length = style.minor_tick_length;
        region.ticks.major_length = style.major_tick_length;
        region.ticks.width = style.tick_width;
    }

    debug_assert_eq!(regions.len(), panels.panel_count());
    log::debug!(
        "makefig: {} panel(s) '{}' on {}x{} in",
        regions.len(),
        panels.tag(),
        width,
        height
    );

    Ok(LayoutDescriptor {
        panels,
        container,
        regions,
        style: style.clone(),
    })
}

/// [`makefig`] with the arrangement given as a textual tag (see
/// [`PanelConfiguration::from_tag`]). Unknown tags fail with `InvalidInput`.
pub fn makefig_from_tag(
    tag: &str,
    height_ratio: f64,
    width: f64,
    height: f64,
    style: &FigureStyle,
) -> Result<LayoutDescriptor> {
    let panels = PanelConfiguration::from_tag(tag, height_ratio)?;
    makefig(panels, width, height, style)
}
