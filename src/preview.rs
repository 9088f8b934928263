//! Interactive preview of a [`LayoutDescriptor`] inside egui, one `egui_plot`
//! per sub-region.
//!
//! Sub-regions keep their figure-fraction rectangles, shared axes are linked so
//! panning one panel moves its partner, and tick labels go through the same
//! [`crate::data::number_format::TickFormatter`] as the file backends. Minor
//! ticks and tick direction are not representable in `egui_plot` and are left
//! to the file backends.

use egui::{pos2, Color32, FontId, Id, Rect, Ui, UiBuilder, Vec2b};
use egui_plot::{HPlacement, Line, Plot, VPlacement};

use crate::layout::{AxisLimits, LayoutDescriptor, SubRegion};

pub struct LayoutView<'a> {
    layout: &'a LayoutDescriptor,
    id_salt: &'a str,
}

impl<'a> LayoutView<'a> {
    pub fn new(layout: &'a LayoutDescriptor) -> Self {
        Self {
            layout,
            id_salt: "plothelper",
        }
    }

    /// Distinguish several views of the same layout in one UI.
    pub fn id_salt(mut self, salt: &'a str) -> Self {
        self.id_salt = salt;
        self
    }

    /// Fill the available space of `ui` with the layout.
    pub fn show(&self, ui: &mut Ui) {
        let full = ui.available_rect_before_wrap();
        ui.allocate_rect(full, egui::Sense::hover());
        let font_size = self.layout.container().font.size as f32;

        for (region, limits) in self
            .layout
            .subregions()
            .iter()
            .zip(self.layout.resolved_limits())
        {
            let r = &region.rect;
            let rect = Rect::from_min_max(
                pos2(
                    full.left() + r.x as f32 * full.width(),
                    full.top() + (1.0 - r.top() as f32) * full.height(),
                ),
                pos2(
                    full.left() + r.right() as f32 * full.width(),
                    full.top() + (1.0 - r.y as f32) * full.height(),
                ),
            );
            let mut child = ui.new_child(UiBuilder::new().max_rect(rect));
            child.style_mut().override_font_id = Some(FontId::proportional(font_size));
            self.region_plot(region, limits, rect)
                .show(&mut child, |plot_ui| {
                    for series in &region.series {
                        let [r, g, b] = series.color;
                        let alpha = (series.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                        let name = series.label.clone().unwrap_or_default();
                        let line = Line::new(name, series.points.clone())
                            .color(Color32::from_rgba_unmultiplied(r, g, b, alpha))
                            .width(series.width as f32);
                        plot_ui.line(line);
                    }
                });
        }
    }

    fn region_plot(&self, region: &SubRegion, limits: AxisLimits, rect: Rect) -> Plot<'a> {
        let ticks = &region.ticks;
        let x_fmt = region.x_formatter.clone();
        let y_fmt = region.y_formatter.clone();

        let mut plot = Plot::new((self.id_salt, region.index))
            .width(rect.width())
            .height(rect.height())
            .allow_scroll(false)
            .show_axes(Vec2b::new(
                ticks.bottom.labels || ticks.top.labels,
                ticks.left.labels || ticks.right.labels,
            ))
            .x_axis_position(if !ticks.bottom.labels && ticks.top.labels {
                VPlacement::Top
            } else {
                VPlacement::Bottom
            })
            .y_axis_position(if !ticks.left.labels && ticks.right.labels {
                HPlacement::Right
            } else {
                HPlacement::Left
            })
            .include_x(limits.x.0)
            .include_x(limits.x.1)
            .include_y(limits.y.0)
            .include_y(limits.y.1)
            .x_axis_formatter(move |mark, _range| x_fmt.format_tick(mark.value, mark.step_size))
            .y_axis_formatter(move |mark, _range| y_fmt.format_tick(mark.value, mark.step_size));

        if let Some(group) = self.shared_group(region, |r| r.share_x) {
            plot = plot.link_axis(Id::new((self.id_salt, "x", group)), Vec2b::new(true, false));
        }
        if let Some(group) = self.shared_group(region, |r| r.share_y) {
            plot = plot.link_axis(Id::new((self.id_salt, "y", group)), Vec2b::new(false, true));
        }
        plot
    }

    /// Group owner index when `region` shares an axis with another sub-region.
    fn shared_group(
        &self,
        region: &SubRegion,
        share: impl Fn(&SubRegion) -> Option<usize>,
    ) -> Option<usize> {
        let group = share(region).unwrap_or(region.index);
        let members = self
            .layout
            .subregions()
            .iter()
            .filter(|r| share(*r).unwrap_or(r.index) == group)
            .count();
        (members > 1).then_some(group)
    }
}
