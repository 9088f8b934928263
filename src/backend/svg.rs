//! SVG backend: renders a layout as a standalone SVG document in pixel units.

use std::fmt::Write as _;

use super::{DrawingBackend, RegionView};
use crate::error::{PlotError, Result};
use crate::layout::{Container, Edge, FontSpec, LineSeries, Spacing, SubRegion};

/// Gap between a tick's outer end and its label, in points.
const LABEL_PAD_PT: f64 = 3.5;

/// Canvas geometry captured by `begin_container`.
#[derive(Debug, Clone, Copy)]
struct Canvas {
    width: f64,
    height: f64,
    px_per_pt: f64,
    axes_linewidth: f64,
}

/// Frame of one sub-region in canvas pixels (y grows downward).
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

/// Builds an SVG document from [`DrawingBackend`] calls.
#[derive(Debug, Default)]
pub struct SvgBackend {
    font: Option<FontSpec>,
    canvas: Option<Canvas>,
    doc: String,
}

impl SvgBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn font_px(&self) -> f64 {
        let size = self.font.as_ref().map(|f| f.size).unwrap_or(10.0);
        let px_per_pt = self.canvas.map(|c| c.px_per_pt).unwrap_or(1.0);
        size * px_per_pt
    }

    fn draw_series(
        &mut self,
        clip_id: &str,
        series: &LineSeries,
        to_px: impl Fn([f64; 2]) -> (f64, f64),
        px_per_pt: f64,
    ) {
        // non-finite points break the line into separate runs
        let mut runs: Vec<Vec<(f64, f64)>> = vec![Vec::new()];
        for &p in &series.points {
            if p[0].is_finite() && p[1].is_finite() {
                if let Some(run) = runs.last_mut() {
                    run.push(to_px(p));
                }
            } else if runs.last().is_some_and(|r| !r.is_empty()) {
                runs.push(Vec::new());
            }
        }
        let [r, g, b] = series.color;
        for run in runs.iter().filter(|r| r.len() > 1) {
            let pts = run
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                self.doc,
                r#"<polyline points="{pts}" fill="none" stroke="rgb({r},{g},{b})" stroke-opacity="{}" stroke-width="{:.2}" stroke-linejoin="round" clip-path="url(#{clip_id})"/>"#,
                series.alpha,
                series.width * px_per_pt
            );
        }
    }

    fn draw_ticks(&mut self, region: &SubRegion, view: &RegionView, frame: Frame, px_per_pt: f64) {
        let ticks = &region.ticks;
        let (inside, outside) = ticks.direction.split();
        let width = ticks.width * px_per_pt;
        let (x0, x1) = view.limits.x;
        let (y0, y1) = view.limits.y;
        let map_x = |v: f64| frame.left + (v - x0) / (x1 - x0) * (frame.right - frame.left);
        let map_y = |v: f64| frame.bottom - (v - y0) / (y1 - y0) * (frame.bottom - frame.top);

        for edge in Edge::ALL {
            if !ticks.edge(edge).marks {
                continue;
            }
            let (major, minor) = if edge.is_horizontal() {
                (&view.x_major, &view.x_minor)
            } else {
                (&view.y_major, &view.y_minor)
            };
            let tiers = [
                (minor, ticks.minor_length * px_per_pt),
                (major, ticks.major_length * px_per_pt),
            ];
            for (positions, length) in tiers {
                if length <= 0.0 {
                    continue;
                }
                let (din, dout) = (length * inside, length * outside);
                for &v in positions.iter() {
                    let (xa, ya, xb, yb) = match edge {
                        Edge::Bottom => {
                            let x = map_x(v);
                            (x, frame.bottom + dout, x, frame.bottom - din)
                        }
                        Edge::Top => {
                            let x = map_x(v);
                            (x, frame.top - dout, x, frame.top + din)
                        }
                        Edge::Left => {
                            let y = map_y(v);
                            (frame.left - dout, y, frame.left + din, y)
                        }
                        Edge::Right => {
                            let y = map_y(v);
                            (frame.right + dout, y, frame.right - din, y)
                        }
                    };
                    let _ = writeln!(
                        self.doc,
                        r#"<line class="tick" x1="{xa:.2}" y1="{ya:.2}" x2="{xb:.2}" y2="{yb:.2}" stroke="black" stroke-width="{width:.2}"/>"#
                    );
                }
            }
        }
    }

    fn draw_labels(&mut self, region: &SubRegion, view: &RegionView, frame: Frame, px_per_pt: f64) {
        let ticks = &region.ticks;
        let font_px = self.font_px();
        let (_, outside) = ticks.direction.split();
        let offset = ticks.major_length * px_per_pt * outside + LABEL_PAD_PT * px_per_pt;
        let (x0, x1) = view.limits.x;
        let (y0, y1) = view.limits.y;
        let map_x = |v: f64| frame.left + (v - x0) / (x1 - x0) * (frame.right - frame.left);
        let map_y = |v: f64| frame.bottom - (v - y0) / (y1 - y0) * (frame.bottom - frame.top);

        for edge in Edge::ALL {
            if !ticks.edge(edge).labels {
                continue;
            }
            let (positions, labels) = if edge.is_horizontal() {
                (&view.x_major, &view.x_labels)
            } else {
                (&view.y_major, &view.y_labels)
            };
            for (&v, text) in positions.iter().zip(labels) {
                let (x, y, anchor) = match edge {
                    Edge::Bottom => (map_x(v), frame.bottom + offset + font_px * 0.8, "middle"),
                    Edge::Top => (map_x(v), frame.top - offset, "middle"),
                    Edge::Left => (frame.left - offset, map_y(v) + font_px * 0.35, "end"),
                    Edge::Right => (frame.right + offset, map_y(v) + font_px * 0.35, "start"),
                };
                let _ = writeln!(
                    self.doc,
                    r#"<text class="ticklabel" x="{x:.2}" y="{y:.2}" text-anchor="{anchor}">{}</text>"#,
                    escape_xml(text)
                );
            }
        }

        if let Some(xlabel) = &region.xlabel {
            let x = (frame.left + frame.right) / 2.0;
            let y = frame.bottom + offset + font_px * 2.0;
            let _ = writeln!(
                self.doc,
                r#"<text class="axislabel" x="{x:.2}" y="{y:.2}" text-anchor="middle">{}</text>"#,
                escape_xml(xlabel)
            );
        }
        if let Some(ylabel) = &region.ylabel {
            let widest = view.y_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
            let x = frame.left - offset - widest * font_px * 0.6 - font_px * 0.5;
            let y = (frame.top + frame.bottom) / 2.0;
            let _ = writeln!(
                self.doc,
                r#"<text class="axislabel" x="{x:.2}" y="{y:.2}" text-anchor="middle" transform="rotate(-90 {x:.2} {y:.2})">{}</text>"#,
                escape_xml(ylabel)
            );
        }
    }
}

impl DrawingBackend for SvgBackend {
    type Output = String;

    fn set_font(&mut self, font: &FontSpec) -> Result<()> {
        self.font = Some(font.clone());
        Ok(())
    }

    fn begin_container(&mut self, container: &Container) -> Result<()> {
        let (w, h) = container.pixel_size();
        let canvas = Canvas {
            width: w as f64,
            height: h as f64,
            px_per_pt: container.dpi / 72.0,
            axes_linewidth: container.axes_linewidth,
        };
        self.canvas = Some(canvas);
        let font = self.font.clone().unwrap_or_else(|| container.font.clone());
        let font_px = font.size * canvas.px_per_pt;
        let _ = writeln!(
            self.doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = writeln!(self.doc, r#"<rect width="{w}" height="{h}" fill="white"/>"#);
        let _ = writeln!(
            self.doc,
            r#"<g font-family="{}" font-size="{font_px:.2}">"#,
            escape_xml(&font.family)
        );
        self.font = Some(font);
        Ok(())
    }

    fn add_subregion(&mut self, region: &SubRegion, view: &RegionView) -> Result<()> {
        let canvas = self
            .canvas
            .ok_or_else(|| PlotError::Render("sub-region added before the container".to_string()))?;
        let r = &region.rect;
        let frame = Frame {
            left: r.x * canvas.width,
            right: r.right() * canvas.width,
            top: (1.0 - r.top()) * canvas.height,
            bottom: (1.0 - r.y) * canvas.height,
        };
        let (x0, x1) = view.limits.x;
        let (y0, y1) = view.limits.y;
        if x0 == x1 || y0 == y1 {
            return Err(PlotError::Render(format!(
                "sub-region {} has an empty axis range",
                region.index
            )));
        }
        let to_px = |p: [f64; 2]| {
            (
                frame.left + (p[0] - x0) / (x1 - x0) * (frame.right - frame.left),
                frame.bottom - (p[1] - y0) / (y1 - y0) * (frame.bottom - frame.top),
            )
        };

        let clip_id = format!("clip{}", region.index);
        let _ = writeln!(self.doc, r#"<g class="axes" id="axes{}">"#, region.index);
        let _ = writeln!(
            self.doc,
            r#"<clipPath id="{clip_id}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
            frame.left,
            frame.top,
            frame.right - frame.left,
            frame.bottom - frame.top
        );
        for series in &region.series {
            self.draw_series(&clip_id, series, &to_px, canvas.px_per_pt);
        }
        let _ = writeln!(
            self.doc,
            r#"<rect class="frame" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black" stroke-width="{:.2}"/>"#,
            frame.left,
            frame.top,
            frame.right - frame.left,
            frame.bottom - frame.top,
            canvas.axes_linewidth * canvas.px_per_pt
        );
        self.draw_ticks(region, view, frame, canvas.px_per_pt);
        self.draw_labels(region, view, frame, canvas.px_per_pt);
        let _ = writeln!(self.doc, "</g>");
        Ok(())
    }

    fn set_spacing(&mut self, spacing: Spacing) -> Result<()> {
        // sub-region rectangles already include the gaps
        log::trace!("svg: wspace={} hspace={}", spacing.wspace, spacing.hspace);
        Ok(())
    }

    fn finish(mut self) -> Result<String> {
        if self.canvas.is_none() {
            return Err(PlotError::Render("no container was created".to_string()));
        }
        self.doc.push_str("</g>\n</svg>\n");
        Ok(self.doc)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
