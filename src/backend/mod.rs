//! Drawing backends: the seam between layout descriptors and whatever turns
//! them into pixels or vector paths.
//!
//! [`LayoutDescriptor::render`] drives a [`DrawingBackend`] in a fixed order:
//! font, container, each sub-region, spacing. Two backends ship with the crate:
//! - [`SvgBackend`]: vector output as an SVG document
//! - [`RasterBackend`]: the same document rasterized into an RGBA image

pub mod raster;
pub mod svg;

use std::path::Path;

pub use raster::{rasterize_svg, RasterBackend};
pub use svg::SvgBackend;

use crate::data::ticks;
use crate::error::{PlotError, Result};
use crate::layout::{AxisLimits, Container, FontSpec, LayoutDescriptor, Spacing, SubRegion};

/// Everything a backend needs to draw one sub-region, resolved from the
/// descriptor: limits, tick positions and the label text of each major tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionView {
    pub limits: AxisLimits,
    pub x_major: Vec<f64>,
    pub x_minor: Vec<f64>,
    pub y_major: Vec<f64>,
    pub y_minor: Vec<f64>,
    /// One label per entry of `x_major`.
    pub x_labels: Vec<String>,
    /// One label per entry of `y_major`.
    pub y_labels: Vec<String>,
}

impl RegionView {
    pub fn new(region: &SubRegion, limits: AxisLimits, minor_per_major: usize) -> Self {
        let x_major = ticks::major_ticks(limits.x, limits.x_interval);
        let y_major = ticks::major_ticks(limits.y, limits.y_interval);
        let x_labels = x_major
            .iter()
            .map(|&v| region.x_formatter.format_tick(v, limits.x_interval))
            .collect();
        let y_labels = y_major
            .iter()
            .map(|&v| region.y_formatter.format_tick(v, limits.y_interval))
            .collect();
        Self {
            limits,
            x_minor: ticks::minor_ticks(limits.x, limits.x_interval, minor_per_major),
            y_minor: ticks::minor_ticks(limits.y, limits.y_interval, minor_per_major),
            x_major,
            y_major,
            x_labels,
            y_labels,
        }
    }
}

/// A rendering collaborator.
///
/// Calls arrive in the order `set_font`, `begin_container`, `add_subregion`
/// (once per sub-region), `set_spacing`, then `finish`.
pub trait DrawingBackend {
    type Output;

    /// Set the font family and base size used for all text.
    fn set_font(&mut self, font: &FontSpec) -> Result<()>;

    /// Create the top-level drawing surface.
    fn begin_container(&mut self, container: &Container) -> Result<()>;

    /// Draw one sub-region: frame, tick marks, tick labels and its series.
    fn add_subregion(&mut self, region: &SubRegion, view: &RegionView) -> Result<()>;

    /// Apply the gaps between sub-regions.
    fn set_spacing(&mut self, spacing: Spacing) -> Result<()>;

    fn finish(self) -> Result<Self::Output>;
}

/// File formats [`LayoutDescriptor::save`] can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Vector graphics.
    Svg,
    /// Lossless raster.
    Png,
    /// Lossy raster, no transparency.
    Jpeg,
}

impl ExportFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(ExportFormat::Svg),
            Some("png") => Ok(ExportFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(ExportFormat::Jpeg),
            _ => Err(PlotError::invalid(format!(
                "cannot infer an export format from {} (use .svg, .png, .jpg or .jpeg)",
                path.display()
            ))),
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, ExportFormat::Svg)
    }
}

impl LayoutDescriptor {
    /// Resolved view of every sub-region, in sub-region order.
    pub fn views(&self) -> Vec<RegionView> {
        let per_major = self.style().minor_ticks_per_major;
        self.subregions()
            .iter()
            .zip(self.resolved_limits())
            .map(|(region, limits)| RegionView::new(region, limits, per_major))
            .collect()
    }

    /// Replay this layout onto `backend` and return its output.
    pub fn render<B: DrawingBackend>(&self, mut backend: B) -> Result<B::Output> {
        let container = self.container();
        backend.set_font(&container.font)?;
        backend.begin_container(container)?;
        for (region, view) in self.subregions().iter().zip(self.views()) {
            backend.add_subregion(region, &view)?;
        }
        backend.set_spacing(container.spacing)?;
        backend.finish()
    }

    pub fn to_svg(&self) -> Result<String> {
        self.render(SvgBackend::new())
    }

    pub fn to_image(&self) -> Result<image::RgbaImage> {
        self.render(RasterBackend::new())
    }

    /// Write the figure to `path`; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)?;
        match format {
            ExportFormat::Svg => std::fs::write(path, self.to_svg()?)?,
            ExportFormat::Png => self.to_image()?.save(path)?,
            ExportFormat::Jpeg => image::DynamicImage::ImageRgba8(self.to_image()?)
                .to_rgb8()
                .save(path)?,
        }
        log::info!("saved {:?} figure to {}", format, path.display());
        Ok(())
    }
}
