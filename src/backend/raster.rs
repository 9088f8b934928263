//! Raster backend: draws through [`SvgBackend`] and rasterizes the document
//! with usvg + resvg into an RGBA image.

use image::RgbaImage;

use super::{DrawingBackend, RegionView, SvgBackend};
use crate::error::{PlotError, Result};
use crate::layout::{Container, FontSpec, Spacing, SubRegion};

#[derive(Debug, Default)]
pub struct RasterBackend {
    svg: SvgBackend,
}

impl RasterBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawingBackend for RasterBackend {
    type Output = RgbaImage;

    fn set_font(&mut self, font: &FontSpec) -> Result<()> {
        self.svg.set_font(font)
    }

    fn begin_container(&mut self, container: &Container) -> Result<()> {
        self.svg.begin_container(container)
    }

    fn add_subregion(&mut self, region: &SubRegion, view: &RegionView) -> Result<()> {
        self.svg.add_subregion(region, view)
    }

    fn set_spacing(&mut self, spacing: Spacing) -> Result<()> {
        self.svg.set_spacing(spacing)
    }

    fn finish(self) -> Result<RgbaImage> {
        let svg = self.svg.finish()?;
        rasterize_svg(&svg)
    }
}

/// Render an SVG document to straight (non-premultiplied) RGBA pixels on a
/// white background. Text uses the system fonts.
pub fn rasterize_svg(svg: &str) -> Result<RgbaImage> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| PlotError::Render(e.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        PlotError::Render(format!(
            "cannot allocate a {}x{} pixmap",
            size.width(),
            size.height()
        ))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    log::debug!("rasterized figure to {}x{} px", size.width(), size.height());
    RgbaImage::from_raw(size.width(), size.height(), rgba)
        .ok_or_else(|| PlotError::Render("pixel buffer size mismatch".to_string()))
}
