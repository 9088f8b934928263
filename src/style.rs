//! Figure styling: the immutable configuration handed to the layout factory.
//!
//! [`FigureStyle`] replaces process-wide styling globals. Each call to
//! [`crate::layout::makefig`] receives its own style, so callers can ask for
//! different looks without interfering with each other. Styles can be stored
//! as YAML or JSON; missing keys fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

/// Which side of the axes frame tick marks are drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    /// Ticks point into the plotting area.
    In,
    /// Ticks point away from the plotting area.
    Out,
    /// Ticks straddle the frame.
    InOut,
}

impl Default for TickDirection {
    fn default() -> Self {
        TickDirection::In
    }
}

impl TickDirection {
    /// Fractions of the tick length drawn `(inside, outside)` the frame.
    pub fn split(&self) -> (f64, f64) {
        match self {
            TickDirection::In => (1.0, 0.0),
            TickDirection::Out => (0.0, 1.0),
            TickDirection::InOut => (0.5, 0.5),
        }
    }
}

/// Space around the plotting area, as figure fractions measured from the
/// bottom-left corner (`left < right`, `bottom < top`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.15,
            right: 0.95,
            bottom: 0.15,
            top: 0.95,
        }
    }
}

/// Cosmetic defaults applied by the layout factory.
///
/// Lengths are in points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureStyle {
    pub font_family: String,
    pub font_size: f64,
    pub major_tick_length: f64,
    pub minor_tick_length: f64,
    pub tick_width: f64,
    pub tick_direction: TickDirection,
    /// Minor subdivisions per major tick interval; 1 disables minor ticks.
    pub minor_ticks_per_major: usize,
    pub axes_linewidth: f64,
    pub line_width: f64,
    pub marker_size: f64,
    /// Opacity of plotted series, `0.0..=1.0`.
    pub alpha: f64,
    pub dpi: f64,
    pub margins: Margins,
    /// Series colours, cycled per sub-region.
    pub color_cycle: Vec<[u8; 3]>,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans".to_string(),
            font_size: 16.0,
            major_tick_length: 7.0,
            minor_tick_length: 4.0,
            tick_width: 1.5,
            tick_direction: TickDirection::In,
            minor_ticks_per_major: 5,
            axes_linewidth: 1.5,
            line_width: 2.0,
            marker_size: 6.0,
            alpha: 0.8,
            dpi: 100.0,
            margins: Margins::default(),
            color_cycle: vec![
                [31, 119, 180],
                [255, 127, 14],
                [44, 160, 44],
                [214, 39, 40],
                [148, 103, 189],
                [140, 86, 75],
            ],
        }
    }
}

/// On-disk encoding of a style file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleEncoding {
    Yaml,
    Json,
}

impl StyleEncoding {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(StyleEncoding::Yaml),
            Some("json") => Ok(StyleEncoding::Json),
            _ => Err(PlotError::invalid(format!(
                "style file {} must end in .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

impl FigureStyle {
    /// Check the style for values no figure can be built from.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("font_size", self.font_size),
            ("dpi", self.dpi),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(PlotError::invalid(format!("{name} must be positive, got {v}")));
            }
        }
        let non_negative = [
            ("major_tick_length", self.major_tick_length),
            ("minor_tick_length", self.minor_tick_length),
            ("tick_width", self.tick_width),
            ("axes_linewidth", self.axes_linewidth),
            ("line_width", self.line_width),
            ("marker_size", self.marker_size),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(PlotError::invalid(format!("{name} must be non-negative, got {v}")));
            }
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(PlotError::invalid(format!("alpha must lie in 0..=1, got {}", self.alpha)));
        }
        if self.minor_ticks_per_major == 0 {
            return Err(PlotError::invalid("minor_ticks_per_major must be at least 1"));
        }
        if self.color_cycle.is_empty() {
            return Err(PlotError::invalid("color_cycle must not be empty"));
        }
        let m = &self.margins;
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !(in_unit(m.left) && in_unit(m.right) && in_unit(m.bottom) && in_unit(m.top))
            || m.left >= m.right
            || m.bottom >= m.top
        {
            return Err(PlotError::invalid(format!("margins {m:?} do not leave a plotting area")));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load and validate a style from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let encoding = StyleEncoding::from_path(path)?;
        let txt = std::fs::read_to_string(path)?;
        let style = match encoding {
            StyleEncoding::Yaml => Self::from_yaml(&txt)?,
            StyleEncoding::Json => Self::from_json(&txt)?,
        };
        style.validate()?;
        log::debug!("loaded figure style from {}", path.display());
        Ok(style)
    }

    /// Save the style, encoding chosen by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let txt = match StyleEncoding::from_path(path)? {
            StyleEncoding::Yaml => self.to_yaml()?,
            StyleEncoding::Json => self.to_json()?,
        };
        std::fs::write(path, txt)?;
        Ok(())
    }

    /// Colour for the `n`th series of a sub-region.
    pub fn series_color(&self, n: usize) -> [u8; 3] {
        self.color_cycle
            .get(n % self.color_cycle.len().max(1))
            .copied()
            .unwrap_or([0, 0, 0])
    }
}
