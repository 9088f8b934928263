//! plothelper crate root: re-exports and module wiring.
//!
//! Small helpers for scientific figures:
//! - `data`: nearest-value lookup, scientific-notation formatting, tick placement
//! - `style`: the immutable styling configuration (YAML/JSON loadable)
//! - `layout`: `makefig`, the pre-configured figure/axes factory
//! - `backend`: the drawing seam with SVG and raster backends
//! - `preview`: egui/egui_plot view of a layout

pub mod backend;
pub mod data;
pub mod error;
pub mod layout;
pub mod preview;
pub mod style;

// Public re-exports for a compact external API
pub use backend::{DrawingBackend, ExportFormat, RasterBackend, RegionView, SvgBackend};
pub use data::nearest::{find_nearest, find_nearest_index, find_nearest_value, Nearest};
pub use data::number_format::{scinote, TickFormatter};
pub use error::{PlotError, Result};
pub use layout::{makefig, makefig_from_tag, LayoutDescriptor, PanelConfiguration};
pub use preview::LayoutView;
pub use style::{FigureStyle, TickDirection};
