//! Backend-independent vector graphics for plots.
//!
//! This crate provides the drawing model shared by plot renderers:
//! - lengths, points and rectangles in a y-up user space measured in points
//! - a [`Path`] model of move, line, arc and close components
//! - the [`Canvas`] trait every backend implements
//! - a [`Recorder`] canvas that stores calls and can replay them on any other canvas
//! - raster ([`ImageCanvas`], on `tiny-skia`) and [`SvgCanvas`] backends
//!
//! Fonts are looked up in an explicitly shared [`FontRegistry`], usually
//! populated once from a [`FontConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use plotvg_canvas::{Canvas, Color, FontRegistry, ImageCanvas, Length, Point, Rectangle};
//! use std::sync::Arc;
//!
//! let mut c = ImageCanvas::new(Length::inches(4.0), Length::inches(3.0), 96.0,
//!     Arc::new(FontRegistry::new()))?;
//! c.set_color(Color::from_rgba8(255, 0, 0, 255));
//! c.fill(&Rectangle::new(Point::pt(10.0, 10.0), Point::pt(100.0, 50.0)).path());
//! let png_data = c.to_png()?;
//! ```

mod canvas;
mod color;
mod drawing_state;
mod encoding;
mod error;
mod font;
mod font_config;
mod geometry;
mod image_canvas;
mod path;
mod recorder;
mod svg;
mod units;

// Re-export public API
pub use canvas::{Canvas, CanvasSizer};
pub use color::Color;
pub use error::{CanvasError, CanvasResult};
pub use font::{Face, Font, FontRegistry, FontStyle, FontWeight};
pub use font_config::{CustomFont, FontConfig};
pub use geometry::{Point, Rectangle};
pub use image_canvas::{ImageCanvas, DEFAULT_DPI};
pub use path::{Path, PathComponent};
pub use recorder::{Action, Recorded, Recorder};
pub use svg::SvgCanvas;
pub use units::Length;
