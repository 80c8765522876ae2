//! Folio rendering: widget painters, a backend-neutral display list, and the
//! Vello backend.
//!
//! Painters never touch a backend. They emit a [`DisplayList`] in CSS pixels
//! and each backend (Vello here, Canvas2D in `folio-wasm`) replays it under
//! the device-pixel transform of its surface.

pub mod color;
pub mod gpu;
pub mod paint;
pub mod scene;
pub mod theme;

pub use color::Color;
pub use gpu::{VelloRenderer, encode_list};
pub use paint::paint_widget;
pub use scene::{DisplayList, DrawCmd, TextAlign};
pub use theme::Theme;
