//! Display utilities - area geometry and flicker-free number rendering.
//!
//! This library provides two building blocks for small TFT/OLED displays driven
//! through [`embedded_graphics`]:
//!
//! - [`area`]: [`DisplayArea`] and the [`Extent`] trait, deriving edges, divisions,
//!   centre lines and corners from an origin and a size
//! - [`number`]: [`DisplayNumber`], which draws a fixed-width floating point number and
//!   only repaints the character cells that changed since the previous frame
//!
//! Supporting modules:
//!
//! - [`canvas`]: The narrow graphics capability the renderer draws through
//! - [`metrics`]: Digit glyph measurement for a font
//! - [`format`]: Fixed-width layout plan (point cell, overflow limit)
//! - [`config`]: Compile-time defaults and limits
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), while embedded users get a
//! `no_std` library.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
mod log;

pub mod area;
pub mod canvas;
pub mod config;
pub mod format;
pub mod metrics;
pub mod number;

// Re-export commonly used items
pub use area::{DisplayArea, Extent};
pub use canvas::{GlyphCanvas, MeasureText, TextBounds};
pub use config::NumberFormat;
pub use format::FormatPlan;
pub use metrics::GlyphMetrics;
pub use number::{DisplayNumber, DrawError};
