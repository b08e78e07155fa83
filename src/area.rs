//! Rectangular display areas and the positions derived from them.
//!
//! [`Extent`] supplies every derived position (edges, divisions, centre lines,
//! corners) from four accessors. Two implementations exist:
//!
//! - [`DisplayArea`] stores its width and height
//! - [`DisplayNumber`](crate::DisplayNumber) computes them from font metrics and format
//!
//! Method names are deliberately terse (`r`, `b`, `cp`, ...) because they are
//! mostly used inline as arguments to drawing calls.
//!
//! # Conventions
//!
//! Right and bottom edges are the *last* pixel inside the area, not one past it:
//!
//! ```text
//!  x          r() = x + w - 1
//!  |<-- w -->|
//!  +---------+ y
//!  |         |
//!  +---------+ b() = y + h - 1
//! ```
//!
//! Arithmetic saturates at the `u16` bounds instead of wrapping.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Treat a zero divisor as one.
#[inline]
const fn divisor(div: u8) -> u16 { if div == 0 { 1 } else { div as u16 } }

/// Absolute geometry of an axis-aligned area on the display.
pub trait Extent {
    /// Absolute x position of the left edge.
    fn x(&self) -> u16;

    /// Absolute y position of the top edge.
    fn y(&self) -> u16;

    /// Width in pixels.
    fn w(&self) -> u16;

    /// Height in pixels.
    fn h(&self) -> u16;

    /// Right edge (last pixel column inside the area).
    fn r(&self) -> u16 { self.x().saturating_add(self.w()).saturating_sub(1) }

    /// Bottom edge (last pixel row inside the area).
    fn b(&self) -> u16 { self.y().saturating_add(self.h()).saturating_sub(1) }

    /// Height divided by `div`. Callers usually pass 2.
    fn h_div(
        &self,
        div: u8,
    ) -> u16 {
        self.h() / divisor(div)
    }

    /// Width divided by `div`. Callers usually pass 2.
    fn w_div(
        &self,
        div: u8,
    ) -> u16 {
        self.w() / divisor(div)
    }

    /// Top of the `nth` band when the height is split into `div` bands.
    fn y_div(
        &self,
        div: u8,
        nth: u8,
    ) -> u16 {
        self.y().saturating_add(u16::from(nth).saturating_mul(self.h_div(div)))
    }

    /// Left of the `nth` band when the width is split into `div` bands.
    fn x_div(
        &self,
        div: u8,
        nth: u8,
    ) -> u16 {
        self.x().saturating_add(u16::from(nth).saturating_mul(self.w_div(div)))
    }

    /// Bottom of the `nth` band (the top of the band below it).
    fn b_div(
        &self,
        div: u8,
        nth: u8,
    ) -> u16 {
        self.y_div(div, nth).saturating_add(self.h_div(div))
    }

    /// Right of the `nth` band (the left of the band after it).
    fn r_div(
        &self,
        div: u8,
        nth: u8,
    ) -> u16 {
        self.x_div(div, nth).saturating_add(self.w_div(div))
    }

    /// Horizontal centre line of the `nth` of `div` bands.
    ///
    /// The middle pixel between the band's first and last row, rounding down
    /// for even heights. `y_cl(1, 0)` is the centre line of the whole area.
    ///
    /// This is `y_div + (h_div - 1) / 2`, not `y_div + h_div / 2`: for even
    /// heights it is one pixel above the plain half-height offset, so the
    /// centre sits midway between `y()` and the inclusive `b()`.
    fn y_cl(
        &self,
        div: u8,
        nth: u8,
    ) -> u16 {
        self.y_div(div, nth).saturating_add(self.h_div(div).saturating_sub(1) / 2)
    }

    /// Vertical centre line of the `nth` of `div` bands.
    ///
    /// `x_div + (w_div - 1) / 2`, one pixel left of `x_div + w_div / 2` for
    /// even widths. See [`y_cl`](Self::y_cl).
    fn x_cl(
        &self,
        div: u8,
        nth: u8,
    ) -> u16 {
        self.x_div(div, nth).saturating_add(self.w_div(div).saturating_sub(1) / 2)
    }

    /// Centre point.
    fn cp(&self) -> Point { Point::new(i32::from(self.x_cl(1, 0)), i32::from(self.y_cl(1, 0))) }

    /// Top left corner.
    fn tl(&self) -> Point { Point::new(i32::from(self.x()), i32::from(self.y())) }

    /// Top right corner.
    fn tr(&self) -> Point { Point::new(i32::from(self.r()), i32::from(self.y())) }

    /// Bottom right corner.
    fn br(&self) -> Point { Point::new(i32::from(self.r()), i32::from(self.b())) }

    /// Bottom left corner.
    fn bl(&self) -> Point { Point::new(i32::from(self.x()), i32::from(self.b())) }

    /// Check whether a pixel lies inside the area. All four edges are inclusive.
    fn contains(
        &self,
        px: u16,
        py: u16,
    ) -> bool {
        self.w() > 0 && self.h() > 0 && self.x() <= px && px <= self.r() && self.y() <= py && py <= self.b()
    }

    /// The area as an embedded-graphics rectangle.
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.tl(), Size::new(u32::from(self.w()), u32::from(self.h())))
    }
}

// =============================================================================
// Stored Area
// =============================================================================

/// An area with a stored origin and size.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayArea {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl DisplayArea {
    /// Create a new area.
    pub const fn new(
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn set_x(
        &mut self,
        x: u16,
    ) {
        self.x = x;
    }

    #[inline]
    pub fn set_y(
        &mut self,
        y: u16,
    ) {
        self.y = y;
    }

    #[inline]
    pub fn set_w(
        &mut self,
        w: u16,
    ) {
        self.w = w;
    }

    #[inline]
    pub fn set_h(
        &mut self,
        h: u16,
    ) {
        self.h = h;
    }
}

impl Extent for DisplayArea {
    #[inline]
    fn x(&self) -> u16 { self.x }

    #[inline]
    fn y(&self) -> u16 { self.y }

    #[inline]
    fn w(&self) -> u16 { self.w }

    #[inline]
    fn h(&self) -> u16 { self.h }
}

// =============================================================================
// Unit Tests
// =============================================================================
