//! Fixed-width layout of a formatted number.
//!
//! A number with `digits` digits and `precision` fractional digits is formatted
//! right-aligned into `digits + 2` character cells.
//!
//! Cell 0 holds the sign, cells `1..point` the integer digits, the point cell
//! the `.` and the remaining cells the fraction. The point cell is only half a
//! digit wide. With precision 0 there is no point, the layout holds one spare
//! leading cell instead and the whole row shifts left by one digit so the sign
//! cell still starts at the area's origin. The spare cell is always blank and
//! lies outside the area, so it is never drawn.
//!
//! ```text
//!  digits 5, precision 2:  | - | 1 | 2 | 3 |.| 4 | 5 |
//!  cell:                     0   1   2   3  4  5   6
//! ```

use core::fmt::Write;

use heapless::String;
#[cfg(not(test))]
use micromath::F32Ext;

use crate::config::{CELL_CAPACITY, NumberFormat};
use crate::metrics::GlyphMetrics;

/// Formatted characters of one number, one byte per cell.
pub type CellText = String<CELL_CAPACITY>;

/// Layout derived from a [`NumberFormat`] and the digit metrics of a font.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatPlan {
    format: NumberFormat,
    digit_width: u8,
    point_position: u8,
    half_digit_width: u8,
    quarter_digit_width: u8,
    max_num: f32,
}

impl FormatPlan {
    /// Plan the layout for `format` using `metrics`.
    pub fn new(
        format: NumberFormat,
        metrics: &GlyphMetrics,
    ) -> Self {
        let digits = format.digits();
        let precision = format.precision();
        let has_point = precision > 0;

        let plan = Self {
            format,
            digit_width: metrics.digit_width,
            point_position: digits - precision + if has_point { 1 } else { 2 },
            half_digit_width: if has_point { metrics.digit_width.div_ceil(2) } else { 0 },
            quarter_digit_width: if has_point { metrics.digit_width.div_ceil(4) } else { 0 },
            max_num: 10.0_f32.powi(i32::from(format.integer_digits())),
        };
        debug!(
            "format plan: digits={} precision={} point={} max={}",
            digits,
            precision,
            plan.point_position,
            plan.max_num
        );
        plan
    }

    /// Clamp `digits` and `precision` into range, then plan.
    pub fn configure(
        digits: u8,
        precision: u8,
        metrics: &GlyphMetrics,
    ) -> Self {
        Self::new(NumberFormat::new(digits, precision), metrics)
    }

    #[inline]
    pub const fn format(&self) -> NumberFormat { self.format }

    #[inline]
    pub const fn num_digits(&self) -> u8 { self.format.digits() }

    #[inline]
    pub const fn precision(&self) -> u8 { self.format.precision() }

    /// Index of the decimal point cell. Past the last cell when precision is 0.
    #[inline]
    pub const fn point_position(&self) -> u8 { self.point_position }

    /// Width of the point cell, 0 when no point is drawn.
    #[inline]
    pub const fn half_digit_width(&self) -> u8 { self.half_digit_width }

    /// Leftward nudge applied to the point glyph, 0 when no point is drawn.
    #[inline]
    pub const fn quarter_digit_width(&self) -> u8 { self.quarter_digit_width }

    /// Exclusive upper bound of a representable magnitude.
    #[inline]
    pub const fn max_num(&self) -> f32 { self.max_num }

    /// Number of character cells.
    #[inline]
    pub const fn cell_count(&self) -> usize { self.format.cell_count() }

    /// First cell inside the area. Skips the spare leading cell when there is no point.
    #[inline]
    pub const fn first_cell(&self) -> usize { if self.precision() == 0 { 1 } else { 0 } }

    /// Total width: all digits, a sign cell and a half-width point cell.
    pub fn width(&self) -> u16 {
        u16::from(self.digit_width) * (u16::from(self.num_digits()) + 1) + u16::from(self.half_digit_width)
    }

    #[inline]
    pub fn is_point_cell(
        &self,
        index: usize,
    ) -> bool {
        index == usize::from(self.point_position)
    }

    /// Absolute left edge of cell `index` for a number drawn at `origin_x`.
    pub fn cell_x(
        &self,
        origin_x: i32,
        index: usize,
    ) -> i32 {
        let digit_width = i32::from(self.digit_width);
        let mut x = origin_x + index as i32 * digit_width;
        if index > usize::from(self.point_position) {
            x -= i32::from(self.half_digit_width);
        }
        if self.precision() == 0 {
            x -= digit_width;
        }
        x
    }

    /// Width of cell `index`.
    pub fn cell_width(
        &self,
        index: usize,
    ) -> u32 {
        if self.is_point_cell(index) {
            u32::from(self.half_digit_width)
        } else {
            u32::from(self.digit_width)
        }
    }

    /// Left edge of the glyph drawn in cell `index`. The point is tucked
    /// against the digit before it.
    pub fn glyph_x(
        &self,
        origin_x: i32,
        index: usize,
    ) -> i32 {
        let x = self.cell_x(origin_x, index);
        if self.is_point_cell(index) {
            x - i32::from(self.quarter_digit_width)
        } else {
            x
        }
    }

    /// Check whether `number` can be shown without losing integer digits.
    #[inline]
    pub fn fits(
        &self,
        number: f32,
    ) -> bool {
        number.is_finite() && number.abs() < self.max_num
    }

    /// Format `number` right-aligned into the cell layout.
    ///
    /// Returns `None` when the number overflows, including values that only
    /// overflow after rounding to `precision` (999.6 with precision 0).
    pub fn render(
        &self,
        number: f32,
    ) -> Option<CellText> {
        if !self.fits(number) {
            return None;
        }
        let mut text = CellText::new();
        write!(
            text,
            "{:>width$.precision$}",
            number,
            width = self.cell_count(),
            precision = usize::from(self.precision())
        )
        .ok()?;

        let integer_digits = text
            .bytes()
            .take_while(|&c| c != b'.')
            .filter(u8::is_ascii_digit)
            .count();
        if integer_digits > usize::from(self.format.integer_digits()) || text.len() > self.cell_count() {
            return None;
        }
        Some(text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
