//! Compile-time defaults and limits for number rendering.
//!
//! All limits are `const` with validation assertions, so an inconsistent
//! configuration fails at compile time rather than on the display.

// =============================================================================
// Digit Limits
// =============================================================================

/// Fewest digits a number may be configured with.
pub const MIN_DIGITS: u8 = 2;

/// Most digits a number may be configured with.
pub const MAX_DIGITS: u8 = 15;

/// Digits used until [`set_format`](crate::DisplayNumber::set_format) is called.
pub const DEFAULT_DIGITS: u8 = 7;

/// Fractional digits used until [`set_format`](crate::DisplayNumber::set_format) is called.
pub const DEFAULT_PRECISION: u8 = 3;

/// Character cells in the largest layout: digits plus sign plus decimal point,
/// with one spare so a rounded-up value still fits while it is checked.
pub const CELL_CAPACITY: usize = MAX_DIGITS as usize + 3;

/// Text shown in place of a number that does not fit the configured width.
pub const ERROR_TEXT: &str = "Err!";

const _: () = assert!(MIN_DIGITS >= 2);
const _: () = assert!(MIN_DIGITS <= MAX_DIGITS);
const _: () = assert!(DEFAULT_DIGITS >= MIN_DIGITS && DEFAULT_DIGITS <= MAX_DIGITS);
const _: () = assert!(DEFAULT_PRECISION < DEFAULT_DIGITS);
const _: () = assert!(CELL_CAPACITY > MAX_DIGITS as usize + 2);

// =============================================================================
// Number Format
// =============================================================================

/// Digit count and precision of a rendered number.
///
/// Always holds a valid pair: `digits` in `MIN_DIGITS..=MAX_DIGITS` and
/// `precision <= digits - 1`, so at least one digit precedes the point.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumberFormat {
    digits: u8,
    precision: u8,
}

impl NumberFormat {
    /// Create a format, silently clamping out-of-range input.
    ///
    /// `digits` is clamped into `MIN_DIGITS..=MAX_DIGITS` first, then
    /// `precision` is capped at `digits - 1`.
    pub const fn new(
        digits: u8,
        precision: u8,
    ) -> Self {
        let digits = if digits < MIN_DIGITS {
            MIN_DIGITS
        } else if digits > MAX_DIGITS {
            MAX_DIGITS
        } else {
            digits
        };
        let precision = if precision > digits - 1 { digits - 1 } else { precision };
        Self { digits, precision }
    }

    /// Total digits, not counting sign or decimal point.
    #[inline]
    pub const fn digits(self) -> u8 { self.digits }

    /// Digits after the decimal point.
    #[inline]
    pub const fn precision(self) -> u8 { self.precision }

    /// Digits before the decimal point.
    #[inline]
    pub const fn integer_digits(self) -> u8 { self.digits - self.precision }

    /// Number of character cells drawn: digits plus sign plus point.
    #[inline]
    pub const fn cell_count(self) -> usize { self.digits as usize + 2 }
}

impl Default for NumberFormat {
    fn default() -> Self { Self::new(DEFAULT_DIGITS, DEFAULT_PRECISION) }
}

// =============================================================================
// Unit Tests
// =============================================================================
