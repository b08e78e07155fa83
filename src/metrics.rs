//! Digit glyph measurement.
//!
//! Numbers are laid out in fixed-width cells, so every cell must be large
//! enough for the widest and tallest of the glyphs `'0'..='9'`. Proportional
//! fonts work too; their digits simply get the widest digit's cell.

use crate::canvas::MeasureText;

/// Cell size and baseline that fit every decimal digit of a font.
///
/// All zero means no font has been measured yet.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphMetrics {
    /// Widest `offset.x + width` over the digits.
    pub digit_width: u8,
    /// Tallest digit.
    pub digit_height: u8,
    /// Largest distance from the top of a digit to its baseline.
    pub digit_baseline: u8,
}

impl GlyphMetrics {
    /// Zero metrics, used while no font is set.
    pub const EMPTY: Self = Self {
        digit_width: 0,
        digit_height: 0,
        digit_baseline: 0,
    };

    /// Measure the ten digit glyphs of `font`.
    pub fn probe<F>(font: &F) -> Self
    where
        F: MeasureText + ?Sized,
    {
        let mut metrics = Self::EMPTY;
        for digit in b'0'..=b'9' {
            let mut glyph = [0u8; 4];
            let bounds = font.measure_text(char::from(digit).encode_utf8(&mut glyph));

            let width = (bounds.offset.x + bounds.size.width as i32).clamp(0, i32::from(u8::MAX)) as u8;
            let height = bounds.size.height.min(u32::from(u8::MAX)) as u8;
            let baseline = bounds.offset.y.unsigned_abs().min(u32::from(u8::MAX)) as u8;

            metrics.digit_width = metrics.digit_width.max(width);
            metrics.digit_height = metrics.digit_height.max(height);
            metrics.digit_baseline = metrics.digit_baseline.max(baseline);
        }
        trace!(
            "digit metrics: w={} h={} baseline={}",
            metrics.digit_width,
            metrics.digit_height,
            metrics.digit_baseline
        );
        metrics
    }

    /// Measure `font`, or return [`EMPTY`](Self::EMPTY) when there is none.
    pub fn probe_optional<F>(font: Option<&F>) -> Self
    where
        F: MeasureText + ?Sized,
    {
        font.map_or(Self::EMPTY, |font| Self::probe(font))
    }

    /// Check whether a font has been measured.
    #[inline]
    pub const fn is_ready(&self) -> bool { self.digit_width > 0 && self.digit_height > 0 }
}

// =============================================================================
// Unit Tests
// =============================================================================
