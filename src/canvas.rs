//! The graphics capability used by the number renderer.
//!
//! The renderer never owns a display. It needs three things, each taking the
//! font explicitly so no font state is shared through the display handle:
//!
//! - [`MeasureText`]: bounding box of a string, measured at the origin
//! - [`GlyphCanvas::fill_rect`]: solid background fill
//! - [`GlyphCanvas::draw_text`]: text placed on its alphabetic baseline
//!
//! Any embedded-graphics [`DrawTarget`] is a [`GlyphCanvas`] for
//! [`MonoFont`]s (including the `profont` fonts). Draw errors from the target
//! are discarded; the display is trusted to accept every draw.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};

/// Bounding box of rendered text relative to the cursor position.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBounds {
    /// Offset of the top left corner from the cursor. `y` is negative for
    /// glyphs that rise above the baseline.
    pub offset: Point,
    /// Size of the box.
    pub size: Size,
}

/// Font-side text measurement.
pub trait MeasureText {
    /// Measure `text` with the cursor at (0, 0) on the alphabetic baseline.
    ///
    /// Measuring at any other origin shifts the vertical offset, so the
    /// origin is not a parameter.
    fn measure_text(
        &self,
        text: &str,
    ) -> TextBounds;
}

/// Display-side drawing operations for fonts of type `F`.
pub trait GlyphCanvas<F: ?Sized> {
    /// Opaque colour code, compared only for equality.
    type Color: Copy + PartialEq;

    /// Fill a rectangle with a solid colour.
    fn fill_rect(
        &mut self,
        top_left: Point,
        size: Size,
        color: Self::Color,
    );

    /// Draw `text` with its alphabetic baseline starting at `origin`.
    fn draw_text(
        &mut self,
        font: &F,
        text: &str,
        origin: Point,
        color: Self::Color,
    );
}

// =============================================================================
// embedded-graphics Implementations
// =============================================================================

impl MeasureText for MonoFont<'_> {
    fn measure_text(
        &self,
        text: &str,
    ) -> TextBounds {
        // Colour does not affect metrics
        let style = MonoTextStyleBuilder::<BinaryColor>::new().font(self).build();
        let metrics = style.measure_string(text, Point::zero(), Baseline::Alphabetic);
        TextBounds {
            offset: metrics.bounding_box.top_left,
            size: metrics.bounding_box.size,
        }
    }
}

impl<'f, D> GlyphCanvas<MonoFont<'f>> for D
where
    D: DrawTarget,
{
    type Color = D::Color;

    fn fill_rect(
        &mut self,
        top_left: Point,
        size: Size,
        color: Self::Color,
    ) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        Rectangle::new(top_left, size)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self)
            .ok();
    }

    fn draw_text(
        &mut self,
        font: &MonoFont<'f>,
        text: &str,
        origin: Point,
        color: Self::Color,
    ) {
        Text::with_baseline(text, origin, MonoTextStyle::new(font, color), Baseline::Alphabetic)
            .draw(self)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
