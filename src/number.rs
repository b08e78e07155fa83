//! Flicker-free drawing of frequently changing numbers.
//!
//! [`DisplayNumber`] formats a float into a row of fixed-width character cells
//! (see [`format`](crate::format)) and remembers what each cell currently shows.
//! On every draw only the cells whose character changed are cleared and
//! redrawn, which keeps slow SPI displays from flashing the whole number.
//!
//! # Update Strategy
//!
//! | Situation | Cells redrawn |
//! |-----------|---------------|
//! | Same number and colours as last draw | None (fast path) |
//! | Number changed | Only cells whose character differs |
//! | Font, position, format or stored colour changed | All (stale) |
//! | Colours differ from the last draw | All |
//! | `force_refresh` | All |
//! | Number too large for the format | Whole area cleared, as much of `Err!` as fits shown |
//!
//! # Usage
//!
//! ```ignore
//! let mut speed: DisplayNumber<'_, MonoFont<'_>, Rgb565> = DisplayNumber::default();
//! speed.begin(10, 40, &PROFONT_24_POINT, 5, 1);
//!
//! loop {
//!     speed.draw(&mut display, read_speed()).ok();
//! }
//! ```
//!
//! The display is borrowed per draw call and never stored.

use core::fmt;

use embedded_graphics::pixelcolor::RgbColor;
use embedded_graphics::prelude::{Point, Size};

use crate::area::Extent;
use crate::canvas::{GlyphCanvas, MeasureText};
use crate::config::{CELL_CAPACITY, ERROR_TEXT, NumberFormat};
use crate::format::FormatPlan;
use crate::metrics::GlyphMetrics;

/// Marks a cell whose on-screen content is unknown. Never produced by formatting.
const UNKNOWN_CELL: u8 = 0;

// =============================================================================
// Errors
// =============================================================================

/// Reasons a draw did not show the requested number.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawError {
    /// No font has been set; nothing was drawn.
    NotReady,
    /// The number does not fit the configured digits; `Err!` was drawn instead.
    Overflow,
}

impl fmt::Display for DrawError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NotReady => f.write_str("font not set"),
            Self::Overflow => f.write_str("number too large for format"),
        }
    }
}

impl core::error::Error for DrawError {}

// =============================================================================
// Drawn State
// =============================================================================

/// What the display currently shows for this number.
struct DrawnState<C> {
    /// Bit pattern of the last drawn number, so `-0.0` and `NaN` compare exactly.
    number: Option<u32>,
    /// Character shown in each cell.
    cells: [u8; CELL_CAPACITY],
    /// Text and background colour of the last draw.
    colours: Option<(C, C)>,
    /// Outcome of the last draw, repeated by the fast path.
    result: Result<(), DrawError>,
}

impl<C> DrawnState<C> {
    const fn new() -> Self {
        Self {
            number: None,
            cells: [UNKNOWN_CELL; CELL_CAPACITY],
            colours: None,
            result: Ok(()),
        }
    }
}

// =============================================================================
// Display Number
// =============================================================================

/// A fixed-width number that redraws only the digits that changed.
///
/// Width and height are derived from the font and format, so they are zero
/// until a font is set. The font is borrowed for `'f`; the display is passed
/// to each draw call.
pub struct DisplayNumber<'f, F: ?Sized, C> {
    x: u16,
    y: u16,
    font: Option<&'f F>,
    format: NumberFormat,
    metrics: GlyphMetrics,
    plan: FormatPlan,
    text_colour: C,
    bg_colour: C,
    drawn: DrawnState<C>,
    /// Next draw must treat every cell as changed.
    stale: bool,
    /// Set while `begin` applies several settings, so they reconfigure once.
    deferred: bool,
}

impl<'f, F, C> DisplayNumber<'f, F, C>
where
    F: MeasureText + ?Sized,
    C: Copy + PartialEq,
{
    /// Create a number at (0, 0) with the default format and no font.
    pub fn new(
        text_colour: C,
        bg_colour: C,
    ) -> Self {
        Self {
            x: 0,
            y: 0,
            font: None,
            format: NumberFormat::default(),
            metrics: GlyphMetrics::EMPTY,
            plan: FormatPlan::new(NumberFormat::default(), &GlyphMetrics::EMPTY),
            text_colour,
            bg_colour,
            drawn: DrawnState::new(),
            stale: true,
            deferred: false,
        }
    }

    /// Set position, font and format together, reconfiguring once.
    pub fn begin(
        &mut self,
        x: u16,
        y: u16,
        font: &'f F,
        digits: u8,
        precision: u8,
    ) {
        self.deferred = true;
        self.set_position(x, y);
        self.set_font(font);
        self.set_format(digits, precision);
        self.deferred = false;
        self.configure();
    }

    /// [`begin`](Self::begin) at the origin.
    pub fn begin_at_origin(
        &mut self,
        font: &'f F,
        digits: u8,
        precision: u8,
    ) {
        self.begin(0, 0, font, digits, precision);
    }

    /// Set the font. Nothing is drawn until a font is set.
    pub fn set_font(
        &mut self,
        font: &'f F,
    ) {
        if self.font.is_some_and(|current| core::ptr::eq(current, font)) {
            return;
        }
        self.font = Some(font);
        self.configure();
    }

    /// Set the top left corner.
    pub fn set_position(
        &mut self,
        x: u16,
        y: u16,
    ) {
        if self.x == x && self.y == y {
            return;
        }
        self.x = x;
        self.y = y;
        self.configure();
    }

    /// Set total digits (not counting sign or point) and fractional digits.
    ///
    /// Out-of-range values are clamped, see [`NumberFormat::new`].
    pub fn set_format(
        &mut self,
        digits: u8,
        precision: u8,
    ) {
        let format = NumberFormat::new(digits, precision);
        if format == self.format {
            return;
        }
        self.format = format;
        self.configure();
    }

    pub fn set_text_color(
        &mut self,
        colour: C,
    ) {
        if self.text_colour != colour {
            self.text_colour = colour;
            self.stale = true;
        }
    }

    pub fn set_background_color(
        &mut self,
        colour: C,
    ) {
        if self.bg_colour != colour {
            self.bg_colour = colour;
            self.stale = true;
        }
    }

    /// Re-measure the font and re-plan the layout.
    fn configure(&mut self) {
        if self.deferred {
            return;
        }
        self.metrics = GlyphMetrics::probe_optional(self.font);
        self.plan = FormatPlan::new(self.format, &self.metrics);
        self.stale = true;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn font(&self) -> Option<&'f F> { self.font }

    #[inline]
    pub const fn format(&self) -> NumberFormat { self.format }

    #[inline]
    pub const fn metrics(&self) -> GlyphMetrics { self.metrics }

    #[inline]
    pub const fn plan(&self) -> &FormatPlan { &self.plan }

    #[inline]
    pub const fn text_color(&self) -> C { self.text_colour }

    #[inline]
    pub const fn background_color(&self) -> C { self.bg_colour }

    /// Check whether the next draw repaints every cell.
    #[inline]
    pub const fn is_stale(&self) -> bool { self.stale }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Draw at the stored position with the stored colours.
    pub fn draw<G>(
        &mut self,
        canvas: &mut G,
        number: f32,
    ) -> Result<(), DrawError>
    where
        G: GlyphCanvas<F, Color = C> + ?Sized,
    {
        self.draw_at(canvas, self.x, self.y, number, self.text_colour, self.bg_colour, false)
    }

    /// Draw at the stored position with the stored colours, repainting every cell.
    pub fn draw_forced<G>(
        &mut self,
        canvas: &mut G,
        number: f32,
    ) -> Result<(), DrawError>
    where
        G: GlyphCanvas<F, Color = C> + ?Sized,
    {
        self.draw_at(canvas, self.x, self.y, number, self.text_colour, self.bg_colour, true)
    }

    /// Draw at the stored position with a text colour for this draw only.
    pub fn draw_with_color<G>(
        &mut self,
        canvas: &mut G,
        number: f32,
        text_colour: C,
        force_refresh: bool,
    ) -> Result<(), DrawError>
    where
        G: GlyphCanvas<F, Color = C> + ?Sized,
    {
        self.draw_at(canvas, self.x, self.y, number, text_colour, self.bg_colour, force_refresh)
    }

    /// Draw `number` with its top left corner at (`x`, `y`).
    ///
    /// Position and colours apply to this draw only. Cells are repainted when
    /// the renderer is stale, when `force_refresh` is set, or when their
    /// character changed. Identical repeated draws touch nothing.
    ///
    /// # Errors
    ///
    /// - [`DrawError::NotReady`]: no font set, nothing drawn, no state changed
    /// - [`DrawError::Overflow`]: the area was cleared and `Err!` drawn; the
    ///   outcome is remembered so repeating the draw stays on the fast path
    #[allow(clippy::too_many_arguments)]
    pub fn draw_at<G>(
        &mut self,
        canvas: &mut G,
        x: u16,
        y: u16,
        number: f32,
        text_colour: C,
        bg_colour: C,
        force_refresh: bool,
    ) -> Result<(), DrawError>
    where
        G: GlyphCanvas<F, Color = C> + ?Sized,
    {
        let Some(font) = self.font else {
            warn!("draw without font");
            return Err(DrawError::NotReady);
        };

        let bits = number.to_bits();
        if !self.stale
            && !force_refresh
            && self.drawn.number == Some(bits)
            && self.drawn.colours == Some((text_colour, bg_colour))
        {
            return self.drawn.result;
        }

        let origin_x = i32::from(x);
        let origin_y = i32::from(y);
        let baseline_y = origin_y + i32::from(self.metrics.digit_baseline);

        let result = if let Some(text) = self.plan.render(number) {
            // Unchanged characters in a new colour still need repainting
            let redraw_all =
                force_refresh || self.stale || self.drawn.colours != Some((text_colour, bg_colour));
            let cell_height = u32::from(self.metrics.digit_height);
            let cells = text.as_bytes();
            let point = usize::from(self.plan.point_position());
            let has_point = point < cells.len();

            let mut dirty = [false; CELL_CAPACITY];
            for (i, &byte) in cells.iter().enumerate() {
                dirty[i] = redraw_all || self.drawn.cells[i] != byte;
            }
            // The point glyph overhangs both neighbouring cells, so it is
            // repainted after either of them and drawn last.
            if has_point && (dirty[point - 1] || dirty[point + 1]) {
                dirty[point] = true;
            }
            let order = (self.plan.first_cell()..cells.len())
                .filter(|&i| i != point)
                .chain(has_point.then_some(point));

            let mut redrawn = 0u8;
            for i in order {
                if !dirty[i] {
                    continue;
                }
                let byte = cells[i];
                let cell_x = self.plan.cell_x(origin_x, i);
                canvas.fill_rect(
                    Point::new(cell_x, origin_y),
                    Size::new(self.plan.cell_width(i), cell_height),
                    bg_colour,
                );
                let mut glyph = [0u8; 4];
                canvas.draw_text(
                    font,
                    char::from(byte).encode_utf8(&mut glyph),
                    Point::new(self.plan.glyph_x(origin_x, i), baseline_y),
                    text_colour,
                );
                self.drawn.cells[i] = byte;
                redrawn += 1;
            }
            trace!("redrew {} cells", redrawn);
            Ok(())
        } else {
            canvas.fill_rect(
                Point::new(origin_x, origin_y),
                Size::new(u32::from(self.w()), u32::from(self.h())),
                bg_colour,
            );
            let error_text = clip_to_width(font, ERROR_TEXT, self.w());
            canvas.draw_text(font, error_text, Point::new(origin_x, baseline_y), text_colour);
            // Cells no longer show digits
            self.drawn.cells = [UNKNOWN_CELL; CELL_CAPACITY];
            warn!("number overflows {} digits", self.plan.num_digits());
            Err(DrawError::Overflow)
        };

        self.drawn.number = Some(bits);
        self.drawn.colours = Some((text_colour, bg_colour));
        self.drawn.result = result;
        self.stale = false;
        result
    }
}

/// Longest prefix of `text` whose glyphs end within `width` pixels.
fn clip_to_width<'t, F>(
    font: &F,
    text: &'t str,
    width: u16,
) -> &'t str
where
    F: MeasureText + ?Sized,
{
    let mut end = text.len();
    while end > 0 {
        let bounds = font.measure_text(&text[..end]);
        if bounds.offset.x + bounds.size.width as i32 <= i32::from(width) {
            break;
        }
        end = text[..end].char_indices().next_back().map_or(0, |(i, _)| i);
    }
    &text[..end]
}

impl<F, C> Default for DisplayNumber<'_, F, C>
where
    F: MeasureText + ?Sized,
    C: RgbColor,
{
    /// White text on black.
    fn default() -> Self { Self::new(C::WHITE, C::BLACK) }
}

impl<F: ?Sized, C> Extent for DisplayNumber<'_, F, C> {
    #[inline]
    fn x(&self) -> u16 { self.x }

    #[inline]
    fn y(&self) -> u16 { self.y }

    /// All digit cells, a sign cell and a half-width point cell. Zero without a font.
    #[inline]
    fn w(&self) -> u16 { self.plan.width() }

    /// Digit height. Zero without a font.
    #[inline]
    fn h(&self) -> u16 { u16::from(self.metrics.digit_height) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::mono_font::MonoFont;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};

    use super::*;
    use crate::canvas::TextBounds;

    const TEXT: u16 = 0xFFFF;
    const BG: u16 = 0x0000;

    /// Every glyph is 10x14 with the baseline 11 px below the top.
    struct BlockFont(#[allow(dead_code)] u8);

    impl MeasureText for BlockFont {
        fn measure_text(
            &self,
            text: &str,
        ) -> TextBounds {
            TextBounds {
                offset: Point::new(0, -11),
                size: Size::new(10 * text.chars().count() as u32, 14),
            }
        }
    }

    static FONT: BlockFont = BlockFont(0);
    static OTHER_FONT: BlockFont = BlockFont(1);

    #[derive(Clone, PartialEq, Debug)]
    enum Op {
        Fill(Point, Size, u16),
        Text(String, Point, u16),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn fills(&self) -> usize { self.ops.iter().filter(|op| matches!(op, Op::Fill(..))).count() }

        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, ..) => Some(text.as_str()),
                    Op::Fill(..) => None,
                })
                .collect()
        }

        fn take(&mut self) -> Vec<Op> { std::mem::take(&mut self.ops) }
    }

    impl GlyphCanvas<BlockFont> for Recorder {
        type Color = u16;

        fn fill_rect(
            &mut self,
            top_left: Point,
            size: Size,
            color: u16,
        ) {
            self.ops.push(Op::Fill(top_left, size, color));
        }

        fn draw_text(
            &mut self,
            _font: &BlockFont,
            text: &str,
            origin: Point,
            color: u16,
        ) {
            self.ops.push(Op::Text(text.to_string(), origin, color));
        }
    }

    fn number(
        digits: u8,
        precision: u8,
    ) -> DisplayNumber<'static, BlockFont, u16> {
        let mut number = DisplayNumber::new(TEXT, BG);
        number.begin(100, 50, &FONT, digits, precision);
        number
    }

    #[test]
    fn test_draw_without_font_fails() {
        let mut number: DisplayNumber<'_, BlockFont, u16> = DisplayNumber::new(TEXT, BG);
        let mut canvas = Recorder::default();
        assert_eq!(number.draw(&mut canvas, 1.0), Err(DrawError::NotReady));
        assert!(canvas.ops.is_empty());
        assert!(number.is_stale());
    }

    #[test]
    fn test_size_zero_without_font() {
        let number: DisplayNumber<'_, BlockFont, u16> = DisplayNumber::new(TEXT, BG);
        assert_eq!(number.w(), 0);
        assert_eq!(number.h(), 0);
    }

    #[test]
    fn test_size_from_metrics() {
        let number = number(5, 2);
        assert_eq!(number.w(), 10 * 6 + 5);
        assert_eq!(number.h(), 14);
        assert_eq!(number.r(), 164);
        assert_eq!(number.b(), 63);
        assert!(number.contains(164, 63));
        assert!(!number.contains(165, 63));
    }

    #[test]
    fn test_first_draw_paints_every_cell() {
        let mut number = number(5, 2);
        let mut canvas = Recorder::default();
        assert_eq!(number.draw(&mut canvas, 3.25), Ok(()));
        assert_eq!(canvas.fills(), 7);
        // Point last, after both neighbours
        assert_eq!(canvas.texts(), [" ", " ", " ", "3", "2", "5", "."]);
        assert!(!number.is_stale());
    }

    #[test]
    fn test_repeat_draw_is_noop() {
        let mut number = number(5, 2);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 42.5).ok();
        canvas.take();
        assert_eq!(number.draw(&mut canvas, 42.5), Ok(()));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_forced_refresh_paints_every_cell() {
        let mut number = number(7, 3);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 42.5).ok();
        canvas.take();
        assert_eq!(number.draw_forced(&mut canvas, 42.5), Ok(()));
        assert_eq!(canvas.fills(), 9);
        assert_eq!(canvas.texts().len(), 9);
    }

    #[test]
    fn test_only_changed_cells_redrawn() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 123.0).ok();
        canvas.take();

        assert_eq!(number.draw(&mut canvas, 124.0), Ok(()));
        // "  123" -> "  124": cell 4, shifted left one digit without a point
        assert_eq!(canvas.take(), [
            Op::Fill(Point::new(130, 50), Size::new(10, 14), BG),
            Op::Text("4".to_string(), Point::new(130, 61), TEXT),
        ]);

        assert_eq!(number.draw(&mut canvas, 194.0), Ok(()));
        assert_eq!(canvas.texts(), ["9"]);
    }

    #[test]
    fn test_point_is_tucked_left() {
        let mut number = number(5, 2);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 3.25).ok();
        let ops = canvas.take();
        // Point cell 4 starts at 140, is 5 wide, glyph nudged left by 3
        assert!(ops.contains(&Op::Fill(Point::new(140, 50), Size::new(5, 14), BG)));
        assert!(ops.contains(&Op::Text(".".to_string(), Point::new(137, 61), TEXT)));
        assert!(ops.contains(&Op::Text("2".to_string(), Point::new(145, 61), TEXT)));
    }

    #[test]
    fn test_overflow_draws_error() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        assert_eq!(number.draw(&mut canvas, 1000.0), Err(DrawError::Overflow));
        assert_eq!(canvas.take(), [
            Op::Fill(Point::new(100, 50), Size::new(40, 14), BG),
            Op::Text("Err!".to_string(), Point::new(100, 61), TEXT),
        ]);

        assert_eq!(number.draw(&mut canvas, 999.0), Ok(()));
        assert_eq!(canvas.texts(), [" ", "9", "9", "9"]);
    }

    #[test]
    fn test_repeated_overflow_stays_on_fast_path() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 5000.0).ok();
        canvas.take();
        assert_eq!(number.draw(&mut canvas, 5000.0), Err(DrawError::Overflow));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_redraw_after_overflow_repaints_all_cells() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 999.0).ok();
        number.draw(&mut canvas, 1000.0).ok();
        canvas.take();
        assert_eq!(number.draw(&mut canvas, 999.0), Ok(()));
        assert_eq!(canvas.fills(), 4);
    }

    #[test]
    fn test_negative_number() {
        let mut number = number(3, 1);
        let mut canvas = Recorder::default();
        assert_eq!(number.draw(&mut canvas, -12.5), Ok(()));
        assert_eq!(canvas.texts(), ["-", "1", "2", "5", "."]);
    }

    #[test]
    fn test_set_format_clamps() {
        let mut number = number(5, 2);
        number.set_format(1, 5);
        assert_eq!(number.format(), NumberFormat::new(2, 1));
        assert_eq!(number.format().digits(), 2);
        assert_eq!(number.format().precision(), 1);
    }

    #[test]
    fn test_unchanged_settings_keep_cache() {
        let mut number = number(5, 2);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 1.5).ok();

        number.set_font(&FONT);
        number.set_position(100, 50);
        number.set_format(5, 2);
        number.set_text_color(TEXT);
        number.set_background_color(BG);
        assert!(!number.is_stale());
    }

    #[test]
    fn test_setting_changes_mark_stale() {
        let mut canvas = Recorder::default();

        let mut number = number(5, 2);
        number.draw(&mut canvas, 1.5).ok();
        number.set_position(0, 0);
        assert!(number.is_stale());

        number.draw(&mut canvas, 1.5).ok();
        number.set_format(6, 2);
        assert!(number.is_stale());

        number.draw(&mut canvas, 1.5).ok();
        number.set_font(&OTHER_FONT);
        assert!(number.is_stale());

        number.draw(&mut canvas, 1.5).ok();
        number.set_background_color(0x1234);
        assert!(number.is_stale());

        number.draw(&mut canvas, 1.5).ok();
        number.set_text_color(0x4321);
        assert!(number.is_stale());
    }

    #[test]
    fn test_stale_repaints_every_cell() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 5.0).ok();
        number.set_position(10, 10);
        canvas.take();
        number.draw(&mut canvas, 5.0).ok();
        assert_eq!(canvas.fills(), 4);
    }

    #[test]
    fn test_colour_override_does_not_persist() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 7.0).ok();
        canvas.take();

        assert_eq!(number.draw_with_color(&mut canvas, 7.0, 0xF800, false), Ok(()));
        let ops = canvas.take();
        assert_eq!(ops.len(), 8);
        assert!(ops.iter().all(|op| match op {
            Op::Text(_, _, colour) => *colour == 0xF800,
            Op::Fill(_, _, colour) => *colour == BG,
        }));
        assert_eq!(number.text_color(), TEXT);

        assert_eq!(number.draw(&mut canvas, 7.0), Ok(()));
        assert!(canvas.take().contains(&Op::Text("7".to_string(), Point::new(130, 61), TEXT)));
    }

    #[test]
    fn test_draw_at_explicit_position() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        number.draw_at(&mut canvas, 0, 0, 8.0, TEXT, BG, false).ok();
        assert!(canvas.ops.contains(&Op::Text("8".to_string(), Point::new(30, 11), TEXT)));
        assert_eq!(number.x(), 100);
    }

    #[test]
    fn test_default_colours() {
        let number: DisplayNumber<'_, MonoFont<'_>, Rgb565> = DisplayNumber::default();
        assert_eq!(number.text_color(), Rgb565::WHITE);
        assert_eq!(number.background_color(), Rgb565::BLACK);
    }

    #[test]
    fn test_point_repainted_with_previous_digit() {
        let mut number = number(3, 1);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 12.5).ok();
        canvas.take();

        assert_eq!(number.draw(&mut canvas, 13.5), Ok(()));
        assert_eq!(canvas.take(), [
            Op::Fill(Point::new(120, 50), Size::new(10, 14), BG),
            Op::Text("3".to_string(), Point::new(120, 61), TEXT),
            Op::Fill(Point::new(130, 50), Size::new(5, 14), BG),
            Op::Text(".".to_string(), Point::new(127, 61), TEXT),
        ]);
    }

    #[test]
    fn test_point_repainted_after_next_digit() {
        let mut number = number(3, 1);
        let mut canvas = Recorder::default();
        number.draw(&mut canvas, 12.5).ok();
        canvas.take();

        assert_eq!(number.draw(&mut canvas, 12.7), Ok(()));
        assert_eq!(canvas.texts(), ["7", "."]);
    }

    #[test]
    fn test_spare_cell_stays_inside_area() {
        let mut number = number(3, 0);
        let mut canvas = Recorder::default();
        number.draw_forced(&mut canvas, 5.0).ok();
        assert!(canvas.ops.iter().all(|op| match op {
            Op::Fill(top_left, ..) | Op::Text(_, top_left, _) => top_left.x >= 100,
        }));
    }

    #[test]
    fn test_error_text_clipped_to_width() {
        let mut canvas = Recorder::default();

        let mut number = number(2, 0);
        assert_eq!(number.w(), 30);
        assert_eq!(number.draw(&mut canvas, 100.0), Err(DrawError::Overflow));
        assert_eq!(canvas.take(), [
            Op::Fill(Point::new(100, 50), Size::new(30, 14), BG),
            Op::Text("Err".to_string(), Point::new(100, 61), TEXT),
        ]);

        number.set_format(2, 1);
        assert_eq!(number.w(), 35);
        number.draw(&mut canvas, 100.0).ok();
        assert_eq!(canvas.texts(), ["Err"]);
    }

    #[test]
    fn test_set_format_replans_layout() {
        let mut number = number(5, 2);
        number.set_format(3, 0);
        assert_eq!(number.format(), NumberFormat::new(3, 0));
        assert_eq!(number.plan().format(), number.format());
        assert_eq!(number.w(), 40);

        let mut later: DisplayNumber<'_, BlockFont, u16> = DisplayNumber::new(TEXT, BG);
        later.set_format(3, 0);
        assert_eq!(later.w(), 0);
        later.set_font(&FONT);
        assert_eq!(later.w(), 40);
    }

    /// Draw `before` then `after` incrementally and compare the pixels with a
    /// single draw of `after`.
    fn assert_incremental_matches_fresh(
        x: u16,
        digits: u8,
        precision: u8,
        before: f32,
        after: f32,
    ) {
        let mut incremental: MockDisplay<BinaryColor> = MockDisplay::new();
        incremental.set_allow_overdraw(true);
        let mut fresh: MockDisplay<BinaryColor> = MockDisplay::new();
        fresh.set_allow_overdraw(true);

        let mut first = DisplayNumber::new(BinaryColor::On, BinaryColor::Off);
        first.begin(x, 2, &FONT_6X10, digits, precision);
        first.draw(&mut incremental, before).ok();
        first.draw(&mut incremental, after).ok();

        let mut second = DisplayNumber::new(BinaryColor::On, BinaryColor::Off);
        second.begin(x, 2, &FONT_6X10, digits, precision);
        second.draw(&mut fresh, after).ok();

        incremental.assert_eq(&fresh);
    }

    #[test]
    fn test_incremental_matches_full_redraw_on_display() {
        let mut number = DisplayNumber::new(BinaryColor::On, BinaryColor::Off);
        number.begin(2, 2, &FONT_6X10, 3, 1);
        assert_eq!(number.w(), 6 * 4 + 3);

        assert_incremental_matches_fresh(2, 3, 1, 12.5, 12.7);
    }

    #[test]
    fn test_integer_digit_change_keeps_point_on_display() {
        assert_incremental_matches_fresh(8, 3, 1, 12.5, 13.5);
        assert_incremental_matches_fresh(8, 3, 1, 19.5, 20.5);
    }

    #[test]
    fn test_recovery_from_overflow_clears_error_on_display() {
        assert_incremental_matches_fresh(2, 2, 0, 100.0, 5.0);
        assert_incremental_matches_fresh(2, 2, 1, 100.0, 5.5);
    }
}
