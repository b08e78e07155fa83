//! Display number simulator for Windows/Desktop.
//!
//! Drives three [`DisplayNumber`]s on an `embedded-graphics-simulator` window the
//! way a firmware control loop would: configure once, then draw every frame.
//!
//! # Controls
//!
//! - **F**: Force a full refresh of every number
//! - **C**: Cycle the voltage text colour
//! - **Esc** / close window: Quit

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod timing;

use std::thread;
use std::time::Instant;

use display_utils::{DisplayArea, DisplayNumber, DrawError, Extent};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb565, WebColors};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use profont::{PROFONT_12_POINT, PROFONT_24_POINT};

use crate::timing::FRAME_TIME;

/// Display width in pixels (same panel as the ST7789 targets).
const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
const SCREEN_HEIGHT: u32 = 240;

/// Text colours cycled with the C key.
const VOLT_COLOURS: [Rgb565; 4] = [Rgb565::WHITE, Rgb565::YELLOW, Rgb565::GREEN, Rgb565::CYAN];

type Number = DisplayNumber<'static, MonoFont<'static>, Rgb565>;

/// Centre `number` inside `panel`, slightly below the panel label.
fn centre_in(
    number: &mut Number,
    panel: &DisplayArea,
) {
    let x = panel.x_cl(1, 0).saturating_sub(number.w() / 2);
    let y = panel.y_cl(1, 0).saturating_sub(number.h() / 2) + 8;
    number.set_position(x, y);
}

/// Draw a panel outline and its label. Done once; numbers draw on top.
fn draw_panel<D>(
    display: &mut D,
    panel: &DisplayArea,
    label: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(panel.tl(), Size::new(u32::from(panel.w()), u32::from(panel.h())))
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::CSS_DIM_GRAY, 1))
        .draw(display)
        .ok();
    let style = MonoTextStyle::new(&PROFONT_12_POINT, Rgb565::CSS_LIGHT_GRAY);
    let label_pos = Point::new(panel.cp().x, i32::from(panel.y_div(4, 0)) + 18);
    Text::with_alignment(label, label_pos, style, Alignment::Center)
        .draw(display)
        .ok();
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Display Number Sim", &output_settings);

    display.clear(Rgb565::BLACK).ok();

    let screen = DisplayArea::new(0, 0, SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16);
    let speed_panel = DisplayArea::new(screen.x_div(2, 0), screen.y(), screen.w_div(2), screen.h_div(2));
    let volts_panel = DisplayArea::new(screen.x_div(2, 1), screen.y(), screen.w_div(2), screen.h_div(2));
    let count_panel = DisplayArea::new(screen.x(), screen.y_div(2, 1), screen.w(), screen.h_div(2));

    draw_panel(&mut display, &speed_panel, "SPEED");
    draw_panel(&mut display, &volts_panel, "VOLTS");
    draw_panel(&mut display, &count_panel, "COUNT (overflows at 10000)");

    let mut speed = Number::default();
    speed.begin_at_origin(&PROFONT_24_POINT, 3, 0);
    centre_in(&mut speed, &speed_panel);

    let mut volts = Number::default();
    volts.begin_at_origin(&PROFONT_24_POINT, 4, 2);
    centre_in(&mut volts, &volts_panel);

    let mut count = Number::default();
    count.begin_at_origin(&PROFONT_24_POINT, 5, 1);
    count.set_text_color(Rgb565::CSS_ORANGE);
    centre_in(&mut count, &count_panel);

    let mut t = 0.0f32;
    let mut colour_idx = 0usize;
    let mut frame = 0u32;

    loop {
        let frame_start = Instant::now();
        let mut force = false;

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Escape => return,
                        Keycode::F => force = true,
                        Keycode::C => {
                            colour_idx = (colour_idx + 1) % VOLT_COLOURS.len();
                            volts.set_text_color(VOLT_COLOURS[colour_idx]);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Fake sensor data
        let speed_kmh = (120.0 + 60.0 * t.sin()).round();
        let battery = 13.8 + 0.6 * (t * 0.7).cos();
        let counter = (frame % 120_000) as f32 / 10.0;

        if force {
            speed.draw_forced(&mut display, speed_kmh).ok();
            volts.draw_forced(&mut display, battery).ok();
            count.draw_forced(&mut display, counter).ok();
        } else {
            speed.draw(&mut display, speed_kmh).ok();
            volts.draw(&mut display, battery).ok();
            if let Err(DrawError::Overflow) = count.draw(&mut display, counter)
                && frame % 50 == 0
            {
                println!("count {counter:.1} does not fit {} digits", count.format().digits());
            }
        }

        window.update(&display);

        t += 0.02;
        frame = frame.wrapping_add(7);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
