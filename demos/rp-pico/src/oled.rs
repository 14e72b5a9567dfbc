//! SSD1306 OLED as a countdown-timer display surface.
//!
//! Text scale 1 maps to the 6x10 font and anything larger to 10x20, which
//! is roughly what a 2x scaled 5x7 glyph occupies.

use countdown_timer::DisplaySurface;
use display_interface::{DisplayError, WriteOnlyDataCommand};
use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use ssd1306::{Ssd1306, mode::BufferedGraphicsMode, prelude::*};

/// Buffered 128x64 SSD1306 on interface `DI`
pub type Oled<DI> = Ssd1306<DI, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Frame-buffered OLED; nothing reaches the panel until `flush`.
pub struct OledSurface<DI> {
    display: Oled<DI>,
}

impl<DI: WriteOnlyDataCommand> OledSurface<DI> {
    /// Initialize the panel.
    ///
    /// Fails when the controller does not acknowledge, e.g. nothing is
    /// wired at the address.
    pub fn init(interface: DI) -> Result<Self, DisplayError> {
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init()?;
        Ok(Self { display })
    }
}

fn font_for(scale: u8) -> &'static MonoFont<'static> {
    if scale > 1 { &FONT_10X20 } else { &FONT_6X10 }
}

impl<DI: WriteOnlyDataCommand> DisplaySurface for OledSurface<DI> {
    type Error = DisplayError;

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(font_for(scale), BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.display)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.display.flush()
    }
}
