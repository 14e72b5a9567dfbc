//! Display abstraction and the screens the timer draws.
//!
//! Defines the [`DisplaySurface`] trait implemented by the display driver and
//! the [`Frame`] type describing every screen. A frame is always rendered as
//! one clear, draw, flush sequence.

use core::fmt::Write;

use crate::TEXT_CAPACITY;

/// Fixed-capacity buffer for a single line of text.
pub type TextBuffer = heapless::String<TEXT_CAPACITY>;

/// Trait for abstracting a small monochrome text display.
///
/// Implement this for your display driver. Coordinates are in pixels from
/// the top-left corner and `scale` selects the glyph size (1 = smallest).
/// `draw_text` and `clear` may only touch a frame buffer; `flush` is
/// expected to push it to the panel.
pub trait DisplaySurface {
    /// Error reported by the underlying driver.
    type Error: core::fmt::Debug;

    /// Blanks the whole screen.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Draws `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) -> Result<(), Self::Error>;

    /// Makes everything drawn since the last flush visible.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A missing display swallows every call.
///
/// Used when the panel fails to initialize: the countdown keeps running
/// without visual feedback.
impl<D: DisplaySurface> DisplaySurface for Option<D> {
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        match self {
            Some(display) => display.clear(),
            None => Ok(()),
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) -> Result<(), Self::Error> {
        match self {
            Some(display) => display.draw_text(x, y, scale, text),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        match self {
            Some(display) => display.flush(),
            None => Ok(()),
        }
    }
}

/// Text shown on the boot screen.
pub const WELCOME_TEXT: &str = "Bem vindo...";
/// Title line of the idle menu.
pub const MENU_TITLE: &str = "Menu Cronometro";
/// Hint line of the idle menu.
pub const MENU_HINT: &str = "B - Iniciar timer";

/// One full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Greeting shown once at boot.
    Welcome,
    /// Idle menu telling the user which button starts the timer.
    Menu,
    /// Seconds left in a running countdown.
    Countdown(u32),
}

impl Frame {
    /// Renders the frame as a single clear, draw, flush step.
    ///
    /// Stops at the first driver error; the screen may then show a partial
    /// frame until the next render.
    pub fn render<D: DisplaySurface>(&self, surface: &mut D) -> Result<(), D::Error> {
        surface.clear()?;
        match self {
            Frame::Welcome => {
                surface.draw_text(35, 25, 1, WELCOME_TEXT)?;
            }
            Frame::Menu => {
                surface.draw_text(20, 0, 1, MENU_TITLE)?;
                surface.draw_text(7, 25, 1, MENU_HINT)?;
            }
            Frame::Countdown(seconds) => {
                surface.draw_text(10, 20, 2, &countdown_text(*seconds))?;
            }
        }
        surface.flush()
    }
}

/// Formats the countdown line, e.g. `"Timer: 7"`.
pub fn countdown_text(seconds: u32) -> TextBuffer {
    let mut text = TextBuffer::new();
    // "Timer: " plus at most ten digits always fits.
    let _ = write!(text, "Timer: {}", seconds);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::{String, ToString};
    use std::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Text(i32, i32, u8, String),
        Flush,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        fail_draw: bool,
    }

    impl DisplaySurface for Recorder {
        type Error = ();

        fn clear(&mut self) -> Result<(), ()> {
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) -> Result<(), ()> {
            if self.fail_draw {
                return Err(());
            }
            self.ops.push(Op::Text(x, y, scale, text.to_string()));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.ops.push(Op::Flush);
            Ok(())
        }
    }

    #[test]
    fn countdown_text_formats_seconds() {
        assert_eq!(countdown_text(10).as_str(), "Timer: 10");
        assert_eq!(countdown_text(1).as_str(), "Timer: 1");
    }

    #[test]
    fn countdown_text_fits_largest_value() {
        assert_eq!(countdown_text(u32::MAX).as_str(), "Timer: 4294967295");
    }

    #[test]
    fn menu_frame_renders_in_order() {
        let mut recorder = Recorder::default();
        Frame::Menu.render(&mut recorder).unwrap();

        assert_eq!(
            recorder.ops,
            [
                Op::Clear,
                Op::Text(20, 0, 1, MENU_TITLE.to_string()),
                Op::Text(7, 25, 1, MENU_HINT.to_string()),
                Op::Flush,
            ]
        );
    }

    #[test]
    fn welcome_frame_renders_at_its_position() {
        let mut recorder = Recorder::default();
        Frame::Welcome.render(&mut recorder).unwrap();

        assert_eq!(
            recorder.ops,
            [
                Op::Clear,
                Op::Text(35, 25, 1, WELCOME_TEXT.to_string()),
                Op::Flush,
            ]
        );
    }

    #[test]
    fn countdown_frame_uses_large_glyphs() {
        let mut recorder = Recorder::default();
        Frame::Countdown(4).render(&mut recorder).unwrap();

        assert_eq!(
            recorder.ops,
            [Op::Clear, Op::Text(10, 20, 2, "Timer: 4".to_string()), Op::Flush]
        );
    }

    #[test]
    fn failed_draw_skips_flush() {
        let mut recorder = Recorder {
            fail_draw: true,
            ..Default::default()
        };

        assert!(Frame::Welcome.render(&mut recorder).is_err());
        assert_eq!(recorder.ops, [Op::Clear]);
    }

    #[test]
    fn missing_display_accepts_every_frame() {
        let mut surface: Option<Recorder> = None;
        assert!(Frame::Welcome.render(&mut surface).is_ok());
        assert!(Frame::Countdown(3).render(&mut surface).is_ok());
    }
}
