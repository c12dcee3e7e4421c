//! Frame output
//!
//! The host hands every rendered frame to a `FrameSink`. Physical panel
//! drivers live outside this crate; `TerminalSink` gives a coarse preview
//! for development.

use std::io::{self, Write};

use crate::surface::{Rgba, Surface};

/// Consumer of rendered frames
pub trait FrameSink {
    fn present(&mut self, surface: &Surface) -> io::Result<()>;
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _surface: &Surface) -> io::Result<()> {
        Ok(())
    }
}

/// ANSI truecolor preview, two matrix rows per terminal line
pub struct TerminalSink<W: Write> {
    out: W,
    /// Only every nth frame is drawn
    every: u32,
    frame: u32,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(every: u32) -> Self {
        Self::new(io::stdout(), every)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, every: u32) -> Self {
        Self {
            out,
            every: every.max(1),
            frame: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, surface: &Surface) -> io::Result<()> {
        let mut buf = String::with_capacity(surface.width() as usize * surface.height() as usize * 40);
        buf.push_str("\x1b[H");

        let (width, height) = (surface.width() as i32, surface.height() as i32);
        for y in (0..height).step_by(2) {
            for x in 0..width {
                let top = surface.get(x, y).unwrap_or(Rgba::BLACK);
                let bottom = surface.get(x, y + 1).unwrap_or(Rgba::BLACK);
                buf.push_str(&format!(
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                ));
            }
            buf.push_str("\x1b[0m\n");
        }

        self.out.write_all(buf.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn present(&mut self, surface: &Surface) -> io::Result<()> {
        let draw = self.frame % self.every == 0;
        self.frame = self.frame.wrapping_add(1);
        if draw {
            self.write_frame(surface)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_accepts_frames() {
        let surface = Surface::new(4, 4);
        assert!(NullSink.present(&surface).is_ok());
    }

    #[test]
    fn test_terminal_sink_draws_half_blocks() {
        let mut surface = Surface::new(3, 3);
        surface.set_pixel(0, 0, Rgba::rgb(255, 0, 0));
        surface.set_pixel(0, 1, Rgba::rgb(0, 0, 255));

        let mut sink = TerminalSink::new(Vec::new(), 1);
        sink.present(&surface).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.starts_with("\x1b[H"));
        // 3 rows -> 2 terminal lines of 3 cells
        assert_eq!(text.matches('\n').count(), 2);
        assert_eq!(text.matches('\u{2580}').count(), 6);
        assert!(text.contains("\x1b[38;2;255;0;0m\x1b[48;2;0;0;255m"));
    }

    #[test]
    fn test_terminal_sink_skips_frames() {
        let surface = Surface::new(2, 2);
        let mut sink = TerminalSink::new(Vec::new(), 3);
        for _ in 0..6 {
            sink.present(&surface).unwrap();
        }
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.matches("\x1b[H").count(), 2);
    }
}
