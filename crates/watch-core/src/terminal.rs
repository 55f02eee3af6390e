//! In-place terminal redraw.
//!
//! [`Redraw`] remembers the lines of the previous frame. Each new frame moves
//! the cursor back to the top of the region, rewrites only the lines that
//! changed, and clears whatever the previous frame drew below the new one.
//! Unchanged lines are skipped, which keeps the redraw free of flicker.

use std::io::{self, Write};

use crossterm::cursor::{MoveToNextLine, MoveToPreviousLine};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

/// Line-diffing writer over any `Write` sink.
#[derive(Debug)]
pub struct Redraw<W: Write> {
    out: W,
    previous: Vec<String>,
}

impl<W: Write> Redraw<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: Vec::new(),
        }
    }

    /// Replace the previously drawn region with `frame`.
    pub fn write_frame(&mut self, frame: &str) -> io::Result<()> {
        let lines: Vec<String> = frame.lines().map(str::to_string).collect();

        if !self.previous.is_empty() {
            let up = u16::try_from(self.previous.len()).unwrap_or(u16::MAX);
            queue!(self.out, MoveToPreviousLine(up))?;
        }

        for (i, line) in lines.iter().enumerate() {
            if self.previous.get(i) == Some(line) {
                queue!(self.out, MoveToNextLine(1))?;
            } else {
                queue!(
                    self.out,
                    Clear(ClearType::CurrentLine),
                    Print(line),
                    Print("\n")
                )?;
            }
        }

        if lines.len() < self.previous.len() {
            queue!(self.out, Clear(ClearType::FromCursorDown))?;
        }

        self.out.flush()?;
        self.previous = lines;
        Ok(())
    }

    /// Number of lines the last frame occupies.
    pub fn height(&self) -> usize {
        self.previous.len()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }
}
