//! Terminal rendering of a run.
//!
//! Progress lines start with `\r`, so printing them as-is redraws the spinner
//! in place. The first normal line after a spinner clears that row first.

use std::io::Write;

use crossterm::queue;
use crossterm::style::Color::{DarkGreen, DarkRed, Reset};
use crossterm::style::{Print, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use mutator_shell_core::error::{Error, Result};
use mutator_shell_core::relay::OutputLine;

pub struct Renderer<W: Write> {
    out: W,
    on_progress_line: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            on_progress_line: false,
        }
    }

    pub fn line(&mut self, line: &OutputLine) -> Result<()> {
        match line {
            OutputLine::Progress(text) => {
                queue!(self.out, Print(text))?;
                self.on_progress_line = true;
            }
            OutputLine::Normal(text) => {
                self.leave_progress_line()?;
                queue!(self.out, Print(text))?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    pub fn error(&mut self, error: &Error) -> Result<()> {
        self.leave_progress_line()?;
        queue!(
            self.out,
            SetForegroundColor(DarkRed),
            Print(format!("{}: {}", error.title(), error)),
            SetForegroundColor(Reset),
            Print("\n"),
        )?;
        self.out.flush()?;
        Ok(())
    }

    pub fn finished(&mut self, line: &str) -> Result<()> {
        self.leave_progress_line()?;
        queue!(
            self.out,
            SetForegroundColor(DarkGreen),
            Print(line),
            SetForegroundColor(Reset),
            Print("\n"),
        )?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn leave_progress_line(&mut self) -> Result<()> {
        if self.on_progress_line {
            queue!(self.out, Clear(ClearType::CurrentLine), Print("\r"))?;
            self.on_progress_line = false;
        }
        Ok(())
    }
}
