//! Terminal rendering backend.

use std::io::Write;

use anyhow::{Context, Result};
use phrase_push_rendering::{RenderingBackend, TextScene};

/// Backend that writes the scene as plain text to any writer.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W: Write> {
    writer: W,
}

impl<W: Write> TerminalBackend<W> {
    /// Creates a backend writing to the provided sink.
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a single line of status text below the board.
    pub(crate) fn announce(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}").context("failed to write status line")?;
        self.writer.flush().context("failed to flush terminal output")
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn present(&mut self, scene: &TextScene) -> Result<()> {
        self.writer
            .write_all(scene.render().as_bytes())
            .context("failed to write board")?;
        if let Some(phrase) = scene.solved_phrase() {
            writeln!(self.writer, "Solved: {phrase}").context("failed to write status line")?;
        }
        self.writer.flush().context("failed to flush terminal output")
    }
}
