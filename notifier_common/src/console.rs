//! Blocking operator prompts.
//!
//! The notifier pauses between steps so an operator can follow along. With
//! `--no-prompt` the pauses are skipped and the run is fully unattended.
use std::io::{self, BufRead, Write};

/// Console prompt policy for a run.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    interactive: bool,
}

impl Console {
    /// Creates a console; `interactive == false` turns every pause into a no-op.
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    /// Prints `prompt` and waits for RETURN on stdin.
    pub fn pause(&self, prompt: &str) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        let stdin = io::stdin();
        let stdout = io::stdout();
        pause_with(prompt, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// Writes `prompt` to `output` and consumes one line from `input`.
///
/// EOF on `input` counts as an acknowledgement.
pub fn pause_with<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<()> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
