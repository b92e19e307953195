//! Interactive terminal prompts.
//!
//! Prompts are generic over their input and output so they can be driven
//! from byte buffers in tests; [`Terminal`] binds them to stdin/stdout.
use std::io::{self, BufRead, Write};

use crate::config::Preset;

/// Preset selection prompt.
pub const PRESET_PROMPT: &str =
    "Enter the preset you would like to have (1 = minimal, 2 = server, 3 = desktop): ";

/// Reply to an out-of-range preset choice.
pub const NOT_IN_RANGE: &str = "Not in range!";

/// Reboot confirmation prompt.
pub const REBOOT_PROMPT: &str = "Done! reboot now? (yN) ";

/// Print `prompt` and read one line, without its trailing newline.
///
/// # Errors
///
/// Returns [`io::ErrorKind::UnexpectedEof`] when input is closed, or any
/// underlying read/write error.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "end of input while waiting for an answer",
        ));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Ask for a preset until the answer is `1`, `2` or `3`.
///
/// # Errors
///
/// Returns an error if input ends before a valid answer is given.
pub fn select_preset<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Preset> {
    loop {
        let answer = ask(input, output, PRESET_PROMPT)?;
        if let Some(preset) = Preset::from_choice(&answer) {
            return Ok(preset);
        }
        writeln!(output, "{NOT_IN_RANGE}")?;
    }
}

/// Ask whether to reboot. Only an exact `y` confirms.
///
/// # Errors
///
/// Returns an error if input ends before an answer is given.
pub fn confirm_reboot<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    Ok(ask(input, output, REBOOT_PROMPT)? == "y")
}

/// Source of answers for the interactive questions of a run.
pub trait Prompter {
    /// Ask which preset to provision.
    ///
    /// # Errors
    ///
    /// See [`select_preset`].
    fn select_preset(&mut self) -> io::Result<Preset>;

    /// Ask whether to reboot once everything is done.
    ///
    /// # Errors
    ///
    /// See [`confirm_reboot`].
    fn confirm_reboot(&mut self) -> io::Result<bool>;
}

/// Prompts bound to the process's stdin and stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

impl Prompter for Terminal {
    fn select_preset(&mut self) -> io::Result<Preset> {
        select_preset(&mut io::stdin().lock(), &mut io::stdout())
    }

    fn confirm_reboot(&mut self) -> io::Result<bool> {
        confirm_reboot(&mut io::stdin().lock(), &mut io::stdout())
    }
}

/// Prompts over an arbitrary reader and writer, e.g. scripted answers.
#[derive(Debug)]
pub struct Session<R, W> {
    /// Where answers are read from.
    pub input: R,
    /// Where prompts are written to.
    pub output: W,
}

impl<R: BufRead, W: Write> Prompter for Session<R, W> {
    fn select_preset(&mut self) -> io::Result<Preset> {
        select_preset(&mut self.input, &mut self.output)
    }

    fn confirm_reboot(&mut self) -> io::Result<bool> {
        confirm_reboot(&mut self.input, &mut self.output)
    }
}
