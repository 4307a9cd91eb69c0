//! Message-stream driver.
//!
//! A [`Session`] feeds the lines of a message stream to a [`Machine`]:
//! setup lines reconfigure it, blank lines pass through, and every other
//! line is converted and printed in groups of [`GROUP_SIZE`] symbols.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::Setup;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;

/// Number of symbols per output group.
pub const GROUP_SIZE: usize = 5;

/// Splits `text` into groups of `width` symbols separated by single spaces.
/// The last group may be shorter.
///
/// # Examples
///
/// ```
/// use enigma::message::group_symbols;
///
/// assert_eq!(group_symbols("QVPQSOKOILPUB", 5), "QVPQS OKOIL PUB");
/// ```
pub fn group_symbols(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(text.len() + text.len() / width);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % width == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Line-by-line driver around one machine.
#[derive(Debug)]
pub struct Session {
    machine: Machine,
    configured: bool,
}

impl Session {
    /// Wraps `machine`. A setup line must arrive before any message.
    pub fn new(machine: Machine) -> Self {
        Session {
            machine,
            configured: false,
        }
    }

    /// Returns the driven machine.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Processes one line of the message stream.
    ///
    /// Returns `None` for a setup line, `Some("")` for a blank line and the
    /// grouped conversion otherwise. Whitespace inside a message is dropped
    /// and symbols outside the alphabet are tried upper-cased.
    ///
    /// # Errors
    /// - [`EnigmaError::MissingSetup`] for a message before any setup line.
    /// - Any error from [`Setup::parse`], [`Machine::apply_setup`] or
    ///   [`Machine::convert_str`].
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        if Setup::is_setup_line(line) {
            let setup = Setup::parse(line)?;
            self.machine.apply_setup(&setup)?;
            self.configured = true;
            return Ok(None);
        }
        if line.trim().is_empty() {
            return Ok(Some(String::new()));
        }
        if !self.configured {
            return Err(EnigmaError::MissingSetup);
        }

        let text = self.normalize(line);
        let converted = self.machine.convert_str(&text)?;
        debug!(
            symbols = converted.len(),
            positions = %self.machine.positions(),
            "message converted"
        );
        Ok(Some(group_symbols(&converted, GROUP_SIZE)))
    }

    fn normalize(&self, line: &str) -> String {
        let alphabet = self.machine.alphabet();
        line.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                if alphabet.contains(c) {
                    return c;
                }
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) => u,
                    _ => c,
                }
            })
            .collect()
    }

    /// Processes every line of `input`, writing one line to `output` for
    /// each non-setup line. Stops at the first error.
    pub fn process<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if let Some(out) = self.process_line(&line)? {
                writeln!(output, "{}", out)?;
            }
        }
        output.flush()?;
        Ok(())
    }
}
