//! Parsing of machine configurations and setup lines.
//!
//! A configuration names the alphabet on its first line, then lists the
//! slot and pawl counts followed by the rotor catalog:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//!  5 3
//!  I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!  Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!  B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!            (RX) (SZ) (TV)
//! ```
//!
//! Rotor types are `R` (reflector), `N` (fixed) or `M` followed by the
//! notch symbols (moving). Everything after the first line is read as
//! whitespace-separated tokens, so entries may wrap freely.
//!
//! A setup line selects rotors, positions and plugboard:
//! `* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)`.

use std::iter::Peekable;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::catalog::RotorCatalog;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::RotorBlueprint;

/// A parsed machine configuration.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Arc<Alphabet>,
    num_slots: usize,
    num_pawls: usize,
    catalog: Arc<RotorCatalog>,
}

impl MachineConfig {
    /// Parses configuration text.
    ///
    /// # Errors
    /// [`EnigmaError::MalformedConfig`] when the text is truncated or holds
    /// an unexpected token, plus any alphabet, cycle or catalog error.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let config = MachineConfig::parse("ABCD\n 2 1\n R R (AB)(CD)\n W M (ABC)").unwrap();
    /// assert_eq!(config.num_slots(), 2);
    /// assert_eq!(config.catalog().len(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let alphabet_line = lines
            .by_ref()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| EnigmaError::MalformedConfig("empty configuration".into()))?;
        let alphabet = Arc::new(Alphabet::from_spec(alphabet_line)?);

        let mut tokens = lines.flat_map(str::split_whitespace).peekable();
        let num_slots = parse_count(tokens.next(), "rotor slot count")?;
        let num_pawls = parse_count(tokens.next(), "pawl count")?;

        let mut catalog = RotorCatalog::new(alphabet.clone());
        while let Some(name) = tokens.next() {
            if name.starts_with('(') {
                return Err(EnigmaError::MalformedConfig(format!(
                    "cycles \"{}\" without a rotor name",
                    name
                )));
            }
            let kind = tokens.next().ok_or_else(|| {
                EnigmaError::MalformedConfig(format!("rotor \"{}\" has no type", name))
            })?;
            let cycles = take_cycles(&mut tokens);
            let permutation = Arc::new(Permutation::new(&cycles, alphabet.clone())?);
            catalog.add(parse_blueprint(name, kind, permutation)?)?;
        }

        Ok(MachineConfig {
            alphabet,
            num_slots,
            num_pawls,
            catalog: Arc::new(catalog),
        })
    }

    /// Reads and parses the configuration file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Returns the configured alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the number of rotor slots.
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Returns the number of pawls.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the rotor catalog.
    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }

    /// Builds a machine with no rotors inserted. Every machine built from
    /// one config shares its catalog.
    pub fn build_machine(&self) -> Result<Machine> {
        Machine::new(
            self.alphabet.clone(),
            self.num_slots,
            self.num_pawls,
            self.catalog.clone(),
        )
    }
}

impl FromStr for MachineConfig {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize> {
    let token =
        token.ok_or_else(|| EnigmaError::MalformedConfig(format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| EnigmaError::MalformedConfig(format!("bad {} \"{}\"", what, token)))
}

/// Collects the cycle tokens that follow a rotor type. A group left open
/// at the end of a token continues into the next one.
fn take_cycles<'a, I>(tokens: &mut Peekable<I>) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut cycles = String::new();
    let mut depth = 0i32;
    while let Some(token) = tokens.next_if(|t| depth > 0 || t.starts_with('(')) {
        for c in token.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        cycles.push_str(token);
        cycles.push(' ');
    }
    cycles
}

fn parse_blueprint(
    name: &str,
    kind: &str,
    permutation: Arc<Permutation>,
) -> Result<RotorBlueprint> {
    let mut chars = kind.chars();
    match (chars.next(), chars.as_str()) {
        (Some('M'), notches) => {
            RotorBlueprint::moving(name, permutation, notches).map_err(|_| {
                EnigmaError::MalformedConfig(format!(
                    "rotor \"{}\": notches \"{}\" not in alphabet",
                    name, notches
                ))
            })
        }
        (Some('N'), "") => Ok(RotorBlueprint::fixed(name, permutation)),
        (Some('R'), "") => Ok(RotorBlueprint::reflector(name, permutation)),
        (Some('N' | 'R'), _) => Err(EnigmaError::NotchesOnStaticRotor(name.to_string())),
        _ => Err(EnigmaError::MalformedConfig(format!(
            "rotor \"{}\": unknown type \"{}\"",
            name, kind
        ))),
    }
}

/// A parsed setup line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    rotor_names: Vec<String>,
    positions: String,
    plugboard: String,
}

impl Setup {
    /// Creates a setup from its parts. `plugboard` is cycle notation.
    pub fn new(
        rotor_names: Vec<String>,
        positions: impl Into<String>,
        plugboard: impl Into<String>,
    ) -> Self {
        Setup {
            rotor_names,
            positions: positions.into(),
            plugboard: plugboard.into(),
        }
    }

    /// Returns true iff `line` is a setup line.
    pub fn is_setup_line(line: &str) -> bool {
        line.trim_start().starts_with('*')
    }

    /// Parses `* NAME_1 ... NAME_k POSITIONS [CYCLES...]`.
    ///
    /// Everything from the first token starting with `(` forms the
    /// plugboard, so a cycle may hold spaces; the last token before it is
    /// the positions string. Neither rotor names nor positions can start
    /// with `(`.
    ///
    /// # Errors
    /// [`EnigmaError::MalformedSetup`] without the leading `*`, the
    /// positions token or at least one rotor name.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Setup;
    ///
    /// let setup = Setup::parse("* B Beta III IV I AXLE (HQ) (EX)").unwrap();
    /// assert_eq!(setup.rotor_names(), ["B", "Beta", "III", "IV", "I"]);
    /// assert_eq!(setup.positions(), "AXLE");
    /// assert_eq!(setup.plugboard(), "(HQ) (EX)");
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let malformed = |reason| EnigmaError::MalformedSetup {
            line: line.to_string(),
            reason,
        };
        let rest = line
            .trim_start()
            .strip_prefix('*')
            .ok_or_else(|| malformed("setup lines start with '*'"))?;

        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let plug_start = tokens
            .iter()
            .position(|t| t.starts_with('('))
            .unwrap_or(tokens.len());
        let (head, plugboard) = tokens.split_at(plug_start);
        let (positions, names) = head
            .split_last()
            .ok_or_else(|| malformed("missing rotor positions"))?;
        if names.is_empty() {
            return Err(malformed("missing rotor names"));
        }

        Ok(Setup {
            rotor_names: names.iter().map(|s| s.to_string()).collect(),
            positions: positions.to_string(),
            plugboard: plugboard.join(" "),
        })
    }

    /// Returns the selected rotor names, reflector first.
    pub fn rotor_names(&self) -> &[String] {
        &self.rotor_names
    }

    /// Returns the initial positions.
    pub fn positions(&self) -> &str {
        &self.positions
    }

    /// Returns the plugboard cycles, possibly empty.
    pub fn plugboard(&self) -> &str {
        &self.plugboard
    }
}

impl FromStr for Setup {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
