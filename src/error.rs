//! Error types for the Enigma engine.
//!
//! Every failure is one [`EnigmaError`] variant. Variants fall into two
//! kinds, reported by [`EnigmaError::kind`]: configuration errors (a machine,
//! catalog or setup line that cannot be built) and operational errors (a
//! request a correctly configured machine cannot serve).

use thiserror::Error;

/// Broad classification of an [`EnigmaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The alphabet, catalog, machine or setup is malformed.
    Configuration,
    /// A well-formed machine was asked to do something impossible.
    Operational,
}

/// Errors produced by the Enigma engine.
#[derive(Debug, Error)]
pub enum EnigmaError {
    /// Alphabet has fewer than two symbols.
    #[error("alphabet must contain at least 2 symbols, got {0}")]
    AlphabetTooSmall(usize),

    /// Alphabet lists the same symbol twice.
    #[error("duplicate symbol '{0}' in alphabet")]
    DuplicateSymbol(char),

    /// Alphabet contains whitespace or a parenthesis.
    #[error("symbol '{0}' is reserved and cannot appear in an alphabet")]
    ReservedSymbol(char),

    /// Cycle notation could not be parsed.
    #[error("malformed cycles \"{cycles}\": {reason}")]
    MalformedCycles {
        /// The cycle text as given.
        cycles: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A symbol appears in more than one position of a cycle description.
    #[error("symbol '{0}' appears more than once in cycles")]
    RepeatedCycleSymbol(char),

    /// Slot or pawl counts are inconsistent.
    #[error("invalid machine shape: {num_slots} slots, {num_pawls} pawls")]
    InvalidMachineShape {
        /// Configured number of rotor slots.
        num_slots: usize,
        /// Configured number of pawls.
        num_pawls: usize,
    },

    /// Wrong number of rotor names in a selection.
    #[error("expected {expected} rotors, got {got}")]
    RotorCountMismatch {
        /// Number of slots in the machine.
        expected: usize,
        /// Number of names supplied.
        got: usize,
    },

    /// Rotor name not present in the catalog.
    #[error("unknown rotor \"{0}\"")]
    UnknownRotor(String),

    /// Rotor name added to a catalog twice, or selected into two slots.
    #[error("rotor \"{0}\" used more than once")]
    DuplicateRotor(String),

    /// A rotor was selected into a slot its kind cannot occupy.
    #[error("rotor \"{name}\" cannot occupy slot {slot}: {reason}")]
    MisplacedRotor {
        /// Name of the offending rotor.
        name: String,
        /// Slot index, 0 being the reflector slot.
        slot: usize,
        /// Why the rotor does not fit there.
        reason: &'static str,
    },

    /// Notches were given to a rotor that cannot move.
    #[error("rotor \"{0}\" does not rotate and cannot have notches")]
    NotchesOnStaticRotor(String),

    /// Position string length differs from the number of settable slots.
    #[error("expected {expected} rotor positions, got {got}")]
    PositionCountMismatch {
        /// Number of non-reflector slots.
        expected: usize,
        /// Length of the supplied string.
        got: usize,
    },

    /// Plugboard cycles are not all pairs.
    #[error("plugboard must consist of disjoint pairs")]
    InvalidPlugboard,

    /// A permutation is built over a different alphabet than the machine.
    #[error("permutation alphabet does not match the machine alphabet")]
    AlphabetMismatch,

    /// The configuration text ended early or holds an unexpected token.
    #[error("bad configuration: {0}")]
    MalformedConfig(String),

    /// A setup line could not be parsed.
    #[error("bad setup line \"{line}\": {reason}")]
    MalformedSetup {
        /// The offending line.
        line: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A message line arrived before any setup line.
    #[error("message line before any setup line")]
    MissingSetup,

    /// Symbol not present in the alphabet.
    #[error("symbol '{0}' is not in the alphabet")]
    UnknownSymbol(char),

    /// Index outside `0..size`.
    #[error("index {index} out of range for alphabet of size {size}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The alphabet size.
        size: usize,
    },

    /// A reflector was asked to convert backward.
    #[error("reflector \"{0}\" cannot convert backward")]
    BackwardThroughReflector(String),

    /// Conversion requested before any rotors were inserted.
    #[error("no rotors inserted")]
    NoRotors,

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnigmaError {
    /// Returns whether this error stems from configuration or operation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnigmaError::UnknownSymbol(_)
            | EnigmaError::IndexOutOfRange { .. }
            | EnigmaError::BackwardThroughReflector(_)
            | EnigmaError::NoRotors
            | EnigmaError::Io(_) => ErrorKind::Operational,
            _ => ErrorKind::Configuration,
        }
    }

    pub(crate) fn malformed_cycles(cycles: &str, reason: impl Into<String>) -> Self {
        EnigmaError::MalformedCycles {
            cycles: cycles.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;
