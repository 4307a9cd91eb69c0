//! Rotor: a wired disc with a rotational setting.
//!
//! Wiring is split from state. A [`RotorBlueprint`] holds the immutable
//! part (name, kind, permutation, notches) and lives in a
//! [`RotorCatalog`](crate::catalog::RotorCatalog). A [`Rotor`] is one
//! installed instance: a shared blueprint plus its own mutable setting.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// Mechanical role of a rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotorKind {
    /// Driven by a pawl; advances and carries notches.
    Moving,
    /// Static extra wiring between the reflector and the moving rotors.
    Fixed,
    /// Static, leftmost, sends the signal back through the stack.
    Reflector,
}

impl fmt::Display for RotorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotorKind::Moving => write!(f, "moving"),
            RotorKind::Fixed => write!(f, "fixed"),
            RotorKind::Reflector => write!(f, "reflector"),
        }
    }
}

/// Immutable description of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorBlueprint {
    name: String,
    kind: RotorKind,
    permutation: Arc<Permutation>,
    notches: BTreeSet<usize>,
}

impl RotorBlueprint {
    /// Creates a moving rotor notched at each symbol of `notches`.
    ///
    /// # Errors
    /// [`EnigmaError::UnknownSymbol`] if a notch is not in the alphabet.
    pub fn moving(
        name: impl Into<String>,
        permutation: Arc<Permutation>,
        notches: &str,
    ) -> Result<Self> {
        let alphabet = permutation.alphabet();
        let notches = notches
            .chars()
            .map(|c| alphabet.to_index(c))
            .collect::<Result<BTreeSet<usize>>>()?;
        Ok(RotorBlueprint {
            name: name.into(),
            kind: RotorKind::Moving,
            permutation,
            notches,
        })
    }

    /// Creates a fixed rotor.
    pub fn fixed(name: impl Into<String>, permutation: Arc<Permutation>) -> Self {
        Self::without_notches(name.into(), RotorKind::Fixed, permutation)
    }

    /// Creates a reflector.
    pub fn reflector(name: impl Into<String>, permutation: Arc<Permutation>) -> Self {
        Self::without_notches(name.into(), RotorKind::Reflector, permutation)
    }

    fn without_notches(name: String, kind: RotorKind, permutation: Arc<Permutation>) -> Self {
        RotorBlueprint {
            name,
            kind,
            permutation,
            notches: BTreeSet::new(),
        }
    }

    /// Returns the rotor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rotor kind.
    pub fn kind(&self) -> RotorKind {
        self.kind
    }

    /// Returns the wiring at setting 0.
    pub fn permutation(&self) -> &Arc<Permutation> {
        &self.permutation
    }

    /// Returns the notch positions.
    pub fn notches(&self) -> &BTreeSet<usize> {
        &self.notches
    }
}

/// An installed rotor: shared wiring plus its own setting.
///
/// Cloning a `Rotor` yields an independent setting over the same wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    blueprint: Arc<RotorBlueprint>,
    setting: usize,
}

impl Rotor {
    /// Creates an instance of `blueprint` at setting 0.
    pub fn new(blueprint: Arc<RotorBlueprint>) -> Self {
        Rotor {
            blueprint,
            setting: 0,
        }
    }

    /// Returns the rotor name.
    pub fn name(&self) -> &str {
        self.blueprint.name()
    }

    /// Returns the rotor kind.
    pub fn kind(&self) -> RotorKind {
        self.blueprint.kind()
    }

    /// Returns the shared blueprint.
    pub fn blueprint(&self) -> &Arc<RotorBlueprint> {
        &self.blueprint
    }

    /// Returns the rotor alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.blueprint.permutation.alphabet()
    }

    /// Returns the size of the rotor alphabet.
    pub fn size(&self) -> usize {
        self.blueprint.permutation.size()
    }

    /// Returns true iff the rotor has a ratchet and can move.
    pub fn rotates(&self) -> bool {
        self.kind() == RotorKind::Moving
    }

    /// Returns true iff the rotor is a reflector.
    pub fn reflecting(&self) -> bool {
        self.kind() == RotorKind::Reflector
    }

    /// Returns the current setting.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Returns the symbol showing in the rotor window.
    pub fn setting_symbol(&self) -> Result<char> {
        self.alphabet().to_symbol(self.setting)
    }

    /// Sets the rotor to `position`.
    ///
    /// # Errors
    /// [`EnigmaError::IndexOutOfRange`] if `position >= size()`.
    pub fn set(&mut self, position: usize) -> Result<()> {
        if position >= self.size() {
            return Err(EnigmaError::IndexOutOfRange {
                index: position,
                size: self.size(),
            });
        }
        self.setting = position;
        Ok(())
    }

    /// Sets the rotor to the position labelled `symbol`.
    ///
    /// # Errors
    /// [`EnigmaError::UnknownSymbol`] if `symbol` is not in the alphabet.
    pub fn set_symbol(&mut self, symbol: char) -> Result<()> {
        self.setting = self.alphabet().to_index(symbol)?;
        Ok(())
    }

    /// Converts contact `p` (right side) to the contact it is wired to
    /// on the left side, taking the current rotation into account.
    pub fn convert_forward(&self, p: usize) -> usize {
        let shifted = self.blueprint.permutation.permute(p + self.setting);
        self.unshift(shifted)
    }

    /// Converts contact `e` (left side) back to the right side.
    ///
    /// # Errors
    /// [`EnigmaError::BackwardThroughReflector`] when called on a reflector.
    pub fn convert_backward(&self, e: usize) -> Result<usize> {
        if self.reflecting() {
            return Err(EnigmaError::BackwardThroughReflector(
                self.name().to_string(),
            ));
        }
        let shifted = self.blueprint.permutation.invert(e + self.setting);
        Ok(self.unshift(shifted))
    }

    /// `(x - setting) mod size`, staying in `usize`.
    fn unshift(&self, x: usize) -> usize {
        let size = self.size();
        (x + size - self.setting) % size
    }

    /// Returns true iff the rotor sits at one of its notches.
    pub fn at_notch(&self) -> bool {
        self.rotates() && self.blueprint.notches.contains(&self.setting)
    }

    /// Advances one position. No-op for rotors that do not rotate.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.setting = (self.setting + 1) % self.size();
        }
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rotor {}", self.name())
    }
}
