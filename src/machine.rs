//! Machine: rotor stack, plugboard, stepping and the signal path.
//!
//! Slot 0 holds the reflector, the rightmost `num_pawls` slots hold moving
//! rotors and any slots in between hold fixed rotors. Before every
//! character the pawls step the moving rotors; the signal then runs
//! plugboard → rotors right to left → reflector → rotors left to right →
//! plugboard.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::catalog::RotorCatalog;
use crate::config::Setup;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorKind};

/// A configured rotor machine.
///
/// `Clone` yields a machine with independent rotor settings over the same
/// shared wiring.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use enigma::{Alphabet, Machine, Permutation, RotorBlueprint, RotorCatalog};
///
/// let alpha = Arc::new(Alphabet::upper_case());
/// let wiring = |c: &str| Arc::new(Permutation::new(c, alpha.clone()).unwrap());
///
/// let mut catalog = RotorCatalog::new(alpha.clone());
/// catalog.add(RotorBlueprint::reflector(
///     "B",
///     wiring("(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)"),
/// )).unwrap();
/// catalog.add(RotorBlueprint::moving(
///     "I", wiring("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q",
/// ).unwrap()).unwrap();
/// catalog.add(RotorBlueprint::moving(
///     "II", wiring("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E",
/// ).unwrap()).unwrap();
/// catalog.add(RotorBlueprint::moving(
///     "III", wiring("(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"), "V",
/// ).unwrap()).unwrap();
///
/// let mut machine = Machine::new(alpha, 4, 3, Arc::new(catalog)).unwrap();
/// machine.insert_rotors(["B", "I", "II", "III"]).unwrap();
/// machine.set_rotor_positions("AAA").unwrap();
/// assert_eq!(machine.convert_str("AAAAA").unwrap(), "BDZGO");
///
/// machine.set_rotor_positions("AAA").unwrap();
/// assert_eq!(machine.convert_str("BDZGO").unwrap(), "AAAAA");
/// ```
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_slots: usize,
    num_pawls: usize,
    catalog: Arc<RotorCatalog>,
    rotors: Vec<Rotor>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_slots` rotor slots and `num_pawls` pawls
    /// drawing rotors from `catalog`. No rotors are inserted yet.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidMachineShape`] unless
    ///   `1 < num_slots` and `num_pawls < num_slots`.
    /// - [`EnigmaError::AlphabetMismatch`] if the catalog uses another alphabet.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_slots: usize,
        num_pawls: usize,
        catalog: Arc<RotorCatalog>,
    ) -> Result<Self> {
        if num_slots < 2 || num_pawls >= num_slots {
            return Err(EnigmaError::InvalidMachineShape {
                num_slots,
                num_pawls,
            });
        }
        if **catalog.alphabet() != *alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }

        debug!(
            num_slots,
            num_pawls,
            rotors = catalog.len(),
            alphabet = %alphabet,
            "machine configured"
        );
        let plugboard = Permutation::identity(alphabet.clone());
        Ok(Machine {
            alphabet,
            num_slots,
            num_pawls,
            catalog,
            rotors: Vec::with_capacity(num_slots),
            plugboard,
        })
    }

    /// Returns the machine alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the number of rotor slots.
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Returns the number of pawls (and so of moving rotors).
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the catalog rotors are drawn from.
    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }

    /// Returns the installed rotors, reflector first.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Returns the installed plugboard.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Returns the names of the installed rotors, reflector first.
    pub fn rotor_names(&self) -> Vec<&str> {
        self.rotors.iter().map(Rotor::name).collect()
    }

    /// First slot driven by a pawl.
    fn first_pawl_slot(&self) -> usize {
        self.num_slots - self.num_pawls
    }

    /// Installs fresh instances of the rotors called `names`, reflector
    /// first, all at setting 0.
    ///
    /// On error the previously installed rotors are kept.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorCountMismatch`] if `names` does not fill every slot.
    /// - [`EnigmaError::UnknownRotor`] for a name missing from the catalog.
    /// - [`EnigmaError::DuplicateRotor`] if a rotor is selected twice, under
    ///   any spelling of its name.
    /// - [`EnigmaError::MisplacedRotor`] if slot 0 is not a reflector, a
    ///   reflector appears elsewhere, or moving rotors do not fill exactly
    ///   the pawl slots.
    pub fn insert_rotors<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        if names.len() != self.num_slots {
            return Err(EnigmaError::RotorCountMismatch {
                expected: self.num_slots,
                got: names.len(),
            });
        }

        let first_pawl = self.first_pawl_slot();
        let mut used = HashSet::with_capacity(names.len());
        let mut rotors = Vec::with_capacity(names.len());
        for (slot, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let rotor = self.catalog.instantiate(name)?;
            if !used.insert(self.catalog.id_of(name)) {
                return Err(EnigmaError::DuplicateRotor(name.to_string()));
            }
            let misplaced = match (slot, rotor.kind()) {
                (0, RotorKind::Reflector) => None,
                (0, _) => Some("slot 0 must hold a reflector"),
                (_, RotorKind::Reflector) => Some("only slot 0 may hold a reflector"),
                (s, RotorKind::Moving) if s < first_pawl => Some("no pawl drives this slot"),
                (s, RotorKind::Fixed) if s >= first_pawl => {
                    Some("a pawl slot needs a moving rotor")
                }
                _ => None,
            };
            if let Some(reason) = misplaced {
                return Err(EnigmaError::MisplacedRotor {
                    name: name.to_string(),
                    slot,
                    reason,
                });
            }
            rotors.push(rotor);
        }

        self.rotors = rotors;
        debug!(rotors = ?self.rotor_names(), "rotors inserted");
        Ok(())
    }

    /// Sets the rotors in slots `1..num_slots`, left to right, to the
    /// symbols of `positions`.
    ///
    /// Either every rotor is set or none is.
    ///
    /// # Errors
    /// - [`EnigmaError::NoRotors`] before [`insert_rotors`](Self::insert_rotors).
    /// - [`EnigmaError::PositionCountMismatch`] unless `positions` has
    ///   `num_slots - 1` symbols.
    /// - [`EnigmaError::UnknownSymbol`] for a symbol outside the alphabet.
    pub fn set_rotor_positions(&mut self, positions: &str) -> Result<()> {
        if self.rotors.is_empty() {
            return Err(EnigmaError::NoRotors);
        }
        let settings = positions
            .chars()
            .map(|c| self.alphabet.to_index(c))
            .collect::<Result<Vec<usize>>>()?;
        if settings.len() != self.num_slots - 1 {
            return Err(EnigmaError::PositionCountMismatch {
                expected: self.num_slots - 1,
                got: settings.len(),
            });
        }

        for (rotor, setting) in self.rotors[1..].iter_mut().zip(settings) {
            rotor.set(setting)?;
        }
        Ok(())
    }

    /// Returns the symbols showing in the windows of slots `1..`.
    pub fn positions(&self) -> String {
        self.rotors
            .iter()
            .skip(1)
            .filter_map(|r| r.setting_symbol().ok())
            .collect()
    }

    /// Installs `plugboard`.
    ///
    /// # Errors
    /// - [`EnigmaError::AlphabetMismatch`] if it uses another alphabet.
    /// - [`EnigmaError::InvalidPlugboard`] unless every cycle is a pair or
    ///   a fixed point.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        if **plugboard.alphabet() != *self.alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }
        if !plugboard.is_involution() {
            return Err(EnigmaError::InvalidPlugboard);
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Applies a parsed setup line: rotors, positions, then plugboard.
    pub fn apply_setup(&mut self, setup: &Setup) -> Result<()> {
        let plugboard = Permutation::new(setup.plugboard(), self.alphabet.clone())?;
        self.insert_rotors(setup.rotor_names())?;
        self.set_rotor_positions(setup.positions())?;
        self.set_plugboard(plugboard)?;
        debug!(
            rotors = ?self.rotor_names(),
            positions = %self.positions(),
            plugboard = setup.plugboard(),
            "setup applied"
        );
        Ok(())
    }

    /// Advances the rotors as one keypress would.
    ///
    /// The rightmost rotor always advances. The pawl between slots `i` and
    /// `i + 1` engages when rotor `i + 1` is at a notch and then advances
    /// both rotors. Slots are visited left to right so each notch is read
    /// before the rotor carrying it moves.
    pub fn step(&mut self) {
        let n = self.rotors.len();
        if n == 0 || self.num_pawls == 0 {
            return;
        }
        let first_pawl = self.first_pawl_slot();

        for i in first_pawl..n {
            let rightmost = i == n - 1;
            let pushed_by_right = !rightmost && self.rotors[i + 1].at_notch();
            let pulled_by_left = i > first_pawl && self.rotors[i].at_notch();
            if rightmost || pushed_by_right || pulled_by_left {
                self.rotors[i].advance();
            }
        }
        trace!(positions = %self.positions(), "stepped");
    }

    /// Steps the rotors, then converts the symbol at `index`.
    ///
    /// # Errors
    /// - [`EnigmaError::NoRotors`] before [`insert_rotors`](Self::insert_rotors).
    /// - [`EnigmaError::IndexOutOfRange`] if `index` is not in the alphabet.
    pub fn convert(&mut self, index: usize) -> Result<usize> {
        if self.rotors.is_empty() {
            return Err(EnigmaError::NoRotors);
        }
        if index >= self.alphabet.size() {
            return Err(EnigmaError::IndexOutOfRange {
                index,
                size: self.alphabet.size(),
            });
        }

        self.step();

        let mut x = self.plugboard.permute(index);
        for rotor in self.rotors[1..].iter().rev() {
            x = rotor.convert_forward(x);
        }
        x = self.rotors[0].convert_forward(x);
        for rotor in &self.rotors[1..] {
            x = rotor.convert_backward(x)?;
        }
        Ok(self.plugboard.permute(x))
    }

    /// Steps the rotors, then converts `symbol`.
    pub fn convert_symbol(&mut self, symbol: char) -> Result<char> {
        let index = self.alphabet.to_index(symbol)?;
        let out = self.convert(index)?;
        self.alphabet.to_symbol(out)
    }

    /// Converts every symbol of `text` in order, stepping once per symbol.
    ///
    /// The whole text is checked against the alphabet first; on error no
    /// rotor moves.
    ///
    /// # Errors
    /// - [`EnigmaError::NoRotors`] before [`insert_rotors`](Self::insert_rotors).
    /// - [`EnigmaError::UnknownSymbol`] for the first symbol outside the alphabet.
    pub fn convert_str(&mut self, text: &str) -> Result<String> {
        if self.rotors.is_empty() {
            return Err(EnigmaError::NoRotors);
        }
        let indices = text
            .chars()
            .map(|c| self.alphabet.to_index(c))
            .collect::<Result<Vec<usize>>>()?;

        let mut out = String::with_capacity(text.len());
        for index in indices {
            let converted = self.convert(index)?;
            out.push(self.alphabet.to_symbol(converted)?);
        }
        Ok(out)
    }
}
