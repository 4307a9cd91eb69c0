//! RotorCatalog: arena of immutable rotor blueprints.
//!
//! Blueprints are stored in a contiguous `Vec` and addressed by
//! [`RotorId`] or by name. Machines never hold catalog entries directly;
//! [`RotorCatalog::instantiate`] hands out a fresh [`Rotor`] per selection,
//! so two machines using the same rotor name share wiring but not state.
//!
//! Names are matched ignoring case: `beta` selects `Beta`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::rotor::{Rotor, RotorBlueprint};

/// Identifier of a blueprint within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(pub usize);

/// Named collection of rotor blueprints over one alphabet.
#[derive(Debug, Clone)]
pub struct RotorCatalog {
    alphabet: Arc<Alphabet>,
    blueprints: Vec<Arc<RotorBlueprint>>,
    by_name: HashMap<String, RotorId>,
}

impl RotorCatalog {
    /// Creates an empty catalog for `alphabet`.
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        RotorCatalog {
            alphabet,
            blueprints: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Adds `blueprint` to the catalog.
    ///
    /// # Errors
    /// - [`EnigmaError::DuplicateRotor`] if the name is taken, ignoring case.
    /// - [`EnigmaError::AlphabetMismatch`] if the wiring uses another alphabet.
    pub fn add(&mut self, blueprint: RotorBlueprint) -> Result<RotorId> {
        let key = name_key(blueprint.name());
        if self.by_name.contains_key(&key) {
            return Err(EnigmaError::DuplicateRotor(blueprint.name().to_string()));
        }
        if **blueprint.permutation().alphabet() != *self.alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }

        let id = RotorId(self.blueprints.len());
        self.by_name.insert(key, id);
        self.blueprints.push(Arc::new(blueprint));
        Ok(id)
    }

    /// Returns the catalog alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the number of blueprints.
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Returns true iff the catalog holds no blueprints.
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Looks up the id of the blueprint called `name`, ignoring case.
    pub fn id_of(&self, name: &str) -> Option<RotorId> {
        self.by_name.get(&name_key(name)).copied()
    }

    /// Returns the blueprint with id `id`, if any.
    pub fn get(&self, id: RotorId) -> Option<&Arc<RotorBlueprint>> {
        self.blueprints.get(id.0)
    }

    /// Iterates over blueprint names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.blueprints.iter().map(|b| b.name())
    }

    /// Creates a fresh rotor at setting 0 from the blueprint called `name`.
    /// The rotor carries the catalog's spelling of the name.
    ///
    /// # Errors
    /// [`EnigmaError::UnknownRotor`] if no blueprint has that name.
    pub fn instantiate(&self, name: &str) -> Result<Rotor> {
        let id = self
            .id_of(name)
            .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
        Ok(Rotor::new(Arc::clone(&self.blueprints[id.0])))
    }
}

fn name_key(name: &str) -> String {
    name.to_uppercase()
}
