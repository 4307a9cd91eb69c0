//! Permutation: a bijection over alphabet indices read from cycle notation.
//!
//! Both directions are tabulated at construction, so [`Permutation::permute`]
//! and [`Permutation::invert`] are single array lookups. Every rotor performs
//! two of them per character.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A permutation of `0..alphabet.size()`.
///
/// Immutable after construction. Rotor blueprints share one through an
/// `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles`, a string of parenthesized groups such as
    /// `"(AELTPHQXRU) (BKNW)"`, over `alphabet`.
    ///
    /// Each symbol in a group maps to the next one, the last wrapping to the
    /// first. Symbols in no group map to themselves, so an empty string is
    /// the identity. Whitespace is ignored everywhere.
    ///
    /// # Errors
    /// - [`EnigmaError::MalformedCycles`] on unbalanced or nested
    ///   parentheses, symbols outside a group, or symbols not in `alphabet`.
    /// - [`EnigmaError::RepeatedCycleSymbol`] if a symbol appears twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let perm = Permutation::new("(BACD)", alpha).unwrap();
    /// assert_eq!(perm.permute(1), 0); // B -> A
    /// assert_eq!(perm.invert(1), 3); // B <- D
    /// ```
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self> {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut inverse: Vec<usize> = (0..size).collect();
        let mut seen = vec![false; size];
        let mut current: Option<Vec<usize>> = None;

        for c in cycles.chars().filter(|c| !c.is_whitespace()) {
            match (c, current.as_mut()) {
                ('(', None) => current = Some(Vec::new()),
                ('(', Some(_)) => {
                    return Err(EnigmaError::malformed_cycles(cycles, "nested '('"));
                }
                (')', None) => {
                    return Err(EnigmaError::malformed_cycles(cycles, "unmatched ')'"));
                }
                (')', Some(_)) => {
                    if let Some(cycle) = current.take() {
                        Self::link(&cycle, &mut forward, &mut inverse);
                    }
                }
                (symbol, None) => {
                    return Err(EnigmaError::malformed_cycles(
                        cycles,
                        format!("symbol '{}' outside parentheses", symbol),
                    ));
                }
                (symbol, Some(cycle)) => {
                    let index = alphabet.to_index(symbol).map_err(|_| {
                        EnigmaError::malformed_cycles(
                            cycles,
                            format!("symbol '{}' not in alphabet", symbol),
                        )
                    })?;
                    if seen[index] {
                        return Err(EnigmaError::RepeatedCycleSymbol(symbol));
                    }
                    seen[index] = true;
                    cycle.push(index);
                }
            }
        }

        if current.is_some() {
            return Err(EnigmaError::malformed_cycles(cycles, "unclosed '('"));
        }

        Ok(Permutation {
            alphabet,
            forward,
            inverse,
        })
    }

    /// Returns the identity permutation over `alphabet`.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet,
            forward: (0..size).collect(),
            inverse: (0..size).collect(),
        }
    }

    /// Maps each element of `cycle` to its successor and back.
    fn link(cycle: &[usize], forward: &mut [usize], inverse: &mut [usize]) {
        for (i, &from) in cycle.iter().enumerate() {
            let to = cycle[(i + 1) % cycle.len()];
            forward[from] = to;
            inverse[to] = from;
        }
    }

    /// Returns the size of the underlying alphabet.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the alphabet this permutation is defined over.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Applies the permutation to `index`, wrapped modulo the size.
    pub fn permute(&self, index: usize) -> usize {
        self.forward[index % self.size()]
    }

    /// Applies the inverse permutation to `index`, wrapped modulo the size.
    pub fn invert(&self, index: usize) -> usize {
        self.inverse[index % self.size()]
    }

    /// Symbol-level [`permute`](Self::permute).
    pub fn permute_symbol(&self, symbol: char) -> Result<char> {
        let index = self.alphabet.to_index(symbol)?;
        self.alphabet.to_symbol(self.permute(index))
    }

    /// Symbol-level [`invert`](Self::invert).
    pub fn invert_symbol(&self, symbol: char) -> Result<char> {
        let index = self.alphabet.to_index(symbol)?;
        self.alphabet.to_symbol(self.invert(index))
    }

    /// Returns true iff every cycle has length 1 or 2.
    pub fn is_involution(&self) -> bool {
        self.forward
            .iter()
            .enumerate()
            .all(|(i, &to)| self.forward[to] == i)
    }

    /// Returns true iff no index maps to itself.
    pub fn is_derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &to)| i != to)
    }
}
