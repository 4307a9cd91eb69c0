//! Alphabet: ordered symbol set with a bijection to `0..size`.

use std::collections::HashMap;
use std::fmt;

use crate::error::{EnigmaError, Result};

/// An ordered set of distinct symbols.
///
/// Index `i` corresponds to the `i`-th symbol given at construction.
/// Immutable once built; machines and permutations share it through an
/// `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    indices: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from the symbols of `symbols`, in order.
    ///
    /// # Errors
    /// - [`EnigmaError::AlphabetTooSmall`] for fewer than 2 symbols.
    /// - [`EnigmaError::DuplicateSymbol`] if a symbol repeats.
    /// - [`EnigmaError::ReservedSymbol`] for whitespace or parentheses.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alpha.size(), 4);
    /// assert_eq!(alpha.to_index('C').unwrap(), 2);
    ///
    /// assert!(Alphabet::new("ABCA").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < 2 {
            return Err(EnigmaError::AlphabetTooSmall(symbols.len()));
        }

        let mut indices = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if c.is_whitespace() || c == '(' || c == ')' {
                return Err(EnigmaError::ReservedSymbol(c));
            }
            if indices.insert(c, i).is_some() {
                return Err(EnigmaError::DuplicateSymbol(c));
            }
        }

        Ok(Alphabet { symbols, indices })
    }

    /// Builds an alphabet from a configuration token.
    ///
    /// A three-symbol token `X-Y` is an inclusive range, so `A-Z` is the
    /// 26 upper-case letters. Anything else is taken as the literal symbol
    /// list. Surrounding whitespace is ignored.
    pub fn from_spec(text: &str) -> Result<Self> {
        let text = text.trim();
        let chars: Vec<char> = text.chars().collect();
        if let [first, '-', last] = chars[..] {
            if first < last {
                let range: String = (first..=last).collect();
                return Self::new(&range);
            }
        }
        Self::new(text)
    }

    /// The 26 upper-case Latin letters.
    pub fn upper_case() -> Self {
        let symbols: Vec<char> = ('A'..='Z').collect();
        let indices = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, indices }
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true iff `symbol` belongs to this alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.indices.contains_key(&symbol)
    }

    /// Returns the index of `symbol`.
    ///
    /// # Errors
    /// [`EnigmaError::UnknownSymbol`] if `symbol` is not in the alphabet.
    pub fn to_index(&self, symbol: char) -> Result<usize> {
        self.indices
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::UnknownSymbol(symbol))
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// [`EnigmaError::IndexOutOfRange`] if `index >= size()`.
    pub fn to_symbol(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Iterates over the symbols in index order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({})", self)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
