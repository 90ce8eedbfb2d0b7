use crate::error::{Result, SaxError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest alphabet the symbol index type can address.
pub const MAX_ALPHABET_SIZE: usize = u8::MAX as usize + 1;

/// An ordered set of distinct symbols, lowest magnitude first.
///
/// Symbols are stored internally as `u8` indices into this alphabet; the
/// characters only matter when rendering words or parsing patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<char>", into = "Vec<char>"))]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// The first `n_bins` lowercase Latin letters: `a` (lowest) to at most `z`.
    pub fn latin(n_bins: usize) -> Result<Self> {
        if n_bins < 2 {
            return Err(SaxError::config(
                "n_bins",
                format!("alphabet needs at least 2 symbols, got {n_bins}"),
            ));
        }
        if n_bins > 26 {
            return Err(SaxError::config(
                "n_bins",
                format!("the Latin alphabet has 26 symbols, got {n_bins}"),
            ));
        }
        Ok(Self {
            symbols: (b'a'..).take(n_bins).map(char::from).collect(),
        })
    }

    /// Build an alphabet from custom characters, ordered low to high.
    pub fn from_symbols(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.len() < 2 {
            return Err(SaxError::config(
                "alphabet",
                format!("needs at least 2 symbols, got {}", symbols.len()),
            ));
        }
        if symbols.len() > MAX_ALPHABET_SIZE {
            return Err(SaxError::config(
                "alphabet",
                format!(
                    "at most {MAX_ALPHABET_SIZE} symbols supported, got {}",
                    symbols.len()
                ),
            ));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(SaxError::config(
                    "alphabet",
                    format!("duplicate symbol '{c}'"),
                ));
            }
        }
        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: an alphabet holds at least two symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Character for a symbol index, if the index is in range.
    pub fn symbol(&self, index: u8) -> Option<char> {
        self.symbols.get(index as usize).copied()
    }

    /// Index of a character in this alphabet.
    pub fn index_of(&self, symbol: char) -> Option<u8> {
        self.symbols
            .iter()
            .position(|&c| c == symbol)
            .map(|i| i as u8)
    }

    /// Translate text into symbol indices.
    ///
    /// Fails with `InvalidConfiguration` on the first character that is not
    /// part of the alphabet.
    pub fn parse(&self, text: &str) -> Result<Vec<u8>> {
        text.chars()
            .map(|c| {
                self.index_of(c).ok_or_else(|| {
                    SaxError::config(
                        "pattern",
                        format!(
                            "symbol '{c}' is not in the alphabet \"{}\"",
                            self.symbols.iter().collect::<String>()
                        ),
                    )
                })
            })
            .collect()
    }

    /// Render symbol indices as text.
    ///
    /// # Panics
    /// Panics if an index is outside the alphabet.
    pub fn render(&self, indices: &[u8]) -> String {
        indices
            .iter()
            .map(|&i| self.symbols[i as usize])
            .collect()
    }
}

impl TryFrom<Vec<char>> for Alphabet {
    type Error = SaxError;

    fn try_from(symbols: Vec<char>) -> Result<Self> {
        Alphabet::from_symbols(symbols)
    }
}

impl From<Alphabet> for Vec<char> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols
    }
}
