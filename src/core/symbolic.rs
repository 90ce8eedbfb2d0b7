use crate::algorithms::paa::{segment_bounds, validate_segments};
use crate::core::alphabet::Alphabet;
use crate::core::breakpoints::Breakpoints;
use crate::error::{Result, SaxError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The symbol string of one window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolWord {
    /// Ordinal of the source window.
    pub window_index: usize,
    /// Offset of the window's first observation in the series.
    pub offset: usize,
    /// Symbol indices into the alphabet, one per PAA segment.
    pub symbols: Vec<u8>,
    /// The same symbols rendered with the alphabet.
    pub text: String,
}

impl std::fmt::Display for SymbolWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// The SAX representation of a series: one word per window, in window order.
///
/// Carries the alphabet and breakpoints used to produce it, plus the window
/// geometry needed to map symbol positions back to series offsets.
/// Breakpoints are absent only for an empty sequence encoded with
/// data-driven breakpoints, where there was nothing to derive them from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SymbolicSequenceRepr"))]
pub struct SymbolicSequence {
    words: Vec<SymbolWord>,
    alphabet: Alphabet,
    breakpoints: Option<Breakpoints>,
    window_size: usize,
    n_segments: usize,
}

impl SymbolicSequence {
    pub(crate) fn new(
        words: Vec<SymbolWord>,
        alphabet: Alphabet,
        breakpoints: Option<Breakpoints>,
        window_size: usize,
        n_segments: usize,
    ) -> Self {
        Self {
            words,
            alphabet,
            breakpoints,
            window_size,
            n_segments,
        }
    }

    /// Assemble a sequence from its parts, checking that they agree.
    ///
    /// Every word must hold `n_segments` symbols inside the alphabet, with
    /// `text` matching those symbols, and window indices must increase.
    /// Breakpoints, when present, must separate exactly as many bins as the
    /// alphabet has symbols; they may be absent only for an empty sequence.
    pub fn from_parts(
        words: Vec<SymbolWord>,
        alphabet: Alphabet,
        breakpoints: Option<Breakpoints>,
        window_size: usize,
        n_segments: usize,
    ) -> Result<Self> {
        validate_segments(window_size, n_segments)?;
        match &breakpoints {
            Some(bp) if bp.n_bins() != alphabet.len() => {
                return Err(SaxError::config(
                    "breakpoints",
                    format!(
                        "separate {} bins but the alphabet has {} symbols",
                        bp.n_bins(),
                        alphabet.len()
                    ),
                ));
            }
            None if !words.is_empty() => {
                return Err(SaxError::config(
                    "breakpoints",
                    "required for a non-empty sequence",
                ));
            }
            _ => {}
        }
        for (i, word) in words.iter().enumerate() {
            if word.symbols.len() != n_segments {
                return Err(SaxError::config(
                    "words",
                    format!(
                        "word {i} has {} symbols, expected {n_segments}",
                        word.symbols.len()
                    ),
                ));
            }
            if let Some(&s) = word.symbols.iter().find(|&&s| alphabet.symbol(s).is_none()) {
                return Err(SaxError::config(
                    "words",
                    format!("word {i} uses symbol index {s} outside the alphabet"),
                ));
            }
            if word.text != alphabet.render(&word.symbols) {
                return Err(SaxError::config(
                    "words",
                    format!("word {i} text \"{}\" does not match its symbols", word.text),
                ));
            }
            if i > 0 && word.window_index <= words[i - 1].window_index {
                return Err(SaxError::config(
                    "words",
                    format!("window indices must increase, word {i} breaks the order"),
                ));
            }
        }
        Ok(Self::new(words, alphabet, breakpoints, window_size, n_segments))
    }

    /// Build a sequence from already-symbolized words.
    ///
    /// Words are assumed to come from consecutive non-overlapping windows of
    /// `window_size` observations, so word `i` gets offset `i * window_size`.
    /// Breakpoints are the Gaussian ones for the alphabet size.
    pub fn from_words<S: AsRef<str>>(
        alphabet: Alphabet,
        window_size: usize,
        words: &[S],
    ) -> Result<Self> {
        let n_segments = words.first().map_or(0, |w| w.as_ref().chars().count());
        if n_segments == 0 {
            return Err(SaxError::config("words", "at least one non-empty word is required"));
        }
        if n_segments > window_size {
            return Err(SaxError::config(
                "n_segments",
                format!("must be <= window_size ({window_size}), got {n_segments}"),
            ));
        }
        let breakpoints = Breakpoints::gaussian(alphabet.len())?;
        let mut out = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let text = word.as_ref();
            let symbols = alphabet.parse(text)?;
            if symbols.len() != n_segments {
                return Err(SaxError::config(
                    "words",
                    format!(
                        "word {i} has {} symbols, expected {n_segments}",
                        symbols.len()
                    ),
                ));
            }
            out.push(SymbolWord {
                window_index: i,
                offset: i * window_size,
                symbols,
                text: text.to_string(),
            });
        }
        Ok(Self::new(
            out,
            alphabet,
            Some(breakpoints),
            window_size,
            n_segments,
        ))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the series was shorter than one window.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[SymbolWord] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolWord> {
        self.words.iter()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn breakpoints(&self) -> Option<&Breakpoints> {
        self.breakpoints.as_ref()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn n_segments(&self) -> usize {
        self.n_segments
    }

    /// The rendered word of every window.
    pub fn strings(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }

    /// All symbol indices concatenated in window order.
    pub fn stream(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.words.len() * self.n_segments);
        for w in &self.words {
            out.extend_from_slice(&w.symbols);
        }
        out
    }

    /// All words concatenated into one string.
    pub fn stream_text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }

    /// Series offset of the first observation summarized by `segment` of
    /// the word at `word_idx`.
    ///
    /// # Panics
    /// Panics if `word_idx` is out of range.
    pub fn segment_offset(&self, word_idx: usize, segment: usize) -> usize {
        let (start, _) = segment_bounds(self.window_size, self.n_segments, segment);
        self.words[word_idx].offset + start
    }

    /// Numerosity reduction: drop every word identical to the word before it.
    ///
    /// With overlapping windows, neighbouring windows often share a word;
    /// only the first of each run is kept, with its original offset.
    pub fn numerosity_reduced(&self) -> Self {
        let mut words: Vec<SymbolWord> = Vec::with_capacity(self.words.len());
        for w in &self.words {
            if words.last().map_or(true, |prev| prev.symbols != w.symbols) {
                words.push(w.clone());
            }
        }
        Self::new(
            words,
            self.alphabet.clone(),
            self.breakpoints.clone(),
            self.window_size,
            self.n_segments,
        )
    }
}

/// Field-for-field mirror of [`SymbolicSequence`], checked on the way in.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SymbolicSequenceRepr {
    words: Vec<SymbolWord>,
    alphabet: Alphabet,
    breakpoints: Option<Breakpoints>,
    window_size: usize,
    n_segments: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<SymbolicSequenceRepr> for SymbolicSequence {
    type Error = SaxError;

    fn try_from(repr: SymbolicSequenceRepr) -> Result<Self> {
        SymbolicSequence::from_parts(
            repr.words,
            repr.alphabet,
            repr.breakpoints,
            repr.window_size,
            repr.n_segments,
        )
    }
}

impl<'a> IntoIterator for &'a SymbolicSequence {
    type Item = &'a SymbolWord;
    type IntoIter = std::slice::Iter<'a, SymbolWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
