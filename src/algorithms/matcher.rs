use crate::core::alphabet::Alphabet;
use crate::core::symbolic::SymbolicSequence;
use crate::error::{Result, SaxError};
use crate::metrics::hamming::hamming_within;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a candidate position is compared with the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchMode {
    /// Symbol-for-symbol equality.
    #[default]
    Exact,
    /// Hamming distance at most `max_mismatches`.
    Tolerant { max_mismatches: usize },
}

/// Which symbols a pattern is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchScope {
    /// Each window's word on its own; matches never span two windows.
    #[default]
    PerWindow,
    /// All words concatenated into one symbol stream.
    Stream,
}

/// Configuration for symbolic pattern search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatcherConfig {
    pub mode: MatchMode,
    pub scope: SearchScope,
    /// Greedily keep left-most matches and skip past each accepted span.
    pub non_overlapping: bool,
}

impl MatcherConfig {
    /// Exact, per-window matching reporting overlapping hits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tolerant(max_mismatches: usize) -> Self {
        Self {
            mode: MatchMode::Tolerant { max_mismatches },
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_non_overlapping(mut self, non_overlapping: bool) -> Self {
        self.non_overlapping = non_overlapping;
        self
    }
}

/// A raw hit of [`scan`]: where the pattern matched and how closely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub position: usize,
    pub distance: usize,
}

/// One occurrence of a pattern in a symbolic sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    /// Position of the first matched symbol: within the stream for
    /// [`SearchScope::Stream`], within the word for [`SearchScope::PerWindow`].
    pub position: usize,
    /// Window whose word holds the first matched symbol.
    pub window_index: usize,
    /// Segment of that word where the match starts.
    pub segment: usize,
    /// Series offset of the first observation summarized by the match.
    pub series_offset: usize,
    /// The matched symbols.
    pub symbols: String,
    /// Hamming distance to the pattern (0 for exact matches).
    pub distance: usize,
}

/// All matches of one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternMatches {
    pub pattern: String,
    pub matches: Vec<Match>,
}

/// Scan `haystack` left to right for `needle`.
///
/// Every position is tested directly, so overlapping hits are all reported
/// unless `non_overlapping` is set, in which case the scan resumes right after
/// each accepted hit. Returns hits in increasing position order; an empty
/// needle or a haystack shorter than the needle yields nothing.
pub fn scan(haystack: &[u8], needle: &[u8], mode: MatchMode, non_overlapping: bool) -> Vec<Hit> {
    let m = needle.len();
    let mut hits = Vec::new();
    if m == 0 || haystack.len() < m {
        return hits;
    }

    let mut p = 0;
    while p + m <= haystack.len() {
        let candidate = &haystack[p..p + m];
        let distance = match mode {
            MatchMode::Exact => (candidate == needle).then_some(0),
            MatchMode::Tolerant { max_mismatches } => {
                hamming_within(candidate, needle, max_mismatches)
            }
        };
        match distance {
            Some(distance) => {
                hits.push(Hit {
                    position: p,
                    distance,
                });
                p += if non_overlapping { m } else { 1 };
            }
            None => p += 1,
        }
    }
    hits
}

/// Searches symbolic sequences for target patterns.
///
/// # Examples
///
/// ```
/// use sax_rs::{Alphabet, Matcher, MatcherConfig, SearchScope, SymbolicSequence};
///
/// let seq = SymbolicSequence::from_words(Alphabet::latin(4).unwrap(), 12, &["ccd", "aab", "ccd"])
///     .unwrap();
/// let matcher = Matcher::new(MatcherConfig::new().with_scope(SearchScope::Stream));
/// let offsets: Vec<usize> = matcher
///     .find(&seq, "ccd")
///     .unwrap()
///     .iter()
///     .map(|m| m.position)
///     .collect();
/// assert_eq!(offsets, vec![0, 6]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// All matches of `pattern` in `seq`, in increasing position order.
    ///
    /// Fails with `InvalidConfiguration`, before scanning, if the pattern is
    /// empty, uses a symbol outside the sequence's alphabet, or is longer
    /// than a word in per-window scope. An empty sequence yields no matches.
    pub fn find(&self, seq: &SymbolicSequence, pattern: &str) -> Result<Vec<Match>> {
        let needle = self.prepare(seq, pattern)?;
        let matches = match self.config.scope {
            SearchScope::PerWindow => self.find_per_window(seq, &needle),
            SearchScope::Stream => self.find_in_stream(seq, &needle),
        };
        tracing::debug!(
            pattern,
            scope = ?self.config.scope,
            mode = ?self.config.mode,
            n_matches = matches.len(),
            "pattern search complete"
        );
        Ok(matches)
    }

    /// Search several patterns, returning one report per pattern in order.
    ///
    /// All patterns are validated before any of them is searched.
    pub fn find_many<S: AsRef<str>>(
        &self,
        seq: &SymbolicSequence,
        patterns: &[S],
    ) -> Result<Vec<PatternMatches>> {
        for p in patterns {
            self.prepare(seq, p.as_ref())?;
        }
        patterns
            .iter()
            .map(|p| {
                let pattern = p.as_ref();
                Ok(PatternMatches {
                    pattern: pattern.to_string(),
                    matches: self.find(seq, pattern)?,
                })
            })
            .collect()
    }

    /// Check a pattern against an alphabet and word length, returning its
    /// symbol indices.
    pub fn validate_pattern(
        &self,
        alphabet: &Alphabet,
        n_segments: usize,
        pattern: &str,
    ) -> Result<Vec<u8>> {
        if pattern.is_empty() {
            return Err(SaxError::config("pattern", "must not be empty"));
        }
        let needle = alphabet.parse(pattern)?;
        if self.config.scope == SearchScope::PerWindow && needle.len() > n_segments {
            return Err(SaxError::config(
                "pattern",
                format!(
                    "length {} exceeds the {n_segments} symbols of a window",
                    needle.len()
                ),
            ));
        }
        Ok(needle)
    }

    fn prepare(&self, seq: &SymbolicSequence, pattern: &str) -> Result<Vec<u8>> {
        self.validate_pattern(seq.alphabet(), seq.n_segments(), pattern)
    }

    fn find_per_window(&self, seq: &SymbolicSequence, needle: &[u8]) -> Vec<Match> {
        let mut matches = Vec::new();
        for (k, word) in seq.iter().enumerate() {
            for hit in scan(
                &word.symbols,
                needle,
                self.config.mode,
                self.config.non_overlapping,
            ) {
                let span = &word.symbols[hit.position..hit.position + needle.len()];
                matches.push(Match {
                    position: hit.position,
                    window_index: word.window_index,
                    segment: hit.position,
                    series_offset: seq.segment_offset(k, hit.position),
                    symbols: seq.alphabet().render(span),
                    distance: hit.distance,
                });
            }
        }
        matches
    }

    fn find_in_stream(&self, seq: &SymbolicSequence, needle: &[u8]) -> Vec<Match> {
        let stream = seq.stream();
        let n_seg = seq.n_segments();
        scan(&stream, needle, self.config.mode, self.config.non_overlapping)
            .into_iter()
            .map(|hit| {
                let k = hit.position / n_seg;
                let segment = hit.position % n_seg;
                Match {
                    position: hit.position,
                    window_index: seq.words()[k].window_index,
                    segment,
                    series_offset: seq.segment_offset(k, segment),
                    symbols: seq
                        .alphabet()
                        .render(&stream[hit.position..hit.position + needle.len()]),
                    distance: hit.distance,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(words: &[&str]) -> SymbolicSequence {
        SymbolicSequence::from_words(Alphabet::latin(4).unwrap(), 12, words).unwrap()
    }

    fn positions(matches: &[Match]) -> Vec<usize> {
        matches.iter().map(|m| m.position).collect()
    }

    #[test]
    fn test_scan_exact_overlapping() {
        let hits = scan(b"aaaa", b"aa", MatchMode::Exact, false);
        let pos: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(pos, vec![0, 1, 2]);
    }

    #[test]
    fn test_scan_exact_non_overlapping() {
        let hits = scan(b"aaaa", b"aa", MatchMode::Exact, true);
        let pos: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(pos, vec![0, 2]);
        let hits = scan(b"aaa", b"aa", MatchMode::Exact, true);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_scan_degenerate_inputs() {
        assert!(scan(b"abc", b"", MatchMode::Exact, false).is_empty());
        assert!(scan(b"ab", b"abc", MatchMode::Exact, false).is_empty());
        assert!(scan(b"", b"a", MatchMode::Tolerant { max_mismatches: 1 }, false).is_empty());
    }

    #[test]
    fn test_stream_exact_ccd() {
        let s = seq(&["ccd", "aab", "ccd"]);
        for non_overlapping in [false, true] {
            let matcher = Matcher::new(
                MatcherConfig::new()
                    .with_scope(SearchScope::Stream)
                    .with_non_overlapping(non_overlapping),
            );
            let matches = matcher.find(&s, "ccd").unwrap();
            assert_eq!(positions(&matches), vec![0, 6]);
            assert_eq!(matches[1].window_index, 2);
            assert_eq!(matches[1].series_offset, 24);
            assert!(matches.iter().all(|m| m.distance == 0 && m.symbols == "ccd"));
        }
    }

    #[test]
    fn test_stream_tolerant_threshold_excludes_distance_two() {
        let s = seq(&["ccd", "cba"]);
        let matcher = Matcher::new(MatcherConfig::tolerant(1).with_scope(SearchScope::Stream));
        let matches = matcher.find(&s, "ccd").unwrap();
        assert_eq!(positions(&matches), vec![0]);
        assert_eq!(matches[0].distance, 0);
    }

    #[test]
    fn test_stream_tolerant_reports_all_ties() {
        // "ccd" vs "bcd" and "ccb": both at distance 1.
        let s = seq(&["bcd", "ccb"]);
        let matcher = Matcher::new(MatcherConfig::tolerant(1).with_scope(SearchScope::Stream));
        let matches = matcher.find(&s, "ccd").unwrap();
        assert_eq!(positions(&matches), vec![0, 3]);
        assert!(matches.iter().all(|m| m.distance == 1));
    }

    #[test]
    fn test_scan_tolerant_non_overlapping() {
        let tolerant = MatchMode::Tolerant { max_mismatches: 1 };
        let all = scan(&[0, 0, 1, 0, 0, 1], &[0, 0], tolerant, false);
        let found: Vec<(usize, usize)> = all.iter().map(|h| (h.position, h.distance)).collect();
        assert_eq!(found, vec![(0, 0), (1, 1), (2, 1), (3, 0), (4, 1)]);

        let greedy = scan(&[0, 0, 1, 0, 0, 1], &[0, 0], tolerant, true);
        let found: Vec<(usize, usize)> = greedy.iter().map(|h| (h.position, h.distance)).collect();
        assert_eq!(found, vec![(0, 0), (2, 1), (4, 1)]);
    }

    #[test]
    fn test_stream_tolerant_non_overlapping() {
        // Stream "aabaaa": every offset is within one mismatch of "aaa".
        let s = seq(&["aab", "aaa"]);
        let overlapping = Matcher::new(MatcherConfig::tolerant(1).with_scope(SearchScope::Stream));
        let matches = overlapping.find(&s, "aaa").unwrap();
        let found: Vec<(usize, usize)> = matches.iter().map(|m| (m.position, m.distance)).collect();
        assert_eq!(found, vec![(0, 1), (1, 1), (2, 1), (3, 0)]);

        let greedy = Matcher::new(
            MatcherConfig::tolerant(1)
                .with_scope(SearchScope::Stream)
                .with_non_overlapping(true),
        );
        let matches = greedy.find(&s, "aaa").unwrap();
        let found: Vec<(usize, usize)> = matches.iter().map(|m| (m.position, m.distance)).collect();
        assert_eq!(found, vec![(0, 1), (3, 0)]);
        assert_eq!(matches[0].symbols, "aab");
        assert_eq!(matches[1].window_index, 1);
        assert_eq!(matches[1].segment, 0);
        assert_eq!(matches[1].series_offset, 12);
    }

    #[test]
    fn test_per_window_tolerant_reports_ties() {
        // "bb" is one mismatch from both "ab" and "bc", two from "dd".
        let s = seq(&["abc", "ddd"]);
        let matcher = Matcher::new(MatcherConfig::tolerant(1));
        let matches = matcher.find(&s, "bb").unwrap();
        let found: Vec<(usize, usize, usize, usize)> = matches
            .iter()
            .map(|m| (m.window_index, m.position, m.distance, m.series_offset))
            .collect();
        assert_eq!(found, vec![(0, 0, 1, 0), (0, 1, 1, 4)]);
        assert_eq!(matches[0].symbols, "ab");
        assert_eq!(matches[1].symbols, "bc");

        // The tie at position 1 overlaps the accepted match at 0.
        let greedy = Matcher::new(MatcherConfig::tolerant(1).with_non_overlapping(true));
        let matches = greedy.find(&s, "bb").unwrap();
        let found: Vec<(usize, usize, usize)> = matches
            .iter()
            .map(|m| (m.window_index, m.position, m.distance))
            .collect();
        assert_eq!(found, vec![(0, 0, 1)]);
    }

    #[test]
    fn test_stream_match_spanning_windows() {
        let s = seq(&["abc", "dab"]);
        let matcher = Matcher::new(MatcherConfig::new().with_scope(SearchScope::Stream));
        let matches = matcher.find(&s, "cda").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].position, 2);
        assert_eq!(matches[0].window_index, 0);
        assert_eq!(matches[0].segment, 2);
        assert_eq!(matches[0].series_offset, 8);

        // The same pattern never matches across words in per-window scope.
        let per_window = Matcher::default().find(&s, "cda").unwrap();
        assert!(per_window.is_empty());
    }

    #[test]
    fn test_per_window_whole_word() {
        let s = seq(&["ccd", "aab", "ccd", "cdd"]);
        let matches = Matcher::default().find(&s, "ccd").unwrap();
        let windows: Vec<usize> = matches.iter().map(|m| m.window_index).collect();
        assert_eq!(windows, vec![0, 2]);
        assert_eq!(matches[1].series_offset, 24);
    }

    #[test]
    fn test_per_window_sub_pattern() {
        let s = seq(&["aaa", "baa"]);
        let matches = Matcher::default().find(&s, "aa").unwrap();
        let found: Vec<(usize, usize)> = matches.iter().map(|m| (m.window_index, m.position)).collect();
        assert_eq!(found, vec![(0, 0), (0, 1), (1, 1)]);

        let matcher = Matcher::new(MatcherConfig::new().with_non_overlapping(true));
        let matches = matcher.find(&s, "aa").unwrap();
        let found: Vec<(usize, usize)> = matches.iter().map(|m| (m.window_index, m.position)).collect();
        assert_eq!(found, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_validation_errors() {
        let s = seq(&["ccd"]);
        let per_window = Matcher::default();
        assert!(per_window.find(&s, "ccdd").unwrap_err().is_invalid_configuration());
        assert!(per_window.find(&s, "cce").unwrap_err().is_invalid_configuration());
        assert!(per_window.find(&s, "").unwrap_err().is_invalid_configuration());

        // Long patterns are fine against the stream; they just find nothing.
        let stream = Matcher::new(MatcherConfig::new().with_scope(SearchScope::Stream));
        assert!(stream.find(&s, "ccdd").unwrap().is_empty());
        assert!(stream.find(&s, "ccz").is_err());
    }

    #[test]
    fn test_find_many_validates_all_first() {
        let s = seq(&["ccd", "aab"]);
        let matcher = Matcher::default();
        let reports = matcher.find_many(&s, &["ccd", "aab", "bbb"]).unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].matches.len(), 1);
        assert_eq!(reports[1].matches[0].window_index, 1);
        assert!(reports[2].matches.is_empty());

        assert!(matcher.find_many(&s, &["ccd", "xyz"]).is_err());
    }
}
