pub mod algorithms;
pub mod core;
pub mod error;
pub mod metrics;
pub mod source;

pub use crate::algorithms::encoder::{Encoder, EncoderConfig, Normalization};
pub use crate::algorithms::matcher::{
    scan, Hit, Match, MatchMode, Matcher, MatcherConfig, PatternMatches, SearchScope,
};
pub use crate::algorithms::paa::paa;
pub use crate::algorithms::windower::{window_count, Window, Windows};
pub use crate::core::alphabet::Alphabet;
pub use crate::core::breakpoints::{
    empirical_breakpoints, gaussian_breakpoints, BreakpointStrategy, Breakpoints,
};
pub use crate::core::series::Series;
pub use crate::core::symbolic::{SymbolWord, SymbolicSequence};
pub use crate::error::{Result, SaxError};
pub use crate::metrics::hamming::hamming;
pub use crate::metrics::mindist::MinDist;
pub use crate::source::{DataSource, FnSource, InMemorySource, RetryingSource};

/// Output of one [`SaxPipeline`] run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// The symbolic sequence of the series. Empty when the series was
    /// shorter than one window.
    pub sequence: SymbolicSequence,
    /// One report per requested pattern, in request order.
    pub matches: Vec<PatternMatches>,
}

/// High-level facade: encode a series, then search it for patterns.
///
/// Both configurations are fixed at construction; every run is independent.
///
/// # Examples
///
/// ```
/// use sax_rs::{EncoderConfig, MatcherConfig, SaxPipeline, Series};
///
/// let prices: Vec<f64> = (0..36).map(|i| (i as f64 * 0.2).sin()).collect();
/// let pipeline = SaxPipeline::new(EncoderConfig::new(12, 3, 4), MatcherConfig::new()).unwrap();
/// let report = pipeline.run(&Series::new(prices).unwrap(), &["ccd"]).unwrap();
/// assert_eq!(report.sequence.len(), 3);
/// assert_eq!(report.matches.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SaxPipeline {
    encoder: Encoder,
    matcher: Matcher,
}

impl SaxPipeline {
    pub fn new(encoder: EncoderConfig, matcher: MatcherConfig) -> Result<Self> {
        Ok(Self {
            encoder: Encoder::new(encoder)?,
            matcher: Matcher::new(matcher),
        })
    }

    /// Build from an already-constructed encoder and matcher.
    pub fn from_parts(encoder: Encoder, matcher: Matcher) -> Self {
        Self { encoder, matcher }
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Encode `series` and search it for every pattern.
    ///
    /// Patterns are validated against the encoder's alphabet and word length
    /// before the series is encoded.
    pub fn run<S: AsRef<str>>(&self, series: &Series, patterns: &[S]) -> Result<PipelineReport> {
        let n_segments = self.encoder.config().n_segments;
        for p in patterns {
            self.matcher
                .validate_pattern(self.encoder.alphabet(), n_segments, p.as_ref())?;
        }
        let sequence = self.encoder.encode(series)?;
        let matches = self.matcher.find_many(&sequence, patterns)?;
        Ok(PipelineReport { sequence, matches })
    }

    /// Fetch a series from `source`, then [`run`](Self::run) on it.
    pub fn run_source<S: AsRef<str>>(
        &self,
        source: &dyn DataSource,
        patterns: &[S],
    ) -> Result<PipelineReport> {
        let series = source.fetch()?;
        self.run(&series, patterns)
    }
}
