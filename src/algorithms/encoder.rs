use crate::algorithms::binner::discretize_into;
use crate::algorithms::common::z_normalize_into;
use crate::algorithms::paa::{paa_into, validate_segments};
use crate::algorithms::windower::{window_count, Windows};
use crate::core::alphabet::Alphabet;
use crate::core::breakpoints::{BreakpointStrategy, Breakpoints};
use crate::core::series::Series;
use crate::core::symbolic::{SymbolWord, SymbolicSequence};
use crate::error::{Result, SaxError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-window preprocessing applied before PAA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Normalization {
    /// Use raw window values.
    #[default]
    None,
    /// Z-normalize each window (zero mean, unit variance). Constant windows
    /// become all zeros.
    ZNormalize,
}

/// Configuration for SAX encoding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Length of each window.
    pub window_size: usize,
    /// Step between window starts. `None` means `window_size` (non-overlapping).
    #[cfg_attr(feature = "serde", serde(default))]
    pub stride: Option<usize>,
    /// PAA output length per window (symbols per word).
    pub n_segments: usize,
    /// Alphabet size.
    pub n_bins: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: BreakpointStrategy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub normalization: Normalization,
}

impl EncoderConfig {
    pub fn new(window_size: usize, n_segments: usize, n_bins: usize) -> Self {
        Self {
            window_size,
            stride: None,
            n_segments,
            n_bins,
            strategy: BreakpointStrategy::Gaussian,
            normalization: Normalization::None,
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }

    pub fn with_strategy(mut self, strategy: BreakpointStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Effective stride between window starts.
    pub fn stride(&self) -> usize {
        self.stride.unwrap_or(self.window_size)
    }

    /// Check that all parameters are mutually consistent.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(SaxError::config("window_size", "must be >= 1, got 0"));
        }
        if self.stride() == 0 {
            return Err(SaxError::config("stride", "must be >= 1, got 0"));
        }
        validate_segments(self.window_size, self.n_segments)?;
        if self.n_bins < 2 {
            return Err(SaxError::config(
                "n_bins",
                format!("must be >= 2, got {}", self.n_bins),
            ));
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    /// Twelve-observation windows summarized as three symbols over `a..=d`.
    fn default() -> Self {
        Self::new(12, 3, 4)
    }
}

/// SAX encoder: windows, PAA, then binning.
///
/// All configuration is validated in the constructor. Gaussian breakpoints
/// are fixed there too; empirical breakpoints are derived per series from the
/// pooled PAA values of all its windows, before any symbol is emitted.
///
/// # Examples
///
/// ```
/// use sax_rs::{Encoder, EncoderConfig, Series};
///
/// let series = Series::new((0..36).map(|i| (i as f64 * 0.3).sin()).collect()).unwrap();
/// let encoder = Encoder::new(EncoderConfig::new(12, 3, 4)).unwrap();
/// let seq = encoder.encode(&series).unwrap();
/// assert_eq!(seq.len(), 3);
/// assert!(seq.iter().all(|w| w.text.len() == 3));
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
    config: EncoderConfig,
    alphabet: Alphabet,
    gaussian: Option<Breakpoints>,
}

impl Encoder {
    /// Create an encoder over the first `n_bins` Latin letters.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        let alphabet = Alphabet::latin(config.n_bins)?;
        Self::build(config, alphabet)
    }

    /// Create an encoder with a custom alphabet of exactly `n_bins` symbols.
    pub fn with_alphabet(config: EncoderConfig, alphabet: Alphabet) -> Result<Self> {
        config.validate()?;
        if alphabet.len() != config.n_bins {
            return Err(SaxError::config(
                "alphabet",
                format!(
                    "has {} symbols but n_bins is {}",
                    alphabet.len(),
                    config.n_bins
                ),
            ));
        }
        Self::build(config, alphabet)
    }

    fn build(config: EncoderConfig, alphabet: Alphabet) -> Result<Self> {
        let gaussian = match config.strategy {
            BreakpointStrategy::Gaussian => Some(Breakpoints::gaussian(config.n_bins)?),
            BreakpointStrategy::Empirical => None,
        };
        Ok(Self {
            config,
            alphabet,
            gaussian,
        })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encode a series into one word per complete window.
    ///
    /// A series shorter than `window_size` yields an empty sequence.
    pub fn encode(&self, series: &Series) -> Result<SymbolicSequence> {
        let ts = series.as_slice();
        let n_seg = self.config.n_segments;
        let paa = self.reduce(ts)?;
        let n_windows = paa.len() / n_seg;

        let breakpoints = match (&self.gaussian, n_windows) {
            (Some(bp), _) => Some(bp.clone()),
            (None, 0) => None,
            // Two-pass barrier: every PAA value is known before binning starts.
            (None, _) => Some(Breakpoints::empirical(&paa, self.config.n_bins)?),
        };

        let mut words = Vec::with_capacity(n_windows);
        if let Some(bp) = &breakpoints {
            tracing::debug!(
                strategy = ?self.config.strategy,
                breakpoints = ?bp.as_slice(),
                "binning PAA values"
            );
            let mut symbols = vec![0u8; paa.len()];
            discretize_into(&paa, bp.as_slice(), &mut symbols);

            let stride = self.config.stride();
            for (i, chunk) in symbols.chunks_exact(n_seg).enumerate() {
                let text = self.alphabet.render(chunk);
                tracing::trace!(window = i, offset = i * stride, word = %text);
                words.push(SymbolWord {
                    window_index: i,
                    offset: i * stride,
                    symbols: chunk.to_vec(),
                    text,
                });
            }
        }

        tracing::debug!(
            series_len = ts.len(),
            n_words = words.len(),
            "encoded series"
        );

        Ok(SymbolicSequence::new(
            words,
            self.alphabet.clone(),
            breakpoints,
            self.config.window_size,
            n_seg,
        ))
    }

    /// Validate raw values as a [`Series`] and encode them.
    pub fn encode_values(&self, values: &[f64]) -> Result<SymbolicSequence> {
        self.encode(&Series::from_slice(values)?)
    }

    /// Encode several independent series.
    ///
    /// With the `parallel` feature the series are encoded concurrently.
    pub fn encode_batch(&self, series: &[Series]) -> Result<Vec<SymbolicSequence>> {
        #[cfg(feature = "parallel")]
        {
            series.par_iter().map(|s| self.encode(s)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            series.iter().map(|s| self.encode(s)).collect()
        }
    }

    /// PAA vectors of every complete window, in window order.
    pub fn paa_vectors(&self, series: &Series) -> Result<Vec<Vec<f64>>> {
        let paa = self.reduce(series.as_slice())?;
        Ok(paa
            .chunks_exact(self.config.n_segments)
            .map(<[f64]>::to_vec)
            .collect())
    }

    /// First pass: PAA values of all windows, flattened window-major.
    fn reduce(&self, ts: &[f64]) -> Result<Vec<f64>> {
        let w = self.config.window_size;
        let stride = self.config.stride();
        let n_seg = self.config.n_segments;
        let windows = Windows::new(ts, w, stride)?;
        let n_windows = windows.len();
        debug_assert_eq!(n_windows, window_count(ts.len(), w, stride));

        tracing::debug!(
            n_windows,
            window_size = w,
            stride,
            n_segments = n_seg,
            "reducing windows"
        );

        let mut paa = vec![0.0; n_windows * n_seg];
        let normalization = self.config.normalization;

        #[cfg(feature = "parallel")]
        {
            paa.par_chunks_mut(n_seg).enumerate().for_each_init(
                || vec![0.0; w],
                |scratch, (i, out)| {
                    let offset = i * stride;
                    reduce_window(&ts[offset..offset + w], out, normalization, scratch);
                },
            );
        }
        #[cfg(not(feature = "parallel"))]
        {
            let mut scratch = vec![0.0; w];
            for (window, out) in windows.zip(paa.chunks_mut(n_seg)) {
                reduce_window(window.values, out, normalization, &mut scratch);
            }
        }

        Ok(paa)
    }
}

fn reduce_window(values: &[f64], out: &mut [f64], normalization: Normalization, scratch: &mut [f64]) {
    match normalization {
        Normalization::None => paa_into(values, out),
        Normalization::ZNormalize => {
            z_normalize_into(values, scratch);
            paa_into(scratch, out);
        }
    }
}
