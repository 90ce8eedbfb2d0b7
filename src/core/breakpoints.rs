use crate::core::alphabet::MAX_ALPHABET_SIZE;
use crate::error::{Result, SaxError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How breakpoints between alphabet bins are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BreakpointStrategy {
    /// Standard-normal quantiles: equiprobable bins for z-normalized data.
    #[default]
    Gaussian,
    /// Quantiles of the pooled PAA values of the series being encoded.
    Empirical,
}

/// Strictly increasing thresholds partitioning the real line into `n_bins`
/// intervals, one per alphabet symbol.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct Breakpoints {
    values: Vec<f64>,
}

impl Breakpoints {
    /// Standard-normal breakpoints for an alphabet of `n_bins` symbols.
    pub fn gaussian(n_bins: usize) -> Result<Self> {
        Ok(Self {
            values: gaussian_breakpoints(n_bins)?,
        })
    }

    /// Breakpoints at the `k / n_bins` quantiles of `values`.
    pub fn empirical(values: &[f64], n_bins: usize) -> Result<Self> {
        Ok(Self {
            values: empirical_breakpoints(values, n_bins)?,
        })
    }

    /// Use caller-supplied thresholds.
    ///
    /// They must be finite, strictly increasing, and at least one.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(SaxError::config(
                "breakpoints",
                "at least one breakpoint is required",
            ));
        }
        check_n_bins(values.len() + 1)?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SaxError::config("breakpoints", "values must be finite"));
        }
        if values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SaxError::config(
                "breakpoints",
                "values must be strictly increasing",
            ));
        }
        Ok(Self { values })
    }

    /// Number of bins these breakpoints separate.
    pub fn n_bins(&self) -> usize {
        self.values.len() + 1
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Symbol index of `value`: the number of breakpoints strictly below it.
    #[inline]
    pub fn bin(&self, value: f64) -> u8 {
        crate::algorithms::binner::symbol_index(&self.values, value)
    }
}

impl TryFrom<Vec<f64>> for Breakpoints {
    type Error = SaxError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Breakpoints::from_values(values)
    }
}

impl From<Breakpoints> for Vec<f64> {
    fn from(breakpoints: Breakpoints) -> Self {
        breakpoints.values
    }
}

/// Standard normal quantile function (probit / inverse CDF).
///
/// Uses Peter Acklam's rational approximation with relative error < 1.15e-9.
pub fn norm_ppf(p: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    #[allow(clippy::excessive_precision)]
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    #[allow(clippy::excessive_precision)]
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    #[allow(clippy::excessive_precision)]
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Breakpoints from standard normal quantiles at `k / n_bins`, `k = 1..n_bins`.
///
/// With `n_bins = 4` this yields approximately `[-0.6745, 0.0, 0.6745]`.
pub fn gaussian_breakpoints(n_bins: usize) -> Result<Vec<f64>> {
    check_n_bins(n_bins)?;
    let n = n_bins as f64;
    let mut values: Vec<f64> = (1..n_bins).map(|k| norm_ppf(k as f64 / n)).collect();
    enforce_strictly_increasing(&mut values);
    Ok(values)
}

/// Breakpoints from the empirical `k / n_bins` quantiles of `values`.
///
/// Quantiles interpolate linearly between order statistics. Ties that would
/// repeat a breakpoint are nudged up to the next representable `f64`, so the
/// result is always strictly increasing.
pub fn empirical_breakpoints(values: &[f64], n_bins: usize) -> Result<Vec<f64>> {
    check_n_bins(n_bins)?;
    if values.is_empty() {
        return Err(SaxError::InsufficientData {
            required: 1,
            got: 0,
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SaxError::InvalidSeries(
            "empirical breakpoints require finite values".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = n_bins as f64;
    let mut bps: Vec<f64> = (1..n_bins)
        .map(|k| quantile_sorted(&sorted, k as f64 / n))
        .collect();
    enforce_strictly_increasing(&mut bps);
    Ok(bps)
}

fn check_n_bins(n_bins: usize) -> Result<()> {
    if n_bins < 2 {
        return Err(SaxError::config(
            "n_bins",
            format!("must be >= 2, got {n_bins}"),
        ));
    }
    if n_bins > MAX_ALPHABET_SIZE {
        return Err(SaxError::config(
            "n_bins",
            format!("must be <= {MAX_ALPHABET_SIZE}, got {n_bins}"),
        ));
    }
    Ok(())
}

/// Linear-interpolation quantile of an ascending, non-empty, finite slice.
///
/// The result is always finite and lies between the two order statistics it
/// interpolates.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = pos - lo as f64;
    let (a, b) = (sorted[lo], sorted[hi]);
    if frac == 0.0 {
        return a;
    }
    let span = b - a;
    let v = if span.is_finite() {
        a + frac * span
    } else {
        // The gap overflows; weight the endpoints instead.
        a * (1.0 - frac) + b * frac
    };
    v.clamp(a, b)
}

/// Make finite, non-decreasing `values` strictly increasing by the smallest
/// possible moves, staying within the finite range.
fn enforce_strictly_increasing(values: &mut [f64]) {
    for i in 1..values.len() {
        if values[i] <= values[i - 1] {
            values[i] = next_up(values[i - 1]);
        }
    }
    // Ties at the top of the range cannot move up; push them down instead.
    if let Some(last) = values.last_mut() {
        if *last == f64::INFINITY {
            *last = f64::MAX;
            for i in (0..values.len() - 1).rev() {
                if values[i] >= values[i + 1] {
                    values[i] = next_down(values[i + 1]);
                }
            }
        }
    }
}

/// Smallest `f64` strictly greater than `x`. `f64::MAX` steps to infinity.
fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Largest `f64` strictly less than `x`.
fn next_down(x: f64) -> f64 {
    -next_up(-x)
}
