use crate::algorithms::common::mean;
use crate::error::{Result, SaxError};

/// Index range `[start, end)` covered by PAA segment `i` of a window of
/// length `w` split into `n_segments` parts.
///
/// `start = floor(i * w / n_segments)`, `end = floor((i + 1) * w / n_segments)`.
/// Consecutive segments tile `0..w` with no gap or overlap, and their sizes
/// differ by at most one element.
#[inline]
pub fn segment_bounds(w: usize, n_segments: usize, i: usize) -> (usize, usize) {
    (i * w / n_segments, (i + 1) * w / n_segments)
}

/// Check that a window of length `w` can be reduced to `n_segments` values.
pub fn validate_segments(w: usize, n_segments: usize) -> Result<()> {
    if n_segments == 0 {
        return Err(SaxError::config("n_segments", "must be >= 1, got 0"));
    }
    if n_segments > w {
        return Err(SaxError::config(
            "n_segments",
            format!("must be <= window_size ({w}), got {n_segments}"),
        ));
    }
    Ok(())
}

/// Piecewise Aggregate Approximation of one window.
///
/// Returns `n_segments` means, segment `i` averaging the elements in
/// [`segment_bounds`]`(window.len(), n_segments, i)`.
///
/// Fails with `InvalidConfiguration` if `n_segments` is zero or exceeds the
/// window length.
pub fn paa(window: &[f64], n_segments: usize) -> Result<Vec<f64>> {
    validate_segments(window.len(), n_segments)?;
    let mut out = vec![0.0; n_segments];
    paa_into(window, &mut out);
    Ok(out)
}

/// Non-allocating PAA: writes `out.len()` segment means into `out`.
///
/// Caller must ensure `1 <= out.len() <= window.len()`
/// (see [`validate_segments`]).
pub fn paa_into(window: &[f64], out: &mut [f64]) {
    let w = window.len();
    let n = out.len();
    debug_assert!(n >= 1 && n <= w, "invalid PAA segment count");

    // Identity when every segment holds exactly one element
    if n == w {
        out.copy_from_slice(window);
        return;
    }

    for (i, slot) in out.iter_mut().enumerate() {
        let (start, end) = segment_bounds(w, n, i);
        *slot = mean(&window[start..end]);
    }
}
