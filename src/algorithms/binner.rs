/// Map a value to its alphabet bin.
///
/// Returns the number of breakpoints strictly less than `value`, which lies
/// in `0..=breakpoints.len()`. Equivalent to
/// `numpy.searchsorted(breakpoints, value, side='left')`.
#[inline]
pub fn symbol_index(breakpoints: &[f64], value: f64) -> u8 {
    let idx = breakpoints.partition_point(|&b| b < value);
    idx.min(u8::MAX as usize) as u8
}

/// Discretize every value of `values` into bin indices.
pub fn discretize(values: &[f64], breakpoints: &[f64]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| symbol_index(breakpoints, v))
        .collect()
}

/// Non-allocating variant of [`discretize`].
pub fn discretize_into(values: &[f64], breakpoints: &[f64], out: &mut [u8]) {
    debug_assert_eq!(values.len(), out.len());
    for (slot, &v) in out.iter_mut().zip(values) {
        *slot = symbol_index(breakpoints, v);
    }
}
