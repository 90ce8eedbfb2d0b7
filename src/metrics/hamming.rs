/// Number of positions at which two equal-length symbol slices differ.
///
/// # Panics
/// Panics if the slices have different lengths.
pub fn hamming(a: &[u8], b: &[u8]) -> usize {
    assert_eq!(a.len(), b.len(), "Hamming distance needs equal lengths");
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Hamming distance if it is at most `max_mismatches`, `None` otherwise.
///
/// Stops scanning as soon as the bound is exceeded.
#[inline]
pub fn hamming_within(a: &[u8], b: &[u8], max_mismatches: usize) -> Option<usize> {
    debug_assert_eq!(a.len(), b.len());
    let mut mismatches = 0;
    for (x, y) in a.iter().zip(b) {
        if x != y {
            mismatches += 1;
            if mismatches > max_mismatches {
                return None;
            }
        }
    }
    Some(mismatches)
}
