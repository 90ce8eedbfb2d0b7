use crate::core::breakpoints::Breakpoints;

/// SAX lower-bounding distance between symbol strings.
///
/// For words of `n` symbols summarizing windows of `w` observations,
/// `MINDIST(a, b) = sqrt(w / n) * sqrt(sum_i cell(a_i, b_i)^2)`, where
/// `cell(r, c)` is zero for equal or adjacent symbols and otherwise the gap
/// between the breakpoints that separate them. MINDIST never exceeds the
/// Euclidean distance between the PAA-approximated windows.
#[derive(Debug, Clone)]
pub struct MinDist {
    n_bins: usize,
    /// Row-major `n_bins x n_bins` cell distances.
    table: Vec<f64>,
}

impl MinDist {
    pub fn new(breakpoints: &Breakpoints) -> Self {
        let beta = breakpoints.as_slice();
        let n_bins = breakpoints.n_bins();
        let mut table = vec![0.0; n_bins * n_bins];
        for r in 0..n_bins {
            for c in 0..n_bins {
                if r.abs_diff(c) > 1 {
                    table[r * n_bins + c] = beta[r.max(c) - 1] - beta[r.min(c)];
                }
            }
        }
        Self { n_bins, table }
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Distance between two individual symbols.
    #[inline]
    pub fn cell(&self, r: u8, c: u8) -> f64 {
        self.table[r as usize * self.n_bins + c as usize]
    }

    /// MINDIST between two words summarizing windows of `window_size` values.
    ///
    /// # Panics
    /// Panics if the words differ in length or are empty.
    pub fn distance(&self, a: &[u8], b: &[u8], window_size: usize) -> f64 {
        assert_eq!(a.len(), b.len(), "MINDIST needs equal-length words");
        assert!(!a.is_empty(), "MINDIST needs non-empty words");
        let sum_sq: f64 = a
            .iter()
            .zip(b)
            .map(|(&r, &c)| {
                let d = self.cell(r, c);
                d * d
            })
            .sum();
        (window_size as f64 / a.len() as f64).sqrt() * sum_sq.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_table_four_symbols() {
        let md = MinDist::new(&Breakpoints::gaussian(4).unwrap());
        // Same or adjacent symbols are indistinguishable.
        assert_eq!(md.cell(0, 0), 0.0);
        assert_eq!(md.cell(0, 1), 0.0);
        assert_eq!(md.cell(2, 3), 0.0);
        assert!((md.cell(0, 2) - 0.6745).abs() < 1e-4);
        assert!((md.cell(0, 3) - 1.3490).abs() < 1e-4);
        assert!((md.cell(1, 3) - 0.6745).abs() < 1e-4);
        assert_eq!(md.cell(3, 0), md.cell(0, 3));
    }

    #[test]
    fn test_distance() {
        let md = MinDist::new(&Breakpoints::gaussian(4).unwrap());
        assert_eq!(md.distance(&[2, 2, 3], &[2, 2, 3], 12), 0.0);
        // Only the first symbol pair (a vs d) contributes.
        let d = md.distance(&[0, 1, 2], &[3, 1, 2], 12);
        let expected = 2.0 * md.cell(0, 3);
        assert!((d - expected).abs() < 1e-12);
    }

    #[test]
    fn test_lower_bounds_paa_distance() {
        use crate::algorithms::binner::discretize;
        use crate::algorithms::common::z_normalize;
        use crate::algorithms::paa::paa;

        let bp = Breakpoints::gaussian(6).unwrap();
        let md = MinDist::new(&bp);
        let w = 16;
        let n = 4;
        let a = z_normalize(&(0..w).map(|i| (i as f64 * 0.4).sin()).collect::<Vec<_>>());
        let b = z_normalize(&(0..w).map(|i| (i as f64 * 0.9).cos()).collect::<Vec<_>>());
        let euclid: f64 = a
            .iter()
            .zip(&b)
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt();
        let sa = discretize(&paa(&a, n).unwrap(), bp.as_slice());
        let sb = discretize(&paa(&b, n).unwrap(), bp.as_slice());
        assert!(md.distance(&sa, &sb, w) <= euclid + 1e-12);
    }
}
