use proptest::prelude::*;
use sax_rs::{
    empirical_breakpoints, gaussian_breakpoints, paa, scan, window_count, Alphabet,
    BreakpointStrategy, Breakpoints, Encoder, EncoderConfig, MatchMode, Matcher, MatcherConfig,
    Normalization, SymbolicSequence, Windows,
};

fn finite_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3..1.0e3f64, 1..max_len)
}

proptest! {
    #[test]
    fn windows_cover_exactly_window_count(
        ts in finite_series(200),
        w in 1usize..40,
        s in 1usize..10,
    ) {
        let windows: Vec<_> = Windows::new(&ts, w, s).unwrap().collect();
        prop_assert_eq!(windows.len(), window_count(ts.len(), w, s));
        for (i, win) in windows.iter().enumerate() {
            prop_assert_eq!(win.index, i);
            prop_assert_eq!(win.offset, i * s);
            prop_assert_eq!(win.values.len(), w);
            prop_assert!(win.offset + w <= ts.len());
        }
    }

    #[test]
    fn paa_preserves_window_mean_for_even_splits(
        seg in 1usize..8,
        per in 1usize..6,
        seed in finite_series(64),
    ) {
        let w = seg * per;
        let window: Vec<f64> = (0..w).map(|i| seed[i % seed.len()]).collect();
        let reduced = paa(&window, seg).unwrap();
        prop_assert_eq!(reduced.len(), seg);
        let mean_w = window.iter().sum::<f64>() / w as f64;
        let mean_r = reduced.iter().sum::<f64>() / seg as f64;
        prop_assert!((mean_w - mean_r).abs() < 1e-9);
    }

    #[test]
    fn paa_segments_stay_within_window_range(
        window in finite_series(64),
        n in 1usize..64,
    ) {
        let n = n.min(window.len());
        let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in paa(&window, n).unwrap() {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }

    #[test]
    fn gaussian_breakpoints_strictly_increasing(n in 2usize..=64) {
        let bps = gaussian_breakpoints(n).unwrap();
        prop_assert_eq!(bps.len(), n - 1);
        prop_assert!(bps.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn empirical_breakpoints_strictly_increasing(
        values in prop::collection::vec(-5i32..5, 1..50),
        n in 2usize..12,
    ) {
        // Small integer range forces plenty of ties.
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let bps = empirical_breakpoints(&values, n).unwrap();
        prop_assert_eq!(bps.len(), n - 1);
        prop_assert!(bps.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn binning_is_monotone(
        a in -10.0..10.0f64,
        b in -10.0..10.0f64,
        n in 2usize..26,
    ) {
        let bp = Breakpoints::gaussian(n).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(bp.bin(lo) <= bp.bin(hi));
        prop_assert!((bp.bin(hi) as usize) < n);
    }

    #[test]
    fn encoded_shape_matches_configuration(
        ts in finite_series(300),
        w in 2usize..30,
        n_bins in 2usize..10,
        stride in 1usize..8,
        seg_frac in 0.0..1.0f64,
        empirical in any::<bool>(),
        znorm in any::<bool>(),
    ) {
        let n_seg = 1 + ((w - 1) as f64 * seg_frac) as usize;
        let config = EncoderConfig::new(w, n_seg, n_bins)
            .with_stride(stride)
            .with_strategy(if empirical { BreakpointStrategy::Empirical } else { BreakpointStrategy::Gaussian })
            .with_normalization(if znorm { Normalization::ZNormalize } else { Normalization::None });
        let seq = Encoder::new(config).unwrap().encode_values(&ts).unwrap();

        prop_assert_eq!(seq.len(), window_count(ts.len(), w, stride));
        let alphabet = Alphabet::latin(n_bins).unwrap();
        for (i, word) in seq.iter().enumerate() {
            prop_assert_eq!(word.window_index, i);
            prop_assert_eq!(word.offset, i * stride);
            prop_assert_eq!(word.symbols.len(), n_seg);
            prop_assert!(word.symbols.iter().all(|&s| (s as usize) < n_bins));
            prop_assert_eq!(&word.text, &alphabet.render(&word.symbols));
        }
    }

    #[test]
    fn tolerant_matches_are_superset_of_exact(
        haystack in prop::collection::vec(0u8..3, 0..60),
        needle in prop::collection::vec(0u8..3, 1..5),
        k in 0usize..3,
    ) {
        let exact = scan(&haystack, &needle, MatchMode::Exact, false);
        let tolerant = scan(&haystack, &needle, MatchMode::Tolerant { max_mismatches: k }, false);
        let tolerant_pos: Vec<usize> = tolerant.iter().map(|h| h.position).collect();
        for hit in &exact {
            prop_assert!(tolerant_pos.contains(&hit.position));
        }
        prop_assert!(tolerant.iter().all(|h| h.distance <= k));
    }

    #[test]
    fn non_overlapping_hits_are_disjoint(
        haystack in prop::collection::vec(0u8..2, 0..80),
        needle in prop::collection::vec(0u8..2, 1..4),
    ) {
        let hits = scan(&haystack, &needle, MatchMode::Exact, true);
        for pair in hits.windows(2) {
            prop_assert!(pair[1].position >= pair[0].position + needle.len());
        }
    }

    #[test]
    fn per_window_exact_finds_every_equal_word(
        picks in prop::collection::vec(0usize..3, 1..20),
    ) {
        let vocab = ["abc", "cba", "bbd"];
        let words: Vec<&str> = picks.iter().map(|&i| vocab[i]).collect();
        let seq = SymbolicSequence::from_words(Alphabet::latin(4).unwrap(), 12, &words).unwrap();
        let found = Matcher::new(MatcherConfig::new()).find(&seq, "cba").unwrap();
        let expected: Vec<usize> = picks
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == 1)
            .map(|(i, _)| i)
            .collect();
        let got: Vec<usize> = found.iter().map(|m| m.window_index).collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn empty_input_yields_empty_sequence() {
    let encoder = Encoder::new(EncoderConfig::new(12, 3, 4)).unwrap();
    let seq = encoder.encode_values(&[1.0; 11]).unwrap();
    assert!(seq.is_empty());
    assert!(Matcher::default().find(&seq, "abc").unwrap().is_empty());
}
