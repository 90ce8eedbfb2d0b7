//! Exact vs tolerant matching, per window and across the symbol stream.
//!
//! A noisy sine wave is encoded with overlapping windows. The same motif is
//! then searched for in four ways, and MINDIST is used to rank the tolerant
//! hits by how far they could really be from the motif.
//!
//! Run with: cargo run --release --example tolerant_matching

use sax_rs::{
    Encoder, EncoderConfig, Matcher, MatcherConfig, MinDist, Normalization, SearchScope, Series,
};

fn main() -> sax_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let n = 400;
    let period = 40.0;
    let ts: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            let noise = ((i * 7919) % 101) as f64 / 101.0 - 0.5;
            (t * std::f64::consts::TAU / period).sin() + 0.2 * noise
        })
        .collect();
    let series = Series::new(ts)?;

    let encoder = Encoder::new(
        EncoderConfig::new(40, 5, 5)
            .with_stride(10)
            .with_normalization(Normalization::ZNormalize),
    )?;
    let seq = encoder.encode(&series)?;
    println!("{} windows, stream: {}", seq.len(), seq.stream_text());

    let reduced = seq.numerosity_reduced();
    println!("{} distinct consecutive words after numerosity reduction\n", reduced.len());

    let motif = seq.words()[0].text.clone();
    println!("Motif: '{motif}'\n");

    let searches = [
        ("per-window exact", MatcherConfig::new()),
        ("per-window tolerant(1)", MatcherConfig::tolerant(1)),
        (
            "stream exact, non-overlapping",
            MatcherConfig::new()
                .with_scope(SearchScope::Stream)
                .with_non_overlapping(true),
        ),
        (
            "stream tolerant(1)",
            MatcherConfig::tolerant(1).with_scope(SearchScope::Stream),
        ),
    ];

    for (label, config) in searches {
        let matches = Matcher::new(config).find(&seq, &motif)?;
        println!("{label}: {} match(es)", matches.len());
        for m in matches.iter().take(5) {
            println!(
                "  pos {:>3}  window {:>2}  segment {}  offset {:>3}  '{}'  d={}",
                m.position, m.window_index, m.segment, m.series_offset, m.symbols, m.distance
            );
        }
    }

    if let Some(bp) = seq.breakpoints() {
        let mindist = MinDist::new(bp);
        let target = &seq.words()[0].symbols;
        let mut ranked: Vec<(usize, f64)> = seq
            .iter()
            .map(|w| (w.window_index, mindist.distance(target, &w.symbols, seq.window_size())))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        println!("\nWindows ranked by MINDIST to the motif:");
        for (window, d) in ranked.iter().take(8) {
            println!("  window {window:>2}  mindist {d:.4}");
        }
    }

    Ok(())
}
