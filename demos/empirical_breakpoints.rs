//! Gaussian vs empirical breakpoints on skewed data.
//!
//! Raw (un-normalized) prices concentrate in a narrow band far from zero, so
//! Gaussian breakpoints put every segment in the top bin. Breakpoints drawn
//! from the data's own PAA quantiles spread the symbols back out.
//!
//! Run with: cargo run --release --example empirical_breakpoints

use sax_rs::{
    BreakpointStrategy, DataSource, Encoder, EncoderConfig, InMemorySource, MatcherConfig,
    SaxPipeline,
};

fn main() -> sax_rs::Result<()> {
    tracing_subscriber::fmt::init();

    // A geometric random-walk-like price path with a strong drift.
    let mut price = 50.0;
    let prices: Vec<f64> = (0..240usize)
        .map(|i| {
            let shock = ((i.wrapping_mul(2_654_435_761) >> 7) % 1000) as f64 / 1000.0 - 0.45;
            price *= 1.0 + 0.01 * shock;
            price
        })
        .collect();
    let source = InMemorySource::new(prices);
    let series = source.fetch()?;

    for strategy in [BreakpointStrategy::Gaussian, BreakpointStrategy::Empirical] {
        let config = EncoderConfig::new(20, 4, 6).with_strategy(strategy);
        let seq = Encoder::new(config)?.encode(&series)?;

        println!("--- {strategy:?} ---");
        if let Some(bp) = seq.breakpoints() {
            let formatted: Vec<String> = bp.as_slice().iter().map(|b| format!("{b:.3}")).collect();
            println!("breakpoints: [{}]", formatted.join(", "));
        }
        let mut counts = vec![0usize; seq.alphabet().len()];
        for s in seq.stream() {
            counts[s as usize] += 1;
        }
        for (symbol, count) in seq.alphabet().symbols().iter().zip(&counts) {
            println!("  {symbol}: {}", "#".repeat(*count));
        }
        println!("words: {}\n", seq.strings().join(" "));
    }

    // The same comparison through the pipeline, looking for a late rally.
    let pipeline = SaxPipeline::new(
        EncoderConfig::new(20, 4, 6).with_strategy(BreakpointStrategy::Empirical),
        MatcherConfig::tolerant(1),
    )?;
    let report = pipeline.run_source(&source, &["cdef"])?;
    for m in &report.matches[0].matches {
        println!(
            "rally-like window at day {} ('{}', distance {})",
            m.series_offset + 1,
            m.symbols,
            m.distance
        );
    }

    Ok(())
}
