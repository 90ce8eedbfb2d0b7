//! Trend search over daily closing prices.
//!
//! Fetches 60 days of closing prices from a simulated quote service, encodes
//! each 12-day window as a SAX word over {a, b, c, d}, then looks for a
//! "bullish" word in the raw and the z-normalized encodings.
//!
//! Run with: cargo run --release --example trend_search

use std::cell::Cell;
use std::time::Duration;

use sax_rs::{
    DataSource, EncoderConfig, FnSource, MatcherConfig, Normalization, RetryingSource,
    SaxPipeline,
};

/// Days 1-12 up, 13-24 down, 25-36 sideways, 37-48 up, 49-60 down.
const CLOSING_PRICES: [f64; 60] = [
    100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 107.0, 108.0, 109.0, 110.0, 111.0, //
    112.0, 111.0, 110.0, 109.0, 108.0, 107.0, 106.0, 105.0, 104.0, 103.0, 102.0, 101.0, //
    100.0, 100.0, 101.0, 101.0, 100.0, 100.0, 101.0, 101.0, 100.0, 100.0, 101.0, 101.0, //
    102.0, 103.0, 104.0, 105.0, 106.0, 107.0, 108.0, 109.0, 110.0, 111.0, 112.0, 113.0, //
    114.0, 113.0, 112.0, 111.0, 110.0, 109.0, 108.0, 107.0, 106.0, 105.0, 104.0, 103.0,
];

const WINDOW_SIZE: usize = 12;

fn main() -> sax_rs::Result<()> {
    tracing_subscriber::fmt::init();

    // The quote service times out once before answering.
    let calls = Cell::new(0);
    let quotes = FnSource::new(|| {
        calls.set(calls.get() + 1);
        if calls.get() == 1 {
            Err("quote service timed out")
        } else {
            Ok(CLOSING_PRICES.to_vec())
        }
    });
    let source = RetryingSource::new(quotes).with_backoff(Duration::from_millis(100));

    let series = source.fetch()?;
    println!("Fetched {} days of closing prices", series.len());
    println!("{:>4}  {:>8}", "Day", "Close");
    for (day, price) in series.as_slice().iter().take(15).enumerate() {
        println!("{:>4}  {:>8.2}", day + 1, price);
    }
    println!("\n{}\n", "=".repeat(50));

    // Raw prices, no per-window normalization.
    let raw = SaxPipeline::new(
        EncoderConfig::new(WINDOW_SIZE, 3, 4),
        MatcherConfig::new(),
    )?;
    // Shape only: each window z-normalized, four symbols per window.
    let zn = SaxPipeline::new(
        EncoderConfig::new(WINDOW_SIZE, 4, 4).with_normalization(Normalization::ZNormalize),
        MatcherConfig::tolerant(1),
    )?;

    for (label, pipeline, target) in [
        ("raw prices", &raw, "ccd"),
        ("z-normalized windows", &zn, "abcd"),
    ] {
        let report = pipeline.run(&series, &[target])?;

        println!("--- SAX words per {WINDOW_SIZE}-day window ({label}) ---");
        for word in &report.sequence {
            println!("Window starting on day {:>2}: '{}'", word.offset + 1, word);
        }

        let found = &report.matches[0].matches;
        println!("\nSearching for '{target}':");
        if found.is_empty() {
            println!("The pattern '{target}' was not found.");
        } else {
            for m in found {
                println!(
                    "- window starting on day {} ('{}', {} mismatch(es))",
                    m.series_offset + 1,
                    report.sequence.words()[m.window_index].text,
                    m.distance
                );
            }
        }
        println!();
    }

    Ok(())
}
