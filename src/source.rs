//! Data acquisition boundary.
//!
//! The encoder only ever sees a [`Series`]. Where the numbers come from (a
//! market data API, a file, a simulation) lives behind [`DataSource`], so
//! sources can be swapped without touching the pipeline.

use std::time::Duration;

use crate::core::series::Series;
use crate::error::{Result, SaxError};

/// Something that can produce a regularly sampled series on demand.
pub trait DataSource {
    fn fetch(&self) -> Result<Series>;
}

/// A source serving a fixed set of observations.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    values: Vec<f64>,
}

impl InMemorySource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl DataSource for InMemorySource {
    fn fetch(&self) -> Result<Series> {
        Series::new(self.values.clone())
    }
}

/// A source backed by a closure returning raw observations.
///
/// Closure errors are reported as [`SaxError::Source`].
pub struct FnSource<F> {
    fetch: F,
}

impl<F, E> FnSource<F>
where
    F: Fn() -> std::result::Result<Vec<f64>, E>,
    E: std::fmt::Display,
{
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F, E> DataSource for FnSource<F>
where
    F: Fn() -> std::result::Result<Vec<f64>, E>,
    E: std::fmt::Display,
{
    fn fetch(&self) -> Result<Series> {
        let values = (self.fetch)().map_err(|e| SaxError::Source(e.to_string()))?;
        Series::new(values)
    }
}

/// Retries a flaky source with exponential backoff.
///
/// Attempt `i` (0-based) that fails with [`SaxError::Source`] is followed by
/// a pause of `backoff * 2^i` before the next attempt. Other errors, such as
/// an invalid series, are returned immediately.
pub struct RetryingSource<S> {
    inner: S,
    max_attempts: usize,
    backoff: Duration,
}

impl<S: DataSource> RetryingSource<S> {
    /// Five attempts starting from a one-second pause.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            max_attempts: 5,
            backoff: Duration::from_secs(1),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl<S: DataSource> DataSource for RetryingSource<S> {
    fn fetch(&self) -> Result<Series> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch() {
                Ok(series) => return Ok(series),
                Err(SaxError::Source(reason)) if attempt + 1 < self.max_attempts => {
                    let pause = self.backoff * 2u32.saturating_pow(attempt as u32);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        ?pause,
                        %reason,
                        "fetch failed, retrying"
                    );
                    std::thread::sleep(pause);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
