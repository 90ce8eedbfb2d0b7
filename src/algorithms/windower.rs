use crate::error::{Result, SaxError};

/// A fixed-length slice of a series, identified by where it starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    /// Ordinal of this window among all windows of the series.
    pub index: usize,
    /// Offset of the first observation in the series.
    pub offset: usize,
    pub values: &'a [f64],
}

/// Number of complete windows of length `window_size` taken every `stride`
/// observations from a series of length `len`.
///
/// Returns `max(0, floor((len - window_size) / stride) + 1)`.
pub fn window_count(len: usize, window_size: usize, stride: usize) -> usize {
    if window_size == 0 || stride == 0 || len < window_size {
        return 0;
    }
    (len - window_size) / stride + 1
}

/// Lazy iterator over the complete windows of a series.
///
/// Tail windows that would run past the end are dropped. The iterator is
/// `Clone`, so a sequence of windows can be restarted cheaply.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    ts: &'a [f64],
    window_size: usize,
    stride: usize,
    next: usize,
    count: usize,
}

impl<'a> Windows<'a> {
    /// Create the window iterator.
    ///
    /// Fails with `InvalidConfiguration` when `window_size` or `stride` is zero.
    /// A series shorter than `window_size` yields no windows.
    pub fn new(ts: &'a [f64], window_size: usize, stride: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(SaxError::config("window_size", "must be >= 1, got 0"));
        }
        if stride == 0 {
            return Err(SaxError::config("stride", "must be >= 1, got 0"));
        }
        Ok(Self {
            ts,
            window_size,
            stride,
            next: 0,
            count: window_count(ts.len(), window_size, stride),
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        let offset = index * self.stride;
        self.next += 1;
        Some(Window {
            index,
            offset,
            values: &self.ts[offset..offset + self.window_size],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows<'_> {}

impl std::iter::FusedIterator for Windows<'_> {}
