//! Per-decade progress sinks.
//!
//! The engine hands every completed decade's best cost to a [`DecadeSink`].
//! A failing sink never aborts a run: the engine logs the error and counts
//! it in [`IcaResult::sink_failures`](crate::IcaResult::sink_failures).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Receiver of the best cost found after each decade.
pub trait DecadeSink {
    /// Record the best cost known after `decade` (zero-based).
    fn record(&mut self, decade: usize, best_cost: f64) -> Result<()>;
}

impl<S: DecadeSink + ?Sized> DecadeSink for &mut S {
    fn record(&mut self, decade: usize, best_cost: f64) -> Result<()> {
        (**self).record(decade, best_cost)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DecadeSink for NullSink {
    fn record(&mut self, _decade: usize, _best_cost: f64) -> Result<()> {
        Ok(())
    }
}

/// Keeps the trace in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceSink {
    entries: Vec<(usize, f64)>,
}

impl TraceSink {
    /// Empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `(decade, best_cost)` pairs in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Best costs in arrival order.
    #[must_use]
    pub fn costs(&self) -> Vec<f64> {
        self.entries.iter().map(|&(_, c)| c).collect()
    }

    /// Number of recorded decades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DecadeSink for TraceSink {
    fn record(&mut self, decade: usize, best_cost: f64) -> Result<()> {
        self.entries.push((decade, best_cost));
        Ok(())
    }
}

/// Writes one best cost per line and flushes after each line.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> WriterSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Lines written so far.
    #[must_use]
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DecadeSink for WriterSink<W> {
    fn record(&mut self, _decade: usize, best_cost: f64) -> Result<()> {
        writeln!(self.writer, "{best_cost}")?;
        self.writer.flush()?;
        self.lines += 1;
        Ok(())
    }
}
