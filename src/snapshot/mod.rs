//! Periodic fitness snapshots.
//!
//! A snapshot is one text line holding the fitness of every `stride`-th
//! individual of the (sorted) population, starting at index 0. Each value
//! is followed by `", "` and the line ends with `\n`:
//!
//! ```text
//! 45123, 30011, 28890, 27002, 25931, 24400,
//! ```
//!
//! Files are opened in append mode and never truncated, so repeated runs
//! accumulate lines in the same file.

use crate::error::Result;
use crate::species::{Individual, Population};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sink for population snapshots.
pub trait SnapshotWriter {
    /// Records one snapshot of `population`.
    fn write_snapshot(&mut self, population: &Population) -> Result<()>;
}

/// Fitness of every `stride`-th individual, starting at index 0.
///
/// # Panics
/// Panics if `stride` is zero.
pub fn sample_fitness(population: &Population, stride: usize) -> Vec<u64> {
    assert!(stride > 0, "snapshot stride must be positive");
    population
        .iter()
        .step_by(stride)
        .map(Individual::fitness)
        .collect()
}

/// Formats sampled values as one snapshot line.
pub fn format_line(values: &[u64]) -> String {
    let mut line = String::with_capacity(values.len() * 12 + 1);
    for v in values {
        line.push_str(&v.to_string());
        line.push_str(", ");
    }
    line.push('\n');
    line
}

/// Comma-separated snapshot writer over any [`Write`] sink.
///
/// # Examples
///
/// ```
/// use u_speciate::snapshot::{CsvSnapshotWriter, SnapshotWriter};
/// use u_speciate::species::Population;
///
/// let pop = Population::from_genomes(vec![vec![5], vec![3], vec![1]]);
/// let mut writer = CsvSnapshotWriter::new(Vec::new(), 2);
/// writer.write_snapshot(&pop).unwrap();
/// assert_eq!(writer.into_inner(), b"5, 1, \n");
/// ```
#[derive(Debug)]
pub struct CsvSnapshotWriter<W: Write> {
    writer: W,
    stride: usize,
    lines: usize,
}

impl<W: Write> CsvSnapshotWriter<W> {
    /// Wraps `writer`, sampling every `stride`-th individual.
    pub fn new(writer: W, stride: usize) -> Self {
        Self {
            writer,
            stride,
            lines: 0,
        }
    }

    /// Lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvSnapshotWriter<BufWriter<File>> {
    /// Opens `path` for appending, creating it if missing.
    pub fn open_append<P: AsRef<Path>>(path: P, stride: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        log::debug!("appending snapshots to {}", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file), stride))
    }
}

impl<W: Write> SnapshotWriter for CsvSnapshotWriter<W> {
    fn write_snapshot(&mut self, population: &Population) -> Result<()> {
        let values = sample_fitness(population, self.stride);
        self.writer.write_all(format_line(&values).as_bytes())?;
        self.writer.flush()?;
        self.lines += 1;
        Ok(())
    }
}
