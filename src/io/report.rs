//! Final-result reporting.

use crate::astar::AStarResult;
use crate::dfs::DfsResult;
use crate::error::TspResult;
use crate::exhaustive::ExhaustiveResult;
use crate::model::{SearchStatus, Tour};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome handed to a [`ResultSink`].
///
/// Renders as:
///
/// ```text
/// Best cost found: 80
/// Best route found: 0 1 3 2 0
/// Execution time: 0.000123 seconds
/// ```
///
/// A search stopped by its deadline or cancellation appends the status to
/// the cost line, e.g. `Best cost found: 174 (timed out)`.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best: Option<Tour>,
    pub status: SearchStatus,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn new(best: Option<Tour>, status: SearchStatus, elapsed: Duration) -> Self {
        Self {
            best,
            status,
            elapsed,
        }
    }
}

impl From<&AStarResult> for SearchReport {
    fn from(result: &AStarResult) -> Self {
        Self::new(result.best.clone(), result.status, result.elapsed)
    }
}

impl From<&DfsResult> for SearchReport {
    fn from(result: &DfsResult) -> Self {
        Self::new(result.best.clone(), result.status, result.elapsed)
    }
}

impl From<&ExhaustiveResult> for SearchReport {
    fn from(result: &ExhaustiveResult) -> Self {
        Self::new(Some(result.best.clone()), SearchStatus::Optimal, result.elapsed)
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.best {
            Some(tour) => write!(f, "Best cost found: {}", tour.cost)?,
            None => write!(f, "Best cost found: none")?,
        }
        // Flag a result that is not proven optimal.
        if !self.status.is_exhaustive() {
            write!(f, " ({})", self.status)?;
        }
        writeln!(f)?;
        match &self.best {
            Some(tour) => writeln!(f, "Best route found: {tour}")?,
            None => writeln!(f, "Best route found: none")?,
        }
        write!(
            f,
            "Execution time: {:.6} seconds",
            self.elapsed.as_secs_f64()
        )
    }
}

/// Receives the result of a finished search.
pub trait ResultSink {
    fn accept(&mut self, report: &SearchReport) -> TspResult<()>;
}

/// Writes the report to any [`Write`], e.g. standard output.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for WriterSink<W> {
    fn accept(&mut self, report: &SearchReport) -> TspResult<()> {
        writeln!(self.writer, "{report}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Creates (or truncates) a file and writes the report to it.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileSink {
    fn accept(&mut self, report: &SearchReport) -> TspResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        writeln!(writer, "{report}")?;
        writer.flush()?;
        log::info!("result written to {}", self.path.display());
        Ok(())
    }
}
