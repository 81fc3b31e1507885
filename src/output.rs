//! Report rendering.
//!
//! Uses itoa for integer formatting and ryu for float formatting
//! to avoid allocation per value.

use crate::commands::report::Report;
use std::io::{self, BufWriter, Write};
use thiserror::Error;

/// Buffer size for ReportWriter (64KB default).
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Errors that can occur while rendering a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Tab-separated report writer.
///
/// One line per value, each starting with its section name:
///
/// ```text
/// counts	input_lines=4	parsed=3	deduplicated=2	errors=1
/// daily_gmv	2024-03-01	22.5
/// rolling_7d_gmv	2024-03-01	22.5
/// top_items	i2	22.5
/// cancel_rate	2024-W09	1.0
/// error	skip line due to ...
/// ```
pub struct ReportWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    ryu_buf: ryu::Buffer,
}

impl<W: Write> ReportWriter<W> {
    /// Create a new ReportWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new ReportWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            ryu_buf: ryu::Buffer::new(),
        }
    }

    /// Write every section of `report`.
    pub fn write_report(&mut self, report: &Report) -> Result<(), ReportError> {
        let counts = &report.counts;
        self.writer.write_all(b"counts")?;
        self.write_count("input_lines", counts.input_lines)?;
        self.write_count("parsed", counts.parsed)?;
        self.write_count("deduplicated", counts.deduplicated)?;
        self.write_count("errors", counts.errors)?;
        self.writer.write_all(b"\n")?;

        for (day, gmv) in &report.daily_gmv {
            self.write_row("daily_gmv", day, *gmv)?;
        }
        for (day, gmv) in &report.rolling_7d_gmv {
            self.write_row("rolling_7d_gmv", day, *gmv)?;
        }
        for (item, gmv) in &report.top_items {
            self.write_row("top_items", item, *gmv)?;
        }
        for (week, rate) in &report.cancel_rate {
            self.write_row("cancel_rate", week, *rate)?;
        }
        for msg in &report.errors_sample {
            writeln!(self.writer, "error\t{}", msg)?;
        }
        Ok(())
    }

    /// Write `\tname=value` using itoa.
    #[inline]
    fn write_count(&mut self, name: &str, n: usize) -> Result<(), ReportError> {
        self.writer.write_all(b"\t")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b"=")?;
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    /// Write `section\tkey\tvalue\n` using ryu for the value.
    #[inline]
    fn write_row(
        &mut self,
        section: &str,
        key: &dyn std::fmt::Display,
        value: f64,
    ) -> Result<(), ReportError> {
        write!(self.writer, "{}\t{}\t", section, key)?;
        self.writer.write_all(self.ryu_buf.format(value).as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> Result<(), ReportError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }
}
