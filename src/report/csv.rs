//! CSV persistence of result records.

use crate::cp::SolverStatus;
use crate::experiment::ResultRecord;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header row, in column order.
pub const CSV_HEADER: &str = "instance,items,capacity,time_s,bins,best_bound,gap_percent,status";

const COLUMNS: usize = 8;

/// A results file opened for incremental appends.
///
/// Every [`append`](Self::append) is flushed before it returns, so rows
/// of finished units survive an aborted batch.
pub struct CsvReport {
    writer: BufWriter<File>,
    rows: usize,
}

impl CsvReport {
    /// Creates (or truncates) `path` and writes the header.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{CSV_HEADER}")?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Writes and flushes one row.
    pub fn append(&mut self, record: &ResultRecord) -> io::Result<()> {
        write_row(&mut self.writer, record)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

fn write_row<W: Write>(out: &mut W, r: &ResultRecord) -> io::Result<()> {
    writeln!(
        out,
        "{},{},{},{:.4},{},{:.2},{:.2},{}",
        r.instance_name,
        r.item_count,
        r.capacity,
        r.time_seconds,
        r.bins_used,
        r.best_bound,
        r.gap_percent,
        r.status.as_str(),
    )
}

/// Writes a whole batch to `path`.
pub fn write_csv(path: impl AsRef<Path>, records: &[ResultRecord]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{CSV_HEADER}")?;
    for record in records {
        write_row(&mut writer, record)?;
    }
    writer.flush()
}

/// Reads a results file written by [`CsvReport`] or [`write_csv`].
///
/// Blank lines are skipped. Malformed rows fail with
/// [`io::ErrorKind::InvalidData`] naming the offending line.
pub fn read_csv(path: impl AsRef<Path>) -> io::Result<Vec<ResultRecord>> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == CSV_HEADER => {}
        Some((_, header)) => {
            return Err(invalid(format!("unexpected header: {header}")));
        }
        None => return Err(invalid("empty results file".into())),
    }

    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_row(line).map_err(|e| invalid(format!("line {}: {e}", idx + 1))))
        .collect()
}

fn parse_row(line: &str) -> Result<ResultRecord, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != COLUMNS {
        return Err(format!("expected {COLUMNS} fields, found {}", fields.len()));
    }

    Ok(ResultRecord {
        instance_name: fields[0].to_string(),
        item_count: parse_field(fields[1], "items")?,
        capacity: parse_field(fields[2], "capacity")?,
        time_seconds: parse_field(fields[3], "time_s")?,
        bins_used: parse_field(fields[4], "bins")?,
        best_bound: parse_field(fields[5], "best_bound")?,
        gap_percent: parse_field(fields[6], "gap_percent")?,
        status: SolverStatus::parse(fields[7]),
    })
}

fn parse_field<T: std::str::FromStr>(raw: &str, column: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid {column} value {raw:?}"))
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
