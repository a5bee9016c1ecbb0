//! Persistence and visualization of experiment results.
//!
//! - [`CsvReport`]: streams [`ResultRecord`](crate::experiment::ResultRecord)s
//!   to a CSV file, one flushed row per experiment unit, so a crashed batch
//!   keeps the rows it finished.
//! - [`render_plots`]: averages a results file per instance size and draws
//!   size-vs-time and size-vs-bins line plots into a single SVG document.

mod csv;
mod plot;

pub use csv::{read_csv, write_csv, CsvReport, CSV_HEADER};
pub use plot::{render_document, render_plots, summarize, PlotConfig, PlotOutcome, SizeSummary};
