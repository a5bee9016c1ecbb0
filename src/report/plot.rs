//! SVG line plots of per-size averages.

use super::csv::read_csv;
use crate::experiment::ResultRecord;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Line, Path as SvgPath, Rectangle, Text};
use svg::Document;

/// Appearance of the rendered plots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotConfig {
    /// Width of one panel in SVG units. The document holds two panels.
    pub panel_width: f64,
    pub panel_height: f64,
    /// Inner margin between panel border and plot area.
    pub margin: f64,
    pub time_color: String,
    pub bins_color: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            panel_width: 600.0,
            panel_height: 500.0,
            margin: 60.0,
            time_color: "blue".to_string(),
            bins_color: "red".to_string(),
        }
    }
}

impl PlotConfig {
    pub fn with_panel_size(mut self, width: f64, height: f64) -> Self {
        self.panel_width = width;
        self.panel_height = height;
        self
    }

    pub fn with_colors(mut self, time: impl Into<String>, bins: impl Into<String>) -> Self {
        self.time_color = time.into();
        self.bins_color = bins.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.margin.is_nan() || self.margin < 0.0 {
            return Err("margin must be non-negative".into());
        }
        if self.panel_width <= 2.0 * self.margin || self.panel_height <= 2.0 * self.margin {
            return Err(format!(
                "panel {}x{} leaves no room inside margin {}",
                self.panel_width, self.panel_height, self.margin
            ));
        }
        Ok(())
    }
}

/// Averages of all runs sharing one item count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSummary {
    pub item_count: usize,
    pub runs: usize,
    pub mean_time_seconds: f64,
    pub mean_bins: f64,
}

/// Result of [`render_plots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotOutcome {
    /// The SVG was written with one point per distinct size.
    Written { sizes: usize },
    /// The results file does not exist; nothing was written.
    MissingInput,
}

/// Groups records by item count and averages time and bins, ascending by
/// item count.
pub fn summarize(records: &[ResultRecord]) -> Vec<SizeSummary> {
    let mut groups: BTreeMap<usize, (usize, f64, f64)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.item_count).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += r.time_seconds;
        entry.2 += r.bins_used as f64;
    }

    groups
        .into_iter()
        .map(|(item_count, (runs, time, bins))| SizeSummary {
            item_count,
            runs,
            mean_time_seconds: time / runs as f64,
            mean_bins: bins / runs as f64,
        })
        .collect()
}

/// Reads `csv`, summarizes it and writes the two plots to `svg_path`.
pub fn render_plots(
    csv: impl AsRef<Path>,
    svg_path: impl AsRef<Path>,
    config: &PlotConfig,
) -> io::Result<PlotOutcome> {
    let csv = csv.as_ref();
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let records = match read_csv(csv) {
        Ok(records) => records,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!(
                "results file {} not found, run the benchmark first",
                csv.display()
            );
            return Ok(PlotOutcome::MissingInput);
        }
        Err(e) => return Err(e),
    };

    let summaries = summarize(&records);
    let document = render_document(&summaries, config);
    svg::save(svg_path.as_ref(), &document)?;
    log::info!(
        "plots of {} sizes written to {}",
        summaries.len(),
        svg_path.as_ref().display()
    );
    Ok(PlotOutcome::Written {
        sizes: summaries.len(),
    })
}

/// Builds the SVG document: mean time per size on the left, mean bins per
/// size on the right.
pub fn render_document(summaries: &[SizeSummary], config: &PlotConfig) -> Document {
    let xs: Vec<f64> = summaries.iter().map(|s| s.item_count as f64).collect();
    let times: Vec<f64> = summaries.iter().map(|s| s.mean_time_seconds).collect();
    let bins: Vec<f64> = summaries.iter().map(|s| s.mean_bins).collect();

    let left = Panel {
        title: "Mean time per size",
        y_label: "Time (s)",
        color: &config.time_color,
        marker: Marker::Circle,
    }
    .render(&xs, &times, config, 0.0);

    let right = Panel {
        title: "Bins used per size",
        y_label: "Mean bins",
        color: &config.bins_color,
        marker: Marker::Square,
    }
    .render(&xs, &bins, config, config.panel_width);

    Document::new()
        .set(
            "viewBox",
            (0.0, 0.0, 2.0 * config.panel_width, config.panel_height),
        )
        .set("width", 2.0 * config.panel_width)
        .set("height", config.panel_height)
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "white"),
        )
        .add(left)
        .add(right)
}

#[derive(Clone, Copy)]
enum Marker {
    Circle,
    Square,
}

struct Panel<'a> {
    title: &'a str,
    y_label: &'a str,
    color: &'a str,
    marker: Marker,
}

/// Linear map from a data range onto a pixel range.
#[derive(Clone, Copy)]
struct Axis {
    lo: f64,
    hi: f64,
    px_lo: f64,
    px_hi: f64,
}

impl Axis {
    fn new(lo: f64, hi: f64, px_lo: f64, px_hi: f64) -> Self {
        // degenerate ranges get a unit span so single points are centred
        let (lo, hi) = if (hi - lo).abs() < f64::EPSILON {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        };
        Self { lo, hi, px_lo, px_hi }
    }

    fn map(&self, v: f64) -> f64 {
        self.px_lo + (v - self.lo) / (self.hi - self.lo) * (self.px_hi - self.px_lo)
    }
}

impl Panel<'_> {
    fn render(&self, xs: &[f64], ys: &[f64], config: &PlotConfig, offset_x: f64) -> Group {
        let m = config.margin;
        let left = offset_x + m;
        let right = offset_x + config.panel_width - m / 2.0;
        let top = m;
        let bottom = config.panel_height - m;

        let x_lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let x_hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (x_lo, x_hi) = if xs.is_empty() { (0.0, 1.0) } else { (x_lo, x_hi) };
        let y_hi = ys.iter().copied().fold(0.0, f64::max);
        let y_hi = if y_hi > 0.0 { y_hi * 1.1 } else { 1.0 };

        let x_axis = Axis::new(x_lo, x_hi, left, right);
        let y_axis = Axis::new(0.0, y_hi, bottom, top);

        let mut group = Group::new()
            .set("font-family", "sans-serif")
            .set("font-size", 12)
            .add(
                Text::new(self.title)
                    .set("x", (left + right) / 2.0)
                    .set("y", top / 2.0)
                    .set("text-anchor", "middle")
                    .set("font-size", 16),
            )
            .add(
                Text::new("Number of items")
                    .set("x", (left + right) / 2.0)
                    .set("y", config.panel_height - m / 4.0)
                    .set("text-anchor", "middle"),
            )
            .add(
                Text::new(self.y_label)
                    .set("x", offset_x + m / 4.0)
                    .set("y", (top + bottom) / 2.0)
                    .set("text-anchor", "middle")
                    .set(
                        "transform",
                        format!("rotate(-90 {} {})", offset_x + m / 4.0, (top + bottom) / 2.0),
                    ),
            );

        group = grid(group, &x_axis, &y_axis, xs, y_hi);
        group = group
            .add(axis_line(left, bottom, right, bottom))
            .add(axis_line(left, bottom, left, top));

        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (x_axis.map(x), y_axis.map(y)))
            .collect();

        if let Some((&first, rest)) = points.split_first() {
            let data = rest
                .iter()
                .fold(Data::new().move_to(first), |d, &p| d.line_to(p));
            group = group.add(
                SvgPath::new()
                    .set("d", data)
                    .set("fill", "none")
                    .set("stroke", self.color)
                    .set("stroke-width", 2),
            );
        }

        for &(px, py) in &points {
            group = match self.marker {
                Marker::Circle => group.add(
                    Circle::new()
                        .set("cx", px)
                        .set("cy", py)
                        .set("r", 4)
                        .set("fill", self.color),
                ),
                Marker::Square => group.add(
                    Rectangle::new()
                        .set("x", px - 4.0)
                        .set("y", py - 4.0)
                        .set("width", 8)
                        .set("height", 8)
                        .set("fill", self.color),
                ),
            };
        }

        group
    }
}

fn axis_line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
}

/// Vertical grid lines at each size, horizontal ones at quarters of the y range.
fn grid(mut group: Group, x_axis: &Axis, y_axis: &Axis, xs: &[f64], y_hi: f64) -> Group {
    let (left, right) = (x_axis.px_lo, x_axis.px_hi);
    let (bottom, top) = (y_axis.px_lo, y_axis.px_hi);

    for &x in xs {
        let px = x_axis.map(x);
        group = group
            .add(grid_line(px, bottom, px, top))
            .add(
                Text::new(format!("{x}"))
                    .set("x", px)
                    .set("y", bottom + 16.0)
                    .set("text-anchor", "middle"),
            );
    }
    for k in 0..=4 {
        let v = y_hi * k as f64 / 4.0;
        let py = y_axis.map(v);
        group = group.add(grid_line(left, py, right, py)).add(
            Text::new(format!("{v:.2}"))
                .set("x", left - 6.0)
                .set("y", py + 4.0)
                .set("text-anchor", "end"),
        );
    }
    group
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    axis_line(x1, y1, x2, y2)
        .set("stroke", "#dddddd")
        .set("stroke-dasharray", "4 4")
}
