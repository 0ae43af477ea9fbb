//! Plot-ready chart description.
//!
//! A [`Chart`] is what each page hands to whatever draws it: a browser
//! plotting library gets it as JSON, the CLI renders a text summary or CSV.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Smooth line through the samples
    Line,
    /// Individual points
    Markers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    #[default]
    Solid,
    DashDot,
    LongDash,
    Dot,
}

/// One named trace on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub dash: LineDash,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Text shown next to each point (markers only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl Series {
    fn new(name: impl Into<String>, kind: SeriesKind, x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len(), "series x and y must be the same length");
        Self {
            name: name.into(),
            kind,
            dash: LineDash::Solid,
            x,
            y,
            labels: Vec::new(),
        }
    }

    pub fn line(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self::new(name, SeriesKind::Line, x, y)
    }

    pub fn markers(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self::new(name, SeriesKind::Markers, x, y)
    }

    /// A single marker labelled with its own coordinates.
    pub fn point(name: impl Into<String>, x: f64, y: f64, precision: usize) -> Self {
        Self::markers(name, vec![x], vec![y])
            .with_labels(vec![format!("({x:.precision$}, {y:.precision$})")])
    }

    pub fn dashed(mut self, dash: LineDash) -> Self {
        self.dash = dash;
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points as `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Bounding box `(x_min, x_max, y_min, y_max)` of the finite samples.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.points()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc, (x, y)| match acc {
                None => Some((x, x, y, y)),
                Some((x0, x1, y0, y1)) => Some((x0.min(x), x1.max(x), y0.min(y), y1.max(y))),
            })
    }
}

/// A titled 2-D chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Chart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
        }
    }

    /// Standard x-y position chart.
    pub fn xy(title: impl Into<String>) -> Self {
        Self::new(title, "x (m)", "y (m)")
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Long-format CSV: one row per sample, tagged with its series name.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("series,x,y\n");
        for series in &self.series {
            let name = csv_field(&series.name);
            for (x, y) in series.points() {
                let _ = writeln!(out, "{name},{x},{y}");
            }
        }
        out
    }

    /// Short text description of each series, for terminals.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}  [{} vs {}]", self.title, self.y_label, self.x_label);
        for series in &self.series {
            let kind = match series.kind {
                SeriesKind::Line => "line",
                SeriesKind::Markers => "markers",
            };
            match series.bounds() {
                Some((x0, x1, y0, y1)) => {
                    let _ = writeln!(
                        out,
                        "  {:<32} {:>7} {:>5} pts  x [{:>9.3}, {:>9.3}]  y [{:>9.3}, {:>9.3}]",
                        series.name, kind, series.len(), x0, x1, y0, y1
                    );
                }
                None => {
                    let _ = writeln!(out, "  {:<32} {:>7} {:>5} pts", series.name, kind, series.len());
                }
            }
        }
        out
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chart() -> Chart {
        Chart::xy("Projectile Motion")
            .with_series(Series::line("Trajectory", vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]))
            .with_series(Series::point("Apogee", 1.0, 1.0, 3))
    }

    #[test]
    fn test_point_label() {
        let s = Series::point("Apogee", 20.387, 12.194, 2);
        assert_eq!(s.labels, vec!["(20.39, 12.19)".to_string()]);
        assert_eq!(s.kind, SeriesKind::Markers);
    }

    #[test]
    fn test_csv_long_format() {
        let csv = sample_chart().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "series,x,y");
        assert_eq!(lines.len(), 1 + 3 + 1);
        assert_eq!(lines[4], "Apogee,1,1");
    }

    #[test]
    fn test_csv_quotes_names() {
        let chart = Chart::xy("t").with_series(Series::line("a,b", vec![0.0], vec![1.0]));
        assert!(chart.to_csv().contains("\"a,b\",0,1"));
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let s = Series::line("s", vec![0.0, 1.0, 2.0], vec![f64::NAN, -1.0, 3.0]);
        assert_eq!(s.bounds(), Some((1.0, 2.0, -1.0, 3.0)));
        assert_eq!(Series::line("e", vec![], vec![]).bounds(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample_chart()).unwrap();
        assert_eq!(json["x_label"], "x (m)");
        assert_eq!(json["series"][0]["kind"], "line");
        assert_eq!(json["series"][0]["dash"], "solid");
        assert!(json["series"][0].get("labels").is_none());
        assert_eq!(json["series"][1]["labels"][0], "(1.000, 1.000)");
    }

    #[test]
    fn test_summary_lists_series() {
        let text = sample_chart().summary();
        assert!(text.contains("Projectile Motion"));
        assert!(text.contains("Trajectory"));
        assert!(text.contains("Apogee"));
    }
}
