//! One page per task: the calculated values and the charts that go with them.
//!
//! Every page follows the same shape. Run the model, list the headline
//! numbers as [`CalculatedValue`]s and describe the plots as [`Chart`]s. A
//! model error aborts the page and is handed back to the caller to display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytical::analytical;
use crate::arc_length::{compare_arc_lengths, max_arc_length_angle};
use crate::bounce::simulate_bounces;
use crate::chart::{Chart, LineDash, Series};
use crate::constants::RANGE_TIME_ANGLES_DEG;
use crate::drag::{compare_with_drag_free, MotionHistory};
use crate::error::{ProjectileError, Result};
use crate::max_range::max_range;
use crate::presets::{Presets, ReportConfig};
use crate::range_time::{range_time_family, StationaryKind, StationaryPoint};
use crate::target::{bounding_parabola, hit_target, Extent, TargetParams, TargetSolution};
use crate::time_stepped::time_stepped;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    FixedStep,
    Analytical,
    #[serde(rename = "target")]
    HitTarget,
    MaxRange,
    #[serde(rename = "bounding")]
    BoundingParabola,
    ArcLength,
    RangeTime,
    Bounce,
    Drag,
}

impl Task {
    pub const ALL: [Task; 9] = [
        Task::FixedStep,
        Task::Analytical,
        Task::HitTarget,
        Task::MaxRange,
        Task::BoundingParabola,
        Task::ArcLength,
        Task::RangeTime,
        Task::Bounce,
        Task::Drag,
    ];

    pub fn number(self) -> u8 {
        match self {
            Task::FixedStep => 1,
            Task::Analytical => 2,
            Task::HitTarget => 3,
            Task::MaxRange => 4,
            Task::BoundingParabola => 5,
            Task::ArcLength => 6,
            Task::RangeTime => 7,
            Task::Bounce => 8,
            Task::Drag => 9,
        }
    }

    pub fn from_number(number: u8) -> Option<Task> {
        Task::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn slug(self) -> &'static str {
        match self {
            Task::FixedStep => "fixed-step",
            Task::Analytical => "analytical",
            Task::HitTarget => "target",
            Task::MaxRange => "max-range",
            Task::BoundingParabola => "bounding",
            Task::ArcLength => "arc-length",
            Task::RangeTime => "range-time",
            Task::Bounce => "bounce",
            Task::Drag => "drag",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Task::FixedStep => "Drag-free projectile model",
            Task::Analytical => "Analytical projectile model",
            Task::HitTarget => "Projectile to hit (X, Y)",
            Task::MaxRange => "Maximizing range",
            Task::BoundingParabola => "Hitting a target and the bounding parabola",
            Task::ArcLength => "Arc length of the trajectory",
            Task::RangeTime => "Range vs. time",
            Task::Bounce => "Bouncing projectile",
            Task::Drag => "Air resistance",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {}: {}", self.number(), self.title())
    }
}

impl FromStr for Task {
    type Err = ProjectileError;

    /// Accepts `"3"`, `"task-3"`, `"task3"`, `"task_3"` or a slug like `"bounce"`.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("task")
            .map(|rest| rest.trim_start_matches(['-', '_', ' ']))
            .unwrap_or(lower.as_str());

        if let Ok(number) = digits.parse::<u8>() {
            if let Some(task) = Task::from_number(number) {
                return Ok(task);
            }
        }
        Task::ALL
            .into_iter()
            .find(|task| task.slug() == lower)
            .ok_or_else(|| ProjectileError::UnknownTask(s.to_string()))
    }
}

/// A headline number shown above a page's charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedValue {
    pub label: String,
    pub value: f64,
    pub unit: String,
    /// Decimal places when displayed
    pub precision: usize,
}

impl CalculatedValue {
    pub fn new(label: impl Into<String>, value: f64, unit: impl Into<String>, precision: usize) -> Self {
        Self {
            label: label.into(),
            value,
            unit: unit.into(),
            precision,
        }
    }

    pub fn formatted(&self) -> String {
        let precision = self.precision;
        if self.unit.is_empty() {
            format!("{:.precision$}", self.value)
        } else {
            format!("{:.precision$} {}", self.value, self.unit)
        }
    }
}

impl fmt::Display for CalculatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.formatted())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub task: Task,
    pub title: String,
    pub values: Vec<CalculatedValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub charts: Vec<Chart>,
}

impl Report {
    fn new(task: Task) -> Self {
        Self {
            task,
            title: task.to_string(),
            values: Vec::new(),
            warnings: Vec::new(),
            charts: Vec::new(),
        }
    }

    fn value(&mut self, label: impl Into<String>, value: f64, unit: &str, precision: usize) {
        self.values.push(CalculatedValue::new(label, value, unit, precision));
    }

    pub fn value_named(&self, label: &str) -> Option<f64> {
        self.values.iter().find(|v| v.label == label).map(|v| v.value)
    }

    pub fn chart_titled(&self, title: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.title == title)
    }
}

/// Build one page from the presets.
pub fn render(task: Task, presets: &Presets, config: &ReportConfig) -> Result<Report> {
    config.validate()?;
    debug!(task = task.number(), "rendering page");

    let samples = config.graph_samples;
    let mut report = Report::new(task);
    match task {
        Task::FixedStep => fixed_step_page(&mut report, presets)?,
        Task::Analytical => analytical_page(&mut report, presets, samples)?,
        Task::HitTarget => target_page(&mut report, &presets.task3, samples)?,
        Task::MaxRange => max_range_page(&mut report, presets, samples)?,
        Task::BoundingParabola => bounding_page(&mut report, &presets.task5, samples)?,
        Task::ArcLength => arc_length_page(&mut report, presets, samples)?,
        Task::RangeTime => range_time_page(&mut report, presets, samples)?,
        Task::Bounce => bounce_page(&mut report, presets)?,
        Task::Drag => drag_page(&mut report, presets, samples)?,
    }
    Ok(report)
}

/// Every page in order. Stops at the first page that fails.
pub fn render_all(presets: &Presets, config: &ReportConfig) -> Result<Vec<Report>> {
    Task::ALL.into_iter().map(|task| render(task, presets, config)).collect()
}

fn fixed_step_page(report: &mut Report, presets: &Presets) -> Result<()> {
    let params = presets.task1;
    let trajectory = time_stepped(&params.launch(), params.dt)?;

    report.value("Flight Time", trajectory.flight_time, "s", 3);
    report
        .charts
        .push(Chart::xy("Projectile Motion").with_series(Series::markers("Trajectory", trajectory.x, trajectory.y)));
    Ok(())
}

fn analytical_page(report: &mut Report, presets: &Presets, samples: usize) -> Result<()> {
    let trajectory = analytical(&presets.task2, samples)?;
    let (xa, ya) = trajectory.apogee;

    report.value("Apogee x", xa, "m", 3);
    report.value("Apogee y", ya, "m", 3);
    report.value("Range", trajectory.range, "m", 3);
    report.value("Flight Time", trajectory.flight_time, "s", 3);

    report.charts.push(
        Chart::xy("Analytical Model")
            .with_series(Series::line("Trajectory", trajectory.x, trajectory.y))
            .with_series(Series::point("Apogee", xa, ya, 3)),
    );
    Ok(())
}

fn target_values(report: &mut Report, solution: &TargetSolution) {
    report.value("Minimum Initial Velocity", solution.min_speed, "m/s", 2);
    report.value(
        "Launch Angle of Minimum Velocity Trajectory",
        solution.min_speed_trajectory.angle_deg(),
        "deg",
        2,
    );
    if let (Some(low), Some(high)) = (&solution.low_ball, &solution.high_ball) {
        report.value("High Ball Launch Angle", high.angle_deg(), "deg", 2);
        report.value("Low Ball Launch Angle", low.angle_deg(), "deg", 2);
    } else {
        report
            .warnings
            .push("The input velocity (m/s) is not sufficient to reach target.".to_string());
    }
}

fn target_series(chart: &mut Chart, params: &TargetParams, solution: TargetSolution, ball_dash: LineDash) {
    let min = solution.min_speed_trajectory;
    chart.push(Series::line("Min. Velocity", min.x, min.y));
    chart.push(Series::point("Target", params.target_x, params.target_y, 2));
    if let Some(low) = solution.low_ball {
        chart.push(Series::line("Low Ball", low.x, low.y).dashed(ball_dash));
    }
    if let Some(high) = solution.high_ball {
        chart.push(Series::line("High Ball", high.x, high.y).dashed(ball_dash));
    }
}

fn target_page(report: &mut Report, params: &TargetParams, samples: usize) -> Result<()> {
    let solution = hit_target(params, Extent::ToTarget, samples)?;
    target_values(report, &solution);

    let mut chart = Chart::xy("Projectile to hit X, Y");
    target_series(&mut chart, params, solution, LineDash::Solid);
    report.charts.push(chart);
    Ok(())
}

fn bounding_page(report: &mut Report, params: &TargetParams, samples: usize) -> Result<()> {
    let solution = hit_target(params, Extent::ToGround, samples)?;
    let bounding = bounding_parabola(params, samples)?;
    target_values(report, &solution);
    report.value("Maximum Range", bounding.max_range.range, "m", 3);

    let mut chart = Chart::xy("Hitting a Target");
    target_series(&mut chart, params, solution, LineDash::Dot);
    chart.push(Series::line("Bounding Parabola", bounding.x, bounding.y).dashed(LineDash::LongDash));
    chart.push(Series::line("Max. Range", bounding.max_range.x, bounding.max_range.y).dashed(LineDash::DashDot));
    report.charts.push(chart);
    Ok(())
}

fn max_range_page(report: &mut Report, presets: &Presets, samples: usize) -> Result<()> {
    let comparison = max_range(&presets.task4, samples)?;
    let (input, optimum) = (comparison.input, comparison.optimum);

    report.value("Range", input.range, "m", 3);
    report.value("Flight Time", input.flight_time, "s", 3);
    report.value("Maximum Range", optimum.range, "m", 3);
    report.value("Launch Angle", optimum.angle_deg(), "deg", 3);
    report.value("Maximum Range Flight Time", optimum.flight_time, "s", 3);

    report.charts.push(
        Chart::xy("Analytical Model")
            .with_series(Series::line("Trajectory", input.x, input.y))
            .with_series(Series::line("Max Range", optimum.x, optimum.y).dashed(LineDash::DashDot))
            .with_series(Series::point("Range", input.range, 0.0, 3))
            .with_series(Series::point("Max. Range", optimum.range, 0.0, 3)),
    );
    Ok(())
}

fn arc_length_page(report: &mut Report, presets: &Presets, samples: usize) -> Result<()> {
    let params = presets.task6;
    let comparison = compare_arc_lengths(&params, samples)?;
    let (longest_angle, longest_length) = max_arc_length_angle(params.gravity, params.speed, params.height)?;
    let (input, optimum) = (comparison.input, comparison.optimum);

    report.value("Range", input.range, "m", 3);
    report.value("Flight Time", input.flight_time, "s", 3);
    report.value("Arc Length", comparison.input_length, "m", 3);
    report.value("Launch Angle", optimum.angle_deg(), "deg", 3);
    report.value("Maximum Range", optimum.range, "m", 3);
    report.value("Maximum Range Flight Time", optimum.flight_time, "s", 3);
    report.value("Maximum Range Arc Length", comparison.optimum_length, "m", 3);
    report.value("Longest Path Launch Angle", longest_angle, "deg", 3);
    report.value("Longest Path Arc Length", longest_length, "m", 3);

    report.charts.push(
        Chart::xy("Arc Length of Projectile Motion (with Analytical Model)")
            .with_series(Series::line("Trajectory", input.x, input.y))
            .with_series(Series::line("Max Range", optimum.x, optimum.y).dashed(LineDash::DashDot))
            .with_series(Series::point("Range", input.range, 0.0, 3))
            .with_series(Series::point("Max. Range", optimum.range, 0.0, 3)),
    );
    Ok(())
}

fn stationary_markers(
    name: &str,
    points: &[StationaryPoint],
    kind: StationaryKind,
    coords: impl Fn(&StationaryPoint) -> (f64, f64),
) -> Series {
    let (x, y): (Vec<f64>, Vec<f64>) = points.iter().filter(|p| p.kind == kind).map(coords).unzip();
    let labels = x.iter().zip(&y).map(|(a, b)| format!("({a:.3}, {b:.3})")).collect();
    Series::markers(name, x, y).with_labels(labels)
}

fn range_time_page(report: &mut Report, presets: &Presets, samples: usize) -> Result<()> {
    let family = range_time_family(&presets.task7, &RANGE_TIME_ANGLES_DEG, samples)?;
    let saddle = family.saddle;

    report.value("Critical Launch Angle", saddle.angle_deg, "deg", 3);
    report.value("Saddle Point Time", saddle.t, "s", 3);
    for point in family.stationary.iter().filter(|p| !p.before_landing) {
        let kind = match point.kind {
            StationaryKind::Maximum => "maximum",
            StationaryKind::Minimum => "minimum",
            StationaryKind::Saddle => "saddle point",
        };
        report.warnings.push(format!(
            "The {kind} of r(t) at {} deg occurs after landing (t = {:.3} s).",
            point.angle_deg, point.t
        ));
    }

    let mut range_chart = Chart::new("Range vs. Time", "t (s)", "r (m)");
    let mut xy_chart = Chart::xy("XY Graph");
    for curve in family.curves {
        let name = format!("{} deg", curve.angle_deg);
        range_chart.push(Series::line(name.clone(), curve.t, curve.r));
        xy_chart.push(Series::line(name, curve.x, curve.y));
    }

    let stationary = &family.stationary;
    range_chart.push(stationary_markers("R vs. t Maxima", stationary, StationaryKind::Maximum, |p| (p.t, p.r)));
    range_chart.push(stationary_markers("R vs. t Minima", stationary, StationaryKind::Minimum, |p| (p.t, p.r)));
    range_chart.push(Series::point("Saddle Point", saddle.t, saddle.r, 3));
    xy_chart.push(stationary_markers("Maxima", stationary, StationaryKind::Maximum, |p| (p.x, p.y)));
    xy_chart.push(stationary_markers("Minima", stationary, StationaryKind::Minimum, |p| (p.x, p.y)));
    xy_chart.push(Series::point("Saddle Point", saddle.x, saddle.y, 3));

    report.charts.push(range_chart);
    report.charts.push(xy_chart);
    Ok(())
}

fn bounce_page(report: &mut Report, presets: &Presets) -> Result<()> {
    let trajectory = simulate_bounces(&presets.task8)?;

    report.value("Flight Time", trajectory.total_time, "s", 3);
    report.value("Bounces", trajectory.bounces.len() as f64, "", 0);

    let (bx, by): (Vec<f64>, Vec<f64>) = trajectory.bounces.iter().map(|b| (b.x, 0.0)).unzip();
    report.charts.push(
        Chart::xy("Bouncing Projectile")
            .with_series(Series::line("Trajectory", trajectory.x, trajectory.y))
            .with_series(Series::markers("Bounces", bx, by)),
    );
    Ok(())
}

fn drag_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    drag: &MotionHistory,
    drag_free: &MotionHistory,
    pick: impl Fn(&MotionHistory) -> (&[f64], &[f64]),
) -> Chart {
    let (dx, dy) = pick(drag);
    let (fx, fy) = pick(drag_free);
    Chart::new(title, x_label, y_label)
        .with_series(Series::line("Drag Included", dx.to_vec(), dy.to_vec()))
        .with_series(Series::line("Drag Free", fx.to_vec(), fy.to_vec()).dashed(LineDash::DashDot))
}

fn drag_page(report: &mut Report, presets: &Presets, samples: usize) -> Result<()> {
    let comparison = compare_with_drag_free(&presets.task9, samples)?;
    let (drag, free) = (&comparison.drag, &comparison.drag_free);

    report.value("Flight Time (Without Drag)", comparison.drag_free_flight_time(), "s", 3);
    report.value("Flight Time (With Drag)", comparison.drag_flight_time(), "s", 3);
    report.value("Range (Without Drag)", comparison.drag_free_range(), "m", 3);
    report.value("Range (With Drag)", comparison.drag_range(), "m", 3);
    report.value("Air Resistance Factor", comparison.air_resistance_factor, "1/m", 3);

    let (dax, day) = comparison.drag_apogee;
    let (fax, fay) = comparison.drag_free_apogee;
    let position = drag_chart("Projectile Motion Model", "x (m)", "y (m)", drag, free, |h| (h.x.as_slice(), h.y.as_slice()))
        .with_series(Series::point("Drag Included Apogee (Approx.)", dax, day, 2))
        .with_series(Series::point("Drag Free Apogee", fax, fay, 2))
        .with_series(Series::point("Drag Included Range", comparison.drag_range(), 0.0, 2))
        .with_series(Series::point("Drag Free Range", comparison.drag_free_range(), 0.0, 2));

    report.charts.push(position);
    report.charts.push(drag_chart("Y Position vs. Time", "t (s)", "y (m)", drag, free, |h| (h.t.as_slice(), h.y.as_slice())));
    report.charts.push(drag_chart("X Velocity vs. Time", "t (s)", "vx (m/s)", drag, free, |h| (h.t.as_slice(), h.vx.as_slice())));
    report.charts.push(drag_chart("Y Velocity vs. Time", "t (s)", "vy (m/s)", drag, free, |h| (h.t.as_slice(), h.vy.as_slice())));
    report.charts.push(drag_chart("Velocity vs. Time", "t (s)", "v (m/s)", drag, free, |h| (h.t.as_slice(), h.v.as_slice())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_default(task: Task) -> Report {
        render(task, &Presets::default(), &ReportConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_task() {
        assert_eq!("3".parse::<Task>().unwrap(), Task::HitTarget);
        assert_eq!("task-8".parse::<Task>().unwrap(), Task::Bounce);
        assert_eq!("Task_9".parse::<Task>().unwrap(), Task::Drag);
        assert_eq!("range-time".parse::<Task>().unwrap(), Task::RangeTime);
        assert!(matches!("10".parse::<Task>(), Err(ProjectileError::UnknownTask(_))));
        assert!("0".parse::<Task>().is_err());
        assert!("warp-drive".parse::<Task>().is_err());
    }

    #[test]
    fn test_numbers_round_trip() {
        for task in Task::ALL {
            assert_eq!(Task::from_number(task.number()), Some(task));
        }
    }

    #[test]
    fn test_every_page_renders_with_defaults() {
        let reports = render_all(&Presets::default(), &ReportConfig::default()).unwrap();
        assert_eq!(reports.len(), 9);
        for report in &reports {
            assert!(!report.values.is_empty(), "{} has no values", report.title);
            assert!(!report.charts.is_empty(), "{} has no charts", report.title);
        }
    }

    #[test]
    fn test_fixed_step_page() {
        let report = render_default(Task::FixedStep);
        let chart = report.chart_titled("Projectile Motion").unwrap();
        assert_eq!(chart.series[0].len(), 61);
        assert!((report.value_named("Flight Time").unwrap() - 3.018).abs() < 1e-3);
    }

    #[test]
    fn test_analytical_page_uses_graph_samples() {
        let config = ReportConfig { graph_samples: 25 };
        let report = render(Task::Analytical, &Presets::default(), &config).unwrap();
        let chart = report.chart_titled("Analytical Model").unwrap();
        assert_eq!(chart.series_named("Trajectory").unwrap().len(), 25);
        assert_eq!(chart.series_named("Apogee").unwrap().labels, vec!["(20.387, 12.194)".to_string()]);
    }

    #[test]
    fn test_unreachable_target_warns() {
        let mut presets = Presets::default();
        presets.task3.speed = 5.0;
        let report = render(Task::HitTarget, &presets, &ReportConfig::default()).unwrap();
        assert_eq!(report.warnings.len(), 1);
        let chart = &report.charts[0];
        assert!(chart.series_named("Min. Velocity").is_some());
        assert!(chart.series_named("Low Ball").is_none());
        assert!(report.value_named("Low Ball Launch Angle").is_none());
    }

    #[test]
    fn test_bounding_page() {
        let report = render_default(Task::BoundingParabola);
        assert!(report.warnings.is_empty());
        let chart = report.chart_titled("Hitting a Target").unwrap();
        for name in ["Min. Velocity", "Target", "Low Ball", "High Ball", "Bounding Parabola", "Max. Range"] {
            assert!(chart.series_named(name).is_some(), "missing {name}");
        }
        let dash = |name: &str| chart.series_named(name).map(|s| s.dash);
        assert_eq!(dash("Bounding Parabola"), Some(LineDash::LongDash));
        assert_eq!(dash("Max. Range"), Some(LineDash::DashDot));
        assert_eq!(dash("Low Ball"), Some(LineDash::Dot));
        assert_eq!(dash("High Ball"), Some(LineDash::Dot));
        assert_eq!(dash("Min. Velocity"), Some(LineDash::Solid));
    }

    #[test]
    fn test_task_names_match_serialized_form() {
        for task in Task::ALL {
            let json = serde_json::to_string(&task).unwrap();
            assert_eq!(json, format!("\"{}\"", task.slug()));
            let from_json: Task = serde_json::from_str(&json).unwrap();
            assert_eq!(from_json, task);
            assert_eq!(task.slug().parse::<Task>().unwrap(), task);
        }
    }

    #[test]
    fn test_range_time_page() {
        let report = render_default(Task::RangeTime);
        let range_chart = report.chart_titled("Range vs. Time").unwrap();
        assert_eq!(range_chart.x_label, "t (s)");
        assert_eq!(range_chart.series_named("R vs. t Maxima").unwrap().len(), 2);
        assert!(range_chart.series_named("85 deg").is_some());
        assert!(report.chart_titled("XY Graph").unwrap().series_named("Saddle Point").is_some());
    }

    #[test]
    fn test_drag_page_has_five_charts() {
        let report = render_default(Task::Drag);
        assert_eq!(report.charts.len(), 5);
        assert!((report.value_named("Air Resistance Factor").unwrap() - 0.03927).abs() < 1e-9);
        let with = report.value_named("Range (With Drag)").unwrap();
        let without = report.value_named("Range (Without Drag)").unwrap();
        assert!(with < without);
    }

    #[test]
    fn test_page_error_is_returned() {
        let mut presets = Presets::default();
        presets.task9.mass = 0.0;
        assert!(render(Task::Drag, &presets, &ReportConfig::default()).is_err());
        assert!(render(Task::Analytical, &presets, &ReportConfig { graph_samples: 0 }).is_err());
    }

    #[test]
    fn test_calculated_value_display() {
        let value = CalculatedValue::new("Flight Time", 3.01834, "s", 3);
        assert_eq!(value.to_string(), "Flight Time: 3.018 s");
        assert_eq!(CalculatedValue::new("Bounces", 6.0, "", 0).formatted(), "6");
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_string(&render_default(Task::Bounce)).unwrap();
        assert!(json.contains("\"task\":\"bounce\""));
        assert!(json.contains("Bouncing Projectile"));
    }
}
