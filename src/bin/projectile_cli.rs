use clap::{Args, Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use projectile_engine::constants::GRAPH_SAMPLES;
use projectile_engine::{
    render, render_all, sweep_angles, AngleSweep, Presets, Report, ReportConfig, SweepParams, Task,
};

#[derive(Parser)]
#[command(name = "projectile")]
#[command(version)]
#[command(about = "Projectile motion models with plot-ready output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding the default inputs of any page
    #[arg(long, global = true)]
    presets: Option<PathBuf>,

    /// Samples per analytical curve
    #[arg(long, global = true, default_value_t = GRAPH_SAMPLES)]
    samples: usize,

    /// Output format
    #[arg(short = 'o', long, global = true, default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug, Default)]
struct LaunchArgs {
    /// Launch angle (degrees)
    #[arg(short = 'a', long)]
    angle: Option<f64>,

    /// Strength of gravity (m/s²)
    #[arg(short = 'g', long)]
    gravity: Option<f64>,

    /// Launch speed (m/s)
    #[arg(short = 'u', long)]
    speed: Option<f64>,

    /// Launch height (m)
    #[arg(long)]
    height: Option<f64>,
}

#[derive(Args, Debug, Default)]
struct TargetArgs {
    /// Target x coordinate (m)
    #[arg(short = 'x', long)]
    target_x: Option<f64>,

    /// Target y coordinate (m)
    #[arg(short = 'y', long)]
    target_y: Option<f64>,

    #[arg(short = 'g', long)]
    gravity: Option<f64>,

    #[arg(short = 'u', long)]
    speed: Option<f64>,

    #[arg(long)]
    height: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Task 1: drag-free trajectory sampled every dt seconds
    Flight {
        #[command(flatten)]
        launch: LaunchArgs,

        /// Time increment (s)
        #[arg(long)]
        dt: Option<f64>,
    },

    /// Task 2: exact y(x) trajectory with apogee, range and flight time
    Analytical {
        #[command(flatten)]
        launch: LaunchArgs,
    },

    /// Task 3: trajectories through a target point
    Target {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Task 4: compare a launch with the range-maximizing one
    MaxRange {
        #[command(flatten)]
        launch: LaunchArgs,
    },

    /// Task 5: target trajectories to the ground with the bounding parabola
    Bounding {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Task 6: arc length of the launch and of the range-maximizing trajectory
    ArcLength {
        #[command(flatten)]
        launch: LaunchArgs,
    },

    /// Task 7: range vs. time for a family of launch angles
    RangeTime {
        #[arg(short = 'g', long)]
        gravity: Option<f64>,

        #[arg(short = 'u', long)]
        speed: Option<f64>,

        #[arg(long)]
        height: Option<f64>,
    },

    /// Task 8: bouncing projectile
    Bounce {
        #[command(flatten)]
        launch: LaunchArgs,

        /// Time step (s)
        #[arg(long)]
        dt: Option<f64>,

        /// Coefficient of restitution (0 to 1)
        #[arg(short = 'c', long)]
        restitution: Option<f64>,

        /// Number of bounces to simulate
        #[arg(short = 'n', long)]
        bounces: Option<u32>,
    },

    /// Task 9: quadratic air resistance compared with the drag-free model
    Drag {
        #[command(flatten)]
        launch: LaunchArgs,

        /// Drag coefficient
        #[arg(long)]
        drag_coefficient: Option<f64>,

        /// Cross-sectional area (m²)
        #[arg(long)]
        area: Option<f64>,

        /// Air density (kg/m³)
        #[arg(long)]
        air_density: Option<f64>,

        /// Mass (kg)
        #[arg(short = 'm', long)]
        mass: Option<f64>,

        /// Time step (s)
        #[arg(long)]
        dt: Option<f64>,
    },

    /// Range, flight time and arc length over a grid of launch angles
    Sweep {
        #[arg(short = 'g', long)]
        gravity: Option<f64>,

        #[arg(short = 'u', long)]
        speed: Option<f64>,

        #[arg(long)]
        height: Option<f64>,

        /// First angle of the grid (degrees)
        #[arg(long)]
        start: Option<f64>,

        /// Last angle of the grid (degrees)
        #[arg(long)]
        end: Option<f64>,

        /// Number of angles, both ends included
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Render every page, or one page given by number or name
    Report {
        /// e.g. "4", "task-7" or "drag"
        task: Option<String>,
    },

    /// Print the inputs every page would use, as JSON
    Presets,

    /// List the available pages
    Info,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl LaunchArgs {
    fn apply(self, angle: &mut f64, gravity: &mut f64, speed: &mut f64, height: &mut f64) {
        set(angle, self.angle);
        set(gravity, self.gravity);
        set(speed, self.speed);
        set(height, self.height);
    }
}

impl TargetArgs {
    fn apply(self, target: &mut projectile_engine::TargetParams) {
        set(&mut target.target_x, self.target_x);
        set(&mut target.target_y, self.target_y);
        set(&mut target.gravity, self.gravity);
        set(&mut target.speed, self.speed);
        set(&mut target.height, self.height);
    }
}

fn init_tracing() -> Result<(), Box<dyn Error>> {
    // stdout carries results; logs go to stderr
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_env_var("PROJECTILE_LOG")
        .with_default_directive("projectile_engine=warn".parse()?)
        .from_env()?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing()?;

    let mut presets = match &cli.presets {
        Some(path) => {
            info!(path = %path.display(), "loading presets");
            Presets::from_json_file(path)?
        }
        None => Presets::default(),
    };
    let config = ReportConfig { graph_samples: cli.samples };

    let task = match cli.command {
        Commands::Flight { launch, dt } => {
            let p = &mut presets.task1;
            launch.apply(&mut p.angle_deg, &mut p.gravity, &mut p.speed, &mut p.height);
            set(&mut p.dt, dt);
            Task::FixedStep
        }
        Commands::Analytical { launch } => {
            let p = &mut presets.task2;
            launch.apply(&mut p.angle_deg, &mut p.gravity, &mut p.speed, &mut p.height);
            Task::Analytical
        }
        Commands::Target { target } => {
            target.apply(&mut presets.task3);
            Task::HitTarget
        }
        Commands::MaxRange { launch } => {
            let p = &mut presets.task4;
            launch.apply(&mut p.angle_deg, &mut p.gravity, &mut p.speed, &mut p.height);
            Task::MaxRange
        }
        Commands::Bounding { target } => {
            target.apply(&mut presets.task5);
            Task::BoundingParabola
        }
        Commands::ArcLength { launch } => {
            let p = &mut presets.task6;
            launch.apply(&mut p.angle_deg, &mut p.gravity, &mut p.speed, &mut p.height);
            Task::ArcLength
        }
        Commands::RangeTime { gravity, speed, height } => {
            let p = &mut presets.task7;
            set(&mut p.gravity, gravity);
            set(&mut p.speed, speed);
            set(&mut p.height, height);
            Task::RangeTime
        }
        Commands::Bounce { launch, dt, restitution, bounces } => {
            let p = &mut presets.task8;
            launch.apply(&mut p.angle_deg, &mut p.gravity, &mut p.speed, &mut p.height);
            set(&mut p.dt, dt);
            set(&mut p.restitution, restitution);
            set(&mut p.bounces, bounces);
            Task::Bounce
        }
        Commands::Drag { launch, drag_coefficient, area, air_density, mass, dt } => {
            let p = &mut presets.task9;
            launch.apply(&mut p.angle_deg, &mut p.gravity, &mut p.speed, &mut p.height);
            set(&mut p.drag_coefficient, drag_coefficient);
            set(&mut p.area, area);
            set(&mut p.air_density, air_density);
            set(&mut p.mass, mass);
            set(&mut p.dt, dt);
            Task::Drag
        }
        Commands::Sweep { gravity, speed, height, start, end, steps } => {
            let mut params: SweepParams = presets.sweep;
            set(&mut params.gravity, gravity);
            set(&mut params.speed, speed);
            set(&mut params.height, height);
            set(&mut params.start_deg, start);
            set(&mut params.end_deg, end);
            set(&mut params.steps, steps);
            let sweep = sweep_angles(&params)?;
            return display_sweep(&sweep, cli.output);
        }
        Commands::Report { task } => {
            let reports = match task {
                Some(name) => vec![render(name.parse()?, &presets, &config)?],
                None => render_all(&presets, &config)?,
            };
            return display_reports(&reports, cli.output);
        }
        Commands::Presets => {
            println!("{}", presets.to_json_pretty()?);
            return Ok(());
        }
        Commands::Info => {
            display_info();
            return Ok(());
        }
    };

    let report = render(task, &presets, &config)?;
    display_reports(&[report], cli.output)
}

fn display_info() {
    println!("Projectile Engine v{}", env!("CARGO_PKG_VERSION"));
    println!();
    for task in Task::ALL {
        println!("  {:>2}  {:<12} {}", task.number(), task.slug(), task.title());
    }
    println!();
    println!("Logging is controlled by PROJECTILE_LOG (e.g. PROJECTILE_LOG=projectile_engine=debug).");
}

fn display_reports(reports: &[Report], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            if let [report] = reports {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                println!("{}", serde_json::to_string_pretty(reports)?);
            }
        }

        OutputFormat::Csv => {
            for report in reports {
                for chart in &report.charts {
                    println!("# {} / {}", report.title, chart.title);
                    print!("{}", chart.to_csv());
                }
            }
        }

        OutputFormat::Table => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_report_table(report);
            }
        }
    }

    Ok(())
}

fn print_report_table(report: &Report) {
    let rows: Vec<(String, String)> = report
        .values
        .iter()
        .map(|v| (v.label.clone(), v.formatted()))
        .collect();
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let inner = (label_width + value_width + 3).max(report.title.chars().count() + 2);

    println!("╔{}╗", "═".repeat(inner));
    println!("║ {:<width$} ║", report.title, width = inner - 2);
    println!("╠{}╣", "═".repeat(inner));
    for (label, value) in &rows {
        let pad = inner - 3 - label_width;
        println!("║ {:<lw$} {:>pad$} ║", label, value, lw = label_width, pad = pad);
    }
    println!("╚{}╝", "═".repeat(inner));

    for warning in &report.warnings {
        println!("⚠ {warning}");
    }
    for chart in &report.charts {
        println!();
        print!("{}", chart.summary());
    }
}

fn display_sweep(sweep: &AngleSweep, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(sweep)?);
        }

        OutputFormat::Csv => {
            println!("angle_deg,range,flight_time,arc_length,apogee_height");
            for r in &sweep.rows {
                println!("{},{},{},{},{}", r.angle_deg, r.range, r.flight_time, r.arc_length, r.apogee_height);
            }
        }

        OutputFormat::Table => {
            println!("┌───────────┬───────────┬───────────┬───────────┬───────────┐");
            println!("│ Angle (°) │ Range (m) │  Time (s) │  Path (m) │  Apex (m) │");
            println!("├───────────┼───────────┼───────────┼───────────┼───────────┤");
            let step = (sweep.rows.len() / 18).max(1);
            for (i, r) in sweep.rows.iter().enumerate() {
                if i % step == 0 || i == sweep.rows.len() - 1 {
                    println!(
                        "│ {:>9.2} │ {:>9.3} │ {:>9.3} │ {:>9.3} │ {:>9.3} │",
                        r.angle_deg, r.range, r.flight_time, r.arc_length, r.apogee_height
                    );
                }
            }
            println!("└───────────┴───────────┴───────────┴───────────┴───────────┘");
            println!(
                "Best range:      {:.3} m at {:.2}°",
                sweep.best_range.range, sweep.best_range.angle_deg
            );
            println!(
                "Longest path:    {:.3} m at {:.2}°",
                sweep.best_arc_length.arc_length, sweep.best_arc_length.angle_deg
            );
        }
    }

    Ok(())
}
