// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use health_log::cli::{Args, Commands};
use health_log::{round_one_decimal, telemetry, BmiReading, Config, HEIGHT_CM, NORMAL_RANGE_LABEL, WEIGHT_KG};

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.command {
        Some(Commands::Bmi { height, weight }) => run_bmi(*height, *weight),
        None => run_ui_mode(&args),
    }
}

/// One-shot BMI, clamped the same way the form clamps
fn run_bmi(height: f64, weight: f64) -> Result<()> {
    let height = HEIGHT_CM.clamp(height);
    let weight = WEIGHT_KG.clamp(weight);
    let reading = BmiReading::from_measurements(height, weight);

    println!("⚖️  Height {:.1} cm, weight {:.1} kg", height, weight);
    println!(
        "BMI {:.1}  {} {}  (normal range {})",
        round_one_decimal(reading.bmi),
        reading.status.indicator(),
        reading.status,
        NORMAL_RANGE_LABEL
    );

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(args: &Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    let _log_guard = telemetry::init_logging(&config.logging, args.log_level_override())
        .context("setting up the log file")?;

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(version = health_log::VERSION, %date, "session started");

    let mut app = ui::App::new(date, &config.defaults);
    ui::run_ui(&mut app)?;

    info!(records = app.session.store.len(), "session ended");
    println!("✅ Session closed - {} records discarded", app.session.store.len());

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_args: &Args) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or compute a single value: health-log bmi --height 170 --weight 65");
    std::process::exit(1);
}
