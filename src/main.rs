//! Hand-gesture controlled home automation with a simulated servo.

use anyhow::Result;
use clap::Parser;
use gesture_automation::app::{GestureApp, VideoSource};
use gesture_automation::config::Config;
use gesture_automation::constants::DEFAULT_REPORT_PATH;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use (overrides the configuration file)
    #[arg(long)]
    cam: Option<i32>,

    /// Video file to process instead of a camera
    #[arg(short, long)]
    video: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Subject identifier written to the result log
    #[arg(short, long)]
    subject: Option<u32>,

    /// Cooldown between triggered actions, in seconds
    #[arg(long)]
    cooldown: Option<f64>,

    /// Result CSV path
    #[arg(long)]
    csv: Option<String>,

    /// Run without a display window
    #[arg(long)]
    headless: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Analyze an existing result CSV and exit
    #[arg(long, value_name = "CSV")]
    analyze: Option<String>,

    /// Output path for the analysis report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    report: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Gesture Automation");

    // Offline analysis mode: consume the result log, write the report, exit
    if let Some(csv_path) = &args.analyze {
        let report = gesture_automation::analysis::write_report(csv_path, &args.report)?;
        println!(
            "Analyzed {} records: accuracy {:.2}%, mean detection time {:.3}s",
            report.total, report.accuracy_pct, report.mean_elapsed
        );
        println!("Report written to {}", args.report);
        return Ok(());
    }

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    apply_cli_overrides(&mut config, &args);

    let video_source = if let Some(video_path) = args.video {
        VideoSource::File(video_path)
    } else {
        VideoSource::Camera(config.camera.index)
    };

    let mut app = GestureApp::new(config, video_source, args.headless)?;
    app.run()?;

    Ok(())
}

/// Command-line flags override the configuration file
fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(cam) = args.cam {
        config.camera.index = cam;
    }
    if let Some(subject) = args.subject {
        config.gesture.subject_id = subject;
    }
    if let Some(cooldown) = args.cooldown {
        config.gesture.cooldown_secs = cooldown;
    }
    if let Some(csv) = &args.csv {
        config.logging.results_csv = csv.into();
    }
}
