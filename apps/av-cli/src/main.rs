use av_app::{
    AppResult, ExportRequest, StudyOutput, evaluate_study, export_with_fallback,
    get_study, list_exports, list_studies, load_export, load_scenario, summarize, to_records,
    validate_scenario,
};
use av_project::schema::{EvolutionModeDef, StudyDef, StudyKind};
use av_project::validate_study;
use av_results::{ExportFormat, ExportOptions, ExportStore, render_export};
use av_variable::StarVariant;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "av-cli")]
#[command(about = "AstroViz CLI - variable stars, H-R tracks and radial velocities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and parameters
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// List studies in a scenario
    Studies {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Evaluate a study and export its series
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Study ID to evaluate
        study_id: String,
        /// Preferred export format; simpler formats are used if it fails
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        /// Export directory (defaults to .astroviz/exports next to the scenario)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Largest animation the frames format will write
        #[arg(long, default_value_t = av_results::DEFAULT_MAX_FRAMES)]
        max_frames: usize,
    },
    /// List exports stored next to a scenario
    Exports {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Show details of a stored export
    ShowExport {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Export ID to display
        export_id: String,
    },
    /// Variable-star brightness: one sample with --at, else the full curve as CSV
    Brightness {
        /// Period in days
        #[arg(long, default_value_t = 72.0)]
        period: f64,
        /// Maximum brightness
        #[arg(long, default_value_t = 8.0)]
        max: f64,
        /// Minimum brightness
        #[arg(long, default_value_t = 4.0)]
        min: f64,
        /// Cepheid, RR Lyrae or Pulsating
        #[arg(long, default_value = "Cepheid")]
        variant: StarVariant,
        /// Evaluate at a single time (days)
        #[arg(long)]
        at: Option<f64>,
    },
    /// Stellar-evolution track as CSV
    Evolution {
        /// Mass in solar masses
        #[arg(long, default_value_t = 1.0)]
        mass: f64,
        #[arg(long, value_enum, default_value_t = Mode::Piecewise)]
        mode: Mode,
        /// Number of samples along the track
        #[arg(long, default_value_t = av_evolution::DEFAULT_TRACK_SAMPLES)]
        samples: usize,
    },
    /// Combined radial velocity and planet positions as CSV
    RadialVelocity {
        /// Planet preset tag; repeat for several planets (default: Planet A)
        #[arg(long = "planet")]
        planets: Vec<String>,
        /// Star mass in solar masses
        #[arg(long, default_value_t = 1.0)]
        star_mass: f64,
        /// Time span in days
        #[arg(long, default_value_t = av_orbit::RV_DURATION_DAYS)]
        duration: f64,
        /// Number of samples
        #[arg(long, default_value_t = av_orbit::RV_SAMPLES)]
        samples: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Piecewise,
    Exponential,
}

fn main() -> AppResult<()> {
    // Logs go to stderr so CSV on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Studies { scenario_path } => cmd_studies(&scenario_path),
        Commands::Run {
            scenario_path,
            study_id,
            format,
            out_dir,
            max_frames,
        } => cmd_run(
            &scenario_path,
            &study_id,
            format,
            out_dir,
            ExportOptions { max_frames },
        ),
        Commands::Exports { scenario_path } => cmd_exports(&scenario_path),
        Commands::ShowExport {
            scenario_path,
            export_id,
        } => cmd_show_export(&scenario_path, &export_id),
        Commands::Brightness {
            period,
            max,
            min,
            variant,
            at,
        } => cmd_brightness(period, max, min, variant, at),
        Commands::Evolution {
            mass,
            mode,
            samples,
        } => {
            let mode = match mode {
                Mode::Piecewise => EvolutionModeDef::Piecewise,
                Mode::Exponential => EvolutionModeDef::Exponential,
            };
            print_study_csv(StudyKind::StellarEvolution {
                mass_msun: mass,
                mode,
                samples,
            })
        }
        Commands::RadialVelocity {
            planets,
            star_mass,
            duration,
            samples,
        } => {
            let presets = if planets.is_empty() {
                av_orbit::DEFAULT_SELECTION
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            } else {
                planets
            };
            print_study_csv(StudyKind::PlanetarySystem {
                star_mass_msun: star_mass,
                presets,
                planets: vec![],
                duration_days: duration,
                samples,
            })
        }
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = load_scenario(scenario_path)?;
    validate_scenario(&scenario)?;
    println!("✓ Scenario is valid ({} studies)", scenario.studies.len());
    Ok(())
}

fn cmd_studies(scenario_path: &Path) -> AppResult<()> {
    let scenario = load_scenario(scenario_path)?;
    let studies = list_studies(&scenario);

    if studies.is_empty() {
        println!("No studies found in scenario");
    } else {
        println!("Studies in '{}':", scenario.name);
        for study in studies {
            println!(
                "  {} - {} [{}] {}",
                study.id, study.name, study.kind, study.detail
            );
        }
    }
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    study_id: &str,
    format: ExportFormat,
    out_dir: Option<PathBuf>,
    options: ExportOptions,
) -> AppResult<()> {
    let scenario = load_scenario(scenario_path)?;
    let study = get_study(&scenario, study_id)?;
    println!("Evaluating study: {} ({})", study.name, study.kind.label());

    let output = evaluate_study(study)?;
    let records = to_records(&output);

    let store = match out_dir {
        Some(dir) => ExportStore::new(dir)?,
        None => ExportStore::for_scenario(scenario_path)?,
    };
    tracing::debug!(root = %store.root_dir().display(), records = records.len(), "export store ready");
    let outcome = export_with_fallback(
        &store,
        &ExportRequest {
            study,
            records: &records,
            preferred: format,
            options,
        },
    )?;

    for note in &outcome.fallbacks {
        println!("⚠ {} export failed: {}", note.format, note.reason);
    }
    println!(
        "✓ Exported {} samples as {}: {}",
        outcome.manifest.sample_count,
        outcome.manifest.format,
        outcome.path.display()
    );
    println!("  Export ID: {}", outcome.manifest.export_id);

    let summary = summarize(&records)?;
    println!(
        "  Time range: {:.3} - {:.3}",
        summary.time_range.0, summary.time_range.1
    );
    println!("  Channels: {}", summary.channels.join(", "));
    if let StudyOutput::PlanetarySystem(frames) = &output {
        if frames.samples().iter().all(|f| f.planets.is_empty()) {
            println!("  No planets selected: radial velocity is zero");
        }
    }
    Ok(())
}

fn cmd_exports(scenario_path: &Path) -> AppResult<()> {
    let exports = list_exports(scenario_path)?;

    if exports.is_empty() {
        println!("No exports found for scenario: {}", scenario_path.display());
    } else {
        println!("Exports for '{}':", scenario_path.display());
        for manifest in exports {
            println!(
                "  {} {} [{}] {} samples ({})",
                manifest.export_id,
                manifest.study_id,
                manifest.format,
                manifest.sample_count,
                manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_export(scenario_path: &Path, export_id: &str) -> AppResult<()> {
    println!("Loading export: {}", export_id);

    let (manifest, records) = load_export(scenario_path, export_id)?;
    let summary = summarize(&records)?;

    println!("\nExport Summary:");
    println!("  Study: {} ({})", manifest.study_id, manifest.kind);
    println!("  Format: {}", manifest.format);
    println!("  Written: {}", manifest.timestamp);
    println!("  Samples: {}", summary.record_count);
    println!(
        "  Time range: {:.3} - {:.3}",
        summary.time_range.0, summary.time_range.1
    );
    println!("\nChannels:");
    for channel in summary.channels {
        let (lo, hi) = av_app::channel_range(&records, &channel)?;
        println!("  {:<24} {:>12.4} .. {:<12.4}", channel, lo, hi);
    }
    Ok(())
}

fn cmd_brightness(
    period: f64,
    max: f64,
    min: f64,
    variant: StarVariant,
    at: Option<f64>,
) -> AppResult<()> {
    if let Some(t) = at {
        let value = av_variable::brightness_at(period, max, min, variant, t)?;
        println!("{}", value);
        return Ok(());
    }

    print_study_csv(StudyKind::VariableStar {
        period_days: period,
        max_brightness: max,
        min_brightness: min,
        variant: Some(variant.label().to_string()),
        periods: av_variable::CURVE_PERIODS,
        step_days: av_variable::CURVE_STEP_DAYS,
    })
}

/// Evaluate an ad-hoc study and print its records as CSV.
fn print_study_csv(kind: StudyKind) -> AppResult<()> {
    let study = StudyDef {
        id: "cli".to_string(),
        name: kind.label().to_string(),
        kind,
    };
    validate_study(&study)?;

    let records = to_records(&evaluate_study(&study)?);
    let csv = render_export(ExportFormat::Csv, &records, &ExportOptions::default())?;
    print!("{}", csv);
    Ok(())
}
