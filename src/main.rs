use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use posture_scan::output::OutputFormat;
use posture_scan::scanner::{Grade, Scanner};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_BELOW_THRESHOLD: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the battery once and print the graded report
    Scan {
        /// Snapshot file (.json or YAML), or "-" to read JSON from stdin
        snapshot: String,

        /// Output format (defaults to the config file's `format`)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Exit with status 3 if the grade is worse than this (A-F)
        #[arg(long)]
        min_grade: Option<Grade>,
    },
    /// Watch the battery run check by check in a live view
    Watch {
        /// Snapshot file (.json or YAML), or "-" to read JSON from stdin
        snapshot: String,
    },
    /// Print an example snapshot as YAML
    Template,
}

#[derive(Parser, Debug)]
#[command(name = "posture-scan")]
#[command(about = "Grade a captured environment's security posture", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/posture-scan/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    if let Commands::Template = cli.command {
        match serde_saphyr::to_string(&posture_scan::environment::Snapshot::example()) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Failed to render template: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match posture_scan::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = posture_scan::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!(
            "Pacing {} (start delay {:?}), theme {:?}",
            if config.pacing.enabled { "on" } else { "off" },
            config.pacing.start_delay(),
            config.theme
        );
    }

    match cli.command {
        Commands::Scan {
            snapshot,
            format,
            min_grade,
        } => {
            let env = match posture_scan::environment::load_snapshot(&snapshot) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Snapshot error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let mut scanner = Scanner::new();
            let verbose = cli.verbose;
            let result = scanner.start_scan_observed(
                &env,
                &mut |run: posture_scan::scanner::RunId, check: &posture_scan::scanner::Check| {
                    if verbose && check.status.is_terminal() {
                        eprintln!(
                            "  {} {}: {} {}/{}",
                            run,
                            check.id,
                            check.status.as_str(),
                            check.score,
                            check.max_score
                        );
                    }
                },
            );

            let format = format.unwrap_or(config.format);
            let use_colors = posture_scan::output::should_use_colors();
            match posture_scan::output::render(&result, format, use_colors) {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Scanned {} checks in {:?}", result.checks.len(), start_time.elapsed());
            }

            if let Some(threshold) = min_grade {
                if !result.grade().meets(threshold) {
                    if cli.verbose {
                        eprintln!("Grade {} is below the required {}", result.grade(), threshold);
                    }
                    std::process::exit(EXIT_BELOW_THRESHOLD);
                }
            }
        }
        Commands::Watch { snapshot } => {
            let env = match posture_scan::environment::load_snapshot(&snapshot) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Snapshot error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let theme = posture_scan::tui::resolve_theme(config.theme);
            let app = posture_scan::tui::App::new(
                env,
                snapshot,
                config.pacing.clone(),
                theme,
                cli.verbose,
            );

            if let Err(e) = posture_scan::tui::run_tui(app).await {
                eprintln!("Live view error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Template => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
