use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use tumbling_cli::config::JudgeConfig;
use tumbling_cli::judge::JudgeRunner;
use tumbling_cli::logging::init_logging;
use tumbling_cli::render::render_text;

/// Exit status used by `--strict` when the routine breaks a rule.
const ILLEGAL_EXIT_CODE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Legality and bonus judge for two-pass tumbling routines.
#[derive(Debug, Parser)]
#[command(
    name = "tumbling-judge",
    author,
    version,
    about = "Check a tumbling routine and compute its bonuses"
)]
struct Cli {
    /// Path to the YAML routine file.
    #[arg(short, long, value_name = "FILE", default_value = "routine.yaml")]
    config: PathBuf,

    /// Override the message language (en or fr).
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Report format printed to stdout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write the JSON report to this path.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Exit with status 2 when the routine is not legal.
    #[arg(long)]
    strict: bool,

    /// Exit after validating the configuration (nothing is judged).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = JudgeConfig::from_path(&cli.config)?;

    if let Some(language) = cli.language {
        config.language = Some(language);
    }

    if let Some(output) = cli.output {
        config.output.json = Some(output);
    }

    config.validate()?;

    let logging_guard = init_logging(&config.logging)?;
    if let Some(guard) = logging_guard.as_ref() {
        eprintln!("Structured log: {}", guard.log_path.display());
    }
    let runner = JudgeRunner::new(config)?;

    if cli.validate_only {
        let routine = runner.routine()?;
        println!(
            "Configuration valid: {} routine with {} + {} elements.",
            routine.meta.track,
            routine.passes()[0].occupied(),
            routine.passes()[1].occupied()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let summary = runner.run()?;
    match cli.format {
        Format::Text => print!(
            "{}",
            render_text(&summary.routine, &summary.report, runner.catalog())
        ),
        Format::Json => println!(
            "{}",
            summary.report.to_json().context("serializing report")?
        ),
    }
    if let Some(path) = summary.json_path.as_ref() {
        eprintln!("Report written to {}", path.display());
    }

    // The guard lives until main returns, so the log is flushed on every exit path.
    if cli.strict && !summary.is_legal() {
        return Ok(ExitCode::from(ILLEGAL_EXIT_CODE));
    }

    Ok(ExitCode::SUCCESS)
}
