// prodmatch CLI - headless product matching operations

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use prodmatch_engine::{MatchConfig, MatchError, MatchSession, RankReport, SearchReport};

use exit_codes::{EXIT_DATA, EXIT_INVALID_CONFIG, EXIT_ROW_RANGE, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "pmatch")]
#[command(about = "Product matching engine (CLI mode, headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank catalog candidates for one reference row
    #[command(after_help = "\
Examples:
  pmatch rank match.toml --row 0
  pmatch rank match.toml --row 0 --json
  pmatch rank match.toml --row 0 --top 25 --output ranked.json")]
    Rank {
        /// Path to the .match.toml config file
        config: PathBuf,

        /// Reference row index (0-based)
        #[arg(long)]
        row: usize,

        /// Override [ranking].top_n from the config
        #[arg(long)]
        top: Option<usize>,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Search the catalog lexically, re-scored against a reference row
    #[command(after_help = "\
Examples:
  pmatch search match.toml --row 3 'leche entera'
  pmatch search match.toml --row 3 --json 'coca cola'")]
    Search {
        /// Path to the .match.toml config file
        config: PathBuf,

        /// Free-text query; every term is required
        query: String,

        /// Reference row index (0-based)
        #[arg(long)]
        row: usize,

        /// Override [ranking].top_n from the config
        #[arg(long)]
        top: Option<usize>,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,
    },

    /// Validate a match config without running
    #[command(after_help = "\
Examples:
  pmatch validate match.toml")]
    Validate {
        /// Path to the .match.toml config file
        config: PathBuf,
    },
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError { code, message: message.into() }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Rank { config, row, top, json, output } => {
            cmd_rank(&config, row, top, json, output)
        }
        Commands::Search { config, query, row, top, json } => {
            cmd_search(&config, &query, row, top, json)
        }
        Commands::Validate { config } => cmd_validate(&config),
    }
}

/// Map an engine error onto the exit-code registry.
fn engine_err(err: MatchError) -> CliError {
    let code = match &err {
        MatchError::ConfigParse(_) | MatchError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        MatchError::MissingColumn { .. } | MatchError::Io(_) => EXIT_DATA,
        MatchError::RowOutOfRange { .. } => EXIT_ROW_RANGE,
    };
    cli_err(code, err.to_string())
}

/// Read the config and both CSV files (paths resolved relative to the config
/// file's directory) and build a session.
fn load_session(config_path: &Path) -> Result<(MatchConfig, MatchSession), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| cli_err(EXIT_DATA, format!("cannot read config: {e}")))?;
    let config = MatchConfig::from_toml(&config_str).map_err(engine_err)?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let read = |file: &str| -> Result<String, CliError> {
        let path = base_dir.join(file);
        std::fs::read_to_string(&path)
            .map_err(|e| cli_err(EXIT_DATA, format!("cannot read {}: {e}", path.display())))
    };
    let reference_csv = read(&config.datasets.reference)?;
    let catalog_csv = read(&config.datasets.catalog)?;

    let session =
        MatchSession::from_config(&config, &reference_csv, &catalog_csv).map_err(engine_err)?;
    Ok((config, session))
}

fn cmd_rank(
    config_path: &Path,
    row: usize,
    top: Option<usize>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let (config, session) = load_session(config_path)?;
    let top_n = top.unwrap_or(config.ranking.top_n);
    let report = session.rank(row, top_n).map_err(engine_err)?;

    emit_json(&report, json_output, output_file.as_deref())?;
    if !json_output {
        print!("{}", rank_summary(&report));
    }
    Ok(())
}

fn cmd_search(
    config_path: &Path,
    query: &str,
    row: usize,
    top: Option<usize>,
    json_output: bool,
) -> Result<(), CliError> {
    let (config, session) = load_session(config_path)?;
    let top_n = top.unwrap_or(config.ranking.top_n);
    let report = session.search(row, query, top_n).map_err(engine_err)?;

    emit_json(&report, json_output, None)?;
    if !json_output {
        print!("{}", search_summary(&report));
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| cli_err(EXIT_DATA, format!("cannot read config: {e}")))?;
    let config = MatchConfig::from_toml(&config_str).map_err(engine_err)?;
    eprintln!(
        "config '{}' is valid: reference={}, catalog={}, top_n={}",
        config.name, config.datasets.reference, config.datasets.catalog, config.ranking.top_n
    );
    Ok(())
}

fn emit_json<T: serde::Serialize>(
    report: &T,
    to_stdout: bool,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    if !to_stdout && output_file.is_none() {
        return Ok(());
    }
    let json_str = serde_json::to_string_pretty(report)
        .map_err(|e| cli_err(exit_codes::EXIT_ERROR, format!("JSON serialization error: {e}")))?;
    if let Some(path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_DATA, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }
    if to_stdout {
        println!("{json_str}");
    }
    Ok(())
}

fn rank_summary(report: &RankReport) -> String {
    let mut out = format!(
        "row {} [{}] {}: {} candidate(s)\n",
        report.meta.reference_index,
        report.reference.code,
        report.reference.description,
        report.candidates.len(),
    );
    for (position, candidate) in report.candidates.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<12} {:>7.1}  {}\n",
            position + 1,
            candidate.record.code,
            candidate.score.total,
            candidate.record.description,
        ));
    }
    out
}

fn search_summary(report: &SearchReport) -> String {
    let mut out = format!(
        "query '{}' for row {} [{}]: {} qualifying, showing {}\n",
        report.query,
        report.meta.reference_index,
        report.reference.code,
        report.qualifying,
        report.hits.len(),
    );
    for (position, hit) in report.hits.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<12} {:>7.1}  (+{})  {}\n",
            position + 1,
            hit.record.code,
            hit.score.total,
            hit.lexical_bonus,
            hit.record.description,
        ));
    }
    out
}
