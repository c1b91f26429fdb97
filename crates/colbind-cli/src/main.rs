mod config;
mod registry;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colbind_check::{
    CheckError, CheckSettings, ProcessSummary, ValidationReport, check_graph_json,
    graph_json_schema,
};
use colbind_core::GRAPH_VERSION;
use config::{ConfigError, DEFAULT_SETTINGS_FILE, load_or_create_settings, load_settings};
use registry::{RunContext, init_run_logging, init_stderr_logging, start_run, write_report};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("check error: {0}")]
    Check(#[from] CheckError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error reading {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Parser, Debug)]
#[command(name = "colbind", version, about = "Object-to-column annotation checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a type graph and report diagnostics.
    Check(CheckArgs),
    /// Print the JSON Schema for type graph documents.
    Schema,
    /// Write default settings if the file does not exist.
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Type graph JSON document.
    #[arg(value_name = "GRAPH")]
    graph: PathBuf,
    /// Settings file.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Override the base persistent-object type.
    #[arg(long, value_name = "NAME")]
    base_type: Option<String>,
    /// Fail when warnings are reported.
    #[arg(long, default_value_t = false)]
    deny_warnings: bool,
    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Directory for run artifacts (config, logs, diagnostics).
    #[arg(long)]
    run_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Settings file to create.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::Schema => {
            let json = serde_json::to_string_pretty(&graph_json_schema())?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Init(args) => {
            init_stderr_logging()?;
            let settings = load_or_create_settings(&args.config)?;
            tracing::info!(
                event = "settings_ready",
                path = %args.config.display(),
                base_type = %settings.base_type
            );
            println!("settings at {}", args.config.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_check(args: CheckArgs) -> Result<ExitCode, CliError> {
    let CheckArgs {
        graph,
        config,
        base_type,
        deny_warnings,
        format,
        run_dir,
    } = args;

    let mut settings = load_settings(&config)?;
    if let Some(base_type) = base_type {
        settings.base_type = base_type;
    }
    settings.deny_warnings |= deny_warnings;

    let run_id = Uuid::new_v4().to_string();
    let run_paths = match &run_dir {
        Some(run_dir) => {
            let ctx = RunContext {
                run_id: run_id.clone(),
                started_at: chrono::Utc::now(),
                input: graph.clone(),
                graph_version: GRAPH_VERSION.to_string(),
                settings: settings.clone(),
                run_dir: run_dir.clone(),
            };
            let paths = start_run(&ctx)?;
            init_run_logging(&paths.logs_path)?;
            tracing::info!(event = "run_registered", path = %paths.root.display());
            Some(paths)
        }
        None => {
            init_stderr_logging()?;
            None
        }
    };

    tracing::info!(event = "run_started", run_id = %run_id, input = %graph.display());
    let timer = Instant::now();

    let (summary, report) = check_file(&graph, &settings)?;
    let passed = run_passed(&report, settings.deny_warnings);

    match format {
        OutputFormat::Text => print_report(&report, &summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(paths) = &run_paths {
        write_report(paths, &run_id, passed, summary, &report)?;
        tracing::info!(event = "diagnostics_written", path = %paths.diagnostics_path.display());
    }

    let duration_ms = timer.elapsed().as_millis();
    let status = if passed { "success" } else { "failure" };
    tracing::info!(event = "run_finished", status = status, duration_ms = duration_ms);

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn check_file(
    path: &Path,
    settings: &CheckSettings,
) -> Result<(ProcessSummary, ValidationReport), CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let graph_json: serde_json::Value = serde_json::from_str(&contents)?;

    Ok(check_graph_json(&graph_json, settings)?)
}

fn run_passed(report: &ValidationReport, deny_warnings: bool) -> bool {
    report.is_clean() || (report.is_ok() && !deny_warnings)
}

fn print_report(report: &ValidationReport, summary: &ProcessSummary) {
    for diagnostic in report.iter() {
        println!("{diagnostic}");
        if let Some(hint) = &diagnostic.hint {
            println!("  hint: {hint}");
        }
    }
    println!(
        "{} classes checked: {} errors, {} warnings",
        summary.classes_analyzed,
        report.errors.len(),
        report.warnings.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_arguments() {
        let cli = Cli::try_parse_from([
            "colbind",
            "check",
            "graph.json",
            "--base-type",
            "Record",
            "--deny-warnings",
            "--format",
            "json",
        ])
        .expect("parse args");

        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.graph, PathBuf::from("graph.json"));
        assert_eq!(args.base_type.as_deref(), Some("Record"));
        assert!(args.deny_warnings);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, PathBuf::from(DEFAULT_SETTINGS_FILE));
        assert!(args.run_dir.is_none());
    }

    #[test]
    fn check_file_reports_fixture_diagnostics() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../colbind-check/tests/fixtures/library.graph.json");

        let (summary, report) =
            check_file(&path, &CheckSettings::default()).expect("check fixture");
        assert_eq!(summary.classes_analyzed, 3);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn warnings_fail_only_when_denied() {
        let (_, report) = check_file(
            &Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("../colbind-check/tests/fixtures/library.graph.json"),
            &CheckSettings::default(),
        )
        .expect("check fixture");
        assert!(!run_passed(&report, false));

        let mut warnings_only = report.clone();
        warnings_only.errors.clear();
        assert!(run_passed(&warnings_only, false));
        assert!(!run_passed(&warnings_only, true));
        assert!(run_passed(&ValidationReport::default(), true));
    }

    #[test]
    fn oversized_version_is_reported_not_raised() {
        let dir = std::env::temp_dir().join(format!("colbind-cli-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("graph.json");
        let graph = serde_json::json!({
            "graph_version": "0.1",
            "classes": [
                {
                    "name": "a.Person",
                    "superclass": "DbObject",
                    "object_info": { "version": 3000000000u64 },
                    "members": []
                }
            ]
        });
        std::fs::write(&path, graph.to_string()).expect("write graph");

        let (summary, report) =
            check_file(&path, &CheckSettings::default()).expect("check graph");
        assert_eq!(summary.classes_analyzed, 0);
        assert!(report.errors.iter().all(|error| error.code == "schema_violation"));
        assert!(!run_passed(&report, false));

        std::fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn missing_graph_file_is_a_read_error() {
        let err = check_file(Path::new("does/not/exist.json"), &CheckSettings::default())
            .expect_err("missing file");
        assert!(matches!(err, CliError::Read { .. }));
    }
}
