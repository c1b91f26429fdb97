use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use colbind_check::{CheckSettings, ProcessSummary, ValidationReport};

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub input: PathBuf,
    pub graph_version: String,
    pub settings: CheckSettings,
    pub run_dir: PathBuf,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub input: String,
    pub graph_version: String,
    pub settings: CheckSettings,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Diagnostics artifact written when the run finishes.
#[derive(Debug, Serialize)]
struct RunOutcome<'a> {
    run_id: &'a str,
    passed: bool,
    summary: ProcessSummary,
    report: &'a ValidationReport,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub diagnostics_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");
    let diagnostics_path = root.join("diagnostics.json");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        input: ctx.input.display().to_string(),
        graph_version: ctx.graph_version.clone(),
        settings: ctx.settings.clone(),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        root,
        logs_path,
        diagnostics_path,
    })
}

pub fn write_report(
    paths: &RunPaths,
    run_id: &str,
    passed: bool,
    summary: ProcessSummary,
    report: &ValidationReport,
) -> RegistryResult<()> {
    let outcome = RunOutcome {
        run_id,
        passed,
        summary,
        report,
    };
    write_json(&paths.diagnostics_path, &outcome)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_run_lays_out_artifacts() {
        let run_dir = std::env::temp_dir().join(format!("colbind-runs-{}", uuid::Uuid::new_v4()));
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at: Utc::now(),
            input: PathBuf::from("graph.json"),
            graph_version: "0.1".to_string(),
            settings: CheckSettings::default(),
            run_dir: run_dir.clone(),
        };

        let paths = start_run(&ctx).expect("start run");
        assert!(paths.root.join("config.json").exists());
        assert!(paths.logs_path.exists());
        assert!(paths.root.file_name().unwrap().to_string_lossy().ends_with("__run_abc"));

        let report = ValidationReport::default();
        write_report(&paths, "abc", true, ProcessSummary::default(), &report)
            .expect("write report");
        let written: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&paths.diagnostics_path).expect("read diagnostics"),
        )
        .expect("parse diagnostics");
        assert_eq!(written["passed"], serde_json::Value::Bool(true));
        assert_eq!(written["report"]["errors"], serde_json::json!([]));

        std::fs::remove_dir_all(run_dir).expect("cleanup");
    }
}
