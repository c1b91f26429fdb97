use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use super::{RegistryError, RegistryResult};

const LOG_ENV: &str = "COLBIND_LOG";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Human-readable logs on stderr, `warn` and above unless `COLBIND_LOG` says otherwise.
pub fn init_stderr_logging() -> RegistryResult<()> {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(env_filter("warn"))
        .with(layer)
        .try_init()
        .map_err(|err| RegistryError::Logging(err.to_string()))
}

/// JSON lines appended to the run's log file.
pub fn init_run_logging(path: &Path) -> RegistryResult<()> {
    run_subscriber(path, env_filter("debug"))?
        .try_init()
        .map_err(|err| RegistryError::Logging(err.to_string()))
}

fn run_subscriber(
    path: &Path,
    filter: EnvFilter,
) -> RegistryResult<impl Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Mutex::new(file));

    Ok(tracing_subscriber::registry().with(filter).with(layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_log_records_structured_events() {
        let dir = std::env::temp_dir().join(format!("colbind-logs-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("logs.ndjson");

        let subscriber = run_subscriber(&path, EnvFilter::new("debug")).expect("subscriber");
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(event = "run_started", run_id = "abc");
            tracing::trace!(event = "filtered_out");
        });

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], "INFO");
        assert_eq!(lines[0]["fields"]["event"], "run_started");
        assert_eq!(lines[0]["fields"]["run_id"], "abc");
        assert!(lines[0]["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));

        std::fs::remove_dir_all(dir).expect("cleanup");
    }
}
