use std::env;
use std::path::{Path, PathBuf};

use colbind_check::{CheckSettings, ValidationReport, check_graph_json};
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut graph_path: Option<PathBuf> = None;
    let mut settings = CheckSettings::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-type" => {
                settings.base_type = args.next().ok_or("missing --base-type value")?;
            }
            _ => {
                if graph_path.is_none() {
                    graph_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let graph_path = graph_path.ok_or("missing graph path")?;
    let graph_json = load_json(&graph_path)?;
    let (_, report) = check_graph_json(&graph_json, &settings)?;

    if !report.is_ok() {
        eprintln!("graph check failed");
        print_report(&report);
        std::process::exit(1);
    }

    if !report.warnings.is_empty() {
        eprintln!("graph checked with warnings:");
        print_report(&report);
    } else {
        println!("graph checked successfully");
    }

    Ok(())
}

fn load_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let json = serde_json::from_str(&contents)?;
    Ok(json)
}

fn print_report(report: &ValidationReport) {
    for diagnostic in report.iter() {
        eprintln!("{diagnostic}");
        if let Some(hint) = &diagnostic.hint {
            eprintln!("  hint: {hint}");
        }
    }
}
