use std::{path::PathBuf, process};

use clap::Parser;
use pinfile::Manifest;
use serde::Serialize;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser, Default)]
#[command(about = "Parse the manifest and check for conflicting pins")]
pub struct Check {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct Report {
    entries: usize,
    unconstrained: usize,
    conflicts: Vec<ConflictRow>,
}

#[derive(Debug, Serialize)]
struct ConflictRow {
    package: String,
    first: String,
    first_line: usize,
    second: String,
    second_line: usize,
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, manifest: PathBuf) -> anyhow::Result<()> {
        let manifest = match Manifest::load(&manifest) {
            Ok(manifest) => manifest,
            Err(error) => {
                eprintln!("{}", error.to_string().failure());
                process::exit(1);
            }
        };

        let conflicts = manifest.conflicts();
        let report = Report {
            entries: manifest.len(),
            unconstrained: manifest
                .entries()
                .filter(|entry| entry.constraint().is_none())
                .count(),
            conflicts: conflicts
                .iter()
                .map(|conflict| ConflictRow {
                    package: conflict.package().to_string(),
                    first: conflict
                        .first()
                        .constraint()
                        .map_or_else(|| "unconstrained".to_string(), ToString::to_string),
                    first_line: conflict.first().line(),
                    second: conflict
                        .second()
                        .constraint()
                        .map_or_else(|| "unconstrained".to_string(), ToString::to_string),
                    second_line: conflict.second().line(),
                })
                .collect(),
        };

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => self.output_table(&report, &conflicts),
        }

        if report.conflicts.is_empty() {
            Ok(())
        } else {
            process::exit(1);
        }
    }

    fn output_table(&self, report: &Report, conflicts: &[pinfile::Conflict]) {
        if !self.quiet {
            println!(
                "{} entries ({} unconstrained)",
                report.entries, report.unconstrained
            );
        }

        if conflicts.is_empty() {
            if !self.quiet {
                println!("{}", "No conflicts found".success());
            }
        } else {
            for conflict in conflicts {
                println!("{}", conflict.to_string().failure());
            }
        }
    }
}
