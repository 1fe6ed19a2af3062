use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pinfile::{Manifest, Requirement};
use serde::Serialize;
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

/// Command arguments for `pin list`.
#[derive(Debug, Parser)]
#[command(about = "List requirement entries")]
pub struct List {
    /// Show only entries without a version constraint.
    #[arg(long)]
    unconstrained: bool,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct Row {
    name: String,
    normalized: String,
    constraint: Option<String>,
    comment: Option<String>,
    line: usize,
}

impl Row {
    fn new(entry: &Requirement) -> Self {
        Self {
            name: entry.name().as_str().to_string(),
            normalized: entry.name().normalized().to_string(),
            constraint: entry.constraint().map(ToString::to_string),
            comment: entry.comment().map(ToString::to_string),
            line: entry.line(),
        }
    }
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, manifest: PathBuf) -> anyhow::Result<()> {
        let manifest = Manifest::load(&manifest)?;
        let rows = self.rows(&manifest);

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table => self.output_table(&rows),
        }

        Ok(())
    }

    fn rows(&self, manifest: &Manifest) -> Vec<Row> {
        manifest
            .entries()
            .filter(|entry| !self.unconstrained || entry.constraint().is_none())
            .map(Row::new)
            .collect()
    }

    fn output_table(&self, rows: &[Row]) {
        if rows.is_empty() {
            if !self.quiet {
                println!("No entries found.");
            }
            return;
        }

        let name_width = rows
            .iter()
            .map(|row| row.name.len())
            .chain(std::iter::once("NAME".len()))
            .max()
            .unwrap_or(0);
        let constraint_width = rows
            .iter()
            .map(|row| row.constraint.as_deref().unwrap_or("*").len())
            .chain(std::iter::once("CONSTRAINT".len()))
            .max()
            .unwrap_or(0);

        let show_comments = !is_narrow();

        if !self.quiet {
            let header = if show_comments {
                format!("{:name_width$}  {:constraint_width$}  COMMENT", "NAME", "CONSTRAINT")
            } else {
                format!("{:name_width$}  CONSTRAINT", "NAME")
            };
            println!("{}", header.dim());
        }

        for row in rows {
            let constraint = row.constraint.as_deref().unwrap_or("*");
            if show_comments {
                let comment = row.comment.as_deref().unwrap_or("");
                println!("{:name_width$}  {constraint:constraint_width$}  {comment}", row.name);
            } else {
                println!("{:name_width$}  {constraint}", row.name);
            }
        }
    }
}
