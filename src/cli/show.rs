use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pinfile::{Manifest, PackageName, Version};
use serde::Serialize;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display detailed information about one requirement entry")]
pub struct Show {
    /// The package name to look up (spelling-insensitive)
    #[clap(value_parser = parse_name)]
    package: PackageName,

    /// Test whether a concrete version satisfies the entry's constraint
    #[arg(long, value_name = "VERSION")]
    matches: Option<Version>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

/// Parse a package name from a CLI argument.
fn parse_name(s: &str) -> Result<PackageName, String> {
    s.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Serialize)]
struct Detail {
    name: String,
    normalized: String,
    constraint: Option<String>,
    comment: Option<String>,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<bool>,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, manifest: PathBuf) -> anyhow::Result<()> {
        let manifest = Manifest::load(&manifest)?;
        let detail = self.detail(&manifest)?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
            OutputFormat::Pretty => Self::output_pretty(&detail, self.matches.as_ref()),
        }

        Ok(())
    }

    fn detail(&self, manifest: &Manifest) -> anyhow::Result<Detail> {
        let entry = manifest
            .find(&self.package)
            .with_context(|| format!("package '{}' not found in manifest", self.package))?;

        // An unconstrained entry accepts every version.
        let matches = self
            .matches
            .as_ref()
            .map(|version| entry.constraint().is_none_or(|c| c.matches(version)));

        Ok(Detail {
            name: entry.name().as_str().to_string(),
            normalized: entry.name().normalized().to_string(),
            constraint: entry.constraint().map(ToString::to_string),
            comment: entry.comment().map(ToString::to_string),
            line: entry.line(),
            matches,
        })
    }

    fn output_pretty(detail: &Detail, candidate: Option<&Version>) {
        println!("# {}", detail.name);

        println!("{}", "Entry".dim());
        println!("  Normalized: {}", detail.normalized);
        println!(
            "  Constraint: {}",
            detail.constraint.as_deref().unwrap_or("(unconstrained)")
        );
        if let Some(comment) = &detail.comment {
            println!("  Comment:    {comment}");
        }
        println!("  Line:       {}", detail.line);

        if let (Some(satisfied), Some(version)) = (detail.matches, candidate) {
            let verdict = if satisfied {
                format!("{version} satisfies the constraint").success()
            } else {
                format!("{version} does not satisfy the constraint").warning()
            };
            println!("\n{verdict}");
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const EXAMPLE: &str = "\
flake8~=3.7
numpy
pyperclip~=1.8.2  # clipboard access
";

    fn show(package: &str, matches: Option<&str>) -> Show {
        Show {
            package: package.parse().unwrap(),
            matches: matches.map(|s| s.parse().unwrap()),
            output: OutputFormat::Pretty,
        }
    }

    fn manifest() -> Manifest {
        EXAMPLE.parse().unwrap()
    }

    #[test]
    fn detail_reports_entry_fields() {
        let detail = show("pyperclip", None).detail(&manifest()).unwrap();
        assert_eq!(detail.name, "pyperclip");
        assert_eq!(detail.constraint.as_deref(), Some("~=1.8.2"));
        assert_eq!(detail.comment.as_deref(), Some("clipboard access"));
        assert_eq!(detail.line, 3);
        assert_eq!(detail.matches, None);
    }

    #[test]
    fn matches_against_constrained_entry() {
        let satisfied = show("flake8", Some("3.8")).detail(&manifest()).unwrap();
        assert_eq!(satisfied.matches, Some(true));

        let unsatisfied = show("flake8", Some("4.0")).detail(&manifest()).unwrap();
        assert_eq!(unsatisfied.matches, Some(false));
    }

    #[test]
    fn unconstrained_entry_accepts_any_version() {
        let detail = show("numpy", Some("1.21.0")).detail(&manifest()).unwrap();
        assert_eq!(detail.matches, Some(true));
    }

    #[test]
    fn lookup_is_spelling_insensitive() {
        let manifest: Manifest = "Pre_Commit~=2.13\n".parse().unwrap();
        let detail = show("pre-commit", None).detail(&manifest).unwrap();
        assert_eq!(detail.name, "Pre_Commit");
        assert_eq!(detail.normalized, "pre-commit");
    }

    #[test]
    fn run_errors_when_package_absent() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("requirements.txt");
        std::fs::write(&path, EXAMPLE).unwrap();

        let error = show("isort", None).run(path).unwrap_err();
        assert!(error.to_string().contains("isort"));
        assert!(error.to_string().contains("not found"));
    }

    #[test]
    fn run_succeeds_for_present_package() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("requirements.txt");
        std::fs::write(&path, EXAMPLE).unwrap();

        show("flake8", Some("3.7.4"))
            .run(path)
            .expect("show command should succeed");
    }
}
