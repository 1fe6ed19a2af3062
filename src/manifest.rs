//! The manifest: an ordered collection of requirement entries and comments.
//!
//! Parsing preserves every line (blank, comment, or requirement) in order,
//! so a parsed manifest can be serialized back to equivalent text.

use std::{fmt, fs, io, path::Path, str::FromStr};

use tracing::debug;

use crate::domain::{PackageName, Requirement};

mod parser;
pub use parser::{ParseError, ParseErrorKind};

mod conflict;
pub use conflict::{Conflict, ConflictError};

/// A single manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A blank (or whitespace-only) line.
    Blank,
    /// A full-line comment, stored verbatim including its `#` marker.
    Comment(String),
    /// A requirement entry.
    Requirement(Requirement),
}

/// An ordered dependency manifest.
///
/// Reading the same text twice yields identical manifests: parsing is a pure
/// function of the input and performs no I/O beyond [`Manifest::load`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    lines: Vec<Line>,
}

impl Manifest {
    /// Read and parse a manifest from a file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, or
    /// [`LoadError::Parse`] if a line is malformed.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        debug!("loading manifest from {}", path.display());
        let text = fs::read_to_string(path)?;
        Ok(text.parse()?)
    }

    /// Serialize the manifest and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        debug!("writing manifest to {}", path.display());
        fs::write(path, self.to_string())
    }

    /// All lines, in source order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The requirement entries, in source order, skipping comments and
    /// blank lines.
    pub fn entries(&self) -> impl Iterator<Item = &Requirement> {
        self.lines.iter().filter_map(|line| match line {
            Line::Requirement(entry) => Some(entry),
            Line::Blank | Line::Comment(_) => None,
        })
    }

    /// Look up an entry by package name (normalized comparison).
    ///
    /// If the same package appears more than once, the first entry wins;
    /// use [`Manifest::validate`] to detect that situation.
    #[must_use]
    pub fn find(&self, name: &PackageName) -> Option<&Requirement> {
        self.entries().find(|entry| entry.name() == name)
    }

    /// Number of requirement entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Whether the manifest contains no requirement entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// All duplicate-package conflicts: pairs of entries naming the same
    /// package (after normalization) with differing constraints.
    ///
    /// Repeating a package with an *identical* constraint is redundant but
    /// not a conflict.
    #[must_use]
    pub fn conflicts(&self) -> Vec<Conflict> {
        conflict::find(self)
    }

    /// Check that no package appears twice with conflicting constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ConflictError`] describing the first conflict found.
    pub fn validate(&self) -> Result<(), ConflictError> {
        match self.conflicts().into_iter().next() {
            Some(conflict) => Err(ConflictError(conflict)),
            None => Ok(()),
        }
    }
}

impl FromStr for Manifest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s
            .lines()
            .enumerate()
            .map(|(index, text)| parser::parse_line(index + 1, text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lines })
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Errors that can occur when loading a manifest from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The file contents are not a valid manifest.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PackageName;

    const EXAMPLE: &str = "\
# Base tools
flake8~=3.7
isort
pre-commit~=2.13

# Flake8 plugins
flake8-annotations~=2.0

# project
colorama~=0.4.4
numpy
pyperclip~=1.8.2
";

    #[test]
    fn parses_entries_in_order() {
        let manifest: Manifest = EXAMPLE.parse().unwrap();
        let names: Vec<&str> = manifest.entries().map(|e| e.name().as_str()).collect();
        assert_eq!(
            names,
            [
                "flake8",
                "isort",
                "pre-commit",
                "flake8-annotations",
                "colorama",
                "numpy",
                "pyperclip"
            ]
        );
        assert_eq!(manifest.len(), 7);
    }

    #[test]
    fn comments_and_blanks_produce_no_entries() {
        let manifest: Manifest = "# only a comment\n\n   \n# another\n".parse().unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.lines().len(), 4);
    }

    #[test]
    fn empty_input_is_an_empty_manifest() {
        let manifest: Manifest = "".parse().unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.lines().is_empty());
    }

    #[test]
    fn parsing_is_idempotent() {
        let first: Manifest = EXAMPLE.parse().unwrap();
        let second: Manifest = EXAMPLE.parse().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serialize_then_reparse_round_trips() {
        let manifest: Manifest = EXAMPLE.parse().unwrap();
        let rendered = manifest.to_string();
        let reparsed: Manifest = rendered.parse().unwrap();
        assert_eq!(manifest, reparsed);
    }

    #[test]
    fn find_uses_normalized_names() {
        let manifest: Manifest = "Pre_Commit~=2.13\n".parse().unwrap();
        let name = PackageName::try_from("pre-commit").unwrap();
        let entry = manifest.find(&name).unwrap();
        assert_eq!(entry.name().as_str(), "Pre_Commit");

        let missing = PackageName::try_from("flake8").unwrap();
        assert!(manifest.find(&missing).is_none());
    }

    #[test]
    fn load_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, EXAMPLE).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.len(), 7);

        let copy = dir.path().join("rewritten.txt");
        manifest.save(&copy).unwrap();
        let reloaded = Manifest::load(&copy).unwrap();
        assert_eq!(manifest, reloaded);
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Manifest::load(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn load_surfaces_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, "flake8~=\n").unwrap();
        let result = Manifest::load(&path);
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
