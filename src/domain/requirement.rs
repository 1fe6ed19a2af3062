use std::fmt;

use super::{PackageName, VersionConstraint};

/// A single requirement entry: a package, an optional version constraint,
/// and an optional trailing comment annotation.
///
/// The comment is free text for human readers (often a URL) and is never
/// machine-interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: PackageName,
    constraint: Option<VersionConstraint>,
    comment: Option<String>,
    line: usize,
}

impl Requirement {
    /// Create an entry from pre-validated parts.
    ///
    /// `line` is the 1-based line number of the entry in its manifest, used
    /// for diagnostics; entries constructed programmatically may pass 0.
    #[must_use]
    pub const fn new(
        name: PackageName,
        constraint: Option<VersionConstraint>,
        comment: Option<String>,
        line: usize,
    ) -> Self {
        Self {
            name,
            constraint,
            comment,
            line,
        }
    }

    /// The package name.
    #[must_use]
    pub const fn name(&self) -> &PackageName {
        &self.name
    }

    /// The version constraint, or `None` for an unconstrained entry.
    #[must_use]
    pub const fn constraint(&self) -> Option<&VersionConstraint> {
        self.constraint.as_ref()
    }

    /// The trailing comment annotation, without its `#` marker.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The 1-based line number of this entry in its source manifest.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(constraint) = &self.constraint {
            write!(f, "{constraint}")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, "  # {comment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PackageName {
        PackageName::try_from(s).unwrap()
    }

    #[test]
    fn display_constrained() {
        let entry = Requirement::new(
            name("flake8"),
            Some(VersionConstraint::try_from("~=3.7").unwrap()),
            None,
            1,
        );
        assert_eq!(entry.to_string(), "flake8~=3.7");
    }

    #[test]
    fn display_unconstrained() {
        let entry = Requirement::new(name("numpy"), None, None, 1);
        assert_eq!(entry.to_string(), "numpy");
    }

    #[test]
    fn display_with_comment() {
        let entry = Requirement::new(
            name("flake8-docstrings"),
            Some(VersionConstraint::try_from("~=1.5").unwrap()),
            Some("https://pypi.org/project/flake8-docstrings/".to_string()),
            1,
        );
        assert_eq!(
            entry.to_string(),
            "flake8-docstrings~=1.5  # https://pypi.org/project/flake8-docstrings/"
        );
    }

    #[test]
    fn equality_ignores_name_spelling() {
        let a = Requirement::new(name("Pre_Commit"), None, None, 1);
        let b = Requirement::new(name("pre-commit"), None, None, 1);
        assert_eq!(a, b);
    }
}
