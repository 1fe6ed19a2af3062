//! Duplicate-package detection.

use std::{collections::HashMap, fmt};

use crate::domain::Requirement;

use super::Manifest;

/// Two entries pinning the same package to differing constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    first: Requirement,
    second: Requirement,
}

impl Conflict {
    /// The normalized name of the duplicated package.
    #[must_use]
    pub fn package(&self) -> &str {
        self.first.name().normalized()
    }

    /// The earlier of the two conflicting entries.
    #[must_use]
    pub const fn first(&self) -> &Requirement {
        &self.first
    }

    /// The later of the two conflicting entries.
    #[must_use]
    pub const fn second(&self) -> &Requirement {
        &self.second
    }
}

fn constraint_label(entry: &Requirement) -> String {
    entry
        .constraint()
        .map_or_else(|| "unconstrained".to_string(), ToString::to_string)
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "conflicting constraints for '{}': {} (line {}) vs {} (line {})",
            self.package(),
            constraint_label(&self.first),
            self.first.line(),
            constraint_label(&self.second),
            self.second.line(),
        )
    }
}

/// Error returned when a manifest pins the same package twice with
/// differing constraints.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ConflictError(pub Conflict);

/// Scan a manifest for duplicate packages with differing constraints.
///
/// Conflicts are reported in source order of the later entry. Each later
/// duplicate is compared against the *first* occurrence of its package.
pub(super) fn find(manifest: &Manifest) -> Vec<Conflict> {
    let mut seen: HashMap<&str, &Requirement> = HashMap::new();
    let mut conflicts = Vec::new();

    for entry in manifest.entries() {
        match seen.get(entry.name().normalized()) {
            None => {
                seen.insert(entry.name().normalized(), entry);
            }
            Some(first) => {
                if first.constraint() != entry.constraint() {
                    conflicts.push(Conflict {
                        first: (*first).clone(),
                        second: entry.clone(),
                    });
                }
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(text: &str) -> Manifest {
        text.parse().unwrap()
    }

    #[test]
    fn differing_constraints_conflict() {
        let manifest = manifest("flake8~=3.7\nflake8~=4.0\n");
        let conflicts = manifest.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].package(), "flake8");
        assert_eq!(conflicts[0].first().line(), 1);
        assert_eq!(conflicts[0].second().line(), 2);

        let error = manifest.validate().unwrap_err();
        assert!(error.to_string().contains("flake8"));
        assert!(error.to_string().contains("~=3.7"));
        assert!(error.to_string().contains("~=4.0"));
    }

    #[test]
    fn identical_constraints_do_not_conflict() {
        let manifest = manifest("flake8~=3.7\nflake8~=3.7\n");
        assert!(manifest.conflicts().is_empty());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn identical_unconstrained_duplicates_do_not_conflict() {
        let manifest = manifest("numpy\nnumpy\n");
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn constrained_vs_unconstrained_conflicts() {
        let manifest = manifest("numpy\nnumpy~=1.21\n");
        let conflicts = manifest.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].package(), "numpy");
    }

    #[test]
    fn duplicate_detection_is_on_normalized_names() {
        let manifest = manifest("pre_commit~=2.13\nPre-Commit~=2.14\n");
        let conflicts = manifest.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].package(), "pre-commit");
    }

    #[test]
    fn distinct_packages_never_conflict() {
        let manifest = manifest("flake8~=3.7\nisort~=5.0\nnumpy\n");
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn later_duplicates_compare_against_first_occurrence() {
        let manifest = manifest("flake8~=3.7\nflake8~=4.0\nflake8~=5.0\n");
        let conflicts = manifest.conflicts();
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].first().line(), 1);
        assert_eq!(conflicts[1].first().line(), 1);
        assert_eq!(conflicts[1].second().line(), 3);
    }
}
