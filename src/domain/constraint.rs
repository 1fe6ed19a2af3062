use std::{cmp::Ordering, fmt, str::FromStr};

use super::version::{self, Version};

/// A version comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Compatible release (`~=`): at least the given version, below the
    /// release obtained by dropping its last segment and incrementing the
    /// new last.
    Compatible,
    /// Exactly equal (`==`).
    Equal,
    /// Not equal (`!=`).
    NotEqual,
    /// Greater than or equal (`>=`).
    GreaterEqual,
    /// Less than or equal (`<=`).
    LessEqual,
    /// Strictly greater (`>`).
    Greater,
    /// Strictly less (`<`).
    Less,
}

impl Comparator {
    /// The comparator's textual form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compatible => "~=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::Less => "<",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Comparator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "~=" => Ok(Self::Compatible),
            "==" => Ok(Self::Equal),
            "!=" => Ok(Self::NotEqual),
            ">=" => Ok(Self::GreaterEqual),
            "<=" => Ok(Self::LessEqual),
            ">" => Ok(Self::Greater),
            "<" => Ok(Self::Less),
            _ => Err(Error::Comparator(s.to_string())),
        }
    }
}

/// A comparator paired with a version, e.g. `~=3.7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    comparator: Comparator,
    version: Version,
}

impl VersionConstraint {
    /// Create a constraint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CompatibleSegments`] for a compatible-release
    /// constraint whose version has fewer than two release segments:
    /// `~=3` is ambiguous and rejected, matching the packaging convention.
    pub fn new(comparator: Comparator, version: Version) -> Result<Self, Error> {
        if comparator == Comparator::Compatible && version.release().len() < 2 {
            return Err(Error::CompatibleSegments(version.to_string()));
        }
        Ok(Self {
            comparator,
            version,
        })
    }

    /// The comparator.
    #[must_use]
    pub const fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// The version the comparator applies to.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// Whether a concrete version satisfies this constraint.
    #[must_use]
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.comparator {
            Comparator::Compatible => {
                candidate >= &self.version && candidate.cmp_release(&self.ceiling()) == Ordering::Less
            }
            Comparator::Equal => candidate == &self.version,
            Comparator::NotEqual => candidate != &self.version,
            Comparator::GreaterEqual => candidate >= &self.version,
            Comparator::LessEqual => candidate <= &self.version,
            Comparator::Greater => candidate > &self.version,
            Comparator::Less => candidate < &self.version,
        }
    }

    /// The exclusive upper bound of a compatible-release constraint:
    /// `~=3.7` → `4.0`, `~=1.8.2` → `1.9.0`.
    fn ceiling(&self) -> Version {
        let release = self.version.release();
        let mut bound: Vec<u64> = release[..release.len() - 1].to_vec();
        if let Some(last) = bound.last_mut() {
            *last = last.saturating_add(1);
        }
        bound.push(0);
        Version::new(bound)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.version)
    }
}

/// Errors that can occur during constraint parsing or construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Unrecognised comparator token.
    #[error("Invalid comparator '{0}': expected one of ~=, ==, !=, >=, <=, >, <")]
    Comparator(String),

    /// Invalid version literal.
    #[error(transparent)]
    Version(#[from] version::Error),

    /// A comparator with no version after it.
    #[error("Dangling comparator '{0}': expected a version")]
    Dangling(Comparator),

    /// Compatible-release constraint on a single-segment version.
    #[error("Invalid constraint '~={0}': compatible release requires at least two version segments")]
    CompatibleSegments(String),
}

impl FromStr for VersionConstraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !matches!(c, '~' | '=' | '!' | '<' | '>'))
            .unwrap_or(s.len());
        let (op, rest) = s.split_at(split);
        let comparator: Comparator = op.parse()?;

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(Error::Dangling(comparator));
        }
        let version: Version = rest.parse()?;

        Self::new(comparator, version)
    }
}

impl TryFrom<&str> for VersionConstraint {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}
