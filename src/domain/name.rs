use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use non_empty_string::NonEmptyString;

/// A validated package name.
///
/// Names consist of ASCII letters, digits, and the separators `.`, `_` and
/// `-`, and must start and end with an alphanumeric character (e.g.
/// `flake8`, `flake8-annotations`, `pre_commit`).
///
/// Two names are equal when their *normalized* forms are equal: lowercased,
/// with every run of separators collapsed to a single `-`. The raw spelling
/// is preserved for display and round-tripping.
#[derive(Debug, Clone)]
pub struct PackageName {
    raw: NonEmptyString,
    normalized: String,
}

impl PackageName {
    /// Creates a new `PackageName` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNameError` if the string is empty, contains characters
    /// outside `[A-Za-z0-9._-]`, or starts or ends with a separator.
    pub fn new(s: String) -> Result<Self, InvalidNameError> {
        let raw = NonEmptyString::new(s.clone()).map_err(|_| InvalidNameError(s.clone()))?;

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(InvalidNameError(s));
        }

        // First and last characters must be alphanumeric
        let first = s.chars().next().ok_or_else(|| InvalidNameError(s.clone()))?;
        let last = s.chars().last().ok_or_else(|| InvalidNameError(s.clone()))?;
        if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
            return Err(InvalidNameError(s));
        }

        let normalized = normalize(&s);
        Ok(Self { raw, normalized })
    }

    /// Returns the name as originally written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Returns the normalized form used for comparison and duplicate
    /// detection.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// Lowercase and collapse separator runs to a single `-`.
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_separator = false;
    for c in s.chars() {
        if matches!(c, '.' | '_' | '-') {
            in_separator = true;
        } else {
            if in_separator {
                out.push('-');
                in_separator = false;
            }
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

impl PartialEq for PackageName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for PackageName {}

impl Hash for PackageName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for PackageName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl TryFrom<String> for PackageName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PackageName {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        self.raw.as_str()
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for PackageName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a string is not a valid package name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "Invalid package name '{0}': must be non-empty, contain only letters, digits, '.', '_' or '-', and start and end alphanumeric"
)]
pub struct InvalidNameError(String);
