use std::{cmp::Ordering, fmt, str::FromStr};

/// A version literal.
///
/// Format: dot-separated numeric release segments, optionally followed by a
/// pre-release suffix attached to the final segment (e.g. `3.7`, `1.8.2`,
/// `4.0a1`, `2.0rc1`).
///
/// Ordering follows the packaging convention: release segments compare
/// numerically segment-wise with missing segments treated as zero (so
/// `3.7 == 3.7.0`), and a pre-release orders before its final release
/// (`4.0a1 < 4.0`).
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
    pre: Option<PreRelease>,
}

impl Version {
    /// Create a version from release segments, with no pre-release suffix.
    #[must_use]
    pub const fn new(release: Vec<u64>) -> Self {
        Self { release, pre: None }
    }

    /// Create a version with a pre-release suffix.
    #[must_use]
    pub const fn new_pre(release: Vec<u64>, pre: PreRelease) -> Self {
        Self {
            release,
            pre: Some(pre),
        }
    }

    /// The numeric release segments, as written.
    #[must_use]
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// The pre-release suffix, if any.
    #[must_use]
    pub const fn pre(&self) -> Option<PreRelease> {
        self.pre
    }

    /// Compare release segments only, padding the shorter side with zeros.
    pub(crate) fn cmp_release(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            let a = self.release.get(i).copied().unwrap_or(0);
            let b = other.release.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_release(other).then_with(|| {
            // A pre-release sorts before the corresponding final release.
            match (self.pre, other.pre) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(&b),
            }
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut segments = self.release.iter();
        if let Some(first) = segments.next() {
            write!(f, "{first}")?;
        }
        for segment in segments {
            write!(f, ".{segment}")?;
        }
        if let Some(pre) = self.pre {
            write!(f, "{pre}")?;
        }
        Ok(())
    }
}

/// A pre-release suffix such as `a1`, `b2`, or `rc1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreRelease {
    /// The pre-release phase.
    pub phase: PrePhase,
    /// The number within the phase.
    pub number: u64,
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.phase, self.number)
    }
}

/// Pre-release phases, in release order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrePhase {
    /// Alpha (`a`).
    Alpha,
    /// Beta (`b`).
    Beta,
    /// Release candidate (`rc`).
    Rc,
}

impl fmt::Display for PrePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::Rc => "rc",
        };
        write!(f, "{label}")
    }
}

/// Errors that can occur during version parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Empty version string.
    #[error("Empty version string")]
    Empty,

    /// A release segment is not a non-negative integer.
    #[error("Invalid version '{0}': segment '{1}' is not a number")]
    Segment(String, String),

    /// The pre-release suffix is malformed.
    #[error("Invalid version '{0}': malformed pre-release suffix '{1}'")]
    PreRelease(String, String),
}

/// Split a final segment like `7a1` into its numeric part and suffix.
fn split_suffix(segment: &str) -> (&str, &str) {
    let digits = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment.split_at(digits)
}

fn parse_pre(original: &str, suffix: &str) -> Result<PreRelease, Error> {
    let (phase, number_str) = if let Some(rest) = suffix.strip_prefix("rc") {
        (PrePhase::Rc, rest)
    } else if let Some(rest) = suffix.strip_prefix('a') {
        (PrePhase::Alpha, rest)
    } else if let Some(rest) = suffix.strip_prefix('b') {
        (PrePhase::Beta, rest)
    } else {
        return Err(Error::PreRelease(
            original.to_string(),
            suffix.to_string(),
        ));
    };

    let number = number_str
        .parse()
        .map_err(|_| Error::PreRelease(original.to_string(), suffix.to_string()))?;
    Ok(PreRelease { phase, number })
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::Empty);
        }

        let mut release = Vec::new();
        let mut pre = None;

        let segments: Vec<&str> = s.split('.').collect();
        let last = segments.len() - 1;
        for (i, segment) in segments.iter().enumerate() {
            if i == last {
                // The final segment may carry a pre-release suffix.
                let (digits, suffix) = split_suffix(segment);
                if digits.is_empty() {
                    return Err(Error::Segment(s.to_string(), (*segment).to_string()));
                }
                release.push(
                    digits
                        .parse()
                        .map_err(|_| Error::Segment(s.to_string(), (*segment).to_string()))?,
                );
                if !suffix.is_empty() {
                    pre = Some(parse_pre(s, suffix)?);
                }
            } else {
                release.push(
                    segment
                        .parse()
                        .map_err(|_| Error::Segment(s.to_string(), (*segment).to_string()))?,
                );
            }
        }

        Ok(Self { release, pre })
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}
