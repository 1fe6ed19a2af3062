//! Line-oriented manifest parsing.
//!
//! Each line is a blank, a full-line comment (`# ...`), or a requirement
//! (`<name>` optionally followed by a constraint and a trailing comment).

use std::fmt;

use crate::domain::{
    constraint, name::InvalidNameError, PackageName, Requirement, VersionConstraint,
};

use super::Line;

/// Error returned when a manifest line cannot be interpreted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("line {line}: {kind} in '{text}'")]
pub struct ParseError {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// The offending line, verbatim.
    pub text: String,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// The ways a requirement line can be malformed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The package name is invalid.
    #[error(transparent)]
    Name(InvalidNameError),

    /// The constraint (comparator or version) is invalid.
    #[error(transparent)]
    Constraint(constraint::Error),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Comment(text) => write!(f, "{text}"),
            Self::Requirement(entry) => write!(f, "{entry}"),
        }
    }
}

/// Split off a trailing comment: a `#` at the start of the requirement text
/// or preceded by whitespace. A `#` embedded in a token is not a comment.
fn split_comment(text: &str) -> (&str, Option<&str>) {
    let mut prev_is_space = true;
    for (index, c) in text.char_indices() {
        if c == '#' && prev_is_space {
            let comment = text[index + 1..].trim();
            return (&text[..index], Some(comment));
        }
        prev_is_space = c.is_whitespace();
    }
    (text, None)
}

/// Find where the package name ends and a comparator (if any) begins.
fn split_constraint(text: &str) -> (&str, Option<&str>) {
    text.find(|c: char| matches!(c, '~' | '=' | '!' | '<' | '>')).map_or(
        (text, None),
        |index| (&text[..index], Some(&text[index..])),
    )
}

/// Parse one manifest line.
///
/// `number` is the 1-based line number, reported in errors and recorded on
/// the resulting entry.
pub(super) fn parse_line(number: usize, raw: &str) -> Result<Line, ParseError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with('#') {
        return Ok(Line::Comment(raw.trim_end().to_string()));
    }

    let error = |kind| ParseError {
        line: number,
        text: raw.to_string(),
        kind,
    };

    let (spec, comment) = split_comment(trimmed);
    let (name_str, constraint_str) = split_constraint(spec.trim());

    let name = PackageName::new(name_str.trim().to_string())
        .map_err(|e| error(ParseErrorKind::Name(e)))?;

    let constraint = constraint_str
        .map(|s| {
            s.parse::<VersionConstraint>()
                .map_err(|e| error(ParseErrorKind::Constraint(e)))
        })
        .transpose()?;

    Ok(Line::Requirement(Requirement::new(
        name,
        constraint,
        comment.map(ToString::to_string),
        number,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Comparator;
    use test_case::test_case;

    fn requirement(line: Line) -> Requirement {
        match line {
            Line::Requirement(entry) => entry,
            other => panic!("expected a requirement, got {other:?}"),
        }
    }

    #[test]
    fn constrained_entry() {
        let entry = requirement(parse_line(1, "flake8~=3.7").unwrap());
        assert_eq!(entry.name().as_str(), "flake8");
        let constraint = entry.constraint().unwrap();
        assert_eq!(constraint.comparator(), Comparator::Compatible);
        assert_eq!(constraint.version().release(), [3, 7]);
        assert_eq!(entry.comment(), None);
        assert_eq!(entry.line(), 1);
    }

    #[test]
    fn three_segment_pin() {
        let entry = requirement(parse_line(4, "pyperclip~=1.8.2").unwrap());
        assert_eq!(entry.name().as_str(), "pyperclip");
        assert_eq!(entry.constraint().unwrap().to_string(), "~=1.8.2");
        assert_eq!(entry.line(), 4);
    }

    #[test]
    fn bare_name_is_unconstrained() {
        let entry = requirement(parse_line(1, "numpy").unwrap());
        assert_eq!(entry.name().as_str(), "numpy");
        assert_eq!(entry.constraint(), None);
    }

    #[test_case("# comment only"; "plain comment")]
    #[test_case("   # indented comment"; "indented comment")]
    fn comment_lines_produce_no_entry(raw: &str) {
        assert!(matches!(parse_line(1, raw).unwrap(), Line::Comment(_)));
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "whitespace only")]
    #[test_case("\t"; "tab only")]
    fn blank_lines_produce_no_entry(raw: &str) {
        assert_eq!(parse_line(1, raw).unwrap(), Line::Blank);
    }

    #[test]
    fn trailing_comment_is_kept() {
        let entry =
            requirement(parse_line(1, "flake8-todo~=0.7  # https://example.invalid/todo").unwrap());
        assert_eq!(entry.name().as_str(), "flake8-todo");
        assert_eq!(entry.comment(), Some("https://example.invalid/todo"));
    }

    #[test]
    fn whitespace_around_comparator_is_accepted() {
        let entry = requirement(parse_line(1, "isort ~= 5.9").unwrap());
        assert_eq!(entry.name().as_str(), "isort");
        assert_eq!(entry.constraint().unwrap().to_string(), "~=5.9");
    }

    #[test_case("==1.0"; "missing name")]
    #[test_case("fla ke8~=3.7"; "space in name")]
    #[test_case("-flake8"; "leading separator in name")]
    fn invalid_name_is_reported(raw: &str) {
        let err = parse_line(3, raw).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.text, raw);
        assert!(matches!(err.kind, ParseErrorKind::Name(_)));
    }

    #[test_case("flake8~="; "dangling comparator")]
    #[test_case("flake8~>3.7"; "unknown comparator")]
    #[test_case("flake8~=3.x"; "bad version")]
    #[test_case("flake8~=3"; "compatible single segment")]
    fn invalid_constraint_is_reported(raw: &str) {
        let err = parse_line(7, raw).unwrap_err();
        assert_eq!(err.line, 7);
        assert!(matches!(err.kind, ParseErrorKind::Constraint(_)));
    }

    #[test]
    fn error_display_names_the_line() {
        let err = parse_line(9, "flake8~=").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 9"));
        assert!(message.contains("flake8~="));
    }
}
