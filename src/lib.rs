//! Plain-text Dependency Manifest Management
//!
//! Manifests are pip-style `requirements.txt` files stored as line-oriented
//! text: one package per line, with an optional version constraint and an
//! optional trailing comment.

pub mod domain;
pub use domain::{Comparator, PackageName, Requirement, Version, VersionConstraint};

/// Manifest parsing, validation, and serialization.
pub mod manifest;
pub use manifest::{Conflict, ConflictError, Line, LoadError, Manifest, ParseError};
