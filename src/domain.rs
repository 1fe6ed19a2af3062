//! Domain models for dependency manifests.
//!
//! This module contains the core domain types including package names,
//! versions, version constraints, and requirement entries.

/// Validated package name types and normalization.
pub mod name;
pub use name::{InvalidNameError, PackageName};

/// Version literals and ordering.
pub mod version;
pub use version::{Error as VersionError, PrePhase, PreRelease, Version};

/// Version constraints and satisfaction checks.
pub mod constraint;
pub use constraint::{Comparator, Error as ConstraintError, VersionConstraint};

mod requirement;
pub use requirement::Requirement;
