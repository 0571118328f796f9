//! Core domain models for depbump
//!
//! This module contains the fundamental value types used throughout the crate:
//! - Numeric versions and their ordering
//! - Comparator sets (requirements) and version ranges
//! - Requirement declarations with form-preserving rewrites
//! - Dependency information structures

mod declaration;
mod dependency;
mod requirement;
mod version;

pub use declaration::{Declaration, DeclarationKind};
pub use dependency::{Dependency, DependencyRequirement};
pub use requirement::{Comparator, Operator, Requirement, VersionRange};
pub use version::Version;
