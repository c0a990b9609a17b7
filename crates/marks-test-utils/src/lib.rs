//! Shared test utilities for the audipomarks workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] scratch directory with audio stubs and storages
//! - [`resolver`]: [`ScriptedResolver`] replaying operator decisions
//! - [`builders`]: terse constructors for marks, entries and storages

pub mod builders;
pub mod resolver;
pub mod tree;

pub use builders::{entry, mark, marks_at, storage};
pub use resolver::ScriptedResolver;
pub use tree::TestTree;
