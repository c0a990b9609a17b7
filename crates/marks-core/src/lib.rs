//! Reconciliation engines for audipomarks
//!
//! - [`split`] turns one flat, foreign-rooted storage into one local storage
//!   per directory, validated against the real files.
//! - [`join`] collects every local storage under a directory back into one
//!   flat storage.
//! - [`mark`] generates local storages from detected silences.
//!
//! All three share the mark list algebra in [`algebra`] and report
//! discrepancies through the [`Resolver`] protocol in [`resolve`].

pub mod algebra;
pub mod error;
pub mod join;
pub mod mark;
pub mod resolve;
pub mod split;

pub use error::{Error, Result};
pub use join::{JoinReport, join};
pub use mark::{MarkOptions, MarkReport, ParamOverrides, mark};
pub use resolve::{AcceptAll, Decision, Discrepancy, DiscrepancyKind, Resolver};
pub use split::{SplitOptions, SplitReport, split};
