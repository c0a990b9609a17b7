//! Operator decisions on discrepancies
//!
//! Whenever split or join finds the filesystem disagreeing with a storage,
//! it describes the problem as a [`Discrepancy`] and asks a [`Resolver`].
//! The answer is a [`Decision`]; [`settle`] turns it into an [`Outcome`]
//! for the call site, keeping yes-to-all answers in an explicit
//! [`YesToAll`] set owned by the pass.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use marks_schema::Violation;

use crate::{Error, Result};

/// Everything split and join may ask the operator about.
#[derive(Debug, Clone, PartialEq)]
pub enum Discrepancy {
    /// A group directory is not strictly below the working directory.
    DirectoryOutsideRoot { dir: PathBuf, root: PathBuf },
    /// A group directory is missing or cannot be listed.
    DirectoryUnavailable { dir: PathBuf },
    /// An entry's audio file is missing or cannot be opened.
    FileUnavailable { path: PathBuf },
    /// An entry's audio file differs in size from the recorded one.
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
    /// A local storage found during join could not be read.
    InvalidStorage {
        path: PathBuf,
        violations: Vec<Violation>,
    },
}

/// Discriminant of a [`Discrepancy`], the scope of a yes-to-all answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscrepancyKind {
    DirectoryOutsideRoot,
    DirectoryUnavailable,
    FileUnavailable,
    SizeMismatch,
    InvalidStorage,
}

impl Discrepancy {
    pub fn kind(&self) -> DiscrepancyKind {
        match self {
            Self::DirectoryOutsideRoot { .. } => DiscrepancyKind::DirectoryOutsideRoot,
            Self::DirectoryUnavailable { .. } => DiscrepancyKind::DirectoryUnavailable,
            Self::FileUnavailable { .. } => DiscrepancyKind::FileUnavailable,
            Self::SizeMismatch { .. } => DiscrepancyKind::SizeMismatch,
            Self::InvalidStorage { .. } => DiscrepancyKind::InvalidStorage,
        }
    }

    /// True when proceeding keeps the item rather than leaving it out.
    ///
    /// Only a size mismatch can be carried over; every other discrepancy
    /// means there is nothing usable to keep.
    pub fn proceed_keeps(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. })
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryOutsideRoot { dir, root } => write!(
                f,
                "Directory \"{}\" is outside the working dir \"{}\"",
                dir.display(),
                root.display()
            ),
            Self::DirectoryUnavailable { dir } => write!(
                f,
                "Directory \"{}\" doesn't exist or isn't available",
                dir.display()
            ),
            Self::FileUnavailable { path } => write!(
                f,
                "File doesn't exist or isn't available: \"{}\"",
                path.display()
            ),
            Self::SizeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "File size differs from the one from the storage: \"{}\", expected size: {expected}, actual size: {actual}",
                path.display()
            ),
            Self::InvalidStorage { path, violations } => {
                write!(f, "Invalid mark storage \"{}\"", path.display())?;
                for violation in violations {
                    write!(f, "\n  {violation}")?;
                }
                Ok(())
            }
        }
    }
}

/// An operator's answer to one discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Continue with the kind's default resolution.
    Proceed,
    /// Leave the offending item out.
    Skip,
    /// Like `Proceed`, and stop asking about this kind for the rest of the pass.
    SkipAll,
    /// Stop the whole operation.
    Abort,
}

/// Source of operator decisions.
pub trait Resolver {
    fn resolve(&mut self, discrepancy: &Discrepancy) -> Result<Decision>;
}

/// Answers yes-to-all to everything; used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Resolver for AcceptAll {
    fn resolve(&mut self, _discrepancy: &Discrepancy) -> Result<Decision> {
        Ok(Decision::SkipAll)
    }
}

/// Discrepancy kinds already answered with yes-to-all in the current pass.
#[derive(Debug, Clone, Default)]
pub struct YesToAll {
    kinds: HashSet<DiscrepancyKind>,
}

impl YesToAll {
    pub fn contains(&self, kind: DiscrepancyKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn insert(&mut self, kind: DiscrepancyKind) {
        self.kinds.insert(kind);
    }
}

/// What the call site does with the offending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Keep,
    LeaveOut,
}

/// Ask about one discrepancy unless its kind was already answered for the pass.
///
/// `Abort` becomes [`Error::Aborted`].
pub fn settle(
    resolver: &mut dyn Resolver,
    yes_to_all: &mut YesToAll,
    discrepancy: &Discrepancy,
) -> Result<Outcome> {
    let kind = discrepancy.kind();
    let default = if discrepancy.proceed_keeps() {
        Outcome::Keep
    } else {
        Outcome::LeaveOut
    };

    if yes_to_all.contains(kind) {
        tracing::debug!(?kind, "{discrepancy}; answered for all");
        return Ok(default);
    }

    tracing::warn!("{discrepancy}");
    match resolver.resolve(discrepancy)? {
        Decision::Proceed => Ok(default),
        Decision::SkipAll => {
            yes_to_all.insert(kind);
            Ok(default)
        }
        Decision::Skip => Ok(Outcome::LeaveOut),
        Decision::Abort => Err(Error::Aborted),
    }
}
