//! Filesystem layer for audipomarks
//!
//! Provides the fixed sidecar filenames, lexical path arithmetic, readable
//! existence checks, text I/O and the depth-first tree walker shared by the
//! split, join and mark operations.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use constants::MarksFile;
pub use error::{Error, Result};
pub use walk::{Dirs, Files};
