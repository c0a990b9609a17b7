//! Mark storage and configuration documents
//!
//! Types for the JSON documents audipomarks reads and writes, a JSON Schema
//! validator that reports every offending field path, and the codec
//! that ties them to files.

pub mod codec;
pub mod error;
pub mod model;
pub mod validate;

pub use codec::{read_config, read_storage, write_config, write_storage};
pub use error::{Error, Result};
pub use model::{FfmpegParams, Mark, MarkConfig, MarkStorage, MarkedFile};
pub use validate::Violation;
