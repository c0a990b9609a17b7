//! Command implementations for marks-cli

pub mod join;
pub mod mark;
pub mod split;

pub use join::run_join;
pub use mark::run_mark;
pub use split::run_split;
