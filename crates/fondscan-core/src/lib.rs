//! Shared types for fondscan
//!
//! Run options, the on-disk output layout and the error type used by every
//! other crate in the workspace.

pub mod error;
pub mod layout;
pub mod options;

pub use error::{FondscanError, Result};
pub use layout::{OutputLayout, ReportKind};
pub use options::{HashAlgorithm, RunOptions};
