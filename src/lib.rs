//! Core library for the account-normalizer command line application.
//!
//! The library splits a wide account sheet, where manager hierarchies are
//! stored as `|` separated lists, into an account table, a manager directory,
//! and an account → manager relation table. Storage adapters live under
//! [`io`], cell and relation types inside [`model`], the decomposition logic
//! in [`normalize`], and the file-level workflow used by the binary in
//! [`pipeline`].

pub mod error;
pub mod io;
pub mod model;
pub mod normalize;
pub mod pipeline;

pub use error::{Result, ToolError};
pub use normalize::Normalizer;
