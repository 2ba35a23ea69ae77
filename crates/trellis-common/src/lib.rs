//! # trellis-common
//!
//! Foundation layer for Trellis: identifiers, hashing, and the shared error type.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Edge identifiers ([`EdgeId`])
//! - [`utils`] - Fast hashing and the [`Error`] taxonomy

pub mod types;
pub mod utils;

pub use types::EdgeId;
pub use utils::error::{Error, Result};
