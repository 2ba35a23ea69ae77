//! Common utilities used throughout Trellis.
//!
//! - [`error`] - The [`Error`] taxonomy shared by collections and algorithms
//! - [`hash`] - Fast hashing with FxHash (non-cryptographic)

pub mod error;
pub mod hash;

pub use error::{Error, Result};
pub use hash::FxHasher;
