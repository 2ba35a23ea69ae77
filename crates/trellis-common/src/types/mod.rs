//! Core type definitions for Trellis.
//!
//! Graph storage is free to use any hashable vertex type. The reference
//! storage identifies its edges with [`EdgeId`].

mod id;

pub use id::EdgeId;
