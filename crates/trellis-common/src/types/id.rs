//! Edge identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an edge within the graph that stores it.
///
/// Graphs hand these out sequentially, so the id doubles as the edge's slot
/// in edge storage and two parallel edges between the same endpoints stay
/// distinct under `Eq`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Marks an edge that no graph has stored.
    pub const INVALID: Self = Self(u64::MAX);

    /// Creates the id of the edge stored at `index`.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Returns the storage slot this id refers to.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns false for [`EdgeId::INVALID`].
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u64::MAX
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "e{}", self.0)
        } else {
            f.write_str("e?")
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
