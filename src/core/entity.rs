//! Card identification.
//!
//! Every card has a unique `CardId` that is independent of its features.
//! Lifecycle operations (dealing, selection, removal) compare ids; only the
//! Set predicate looks at feature values.
//!
//! ## Allocation
//!
//! Ids come from a `CardIdAllocator` owned by the game. The allocator is
//! never reset, so a new game hands out ids that no previous game used and
//! stale ids from an earlier game are simply unknown.
//!
//! ```
//! use set_engine::core::{CardId, CardIdAllocator};
//!
//! let mut alloc = CardIdAllocator::new();
//! let a = alloc.alloc();
//! let b = alloc.alloc();
//!
//! assert_ne!(a, b);
//! assert_eq!(alloc.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Opaque unique identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of fresh card ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next unused id.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
