//! Entity identification.
//!
//! World objects (buildings, squads, map features) are referenced by an
//! opaque `EntityId` that the host game assigns. The predicate engine never
//! allocates ids; it only passes them back to the UI inside help actions
//! (e.g. "speed up *this* building").
//!
//! ## Usage
//!
//! ```
//! use game_predicates::core::EntityId;
//!
//! let barracks = EntityId::new(1042);
//! assert_eq!(barracks.raw(), 1042);
//! assert_eq!(barracks.to_string(), "Entity(1042)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a game object owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
