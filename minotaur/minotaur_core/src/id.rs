//! Guest identifiers.
//!
//! Every guest at the party is identified by its seat number, starting at zero.
//! Guest zero is the leader in the labyrinth game.
//!
//! # Examples
//!
//! ```
//! use minotaur_core::id::GuestId;
//!
//! let leader = GuestId::LEADER;
//! assert!(leader.is_leader());
//! assert_eq!(GuestId::new(7).to_string(), "Guest #7");
//! assert_eq!(GuestId::range(3).count(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a guest by seat number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(usize);

impl GuestId {
    /// The guest who counts cupcakes.
    pub const LEADER: GuestId = GuestId(0);

    /// Create an identifier for the given seat.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Seat number of this guest.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Whether this guest is the leader.
    pub const fn is_leader(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the identifiers of a party of `guest_count` guests.
    pub fn range(guest_count: usize) -> impl Iterator<Item = GuestId> {
        (0..guest_count).map(GuestId)
    }
}

impl From<usize> for GuestId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guest #{}", self.0)
    }
}
