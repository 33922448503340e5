//! The cupcake-counting state machine.
//!
//! All transitions happen while the caller holds the party lock. A follower
//! eats the cupcake once, the first time it finds one while it is the guest in
//! the labyrinth. The leader is the only guest who asks for a new cupcake, and
//! counts every replacement plus itself. When the count reaches the number of
//! guests, everyone has been through the labyrinth.

use minotaur_core::GuestId;
use serde::Serialize;

/// Something that changed the shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CupcakeEvent {
    /// A follower ate the cupcake.
    Eaten {
        /// The follower
        guest: GuestId,
    },

    /// The leader found the plate empty and asked for a new cupcake.
    Replaced {
        /// Count after the replacement
        count: usize,
    },

    /// The leader counted itself.
    LeaderCounted {
        /// Count after counting itself
        count: usize,
    },
}

/// Shared state of the labyrinth game.
#[derive(Debug, Clone)]
pub struct PartyState {
    guests_visited: Vec<bool>,
    cupcake_available: bool,
    count: usize,
    events: Vec<CupcakeEvent>,
}

impl PartyState {
    /// A fresh party: a cupcake on the plate, nobody counted.
    pub fn new(guest_count: usize) -> Self {
        Self {
            guests_visited: vec![false; guest_count],
            cupcake_available: true,
            count: 0,
            events: Vec::with_capacity(guest_count * 2),
        }
    }

    /// Number of guests at the party.
    pub fn guest_count(&self) -> usize {
        self.guests_visited.len()
    }

    /// Guests counted by the leader so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether a cupcake is on the plate.
    pub fn cupcake_available(&self) -> bool {
        self.cupcake_available
    }

    /// Whether `guest` has taken its one turn.
    pub fn has_visited(&self, guest: GuestId) -> bool {
        self.guests_visited
            .get(guest.index())
            .copied()
            .unwrap_or(false)
    }

    /// Number of guests that have taken their turn.
    pub fn visited_count(&self) -> usize {
        self.guests_visited.iter().filter(|v| **v).count()
    }

    /// Whether the leader has counted every guest.
    pub fn is_complete(&self) -> bool {
        self.count >= self.guest_count()
    }

    /// Everything that happened, in order.
    pub fn events(&self) -> &[CupcakeEvent] {
        &self.events
    }

    /// Followers in the order they ate the cupcake.
    pub fn claim_order(&self) -> Vec<GuestId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CupcakeEvent::Eaten { guest } => Some(*guest),
                _ => None,
            })
            .collect()
    }

    /// A follower's look at the plate while `active` is in the labyrinth.
    ///
    /// Returns true if the follower ate the cupcake.
    pub fn guest_step(&mut self, guest: GuestId, active: usize) -> bool {
        if guest.is_leader() || active != guest.index() {
            return false;
        }

        if !self.cupcake_available || self.has_visited(guest) {
            return false;
        }

        match self.guests_visited.get_mut(guest.index()) {
            Some(visited) => *visited = true,
            None => return false,
        }
        self.cupcake_available = false;
        self.events.push(CupcakeEvent::Eaten { guest });
        true
    }

    /// The leader's look at the plate while `active` is in the labyrinth.
    pub fn leader_step(&mut self, active: usize) -> Option<CupcakeEvent> {
        if active != GuestId::LEADER.index() || self.guests_visited.is_empty() {
            return None;
        }

        let event = if !self.cupcake_available {
            self.count += 1;
            self.cupcake_available = true;
            CupcakeEvent::Replaced { count: self.count }
        } else if !self.guests_visited[0] {
            self.count += 1;
            self.guests_visited[0] = true;
            CupcakeEvent::LeaderCounted { count: self.count }
        } else {
            return None;
        };

        self.events.push(event);
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_party() {
        let state = PartyState::new(3);
        assert_eq!(state.guest_count(), 3);
        assert_eq!(state.count(), 0);
        assert!(state.cupcake_available());
        assert!(!state.is_complete());
        assert_eq!(state.visited_count(), 0);
    }

    #[test]
    fn test_follower_only_acts_when_active() {
        let mut state = PartyState::new(3);
        let guest = GuestId::new(2);

        assert!(!state.guest_step(guest, 1));
        assert!(!state.guest_step(guest, 3));
        assert!(state.cupcake_available());

        assert!(state.guest_step(guest, 2));
        assert!(!state.cupcake_available());
        assert!(state.has_visited(guest));
    }

    #[test]
    fn test_follower_eats_at_most_once() {
        let mut state = PartyState::new(2);
        let guest = GuestId::new(1);

        assert!(state.guest_step(guest, 1));
        assert_eq!(
            state.leader_step(0),
            Some(CupcakeEvent::Replaced { count: 1 })
        );
        assert!(state.cupcake_available());

        // The cupcake is back but this guest already had one
        assert!(!state.guest_step(guest, 1));
        assert!(state.cupcake_available());
        assert_eq!(state.claim_order(), vec![guest]);
    }

    #[test]
    fn test_follower_leaves_missing_cupcake_alone() {
        let mut state = PartyState::new(3);

        assert!(state.guest_step(GuestId::new(1), 1));
        assert!(!state.guest_step(GuestId::new(2), 2));
        assert!(!state.has_visited(GuestId::new(2)));
    }

    #[test]
    fn test_leader_ignores_follower_step() {
        let mut state = PartyState::new(2);
        assert!(!state.guest_step(GuestId::LEADER, 0));
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_leader_replaces_before_counting_itself() {
        let mut state = PartyState::new(3);

        assert!(state.guest_step(GuestId::new(1), 1));
        // Plate empty: replacement takes priority over self-count
        assert_eq!(
            state.leader_step(0),
            Some(CupcakeEvent::Replaced { count: 1 })
        );
        assert!(!state.has_visited(GuestId::LEADER));

        assert_eq!(
            state.leader_step(0),
            Some(CupcakeEvent::LeaderCounted { count: 2 })
        );
        assert!(state.has_visited(GuestId::LEADER));
        assert_eq!(state.leader_step(0), None);
    }

    #[test]
    fn test_leader_only_acts_when_active() {
        let mut state = PartyState::new(2);
        assert_eq!(state.leader_step(1), None);
        assert_eq!(state.leader_step(2), None);
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_single_guest_completes_immediately() {
        let mut state = PartyState::new(1);
        assert_eq!(
            state.leader_step(0),
            Some(CupcakeEvent::LeaderCounted { count: 1 })
        );
        assert!(state.is_complete());
    }

    #[test]
    fn test_full_sequence_counts_everyone_once() {
        let guests = 5;
        let mut state = PartyState::new(guests);
        let mut active = 0;

        // Round-robin over [0, guests], including the empty labyrinth
        while !state.is_complete() {
            if active == 0 {
                state.leader_step(active);
            } else if active < guests {
                state.guest_step(GuestId::new(active), active);
            }
            active = (active + 1) % (guests + 1);
        }

        assert_eq!(state.count(), guests);
        assert_eq!(state.visited_count(), guests);

        let mut claims = state.claim_order();
        assert_eq!(claims.len(), guests - 1);
        claims.sort();
        claims.dedup();
        assert_eq!(claims.len(), guests - 1);

        let counts: Vec<usize> = state
            .events()
            .iter()
            .filter_map(|event| match event {
                CupcakeEvent::Replaced { count } | CupcakeEvent::LeaderCounted { count } => {
                    Some(*count)
                }
                CupcakeEvent::Eaten { .. } => None,
            })
            .collect();
        assert_eq!(counts, (1..=guests).collect::<Vec<_>>());
    }
}
