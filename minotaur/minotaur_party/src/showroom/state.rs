//! The showroom state machine.
//!
//! A guest may walk in when the sign reads `AVAILABLE` and it has not seen the
//! vase yet. Under queue admission a guest also has to be at the head of the
//! line; it joins the line the first time it looks at the door. Walking in
//! flips the sign to `BUSY`; walking out flips it back and records the visit.
//! Times are offsets from the start of the run, in microseconds.

use std::collections::{HashSet, VecDeque};

use minotaur_core::error::ProtocolError;
use minotaur_core::{AdmissionStrategy, GuestId, RoomStatus};
use serde::Serialize;

/// One guest's time with the vase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visit {
    /// Who visited
    pub guest: GuestId,

    /// When the sign turned `BUSY`
    pub entered_us: u64,

    /// When the sign turned back to `AVAILABLE`
    pub left_us: u64,
}

impl Visit {
    /// Whether two visits shared the room at any instant.
    pub fn overlaps(&self, other: &Visit) -> bool {
        self.entered_us < other.left_us && other.entered_us < self.left_us
    }
}

/// Shared state of the showroom game.
#[derive(Debug, Clone)]
pub struct ShowroomState {
    guest_count: usize,
    admission: AdmissionStrategy,
    status: RoomStatus,
    occupant: Option<(GuestId, u64)>,
    visited: HashSet<GuestId>,
    line: VecDeque<GuestId>,
    arrivals: Vec<GuestId>,
    visits: Vec<Visit>,
}

impl ShowroomState {
    /// An empty showroom.
    pub fn new(guest_count: usize, admission: AdmissionStrategy) -> Self {
        Self {
            guest_count,
            admission,
            status: RoomStatus::Available,
            occupant: None,
            visited: HashSet::with_capacity(guest_count),
            line: VecDeque::with_capacity(guest_count),
            arrivals: Vec::with_capacity(guest_count),
            visits: Vec::with_capacity(guest_count),
        }
    }

    /// The sign on the door.
    pub fn status(&self) -> RoomStatus {
        self.status
    }

    /// Who is inside, if anyone.
    pub fn occupant(&self) -> Option<GuestId> {
        self.occupant.map(|(guest, _)| guest)
    }

    /// Whether `guest` has seen the vase.
    pub fn has_visited(&self, guest: GuestId) -> bool {
        self.visited.contains(&guest)
    }

    /// Number of guests who have seen the vase.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Whether every guest has seen the vase.
    pub fn is_complete(&self) -> bool {
        self.visited.len() >= self.guest_count
    }

    /// Finished visits, in order.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Guests in the order they joined the line (queue admission only).
    pub fn arrivals(&self) -> &[GuestId] {
        &self.arrivals
    }

    /// Guests currently waiting in line.
    pub fn waiting(&self) -> usize {
        self.line.len()
    }

    /// A guest looks at the door at time `now_us`.
    ///
    /// Returns true if the guest walked in.
    pub fn try_enter(&mut self, guest: GuestId, now_us: u64) -> bool {
        if self.visited.contains(&guest) || self.occupant() == Some(guest) {
            return false;
        }

        if self.admission == AdmissionStrategy::Queue && !self.line.contains(&guest) {
            self.line.push_back(guest);
            self.arrivals.push(guest);
        }

        if !self.status.is_available() {
            return false;
        }

        if self.admission == AdmissionStrategy::Queue {
            if self.line.front() != Some(&guest) {
                return false;
            }
            self.line.pop_front();
        }

        self.status = RoomStatus::Busy;
        self.occupant = Some((guest, now_us));
        true
    }

    /// The occupant walks out at time `now_us`.
    ///
    /// # Errors
    ///
    /// Fails if `guest` is not the occupant or was already recorded.
    pub fn leave(&mut self, guest: GuestId, now_us: u64) -> Result<Visit, ProtocolError> {
        let entered_us = match self.occupant {
            Some((occupant, entered_us)) if occupant == guest => entered_us,
            other => {
                return Err(ProtocolError::NotOccupant {
                    guest,
                    occupant: other.map(|(occupant, _)| occupant),
                })
            }
        };

        if !self.visited.insert(guest) {
            return Err(ProtocolError::DuplicateVisit(guest));
        }

        let visit = Visit {
            guest,
            entered_us,
            left_us: now_us.max(entered_us),
        };

        self.status = RoomStatus::Available;
        self.occupant = None;
        self.visits.push(visit);
        Ok(visit)
    }
}
