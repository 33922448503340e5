//! The labyrinth game.
//!
//! One thread per guest polls the shared `PartyState` under a single lock.
//! The calling thread plays the Minotaur: it keeps publishing a random guest
//! index until the leader has counted everyone. The index lives in an atomic,
//! so guests always read a whole, published value.

mod driver;
mod state;

pub use driver::{GuestSelector, RandomSelector, RoundRobinSelector};
pub use state::{CupcakeEvent, PartyState};

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use log::{debug, info, trace};
use serde::Serialize;

use minotaur_concurrency::{
    AtomicFlag, AtomicIndex, Poller, ThreadGroup, ThreadGroupConfig, TrackedMutex,
};
use minotaur_core::error::{ProtocolError, Result};
use minotaur_core::{
    EntropyRandom, GuestId, PollStrategy, SeededRandom, Simulation, SimulationConfig,
    SimulationKind,
};

use crate::report::{millis, LockSummary};

/// Summary of a finished labyrinth game.
#[derive(Debug, Clone, Serialize)]
pub struct LabyrinthReport {
    /// Number of guests at the party
    pub guest_count: usize,

    /// Final count kept by the leader
    pub count: usize,

    /// Followers in the order they ate the cupcake
    pub claim_order: Vec<GuestId>,

    /// Every state change, in order
    pub events: Vec<CupcakeEvent>,

    /// How many times the Minotaur picked a guest
    pub selections: usize,

    /// Wall-clock duration of the run, in milliseconds
    pub elapsed_ms: f64,

    /// Lock usage
    pub lock: LockSummary,
}

impl fmt::Display for LabyrinthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "All {} guests have entered the labyrinth.", self.count)?;
        write!(f, "Finished in {:.3}ms", self.elapsed_ms)
    }
}

/// State shared by the guests and the Minotaur for one run.
struct Party {
    state: TrackedMutex<PartyState>,
    active: AtomicIndex,
    finished: AtomicFlag,
    halted: AtomicFlag,
}

/// The labyrinth game.
pub struct Labyrinth {
    config: SimulationConfig,
    selector: Box<dyn GuestSelector + Send>,
    threads: ThreadGroupConfig,
}

impl Labyrinth {
    /// Create a game from a validated configuration.
    ///
    /// The Minotaur picks guests at random, reproducibly when a seed is set.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let selector: Box<dyn GuestSelector + Send> = match config.seed {
            Some(seed) => Box::new(RandomSelector::new(SeededRandom::new(seed))),
            None => Box::new(RandomSelector::new(EntropyRandom::new())),
        };

        Ok(Self {
            config,
            selector,
            threads: ThreadGroupConfig::default(),
        })
    }

    /// Replace the way the Minotaur picks guests.
    pub fn with_selector(mut self, selector: impl GuestSelector + Send + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Replace how guest threads are named and sized.
    pub fn with_thread_config(mut self, threads: ThreadGroupConfig) -> Self {
        self.threads = threads;
        self
    }

    /// Keep picking guests until the leader has counted everyone.
    fn drive(&mut self, party: &Party) -> usize {
        let guests = self.config.guest_count;
        let dwell = self.config.labyrinth.selection_dwell();
        let mut selections = 0;

        while !party.finished.is_set() && !party.halted.is_set() {
            let next = self.selector.select(guests).min(guests);
            party.active.publish(next);
            selections += 1;
            trace!("Minotaur picked guest index {}", next);

            if dwell.is_zero() {
                thread::yield_now();
            } else {
                thread::sleep(dwell);
            }
        }

        selections
    }
}

impl Simulation for Labyrinth {
    type Report = LabyrinthReport;

    fn kind(&self) -> SimulationKind {
        SimulationKind::Labyrinth
    }

    fn guest_count(&self) -> usize {
        self.config.guest_count
    }

    fn run(&mut self) -> Result<LabyrinthReport> {
        let guests = self.config.guest_count;
        let poll = self.config.poll;

        // Index `guests` means nobody is in the labyrinth yet
        let party = Arc::new(Party {
            state: TrackedMutex::with_name(PartyState::new(guests), "labyrinth"),
            active: AtomicIndex::new(guests),
            finished: AtomicFlag::default(),
            halted: AtomicFlag::default(),
        });

        let start = Instant::now();
        let mut group = ThreadGroup::new(self.threads.clone());

        for guest in GuestId::range(guests) {
            let party_ref = Arc::clone(&party);
            // A guest that fails stops the Minotaur and everyone else
            let spawned = group.spawn(guest.index(), move || {
                party_ref.halted.set_on_failure(|| {
                    if guest.is_leader() {
                        count_cupcakes(&party_ref, poll)
                    } else {
                        wander(&party_ref, guest, poll)
                    }
                })
            });

            if let Err(e) = spawned {
                party.halted.set();
                // The spawn failure is what the caller needs to see
                let _ = group.join_all();
                return Err(e.into());
            }
        }

        info!("{} guests have arrived at the labyrinth", guests);

        let selections = self.drive(&party);
        group.join_all()?;
        let elapsed = start.elapsed();

        let lock = LockSummary::from(party.state.stats());
        let state = match Arc::try_unwrap(party) {
            Ok(party) => party.state.into_inner(),
            Err(party) => party.state.lock().clone(),
        };

        if state.count() != guests || state.visited_count() != guests {
            return Err(ProtocolError::Incomplete {
                expected: guests,
                actual: state.count(),
            }
            .into());
        }

        Ok(LabyrinthReport {
            guest_count: guests,
            count: state.count(),
            claim_order: state.claim_order(),
            events: state.events().to_vec(),
            selections,
            elapsed_ms: millis(elapsed),
            lock,
        })
    }
}

/// The leader's loop: replace eaten cupcakes and count.
fn count_cupcakes(party: &Party, poll: PollStrategy) -> Result<()> {
    let mut poller = Poller::new(poll);

    while !party.halted.is_set() {
        let mut state = party.state.lock();
        if state.is_complete() {
            break;
        }

        let event = state.leader_step(party.active.current());
        if let Some(event) = event {
            match event {
                CupcakeEvent::Replaced { count } => {
                    debug!("{} asked for a new cupcake (count: {})", GuestId::LEADER, count)
                }
                CupcakeEvent::LeaderCounted { count } => {
                    debug!("{} counted their own visit (count: {})", GuestId::LEADER, count)
                }
                CupcakeEvent::Eaten { .. } => {}
            }

            if state.is_complete() {
                party.finished.set();
            }
        }
        drop(state);

        if event.is_some() {
            poller.reset();
        } else {
            poller.pause();
        }
    }

    Ok(())
}

/// A follower's loop: eat the cupcake once, then keep wandering until counted.
fn wander(party: &Party, guest: GuestId, poll: PollStrategy) -> Result<()> {
    let mut poller = Poller::new(poll);

    while !party.halted.is_set() {
        let mut state = party.state.lock();
        if state.is_complete() {
            break;
        }

        let ate = state.guest_step(guest, party.active.current());
        drop(state);

        if ate {
            info!("{} ate the cupcake!", guest);
            poller.reset();
        } else {
            poller.pause();
        }
    }

    Ok(())
}
