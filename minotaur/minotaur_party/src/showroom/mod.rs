//! The showroom game.
//!
//! One thread per guest polls the door under a single lock. A guest that gets
//! in releases the lock while it admires the vase, so the others keep polling
//! and find the sign reading `BUSY`. Once every guest has seen the vase the
//! threads are joined.

mod state;

pub use state::{ShowroomState, Visit};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;

use minotaur_concurrency::{AtomicFlag, Poller, ThreadGroup, ThreadGroupConfig, TrackedMutex};
use minotaur_core::error::{ProtocolError, Result};
use minotaur_core::{
    AdmissionStrategy, EntropyRandom, GuestId, PollStrategy, RandomSource, SeededRandom,
    Simulation, SimulationConfig, SimulationKind,
};

use crate::report::{millis, LockSummary};

/// Summary of a finished showroom game.
#[derive(Debug, Clone, Serialize)]
pub struct ShowroomReport {
    /// Number of guests at the party
    pub guest_count: usize,

    /// How guests were admitted
    pub admission: AdmissionStrategy,

    /// Every visit, in the order guests left the room
    pub visits: Vec<Visit>,

    /// Order in which guests joined the line (queue admission only)
    pub arrivals: Vec<GuestId>,

    /// Wall-clock duration of the run, in milliseconds
    pub elapsed_ms: f64,

    /// Lock usage
    pub lock: LockSummary,
}

impl ShowroomReport {
    /// Guests in the order they were admitted.
    pub fn admission_order(&self) -> Vec<GuestId> {
        self.visits.iter().map(|visit| visit.guest).collect()
    }

    /// Number of distinct guests who saw the vase.
    pub fn distinct_visitors(&self) -> usize {
        self.visits
            .iter()
            .map(|visit| visit.guest)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Every pair of visits that shared the room.
    pub fn overlapping_visits(&self) -> Vec<(Visit, Visit)> {
        let mut sorted = self.visits.clone();
        sorted.sort_by_key(|visit| visit.entered_us);

        let mut overlaps = Vec::new();
        for (i, earlier) in sorted.iter().enumerate() {
            for later in &sorted[i + 1..] {
                if later.entered_us >= earlier.left_us {
                    break;
                }
                if earlier.overlaps(later) {
                    overlaps.push((*earlier, *later));
                }
            }
        }
        overlaps
    }
}

impl fmt::Display for ShowroomReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "All guests have viewed the vase.")?;
        write!(f, "Finished in {:.3}ms", self.elapsed_ms)
    }
}

/// State shared by the guests for one run.
struct Gallery {
    state: TrackedMutex<ShowroomState>,
    halted: AtomicFlag,
    opened_at: Instant,
}

impl Gallery {
    fn now_us(&self) -> u64 {
        self.opened_at.elapsed().as_micros() as u64
    }
}

/// What a guest needs to know to take part.
#[derive(Clone, Copy)]
struct GuestPlan {
    guest: GuestId,
    poll: PollStrategy,
    min_hold_ms: u64,
    max_hold_ms: u64,
}

/// The showroom game.
pub struct Showroom {
    config: SimulationConfig,
    threads: ThreadGroupConfig,
}

impl Showroom {
    /// Create a game from a validated configuration.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            threads: ThreadGroupConfig::default(),
        })
    }

    /// Replace how guest threads are named and sized.
    pub fn with_thread_config(mut self, threads: ThreadGroupConfig) -> Self {
        self.threads = threads;
        self
    }

    fn random_source(&self, guest: GuestId) -> Box<dyn RandomSource> {
        match self.config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed.wrapping_add(guest.index() as u64))),
            None => Box::new(EntropyRandom::new()),
        }
    }
}

impl Simulation for Showroom {
    type Report = ShowroomReport;

    fn kind(&self) -> SimulationKind {
        SimulationKind::Showroom
    }

    fn guest_count(&self) -> usize {
        self.config.guest_count
    }

    fn run(&mut self) -> Result<ShowroomReport> {
        let guests = self.config.guest_count;
        let admission = self.config.showroom.admission;

        let gallery = Arc::new(Gallery {
            state: TrackedMutex::with_name(ShowroomState::new(guests, admission), "showroom"),
            halted: AtomicFlag::default(),
            opened_at: Instant::now(),
        });

        let mut group = ThreadGroup::new(self.threads.clone());

        for guest in GuestId::range(guests) {
            let gallery_ref = Arc::clone(&gallery);
            let rng = self.random_source(guest);
            let plan = GuestPlan {
                guest,
                poll: self.config.poll,
                min_hold_ms: self.config.showroom.min_hold_ms,
                max_hold_ms: self.config.showroom.max_hold_ms,
            };

            // A guest that fails frees everyone else from polling the door
            let spawned = group.spawn(guest.index(), move || {
                gallery_ref
                    .halted
                    .set_on_failure(|| admire_vase(&gallery_ref, plan, rng))
            });

            if let Err(e) = spawned {
                gallery.halted.set();
                // The spawn failure is what the caller needs to see
                let _ = group.join_all();
                return Err(e.into());
            }
        }

        info!("{} guests are waiting to see the vase", guests);

        group.join_all()?;
        let elapsed = gallery.opened_at.elapsed();

        let lock = LockSummary::from(gallery.state.stats());
        let state = match Arc::try_unwrap(gallery) {
            Ok(gallery) => gallery.state.into_inner(),
            Err(gallery) => gallery.state.lock().clone(),
        };

        let report = ShowroomReport {
            guest_count: guests,
            admission,
            visits: state.visits().to_vec(),
            arrivals: state.arrivals().to_vec(),
            elapsed_ms: millis(elapsed),
            lock,
        };

        if report.visits.len() != guests || report.distinct_visitors() != guests {
            return Err(ProtocolError::Incomplete {
                expected: guests,
                actual: report.distinct_visitors(),
            }
            .into());
        }

        Ok(report)
    }
}

/// A guest's loop: get in once, admire the vase, then wait for the others.
fn admire_vase(gallery: &Gallery, plan: GuestPlan, mut rng: Box<dyn RandomSource>) -> Result<()> {
    let mut poller = Poller::new(plan.poll);

    while !gallery.halted.is_set() {
        let mut state = gallery.state.lock();
        if state.is_complete() {
            break;
        }

        let entered = state.try_enter(plan.guest, gallery.now_us());
        drop(state);

        if !entered {
            poller.pause();
            continue;
        }
        poller.reset();

        // The sign keeps the room ours while the lock is free
        let hold = Duration::from_millis(rng.generate(plan.min_hold_ms, plan.max_hold_ms));
        info!("{} is admiring the vase", plan.guest);
        thread::sleep(hold);

        let visit = gallery.state.lock().leave(plan.guest, gallery.now_us())?;
        debug!(
            "{} left the showroom after {}us",
            plan.guest,
            visit.left_us - visit.entered_us
        );
    }

    Ok(())
}
