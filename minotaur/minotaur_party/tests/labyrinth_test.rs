//! Integration tests for the labyrinth game.
//!
//! These run real guest threads, so they use small parties and a driver that
//! lingers on each pick long enough for the chosen guest to notice.

use std::collections::HashSet;

use minotaur_concurrency::ThreadGroupConfig;
use minotaur_core::error::{ConcurrencyError, ConfigError, Error};
use minotaur_core::{GuestId, PollStrategy, Simulation, SimulationConfig, SimulationKind};
use minotaur_party::{CupcakeEvent, Labyrinth, LabyrinthReport, RoundRobinSelector};

fn party_config(guests: usize) -> SimulationConfig {
    let mut config = SimulationConfig::default()
        .with_guest_count(guests)
        .with_poll(PollStrategy::Backoff {
            initial_us: 1,
            max_us: 50,
        });
    config.labyrinth.selection_dwell_us = 200;
    config
}

fn run_round_robin(guests: usize) -> LabyrinthReport {
    let mut labyrinth = Labyrinth::new(party_config(guests))
        .unwrap()
        .with_selector(RoundRobinSelector::new());
    labyrinth.run().unwrap()
}

#[test]
fn test_counts_every_guest() {
    let guests = 8;
    let report = run_round_robin(guests);

    assert_eq!(report.guest_count, guests);
    assert_eq!(report.count, guests);
    assert!(report.selections >= guests);

    // Every follower ate exactly once; the leader never eats
    assert_eq!(report.claim_order.len(), guests - 1);
    let distinct: HashSet<GuestId> = report.claim_order.iter().copied().collect();
    assert_eq!(distinct.len(), guests - 1);
    assert!(!distinct.contains(&GuestId::LEADER));
}

#[test]
fn test_count_never_decreases() {
    let guests = 6;
    let report = run_round_robin(guests);

    let counts: Vec<usize> = report
        .events
        .iter()
        .filter_map(|event| match event {
            CupcakeEvent::Replaced { count } | CupcakeEvent::LeaderCounted { count } => {
                Some(*count)
            }
            CupcakeEvent::Eaten { .. } => None,
        })
        .collect();

    assert_eq!(counts, (1..=guests).collect::<Vec<_>>());

    let leader_counts = report
        .events
        .iter()
        .filter(|event| matches!(event, CupcakeEvent::LeaderCounted { .. }))
        .count();
    assert_eq!(leader_counts, 1);
}

#[test]
fn test_every_eaten_cupcake_is_replaced_before_the_next() {
    let report = run_round_robin(5);

    let mut plate_full = true;
    for event in &report.events {
        match event {
            CupcakeEvent::Eaten { .. } => {
                assert!(plate_full, "cupcake eaten from an empty plate");
                plate_full = false;
            }
            CupcakeEvent::Replaced { .. } => {
                assert!(!plate_full, "replaced a cupcake that was still there");
                plate_full = true;
            }
            CupcakeEvent::LeaderCounted { .. } => assert!(plate_full),
        }
    }
}

#[test]
fn test_single_guest_terminates() {
    let report = run_round_robin(1);

    assert_eq!(report.count, 1);
    assert!(report.claim_order.is_empty());
    assert_eq!(report.events, vec![CupcakeEvent::LeaderCounted { count: 1 }]);
}

#[test]
fn test_random_driver_with_seed() {
    let mut config = party_config(5);
    config.seed = Some(2024);

    let mut labyrinth = Labyrinth::new(config).unwrap();
    assert_eq!(labyrinth.kind(), SimulationKind::Labyrinth);
    assert_eq!(labyrinth.guest_count(), 5);

    let report = labyrinth.run().unwrap();
    assert_eq!(report.count, 5);
}

#[test]
fn test_rerun_reaches_same_count() {
    let mut labyrinth = Labyrinth::new(party_config(4))
        .unwrap()
        .with_selector(RoundRobinSelector::new());

    for _ in 0..3 {
        let report = labyrinth.run().unwrap();
        assert_eq!(report.count, 4);
        assert_eq!(report.claim_order.len(), 3);
    }
}

#[test]
fn test_spin_polling() {
    let mut config = party_config(3).with_poll(PollStrategy::Spin);
    config.labyrinth.selection_dwell_us = 500;

    let mut labyrinth = Labyrinth::new(config)
        .unwrap()
        .with_selector(RoundRobinSelector::new());
    assert_eq!(labyrinth.run().unwrap().count, 3);
}

#[test]
fn test_report_output() {
    let report = run_round_robin(3);

    let text = report.to_string();
    assert!(text.contains("All 3 guests have entered the labyrinth."));
    assert!(text.contains("Finished in"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["count"], 3);
    assert_eq!(json["claim_order"].as_array().unwrap().len(), 2);
    assert!(json["lock"]["acquisitions"].as_u64().unwrap() > 0);
}

#[test]
fn test_invalid_config_rejected() {
    let result = Labyrinth::new(SimulationConfig::default().with_guest_count(0));
    assert!(matches!(result, Err(Error::Config(ConfigError::NoGuests))));
}

#[test]
fn test_spawn_failure_returns_error() {
    let threads = ThreadGroupConfig {
        thread_name_prefix: "guest".to_string(),
        stack_size: Some(usize::MAX / 2),
    };

    let result = Labyrinth::new(party_config(3))
        .unwrap()
        .with_thread_config(threads)
        .run();

    assert!(matches!(
        result,
        Err(Error::Concurrency(ConcurrencyError::SpawnFailed { .. }))
    ));
}
