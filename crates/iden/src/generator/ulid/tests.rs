use std::collections::HashSet;
use std::thread::scope;

use crate::{
    Error,
    generator::{
        Generator, UlidGenerator,
        mock::{FailingRand, MockRand, MockTime},
    },
    id::Ulid,
    rand::ThreadRandom,
    time::{SystemClock, TimeSource},
};

fn run_generator_monotonic<G>(generator: &G)
where
    G: Generator<Id = Ulid>,
{
    let ids: Vec<Ulid> = (0..8192).map(|_| generator.generate().unwrap()).collect();
    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1], "{:?} >= {:?}", pair[0], pair[1]);
        assert!(pair[0].to_string() < pair[1].to_string());
    }
}

#[test]
fn random_increments_within_same_millisecond() {
    let generator = UlidGenerator::with_sources(MockTime::new(42), MockRand(1_000));

    let id1 = generator.generate().unwrap();
    let id2 = generator.generate().unwrap();
    let id3 = generator.generate().unwrap();

    assert_eq!(id1.timestamp(), 42);
    assert_eq!(id1.random(), 1_000);
    assert_eq!(id2.random(), 1_001);
    assert_eq!(id3.random(), 1_002);
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn increment_carries_across_the_whole_random_field() {
    let generator =
        UlidGenerator::from_components(42, 0xFFFF_FFFF_FFFF_FFFF, MockTime::new(42), MockRand(0));
    let id = generator.generate().unwrap();
    assert_eq!(id.timestamp(), 42);
    assert_eq!(id.random(), 1 << 64);
}

#[test]
fn exhausted_random_space_is_an_error() {
    let generator =
        UlidGenerator::from_components(42, Ulid::max_random(), MockTime::new(42), MockRand(0));
    assert_eq!(
        generator.generate(),
        Err(Error::EntropyExhausted { timestamp: 42 })
    );
}

#[test]
fn new_millisecond_draws_fresh_random() {
    let clock = MockTime::new(42);
    let generator = UlidGenerator::with_sources(&clock, MockRand(u128::MAX));

    // the draw is truncated to 80 bits
    let first = generator.generate().unwrap();
    assert_eq!(first.random(), Ulid::max_random());

    clock.set(43);
    let second = generator.generate().unwrap();
    assert_eq!(second.timestamp(), 43);
    assert_eq!(second.random(), Ulid::max_random());
    assert!(first < second);
}

#[test]
fn clock_regression_draws_fresh_random() {
    let clock = MockTime::new(100);
    let generator = UlidGenerator::with_sources(&clock, MockRand(7));
    generator.generate().unwrap();

    clock.set(90);
    let id = generator.generate().unwrap();
    assert_eq!(id.timestamp(), 90);
    assert_eq!(id.random(), 7);
}

#[test]
fn entropy_source_failure_propagates() {
    let generator = UlidGenerator::with_sources(MockTime::new(42), FailingRand);
    assert!(matches!(generator.generate(), Err(Error::EntropySource(_))));
}

#[test]
fn rejects_clock_past_timestamp_field() {
    let generator = UlidGenerator::with_sources(MockTime::new(1 << 48), MockRand(0));
    assert!(matches!(
        generator.generate(),
        Err(Error::Validation {
            field: "timestamp",
            ..
        })
    ));
}

#[test]
fn ids_across_ticks_sort_in_call_order() {
    let clock = MockTime::new(1);
    let generator = UlidGenerator::with_sources(&clock, ThreadRandom);

    let mut ids = Vec::new();
    for ms in 1..=50 {
        clock.set(ms);
        ids.push(generator.generate().unwrap());
        ids.push(generator.generate().unwrap());
    }

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn generated_text_is_canonical() {
    let generator = UlidGenerator::new();
    for _ in 0..100 {
        let s = generator.generate().unwrap().to_string();
        assert_eq!(s.len(), 26);
        assert!(s.as_bytes()[0] <= b'7', "{s}");
        assert_eq!(Ulid::from_string(&s).unwrap().to_string(), s);
    }
}

#[test]
fn generated_timestamp_is_unix_millis() {
    let clock = SystemClock::default();
    let generator: UlidGenerator = UlidGenerator::default();
    let before = clock.current_millis();
    let id = generator.generate().unwrap();
    let after = clock.current_millis();
    assert!(before <= id.timestamp() && id.timestamp() <= after);
}

#[test]
fn generator_monotonic_with_system_clock() {
    run_generator_monotonic(&UlidGenerator::new());
}

#[test]
fn generator_threaded_uniqueness() {
    const THREADS: usize = 8;
    const IDS_PER_THREAD: usize = 4096;

    let generator = UlidGenerator::new();
    let per_thread: Vec<Vec<Ulid>> = scope(|s| {
        let generator = &generator;
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(move || {
                    (0..IDS_PER_THREAD)
                        .map(|_| generator.generate().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut seen = HashSet::new();
    for ids in &per_thread {
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        for id in ids {
            assert!(seen.insert(*id), "duplicate ID: {id:?}");
        }
    }
    assert_eq!(seen.len(), THREADS * IDS_PER_THREAD);
}
