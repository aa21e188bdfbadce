//! Integration tests for the scheduled and manual reset flows.
//!
//! Reset hour is 10:00 UTC and the weekly anchor is Wednesday.
//! 2025-01-07 is a Tuesday, 2025-01-08 a Wednesday.

use chrono::{DateTime, TimeZone, Utc};
use rosterlist_core::{
    reconcile, Catalog, Character, Checklist, CompletionState, Event, KeyValueStore, MemoryStore,
    ResetKind, ResetPolicy, StorageKeys,
};

const STATE_KEY: &str = "lost-ark-check-list-taskCompletionState";
const CHECKED_KEY: &str = "lost-ark-check-list-lastCheckedDate";

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        Character::new("Berserker", ["World Event", "Chaos Dungeon", "Guardian Raid"]),
        Character::new("Sorceress", ["World Event", "Chaos Dungeon"]),
        Character::new("Gunlancer", ["Chaos Dungeon"]),
    ])
    .unwrap()
}

/// Store with every catalog task done and the given last-checked instant.
fn all_done_store(last_checked: Option<DateTime<Utc>>) -> MemoryStore {
    let catalog = catalog();
    let mut state = CompletionState::cleared(&catalog);
    for character in catalog.characters() {
        for task in &character.tasks {
            state.toggle(&character.name, task);
        }
    }

    let store = MemoryStore::new();
    store.set(STATE_KEY, &state.to_json().unwrap()).unwrap();
    if let Some(checked) = last_checked {
        store.set(CHECKED_KEY, &checked.to_rfc3339()).unwrap();
    }
    store
}

fn open(store: &MemoryStore) -> Checklist<&MemoryStore> {
    Checklist::open(catalog(), ResetPolicy::default(), store, StorageKeys::default())
}

#[test]
fn test_first_run_clears_everything() {
    let store = all_done_store(None);
    let mut checklist = open(&store);

    assert_eq!(checklist.initialize(at(9, 15)).unwrap(), ResetKind::Weekly);
    assert_eq!(checklist.state(), &CompletionState::cleared(&catalog()));
    assert_eq!(checklist.last_checked(), Some(at(9, 15)));
}

#[test]
fn test_daily_boundary_resets_only_daily_task() {
    let store = all_done_store(Some(at(7, 9)));
    let mut checklist = open(&store);

    assert_eq!(checklist.initialize(at(7, 11)).unwrap(), ResetKind::Daily);

    let state = checklist.state();
    assert!(!state.is_done("Berserker", "World Event"));
    assert!(!state.is_done("Sorceress", "World Event"));
    assert!(state.is_done("Berserker", "Chaos Dungeon"));
    assert!(state.is_done("Berserker", "Guardian Raid"));
    assert!(state.is_done("Gunlancer", "Chaos Dungeon"));

    let events = checklist.drain_events();
    let notices: Vec<_> = events.iter().filter_map(Event::notice).collect();
    assert_eq!(notices, vec!["Daily reset has happened."]);
}

#[test]
fn test_weekly_boundary_wins_over_daily() {
    let store = all_done_store(Some(at(7, 9)));
    let mut checklist = open(&store);

    assert_eq!(checklist.initialize(at(8, 11)).unwrap(), ResetKind::Weekly);
    assert_eq!(checklist.state(), &CompletionState::cleared(&catalog()));
}

#[test]
fn test_already_checked_after_boundaries_changes_nothing() {
    let store = all_done_store(Some(at(8, 11)));
    let saved_before = store.get(STATE_KEY).unwrap();
    let checked_before = store.get(CHECKED_KEY).unwrap();

    let mut checklist = open(&store);
    assert_eq!(checklist.initialize(at(8, 15)).unwrap(), ResetKind::None);

    assert!(checklist.state().is_done("Berserker", "World Event"));
    assert_eq!(checklist.last_checked(), Some(at(8, 11)));
    assert_eq!(store.get(STATE_KEY).unwrap(), saved_before);
    assert_eq!(store.get(CHECKED_KEY).unwrap(), checked_before);
}

#[test]
fn test_manual_reset_confirmed_and_declined() {
    let store = all_done_store(Some(at(8, 11)));
    let mut checklist = open(&store);
    checklist.initialize(at(8, 15)).unwrap();
    let before = checklist.state().clone();

    assert!(!checklist.manual_reset(&|_: &str| false).unwrap());
    assert_eq!(checklist.state(), &before);

    assert!(checklist.manual_reset(&|_: &str| true).unwrap());
    assert_eq!(checklist.state(), &CompletionState::cleared(&catalog()));

    let saved = store.get(STATE_KEY).unwrap();
    assert_eq!(
        reconcile(&catalog(), saved.as_deref()),
        CompletionState::cleared(&catalog())
    );
    assert_eq!(checklist.last_checked(), Some(at(8, 11)));
}

#[test]
fn test_second_session_same_instant_does_not_refire() {
    let store = all_done_store(Some(at(7, 9)));
    let now = at(7, 11);

    let mut first = open(&store);
    assert_eq!(first.initialize(now).unwrap(), ResetKind::Daily);
    first.toggle("Sorceress", "World Event").unwrap();
    drop(first);

    let mut second = open(&store);
    assert_eq!(second.initialize(now).unwrap(), ResetKind::None);
    assert!(second.state().is_done("Sorceress", "World Event"));
}

#[test]
fn test_custom_daily_task_list() {
    let store = all_done_store(Some(at(7, 9)));
    let policy = ResetPolicy::new(
        10,
        chrono::Weekday::Wed,
        vec!["World Event".to_string(), "Chaos Dungeon".to_string()],
    )
    .unwrap();
    let mut checklist = Checklist::open(catalog(), policy, &store, StorageKeys::default());

    assert_eq!(checklist.initialize(at(7, 11)).unwrap(), ResetKind::Daily);
    let state = checklist.state();
    assert!(!state.is_done("Berserker", "Chaos Dungeon"));
    assert!(!state.is_done("Gunlancer", "Chaos Dungeon"));
    assert!(state.is_done("Berserker", "Guardian Raid"));
}
