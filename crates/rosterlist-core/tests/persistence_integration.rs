//! Integration tests for sessions persisted in SQLite across runs.

use chrono::{TimeZone, Utc};
use rosterlist_core::{
    Catalog, Character, Checklist, Config, Database, KeyValueStore, ResetKind, StorageKeys,
};

#[test]
fn test_state_survives_reopen_and_catalog_changes() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("rosterlist.db");
    let config = Config::default();
    let policy = config.reset_policy().unwrap();
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();

    let roster_v1 = Catalog::new(vec![
        Character::new("Berserker", ["World Event", "Chaos Dungeon"]),
        Character::new("Bard", ["World Event"]),
    ])
    .unwrap();

    {
        let db = Database::open_at(&db_path).unwrap();
        let mut checklist =
            Checklist::open(roster_v1, policy.clone(), db, config.storage_keys());
        checklist.initialize(now).unwrap();
        checklist.toggle("Berserker", "Chaos Dungeon").unwrap();
        checklist.toggle("Bard", "World Event").unwrap();
    }

    // Bard retired, Paladin added, Berserker gained a task.
    let roster_v2 = Catalog::new(vec![
        Character::new("Berserker", ["World Event", "Chaos Dungeon", "Abyss Dungeon"]),
        Character::new("Paladin", ["World Event"]),
    ])
    .unwrap();

    let db = Database::open_at(&db_path).unwrap();
    let later = now + chrono::Duration::hours(2);
    let mut checklist = Checklist::open(roster_v2, policy, db, config.storage_keys());
    assert_eq!(checklist.initialize(later).unwrap(), ResetKind::None);

    let state = checklist.state();
    assert_eq!(state.len(), 2);
    assert!(state.is_done("Berserker", "Chaos Dungeon"));
    assert!(!state.is_done("Berserker", "Abyss Dungeon"));
    assert!(!state.is_done("Paladin", "World Event"));
    assert!(state.tasks("Bard").is_none());
}

#[test]
fn test_corrupted_state_row_loads_safe_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("rosterlist.db")).unwrap();
    let keys = StorageKeys::new("roster");
    db.set(&keys.completion_state, "{\"Bard\": {\"World Ev").unwrap();
    db.set(&keys.last_checked, "2025-01-08T11:00:00.000Z").unwrap();

    let catalog = Catalog::new(vec![Character::new("Bard", ["World Event"])]).unwrap();
    let mut checklist = Checklist::open(catalog, Default::default(), db, keys);
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 15, 0, 0).unwrap();

    assert_eq!(checklist.initialize(now).unwrap(), ResetKind::None);
    assert!(!checklist.state().is_done("Bard", "World Event"));
    assert!(checklist.toggle("Bard", "World Event").unwrap());
}

#[test]
fn test_app_names_do_not_share_state() {
    let db = Database::open_memory().unwrap();
    let catalog = Catalog::bundled();
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();

    let mut main = Checklist::open(
        catalog.clone(),
        Default::default(),
        &db,
        StorageKeys::new("main"),
    );
    main.initialize(now).unwrap();
    main.toggle("Berserker", "World Event").unwrap();

    let mut alt = Checklist::open(catalog, Default::default(), &db, StorageKeys::new("alt"));
    assert_eq!(alt.initialize(now).unwrap(), ResetKind::Weekly);
    assert!(!alt.state().is_done("Berserker", "World Event"));
}
