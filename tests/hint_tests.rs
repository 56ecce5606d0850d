//! Tests for one-time hints across repeated mounts.

use dropfolio::sandbox::{
    HintKind, HintPhase, HintState, KeyValueStore, HINT_FADE_SECONDS, HINT_VISIBLE_SECONDS,
};

fn temp_store(name: &str) -> (KeyValueStore, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!(
        "dropfolio-hints-{}-{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    (KeyValueStore::open_at(&path).unwrap(), path)
}

/// Drive a schedule through its full lifetime, marking flags the way the
/// hint system does.
fn play_all_hints(state: &mut HintState, store: &KeyValueStore) {
    let max_delay = HintKind::Lever.delay_seconds();
    let total = max_delay + HINT_VISIBLE_SECONDS + HINT_FADE_SECONDS + 1.0;
    let mut t = 0.0;
    while t < total {
        for hint in state.scheduled.iter_mut() {
            if hint.advance(0.1) {
                store.mark_hint_seen(hint.kind.storage_key());
            }
        }
        t += 0.1;
    }
}

#[test]
fn test_fresh_install_schedules_both_hints() {
    let (store, path) = temp_store("fresh");
    let state = HintState::schedule_unseen(&store);
    assert_eq!(state.scheduled.len(), 2);
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_hints_show_at_most_once_across_mounts() {
    let (store, path) = temp_store("mounts");

    // First mount: both hints play through and set their flags.
    let mut state = HintState::schedule_unseen(&store);
    play_all_hints(&mut state, &store);
    assert!(state
        .scheduled
        .iter()
        .all(|hint| hint.phase == HintPhase::Done));
    assert!(store.hint_seen(HintKind::Grab.storage_key()));
    assert!(store.hint_seen(HintKind::Lever.storage_key()));

    // Second mount (same store): nothing is scheduled again.
    let state = HintState::schedule_unseen(&store);
    assert!(state.scheduled.is_empty());

    // Even across a process restart.
    drop(store);
    let store = KeyValueStore::open_at(&path).unwrap();
    let state = HintState::schedule_unseen(&store);
    assert!(state.scheduled.is_empty());
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_partial_progress_does_not_set_flags() {
    let (store, path) = temp_store("partial");
    let mut state = HintState::schedule_unseen(&store);

    // Quit mid-delay: nothing seen yet, so both come back next mount.
    for hint in state.scheduled.iter_mut() {
        hint.advance(1.0);
    }
    assert!(!store.hint_seen(HintKind::Grab.storage_key()));

    let state = HintState::schedule_unseen(&store);
    assert_eq!(state.scheduled.len(), 2);
    let _ = std::fs::remove_file(path);
}
