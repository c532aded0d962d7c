use std::cell::RefCell;
use std::rc::Rc;

use astra_shared::{DataTracker, SerializedEntry, TrackedData, TrackedValue};

const HEALTH: TrackedData<f32> = TrackedData::new(0);
const ACTIVE: TrackedData<bool> = TrackedData::new(1);

fn ship_tracker() -> DataTracker {
    DataTracker::builder("ship", 2)
        .add(HEALTH, 20.0)
        .add(ACTIVE, false)
        .build()
}

#[test]
fn a_changing_write_is_drained_exactly_once() {
    let mut tracker = ship_tracker();

    tracker.set(HEALTH, 15.0);
    assert!(tracker.is_dirty());

    let entries = tracker.dirty_entries().unwrap();
    assert_eq!(entries, vec![SerializedEntry::new(0, TrackedValue::Float(15.0))]);

    // draining cleared the dirty bits; a second drain yields nothing
    assert!(!tracker.is_dirty());
    assert_eq!(tracker.dirty_entries(), None);
}

#[test]
fn writing_an_equal_value_is_a_complete_no_op() {
    let mut tracker = ship_tracker();

    tracker.set(ACTIVE, false);
    tracker.set(ACTIVE, false);
    tracker.set(HEALTH, 20.0);

    assert!(!tracker.is_dirty());
    assert_eq!(tracker.dirty_entries(), None);
}

#[test]
fn a_write_that_reverts_within_the_window_produces_no_entry() {
    let mut tracker = ship_tracker();

    tracker.set(HEALTH, 15.0);
    tracker.set(HEALTH, 20.0);

    // only slots whose final value differs from the last synced value drain
    assert_eq!(tracker.dirty_entries(), None);
}

#[test]
fn only_the_final_value_of_a_window_is_drained() {
    let mut tracker = ship_tracker();

    tracker.set(HEALTH, 15.0);
    tracker.set(HEALTH, 12.5);
    tracker.set(ACTIVE, true);

    let entries = tracker.dirty_entries().unwrap();
    assert_eq!(
        entries,
        vec![
            SerializedEntry::new(0, TrackedValue::Float(12.5)),
            SerializedEntry::new(1, TrackedValue::Bool(true)),
        ]
    );
}

#[test]
fn windows_are_independent_between_drains() {
    let mut tracker = ship_tracker();

    tracker.set(HEALTH, 15.0);
    tracker.dirty_entries().unwrap();

    // reverting to the original creation value is still a change relative to
    // the synced value of the previous window
    tracker.set(HEALTH, 20.0);
    let entries = tracker.dirty_entries().unwrap();
    assert_eq!(entries, vec![SerializedEntry::new(0, TrackedValue::Float(20.0))]);
}

#[test]
fn force_set_marks_dirty_even_on_an_equal_value() {
    let mut tracker = ship_tracker();

    tracker.force_set(ACTIVE, false);
    assert!(tracker.is_dirty());
    // the value never left its synced state, so the drain stays empty
    assert_eq!(tracker.dirty_entries(), None);

    tracker.force_set(HEALTH, 25.0);
    let entries = tracker.dirty_entries().unwrap();
    assert_eq!(entries, vec![SerializedEntry::new(0, TrackedValue::Float(25.0))]);
}

#[test]
fn changed_entries_compare_against_creation_and_never_clear() {
    let mut tracker = ship_tracker();

    assert_eq!(tracker.changed_entries(), None);

    tracker.set(HEALTH, 15.0);
    tracker.dirty_entries().unwrap();

    // dirty state is drained, but the slot still differs from creation
    let changed = tracker.changed_entries().unwrap();
    assert_eq!(changed, vec![SerializedEntry::new(0, TrackedValue::Float(15.0))]);
    // read-only: asking again gives the same answer
    assert_eq!(tracker.changed_entries().unwrap(), changed);

    tracker.set(HEALTH, 20.0);
    assert_eq!(tracker.changed_entries(), None);
}

#[test]
fn the_attribute_changed_hook_fires_on_effective_writes_only() {
    let mut tracker = ship_tracker();
    let slots: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&slots);
    tracker.set_on_changed(Box::new(move |slot| seen.borrow_mut().push(slot)));

    tracker.set(HEALTH, 15.0);
    tracker.set(HEALTH, 15.0);
    tracker.set(ACTIVE, true);

    assert_eq!(*slots.borrow(), vec![0, 1]);
}

#[test]
fn applied_updates_fire_the_same_hook_as_local_writes() {
    let mut tracker = ship_tracker();
    let slots: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&slots);
    tracker.set_on_changed(Box::new(move |slot| seen.borrow_mut().push(slot)));

    tracker
        .write_updated_entries(&[
            SerializedEntry::new(0, TrackedValue::Float(11.0)),
            SerializedEntry::new(1, TrackedValue::Bool(true)),
        ])
        .unwrap();

    assert_eq!(*slots.borrow(), vec![0, 1]);
    assert_eq!(tracker.get(HEALTH), 11.0);
    assert!(tracker.get(ACTIVE));
}

#[test]
fn applying_updates_does_not_mark_the_shadow_dirty() {
    let mut tracker = ship_tracker();

    tracker
        .write_updated_entries(&[SerializedEntry::new(0, TrackedValue::Float(9.0))])
        .unwrap();

    // the observer never re-replicates applied state
    assert!(!tracker.is_dirty());
    assert_eq!(tracker.dirty_entries(), None);
}
