//! SparseSet generational handle tests.
//!
//! UI objects are addressed through these handles, so a destroyed object's
//! handle must never resolve to whatever object reuses its slot.

use anchorage_core::alloc::sparse_set::{IndexSlot, SparseSet};

#[test]
fn test_push_and_get() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    assert_eq!(set.get(idx), Some(&42));

    let idx2 = set.push(100);
    assert_eq!(set.get(idx2), Some(&100));
    assert_eq!(set.get(idx), Some(&42));
}

#[test]
fn test_get_mut() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    if let Some(value) = set.get_mut(idx) {
        *value = 100;
    }

    assert_eq!(set.get(idx), Some(&100));
}

#[test]
fn test_out_of_range_handle_returns_none() {
    let set = SparseSet::<i32>::new();
    assert_eq!(set.get(IndexSlot::new(0, 999)), None);
    assert!(!set.contains(IndexSlot::new(0, 999)));
}

#[test]
fn test_stale_handle_after_reuse() {
    let mut set = SparseSet::new();

    let old = set.push("destroyed");
    set.remove(old);
    let new = set.push("replacement");

    assert_eq!(old.index(), new.index());
    assert_eq!(set.get(old), None);
    assert_eq!(set.get(new), Some(&"replacement"));
}

#[test]
fn test_multiple_generation_increments() {
    let mut set = SparseSet::new();

    let mut handle = set.push(0);
    for i in 1..=5 {
        set.remove(handle);
        handle = set.push(i);
        assert_eq!(handle.generation(), i as u32);
    }
    assert_eq!(set.len(), 1);
}

#[test]
fn test_double_remove_is_noop() {
    let mut set = SparseSet::new();
    let idx = set.push(1);
    assert_eq!(set.remove(idx), Some(1));
    assert_eq!(set.remove(idx), None);
    assert!(set.is_empty());
}

#[test]
fn test_iteration_skips_removed_elements() {
    let mut set = SparseSet::new();
    let handles: Vec<_> = (0..10).map(|i| set.push(i)).collect();

    for handle in handles.iter().step_by(2) {
        set.remove(*handle);
    }

    let values: Vec<_> = set.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![1, 3, 5, 7, 9]);

    let slots: Vec<_> = set.slots().collect();
    assert_eq!(slots.len(), 5);
    for slot in slots {
        assert!(set.contains(slot));
    }
}

#[test]
fn test_iter_mut() {
    let mut set = SparseSet::new();
    for i in 0..4 {
        set.push(i);
    }

    for (_, value) in set.iter_mut() {
        *value *= 10;
    }

    let values: Vec<_> = set.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![0, 10, 20, 30]);
}

#[test]
fn test_index_slot_display() {
    let slot = IndexSlot::new(3, 7);
    assert_eq!(slot.to_string(), "7v3");
    assert_eq!(slot.index(), 7);
    assert_eq!(slot.generation(), 3);
}
