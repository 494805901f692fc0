use gradebook_core::{next_color, GradebookStore, MemoryStorage, PALETTE, PALETTE_LEN};

#[test]
fn palette_has_seven_slots_with_neutral_fallback_last() {
    assert_eq!(PALETTE.len(), PALETTE_LEN);
    assert_eq!(PALETTE[0].value, "#ff9999");
    assert_eq!(PALETTE[0].name, "Red");
    assert_eq!(PALETTE[PALETTE_LEN - 1].value, "#fff");
    assert_eq!(PALETTE[PALETTE_LEN - 1].name, "White");
}

#[test]
fn advance_walks_every_slot_before_repeating() {
    let mut index = 0;
    let mut seen = Vec::new();
    for _ in 0..PALETTE_LEN {
        let step = next_color(index);
        seen.push(step.index);
        index = step.index;
    }

    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(index, 0);
}

#[test]
fn first_change_on_fresh_row_assigns_slot_one() {
    let mut store = GradebookStore::load(MemoryStorage::new());
    store.add_row("Math");
    assert!(store.get_row("Math").unwrap().color.is_none());

    store.change_color("Math");

    let color = store.get_row("Math").unwrap().color.as_ref().unwrap();
    assert_eq!(color.index, 1);
    assert_eq!(color.background, "#99ff99");
    assert_eq!(color.name, "Green");
}

#[test]
fn seven_changes_complete_a_full_cycle() {
    let mut store = GradebookStore::load(MemoryStorage::new());
    store.add_row("Math");

    for _ in 0..PALETTE_LEN {
        store.change_color("Math");
    }

    // Back to the cycle position a fresh row starts from.
    let color = store.get_row("Math").unwrap().color.as_ref().unwrap();
    assert_eq!(color.index, 0);

    store.change_color("Math");
    assert_eq!(store.get_row("Math").unwrap().color.as_ref().unwrap().index, 1);
}

#[test]
fn change_color_on_unknown_or_deleted_subject_is_a_no_op() {
    let mut store = GradebookStore::load(MemoryStorage::new());
    store.add_row("Math");
    store.delete_row("Math");

    store.change_color("Math");
    store.change_color("Physics");

    assert!(store.get_row("Math").unwrap().color.is_none());
    assert!(store.get_row("Physics").is_none());
}
