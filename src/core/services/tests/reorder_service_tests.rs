use super::{ids, section, text};
use crate::core::services::{DropSlot, ReorderService};
use crate::domain::{Field, FieldType};

/// `[a, s1, b, c, s2, d, e]`: s1 owns b and c, s2 owns d and e.
fn sample() -> Vec<Field> {
    vec![
        text("a"),
        section("s1"),
        text("b"),
        text("c"),
        section("s2"),
        text("d"),
        text("e"),
    ]
}

#[test]
fn block_range_covers_section_children() {
    let fields = sample();
    assert_eq!(ReorderService::block_range(&fields, 1), 1..=3);
    assert_eq!(ReorderService::block_range(&fields, 4), 4..=6);
    assert_eq!(ReorderService::block_range(&fields, 2), 2..=2);
}

#[test]
fn section_block_moves_to_end() {
    let moved = ReorderService::move_field_to_index(&sample(), "s1", 7);
    assert_eq!(ids(&moved), vec!["a", "s2", "d", "e", "s1", "b", "c"]);
}

#[test]
fn section_block_moves_to_front() {
    let moved = ReorderService::move_field_to_index(&sample(), "s2", 0);
    assert_eq!(ids(&moved), vec!["s2", "d", "e", "a", "s1", "b", "c"]);
}

#[test]
fn forward_move_subtracts_block_length() {
    let moved = ReorderService::move_field_to_index(&sample(), "s1", 5);
    assert_eq!(ids(&moved), vec!["a", "s2", "s1", "b", "c", "d", "e"]);
}

#[test]
fn dropping_into_own_block_is_a_no_op() {
    let fields = sample();
    for target in 1..=4 {
        let moved = ReorderService::move_field_to_index(&fields, "s1", target);
        assert_eq!(moved, fields, "target {target} should not reorder");
    }
    let moved = ReorderService::move_field_to_index(&fields, "b", 3);
    assert_eq!(moved, fields);
}

#[test]
fn single_field_moves_backward_and_forward() {
    let moved = ReorderService::move_field_to_index(&sample(), "b", 0);
    assert_eq!(ids(&moved), vec!["b", "a", "s1", "c", "s2", "d", "e"]);

    let moved = ReorderService::move_field_to_index(&sample(), "a", 2);
    assert_eq!(ids(&moved), vec!["s1", "a", "b", "c", "s2", "d", "e"]);
}

#[test]
fn target_past_the_end_is_clamped() {
    let moved = ReorderService::move_field_to_index(&sample(), "a", 100);
    assert_eq!(ids(&moved), vec!["s1", "b", "c", "s2", "d", "e", "a"]);
}

#[test]
fn unknown_field_leaves_list_unchanged() {
    let fields = sample();
    assert_eq!(
        ReorderService::move_field_to_index(&fields, "missing", 0),
        fields
    );
}

#[test]
fn moved_block_stays_contiguous_for_every_target() {
    let fields = sample();
    for target in 0..=fields.len() + 1 {
        let moved = ReorderService::move_field_to_index(&fields, "s1", target);
        assert_eq!(moved.len(), fields.len());
        let start = moved.iter().position(|f| f.id == "s1").unwrap();
        assert_eq!(
            ids(&moved[start..start + 3]),
            vec!["s1", "b", "c"],
            "target {target}"
        );
    }
}

#[test]
fn add_field_clamps_index_and_applies_defaults() {
    let fields = sample();
    let (next, created) = ReorderService::add_field(&fields, FieldType::Textarea, 99);
    assert_eq!(next.len(), fields.len() + 1);
    assert_eq!(next.last().unwrap().id, created.id);
    assert_eq!(created.col_span, 2);

    let (next, created) = ReorderService::add_field(&fields, FieldType::Radio, 0);
    assert_eq!(next[0].id, created.id);
    assert_eq!(created.options.len(), 2);
}

#[test]
fn inline_slot_inserts_after_anchor() {
    let fields = sample();
    assert_eq!(
        ReorderService::resolve_slot(&fields, &DropSlot::InlineBeside("b".into())),
        3
    );
    assert_eq!(
        ReorderService::resolve_slot(&fields, &DropSlot::InlineBeside("ghost".into())),
        fields.len()
    );
    assert_eq!(ReorderService::resolve_slot(&fields, &DropSlot::Index(40)), 7);
}
