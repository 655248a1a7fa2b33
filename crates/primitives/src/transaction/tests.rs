use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ropey::Rope;

use super::{Bias, Change, ChangeSet, Transaction};

fn replace(start: usize, end: usize, text: &str) -> Change {
	Change {
		start,
		end,
		replacement: Some(text.to_string()),
	}
}

fn delete(start: usize, end: usize) -> Change {
	Change { start, end, replacement: None }
}

#[test]
fn consecutive_retains_merge() {
	let mut set = ChangeSet::default();
	set.retain(2);
	set.retain(3);
	assert_eq!(set.operations().len(), 1);
	assert_eq!(set.len(), 5);
	assert_eq!(set.len_after(), 5);
}

#[test]
fn insert_reorders_before_delete() {
	let mut doc = Rope::from("abcd");
	let tx = Transaction::change(doc.slice(..), vec![replace(1, 3, "XY")]);
	tx.apply(&mut doc);
	assert_eq!(doc.to_string(), "aXYd");
	// The replaced span's end sits after the inserted text.
	assert_eq!(tx.changes().map_pos(3, Bias::Right), 3);
	assert_eq!(tx.changes().map_pos(1, Bias::Left), 1);
}

#[test]
fn change_applies_multiple_spans() {
	let mut doc = Rope::from("one two three");
	let tx = Transaction::change(doc.slice(..), vec![delete(3, 7), replace(0, 3, "1")]);
	tx.apply(&mut doc);
	assert_eq!(doc.to_string(), "1 three");
}

#[test]
fn change_clamps_out_of_range_spans() {
	let mut doc = Rope::from("abc");
	let tx = Transaction::change(doc.slice(..), vec![replace(2, 99, "Z")]);
	tx.apply(&mut doc);
	assert_eq!(doc.to_string(), "abZ");
}

#[test]
fn change_drops_overlapping_spans() {
	let mut doc = Rope::from("abcdef");
	let tx = Transaction::change(doc.slice(..), vec![replace(0, 4, "x"), replace(2, 5, "y")]);
	tx.apply(&mut doc);
	assert_eq!(doc.to_string(), "xef");
}

#[test]
fn map_pos_through_insertion() {
	let doc = Rope::from("hello");
	let tx = Transaction::change(doc.slice(..), vec![replace(2, 2, "--")]);
	assert_eq!(tx.changes().map_pos(1, Bias::Left), 1);
	assert_eq!(tx.changes().map_pos(2, Bias::Left), 2);
	assert_eq!(tx.changes().map_pos(2, Bias::Right), 4);
	assert_eq!(tx.changes().map_pos(4, Bias::Left), 6);
}

#[test]
fn map_pos_through_deletion() {
	let doc = Rope::from("hello");
	let tx = Transaction::change(doc.slice(..), vec![delete(1, 4)]);
	assert_eq!(tx.changes().map_pos(0, Bias::Left), 0);
	assert_eq!(tx.changes().map_pos(2, Bias::Left), 1);
	assert_eq!(tx.changes().map_pos(4, Bias::Right), 1);
	assert_eq!(tx.changes().map_pos(5, Bias::Right), 2);
}

proptest! {
	#[test]
	fn mapped_positions_stay_in_bounds(
		text in "[a-z]{0,40}",
		start in 0usize..40,
		span in 0usize..10,
		insert in "[a-z]{0,8}",
		pos in 0usize..40,
	) {
		let doc = Rope::from(text.as_str());
		let len = doc.len_chars();
		let tx = Transaction::change(doc.slice(..), vec![replace(start.min(len), (start + span).min(len), &insert)]);
		let pos = pos.min(len);
		for bias in [Bias::Left, Bias::Right] {
			prop_assert!(tx.changes().map_pos(pos, bias) <= tx.changes().len_after());
		}
	}

	#[test]
	fn mapping_preserves_order(
		text in "[a-z]{1,40}",
		start in 0usize..40,
		span in 0usize..10,
		insert in "[a-z]{0,8}",
		a in 0usize..40,
		b in 0usize..40,
	) {
		let doc = Rope::from(text.as_str());
		let len = doc.len_chars();
		let tx = Transaction::change(doc.slice(..), vec![replace(start.min(len), (start + span).min(len), &insert)]);
		let (a, b) = (a.min(len).min(b.min(len)), a.min(len).max(b.min(len)));
		prop_assert!(tx.changes().map_pos(a, Bias::Left) <= tx.changes().map_pos(b, Bias::Left));
		prop_assert!(tx.changes().map_pos(a, Bias::Right) <= tx.changes().map_pos(b, Bias::Right));
	}
}
