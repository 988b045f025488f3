//! Tests for standard rotation

use super::*;
use crate::qaqc::rotation::StandardRotationCycler;

#[test]
fn test_first_pass_follows_sort_order() {
    let mut cycler = StandardRotationCycler::new(standards_with_repeat());

    let first_pass: Vec<String> = (0..4).filter_map(|_| cycler.next_standard()).collect();
    assert_eq!(first_pass, vec!["STD-A", "STD-B", "STD-C", "STD-D"]);
    assert!(cycler.completed_first_cycle());
}

#[test]
fn test_loops_over_repeat_tail() {
    let cycler = StandardRotationCycler::new(standards_with_repeat());

    let handed_out: Vec<String> = cycler.take(10).collect();
    assert_eq!(
        handed_out,
        vec![
            "STD-A", "STD-B", "STD-C", "STD-D", "STD-C", "STD-D", "STD-C", "STD-D", "STD-C",
            "STD-D"
        ]
    );
}

#[test]
fn test_without_repeat_start_loops_whole_list() {
    let cycler = StandardRotationCycler::new(vec![
        StandardSequenceEntry::new("X", 2),
        StandardSequenceEntry::new("W", 1),
        StandardSequenceEntry::new("Y", 3),
    ]);
    assert_eq!(cycler.repeat_start(), None);

    let handed_out: Vec<String> = cycler.take(7).collect();
    assert_eq!(handed_out, vec!["W", "X", "Y", "W", "X", "Y", "W"]);
}

#[test]
fn test_repeat_start_on_first_entry() {
    let cycler = StandardRotationCycler::new(vec![
        StandardSequenceEntry::new("A", 1).repeat_start(),
        StandardSequenceEntry::new("B", 2),
    ]);

    let handed_out: Vec<String> = cycler.take(5).collect();
    assert_eq!(handed_out, vec!["A", "B", "A", "B", "A"]);
}

#[test]
fn test_repeat_start_on_last_entry() {
    let cycler = StandardRotationCycler::new(vec![
        StandardSequenceEntry::new("A", 1),
        StandardSequenceEntry::new("B", 2),
        StandardSequenceEntry::new("C", 3).repeat_start(),
    ]);

    let handed_out: Vec<String> = cycler.take(6).collect();
    assert_eq!(handed_out, vec!["A", "B", "C", "C", "C", "C"]);
}

#[test]
fn test_empty_rotation_returns_none() {
    let mut cycler = StandardRotationCycler::new(Vec::new());
    assert!(cycler.is_empty());
    assert_eq!(cycler.next_standard(), None);
    assert_eq!(cycler.next_standard(), None);
}

#[test]
fn test_reset_restarts_full_list() {
    let mut cycler = StandardRotationCycler::new(standards_with_repeat());
    for _ in 0..6 {
        cycler.next_standard();
    }

    cycler.reset();
    assert!(!cycler.completed_first_cycle());
    assert_eq!(cycler.next_standard().as_deref(), Some("STD-A"));
    assert_eq!(cycler.len(), 4);
    assert_eq!(cycler.repeat_start(), Some(2));
}

#[test]
fn test_rotation_cycle_law() {
    // k entries with repeat start r: k + m calls give the full list once,
    // then m further entries cycling over indices r..k
    let ids = ["A", "B", "C", "D", "E"];
    for r in 0..ids.len() {
        let entries: Vec<StandardSequenceEntry> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let entry = StandardSequenceEntry::new(*id, i as i32);
                if i == r { entry.repeat_start() } else { entry }
            })
            .collect();
        let k = ids.len();

        for m in 0..12 {
            let handed_out: Vec<String> =
                StandardRotationCycler::new(entries.clone()).take(k + m).collect();
            assert_eq!(&handed_out[..k], &ids[..]);
            for (j, id) in handed_out[k..].iter().enumerate() {
                assert_eq!(id, ids[r + j % (k - r)], "r={} m={}", r, m);
            }
        }
    }
}
