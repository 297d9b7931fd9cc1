//! Combinator pipelines through the public facade.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::counted;
use ik::prelude::*;
use ik::Error as CoreError;

#[test]
fn filter_map_take_pulls_only_what_it_needs() {
    let pulls = Rc::new(Cell::new(0));
    let out = counted(100, &pulls)
        .filter(|x| x % 3 == 0)
        .map(|x| x * 2)
        .take(3)
        .collect();
    assert_eq!(out, vec![0, 6, 12]);
    // 0,3,6 forwarded; 9 pulled to decide to stop
    assert_eq!(pulls.get(), 10);
}

#[test]
fn building_a_pipeline_reads_nothing() {
    let pulls = Rc::new(Cell::new(0));
    let pipeline = counted(10, &pulls)
        .skip(2)
        .enumerate()
        .chunks(2)
        .append(Vec::new());
    assert_eq!(pulls.get(), 0);
    drop(pipeline);
    assert_eq!(pulls.get(), 0);
}

#[test]
fn skip_then_take_until() {
    let out = values(1..=20).skip(4).take_until(|x| *x == 8).collect();
    assert_eq!(out, vec![5, 6, 7, 8]);
}

#[test]
fn enumerate_chunks_of_pairs() {
    let chunks = values(["a", "b", "c", "d", "e"]).enumerate().chunks(2).collect();
    assert_eq!(
        chunks,
        vec![
            vec![(0, "a"), (1, "b")],
            vec![(2, "c"), (3, "d")],
            vec![(4, "e")],
        ]
    );
}

#[test]
fn chunks_ref_reuses_one_buffer() {
    let mut sums = Vec::new();
    values(1..=7).chunks_ref(3).for_each(|chunk| sums.push(chunk.iter().sum::<i32>()));
    assert_eq!(sums, vec![6, 15, 7]);
}

#[test]
fn zero_chunk_size_is_a_precondition_error() {
    assert!(matches!(values(0..3).try_chunks(0), Err(CoreError::Precondition(_))));
    assert!(matches!(values(0..3).try_chunks_ref(0), Err(CoreError::Precondition(_))));
}

#[test]
#[should_panic]
fn zero_chunk_size_panics() {
    let _ = values(0..3).chunks(0);
}

#[test]
fn prepend_append_and_chain() {
    let out = prepend(0, values(1..=2))
        .chain(values(3..=4))
        .append(5)
        .collect();
    assert_eq!(out, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn stop_on_prepended_value_never_drives_source() {
    let pulls = Rc::new(Cell::new(0));
    let first = append(99, counted(5, &pulls)).prepend(42).first(|_| true);
    assert_eq!(first, Some(42));
    assert_eq!(pulls.get(), 0);
}

#[test]
fn early_stop_suppresses_append_and_chain() {
    let mut seen = Vec::new();
    values(1..=3).chain(values(4..=6)).append(7).drive(|x| {
        seen.push(x);
        x < 2
    });
    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn tee_keeps_source_alive_for_the_hungrier_consumer() {
    let pulls = Rc::new(Cell::new(0));
    let mut side_seen = Vec::new();
    let main = counted(10, &pulls)
        .tee(|x| {
            side_seen.push(*x);
            side_seen.len() < 6
        })
        .take(2)
        .collect();
    assert_eq!(main, vec![0, 1]);
    assert_eq!(side_seen, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(pulls.get(), 6);
}

#[test]
fn sorted_unique_pipeline() {
    let words = values(vec!["pear", "apple", "fig", "apple", "pear", "kiwi"]);
    let out = words.unique().sorted().collect();
    assert_eq!(out, vec!["apple", "fig", "kiwi", "pear"]);
}

#[test]
fn sorted_by_is_stable() {
    let people = values(vec![("bo", 3), ("al", 1), ("cy", 3), ("di", 1)]);
    let out = people.sorted_by(|a, b| a.1.cmp(&b.1)).collect();
    assert_eq!(out, vec![("al", 1), ("di", 1), ("bo", 3), ("cy", 3)]);
}

#[test]
fn monotonicity_classification() {
    assert_eq!(values([1, 2, 5]).is_sorted(), Monotonicity::Ascending);
    assert_eq!(values([9, 4, 1]).is_sorted(), Monotonicity::Descending);
    // every step must repeat the first step's sign
    assert_eq!(values([1, 2, 2, 5]).is_sorted(), Monotonicity::Unsorted);
    assert_eq!(values([1, 3, 2]).is_sorted(), Monotonicity::Unsorted);
    assert_eq!(empty::<i32>().is_sorted(), Monotonicity::Ascending);
    assert_eq!(once(7).is_sorted(), Monotonicity::Ascending);
    assert_eq!(
        values(["bb", "a", "ccc"]).is_sorted_by(|a, b| a.len().cmp(&b.len())),
        Monotonicity::Unsorted
    );
}

#[test]
fn search_folds() {
    assert_eq!(values([4, 1, 7, 1]).min(), Some(1));
    assert_eq!(values([4, 1, 7, 7]).max(), Some(7));
    assert_eq!(empty::<i32>().max(), None);
    let longest = values(["ab", "cd", "e"]).max_by(|a, b| a.len().cmp(&b.len()));
    assert_eq!(longest, Some("ab"));
    assert_eq!(values(1..).first(|x| x * x > 50), Some(8));
}

#[test]
fn pairs_from_tuples() {
    let pairs = values(vec![("x", 1), ("y", 2)]).paired().collect();
    assert_eq!(pairs, vec![Pair::new("x", 1), Pair::new("y", 2)]);
    assert_eq!(pairs[1].into_tuple(), ("y", 2));
}

#[test]
fn reduce_and_count() {
    let total = values(1..=4).reduce(0, |x, acc| acc + x);
    assert_eq!(total, 10);
    assert_eq!(values(1..=4).filter(|x| x % 2 == 1).count(), 2);
}
