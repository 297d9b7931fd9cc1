//! Search folds: first match, minimum, maximum.
//!
//! "Nothing found" is `None`; an empty source is never an error.

use std::cmp::Ordering;

use crate::seq::Seq;

pub(crate) fn first<S, P>(seq: S, mut pred: P) -> Option<S::Item>
where
    S: Seq,
    P: FnMut(&S::Item) -> bool,
{
    let mut found = None;
    seq.drive(|item| {
        if pred(&item) {
            found = Some(item);
            return false;
        }
        true
    });
    found
}

// Replacement is strict in both folds, so the earliest of equal elements wins.

pub(crate) fn min_by<S, F>(seq: S, mut cmp: F) -> Option<S::Item>
where
    S: Seq,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    let mut best: Option<S::Item> = None;
    seq.drive(|item| {
        if best.as_ref().map_or(true, |b| cmp(&item, b) == Ordering::Less) {
            best = Some(item);
        }
        true
    });
    best
}

pub(crate) fn max_by<S, F>(seq: S, mut cmp: F) -> Option<S::Item>
where
    S: Seq,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    let mut best: Option<S::Item> = None;
    seq.drive(|item| {
        if best.as_ref().map_or(true, |b| cmp(&item, b) == Ordering::Greater) {
            best = Some(item);
        }
        true
    });
    best
}
