//! Duplicate elimination and monotonicity classification.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::seq::Seq;

/// Forwards each distinct element the first time it is seen.
///
/// The seen-set lives for one drive and grows with every distinct element.
/// Duplicates are answered with "continue" without asking downstream.
#[derive(Clone)]
pub struct Unique<S> {
    seq: S,
}

impl<S> Unique<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq }
    }
}

impl<S> Seq for Unique<S>
where
    S: Seq,
    S::Item: Eq + Hash + Clone,
{
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let mut seen = HashSet::new();
        self.seq.drive(move |item| {
            if seen.contains(&item) {
                return true;
            }
            seen.insert(item.clone());
            sink(item)
        });
    }
}

/// Verdict of a one-pass order check.
///
/// The discriminants are the numeric verdicts: `1` ascending, `-1`
/// descending, `0` not monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Monotonicity {
    Descending = -1,
    Unsorted = 0,
    Ascending = 1,
}

impl Monotonicity {
    pub fn sign(self) -> i32 {
        self as i32
    }

    pub fn is_sorted(self) -> bool {
        self != Monotonicity::Unsorted
    }
}

impl From<Ordering> for Monotonicity {
    /// Maps the sign of `cmp(next, previous)`.
    fn from(sign: Ordering) -> Self {
        match sign {
            Ordering::Greater => Monotonicity::Ascending,
            Ordering::Equal => Monotonicity::Unsorted,
            Ordering::Less => Monotonicity::Descending,
        }
    }
}

/// One-pass classification with early exit on the first contradiction.
///
/// The first comparison (of the second element against the first) fixes the
/// sign; every later comparison must repeat it exactly. An `Equal` first
/// comparison is fixed like any other sign, so equal neighbours followed by a
/// strict step classify as unsorted, and an all-equal run reports the fixed
/// `Equal` sign, i.e. [`Monotonicity::Unsorted`]. Fewer than two elements
/// classify as ascending.
pub(crate) fn classify<S, F>(seq: S, mut cmp: F) -> Monotonicity
where
    S: Seq,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    let mut prev: Option<S::Item> = None;
    let mut sign: Option<Ordering> = None;
    let mut contradicted = false;

    seq.drive(|item| {
        let Some(last) = prev.take() else {
            prev = Some(item);
            return true;
        };
        let step = cmp(&item, &last);
        match sign {
            None => sign = Some(step),
            Some(fixed) if fixed != step => {
                contradicted = true;
                return false;
            }
            Some(_) => {}
        }
        prev = Some(item);
        true
    });

    if contradicted {
        return Monotonicity::Unsorted;
    }
    sign.map_or(Monotonicity::Ascending, Monotonicity::from)
}
