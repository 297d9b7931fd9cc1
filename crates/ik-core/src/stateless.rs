//! One-element-at-a-time combinators: map, filter, take, skip, take-until, enumerate.
//!
//! None of these buffer. Each keeps at most a counter, created fresh at the
//! start of every drive.

use crate::seq::Seq;

/// Transforms each element; the downstream answer is forwarded unchanged.
#[derive(Clone)]
pub struct Map<S, F> {
    seq: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(seq: S, f: F) -> Self {
        Self { seq, f }
    }
}

impl<S, U, F> Seq for Map<S, F>
where
    S: Seq,
    F: FnMut(S::Item) -> U,
{
    type Item = U;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(U) -> bool,
    {
        let Map { seq, mut f } = self;
        seq.drive(move |item| sink(f(item)));
    }
}

/// Forwards only matching elements.
///
/// A rejected element is answered with "continue": downstream was never asked,
/// so filtering alone never stops a drive.
#[derive(Clone)]
pub struct Filter<S, P> {
    seq: S,
    pred: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(seq: S, pred: P) -> Self {
        Self { seq, pred }
    }
}

impl<S, P> Seq for Filter<S, P>
where
    S: Seq,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let Filter { seq, mut pred } = self;
        seq.drive(move |item| if pred(&item) { sink(item) } else { true });
    }
}

/// Forwards the first `n` elements.
#[derive(Clone)]
pub struct Take<S> {
    seq: S,
    n: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(seq: S, n: usize) -> Self {
        Self { seq, n }
    }
}

impl<S: Seq> Seq for Take<S> {
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let Take { seq, n } = self;
        let mut seen = 0usize;
        // The (n+1)-th element is observed to decide to stop, never forwarded.
        seq.drive(move |item| {
            seen = seen.saturating_add(1);
            if seen <= n {
                sink(item)
            } else {
                false
            }
        });
    }
}

/// Swallows the first `n` elements.
#[derive(Clone)]
pub struct Skip<S> {
    seq: S,
    n: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(seq: S, n: usize) -> Self {
        Self { seq, n }
    }
}

impl<S: Seq> Seq for Skip<S> {
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let Skip { seq, n } = self;
        let mut skipped = 0usize;
        seq.drive(move |item| {
            if skipped < n {
                skipped += 1;
                true
            } else {
                sink(item)
            }
        });
    }
}

/// Forwards elements until `pred` matches; the matching element is forwarded
/// too, and then the drive stops whatever downstream answered for it.
#[derive(Clone)]
pub struct TakeUntil<S, P> {
    seq: S,
    pred: P,
}

impl<S, P> TakeUntil<S, P> {
    pub(crate) fn new(seq: S, pred: P) -> Self {
        Self { seq, pred }
    }
}

impl<S, P> Seq for TakeUntil<S, P>
where
    S: Seq,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let TakeUntil { seq, mut pred } = self;
        seq.drive(move |item| {
            if pred(&item) {
                sink(item);
                false
            } else {
                sink(item)
            }
        });
    }
}

/// Pairs each element with its position among the elements delivered downstream.
#[derive(Clone)]
pub struct Enumerate<S> {
    seq: S,
}

impl<S> Enumerate<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq }
    }
}

impl<S: Seq> Seq for Enumerate<S> {
    type Item = (usize, S::Item);

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut((usize, S::Item)) -> bool,
    {
        let mut idx = 0usize;
        self.seq.drive(move |item| {
            let keep = sink((idx, item));
            idx += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::seq::{from_fn, values, Seq};

    /// Source over `0..len` that counts how many elements it handed out.
    fn counted(len: usize, pulled: &Cell<usize>) -> impl Seq<Item = usize> + '_ {
        let mut next = 0;
        from_fn(move || {
            if next == len {
                return None;
            }
            next += 1;
            pulled.set(pulled.get() + 1);
            Some(next - 1)
        })
    }

    #[test]
    fn map_changes_type() {
        let out = values(vec![1, 2, 3]).map(|x| format!("#{x}")).collect();
        assert_eq!(out, vec!["#1", "#2", "#3"]);
    }

    #[test]
    fn map_forwards_downstream_stop() {
        let pulled = Cell::new(0);
        let mut got = Vec::new();
        counted(10, &pulled).map(|x| x * 2).drive(|x| {
            got.push(x);
            got.len() < 2
        });
        assert_eq!(got, vec![0, 2]);
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn filter_keeps_order() {
        let out = values(1..=10).filter(|x| x % 3 == 0).collect();
        assert_eq!(out, vec![3, 6, 9]);
    }

    #[test]
    fn filter_rejections_never_stop_the_source() {
        let pulled = Cell::new(0);
        // downstream would stop on anything, but nothing passes the filter
        counted(6, &pulled).filter(|_| false).drive(|_| false);
        assert_eq!(pulled.get(), 6);
    }

    #[test]
    fn take_observes_one_extra_element() {
        let pulled = Cell::new(0);
        let out = counted(10, &pulled).take(3).collect();
        assert_eq!(out, vec![0, 1, 2]);
        assert_eq!(pulled.get(), 4);
    }

    #[test]
    fn take_zero_yields_nothing() {
        assert!(values(1..5).take(0).collect().is_empty());
        assert!(values(Vec::<i32>::new()).take(0).collect().is_empty());
    }

    #[test]
    fn take_more_than_available() {
        assert_eq!(values(1..4).take(10).collect(), vec![1, 2, 3]);
    }

    #[test]
    fn skip_then_forward_rest() {
        assert_eq!(values(0..6).skip(4).collect(), vec![4, 5]);
        assert!(values(0..3).skip(5).collect().is_empty());
        assert_eq!(values(0..3).skip(0).collect(), vec![0, 1, 2]);
    }

    #[test]
    fn skip_forwards_downstream_stop() {
        let pulled = Cell::new(0);
        let out = counted(10, &pulled).skip(2).take(2).collect();
        assert_eq!(out, vec![2, 3]);
        assert_eq!(pulled.get(), 5);
    }

    #[test]
    fn take_until_delivers_the_triggering_element() {
        let out = values(vec![1, 3, 4, 5, 6]).take_until(|x| x % 2 == 0).collect();
        assert_eq!(out, vec![1, 3, 4]);
    }

    #[test]
    fn take_until_stops_even_if_downstream_wants_more() {
        let pulled = Cell::new(0);
        let mut got = Vec::new();
        counted(10, &pulled).take_until(|x| *x == 2).drive(|x| {
            got.push(x);
            true
        });
        assert_eq!(got, vec![0, 1, 2]);
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn take_until_without_match_drains() {
        assert_eq!(values(0..4).take_until(|_| false).collect(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn enumerate_counts_from_zero() {
        let out = values(["a", "b", "c"]).enumerate().collect();
        assert_eq!(out, vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn enumerate_index_survives_stop_answer() {
        let mut idxs = Vec::new();
        values(["x", "y", "z"]).enumerate().drive(|(i, _)| {
            idxs.push(i);
            i < 1
        });
        assert_eq!(idxs, vec![0, 1]);
    }
}
