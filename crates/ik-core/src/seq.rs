//! The [`Seq`] trait and in-memory sources.
//!
//! A drive is nested function calls: the terminal operation supplies the
//! innermost consumer, every combinator layer wraps it in its own closure and
//! hands that closure to the sequence it wraps. Nothing is pulled ahead of the
//! element currently being presented.

use std::cmp::Ordering;
use std::hash::Hash;

use crate::buffered::{Append, Chain, Chunks, ChunksRef, Prepend, Sorted, SortedBy, Tee};
use crate::error::Result;
use crate::ordering::{self, Monotonicity, Unique};
use crate::pair::Paired;
use crate::search;
use crate::stateless::{Enumerate, Filter, Map, Skip, Take, TakeUntil};

/// A source of elements that can drive a consumer.
///
/// Invariants every implementation upholds:
/// - elements are presented in source order;
/// - after the consumer returns `false`, it is not called again;
/// - the source is not read before `drive` is called.
pub trait Seq: Sized {
    type Item;

    /// Drive `sink` over the elements until they run out or `sink` returns `false`.
    fn drive<F>(self, sink: F)
    where
        F: FnMut(Self::Item) -> bool;

    // ----- stateless combinators -----

    /// Transform every element with `f`.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item) -> U,
    {
        Map::new(self, f)
    }

    /// Forward only the elements for which `pred` holds.
    fn filter<P>(self, pred: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, pred)
    }

    /// Forward the first `n` elements.
    ///
    /// The element after the `n`-th is still pulled from the source to decide
    /// to stop; it is never forwarded.
    fn take(self, n: usize) -> Take<Self> {
        Take::new(self, n)
    }

    /// Swallow the first `n` elements and forward the rest.
    fn skip(self, n: usize) -> Skip<Self> {
        Skip::new(self, n)
    }

    /// Forward elements up to and including the first one matching `pred`.
    fn take_until<P>(self, pred: P) -> TakeUntil<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        TakeUntil::new(self, pred)
    }

    /// Pair every element with its zero-based position.
    fn enumerate(self) -> Enumerate<Self> {
        Enumerate::new(self)
    }

    // ----- buffering combinators -----

    /// Group elements into owned chunks of `size`; the last chunk may be shorter.
    ///
    /// # Panics
    /// If `size` is zero.
    fn chunks(self, size: usize) -> Chunks<Self> {
        Chunks::new(self, size)
    }

    /// Like [`Seq::chunks`], but reports a zero `size` as an error.
    fn try_chunks(self, size: usize) -> Result<Chunks<Self>> {
        Chunks::try_new(self, size)
    }

    /// Group elements into chunks of `size` lent out of one reused buffer.
    ///
    /// # Panics
    /// If `size` is zero.
    fn chunks_ref(self, size: usize) -> ChunksRef<Self> {
        ChunksRef::new(self, size)
    }

    /// Like [`Seq::chunks_ref`], but reports a zero `size` as an error.
    fn try_chunks_ref(self, size: usize) -> Result<ChunksRef<Self>> {
        ChunksRef::try_new(self, size)
    }

    /// Yield `value` before the elements of `self`.
    fn prepend(self, value: Self::Item) -> Prepend<Self> {
        Prepend::new(value, self)
    }

    /// Yield `value` after the elements of `self`, unless the drive stopped early.
    fn append(self, value: Self::Item) -> Append<Self> {
        Append::new(value, self)
    }

    /// Yield the elements of `self`, then those of `other`, unless the drive stopped early.
    fn chain<S>(self, other: S) -> Chain<Self, S>
    where
        S: Seq<Item = Self::Item>,
    {
        Chain::new(self, other)
    }

    /// Drive `side` alongside the downstream consumer.
    ///
    /// The source keeps going until *both* consumers have asked to stop.
    fn tee<C>(self, side: C) -> Tee<Self, C>
    where
        C: FnMut(&Self::Item) -> bool,
    {
        Tee::new(self, side)
    }

    /// Materialize and sort by the natural order on first drive.
    fn sorted(self) -> Sorted<Self>
    where
        Self::Item: Ord,
    {
        Sorted::new(self)
    }

    /// Materialize and sort by `cmp` on first drive. The sort is stable.
    fn sorted_by<F>(self, cmp: F) -> SortedBy<Self, F>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        SortedBy::new(self, cmp)
    }

    // ----- ordering and membership -----

    /// Forward each distinct element once, in first-occurrence order.
    fn unique(self) -> Unique<Self>
    where
        Self::Item: Eq + Hash + Clone,
    {
        Unique::new(self)
    }

    /// Classify the sequence under its natural order.
    fn is_sorted(self) -> Monotonicity
    where
        Self::Item: Ord,
    {
        ordering::classify(self, |a, b| a.cmp(b))
    }

    /// Classify the sequence as ascending, descending or unsorted under `cmp`.
    fn is_sorted_by<F>(self, cmp: F) -> Monotonicity
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        ordering::classify(self, cmp)
    }

    // ----- search folds -----

    /// First element matching `pred`; stops the source on the match.
    fn first<P>(self, pred: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        search::first(self, pred)
    }

    /// Smallest element; ties keep the earliest.
    fn min(self) -> Option<Self::Item>
    where
        Self::Item: PartialOrd,
    {
        search::min_by(self, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Largest element; ties keep the earliest.
    fn max(self) -> Option<Self::Item>
    where
        Self::Item: PartialOrd,
    {
        search::max_by(self, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    fn min_by<F>(self, cmp: F) -> Option<Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        search::min_by(self, cmp)
    }

    fn max_by<F>(self, cmp: F) -> Option<Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        search::max_by(self, cmp)
    }

    // ----- pairs -----

    /// Turn a sequence of tuples into a sequence of [`Pair`](crate::Pair)s.
    fn paired<K, V>(self) -> Paired<Self>
    where
        Self: Seq<Item = (K, V)>,
    {
        Paired::new(self)
    }

    // ----- terminal operations -----

    /// Visit every element.
    fn for_each<F>(self, mut f: F)
    where
        F: FnMut(Self::Item),
    {
        self.drive(|item| {
            f(item);
            true
        });
    }

    /// Fold every element into an accumulator, starting from `init`.
    ///
    /// `f` receives the element first and the accumulator second.
    fn reduce<U, F>(self, init: U, mut f: F) -> U
    where
        F: FnMut(Self::Item, U) -> U,
    {
        // `acc` is `None` only while `f` runs. A panic in `f` unwinds out of
        // `drive`, so the `expect` is reached only with `acc` restored.
        let mut acc = Some(init);
        self.drive(|item| {
            acc = acc.take().map(|a| f(item, a));
            true
        });
        acc.expect("accumulator is restored after every element")
    }

    /// Collect every element into a `Vec`, in order.
    fn collect(self) -> Vec<Self::Item> {
        self.reduce(Vec::new(), |item, mut out| {
            out.push(item);
            out
        })
    }

    /// Extend `target` with every element.
    fn collect_into<C>(self, target: &mut C)
    where
        C: Extend<Self::Item>,
    {
        self.for_each(|item| target.extend(Some(item)));
    }

    fn count(self) -> usize {
        self.reduce(0, |_, n| n + 1)
    }
}

/// Sequence over anything iterable.
///
/// Restartable whenever the wrapped iterable is `Clone`.
#[derive(Debug, Clone)]
pub struct Values<I> {
    iter: I,
}

/// Sequence over the items of `iter`.
pub fn values<I: IntoIterator>(iter: I) -> Values<I> {
    Values { iter }
}

/// Sequence of references into `slice`, for elements too large to copy.
pub fn slice_ref<T>(slice: &[T]) -> Values<std::slice::Iter<'_, T>> {
    values(slice.iter())
}

/// Sequence of exactly one element.
pub fn once<T>(value: T) -> Values<Option<T>> {
    values(Some(value))
}

/// Sequence with no elements.
pub fn empty<T>() -> Values<Option<T>> {
    values(None)
}

impl<I: IntoIterator> Seq for Values<I> {
    type Item = I::Item;

    fn drive<F>(self, mut sink: F)
    where
        F: FnMut(Self::Item) -> bool,
    {
        for item in self.iter {
            if !sink(item) {
                return;
            }
        }
    }
}

/// Generator source: calls a closure until it returns `None`.
#[derive(Clone)]
pub struct FromFn<F>(F);

pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    FromFn(f)
}

impl<T, F> Seq for FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(T) -> bool,
    {
        let FromFn(mut next) = self;
        while let Some(item) = next() {
            if !sink(item) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn values_drive_in_order() {
        assert_eq!(values(vec![3, 1, 2]).collect(), vec![3, 1, 2]);
    }

    #[test]
    fn values_stop_after_false() {
        let mut seen = Vec::new();
        values(1..=10).drive(|x| {
            seen.push(x);
            x < 3
        });
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn values_over_vec_are_restartable() {
        let s = values(vec![1, 2, 3]);
        assert_eq!(s.clone().collect(), vec![1, 2, 3]);
        assert_eq!(s.collect(), vec![1, 2, 3]);
    }

    #[test]
    fn slice_ref_yields_references() {
        let data = vec![String::from("a"), String::from("b")];
        let refs = slice_ref(&data).collect();
        assert!(std::ptr::eq(refs[0], &data[0]));
        assert!(std::ptr::eq(refs[1], &data[1]));
    }

    #[test]
    fn from_fn_is_lazy_until_driven() {
        let pulls = Cell::new(0);
        let s = from_fn(|| {
            pulls.set(pulls.get() + 1);
            (pulls.get() <= 3).then(|| pulls.get())
        })
        .map(|x| x * 10)
        .filter(|x| *x > 0);
        assert_eq!(pulls.get(), 0);
        assert_eq!(s.collect(), vec![10, 20, 30]);
        // three items plus the exhausting call
        assert_eq!(pulls.get(), 4);
    }

    #[test]
    fn reduce_passes_element_then_accumulator() {
        let joined = values(["a", "b", "c"]).reduce(String::new(), |item, mut acc| {
            acc.push_str(item);
            acc
        });
        assert_eq!(joined, "abc");
    }

    #[test]
    fn reduce_panic_in_fold_surfaces_unchanged() {
        let result = std::panic::catch_unwind(|| {
            values(1..=3).reduce(0, |x, acc| {
                if x == 2 {
                    panic!("fold failed at {x}");
                }
                acc + x
            })
        });
        let payload = result.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("fold failed at 2")
        );
    }

    #[test]
    fn reduce_of_empty_returns_init() {
        assert_eq!(empty::<i32>().reduce(7, |x, acc| x + acc), 7);
    }

    #[test]
    fn count_and_collect_into() {
        assert_eq!(values(0..5).count(), 5);
        let mut out = vec![-1];
        values(0..3).collect_into(&mut out);
        assert_eq!(out, vec![-1, 0, 1, 2]);
    }

    #[test]
    fn once_and_empty() {
        assert_eq!(once(9).collect(), vec![9]);
        assert!(empty::<u8>().collect().is_empty());
    }
}
