//! Combinators that hold elements back: chunking, prepend/append/chain, tee
//! and the materializing sorts.
//!
//! Buffers are allocated at the start of a drive and dropped when it ends.
//! `Sorted`/`SortedBy` are the only ones that read their whole source before
//! producing anything; even they wait for the first drive to do so.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::seq::{values, Seq};

fn check_chunk_size(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(Error::Precondition("chunk size must be at least 1".into()));
    }
    Ok(size)
}

/// Groups elements into owned `Vec`s of `size`.
///
/// Every chunk is a fresh allocation, so downstream may keep it. A drive that
/// reaches the end of the source with a partial chunk yields it as one final,
/// shorter `Vec`. A drive stopped by downstream yields nothing more.
#[derive(Clone)]
pub struct Chunks<S> {
    seq: S,
    size: usize,
}

impl<S> Chunks<S> {
    pub(crate) fn new(seq: S, size: usize) -> Self {
        assert!(size >= 1, "chunk size must be at least 1");
        Self { seq, size }
    }

    pub(crate) fn try_new(seq: S, size: usize) -> Result<Self> {
        let size = check_chunk_size(size)?;
        Ok(Self { seq, size })
    }
}

impl<S: Seq> Seq for Chunks<S> {
    type Item = Vec<S::Item>;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(Vec<S::Item>) -> bool,
    {
        let Chunks { seq, size } = self;
        let mut buf = Vec::with_capacity(size);
        let mut stopped = false;
        seq.drive(|item| {
            buf.push(item);
            if buf.len() < size {
                return true;
            }
            let full = std::mem::replace(&mut buf, Vec::with_capacity(size));
            #[cfg(feature = "tracing")]
            tracing::trace!(size, "chunk full");
            if sink(full) {
                true
            } else {
                stopped = true;
                false
            }
        });
        if !stopped && !buf.is_empty() {
            sink(buf);
        }
    }
}

/// Groups elements into chunks lent out of a single reused buffer.
///
/// Downstream receives `&[T]` valid only for the duration of its call; the
/// buffer is cleared and refilled for the next chunk, so anything that must
/// outlive the call has to be copied out. The final partial chunk is a
/// shorter view of the same buffer.
///
/// Not a [`Seq`] itself since the chunks borrow from drive-local storage.
pub struct ChunksRef<S> {
    seq: S,
    size: usize,
}

impl<S> ChunksRef<S> {
    pub(crate) fn new(seq: S, size: usize) -> Self {
        assert!(size >= 1, "chunk size must be at least 1");
        Self { seq, size }
    }

    pub(crate) fn try_new(seq: S, size: usize) -> Result<Self> {
        let size = check_chunk_size(size)?;
        Ok(Self { seq, size })
    }
}

impl<S: Seq> ChunksRef<S> {
    /// Drive `sink` over the chunks until they run out or it returns `false`.
    pub fn drive<G>(self, mut sink: G)
    where
        G: FnMut(&[S::Item]) -> bool,
    {
        let ChunksRef { seq, size } = self;
        let mut buf = Vec::with_capacity(size);
        let mut stopped = false;
        seq.drive(|item| {
            buf.push(item);
            if buf.len() < size {
                return true;
            }
            let keep = sink(buf.as_slice());
            buf.clear();
            stopped = !keep;
            keep
        });
        if !stopped && !buf.is_empty() {
            sink(buf.as_slice());
        }
    }

    /// Visit every chunk.
    pub fn for_each<G>(self, mut f: G)
    where
        G: FnMut(&[S::Item]),
    {
        self.drive(|chunk| {
            f(chunk);
            true
        });
    }
}

/// Yields one value before the wrapped sequence.
#[derive(Clone)]
pub struct Prepend<S: Seq> {
    value: S::Item,
    seq: S,
}

impl<S: Seq> Prepend<S> {
    pub(crate) fn new(value: S::Item, seq: S) -> Self {
        Self { value, seq }
    }
}

impl<S: Seq> Seq for Prepend<S> {
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let Prepend { value, seq } = self;
        if !sink(value) {
            return;
        }
        seq.drive(sink);
    }
}

/// Yields one value after the wrapped sequence, only if it ran to exhaustion.
#[derive(Clone)]
pub struct Append<S: Seq> {
    value: S::Item,
    seq: S,
}

impl<S: Seq> Append<S> {
    pub(crate) fn new(value: S::Item, seq: S) -> Self {
        Self { value, seq }
    }
}

impl<S: Seq> Seq for Append<S> {
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let Append { value, seq } = self;
        let mut keep = true;
        seq.drive(|item| {
            keep = sink(item);
            keep
        });
        if keep {
            sink(value);
        }
    }
}

/// Yields the first sequence, then the second if the first ran to exhaustion.
#[derive(Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Seq for Chain<A, B>
where
    A: Seq,
    B: Seq<Item = A::Item>,
{
    type Item = A::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(A::Item) -> bool,
    {
        let Chain { first, second } = self;
        let mut keep = true;
        first.drive(|item| {
            keep = sink(item);
            keep
        });
        if keep {
            second.drive(sink);
        }
    }
}

/// Drives one source into two consumers: a side consumer fixed at
/// construction and the downstream consumer of the drive.
///
/// Each consumer has its own "wants more" flag. A consumer whose flag went
/// false is never called again. The source is asked to stop only once both
/// flags are false.
#[derive(Clone)]
pub struct Tee<S, C> {
    seq: S,
    side: C,
}

impl<S, C> Tee<S, C> {
    pub(crate) fn new(seq: S, side: C) -> Self {
        Self { seq, side }
    }
}

impl<S, C> Seq for Tee<S, C>
where
    S: Seq,
    C: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let Tee { seq, mut side } = self;
        let mut side_wants = true;
        let mut sink_wants = true;
        seq.drive(move |item| {
            if side_wants {
                side_wants = side(&item);
            }
            if sink_wants {
                sink_wants = sink(item);
            }
            side_wants || sink_wants
        });
    }
}

/// Materializes the source and re-exposes it in natural order.
#[derive(Clone)]
pub struct Sorted<S> {
    seq: S,
}

impl<S> Sorted<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq }
    }
}

impl<S> Seq for Sorted<S>
where
    S: Seq,
    S::Item: Ord,
{
    type Item = S::Item;

    fn drive<G>(self, sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        SortedBy::new(self.seq, |a: &S::Item, b: &S::Item| a.cmp(b)).drive(sink);
    }
}

/// Materializes the source and re-exposes it ordered by a comparator.
///
/// The sort is stable: elements comparing equal keep their source order.
#[derive(Clone)]
pub struct SortedBy<S, F> {
    seq: S,
    cmp: F,
}

impl<S, F> SortedBy<S, F> {
    pub(crate) fn new(seq: S, cmp: F) -> Self {
        Self { seq, cmp }
    }
}

impl<S, F> Seq for SortedBy<S, F>
where
    S: Seq,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    type Item = S::Item;

    fn drive<G>(self, sink: G)
    where
        G: FnMut(S::Item) -> bool,
    {
        let SortedBy { seq, mut cmp } = self;
        let mut items = seq.collect();
        items.sort_by(|a, b| cmp(a, b));
        #[cfg(feature = "tracing")]
        tracing::trace!(len = items.len(), "materialized sequence for sort");
        values(items).drive(sink);
    }
}
