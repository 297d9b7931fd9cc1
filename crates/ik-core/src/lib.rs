#![forbid(unsafe_code)]
//! ik-core: push-based lazy sequences and their combinators.
//!
//! A [`Seq`] is a value that, given a consumer, drives that consumer over its
//! elements in order. The consumer answers every element with a `bool`:
//! `true` to keep going, `false` to stop. Once a consumer has answered `false`
//! it is never called again.
//!
//! Design intent:
//! - Building a combinator never touches the source. Only driving does.
//! - Driving consumes the sequence. Sequences over in-memory storage are
//!   `Clone`, which is how they are driven more than once.
//! - Everything here is synchronous and single-threaded. A panic raised by a
//!   caller-supplied closure unwinds out of the drive untouched.
//! - No IO lives in this crate. Adapters over external resources (CSV, JSON,
//!   relational cursors, channels) are in `ik-io`.

pub mod buffered;
pub mod error;
pub mod ordering;
pub mod pair;
pub mod prelude;
pub mod search;
pub mod seq;
pub mod stateless;

pub use buffered::{Append, Chain, Chunks, ChunksRef, Prepend, Sorted, SortedBy, Tee};
pub use error::{Error, Result};
pub use ordering::{Monotonicity, Unique};
pub use pair::{Pair, Paired};
pub use seq::{empty, from_fn, once, slice_ref, values, FromFn, Seq, Values};
pub use stateless::{Enumerate, Filter, Map, Skip, Take, TakeUntil};

/// Yield `value`, then the elements of `seq`.
///
/// If the consumer stops on `value`, `seq` is never driven.
pub fn prepend<S: Seq>(value: S::Item, seq: S) -> Prepend<S> {
    Prepend::new(value, seq)
}

/// Yield the elements of `seq`, then `value` if `seq` ran to exhaustion.
pub fn append<S: Seq>(value: S::Item, seq: S) -> Append<S> {
    Append::new(value, seq)
}
