//! Unwrapping fallible sequences.
//!
//! [`ElideExt::elide`] turns a sequence of `Result<T, E>` into a sequence of
//! `T` for callers that treat any failure as fatal. The first `Err` panics
//! with the error's message; upstream resources are still released while the
//! panic unwinds.

use std::fmt::Display;

use ik_core::Seq;

pub struct Elide<S> {
    inner: S,
}

impl<S, T, E> Seq for Elide<S>
where
    S: Seq<Item = Result<T, E>>,
    E: Display,
{
    type Item = T;

    fn drive<F>(self, mut sink: F)
    where
        F: FnMut(Self::Item) -> bool,
    {
        self.inner.drive(|item| match item {
            Ok(v) => sink(v),
            Err(e) => panic!("elided sequence failed: {e}"),
        });
    }
}

pub trait ElideExt<T, E>: Seq<Item = Result<T, E>> {
    /// Panic on the first error instead of forwarding it.
    fn elide(self) -> Elide<Self> {
        Elide { inner: self }
    }
}

impl<S, T, E> ElideExt<T, E> for S where S: Seq<Item = Result<T, E>> {}
