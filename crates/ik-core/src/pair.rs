//! Key/value pairs as a single element type.

use serde::{Deserialize, Serialize};

use crate::seq::Seq;

/// A key and a value travelling together as one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Pair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

/// Turns a sequence of `(K, V)` tuples into a sequence of [`Pair`]s.
#[derive(Clone)]
pub struct Paired<S> {
    seq: S,
}

impl<S> Paired<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq }
    }
}

impl<S, K, V> Seq for Paired<S>
where
    S: Seq<Item = (K, V)>,
{
    type Item = Pair<K, V>;

    fn drive<G>(self, mut sink: G)
    where
        G: FnMut(Pair<K, V>) -> bool,
    {
        self.seq.drive(move |kv| sink(Pair::from(kv)));
    }
}
