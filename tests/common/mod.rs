//! Shared probes for integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;

use ik::prelude::*;

/// Source of `0..len` that counts how many elements were pulled.
pub fn counted(len: usize, pulls: &Rc<Cell<usize>>) -> impl Seq<Item = usize> {
    let pulls = Rc::clone(pulls);
    let mut next = 0;
    from_fn(move || {
        if next == len {
            return None;
        }
        pulls.set(pulls.get() + 1);
        next += 1;
        Some(next - 1)
    })
}

/// Reader over in-memory bytes that records when it is dropped, and can be
/// made to fail with an I/O error once its bytes are consumed.
pub struct TrackedReader {
    inner: Cursor<Vec<u8>>,
    drops: Rc<Cell<u32>>,
    fail_at_end: bool,
}

impl TrackedReader {
    pub fn new(text: &str) -> (Self, Rc<Cell<u32>>) {
        let drops = Rc::new(Cell::new(0));
        let reader = Self {
            inner: Cursor::new(text.as_bytes().to_vec()),
            drops: Rc::clone(&drops),
            fail_at_end: false,
        };
        (reader, drops)
    }

    pub fn failing(text: &str) -> (Self, Rc<Cell<u32>>) {
        let (mut reader, drops) = Self::new(text);
        reader.fail_at_end = true;
        (reader, drops)
    }
}

impl Read for TrackedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && self.fail_at_end {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "link dropped"));
        }
        Ok(n)
    }
}

impl Drop for TrackedReader {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
