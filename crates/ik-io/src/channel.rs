//! Channel receivers as sequences.
//!
//! Each element is one received message. The drive ends when every sender is
//! gone, or when the consumer stops; the receiver is dropped either way, so
//! senders observe the disconnect.

use std::sync::mpsc;

use ik_core::Seq;

use crate::guard::ReleaseGuard;

/// Blocking receive half of a channel.
pub trait Recv {
    type Item;

    /// Block for the next message. `None` once all senders are dropped.
    fn recv_next(&mut self) -> Option<Self::Item>;
}

impl<T> Recv for mpsc::Receiver<T> {
    type Item = T;

    fn recv_next(&mut self) -> Option<T> {
        self.recv().ok()
    }
}

/// Must not be driven from inside an async runtime context; `blocking_recv`
/// panics there.
#[cfg(feature = "tokio")]
impl<T> Recv for tokio::sync::mpsc::Receiver<T> {
    type Item = T;

    fn recv_next(&mut self) -> Option<T> {
        self.blocking_recv()
    }
}

#[cfg(feature = "tokio")]
impl<T> Recv for tokio::sync::mpsc::UnboundedReceiver<T> {
    type Item = T;

    fn recv_next(&mut self) -> Option<T> {
        self.blocking_recv()
    }
}

pub struct Channel<R> {
    rx: R,
}

/// Messages received on `rx`, in arrival order.
pub fn channel<R: Recv>(rx: R) -> Channel<R> {
    Channel { rx }
}

impl<R: Recv> Seq for Channel<R> {
    type Item = R::Item;

    fn drive<F>(self, mut sink: F)
    where
        F: FnMut(Self::Item) -> bool,
    {
        let mut rx = ReleaseGuard::new(self.rx, "channel");
        while let Some(msg) = rx.recv_next() {
            rx.record_yield();
            if !sink(msg) {
                return;
            }
        }
    }
}
