//! Scoped ownership of an external resource for the length of one drive.
//!
//! Adapters move their resource into a [`ReleaseGuard`] at the start of a
//! drive. Dropping the guard releases the resource, on every exit path:
//! exhaustion, downstream stop, a forwarded error, or a panic unwinding out of
//! a caller's closure.

use std::ops::{Deref, DerefMut};

/// RAII owner of a resource. Runs an optional release hook, then drops the
/// resource itself.
pub struct ReleaseGuard<R> {
    resource: R,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    tag: &'static str,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    yielded: u64,
    release: Option<fn(&mut R)>,
}

impl<R> ReleaseGuard<R> {
    /// Guard a resource whose release is its own `Drop`.
    pub fn new(resource: R, tag: &'static str) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(source = tag, "drive started");
        Self {
            resource,
            tag,
            yielded: 0,
            release: None,
        }
    }

    /// Run `release` exactly once, right before the resource is dropped.
    pub fn with_release(mut self, release: fn(&mut R)) -> Self {
        self.release = Some(release);
        self
    }

    /// Count one element handed to the consumer (reported at release).
    pub fn record_yield(&mut self) {
        self.yielded += 1;
    }
}

impl<R> Deref for ReleaseGuard<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.resource
    }
}

impl<R> DerefMut for ReleaseGuard<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.resource
    }
}

impl<R> Drop for ReleaseGuard<R> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&mut self.resource);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = self.tag,
            yielded = self.yielded,
            panicking = std::thread::panicking(),
            "resource released"
        );
    }
}
