//! Convenient re-exports for downstream crates.

pub use crate::error::{Error, Result};
pub use crate::ordering::Monotonicity;
pub use crate::pair::Pair;
pub use crate::seq::{empty, from_fn, once, slice_ref, values, Seq};
pub use crate::{append, prepend};
