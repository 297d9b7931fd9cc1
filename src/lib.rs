#![forbid(unsafe_code)]
//! ik: push-based lazy sequences.
//!
//! Core combinators come from `ik-core` and are re-exported at the root.
//! Resource-backed sources (CSV, JSON, row cursors, channels) live under
//! [`io`].
//!
//! ```
//! use ik::prelude::*;
//!
//! let evens = values(1..=10).filter(|x| x % 2 == 0).take(3).collect();
//! assert_eq!(evens, vec![2, 4, 6]);
//! ```

pub use ik_core::*;

pub mod io {
    pub use ik_io::*;
}

pub mod prelude {
    pub use ik_core::prelude::*;
    pub use ik_io::ElideExt;
}
