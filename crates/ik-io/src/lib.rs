#![forbid(unsafe_code)]
//! ik-io: sequences backed by external resources.
//!
//! Every adapter here owns its resource (a reader, a cursor, a receiver) and
//! opens nothing until driven. The resource lives inside a [`ReleaseGuard`]
//! for the length of the drive and is released exactly once when the drive
//! ends: at exhaustion, on a consumer stop, after a forwarded error, or while
//! a panic unwinds. Failures reach the consumer as `Err` elements; end of
//! input is never an error.

pub mod channel;
pub mod config;
pub mod delimited;
pub mod elide;
pub mod error;
pub mod guard;
pub mod json;
pub mod rows;

pub use channel::{channel, Channel, Recv};
pub use config::{CsvConfig, JsonConfig, DEFAULT_BUFFER_CAPACITY};
pub use delimited::{csv, Csv};
pub use elide::{Elide, ElideExt};
pub use error::{Error, Result};
pub use guard::ReleaseGuard;
pub use json::{json, json_values, Json, JsonValues, Token};
pub use rows::{
    rows, CloseCount, FromRow, FromValue, MemoryCursor, Row, RowCursor, Rows, Value,
};
