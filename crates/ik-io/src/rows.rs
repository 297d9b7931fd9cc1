//! Database-style row cursors as sequences.
//!
//! A [`RowCursor`] is the minimal surface a query result needs to expose:
//! advance to the next row, and close. [`rows`] turns a cursor into a sequence
//! of [`Row`]s and guarantees the cursor is closed exactly once when the drive
//! ends, however it ends. [`Row::scan`] decodes a row into typed values.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ik_core::Seq;

use crate::error::{Error, Result};
use crate::guard::ReleaseGuard;

/// A single column value as produced by a cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// Decode one column value into a Rust type.
pub trait FromValue: Sized {
    const TYPE_NAME: &'static str;

    /// `None` when the value has the wrong shape for `Self`.
    fn from_value(value: Value) -> Option<Self>;

    fn decode(value: Value, column: usize) -> Result<Self> {
        let found = value.type_name();
        Self::from_value(value).ok_or(Error::Decode {
            column,
            expected: Self::TYPE_NAME,
            found,
        })
    }
}

impl FromValue for Value {
    const TYPE_NAME: &'static str = "value";

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "float";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            Value::Int(v) => Some(v as f64),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "text";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl FromValue for Vec<u8> {
    const TYPE_NAME: &'static str = "bytes";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(v) => Some(v),
            Value::Text(v) => Some(v.into_bytes()),
            _ => None,
        }
    }
}

/// Nullable column: `Null` decodes to `None`.
impl<T: FromValue> FromValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Decode a whole row into a destination.
pub trait FromRow: Sized {
    fn from_row(values: Vec<Value>) -> Result<Self>;
}

impl FromRow for Vec<Value> {
    fn from_row(values: Vec<Value>) -> Result<Self> {
        Ok(values)
    }
}

macro_rules! tuple_from_row {
    ($len:expr; $($idx:tt $ty:ident $var:ident),+) => {
        impl<$($ty: FromValue),+> FromRow for ($($ty,)+) {
            fn from_row(values: Vec<Value>) -> Result<Self> {
                let found = values.len();
                let [$($var),+]: [Value; $len] = values
                    .try_into()
                    .map_err(|_| Error::Arity { expected: $len, found })?;
                Ok(($($ty::decode($var, $idx)?,)+))
            }
        }
    };
}

tuple_from_row!(1; 0 A a);
tuple_from_row!(2; 0 A a, 1 B b);
tuple_from_row!(3; 0 A a, 1 B b, 2 C c);
tuple_from_row!(4; 0 A a, 1 B b, 2 C c, 3 D d);
tuple_from_row!(5; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e);
tuple_from_row!(6; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f);

/// One row handed to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Decode the row into `D`, e.g. `(i64, String)` or `(i64, Option<f64>)`.
    pub fn scan<D: FromRow>(&self) -> Result<D> {
        D::from_row(self.values.clone())
    }

    /// Like [`Row::scan`] without cloning the column values.
    pub fn into_scan<D: FromRow>(self) -> Result<D> {
        D::from_row(self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Forward-only result cursor.
pub trait RowCursor {
    /// Advance to the next row. `Ok(None)` is a clean end.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>>;

    /// Release the cursor. Called exactly once by [`Rows`].
    fn close(&mut self) -> Result<()>;
}

/// Sequence of rows over an owned cursor.
///
/// A cursor failure is forwarded once as an `Err` element and ends the drive.
/// The cursor is closed on every exit path, including panics raised by the
/// consumer.
pub struct Rows<C> {
    cursor: C,
}

pub fn rows<C: RowCursor>(cursor: C) -> Rows<C> {
    Rows { cursor }
}

fn close_cursor<C: RowCursor>(cursor: &mut C) {
    if let Err(_e) = cursor.close() {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %_e, "cursor close failed");
    }
}

impl<C: RowCursor> Seq for Rows<C> {
    type Item = Result<Row>;

    fn drive<F>(self, mut sink: F)
    where
        F: FnMut(Self::Item) -> bool,
    {
        let mut cursor = ReleaseGuard::new(self.cursor, "rows").with_release(close_cursor::<C>);
        loop {
            match cursor.next_row() {
                Ok(Some(values)) => {
                    cursor.record_yield();
                    if !sink(Ok(Row::new(values))) {
                        return;
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = "rows", error = %e, "cursor advance failed");
                    sink(Err(e));
                    return;
                }
            }
        }
    }
}

/// In-memory cursor, handy for tests and for staging rows.
#[derive(Debug, Default)]
pub struct MemoryCursor {
    rows: VecDeque<Vec<Value>>,
    fail_after: Option<usize>,
    served: usize,
    closes: Arc<AtomicUsize>,
}

/// Observes how many times a [`MemoryCursor`] was closed, after it has been
/// moved into a sequence.
#[derive(Debug, Clone)]
pub struct CloseCount(Arc<AtomicUsize>);

impl CloseCount {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl MemoryCursor {
    pub fn new<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        Self {
            rows: rows.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Fail with [`Error::Cursor`] once `n` rows have been served.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn close_count(&self) -> CloseCount {
        CloseCount(Arc::clone(&self.closes))
    }
}

impl RowCursor for MemoryCursor {
    fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        if self.fail_after == Some(self.served) {
            return Err(Error::Cursor(format!(
                "cursor failed after {} rows",
                self.served
            )));
        }
        let row = self.rows.pop_front();
        if row.is_some() {
            self.served += 1;
        }
        Ok(row)
    }

    fn close(&mut self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.rows.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    fn people() -> MemoryCursor {
        MemoryCursor::new(vec![
            vec![Value::Int(1), "ada".into()],
            vec![Value::Int(2), "grace".into()],
            vec![Value::Int(3), Value::Null],
        ])
    }

    #[test]
    fn scan_rows_into_tuples() {
        let cursor = people();
        let closes = cursor.close_count();
        let decoded: Vec<(i64, Option<String>)> = rows(cursor)
            .map(|r| r.and_then(|row| row.into_scan::<(i64, Option<String>)>()).unwrap())
            .collect();
        assert_eq!(
            decoded,
            vec![
                (1, Some("ada".to_owned())),
                (2, Some("grace".to_owned())),
                (3, None),
            ]
        );
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn closed_once_on_early_stop() {
        let cursor = people();
        let closes = cursor.close_count();
        assert_eq!(rows(cursor).take(1).count(), 1);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn cursor_error_forwarded_then_closed() {
        let cursor = people().fail_after(1);
        let closes = cursor.close_count();
        let got = rows(cursor).collect();
        assert_eq!(got.len(), 2);
        assert!(got[0].is_ok());
        assert!(matches!(got[1], Err(Error::Cursor(_))));
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn closed_once_when_consumer_panics() {
        let cursor = people();
        let closes = cursor.close_count();
        let result = catch_unwind(AssertUnwindSafe(move || {
            rows(cursor).for_each(|_| panic!("consumer blew up"));
        }));
        assert!(result.is_err());
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn scan_reports_arity_and_type_mismatch() {
        let row = Row::new(vec![Value::Int(1), Value::Text("x".into())]);
        assert!(matches!(
            row.scan::<(i64,)>(),
            Err(Error::Arity {
                expected: 1,
                found: 2
            })
        ));
        assert!(matches!(
            row.scan::<(i64, bool)>(),
            Err(Error::Decode {
                column: 1,
                expected: "bool",
                found: "text"
            })
        ));
    }

    #[test]
    fn float_accepts_int_column() {
        let row = Row::new(vec![Value::Int(4)]);
        assert_eq!(row.scan::<(f64,)>().unwrap(), (4.0,));
    }
}
