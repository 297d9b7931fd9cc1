//! Adapter configuration that callers can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default read buffer wrapped around every adapter's reader.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter (single byte).
    pub delimiter: u8,

    /// Treat the first record as a header and skip it.
    pub has_headers: bool,

    /// Allow records with differing field counts. When false, a record whose
    /// length differs from the first one is forwarded as an error element.
    pub flexible: bool,

    /// Trim surrounding whitespace from every field.
    pub trim: bool,

    /// Capacity of the read buffer in bytes.
    pub buffer_capacity: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
            flexible: false,
            trim: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl CsvConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `IK_CSV_DELIMITER`: a single ASCII character, or `\t` for tab
    /// - `IK_CSV_HAS_HEADERS`: `true`/`false`
    /// - `IK_CSV_FLEXIBLE`: `true`/`false`
    /// - `IK_CSV_TRIM`: `true`/`false`
    /// - `IK_BUFFER_CAPACITY`: read buffer size in bytes
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("IK_CSV_DELIMITER") {
            if let Some(b) = parse_delimiter(&s) {
                cfg.delimiter = b;
            }
        }

        if let Ok(s) = std::env::var("IK_CSV_HAS_HEADERS") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.has_headers = v;
            }
        }

        if let Ok(s) = std::env::var("IK_CSV_FLEXIBLE") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.flexible = v;
            }
        }

        if let Ok(s) = std::env::var("IK_CSV_TRIM") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.trim = v;
            }
        }

        if let Some(v) = buffer_capacity_from_env() {
            cfg.buffer_capacity = v;
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(Error::Config(format!(
                "delimiter {:?} clashes with quoting or record separators",
                self.delimiter as char
            )));
        }
        check_buffer_capacity(self.buffer_capacity)
    }

    /// Builder for a `csv::Reader` honouring this config.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .flexible(self.flexible)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonConfig {
    /// Capacity of the read buffer in bytes.
    pub buffer_capacity: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl JsonConfig {
    /// Create a config from `IK_BUFFER_CAPACITY`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = buffer_capacity_from_env() {
            cfg.buffer_capacity = v;
        }
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        check_buffer_capacity(self.buffer_capacity)
    }
}

fn parse_delimiter(s: &str) -> Option<u8> {
    match s {
        "\\t" => Some(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => s.bytes().next(),
        _ => None,
    }
}

fn buffer_capacity_from_env() -> Option<usize> {
    std::env::var("IK_BUFFER_CAPACITY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

fn check_buffer_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(Error::Config("buffer capacity must be non-zero".into()));
    }
    Ok(())
}
