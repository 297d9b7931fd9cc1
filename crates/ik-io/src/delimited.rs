//! Delimited-text records as a sequence.

use std::io::{BufReader, Read};

use ik_core::Seq;

use crate::config::CsvConfig;
use crate::error::{Error, Result};
use crate::guard::ReleaseGuard;

/// Sequence of CSV records read from an owned reader.
///
/// Nothing is read until the first drive. The reader is dropped when the
/// drive ends, however it ends.
///
/// Record-level failures (e.g. a record with the wrong number of fields) are
/// forwarded as `Err` elements and reading continues with the next record.
/// An I/O failure is forwarded and ends the drive.
pub struct Csv<R> {
    reader: R,
    config: CsvConfig,
}

/// Records of `reader` under the default config (comma, no header row).
pub fn csv<R: Read>(reader: R) -> Csv<R> {
    Csv {
        reader,
        config: CsvConfig::default(),
    }
}

impl<R: Read> Csv<R> {
    pub fn with_config(reader: R, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { reader, config })
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }
}

impl<R: Read> Seq for Csv<R> {
    type Item = Result<Vec<String>>;

    fn drive<F>(self, mut sink: F)
    where
        F: FnMut(Self::Item) -> bool,
    {
        let Csv { reader, config } = self;
        let buffered = BufReader::with_capacity(config.buffer_capacity, reader);
        let mut records = ReleaseGuard::new(config.reader_builder().from_reader(buffered), "csv");
        let mut record = ::csv::StringRecord::new();

        loop {
            match records.read_record(&mut record) {
                Ok(false) => return,
                Ok(true) => {
                    records.record_yield();
                    let fields = record.iter().map(str::to_owned).collect();
                    if !sink(Ok(fields)) {
                        return;
                    }
                }
                Err(e) => {
                    let fatal = e.is_io_error();
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, fatal, "csv record failed");
                    if !sink(Err(Error::from(e))) || fatal {
                        return;
                    }
                }
            }
        }
    }
}
