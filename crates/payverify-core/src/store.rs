//! Payment persistence.
//!
//! Stores are explicit handles: open one, pass it to whoever records payments,
//! close it when done.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::payment::PaymentRecord;

/// Sink for verified payments.
pub trait PaymentStore {
    /// Persist one payment record.
    fn insert(&mut self, record: &PaymentRecord) -> Result<(), StoreError>;
}

/// Append-only store writing one JSON object per line.
pub struct JsonLinesStore {
    path: PathBuf,
    writer: BufWriter<File>,
    inserted: usize,
}

impl JsonLinesStore {
    /// Open the store file for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Open {
                path: path.display().to_string(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Open {
                path: path.display().to_string(),
                source,
            })?;

        debug!("Opened payment store at {}", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            inserted: 0,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush pending records and release the file.
    pub fn close(mut self) -> Result<(), StoreError> {
        self.writer.flush()?;
        info!("Closed payment store {} ({} new records)", self.path.display(), self.inserted);
        Ok(())
    }

    /// Read every record stored at `path`. Blank lines are ignored.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<PaymentRecord>, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

impl PaymentStore for JsonLinesStore {
    fn insert(&mut self, record: &PaymentRecord) -> Result<(), StoreError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.inserted += 1;
        debug!("Stored payment {} ({})", record.id, record.invoice_no);
        Ok(())
    }
}
