//! Append-only audit log of applied (or simulated) changes.
//!
//! One CSV line per record and category: `record_id, category, field, old,
//! new [, field, old, new ...]`. No header row. The file is opened in
//! append mode and held under an exclusive OS lock for the duration of each
//! write, so concurrent runs against the same destination cannot interleave
//! partial lines.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crmnorm_model::Result;

use crate::diff::FieldDiff;

/// Which normalizer produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Name,
    Phone,
    Address,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Name => "name",
            Category::Phone => "phone",
            Category::Address => "address",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named log destination. Cheap to clone; every append reopens the file.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    path: PathBuf,
}

impl ChangeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for the record's diff. Empty diffs write nothing.
    pub fn append(&self, record_id: u32, category: Category, diff: &FieldDiff) -> Result<()> {
        if diff.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.lock()?;

        let mut row: Vec<String> = Vec::with_capacity(2 + diff.len() * 3);
        row.push(record_id.to_string());
        row.push(category.to_string());
        for (field, (old, new)) in diff {
            row.push((*field).to_string());
            row.push(old.clone().unwrap_or_default());
            row.push(new.clone().unwrap_or_default());
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(&file);
        writer
            .write_record(&row)
            .map_err(std::io::Error::other)?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;
        Ok(())
    }

    /// Delete the destination if present; a missing file is a no-op.
    pub fn delete(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
