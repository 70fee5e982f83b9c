//! CSV-backed show store.
//!
//! The file holds a `Show Name,Seasons,Show ID` header followed by one row
//! per show. A zero-byte file is an empty store. Writes are plain
//! read-then-append or read-modify-rewrite; there is no locking.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info, warn};

use super::{LoadOutcome, ShowRecord, ShowStore, StoreError, UpsertOutcome, SHOW_FIELDS};

/// Show store persisted as a CSV table.
#[derive(Debug, Clone)]
pub struct CsvShowStore {
    path: PathBuf,
}

impl CsvShowStore {
    /// Open the store at `path`, creating an empty file (and parent
    /// directories) if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| StoreError::Create {
                    path: path.clone(),
                    source,
                })?;
            }

            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|source| StoreError::Create {
                    path: path.clone(),
                    source,
                })?;

            info!("Created show store at {}", path.display());
        }

        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Result<Vec<u8>, StoreError> {
        Ok(fs::read(&self.path)?)
    }

    /// Split the file into raw rows. Rows are kept as bytes so a single
    /// non-UTF-8 row cannot make the whole file unreadable.
    fn parse_rows(contents: &[u8]) -> Result<Vec<ByteRecord>, StoreError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(contents);

        let mut rows = Vec::new();
        for row in reader.byte_records() {
            rows.push(row?);
        }
        Ok(rows)
    }
}

fn as_text(row: &ByteRecord) -> Option<StringRecord> {
    StringRecord::from_byte_record(row.clone()).ok()
}

fn is_header(row: &ByteRecord) -> bool {
    row.len() == SHOW_FIELDS.len()
        && row
            .iter()
            .zip(SHOW_FIELDS)
            .all(|(a, b)| a == b.as_bytes())
}

/// A well-formed data row: valid UTF-8, three fields, numeric counts.
/// Surrounding whitespace in the numeric cells is tolerated.
fn parse_record(row: &ByteRecord) -> Option<ShowRecord> {
    if row.len() != SHOW_FIELDS.len() || is_header(row) {
        return None;
    }
    let text = as_text(row)?;
    let season_count = text.get(1)?.trim().parse().ok()?;
    let show_id = text.get(2)?.trim().parse().ok()?;
    Some(ShowRecord::new(text.get(0)?, season_count, show_id))
}

fn lossy(row: &ByteRecord) -> Vec<String> {
    row.iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

impl ShowStore for CsvShowStore {
    fn load_all(&self) -> Result<LoadOutcome, StoreError> {
        let contents = self.read_contents()?;
        if contents.is_empty() {
            return Ok(LoadOutcome::NoData);
        }

        let rows = Self::parse_rows(&contents)?;
        let mut rows = rows.iter().enumerate();

        if let Some((_, header)) = rows.next() {
            if !is_header(header) {
                warn!(
                    "Unexpected header in {}: {:?}",
                    self.path.display(),
                    lossy(header)
                );
            }
        }

        let mut records = Vec::new();
        let mut skipped_rows = 0;

        for (index, row) in rows {
            match parse_record(row) {
                Some(record) => records.push(record),
                None => {
                    warn!(
                        "Skipping malformed row {} in {}: {:?}",
                        index + 1,
                        self.path.display(),
                        lossy(row)
                    );
                    skipped_rows += 1;
                }
            }
        }

        debug!(
            "Loaded {} shows from {} ({} skipped)",
            records.len(),
            self.path.display(),
            skipped_rows
        );

        Ok(LoadOutcome::Loaded {
            records,
            skipped_rows,
        })
    }

    fn upsert(&self, record: &ShowRecord) -> Result<UpsertOutcome, StoreError> {
        let contents = self.read_contents()?;
        let rows = Self::parse_rows(&contents)?;

        let header_present = rows.iter().any(is_header);
        let exists = rows
            .iter()
            .filter_map(parse_record)
            .any(|saved| saved.name == record.name);

        if exists {
            debug!("Show '{}' already saved, not writing", record.name);
            return Ok(UpsertOutcome::AlreadyExists);
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;

        // A hand-edited file may lack the final newline.
        if contents.last().is_some_and(|b| *b != b'\n') {
            file.write_all(b"\n")?;
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if !header_present {
            writer.write_record(SHOW_FIELDS)?;
        }
        writer.serialize(record)?;
        writer.flush()?;

        info!(
            "Saved show '{}' ({} seasons, id {})",
            record.name, record.season_count, record.show_id
        );

        Ok(UpsertOutcome::Saved)
    }

    fn apply_season_update(
        &self,
        name: &str,
        new_season_count: u32,
    ) -> Result<bool, StoreError> {
        let contents = self.read_contents()?;
        let rows = Self::parse_rows(&contents)?;

        let mut found = false;
        let mut updated = Vec::with_capacity(rows.len());

        // Only rows that load would return are candidates; malformed rows
        // sharing the name are written back untouched.
        for row in rows {
            match parse_record(&row).filter(|r| !found && r.name == name) {
                Some(record) => {
                    found = true;
                    updated.push(ByteRecord::from(vec![
                        record.name,
                        new_season_count.to_string(),
                        record.show_id.to_string(),
                    ]));
                }
                None => updated.push(row),
            }
        }

        if !found {
            warn!("No saved show named '{}', nothing updated", name);
            return Ok(false);
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        for row in &updated {
            writer.write_byte_record(row)?;
        }
        writer.flush()?;

        info!("Updated '{}' to {} seasons", name, new_season_count);

        Ok(true)
    }
}
