//! JSON file store.
//!
//! The whole working set lives in one JSON document. Records are kept as raw
//! JSON values and decoded leniently on read, so a malformed record is
//! skipped for projection but never dropped from the file. Every write
//! replaces the document atomically (temporary file, then rename).

use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use pennywise_core::entry::{
    Entry, EntryKind, EntryPatch, EntryRecord, Exclusion, ExclusionRecord, NewEntry,
};
use pennywise_core::store::{EntryStore, ExclusionStore, StoreError};
use pennywise_shared::YearMonth;
use pennywise_shared::types::{EntryId, ExclusionId, PageRequest, PageResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// On-disk document layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    expenses: Vec<Value>,
    #[serde(default)]
    income: Vec<Value>,
    #[serde(default)]
    expense_exclusions: Vec<Value>,
    #[serde(default)]
    income_exclusions: Vec<Value>,
}

impl StoreDocument {
    fn entries(&self, kind: EntryKind) -> &Vec<Value> {
        match kind {
            EntryKind::Expense => &self.expenses,
            EntryKind::Income => &self.income,
        }
    }

    fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Value> {
        match kind {
            EntryKind::Expense => &mut self.expenses,
            EntryKind::Income => &mut self.income,
        }
    }

    fn exclusions(&self, kind: EntryKind) -> &Vec<Value> {
        match kind {
            EntryKind::Expense => &self.expense_exclusions,
            EntryKind::Income => &self.income_exclusions,
        }
    }

    fn exclusions_mut(&mut self, kind: EntryKind) -> &mut Vec<Value> {
        match kind {
            EntryKind::Expense => &mut self.expense_exclusions,
            EntryKind::Income => &mut self.income_exclusions,
        }
    }

    /// Locates a raw entry by id across both kinds.
    fn find_entry(&self, id: EntryId) -> Option<(EntryKind, usize)> {
        EntryKind::ALL.into_iter().find_map(|kind| {
            position_of(self.entries(kind), id).map(|index| (kind, index))
        })
    }
}

/// Finds a record by parsed id, so hand-edited ids in another case still match.
fn position_of<T: FromStr + PartialEq>(records: &[Value], id: T) -> Option<usize> {
    records.iter().position(|record| {
        record
            .get("id")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<T>().ok())
            .is_some_and(|parsed| parsed == id)
    })
}

fn decode_entry(raw: &Value) -> Option<Entry> {
    match serde_json::from_value::<EntryRecord>(raw.clone()) {
        Ok(record) => record.into_entry(),
        Err(err) => {
            warn!(error = %err, "Skipping undecodable entry record");
            None
        }
    }
}

fn decode_exclusion(raw: &Value) -> Option<Exclusion> {
    match serde_json::from_value::<ExclusionRecord>(raw.clone()) {
        Ok(record) => record.into_exclusion(),
        Err(err) => {
            warn!(error = %err, "Skipping undecodable exclusion record");
            None
        }
    }
}

/// Entry and exclusion store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl JsonFileStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or `Corrupt` if it is not a
    /// store document.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let document = match tokio::fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => StoreDocument::default(),
            Ok(text) => serde_json::from_str(&text)
                .map_err(|err| StoreError::Corrupt(format!("{}: {err}", path.display())))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Store file not found, starting empty");
                StoreDocument::default()
            }
            Err(err) => return Err(err.into()),
        };

        debug!(
            path = %path.display(),
            expenses = document.expenses.len(),
            income = document.income.len(),
            "Opened JSON store"
        );

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of raw entry records of `kind`, decodable or not.
    pub async fn raw_entry_count(&self, kind: EntryKind) -> usize {
        self.document.lock().await.entries(kind).len()
    }

    async fn persist(&self, document: &StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Applies `change` to a copy of the document, persists it, then commits.
    async fn write<T>(
        &self,
        change: impl FnOnce(&mut StoreDocument) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut document = self.document.lock().await;
        let mut next = document.clone();
        let result = change(&mut next)?;
        self.persist(&next).await?;
        *document = next;
        Ok(result)
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn list_entries(
        &self,
        kind: EntryKind,
        page: PageRequest,
    ) -> Result<PageResponse<Entry>, StoreError> {
        let document = self.document.lock().await;
        let entries: Vec<Entry> = document
            .entries(kind)
            .iter()
            .filter_map(decode_entry)
            .collect();
        Ok(page.paginate(entries))
    }

    async fn get_entry(&self, id: EntryId) -> Result<Entry, StoreError> {
        let document = self.document.lock().await;
        let (kind, index) = document
            .find_entry(id)
            .ok_or_else(|| StoreError::entry_not_found(id))?;
        decode_entry(&document.entries(kind)[index])
            .ok_or_else(|| StoreError::Corrupt(format!("entry {id} cannot be decoded")))
    }

    async fn create_entry(&self, input: NewEntry) -> Result<Entry, StoreError> {
        let entry = input.into_entry(EntryId::new());
        let record = serde_json::to_value(EntryRecord::from(&entry))?;
        self.write(|document| {
            document.entries_mut(entry.kind).push(record);
            Ok(())
        })
        .await?;
        Ok(entry)
    }

    async fn update_entry(&self, id: EntryId, patch: EntryPatch) -> Result<Entry, StoreError> {
        self.write(|document| {
            let (kind, index) = document
                .find_entry(id)
                .ok_or_else(|| StoreError::entry_not_found(id))?;
            let records = document.entries_mut(kind);
            let mut entry = decode_entry(&records[index])
                .ok_or_else(|| StoreError::Corrupt(format!("entry {id} cannot be decoded")))?;
            patch.apply_to(&mut entry);
            records[index] = serde_json::to_value(EntryRecord::from(&entry))?;
            Ok(entry)
        })
        .await
    }

    async fn delete_entry(&self, id: EntryId) -> Result<(), StoreError> {
        self.write(|document| {
            let (kind, index) = document
                .find_entry(id)
                .ok_or_else(|| StoreError::entry_not_found(id))?;
            document.entries_mut(kind).remove(index);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ExclusionStore for JsonFileStore {
    async fn list_exclusions(&self, kind: EntryKind) -> Result<Vec<Exclusion>, StoreError> {
        let document = self.document.lock().await;
        Ok(document
            .exclusions(kind)
            .iter()
            .filter_map(decode_exclusion)
            .collect())
    }

    async fn create_exclusion(
        &self,
        kind: EntryKind,
        entry_id: EntryId,
        month: YearMonth,
    ) -> Result<Exclusion, StoreError> {
        let exclusion = Exclusion::new(entry_id, month);
        let record = serde_json::to_value(ExclusionRecord::from(&exclusion))?;
        self.write(|document| {
            document.exclusions_mut(kind).push(record);
            Ok(())
        })
        .await?;
        Ok(exclusion)
    }

    async fn delete_exclusion(&self, kind: EntryKind, id: ExclusionId) -> Result<(), StoreError> {
        self.write(|document| {
            let records = document.exclusions_mut(kind);
            let index = position_of(records, id)
                .ok_or_else(|| StoreError::exclusion_not_found(id))?;
            records.remove(index);
            Ok(())
        })
        .await
    }
}
