//! Loading the full working set from the stores.

use pennywise_shared::types::{EntryId, PageRequest};
use tracing::debug;

use super::error::StoreError;
use super::traits::{EntryStore, ExclusionStore};
use crate::entry::{Entry, EntryKind, Exclusion};

/// Entries of both kinds plus their exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Expenses first, then income, each in store order.
    pub entries: Vec<Entry>,
    /// Exclusions of both kinds.
    pub exclusions: Vec<Exclusion>,
}

impl Snapshot {
    /// Entries of one kind, in store order.
    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn find_entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Exclusions owned by `entry_id`.
    pub fn exclusions_for(&self, entry_id: EntryId) -> impl Iterator<Item = &Exclusion> {
        self.exclusions.iter().filter(move |e| e.entry_id == entry_id)
    }
}

/// Walks every page of `kind` entries.
///
/// # Errors
///
/// Returns the first store error.
pub async fn fetch_all_entries(
    store: &dyn EntryStore,
    kind: EntryKind,
    page_size: u32,
) -> Result<Vec<Entry>, StoreError> {
    let mut page = PageRequest::new(1, page_size);
    let mut entries = Vec::new();

    loop {
        let response = store.list_entries(kind, page).await?;
        let has_next = response.meta.has_next();
        let fetched = response.data.len();
        entries.extend(response.data);
        if !has_next || fetched == 0 {
            break;
        }
        page = page.next();
    }

    Ok(entries)
}

/// Loads entries and exclusions of both kinds.
///
/// # Errors
///
/// Returns the first store error.
pub async fn load_snapshot(
    entries: &dyn EntryStore,
    exclusions: &dyn ExclusionStore,
    page_size: u32,
) -> Result<Snapshot, StoreError> {
    let mut snapshot = Snapshot::default();

    for kind in EntryKind::ALL {
        snapshot
            .entries
            .extend(fetch_all_entries(entries, kind, page_size).await?);
        snapshot
            .exclusions
            .extend(exclusions.list_exclusions(kind).await?);
    }

    debug!(
        entries = snapshot.entries.len(),
        exclusions = snapshot.exclusions.len(),
        "Loaded snapshot"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::NewEntry;
    use crate::store::{MockEntryStore, MockExclusionStore};
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use pennywise_shared::types::PageResponse;
    use rust_decimal_macros::dec;

    fn entry(kind: EntryKind, name: &str) -> Entry {
        NewEntry::one_off(
            kind,
            name,
            dec!(10),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .into_entry(EntryId::new())
    }

    #[tokio::test]
    async fn test_fetch_all_entries_walks_pages() {
        let all: Vec<Entry> = (0..5)
            .map(|i| entry(EntryKind::Expense, &format!("E{i}")))
            .collect();
        let pages = all.clone();

        let mut store = MockEntryStore::new();
        store
            .expect_list_entries()
            .times(3)
            .returning(move |_, page| Ok(page.paginate(pages.clone())));

        let fetched = fetch_all_entries(&store, EntryKind::Expense, 2).await.unwrap();
        assert_eq!(fetched, all);
    }

    #[tokio::test]
    async fn test_fetch_stops_on_empty_page() {
        let mut store = MockEntryStore::new();
        store
            .expect_list_entries()
            .times(1)
            .returning(|_, page| Ok(PageResponse::new(Vec::new(), page.page, page.per_page, 0)));

        let fetched = fetch_all_entries(&store, EntryKind::Income, 50).await.unwrap();
        assert!(fetched.is_empty());
    }

    #[tokio::test]
    async fn test_load_snapshot_reads_both_kinds() {
        let expense = entry(EntryKind::Expense, "Rent");
        let income = entry(EntryKind::Income, "Salary");
        let exclusion = Exclusion::new(expense.id, pennywise_shared::YearMonth::new(2024, 2).unwrap());

        let mut entries = MockEntryStore::new();
        let (e, i) = (expense.clone(), income.clone());
        entries
            .expect_list_entries()
            .returning(move |kind, page| {
                let data = match kind {
                    EntryKind::Expense => vec![e.clone()],
                    EntryKind::Income => vec![i.clone()],
                };
                Ok(page.paginate(data))
            });

        let mut exclusions = MockExclusionStore::new();
        let x = exclusion.clone();
        exclusions
            .expect_list_exclusions()
            .with(eq(EntryKind::Expense))
            .returning(move |_| Ok(vec![x.clone()]));
        exclusions
            .expect_list_exclusions()
            .with(eq(EntryKind::Income))
            .returning(|_| Ok(Vec::new()));

        let snapshot = load_snapshot(&entries, &exclusions, 50).await.unwrap();
        assert_eq!(snapshot.entries, vec![expense.clone(), income]);
        assert_eq!(snapshot.exclusions_for(expense.id).count(), 1);
        assert_eq!(snapshot.entries_of(EntryKind::Income).count(), 1);
        assert!(snapshot.find_entry(expense.id).is_some());
    }

    #[tokio::test]
    async fn test_load_snapshot_propagates_errors() {
        let mut entries = MockEntryStore::new();
        entries
            .expect_list_entries()
            .returning(|_, _| Err(StoreError::Unavailable("offline".into())));
        let exclusions = MockExclusionStore::new();

        let err = load_snapshot(&entries, &exclusions, 50).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
