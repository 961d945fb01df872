//! Integration tests for the JSON file store with hand-written documents.

use std::path::Path;
use std::sync::Arc;

use pennywise_core::balance::BalanceAggregator;
use pennywise_core::editor::{OccurrenceEditor, OccurrenceRef};
use pennywise_core::entry::EntryKind;
use pennywise_core::projection::project;
use pennywise_core::store::{EntryStore, ExclusionStore, StoreError, load_snapshot};
use pennywise_shared::YearMonth;
use pennywise_shared::types::EntryId;
use pennywise_store::JsonFileStore;
use rust_decimal_macros::dec;
use serde_json::json;

const RENT: &str = "0190a1b2-0000-7000-8000-000000000001";
const SALARY: &str = "0190a1b2-0000-7000-8000-000000000002";
const BROKEN_AMOUNT: &str = "0190a1b2-0000-7000-8000-000000000003";
const BROKEN_DATE: &str = "0190a1b2-0000-7000-8000-000000000004";

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn write_document(path: &Path) {
    let document = json!({
        "expenses": [
            {
                "id": RENT,
                "kind": "expense",
                "amount": 100,
                "name": "Rent",
                "date": "2024-01-01T00:00:00.000Z",
                "recurring": true
            },
            {
                "id": BROKEN_AMOUNT,
                "kind": "expense",
                "amount": "a lot",
                "name": "Mystery",
                "date": "2024-03-14",
                "recurring": false
            },
            {
                "id": BROKEN_DATE,
                "kind": "expense",
                "amount": 55,
                "name": "Undated",
                "date": "sometime",
                "recurring": true
            },
            { "name": "no id at all" }
        ],
        "income": [
            {
                "id": SALARY,
                "kind": "income",
                "amount": "500.00",
                "name": "Salary",
                "date": "2024-03-25",
                "end_date": "",
                "recurring": true
            }
        ],
        "expense_exclusions": [
            {
                "id": "0190a1b2-0000-7000-8000-0000000000a1",
                "entry_id": RENT,
                "excluded_month": "02-2024"
            },
            {
                "id": "0190a1b2-0000-7000-8000-0000000000a2",
                "entry_id": RENT,
                "excluded_month": "not a month"
            }
        ]
    });
    std::fs::write(path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
}

#[tokio::test]
async fn test_malformed_records_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    write_document(&path);
    let store = JsonFileStore::open(&path).await.unwrap();

    let snapshot = load_snapshot(&store, &store, 50).await.unwrap();
    assert_eq!(snapshot.entries.len(), 3);
    assert_eq!(snapshot.exclusions.len(), 1);

    // February is excluded for rent; the bad exclusion never matches.
    assert!(project(&snapshot.entries, &snapshot.exclusions, ym(2024, 2)).is_empty());

    let march = BalanceAggregator::monthly_totals(&snapshot.entries, &snapshot.exclusions, ym(2024, 3));
    assert_eq!(march.total_expense, dec!(100));
    assert_eq!(march.total_income, dec!(500));
    assert_eq!(march.balance, dec!(400));
}

#[tokio::test]
async fn test_writes_keep_undecodable_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    write_document(&path);
    let store = Arc::new(JsonFileStore::open(&path).await.unwrap());
    let rent: EntryId = RENT.parse().unwrap();

    OccurrenceEditor::new(store.clone(), store.clone())
        .delete_this_month(OccurrenceRef::new(rent, EntryKind::Expense, ym(2024, 5)))
        .await
        .unwrap();
    drop(store);

    let reopened = JsonFileStore::open(&path).await.unwrap();
    assert_eq!(reopened.raw_entry_count(EntryKind::Expense).await, 4);
    let exclusions = reopened.list_exclusions(EntryKind::Expense).await.unwrap();
    assert_eq!(exclusions.len(), 2);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("not a month"));
    assert!(text.contains("2024-05-01"));
}

#[tokio::test]
async fn test_undecodable_entry_cannot_be_edited() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    write_document(&path);
    let store = JsonFileStore::open(&path).await.unwrap();

    let broken: EntryId = BROKEN_DATE.parse().unwrap();
    let err = store.get_entry(broken).await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));

    // Deleting it is still possible.
    store.delete_entry(broken).await.unwrap();
    assert_eq!(store.raw_entry_count(EntryKind::Expense).await, 3);
}

#[tokio::test]
async fn test_delete_missing_exclusion_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("books.json")).await.unwrap();
    let err = store
        .delete_exclusion(EntryKind::Income, pennywise_shared::types::ExclusionId::new())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
