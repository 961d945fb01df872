//! Property-based tests for the projection rule.

use chrono::NaiveDate;
use pennywise_shared::YearMonth;
use pennywise_shared::types::EntryId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::projector::{Projector, occurs_in, project};
use crate::entry::{Entry, EntryKind, Exclusion, NewEntry};

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn month_strategy() -> impl Strategy<Value = YearMonth> {
    (2020i32..2030, 1u32..=12).prop_map(|(year, month)| ym(year, month))
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    (
        month_strategy(),
        1u32..=28,
        1i64..10_000_000,
        any::<bool>(),
        prop::option::of(0i32..48),
        any::<bool>(),
    )
        .prop_map(|(start, day, cents, recurring, end_offset, income)| {
            let kind = if income {
                EntryKind::Income
            } else {
                EntryKind::Expense
            };
            let input = if recurring {
                let input = NewEntry::monthly(kind, "Recurring", Decimal::new(cents, 2), start.with_day_clamped(day));
                match end_offset {
                    Some(offset) => input.until(start.add_months(offset).first_day()),
                    None => input,
                }
            } else {
                NewEntry::one_off(kind, "One-off", Decimal::new(cents, 2), start.with_day_clamped(day))
            };
            input.into_entry(EntryId::new())
        })
}

proptest! {
    /// A one-off appears in exactly the month of its date.
    #[test]
    fn test_non_recurring_containment(
        entry in entry_strategy().prop_filter("one-off", |e| !e.recurring),
        target in month_strategy(),
    ) {
        let projected = !project(std::slice::from_ref(&entry), &[], target).is_empty();
        prop_assert_eq!(projected, target == YearMonth::from_date(entry.date));
    }

    /// A recurring entry never projects outside its start..=end window.
    #[test]
    fn test_recurring_window_bound(
        entry in entry_strategy().prop_filter("recurring", |e| e.recurring),
        target in month_strategy(),
    ) {
        let projected = occurs_in(&entry, &[], target);
        let in_window = entry.start_month() <= target
            && entry.end_month().is_none_or(|end| target <= end);
        prop_assert_eq!(projected, in_window);
    }

    /// An exclusion suppresses its own month and nothing else.
    #[test]
    fn test_exclusion_suppression_is_local(
        entry in entry_strategy().prop_filter("recurring", |e| e.recurring),
        excluded in month_strategy(),
        other in month_strategy(),
    ) {
        let exclusions = vec![Exclusion::new(entry.id, excluded)];
        prop_assert!(!occurs_in(&entry, &exclusions, excluded));
        if other != excluded {
            prop_assert_eq!(occurs_in(&entry, &exclusions, other), occurs_in(&entry, &[], other));
        }
    }

    /// Projecting twice yields identical output, in entry order.
    #[test]
    fn test_projection_is_idempotent_and_ordered(
        entries in prop::collection::vec(entry_strategy(), 0..20),
        target in month_strategy(),
    ) {
        let first = project(&entries, &[], target);
        let second = project(&entries, &[], target);
        prop_assert_eq!(&first, &second);

        let positions: Vec<usize> = first
            .iter()
            .map(|o| entries.iter().position(|e| e.id == o.entry_id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(first.iter().all(|o| o.month == target && target.contains(o.date)));
    }

    /// The indexed projector and the single-entry rule agree.
    #[test]
    fn test_projector_matches_occurs_in(
        entries in prop::collection::vec(entry_strategy(), 1..10),
        excluded in prop::collection::vec(month_strategy(), 0..5),
        target in month_strategy(),
    ) {
        let exclusions: Vec<Exclusion> = excluded
            .iter()
            .map(|month| Exclusion::new(entries[0].id, *month))
            .collect();
        let projector = Projector::new(&exclusions);
        for entry in &entries {
            prop_assert_eq!(projector.occurs(entry, target), occurs_in(entry, &exclusions, target));
        }
    }
}

#[test]
fn test_scenario_exclusion_skips_single_month() {
    let entry = NewEntry::monthly(EntryKind::Expense, "Rent", dec!(100), date(2024, 1, 1))
        .into_entry(EntryId::new());
    let exclusions = vec![Exclusion::new(entry.id, ym(2024, 3))];
    let entries = vec![entry];

    let projected: Vec<YearMonth> = YearMonth::range_inclusive(ym(2023, 12), ym(2024, 5))
        .into_iter()
        .filter(|month| !project(&entries, &exclusions, *month).is_empty())
        .collect();

    assert_eq!(
        projected,
        vec![ym(2024, 1), ym(2024, 2), ym(2024, 4), ym(2024, 5)]
    );
}

#[test]
fn test_scenario_same_month_start_and_end_projects_once() {
    let entry = NewEntry::monthly(EntryKind::Income, "Gig", dec!(80), date(2024, 6, 10))
        .until(date(2024, 6, 30))
        .into_entry(EntryId::new());
    let entries = vec![entry];

    let count: usize = YearMonth::range_inclusive(ym(2024, 1), ym(2024, 12))
        .into_iter()
        .map(|month| project(&entries, &[], month).len())
        .sum();
    assert_eq!(count, 1);
}

#[test]
fn test_scenario_no_horizon_limit() {
    let entry = NewEntry::monthly(EntryKind::Expense, "Insurance", dec!(45), date(2024, 1, 1))
        .into_entry(EntryId::new());
    let projected = project(&[entry], &[], ym(2124, 1));
    assert_eq!(projected.len(), 1);
    assert_eq!(projected[0].amount, dec!(45));
}
