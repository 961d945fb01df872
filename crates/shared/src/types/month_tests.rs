use super::month::*;
use chrono::NaiveDate;
use rstest::rstest;

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[rstest]
#[case("03-2024", 2024, 3)]
#[case("3-2024", 2024, 3)]
#[case("2024-03", 2024, 3)]
#[case("2024-3", 2024, 3)]
#[case("2024-03-01", 2024, 3)]
#[case("2024-03-31", 2024, 3)]
#[case("2024-03-15T10:30:00Z", 2024, 3)]
#[case("  12-1999 ", 1999, 12)]
fn test_parse_accepted_formats(#[case] input: &str, #[case] year: i32, #[case] month: u32) {
    assert_eq!(YearMonth::parse(input).unwrap(), ym(year, month));
}

#[rstest]
#[case("")]
#[case("2024")]
#[case("march 2024")]
#[case("2024/03")]
#[case("2024-03-xx")]
#[case("123-2024")]
fn test_parse_rejects_unrecognized(#[case] input: &str) {
    assert!(matches!(
        YearMonth::parse(input),
        Err(MonthKeyError::Unrecognized(_))
    ));
}

#[test]
fn test_parse_rejects_month_out_of_range() {
    assert_eq!(
        YearMonth::parse("13-2024"),
        Err(MonthKeyError::InvalidMonth(13))
    );
    assert_eq!(YearMonth::new(2024, 0), Err(MonthKeyError::InvalidMonth(0)));
}

#[test]
fn test_edge_keys() {
    let month = ym(2024, 3);
    assert_eq!(month.to_month_year_key(), "03-2024");
    assert_eq!(month.to_iso_key(), "2024-03-01");
    assert_eq!(month.to_string(), "2024-03");
}

#[test]
fn test_both_edge_formats_normalize_to_same_month() {
    let a = YearMonth::parse("07-2025").unwrap();
    let b = YearMonth::parse("2025-07-01").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_first_and_last_day() {
    assert_eq!(ym(2024, 2).first_day(), date(2024, 2, 1));
    assert_eq!(ym(2024, 2).last_day(), date(2024, 2, 29));
    assert_eq!(ym(2023, 2).last_day(), date(2023, 2, 28));
    assert_eq!(ym(2024, 12).last_day(), date(2024, 12, 31));
}

#[test]
fn test_contains_ignores_day() {
    let month = ym(2024, 1);
    assert!(month.contains(date(2024, 1, 1)));
    assert!(month.contains(date(2024, 1, 31)));
    assert!(!month.contains(date(2024, 2, 1)));
    assert!(!month.contains(date(2023, 1, 15)));
}

#[test]
fn test_with_day_clamped() {
    assert_eq!(ym(2024, 2).with_day_clamped(31), date(2024, 2, 29));
    assert_eq!(ym(2024, 4).with_day_clamped(15), date(2024, 4, 15));
    assert_eq!(ym(2024, 4).with_day_clamped(0), date(2024, 4, 1));
}

#[test]
fn test_add_months_crosses_year_boundaries() {
    assert_eq!(ym(2024, 12).succ(), ym(2025, 1));
    assert_eq!(ym(2024, 1).pred(), ym(2023, 12));
    assert_eq!(ym(2024, 5).add_months(-17), ym(2022, 12));
    assert_eq!(ym(2024, 5).add_months(20), ym(2026, 1));
}

#[test]
fn test_ordering_is_chronological() {
    assert!(ym(2023, 12) < ym(2024, 1));
    assert!(ym(2024, 2) > ym(2024, 1));
    assert_eq!(ym(2023, 11).months_until(ym(2024, 2)), 3);
    assert_eq!(ym(2024, 2).months_until(ym(2023, 11)), -3);
}

#[test]
fn test_window_ending_is_oldest_first() {
    let window = YearMonth::window_ending(ym(2024, 2), 4);
    assert_eq!(window, vec![ym(2023, 11), ym(2023, 12), ym(2024, 1), ym(2024, 2)]);
    assert!(YearMonth::window_ending(ym(2024, 2), 0).is_empty());
}

#[test]
fn test_range_inclusive() {
    let range = YearMonth::range_inclusive(ym(2024, 11), ym(2025, 1));
    assert_eq!(range, vec![ym(2024, 11), ym(2024, 12), ym(2025, 1)]);
    assert!(YearMonth::range_inclusive(ym(2025, 1), ym(2024, 1)).is_empty());
}

#[test]
fn test_serde_uses_canonical_key_and_accepts_edge_formats() {
    let json = serde_json::to_string(&ym(2024, 3)).unwrap();
    assert_eq!(json, "\"2024-03\"");

    let parsed: YearMonth = serde_json::from_str("\"03-2024\"").unwrap();
    assert_eq!(parsed, ym(2024, 3));

    let bad: Result<YearMonth, _> = serde_json::from_str("\"soon\"");
    assert!(bad.is_err());
}
