//! Range and multi-date selection tracking.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::{unit_cmp, DateValue, ViewMode};

/// Applies a terminal pick to a range value.
///
/// A missing `from` or an already complete pair starts a new range at `picked`; otherwise
/// `picked` becomes the second endpoint, swapped into non-decreasing order when needed.
pub fn push_range_endpoint(value: &DateValue, picked: NaiveDate) -> DateValue {
    match value.range_endpoints() {
        Some((Some(from), None)) => DateValue::range(from, picked),
        _ => DateValue::Range {
            from: Some(picked),
            to: None,
        },
    }
}

/// Toggles `picked` in a multi-date value, keeping the list sorted.
pub fn toggle_multiple(value: &DateValue, picked: NaiveDate) -> DateValue {
    let mut dates = value.dates();
    dates.sort_unstable();
    dates.dedup();
    match dates.binary_search(&picked) {
        Ok(index) => {
            dates.remove(index);
        }
        Err(index) => dates.insert(index, picked),
    }
    if dates.is_empty() {
        DateValue::Empty
    } else {
        DateValue::Multiple(dates)
    }
}

/// Strictly between both endpoints; always `false` for a partial range.
pub fn is_in_range(value: &DateValue, unit: NaiveDate, granularity: ViewMode) -> bool {
    match value.range_endpoints() {
        Some((Some(from), Some(to))) => {
            unit_cmp(unit, from, granularity) == Ordering::Greater
                && unit_cmp(unit, to, granularity) == Ordering::Less
        }
        _ => false,
    }
}

pub fn is_first_of_range(value: &DateValue, unit: NaiveDate, granularity: ViewMode) -> bool {
    matches!(
        value.range_endpoints(),
        Some((Some(from), _)) if unit_cmp(unit, from, granularity) == Ordering::Equal
    )
}

pub fn is_last_of_range(value: &DateValue, unit: NaiveDate, granularity: ViewMode) -> bool {
    matches!(
        value.range_endpoints(),
        Some((_, Some(to))) if unit_cmp(unit, to, granularity) == Ordering::Equal
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn picks_walk_through_start_complete_restart() {
        let first = push_range_endpoint(&DateValue::Empty, ymd(2024, 1, 15));
        assert_eq!(
            first,
            DateValue::Range {
                from: Some(ymd(2024, 1, 15)),
                to: None
            }
        );

        let complete = push_range_endpoint(&first, ymd(2024, 1, 10));
        assert_eq!(complete, DateValue::range(ymd(2024, 1, 10), ymd(2024, 1, 15)));
        assert_eq!(
            complete.range_endpoints(),
            Some((Some(ymd(2024, 1, 10)), Some(ymd(2024, 1, 15))))
        );

        let restarted = push_range_endpoint(&complete, ymd(2024, 2, 1));
        assert_eq!(
            restarted,
            DateValue::Range {
                from: Some(ymd(2024, 2, 1)),
                to: None
            }
        );
    }

    #[test]
    fn missing_from_starts_a_new_range() {
        let orphan = DateValue::Range {
            from: None,
            to: Some(ymd(2024, 5, 5)),
        };
        assert_eq!(
            push_range_endpoint(&orphan, ymd(2024, 5, 1)),
            DateValue::Range {
                from: Some(ymd(2024, 5, 1)),
                to: None
            }
        );
    }

    #[test]
    fn complete_range_predicates_exclude_endpoints_from_in_range() {
        let value = DateValue::range(ymd(2024, 1, 10), ymd(2024, 1, 15));
        assert!(is_in_range(&value, ymd(2024, 1, 12), ViewMode::Day));
        assert!(!is_in_range(&value, ymd(2024, 1, 10), ViewMode::Day));
        assert!(!is_in_range(&value, ymd(2024, 1, 15), ViewMode::Day));
        assert!(is_first_of_range(&value, ymd(2024, 1, 10), ViewMode::Day));
        assert!(is_last_of_range(&value, ymd(2024, 1, 15), ViewMode::Day));
    }

    #[test]
    fn partial_range_never_reports_in_range() {
        let value = DateValue::Range {
            from: Some(ymd(2024, 1, 10)),
            to: None,
        };
        let mut day = ymd(2023, 12, 1);
        while day < ymd(2024, 3, 1) {
            assert!(!is_in_range(&value, day, ViewMode::Day));
            assert!(!is_last_of_range(&value, day, ViewMode::Day));
            assert_eq!(
                is_first_of_range(&value, day, ViewMode::Day),
                day == ymd(2024, 1, 10)
            );
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn range_predicates_compare_at_the_cell_granularity() {
        let value = DateValue::range(ymd(2020, 6, 1), ymd(2023, 2, 1));
        assert!(is_first_of_range(&value, ymd(2020, 1, 1), ViewMode::Year));
        assert!(is_in_range(&value, ymd(2021, 1, 1), ViewMode::Year));
        assert!(is_last_of_range(&value, ymd(2023, 1, 1), ViewMode::Year));
        assert!(!is_in_range(&value, ymd(2023, 1, 1), ViewMode::Year));
        assert!(is_in_range(&value, ymd(2020, 7, 1), ViewMode::Month));
    }

    #[test]
    fn multiple_selection_toggles_sorted_membership() {
        let value = toggle_multiple(&DateValue::Empty, ymd(2024, 3, 5));
        let value = toggle_multiple(&value, ymd(2024, 3, 1));
        assert_eq!(
            value,
            DateValue::Multiple(vec![ymd(2024, 3, 1), ymd(2024, 3, 5)])
        );
        let value = toggle_multiple(&value, ymd(2024, 3, 5));
        let value = toggle_multiple(&value, ymd(2024, 3, 1));
        assert_eq!(value, DateValue::Empty);
    }
}
