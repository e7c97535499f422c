//! Header requests: paging, granularity switches, and jumping to today.
//!
//! Every cursor move is checked against `minDate`/`maxDate`; a move that would leave the
//! bounds resolves to `None` and the caller treats it as a no-op.

use chrono::{Datelike, NaiveDate};

use crate::config::DatepickerProps;
use crate::format::{NATIVE_MONTH_YEAR, NATIVE_YEAR};
use crate::grid::{window_span, year_window_start};
use crate::model::{shift_months, unit_end, unit_start, DatepickerState, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Requests a navigation header can make.
pub enum NavigatorRequest {
    /// Move one page in the mounted view.
    Page(PageDirection),
    /// Mount a specific granularity.
    SwitchView(ViewMode),
    /// Zoom out one level (wrapping Year back to Day).
    CycleView,
    /// Move both cursors to the supplied current date.
    Today(NaiveDate),
}

/// Months moved by one page of `view`, or `None` if the step is not representable.
pub fn page_step_months(view: ViewMode, years_per_view: u32) -> Option<i32> {
    match view {
        ViewMode::Day => Some(1),
        ViewMode::Month => Some(12),
        ViewMode::Year => window_span(years_per_view).checked_mul(12),
    }
}

/// First and last day visible on the page of `view` anchored at `anchor`.
pub fn page_span(
    anchor: NaiveDate,
    view: ViewMode,
    years_per_view: u32,
) -> (NaiveDate, NaiveDate) {
    match view {
        ViewMode::Day | ViewMode::Month => {
            let unit = page_unit(view);
            (unit_start(anchor, unit), unit_end(anchor, unit))
        }
        ViewMode::Year => {
            let start_year = year_window_start(anchor.year(), years_per_view);
            let end_year = start_year.saturating_add(window_span(years_per_view) - 1);
            let start = NaiveDate::from_ymd_opt(start_year, 1, 1).unwrap_or(anchor);
            let end = NaiveDate::from_ymd_opt(end_year, 12, 31).unwrap_or(anchor);
            (start, end)
        }
    }
}

/// Unit spanned by one page: a day page shows a month, a month page a year.
fn page_unit(view: ViewMode) -> ViewMode {
    match view {
        ViewMode::Day => ViewMode::Month,
        ViewMode::Month | ViewMode::Year => ViewMode::Year,
    }
}

/// Cursor after paging, pulled inside the bounds, or `None` when the target page lies wholly
/// outside them.
pub fn page_target(
    state: &DatepickerState,
    props: &DatepickerProps,
    direction: PageDirection,
) -> Option<NaiveDate> {
    let view = state.current_view?;
    let step = page_step_months(view, props.config.years_per_view)?;
    let delta = match direction {
        PageDirection::Previous => -step,
        PageDirection::Next => step,
    };
    let target = shift_months(state.cursor.active_month, delta)?;
    let (start, end) = page_span(target, view, props.config.years_per_view);
    props
        .constraints
        .allows_span(start, end)
        .then(|| props.constraints.clamp(target))
}

/// Whether the header should enable its previous/next button.
pub fn can_page(state: &DatepickerState, props: &DatepickerProps, direction: PageDirection) -> bool {
    page_target(state, props, direction).is_some()
}

/// `today`, unless it falls outside the bounds.
pub fn today_target(props: &DatepickerProps, today: NaiveDate) -> Option<NaiveDate> {
    (!props.constraints.is_out_of_bounds(today, ViewMode::Day)).then_some(today)
}

/// Header text for the mounted view.
pub fn header_label(state: &DatepickerState, props: &DatepickerProps) -> String {
    let anchor = state.cursor.active_month;
    let formatter = props.formatter.as_ref();
    match state.current_view {
        None => String::new(),
        Some(ViewMode::Day) => formatter.format_native(anchor, NATIVE_MONTH_YEAR),
        Some(ViewMode::Month) => formatter.format_native(anchor, NATIVE_YEAR),
        Some(ViewMode::Year) => {
            let (start, end) = page_span(anchor, ViewMode::Year, props.config.years_per_view);
            format!(
                "{} - {}",
                formatter.format_native(start, NATIVE_YEAR),
                formatter.format_native(end, NATIVE_YEAR)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::DatepickerConfig;
    use crate::constraint::DateConstraints;
    use crate::model::{ActiveCursor, DateValue};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bounded(min: Option<NaiveDate>, max: Option<NaiveDate>) -> DatepickerProps {
        DatepickerProps::new(
            DatepickerConfig::default(),
            DateConstraints {
                min_date: min,
                max_date: max,
                ..DateConstraints::default()
            },
        )
    }

    fn state(view: ViewMode, cursor: NaiveDate) -> DatepickerState {
        DatepickerState {
            value: DateValue::Empty,
            cursor: ActiveCursor::at(cursor),
            current_view: Some(view),
        }
    }

    #[test]
    fn next_month_past_max_is_refused() {
        let props = bounded(None, Some(ymd(2024, 12, 31)));
        let december = state(ViewMode::Day, ymd(2024, 12, 1));
        assert_eq!(page_target(&december, &props, PageDirection::Next), None);
        assert_eq!(
            page_target(&december, &props, PageDirection::Previous),
            Some(ymd(2024, 11, 1))
        );
    }

    #[test]
    fn partially_visible_pages_stay_reachable() {
        let props = bounded(Some(ymd(2024, 1, 20)), None);
        let february = state(ViewMode::Day, ymd(2024, 2, 10));
        assert_eq!(
            page_target(&february, &props, PageDirection::Previous),
            Some(ymd(2024, 1, 20))
        );
        let january = state(ViewMode::Day, ymd(2024, 1, 10));
        assert!(!can_page(&january, &props, PageDirection::Previous));
    }

    #[test]
    fn paging_steps_scale_with_the_view() {
        let props = DatepickerProps::default();
        let months = state(ViewMode::Month, ymd(2024, 3, 31));
        assert_eq!(
            page_target(&months, &props, PageDirection::Next),
            Some(ymd(2025, 3, 31))
        );
        let years = state(ViewMode::Year, ymd(2024, 2, 29));
        assert_eq!(
            page_target(&years, &props, PageDirection::Previous),
            Some(ymd(2012, 2, 29))
        );
        assert_eq!(
            page_target(&years, &props, PageDirection::Next),
            Some(ymd(2036, 2, 29))
        );
    }

    #[test]
    fn oversized_year_windows_do_not_overflow() {
        let mut props = DatepickerProps::default();
        props.config.years_per_view = 300_000_000;
        assert_eq!(page_step_months(ViewMode::Year, u32::MAX), Some(1200));
        let years = state(ViewMode::Year, ymd(2024, 5, 1));
        assert_eq!(
            page_target(&years, &props, PageDirection::Next),
            Some(ymd(2124, 5, 1))
        );
    }

    #[test]
    fn year_paging_respects_window_bounds() {
        let props = bounded(Some(ymd(2010, 6, 1)), Some(ymd(2030, 1, 1)));
        let years = state(ViewMode::Year, ymd(2024, 5, 1));
        // 2004-2015 overlaps the minimum; 2028-2039 overlaps the maximum.
        assert!(can_page(&years, &props, PageDirection::Previous));
        assert!(can_page(&years, &props, PageDirection::Next));
        let early = state(ViewMode::Year, ymd(2005, 5, 1));
        assert!(!can_page(&early, &props, PageDirection::Previous));
    }

    #[test]
    fn today_is_refused_outside_bounds() {
        let props = bounded(Some(ymd(2024, 1, 1)), Some(ymd(2024, 12, 31)));
        assert_eq!(today_target(&props, ymd(2024, 6, 1)), Some(ymd(2024, 6, 1)));
        assert_eq!(today_target(&props, ymd(2026, 10, 19)), None);
    }

    #[test]
    fn header_labels_per_view() {
        let props = DatepickerProps::default();
        assert_eq!(header_label(&state(ViewMode::Day, ymd(2024, 3, 1)), &props), "March 2024");
        assert_eq!(header_label(&state(ViewMode::Month, ymd(2024, 3, 1)), &props), "2024");
        assert_eq!(
            header_label(&state(ViewMode::Year, ymd(2024, 3, 1)), &props),
            "2016 - 2027"
        );
    }

    #[test]
    fn paging_without_a_mounted_view_is_refused() {
        let mut unmounted = state(ViewMode::Day, ymd(2024, 3, 1));
        unmounted.current_view = None;
        assert_eq!(
            page_target(&unmounted, &DatepickerProps::default(), PageDirection::Next),
            None
        );
    }
}
