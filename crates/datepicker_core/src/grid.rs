//! Year, month, and day enumerators plus the classified render model.
//!
//! Enumerators are pure functions of their anchor and layout options; they never touch cursors.
//! [`render_view`] picks the single grid for the mounted view and classifies each cell once.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::classify::{classify, CellRole, Classification};
use crate::config::{DatepickerProps, MAX_YEARS_PER_VIEW};
use crate::format::{NATIVE_DAY, NATIVE_MONTH_SHORT, NATIVE_WEEKDAY_SHORT, NATIVE_YEAR};
use crate::model::{
    days_in_month, first_of_month, shift_days, shift_months, DatepickerState, ViewMode,
};

pub const DAYS_PER_WEEK: u32 = 7;

/// Years in one window, held within `1..=MAX_YEARS_PER_VIEW`.
pub fn window_span(years_per_view: u32) -> i32 {
    i32::try_from(years_per_view.clamp(1, MAX_YEARS_PER_VIEW)).unwrap_or(1)
}

/// First year of the window containing `year`.
pub fn year_window_start(year: i32, years_per_view: u32) -> i32 {
    year - year.rem_euclid(window_span(years_per_view))
}

/// January 1st of each year in the window containing `anchor`.
pub fn year_window(anchor: NaiveDate, years_per_view: u32) -> Vec<NaiveDate> {
    let start = year_window_start(anchor.year(), years_per_view);
    (0..window_span(years_per_view))
        .filter_map(|offset| NaiveDate::from_ymd_opt(start.checked_add(offset)?, 1, 1))
        .collect()
}

/// First day of each month in `anchor`'s year.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(anchor.year(), month, 1))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// One position in the 7-column day layout.
pub enum DaySlot {
    /// A day of the page's month.
    Current(NaiveDate),
    /// A neighbouring month's day shown to fill the week.
    Adjacent(NaiveDate),
    /// An unfilled position.
    Blank,
}

impl DaySlot {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Current(date) | Self::Adjacent(date) => Some(date),
            Self::Blank => None,
        }
    }
}

/// Columns between the week start and the first of the month.
pub fn leading_offset(first: NaiveDate, week_start: u8) -> u32 {
    (first.weekday().num_days_from_sunday() + DAYS_PER_WEEK - u32::from(week_start % 7))
        % DAYS_PER_WEEK
}

/// Day layout for the month containing `anchor`.
///
/// Rows are `ceil((days_in_month + leading_offset) / 7)`. Leading and trailing positions hold
/// adjacent-month days when `show_other_month` is set, blanks otherwise.
pub fn day_grid(anchor: NaiveDate, week_start: u8, show_other_month: bool) -> Vec<DaySlot> {
    let first = first_of_month(anchor);
    let leading = leading_offset(first, week_start);
    let rows = (days_in_month(first) + leading).div_ceil(DAYS_PER_WEEK);

    (0..rows * DAYS_PER_WEEK)
        .map(|position| {
            let offset = i64::from(position) - i64::from(leading);
            match shift_days(first, offset) {
                Some(date) if date.month() == first.month() && date.year() == first.year() => {
                    DaySlot::Current(date)
                }
                Some(date) if show_other_month => DaySlot::Adjacent(date),
                _ => DaySlot::Blank,
            }
        })
        .collect()
}

/// Weekday header labels starting at `week_start`.
pub fn weekday_labels(props: &DatepickerProps) -> Vec<String> {
    // 2023-01-01 was a Sunday.
    let Some(sunday) = NaiveDate::from_ymd_opt(2023, 1, 1) else {
        return Vec::new();
    };
    (0..DAYS_PER_WEEK)
        .filter_map(|column| {
            let offset = (u32::from(props.config.week_start) + column) % DAYS_PER_WEEK;
            shift_days(sunday, i64::from(offset))
        })
        .map(|date| props.formatter.format_native(date, NATIVE_WEEKDAY_SHORT))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Everything a per-cell override needs, supplied whether or not an override is installed.
pub struct CellContext {
    pub date: NaiveDate,
    pub granularity: ViewMode,
    /// Visible label (`formatNative`).
    pub label: String,
    pub aria_label: String,
    /// Storage-format date for `data-date`.
    pub data_date: String,
    pub flags: Classification,
    pub role: CellRole,
    pub is_other_month: bool,
}

impl CellContext {
    fn build(
        date: NaiveDate,
        granularity: ViewMode,
        is_other_month: bool,
        state: &DatepickerState,
        props: &DatepickerProps,
    ) -> Self {
        let formatter = props.formatter.as_ref();
        let flags = classify(
            date,
            granularity,
            &state.value,
            state.cursor.active_date,
            props,
        );
        let label = match granularity {
            ViewMode::Year => formatter.format_native(date, NATIVE_YEAR),
            ViewMode::Month => formatter.format_native(date, NATIVE_MONTH_SHORT),
            ViewMode::Day => formatter.format_native(date, NATIVE_DAY),
        };
        let aria_label = match granularity {
            ViewMode::Day => formatter.format(date, &props.config.user_format),
            ViewMode::Year | ViewMode::Month => label.clone(),
        };
        Self {
            date,
            granularity,
            label,
            aria_label,
            data_date: formatter.format(date, &props.config.date_format),
            flags,
            role: flags.role(),
            is_other_month,
        }
    }

    /// Role names for the class resolver: the priority role, then any modifiers.
    pub fn element_names(&self) -> Vec<&'static str> {
        let mut names = vec![self.role.element_name(self.granularity)];
        if self.granularity == ViewMode::Day {
            if self.is_other_month {
                names.push("otherMonthDay");
            }
            if self.flags.is_disabled {
                names.push("disabledDay");
            }
            if self.flags.is_highlighted {
                names.push("highlightedDay");
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderedSlot {
    Cell(CellContext),
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One month page of the day view.
pub struct DayPage {
    pub month: NaiveDate,
    pub month_index: usize,
    pub is_first_month: bool,
    pub is_last_month: bool,
    pub show_month_name: bool,
    pub weekdays: Vec<String>,
    /// Week rows of exactly seven slots.
    pub rows: Vec<Vec<RenderedSlot>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// The single grid mounted for the current view.
pub enum ViewGrid {
    /// No valid view is selected.
    Empty,
    Years(Vec<CellContext>),
    Months(Vec<CellContext>),
    Days(Vec<DayPage>),
}

/// Enumerates and classifies the grid for `state.current_view`.
pub fn render_view(state: &DatepickerState, props: &DatepickerProps) -> ViewGrid {
    let anchor = state.cursor.active_month;
    match state.current_view {
        None => ViewGrid::Empty,
        Some(ViewMode::Year) => ViewGrid::Years(
            year_window(anchor, props.config.years_per_view)
                .into_iter()
                .map(|year| CellContext::build(year, ViewMode::Year, false, state, props))
                .collect(),
        ),
        Some(ViewMode::Month) => ViewGrid::Months(
            month_grid(anchor)
                .into_iter()
                .map(|month| CellContext::build(month, ViewMode::Month, false, state, props))
                .collect(),
        ),
        Some(ViewMode::Day) => ViewGrid::Days(day_pages(state, props)),
    }
}

fn day_pages(state: &DatepickerState, props: &DatepickerProps) -> Vec<DayPage> {
    let config = &props.config;
    let pages = config.month_pages();
    let weekdays = weekday_labels(props);

    (0..pages)
        .filter_map(|offset| {
            let month_index = usize::try_from(offset).ok()?;
            let month = first_of_month(shift_months(state.cursor.active_month, offset)?);
            let slots = day_grid(month, config.week_start, config.show_days_for_other_month);
            let rows = slots
                .chunks(DAYS_PER_WEEK as usize)
                .map(|week| {
                    week.iter()
                        .map(|slot| match *slot {
                            DaySlot::Current(date) => RenderedSlot::Cell(CellContext::build(
                                date,
                                ViewMode::Day,
                                false,
                                state,
                                props,
                            )),
                            DaySlot::Adjacent(date) => RenderedSlot::Cell(CellContext::build(
                                date,
                                ViewMode::Day,
                                true,
                                state,
                                props,
                            )),
                            DaySlot::Blank => RenderedSlot::Blank,
                        })
                        .collect()
                })
                .collect();
            Some(DayPage {
                month,
                month_index,
                is_first_month: offset == 0,
                is_last_month: offset + 1 == pages,
                show_month_name: pages > 1,
                weekdays: weekdays.clone(),
                rows,
            })
        })
        .collect()
}
