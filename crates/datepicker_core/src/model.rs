//! Calendar granularities, selection values, and cursor state for the date picker.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Calendar zoom level. Exactly one is mounted per render.
pub enum ViewMode {
    /// A window of `years_per_view` years.
    Year,
    /// The twelve months of one year.
    Month,
    /// One or more month pages of days.
    Day,
}

impl ViewMode {
    /// Stable lowercase name used in host props and events.
    pub fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }

    /// Granularity reached by clicking the navigator label (Day -> Month -> Year -> Day).
    pub fn zoomed_out(self) -> Self {
        match self {
            Self::Day => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::Day,
        }
    }

    /// Returns `true` when `self` shows larger units than `other`.
    pub fn is_coarser_than(self, other: Self) -> bool {
        self.rank() < other.rank()
    }

    fn rank(self) -> u8 {
        match self {
            Self::Year => 0,
            Self::Month => 1,
            Self::Day => 2,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            _ => Err(ConfigError::UnknownView(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// How a terminal pick updates the committed value.
pub enum SelectionMode {
    /// The pick replaces the value.
    Single,
    /// The pick fills the next endpoint of a `[from, to]` pair.
    Range,
    /// The pick toggles membership in a list of discrete dates.
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
/// Committed selection passed down from the host.
pub enum DateValue {
    /// Nothing selected.
    #[default]
    Empty,
    /// One calendar date.
    Single(NaiveDate),
    /// A possibly partial range. Committed ranges always satisfy `from <= to`.
    Range {
        /// First endpoint.
        from: Option<NaiveDate>,
        /// Last endpoint, absent while the user is mid-selection.
        to: Option<NaiveDate>,
    },
    /// Discrete dates, kept sorted and de-duplicated.
    Multiple(Vec<NaiveDate>),
}

impl DateValue {
    /// Builds a range value, swapping endpoints so the pair is non-decreasing.
    pub fn range(from: NaiveDate, to: NaiveDate) -> Self {
        let (from, to) = if to < from { (to, from) } else { (from, to) };
        Self::Range {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Range endpoints in canonical order, or `None` when the value is not a range.
    pub fn range_endpoints(&self) -> Option<(Option<NaiveDate>, Option<NaiveDate>)> {
        match *self {
            Self::Range {
                from: Some(from),
                to: Some(to),
            } if to < from => Some((Some(to), Some(from))),
            Self::Range { from, to } => Some((from, to)),
            _ => None,
        }
    }

    /// Every date the value currently names, in value order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(date) => vec![*date],
            Self::Range { from, to } => from.iter().chain(to.iter()).copied().collect(),
            Self::Multiple(dates) => dates.clone(),
        }
    }

    /// First named date; used to seed cursors on mount.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates().into_iter().next()
    }

    /// Returns `true` when nothing is left to pick (a range needs both endpoints).
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Range { from, to } => from.is_some() && to.is_some(),
            Self::Multiple(dates) => !dates.is_empty(),
            Self::Single(_) => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Navigation cursors, independent of the committed value.
pub struct ActiveCursor {
    /// Anchors which month, year, or year window is visible.
    pub active_month: NaiveDate,
    /// Focused date used for "active" highlighting.
    pub active_date: NaiveDate,
}

impl ActiveCursor {
    /// Both cursors pointing at one date.
    pub fn at(date: NaiveDate) -> Self {
        Self {
            active_month: date,
            active_date: date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Authoritative view state owned by the picker. Grids only ever read it.
pub struct DatepickerState {
    /// Committed value as last synced from the host or committed by a pick.
    pub value: DateValue,
    /// Navigation cursors.
    pub cursor: ActiveCursor,
    /// Mounted granularity; `None` renders no grid.
    pub current_view: Option<ViewMode>,
}

impl DatepickerState {
    /// Seeds state on mount: the explicit active date wins, then the value, then `today`.
    pub fn mount(
        value: DateValue,
        active_date: Option<NaiveDate>,
        current_view: Option<ViewMode>,
        today: NaiveDate,
    ) -> Self {
        let anchor = active_date.or_else(|| value.first_date()).unwrap_or(today);
        Self {
            value,
            cursor: ActiveCursor::at(anchor),
            current_view,
        }
    }
}

/// Orders two dates at the given granularity, ignoring finer fields.
pub fn unit_cmp(a: NaiveDate, b: NaiveDate, granularity: ViewMode) -> Ordering {
    match granularity {
        ViewMode::Year => a.year().cmp(&b.year()),
        ViewMode::Month => (a.year(), a.month()).cmp(&(b.year(), b.month())),
        ViewMode::Day => a.cmp(&b),
    }
}

/// Returns `true` when both dates fall in the same unit.
pub fn same_unit(a: NaiveDate, b: NaiveDate, granularity: ViewMode) -> bool {
    unit_cmp(a, b, granularity) == Ordering::Equal
}

/// First day of the unit containing `date`.
pub fn unit_start(date: NaiveDate, granularity: ViewMode) -> NaiveDate {
    match granularity {
        ViewMode::Year => date.with_ordinal(1).unwrap_or(date),
        ViewMode::Month => first_of_month(date),
        ViewMode::Day => date,
    }
}

/// Last day of the unit containing `date`.
pub fn unit_end(date: NaiveDate, granularity: ViewMode) -> NaiveDate {
    match granularity {
        ViewMode::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
        ViewMode::Month => last_of_month(date),
        ViewMode::Day => date,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

/// Moves by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    }
}

pub fn shift_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    }
}

/// Keeps month and day of `date` while moving it into `year` (Feb 29 clamps to Feb 28).
pub fn with_year(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    shift_months(date, (year - date.year()).checked_mul(12)?)
}

/// Keeps the day of `date` while moving it into the month containing `month`.
pub fn with_year_month(date: NaiveDate, month: NaiveDate) -> Option<NaiveDate> {
    let delta = (month.year() - date.year()) * 12 + month.month() as i32 - date.month() as i32;
    shift_months(date, delta)
}
