//! Per-cell classification shared by the year, month, and day grids.
//!
//! Every grid calls [`classify`] with the unit it is about to render. The resulting flags are
//! reduced to one [`CellRole`] by a fixed priority:
//! first endpoint, last endpoint, in range, selected, active, then the plain role.
//! Disabled and highlighted are modifiers layered on top of the role, never part of the order.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::DatepickerProps;
use crate::model::{same_unit, DateValue, SelectionMode, ViewMode};
use crate::range::{is_first_of_range, is_in_range, is_last_of_range};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Boolean display flags for one cell.
pub struct Classification {
    pub is_first_of_range: bool,
    pub is_last_of_range: bool,
    pub is_in_range: bool,
    pub is_selected: bool,
    pub is_active: bool,
    pub is_disabled: bool,
    pub is_highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Single styling role emitted for a cell.
pub enum CellRole {
    FirstOfRange,
    LastOfRange,
    InRange,
    Selected,
    Active,
    Plain,
}

impl Classification {
    /// Reduces the flags to one role; first match wins.
    pub fn role(&self) -> CellRole {
        if self.is_first_of_range {
            CellRole::FirstOfRange
        } else if self.is_last_of_range {
            CellRole::LastOfRange
        } else if self.is_in_range {
            CellRole::InRange
        } else if self.is_selected {
            CellRole::Selected
        } else if self.is_active {
            CellRole::Active
        } else {
            CellRole::Plain
        }
    }
}

impl CellRole {
    /// Element role name handed to the class resolver.
    pub fn element_name(self, granularity: ViewMode) -> &'static str {
        match (granularity, self) {
            (ViewMode::Year, Self::FirstOfRange) => "inRangeFirstYear",
            (ViewMode::Year, Self::LastOfRange) => "inRangeLastYear",
            (ViewMode::Year, Self::InRange) => "inRangeYear",
            (ViewMode::Year, Self::Selected) => "selectedYear",
            (ViewMode::Year, Self::Active) => "activeYear",
            (ViewMode::Year, Self::Plain) => "year",
            (ViewMode::Month, Self::FirstOfRange) => "inRangeFirstMonth",
            (ViewMode::Month, Self::LastOfRange) => "inRangeLastMonth",
            (ViewMode::Month, Self::InRange) => "inRangeMonth",
            (ViewMode::Month, Self::Selected) => "selectedMonth",
            (ViewMode::Month, Self::Active) => "activeMonth",
            (ViewMode::Month, Self::Plain) => "month",
            (ViewMode::Day, Self::FirstOfRange) => "inRangeFirstDay",
            (ViewMode::Day, Self::LastOfRange) => "inRangeLastDay",
            (ViewMode::Day, Self::InRange) => "inRangeDay",
            (ViewMode::Day, Self::Selected) => "selectedDay",
            (ViewMode::Day, Self::Active) => "activeDay",
            (ViewMode::Day, Self::Plain) => "day",
        }
    }
}

/// Classifies `unit` (already truncated to `granularity`) against the value, cursor, and
/// constraints. Each constraint is resolved at most once per call.
pub fn classify(
    unit: NaiveDate,
    granularity: ViewMode,
    value: &DateValue,
    active_date: NaiveDate,
    props: &DatepickerProps,
) -> Classification {
    let config = &props.config;
    let formatter = props.formatter.as_ref();
    let range_mode = config.selection_mode() == SelectionMode::Range;

    Classification {
        is_first_of_range: range_mode && is_first_of_range(value, unit, granularity),
        is_last_of_range: range_mode && is_last_of_range(value, unit, granularity),
        is_in_range: range_mode && is_in_range(value, unit, granularity),
        is_selected: value
            .dates()
            .into_iter()
            .any(|date| same_unit(unit, date, granularity)),
        is_active: config.show_active_date && same_unit(unit, active_date, granularity),
        is_disabled: props.constraints.is_disabled(
            unit,
            granularity,
            formatter,
            &config.date_format,
        ),
        is_highlighted: props.constraints.is_highlighted(
            unit,
            granularity,
            formatter,
            &config.date_format,
        ),
    }
}
