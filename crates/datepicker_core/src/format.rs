//! Injected formatting and theming collaborators.
//!
//! The picker never renders a date string or a class name itself: labels go through a
//! [`DateFormatter`] and element roles through a [`ClassResolver`] supplied by the host.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Native pattern for year cells.
pub const NATIVE_YEAR: &str = "%Y";
/// Native pattern for month cells.
pub const NATIVE_MONTH_SHORT: &str = "%b";
/// Native pattern for day cells.
pub const NATIVE_DAY: &str = "%-d";
/// Native pattern for weekday column headers.
pub const NATIVE_WEEKDAY_SHORT: &str = "%a";
/// Native pattern for the day-view header.
pub const NATIVE_MONTH_YEAR: &str = "%B %Y";

/// Locale-aware date formatting and parsing.
pub trait DateFormatter {
    /// Formats `date` with a user-facing pattern.
    fn format(&self, date: NaiveDate, pattern: &str) -> String;
    /// Parses `text` with `pattern`; `None` when it does not name a date.
    fn parse(&self, text: &str, pattern: &str) -> Option<NaiveDate>;
    /// Formats `date` with one of the `NATIVE_*` patterns.
    fn format_native(&self, date: NaiveDate, native_pattern: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// English `strftime` formatter backed by chrono.
pub struct ChronoFormatter;

impl DateFormatter for ChronoFormatter {
    fn format(&self, date: NaiveDate, pattern: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(pattern)).is_err() {
            out.clear();
        }
        out
    }

    fn parse(&self, text: &str, pattern: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), pattern).ok()
    }

    fn format_native(&self, date: NaiveDate, native_pattern: &str) -> String {
        self.format(date, native_pattern)
    }
}

/// Returns `true` when `pattern` is a usable `strftime` string.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Every element role the picker asks a [`ClassResolver`] about.
pub const ELEMENT_ROLES: &[&str] = &[
    "view",
    "navigator",
    "navigatorViewButton",
    "navigatorLabel",
    "navigatorPrevButton",
    "navigatorNextButton",
    "navigatorTodayButton",
    "calendarWrapper",
    "calendarHeaderWrapper",
    "calendarHeaderWeekDay",
    "calendarDaysWrapper",
    "calendarDaysDayWrapper",
    "monthWrapper",
    "yearWrapper",
    "year",
    "selectedYear",
    "activeYear",
    "inRangeFirstYear",
    "inRangeLastYear",
    "inRangeYear",
    "month",
    "selectedMonth",
    "activeMonth",
    "inRangeFirstMonth",
    "inRangeLastMonth",
    "inRangeMonth",
    "day",
    "selectedDay",
    "activeDay",
    "inRangeFirstDay",
    "inRangeLastDay",
    "inRangeDay",
    "disabledDay",
    "highlightedDay",
    "otherMonthDay",
    "emptyDay",
];

/// Maps an element role to the rendering layer's class value.
pub trait ClassResolver {
    /// Class value for `role`; `role` is always one of [`ELEMENT_ROLES`].
    fn element_class(&self, role: &str) -> String;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Theme table with `ui-datepicker-<role>` fallbacks for roles the table omits.
pub struct ClassTable {
    /// Role name to class value overrides.
    pub classes: BTreeMap<String, String>,
}

impl ClassTable {
    /// Parses a JSON theme object, dropping keys that are not known roles.
    pub fn from_json_str(raw: &str) -> Result<Self, crate::config::ConfigError> {
        let mut table: Self = serde_json::from_str(raw)
            .map_err(|err| crate::config::ConfigError::Json(err.to_string()))?;
        table.classes.retain(|role, _| {
            let known = ELEMENT_ROLES.contains(&role.as_str());
            if !known {
                leptos::logging::warn!("datepicker theme ignores unknown role `{role}`");
            }
            known
        });
        Ok(table)
    }
}

impl ClassResolver for ClassTable {
    fn element_class(&self, role: &str) -> String {
        self.classes
            .get(role)
            .cloned()
            .unwrap_or_else(|| default_class(role))
    }
}

fn default_class(role: &str) -> String {
    let mut class = String::from("ui-datepicker-");
    for ch in role.chars() {
        if ch.is_ascii_uppercase() {
            class.push('-');
            class.push(ch.to_ascii_lowercase());
        } else {
            class.push(ch);
        }
    }
    class
}
