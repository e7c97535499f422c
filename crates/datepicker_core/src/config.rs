//! Typed picker configuration and host prop loading.
//!
//! `DatepickerConfig` handles only deserialization and defaults; [`DatepickerConfig::validate`]
//! owns the semantic checks. [`load_host_props`] turns a host JSON payload into validated props,
//! a tolerant [`DateValue`], and constraint conditions.

use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constraint::{is_glob, DateConstraint, DateConstraints, DatePattern};
use crate::format::{is_valid_pattern, ChronoFormatter, DateFormatter};
use crate::model::{DateValue, SelectionMode, ViewMode};

pub const DEFAULT_YEARS_PER_VIEW: u32 = 12;
/// Largest accepted `yearsPerView`.
pub const MAX_YEARS_PER_VIEW: u32 = 100;
/// Largest accepted `monthsPerView`.
pub const MAX_MONTHS_PER_VIEW: u32 = 12;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_USER_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Host configuration errors.
pub enum ConfigError {
    /// `weekStart` outside 0 (Sunday) through 6 (Saturday).
    #[error("week start must be between 0 and 6, got {0}")]
    InvalidWeekStart(u8),
    /// `yearsPerView` or `monthsPerView` set to zero.
    #[error("{0} must be at least 1")]
    ZeroPerView(&'static str),
    /// `yearsPerView` or `monthsPerView` above its ceiling.
    #[error("{field} must be at most {max}, got {value}")]
    TooManyPerView {
        /// Offending config field.
        field: &'static str,
        /// Accepted ceiling.
        max: u32,
        /// Rejected value.
        value: u32,
    },
    /// A format string chrono cannot render.
    #[error("invalid {field} pattern `{pattern}`")]
    InvalidPattern {
        /// Offending config field.
        field: &'static str,
        /// Rejected pattern.
        pattern: String,
    },
    /// View name outside year/month/day.
    #[error("unknown calendar view `{0}`")]
    UnknownView(String),
    /// Payload is not valid JSON for the expected shape.
    #[error("invalid datepicker props: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Picker options that survive serialization.
pub struct DatepickerConfig {
    /// First weekday column, 0 = Sunday.
    pub week_start: u8,
    pub years_per_view: u32,
    pub months_per_view: u32,
    /// Reset target of `reset-view` and the granularity at which picks commit.
    pub initial_view: ViewMode,
    pub range: bool,
    /// Ignored when `range` is set.
    pub multiple: bool,
    pub show_active_date: bool,
    pub show_days_for_other_month: bool,
    /// Storage/parse format for values and `data-date`.
    pub date_format: String,
    /// Human-facing format for aria labels.
    pub user_format: String,
}

impl Default for DatepickerConfig {
    fn default() -> Self {
        Self {
            week_start: 0,
            years_per_view: DEFAULT_YEARS_PER_VIEW,
            months_per_view: 1,
            initial_view: ViewMode::Day,
            range: false,
            multiple: false,
            show_active_date: false,
            show_days_for_other_month: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            user_format: DEFAULT_USER_FORMAT.to_string(),
        }
    }
}

impl DatepickerConfig {
    /// Parses and validates a JSON config object.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Json(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.week_start > 6 {
            return Err(ConfigError::InvalidWeekStart(self.week_start));
        }
        for (field, value, max) in [
            ("yearsPerView", self.years_per_view, MAX_YEARS_PER_VIEW),
            ("monthsPerView", self.months_per_view, MAX_MONTHS_PER_VIEW),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroPerView(field));
            }
            if value > max {
                return Err(ConfigError::TooManyPerView { field, max, value });
            }
        }
        for (field, pattern) in [
            ("dateFormat", &self.date_format),
            ("userFormat", &self.user_format),
        ] {
            if !is_valid_pattern(pattern) {
                return Err(ConfigError::InvalidPattern {
                    field,
                    pattern: pattern.clone(),
                });
            }
        }
        Ok(())
    }

    /// Day-view month pages, held within `1..=MAX_MONTHS_PER_VIEW` even for unvalidated configs.
    pub fn month_pages(&self) -> i32 {
        i32::try_from(self.months_per_view.clamp(1, MAX_MONTHS_PER_VIEW)).unwrap_or(1)
    }

    pub fn selection_mode(&self) -> SelectionMode {
        if self.range {
            SelectionMode::Range
        } else if self.multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }
}

#[derive(Clone)]
/// Everything the host passes down besides the value and cursors.
pub struct DatepickerProps {
    pub config: DatepickerConfig,
    pub constraints: DateConstraints,
    pub formatter: Rc<dyn DateFormatter>,
}

impl DatepickerProps {
    pub fn new(config: DatepickerConfig, constraints: DateConstraints) -> Self {
        Self {
            config,
            constraints,
            formatter: Rc::new(ChronoFormatter),
        }
    }

    /// Replaces the default chrono formatter.
    pub fn with_formatter(mut self, formatter: Rc<dyn DateFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Parses `raw` with the storage format.
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        self.formatter.parse(raw, &self.config.date_format)
    }
}

impl Default for DatepickerProps {
    fn default() -> Self {
        Self::new(DatepickerConfig::default(), DateConstraints::default())
    }
}

impl std::fmt::Debug for DatepickerProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatepickerProps")
            .field("config", &self.config)
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawHostProps {
    #[serde(flatten)]
    config: DatepickerConfig,
    value: Value,
    active_date: Option<String>,
    current_view: Option<String>,
    min_date: Option<String>,
    max_date: Option<String>,
    disabled_dates: Value,
    highlight_dates: Value,
}

#[derive(Debug)]
/// Host props after parsing, ready to mount a picker.
pub struct LoadedProps {
    pub props: DatepickerProps,
    pub value: DateValue,
    pub active_date: Option<NaiveDate>,
    /// `None` when the host named an unknown view; nothing is rendered then.
    pub current_view: Option<ViewMode>,
}

/// Parses a host JSON payload with `formatter`.
///
/// Malformed values and constraint entries are dropped with a warning rather than rejected;
/// only config violations fail the load.
pub fn load_host_props(
    raw: &str,
    formatter: Rc<dyn DateFormatter>,
) -> Result<LoadedProps, ConfigError> {
    let raw: RawHostProps =
        serde_json::from_str(raw).map_err(|err| ConfigError::Json(err.to_string()))?;
    raw.config.validate()?;

    let date_format = raw.config.date_format.clone();
    let parse = |field: &str, text: Option<&String>| {
        let text = text?;
        let parsed = formatter.parse(text, &date_format);
        if parsed.is_none() {
            leptos::logging::warn!("datepicker {field} `{text}` is not a date; ignoring");
        }
        parsed
    };
    let min_date = parse("minDate", raw.min_date.as_ref());
    let max_date = parse("maxDate", raw.max_date.as_ref());
    let active_date = parse("activeDate", raw.active_date.as_ref());

    let current_view = match raw.current_view.as_deref() {
        None => Some(raw.config.initial_view),
        Some(name) => match name.parse::<ViewMode>() {
            Ok(view) => Some(view),
            Err(err) => {
                leptos::logging::warn!("{err}; rendering no calendar grid");
                None
            }
        },
    };

    let value = value_from_json(
        &raw.value,
        raw.config.selection_mode(),
        formatter.as_ref(),
        &date_format,
    );
    let constraints = DateConstraints {
        min_date,
        max_date,
        disabled_dates: constraint_from_json(&raw.disabled_dates, formatter.as_ref(), &date_format),
        highlight_dates: constraint_from_json(
            &raw.highlight_dates,
            formatter.as_ref(),
            &date_format,
        ),
    };

    Ok(LoadedProps {
        props: DatepickerProps {
            config: raw.config,
            constraints,
            formatter,
        },
        value,
        active_date,
        current_view,
    })
}

/// Reads a host value tolerantly.
///
/// Range mode consults only the first two array entries; entries that are not date strings
/// are ignored in every mode.
pub fn value_from_json(
    raw: &Value,
    mode: SelectionMode,
    formatter: &dyn DateFormatter,
    date_format: &str,
) -> DateValue {
    let entry = |item: &Value| match item {
        Value::String(text) => formatter.parse(text, date_format),
        Value::Null => None,
        other => {
            leptos::logging::warn!("datepicker value entry {other} is not a date; ignoring");
            None
        }
    };

    match (raw, mode) {
        (Value::Array(items), SelectionMode::Range) => {
            let mut endpoints = items.iter().take(2).map(entry);
            let from = endpoints.next().flatten();
            let to = endpoints.next().flatten();
            match (from, to) {
                (Some(from), Some(to)) => DateValue::range(from, to),
                (from, to) => DateValue::Range { from, to },
            }
        }
        (Value::Array(items), SelectionMode::Multiple) => {
            let mut dates: Vec<NaiveDate> = items.iter().filter_map(entry).collect();
            dates.sort_unstable();
            dates.dedup();
            if dates.is_empty() {
                DateValue::Empty
            } else {
                DateValue::Multiple(dates)
            }
        }
        (Value::Array(items), SelectionMode::Single) => items
            .iter()
            .find_map(entry)
            .map_or(DateValue::Empty, DateValue::Single),
        (single, SelectionMode::Range) => match entry(single) {
            Some(from) => DateValue::Range {
                from: Some(from),
                to: None,
            },
            None => DateValue::Empty,
        },
        (single, SelectionMode::Multiple) => {
            entry(single).map_or(DateValue::Empty, |date| DateValue::Multiple(vec![date]))
        }
        (single, SelectionMode::Single) => {
            entry(single).map_or(DateValue::Empty, DateValue::Single)
        }
    }
}

/// Reads a disabled/highlighted condition.
///
/// Strings become exact dates when they parse, glob patterns otherwise; arrays become
/// [`DateConstraint::Dates`] when every entry is a date and [`DateConstraint::Any`] when mixed.
/// Predicates cannot travel through JSON and are attached in code.
pub fn constraint_from_json(
    raw: &Value,
    formatter: &dyn DateFormatter,
    date_format: &str,
) -> Option<DateConstraint> {
    match raw {
        Value::Null => None,
        Value::String(text) if is_glob(text) => pattern_constraint(text),
        Value::String(text) => match formatter.parse(text, date_format) {
            Some(date) => Some(DateConstraint::Date(date)),
            None => pattern_constraint(text),
        },
        Value::Array(items) => {
            let conditions: Vec<DateConstraint> = items
                .iter()
                .filter_map(|item| constraint_from_json(item, formatter, date_format))
                .collect();
            let dates: Vec<NaiveDate> = conditions
                .iter()
                .filter_map(|condition| match condition {
                    DateConstraint::Date(date) => Some(*date),
                    _ => None,
                })
                .collect();
            if conditions.is_empty() {
                None
            } else if dates.len() == conditions.len() {
                Some(DateConstraint::Dates(dates))
            } else {
                Some(DateConstraint::Any(conditions))
            }
        }
        other => {
            leptos::logging::warn!("datepicker constraint {other} is not supported; ignoring");
            None
        }
    }
}

fn pattern_constraint(text: &str) -> Option<DateConstraint> {
    match DatePattern::new(text) {
        Ok(pattern) => Some(DateConstraint::Pattern(pattern)),
        Err(err) => {
            leptos::logging::warn!("datepicker pattern `{text}` is unusable: {err}; ignoring");
            None
        }
    }
}
