//! Date constraints: bounds plus the polymorphic disabled/highlighted conditions.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;
use regex::Regex;

use crate::format::DateFormatter;
use crate::model::{unit_cmp, ViewMode};

/// Host-supplied condition over a calendar date.
pub type DatePredicate = Rc<dyn Fn(NaiveDate) -> bool>;

#[derive(Clone)]
/// One disabled/highlighted condition. Every form resolves through [`DateConstraint::resolve`].
pub enum DateConstraint {
    /// Matches exactly one date.
    Date(NaiveDate),
    /// Matches any listed date.
    Dates(Vec<NaiveDate>),
    /// Delegates to a host predicate. Panics inside the predicate reach the host untouched.
    Predicate(DatePredicate),
    /// Glob (`*`, `?`) matched against the date rendered in the storage format.
    Pattern(DatePattern),
    /// Matches when any nested condition matches.
    Any(Vec<DateConstraint>),
}

impl DateConstraint {
    /// Wraps a closure as a [`DateConstraint::Predicate`].
    pub fn predicate(check: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(check))
    }

    /// Returns `true` when `candidate` satisfies the condition.
    pub fn resolve(
        &self,
        candidate: NaiveDate,
        formatter: &dyn DateFormatter,
        date_format: &str,
    ) -> bool {
        match self {
            Self::Date(date) => *date == candidate,
            Self::Dates(dates) => dates.contains(&candidate),
            Self::Predicate(check) => check(candidate),
            Self::Pattern(pattern) => pattern.is_match(&formatter.format(candidate, date_format)),
            Self::Any(conditions) => conditions
                .iter()
                .any(|condition| condition.resolve(candidate, formatter, date_format)),
        }
    }
}

impl fmt::Debug for DateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => f.debug_tuple("Date").field(date).finish(),
            Self::Dates(dates) => f.debug_tuple("Dates").field(dates).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::Any(conditions) => f.debug_tuple("Any").field(conditions).finish(),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Bounds and conditions evaluated for every visible cell.
pub struct DateConstraints {
    /// Inclusive lower bound.
    pub min_date: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub max_date: Option<NaiveDate>,
    /// Days that cannot be picked.
    pub disabled_dates: Option<DateConstraint>,
    /// Days rendered with the highlight modifier.
    pub highlight_dates: Option<DateConstraint>,
}

impl DateConstraints {
    /// Returns `true` when the unit containing `unit` lies wholly outside `[min_date, max_date]`.
    pub fn is_out_of_bounds(&self, unit: NaiveDate, granularity: ViewMode) -> bool {
        let before_min = self
            .min_date
            .is_some_and(|min| unit_cmp(unit, min, granularity) == Ordering::Less);
        let after_max = self
            .max_date
            .is_some_and(|max| unit_cmp(unit, max, granularity) == Ordering::Greater);
        before_min || after_max
    }

    /// Returns `true` when any day of `[start, end]` is within bounds.
    pub fn allows_span(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let ends_before_min = self.min_date.is_some_and(|min| end < min);
        let starts_after_max = self.max_date.is_some_and(|max| start > max);
        !(ends_before_min || starts_after_max)
    }

    /// Pulls `date` inside the bounds.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let date = self.min_date.map_or(date, |min| date.max(min));
        self.max_date.map_or(date, |max| date.min(max))
    }

    /// Bounds apply at every granularity; `disabled_dates` only to days.
    pub fn is_disabled(
        &self,
        unit: NaiveDate,
        granularity: ViewMode,
        formatter: &dyn DateFormatter,
        date_format: &str,
    ) -> bool {
        if self.is_out_of_bounds(unit, granularity) {
            return true;
        }
        granularity == ViewMode::Day
            && self
                .disabled_dates
                .as_ref()
                .is_some_and(|condition| condition.resolve(unit, formatter, date_format))
    }

    pub fn is_highlighted(
        &self,
        unit: NaiveDate,
        granularity: ViewMode,
        formatter: &dyn DateFormatter,
        date_format: &str,
    ) -> bool {
        granularity == ViewMode::Day
            && self
                .highlight_dates
                .as_ref()
                .is_some_and(|condition| condition.resolve(unit, formatter, date_format))
    }
}

/// Returns `true` for patterns carrying glob wildcards.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

#[derive(Clone, Debug)]
/// Glob over the storage-format rendering of a date, compiled once.
pub struct DatePattern {
    source: String,
    matcher: Regex,
}

impl DatePattern {
    /// Compiles `glob`; `*` matches any run of characters, `?` exactly one, everything else
    /// literally.
    pub fn new(glob: &str) -> Result<Self, regex::Error> {
        let mut expr = String::from("(?s)^");
        for ch in glob.chars() {
            match ch {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                literal => expr.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4]))),
            }
        }
        expr.push('$');
        Ok(Self {
            source: glob.to_string(),
            matcher: Regex::new(&expr)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}
