//! Reducer actions, emitted events, and transition logic for the date picker view state.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::config::DatepickerProps;
use crate::model::{
    first_of_month, last_of_month, shift_months, unit_start, with_year, with_year_month,
    ActiveCursor, DateValue, DatepickerState, SelectionMode, ViewMode,
};
use crate::navigator::{page_target, today_target, NavigatorRequest};
use crate::range::{push_range_endpoint, toggle_multiple};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_datepicker`] to mutate [`DatepickerState`].
pub enum DatepickerAction {
    /// One-way sync of the host's `value` prop.
    SyncValue(DateValue),
    /// One-way sync of the host's `activeDate` prop.
    SyncActiveDate(NaiveDate),
    /// One-way sync of the host's `activeMonth` prop.
    SyncActiveMonth(NaiveDate),
    /// One-way sync of the host's `currentView` prop; `None` unmounts every grid.
    SyncView(Option<ViewMode>),
    /// A request from the navigation header.
    Navigate(NavigatorRequest),
    /// A cell click in the mounted grid.
    Pick(NaiveDate),
    /// Return to the configured initial view.
    ResetView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Events emitted by [`reduce_datepicker`] for the host to consume.
pub enum DatepickerEvent {
    /// A committed pick (`input`).
    Input(DateValue),
    /// The cursor moved without committing (`input-active-date`).
    InputActiveDate(NaiveDate),
    /// The mounted granularity changed (`update-view`).
    UpdateView(ViewMode),
    /// Collapse back to the default view after a terminal commit (`reset-view`).
    ResetView,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply to the current state.
pub enum DatepickerError {
    /// A pick arrived while no grid is mounted.
    #[error("no calendar view is mounted")]
    NoMountedView,
    /// The picked unit is outside the bounds or matches `disabledDates`.
    #[error("date {0} is disabled")]
    DateDisabled(NaiveDate),
    /// Cursor arithmetic left chrono's representable range.
    #[error("date {0} cannot be moved into the picked unit")]
    Unrepresentable(NaiveDate),
}

/// Commit semantics for one granularity.
pub type PickHandler = fn(
    &mut DatepickerState,
    &DatepickerProps,
    NaiveDate,
) -> Result<Vec<DatepickerEvent>, DatepickerError>;

/// Selects the pick handler for `mode`. Picks at or below the `terminal` granularity commit;
/// coarser picks drill down one level.
pub fn handler_for(mode: ViewMode, terminal: ViewMode) -> PickHandler {
    match mode {
        _ if !mode.is_coarser_than(terminal) => commit_pick,
        ViewMode::Year => drill_into_months,
        ViewMode::Month => drill_into_days,
        ViewMode::Day => commit_pick,
    }
}

/// Applies a [`DatepickerAction`] and collects the resulting events.
///
/// # Errors
///
/// Returns [`DatepickerError`] when a pick targets a disabled unit or arrives with no grid
/// mounted. Out-of-bounds navigation is not an error; it yields no events.
pub fn reduce_datepicker(
    state: &mut DatepickerState,
    props: &DatepickerProps,
    action: DatepickerAction,
) -> Result<Vec<DatepickerEvent>, DatepickerError> {
    let mut events = Vec::new();
    match action {
        DatepickerAction::SyncValue(value) => {
            state.value = value;
        }
        DatepickerAction::SyncActiveDate(date) => {
            state.cursor.active_date = date;
        }
        DatepickerAction::SyncActiveMonth(date) => {
            state.cursor.active_month = date;
        }
        DatepickerAction::SyncView(view) => {
            state.current_view = view;
        }
        DatepickerAction::Navigate(request) => {
            events.extend(navigate(state, props, request));
        }
        DatepickerAction::Pick(date) => {
            let mode = state.current_view.ok_or(DatepickerError::NoMountedView)?;
            let unit = unit_start(date, mode);
            let formatter = props.formatter.as_ref();
            if props
                .constraints
                .is_disabled(unit, mode, formatter, &props.config.date_format)
            {
                return Err(DatepickerError::DateDisabled(date));
            }
            let handler = handler_for(mode, props.config.initial_view);
            events.extend(handler(state, props, unit)?);
        }
        DatepickerAction::ResetView => {
            state.current_view = Some(props.config.initial_view);
        }
    }
    Ok(events)
}

fn navigate(
    state: &mut DatepickerState,
    props: &DatepickerProps,
    request: NavigatorRequest,
) -> Vec<DatepickerEvent> {
    match request {
        NavigatorRequest::Page(direction) => match page_target(state, props, direction) {
            Some(target) => move_cursor(state, target),
            None => Vec::new(),
        },
        NavigatorRequest::SwitchView(view) => {
            state.current_view = Some(view);
            vec![DatepickerEvent::UpdateView(view)]
        }
        NavigatorRequest::CycleView => {
            let view = state
                .current_view
                .map_or(props.config.initial_view, ViewMode::zoomed_out);
            state.current_view = Some(view);
            vec![DatepickerEvent::UpdateView(view)]
        }
        NavigatorRequest::Today(today) => match today_target(props, today) {
            Some(target) => move_cursor(state, target),
            None => Vec::new(),
        },
    }
}

fn move_cursor(state: &mut DatepickerState, target: NaiveDate) -> Vec<DatepickerEvent> {
    state.cursor = ActiveCursor::at(target);
    vec![DatepickerEvent::InputActiveDate(target)]
}

fn drill_into_months(
    state: &mut DatepickerState,
    props: &DatepickerProps,
    year: NaiveDate,
) -> Result<Vec<DatepickerEvent>, DatepickerError> {
    let moved = with_year(state.cursor.active_date, year.year())
        .ok_or(DatepickerError::Unrepresentable(year))?;
    Ok(drill(state, props, moved, ViewMode::Month))
}

fn drill_into_days(
    state: &mut DatepickerState,
    props: &DatepickerProps,
    month: NaiveDate,
) -> Result<Vec<DatepickerEvent>, DatepickerError> {
    let moved = with_year_month(state.cursor.active_date, month)
        .ok_or(DatepickerError::Unrepresentable(month))?;
    Ok(drill(state, props, moved, ViewMode::Day))
}

fn drill(
    state: &mut DatepickerState,
    props: &DatepickerProps,
    moved: NaiveDate,
    narrower: ViewMode,
) -> Vec<DatepickerEvent> {
    let cursor = props.constraints.clamp(moved);
    state.cursor = ActiveCursor::at(cursor);
    state.current_view = Some(narrower);
    vec![
        DatepickerEvent::InputActiveDate(cursor),
        DatepickerEvent::UpdateView(narrower),
    ]
}

fn commit_pick(
    state: &mut DatepickerState,
    props: &DatepickerProps,
    picked: NaiveDate,
) -> Result<Vec<DatepickerEvent>, DatepickerError> {
    let value = match props.config.selection_mode() {
        SelectionMode::Single => DateValue::Single(picked),
        SelectionMode::Range => push_range_endpoint(&state.value, picked),
        SelectionMode::Multiple => toggle_multiple(&state.value, picked),
    };
    state.value = value.clone();
    state.cursor.active_date = picked;
    if !is_on_visible_pages(state.cursor.active_month, props, picked) {
        state.cursor.active_month = picked;
    }
    state.current_view = Some(props.config.initial_view);
    Ok(vec![DatepickerEvent::Input(value), DatepickerEvent::ResetView])
}

fn is_on_visible_pages(active_month: NaiveDate, props: &DatepickerProps, date: NaiveDate) -> bool {
    let first = first_of_month(active_month);
    let last = shift_months(first, props.config.month_pages() - 1).map_or(first, last_of_month);
    (first..=last).contains(&date)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::DatepickerConfig;
    use crate::constraint::{DateConstraint, DateConstraints};
    use crate::navigator::PageDirection;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn props_with(config: DatepickerConfig, constraints: DateConstraints) -> DatepickerProps {
        DatepickerProps::new(config, constraints)
    }

    fn mounted(view: ViewMode, cursor: NaiveDate, value: DateValue) -> DatepickerState {
        DatepickerState {
            value,
            cursor: ActiveCursor::at(cursor),
            current_view: Some(view),
        }
    }

    fn reduce(
        state: &mut DatepickerState,
        props: &DatepickerProps,
        action: DatepickerAction,
    ) -> Vec<DatepickerEvent> {
        reduce_datepicker(state, props, action).expect("reduce")
    }

    #[test]
    fn picking_a_year_drills_into_months_without_touching_value() {
        let props = DatepickerProps::default();
        let value = DateValue::Single(ymd(2024, 3, 10));
        let mut state = mounted(ViewMode::Year, ymd(2024, 3, 10), value.clone());

        let events = reduce(&mut state, &props, DatepickerAction::Pick(ymd(2019, 1, 1)));

        assert_eq!(state.current_view, Some(ViewMode::Month));
        assert_eq!(state.value, value);
        assert_eq!(state.cursor, ActiveCursor::at(ymd(2019, 3, 10)));
        assert_eq!(
            events,
            vec![
                DatepickerEvent::InputActiveDate(ymd(2019, 3, 10)),
                DatepickerEvent::UpdateView(ViewMode::Month),
            ]
        );
    }

    #[test]
    fn picking_a_month_drills_into_days() {
        let props = DatepickerProps::default();
        let mut state = mounted(ViewMode::Month, ymd(2024, 1, 31), DateValue::Empty);

        let events = reduce(&mut state, &props, DatepickerAction::Pick(ymd(2024, 2, 1)));

        assert_eq!(state.current_view, Some(ViewMode::Day));
        assert_eq!(state.cursor.active_month, ymd(2024, 2, 29));
        assert_eq!(events.last(), Some(&DatepickerEvent::UpdateView(ViewMode::Day)));
    }

    #[test]
    fn picking_a_day_emits_input_then_reset_view() {
        let props = DatepickerProps::default();
        let mut state = mounted(ViewMode::Day, ymd(2024, 3, 1), DateValue::Empty);

        let events = reduce(&mut state, &props, DatepickerAction::Pick(ymd(2024, 3, 14)));

        assert_eq!(
            events,
            vec![
                DatepickerEvent::Input(DateValue::Single(ymd(2024, 3, 14))),
                DatepickerEvent::ResetView,
            ]
        );
        assert_eq!(state.cursor.active_date, ymd(2024, 3, 14));
        assert_eq!(state.cursor.active_month, ymd(2024, 3, 1));
    }

    #[test]
    fn picking_an_adjacent_month_day_moves_the_page() {
        let props = DatepickerProps::default();
        let mut state = mounted(ViewMode::Day, ymd(2024, 3, 1), DateValue::Empty);
        reduce(&mut state, &props, DatepickerAction::Pick(ymd(2024, 2, 26)));
        assert_eq!(state.cursor.active_month, ymd(2024, 2, 26));
    }

    #[test]
    fn range_picks_fill_endpoints_in_order() {
        let props = props_with(
            DatepickerConfig {
                range: true,
                ..DatepickerConfig::default()
            },
            DateConstraints::default(),
        );
        let mut state = mounted(ViewMode::Day, ymd(2024, 1, 1), DateValue::Empty);

        reduce(&mut state, &props, DatepickerAction::Pick(ymd(2024, 1, 15)));
        let events = reduce(&mut state, &props, DatepickerAction::Pick(ymd(2024, 1, 10)));

        let expected = DateValue::range(ymd(2024, 1, 10), ymd(2024, 1, 15));
        assert_eq!(state.value, expected);
        assert_eq!(events[0], DatepickerEvent::Input(expected));
    }

    #[test]
    fn month_picker_commits_at_month_granularity() {
        let props = props_with(
            DatepickerConfig {
                initial_view: ViewMode::Month,
                ..DatepickerConfig::default()
            },
            DateConstraints::default(),
        );
        let mut state = mounted(ViewMode::Year, ymd(2024, 6, 15), DateValue::Empty);

        reduce(&mut state, &props, DatepickerAction::Pick(ymd(2022, 1, 1)));
        assert_eq!(state.current_view, Some(ViewMode::Month));

        let events = reduce(&mut state, &props, DatepickerAction::Pick(ymd(2022, 9, 20)));
        assert_eq!(
            events,
            vec![
                DatepickerEvent::Input(DateValue::Single(ymd(2022, 9, 1))),
                DatepickerEvent::ResetView,
            ]
        );
        assert_eq!(state.current_view, Some(ViewMode::Month));
    }

    #[test]
    fn handler_dispatch_follows_the_terminal_granularity() {
        let props = DatepickerProps::default();
        let view_after = |mode: ViewMode, terminal: ViewMode| {
            let mut state = mounted(mode, ymd(2024, 5, 5), DateValue::Empty);
            let events = handler_for(mode, terminal)(&mut state, &props, ymd(2020, 1, 1))
                .expect("handler");
            (state.current_view, events.len())
        };
        assert_eq!(view_after(ViewMode::Year, ViewMode::Day), (Some(ViewMode::Month), 2));
        assert_eq!(view_after(ViewMode::Month, ViewMode::Day), (Some(ViewMode::Day), 2));
        // Commits reset to the configured initial view (Day by default).
        assert_eq!(view_after(ViewMode::Year, ViewMode::Year), (Some(ViewMode::Day), 2));
        assert_eq!(view_after(ViewMode::Day, ViewMode::Year), (Some(ViewMode::Day), 2));
    }

    #[test]
    fn disabled_picks_are_rejected_without_events() {
        let props = props_with(
            DatepickerConfig::default(),
            DateConstraints {
                disabled_dates: Some(DateConstraint::Date(ymd(2024, 3, 5))),
                max_date: Some(ymd(2024, 12, 31)),
                ..DateConstraints::default()
            },
        );
        let mut state = mounted(ViewMode::Day, ymd(2024, 3, 1), DateValue::Empty);
        let before = state.clone();

        assert_eq!(
            reduce_datepicker(&mut state, &props, DatepickerAction::Pick(ymd(2024, 3, 5))),
            Err(DatepickerError::DateDisabled(ymd(2024, 3, 5)))
        );
        assert_eq!(state, before);

        state.current_view = Some(ViewMode::Year);
        assert_eq!(
            reduce_datepicker(&mut state, &props, DatepickerAction::Pick(ymd(2025, 1, 1))),
            Err(DatepickerError::DateDisabled(ymd(2025, 1, 1)))
        );
    }

    #[test]
    fn picks_without_a_mounted_view_fail() {
        let props = DatepickerProps::default();
        let mut state = mounted(ViewMode::Day, ymd(2024, 3, 1), DateValue::Empty);
        reduce(&mut state, &props, DatepickerAction::SyncView(None));
        assert_eq!(
            reduce_datepicker(&mut state, &props, DatepickerAction::Pick(ymd(2024, 3, 2))),
            Err(DatepickerError::NoMountedView)
        );
    }

    #[test]
    fn next_month_past_max_date_leaves_cursor_unchanged() {
        let props = props_with(
            DatepickerConfig::default(),
            DateConstraints {
                max_date: Some(ymd(2024, 12, 31)),
                ..DateConstraints::default()
            },
        );
        let mut state = mounted(ViewMode::Day, ymd(2024, 12, 1), DateValue::Empty);

        let events = reduce(
            &mut state,
            &props,
            DatepickerAction::Navigate(NavigatorRequest::Page(PageDirection::Next)),
        );

        assert!(events.is_empty());
        assert_eq!(state.cursor.active_month, ymd(2024, 12, 1));
    }

    #[test]
    fn paging_into_a_partly_bounded_month_clamps_the_cursor() {
        let props = props_with(
            DatepickerConfig::default(),
            DateConstraints {
                min_date: Some(ymd(2024, 1, 20)),
                ..DateConstraints::default()
            },
        );
        let mut state = mounted(ViewMode::Day, ymd(2024, 2, 10), DateValue::Empty);

        let events = reduce(
            &mut state,
            &props,
            DatepickerAction::Navigate(NavigatorRequest::Page(PageDirection::Previous)),
        );

        assert_eq!(state.cursor, ActiveCursor::at(ymd(2024, 1, 20)));
        assert_eq!(events, vec![DatepickerEvent::InputActiveDate(ymd(2024, 1, 20))]);
        let fmt = props.formatter.as_ref();
        assert!(!props.constraints.is_disabled(
            state.cursor.active_date,
            ViewMode::Day,
            fmt,
            &props.config.date_format
        ));
    }

    #[test]
    fn paging_moves_both_cursors_and_reports_the_cursor() {
        let props = DatepickerProps::default();
        let mut state = mounted(ViewMode::Day, ymd(2024, 1, 31), DateValue::Empty);
        let events = reduce(
            &mut state,
            &props,
            DatepickerAction::Navigate(NavigatorRequest::Page(PageDirection::Next)),
        );
        assert_eq!(state.cursor, ActiveCursor::at(ymd(2024, 2, 29)));
        assert_eq!(events, vec![DatepickerEvent::InputActiveDate(ymd(2024, 2, 29))]);
    }

    #[test]
    fn view_switches_emit_update_view() {
        let props = DatepickerProps::default();
        let mut state = mounted(ViewMode::Day, ymd(2024, 1, 1), DateValue::Empty);

        let events = reduce(
            &mut state,
            &props,
            DatepickerAction::Navigate(NavigatorRequest::CycleView),
        );
        assert_eq!(events, vec![DatepickerEvent::UpdateView(ViewMode::Month)]);

        reduce(
            &mut state,
            &props,
            DatepickerAction::Navigate(NavigatorRequest::SwitchView(ViewMode::Year)),
        );
        assert_eq!(state.current_view, Some(ViewMode::Year));

        reduce(&mut state, &props, DatepickerAction::ResetView);
        assert_eq!(state.current_view, Some(ViewMode::Day));
    }

    #[test]
    fn today_outside_bounds_is_a_no_op() {
        let props = props_with(
            DatepickerConfig::default(),
            DateConstraints {
                max_date: Some(ymd(2024, 12, 31)),
                ..DateConstraints::default()
            },
        );
        let mut state = mounted(ViewMode::Day, ymd(2024, 6, 1), DateValue::Empty);
        let events = reduce(
            &mut state,
            &props,
            DatepickerAction::Navigate(NavigatorRequest::Today(ymd(2026, 10, 19))),
        );
        assert!(events.is_empty());
        assert_eq!(state.cursor.active_date, ymd(2024, 6, 1));

        let events = reduce(
            &mut state,
            &props,
            DatepickerAction::Navigate(NavigatorRequest::Today(ymd(2024, 8, 8))),
        );
        assert_eq!(events, vec![DatepickerEvent::InputActiveDate(ymd(2024, 8, 8))]);
    }

    #[test]
    fn drilling_clamps_the_cursor_into_bounds() {
        let props = props_with(
            DatepickerConfig::default(),
            DateConstraints {
                min_date: Some(ymd(2024, 6, 10)),
                ..DateConstraints::default()
            },
        );
        let mut state = mounted(ViewMode::Year, ymd(2030, 1, 5), DateValue::Empty);
        reduce(&mut state, &props, DatepickerAction::Pick(ymd(2024, 1, 1)));
        assert_eq!(state.cursor.active_date, ymd(2024, 6, 10));
    }

    #[test]
    fn sync_actions_are_one_way_and_silent() {
        let props = DatepickerProps::default();
        let mut state = mounted(ViewMode::Day, ymd(2024, 1, 1), DateValue::Empty);
        let mut events = reduce(
            &mut state,
            &props,
            DatepickerAction::SyncValue(DateValue::Single(ymd(2024, 5, 5))),
        );
        events.extend(reduce(
            &mut state,
            &props,
            DatepickerAction::SyncActiveMonth(ymd(2024, 5, 1)),
        ));
        events.extend(reduce(
            &mut state,
            &props,
            DatepickerAction::SyncActiveDate(ymd(2024, 5, 5)),
        ));
        assert!(events.is_empty());
        assert_eq!(state.cursor.active_month, ymd(2024, 5, 1));
        assert_eq!(state.cursor.active_date, ymd(2024, 5, 5));
        assert_eq!(state.value, DateValue::Single(ymd(2024, 5, 5)));

        // Each cursor follows only its own prop.
        reduce(&mut state, &props, DatepickerAction::SyncActiveDate(ymd(2024, 9, 9)));
        assert_eq!(state.cursor.active_month, ymd(2024, 5, 1));
        reduce(&mut state, &props, DatepickerAction::SyncActiveMonth(ymd(2023, 2, 1)));
        assert_eq!(state.cursor.active_date, ymd(2024, 9, 9));
    }
}
