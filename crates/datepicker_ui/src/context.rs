//! Reducer container and context wiring for one picker instance.

use std::rc::Rc;

use chrono::NaiveDate;
use datepicker_core::{
    reduce_datepicker, time, CellContext, ClassResolver, ClassTable, DatepickerAction,
    DatepickerEvent, DatepickerProps, DatepickerState, DateValue, ViewMode,
};
use leptos::*;

#[derive(Clone, Copy)]
/// Leptos context for reading picker state and dispatching [`DatepickerAction`] values.
pub struct DatepickerContext {
    /// Config, constraints, and formatter the picker was mounted with.
    pub props: StoredValue<DatepickerProps>,
    /// Theme lookup for element roles.
    pub classes: StoredValue<Rc<dyn ClassResolver>>,
    /// Authoritative view state. Grids only read it.
    pub state: RwSignal<DatepickerState>,
    /// Events emitted by the most recent dispatch.
    pub events: RwSignal<Vec<DatepickerEvent>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DatepickerAction>,
}

impl DatepickerContext {
    /// Dispatches a reducer action through the context callback.
    pub fn dispatch_action(&self, action: DatepickerAction) {
        self.dispatch.call(action);
    }

    /// Resolved class for a single element role.
    pub fn class(&self, role: &str) -> String {
        self.classes.with_value(|classes| classes.element_class(role))
    }

    /// Resolved classes for a cell: its priority role followed by any modifiers.
    pub fn cell_class(&self, cell: &CellContext) -> String {
        self.classes
            .with_value(|classes| join_classes(classes.as_ref(), &cell.element_names()))
    }
}

pub(crate) fn join_classes(classes: &dyn ClassResolver, roles: &[&str]) -> String {
    roles
        .iter()
        .map(|role| classes.element_class(role))
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
/// Provides [`DatepickerContext`] to descendant components and keeps it in sync with host props.
pub fn DatepickerProvider(
    /// Config, constraints, and formatter for this picker.
    props: DatepickerProps,
    /// Committed value owned by the host; changes are copied into picker state.
    #[prop(optional, into)]
    value: MaybeSignal<DateValue>,
    /// Host-controlled focused date used for "active" highlighting.
    #[prop(optional, into)]
    active_date: Option<MaybeSignal<NaiveDate>>,
    /// Host-controlled page anchor; defaults to the mounted active date.
    #[prop(optional, into)]
    active_month: Option<MaybeSignal<NaiveDate>>,
    /// Host-controlled granularity. `None` inside the signal renders no grid.
    #[prop(optional, into)]
    current_view: Option<MaybeSignal<Option<ViewMode>>>,
    /// Theme lookup; defaults to the `ui-datepicker-*` class table.
    #[prop(optional)]
    classes: Option<Rc<dyn ClassResolver>>,
    /// Receives every emitted event in order.
    #[prop(optional)]
    on_event: Option<Callback<DatepickerEvent>>,
    children: Children,
) -> impl IntoView {
    let initial_view = props.config.initial_view;
    let mut mounted = DatepickerState::mount(
        value.get_untracked(),
        active_date.as_ref().map(|date| date.get_untracked()),
        current_view
            .as_ref()
            .map_or(Some(initial_view), |view| view.get_untracked()),
        time::today(),
    );
    if let Some(active_month) = active_month.as_ref() {
        mounted.cursor.active_month = active_month.get_untracked();
    }

    let props = store_value(props);
    let classes = store_value(classes.unwrap_or_else(|| Rc::new(ClassTable::default())));
    let state = create_rw_signal(mounted);
    let events = create_rw_signal(Vec::<DatepickerEvent>::new());

    let dispatch = Callback::new(move |action: DatepickerAction| {
        let mut next = state.get_untracked();
        let previous = next.clone();

        match props.with_value(|props| reduce_datepicker(&mut next, props, action)) {
            Ok(new_events) => {
                if next != previous {
                    state.set(next);
                }
                if let Some(on_event) = on_event {
                    for event in &new_events {
                        on_event.call(event.clone());
                    }
                }
                if !new_events.is_empty() || !events.with_untracked(Vec::is_empty) {
                    events.set(new_events);
                }
            }
            Err(err) => logging::warn!("datepicker reducer error: {err}"),
        }
    });

    create_effect(move |_| {
        dispatch.call(DatepickerAction::SyncValue(value.get()));
    });
    if let Some(active_date) = active_date {
        create_effect(move |_| {
            dispatch.call(DatepickerAction::SyncActiveDate(active_date.get()));
        });
    }
    if let Some(active_month) = active_month {
        create_effect(move |_| {
            dispatch.call(DatepickerAction::SyncActiveMonth(active_month.get()));
        });
    }
    if let Some(current_view) = current_view {
        create_effect(move |_| {
            dispatch.call(DatepickerAction::SyncView(current_view.get()));
        });
    }

    provide_context(DatepickerContext {
        props,
        classes,
        state,
        events,
        dispatch,
    });

    children().into_view()
}

/// Returns the current [`DatepickerContext`].
///
/// # Panics
///
/// Panics if called outside [`DatepickerProvider`].
pub fn use_datepicker() -> DatepickerContext {
    use_context::<DatepickerContext>().expect("DatepickerContext not provided")
}
