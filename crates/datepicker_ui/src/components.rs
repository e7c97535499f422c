//! Navigator, view switcher, and the year, month, and day grids.

use datepicker_core::format::NATIVE_MONTH_YEAR;
use datepicker_core::{
    can_page, header_label, render_view, time, CellContext, DatepickerAction, DayPage,
    NavigatorRequest, PageDirection, RenderedSlot, ViewGrid, ViewMode,
};
use leptos::*;

use crate::context::use_datepicker;

/// Per-cell override. Receives the full cell context and returns the cell's content.
pub type CellRenderer = Callback<CellContext, View>;

fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn view_token(view: Option<ViewMode>) -> &'static str {
    view.map_or("none", ViewMode::name)
}

fn grid_token(grid: &ViewGrid) -> &'static str {
    match grid {
        ViewGrid::Empty => "none",
        ViewGrid::Years(_) => "years",
        ViewGrid::Months(_) => "months",
        ViewGrid::Days(_) => "days",
    }
}

fn cell_content(cell: CellContext, render_cell: Option<CellRenderer>) -> View {
    match render_cell {
        Some(render_cell) => render_cell.call(cell),
        None => cell.label.into_view(),
    }
}

#[component]
/// Mounts the navigator and exactly one grid for the current view.
pub fn DatepickerView(
    /// Override for year cells.
    #[prop(optional)]
    year_cell: Option<CellRenderer>,
    /// Override for month cells.
    #[prop(optional)]
    month_cell: Option<CellRenderer>,
    /// Override for day cells.
    #[prop(optional)]
    day_cell: Option<CellRenderer>,
) -> impl IntoView {
    let picker = use_datepicker();
    let grid = create_memo(move |_| {
        picker
            .props
            .with_value(|props| picker.state.with(|state| render_view(state, props)))
    });

    view! {
        <div
            class=picker.class("view")
            data-ui-kind="datepicker"
            data-ui-view=move || picker.state.with(|state| view_token(state.current_view))
            data-ui-grid=move || grid.with(grid_token)
        >
            <DatepickerNavigator />
            {move || match grid.get() {
                ViewGrid::Empty => ().into_view(),
                ViewGrid::Years(cells) => {
                    view! { <YearGrid cells render_cell=year_cell /> }.into_view()
                }
                ViewGrid::Months(cells) => {
                    view! { <MonthGrid cells render_cell=month_cell /> }.into_view()
                }
                ViewGrid::Days(pages) => {
                    view! { <DayGrid pages render_cell=day_cell /> }.into_view()
                }
            }}
        </div>
    }
}

#[component]
/// Header with previous/next paging, the zoom-out label, and a jump-to-today button.
pub fn DatepickerNavigator() -> impl IntoView {
    let picker = use_datepicker();
    let blocked = move |direction| {
        picker
            .props
            .with_value(|props| picker.state.with(|state| !can_page(state, props, direction)))
    };
    let label = move || {
        picker
            .props
            .with_value(|props| picker.state.with(|state| header_label(state, props)))
    };
    let navigate = move |request| picker.dispatch_action(DatepickerAction::Navigate(request));

    view! {
        <div class=picker.class("navigator") data-ui-kind="datepicker-navigator">
            <button
                type="button"
                class=picker.class("navigatorPrevButton")
                aria-label="Previous"
                data-ui-slot="prev"
                disabled=move || blocked(PageDirection::Previous)
                on:click=move |_| navigate(NavigatorRequest::Page(PageDirection::Previous))
            >
                "‹"
            </button>
            <button
                type="button"
                class=picker.class("navigatorViewButton")
                data-ui-slot="view"
                on:click=move |_| navigate(NavigatorRequest::CycleView)
            >
                <span class=picker.class("navigatorLabel")>{label}</span>
            </button>
            <button
                type="button"
                class=picker.class("navigatorNextButton")
                aria-label="Next"
                data-ui-slot="next"
                disabled=move || blocked(PageDirection::Next)
                on:click=move |_| navigate(NavigatorRequest::Page(PageDirection::Next))
            >
                "›"
            </button>
            <button
                type="button"
                class=picker.class("navigatorTodayButton")
                data-ui-slot="today"
                on:click=move |_| navigate(NavigatorRequest::Today(time::today()))
            >
                "Today"
            </button>
        </div>
    }
}

#[component]
/// Year window grid.
pub fn YearGrid(
    /// Classified year cells, one per year in the window.
    cells: Vec<CellContext>,
    /// Optional per-cell override.
    #[prop(default = None)]
    render_cell: Option<CellRenderer>,
) -> impl IntoView {
    let picker = use_datepicker();
    view! {
        <div class=picker.class("yearWrapper") role="grid" data-ui-kind="datepicker-years">
            {cells
                .into_iter()
                .map(|cell| view! { <CalendarCell cell render_cell /> })
                .collect_view()}
        </div>
    }
}

#[component]
/// Twelve-month grid for the visible year.
pub fn MonthGrid(
    /// Classified month cells, January through December.
    cells: Vec<CellContext>,
    /// Optional per-cell override.
    #[prop(default = None)]
    render_cell: Option<CellRenderer>,
) -> impl IntoView {
    let picker = use_datepicker();
    view! {
        <div class=picker.class("monthWrapper") role="grid" data-ui-kind="datepicker-months">
            {cells
                .into_iter()
                .map(|cell| view! { <CalendarCell cell render_cell /> })
                .collect_view()}
        </div>
    }
}

#[component]
/// One or more month pages of day cells.
pub fn DayGrid(
    /// Month pages starting at the active month.
    pages: Vec<DayPage>,
    /// Optional per-cell override.
    #[prop(default = None)]
    render_cell: Option<CellRenderer>,
) -> impl IntoView {
    pages
        .into_iter()
        .map(|page| view! { <DayPageView page render_cell /> })
        .collect_view()
}

#[component]
fn DayPageView(page: DayPage, render_cell: Option<CellRenderer>) -> impl IntoView {
    let picker = use_datepicker();
    let month_name = page.show_month_name.then(|| {
        picker
            .props
            .with_value(|props| props.formatter.format_native(page.month, NATIVE_MONTH_YEAR))
    });

    view! {
        <div
            class=picker.class("calendarWrapper")
            role="grid"
            data-ui-kind="datepicker-days"
            data-ui-month-index=page.month_index
            data-ui-first-month=bool_token(page.is_first_month)
            data-ui-last-month=bool_token(page.is_last_month)
        >
            {month_name.map(|name| view! { <div data-ui-slot="month-name">{name}</div> })}
            <div class=picker.class("calendarHeaderWrapper") role="row">
                {page
                    .weekdays
                    .into_iter()
                    .map(|weekday| {
                        view! {
                            <span class=picker.class("calendarHeaderWeekDay") role="columnheader">
                                {weekday}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
            <div class=picker.class("calendarDaysWrapper")>
                {page
                    .rows
                    .into_iter()
                    .map(|week| {
                        view! {
                            <div role="row" data-ui-kind="datepicker-week">
                                {week
                                    .into_iter()
                                    .map(|slot| {
                                        view! {
                                            <span class=picker.class("calendarDaysDayWrapper")>
                                                {match slot {
                                                    RenderedSlot::Cell(cell) => {
                                                        view! { <CalendarCell cell render_cell /> }
                                                            .into_view()
                                                    }
                                                    RenderedSlot::Blank => {
                                                        view! {
                                                            <span class=picker.class("emptyDay")></span>
                                                        }
                                                            .into_view()
                                                    }
                                                }}
                                            </span>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn CalendarCell(cell: CellContext, render_cell: Option<CellRenderer>) -> impl IntoView {
    let picker = use_datepicker();
    let class = picker.cell_class(&cell);
    let date = cell.date;
    let flags = cell.flags;
    let role = cell.role.element_name(cell.granularity);
    let aria_label = cell.aria_label.clone();
    let data_date = cell.data_date.clone();
    let content = cell_content(cell, render_cell);

    view! {
        <button
            type="button"
            class=class
            role="gridcell"
            aria-label=aria_label
            aria-selected=bool_token(flags.is_selected)
            disabled=flags.is_disabled
            data-date=data_date
            data-ui-kind="datepicker-cell"
            data-ui-role=role
            data-ui-selected=bool_token(flags.is_selected)
            data-ui-active=bool_token(flags.is_active)
            data-ui-in-range=bool_token(flags.is_in_range)
            data-ui-highlighted=bool_token(flags.is_highlighted)
            data-ui-disabled=bool_token(flags.is_disabled)
            on:click=move |_| picker.dispatch_action(DatepickerAction::Pick(date))
        >
            {content}
        </button>
    }
}
