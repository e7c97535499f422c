//! Leptos rendering layer for the calendar date picker.
//!
//! [`DatepickerProvider`] owns the reducer container from `datepicker_core` and exposes it
//! through [`DatepickerContext`]. The view components only read that state and dispatch
//! actions back; none of them keeps a local copy of the cursors. Cells carry the stable
//! `data-ui-*` attributes plus classes resolved through a [`datepicker_core::ClassResolver`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod components;
mod context;

pub use components::{
    CellRenderer, DatepickerNavigator, DatepickerView, DayGrid, MonthGrid, YearGrid,
};
pub use context::{use_datepicker, DatepickerContext, DatepickerProvider};
