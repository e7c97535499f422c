//! Headless view and selection state for the calendar date picker.
//!
//! The crate owns the authoritative [`DatepickerState`], the [`reduce_datepicker`] transition
//! function, grid enumeration, and per-cell classification. Rendering lives in the
//! `datepicker_ui` crate, which only reads state produced here and dispatches
//! [`DatepickerAction`] values back.

pub mod classify;
pub mod config;
pub mod constraint;
pub mod format;
pub mod grid;
pub mod model;
pub mod navigator;
pub mod range;
pub mod reducer;
pub mod time;

pub use classify::{classify, CellRole, Classification};
pub use config::{load_host_props, ConfigError, DatepickerConfig, DatepickerProps, LoadedProps};
pub use constraint::{DateConstraint, DateConstraints, DatePattern};
pub use format::{ChronoFormatter, ClassResolver, ClassTable, DateFormatter};
pub use grid::{render_view, CellContext, DayPage, RenderedSlot, ViewGrid};
pub use model::*;
pub use navigator::{can_page, header_label, NavigatorRequest, PageDirection};
pub use reducer::{reduce_datepicker, DatepickerAction, DatepickerError, DatepickerEvent};
