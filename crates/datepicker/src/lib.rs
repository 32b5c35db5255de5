//! Headless core of an embeddable date picker.
//!
//! The host owns the text field and the drawing. This crate owns the rest:
//! parsing the field's text, the day/month/year grids, navigation and
//! producing the committed string.
//!
//! ```
//! use datepicker::{CalendarSession, PickerConfig};
//!
//! let mut session = CalendarSession::new("15-03-2024", PickerConfig::default());
//! assert_eq!(session.snapshot().header, "March 2024");
//!
//! let snapshot = session.navigate_prev();
//! assert_eq!(snapshot.header, "February 2024");
//! assert_eq!(snapshot.cells.len(), 42);
//!
//! assert_eq!(session.commit(), "15-02-2024");
//! ```

mod config;
mod error;
mod format;
mod grid;
mod nav;
mod session;
mod slot;
mod value;

pub use config::{PickerConfig, Theme};
pub use error::ParseError;
pub use format::{format, parse, FormatSpec, FormatToken};
pub use grid::{
    build_grid, Carry, CellFlags, Granularity, Grid, GridCell, DAY_CELLS, MONTH_CELLS,
    YEAR_CELLS, YEAR_WINDOW_LEAD,
};
pub use nav::{page_months, step, Direction};
pub use session::{
    CalendarSession, ListenerGuard, Slide, Snapshot, TimeOptions, TimeSelection, Transition,
    TRANSITION_DURATION,
};
pub use slot::ActiveSession;
pub use value::{
    days_in_month, is_leap_year, CalendarValue, MIN_YEAR, MONTH_ABBREVIATIONS, MONTH_NAMES,
    WEEKDAY_LABELS,
};
