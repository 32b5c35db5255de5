use crate::grid::{Granularity, YEAR_CELLS};
use crate::value::CalendarValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Months covered by one prev/next step at `granularity`.
pub fn page_months(granularity: Granularity) -> i32 {
    match granularity {
        Granularity::Day => 1,
        Granularity::Month => 12,
        Granularity::Year => 12 * YEAR_CELLS as i32,
    }
}

/// Moves `reference` one page in `direction`.
///
/// Day pages are months, month pages are years and year pages are
/// twelve-year windows. The day is clamped to the target month, so repeated
/// steps never drift into a different month. `None` means the result would
/// fall before year 1 or leave the representable calendar range.
pub fn step(
    reference: &CalendarValue,
    granularity: Granularity,
    direction: Direction,
) -> Option<CalendarValue> {
    reference.add_months(direction.sign() * page_months(granularity))
}
