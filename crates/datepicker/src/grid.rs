//! Pure construction of the selectable cells for each granularity.

use bitflags::bitflags;

use crate::value::{
    days_in_month, shift_month, CalendarValue, MIN_YEAR, MONTH_ABBREVIATIONS, MONTH_NAMES,
};

/// Cells in a day grid: six rows of seven, whatever the month.
pub const DAY_CELLS: usize = 42;
pub const MONTH_CELLS: usize = 12;
pub const YEAR_CELLS: usize = 12;

/// How many years before the reference year the year grid starts. Near
/// [`MIN_YEAR`] the window starts at `MIN_YEAR` instead.
pub const YEAR_WINDOW_LEAD: i32 = 4;

/// The browsing resolution of the calendar surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    /// The granularity reached by clicking the header. Year goes back to
    /// Month; there is no direct way from Year to Day.
    pub fn coarser(self) -> Self {
        match self {
            Granularity::Day => Granularity::Month,
            Granularity::Month => Granularity::Year,
            Granularity::Year => Granularity::Month,
        }
    }

    pub fn cell_count(self) -> usize {
        match self {
            Granularity::Day => DAY_CELLS,
            Granularity::Month => MONTH_CELLS,
            Granularity::Year => YEAR_CELLS,
        }
    }
}

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// The cell matches the reference date
        const Selected = 1 << 0;

        /// The cell is the day the session started on
        const Today = 1 << 1;

        /// Trailing day of the previous month
        const OverflowPrev = 1 << 2;

        /// Leading day of the next month
        const OverflowNext = 1 << 3;
    }
}

/// Which adjacent month an overflow cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carry {
    PrevMonth,
    NextMonth,
}

impl Carry {
    pub fn month_delta(self) -> i32 {
        match self {
            Carry::PrevMonth => -1,
            Carry::NextMonth => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Day of month, zero-based month, or year depending on `kind`
    pub value: i32,
    pub label: String,
    pub kind: Granularity,
    pub flags: CellFlags,
    /// Only set on overflow cells
    pub carry: Option<Carry>,
}

impl GridCell {
    fn new(value: i32, label: String, kind: Granularity) -> Self {
        Self {
            value,
            label,
            kind,
            flags: CellFlags::empty(),
            carry: None,
        }
    }

    fn overflow(value: i32, carry: Carry) -> Self {
        let flags = match carry {
            Carry::PrevMonth => CellFlags::OverflowPrev,
            Carry::NextMonth => CellFlags::OverflowNext,
        };

        Self {
            value,
            label: value.to_string(),
            kind: Granularity::Day,
            flags,
            carry: Some(carry),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.flags.contains(CellFlags::Selected)
    }

    pub fn is_today(&self) -> bool {
        self.flags.contains(CellFlags::Today)
    }

    pub fn is_overflow(&self) -> bool {
        self.carry.is_some()
    }
}

/// Header text plus the ordered cells for one granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub header: String,
    pub granularity: Granularity,
    pub cells: Vec<GridCell>,
}

/// Builds the grid for `granularity` around `reference`.
///
/// Deterministic and side-effect free: the same inputs always produce the
/// same grid.
pub fn build_grid(
    reference: &CalendarValue,
    granularity: Granularity,
    today: &CalendarValue,
) -> Grid {
    let (header, cells) = match granularity {
        Granularity::Day => (day_header(reference), day_cells(reference, today)),
        Granularity::Month => (reference.year().to_string(), month_cells(reference)),
        Granularity::Year => year_page(reference),
    };

    Grid {
        header,
        granularity,
        cells,
    }
}

fn day_header(reference: &CalendarValue) -> String {
    format!(
        "{} {}",
        MONTH_NAMES[reference.month() as usize],
        reference.year()
    )
}

fn day_cells(reference: &CalendarValue, today: &CalendarValue) -> Vec<GridCell> {
    let year = reference.year();
    let month = reference.month();
    let lead = reference.first_weekday_of_month() as i32;

    let (prev_year, prev_month) = shift_month(year, month, -1);
    let prev_len = days_in_month(prev_year, prev_month) as i32;

    let mut cells = Vec::with_capacity(DAY_CELLS);

    for day in (prev_len - lead + 1)..=prev_len {
        cells.push(GridCell::overflow(day, Carry::PrevMonth));
    }

    let is_today_month = today.year() == year && today.month() == month;
    for day in 1..=reference.days_in_month() {
        let mut cell = GridCell::new(day as i32, day.to_string(), Granularity::Day);
        if day == reference.day() {
            cell.flags |= CellFlags::Selected;
        }
        if is_today_month && day == today.day() {
            cell.flags |= CellFlags::Today;
        }
        cells.push(cell);
    }

    let trailing = DAY_CELLS - cells.len();
    for day in 1..=trailing {
        cells.push(GridCell::overflow(day as i32, Carry::NextMonth));
    }

    cells
}

fn month_cells(reference: &CalendarValue) -> Vec<GridCell> {
    MONTH_ABBREVIATIONS
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let mut cell = GridCell::new(idx as i32, (*name).to_owned(), Granularity::Month);
            if idx as u32 == reference.month() {
                cell.flags |= CellFlags::Selected;
            }
            cell
        })
        .collect()
}

fn year_page(reference: &CalendarValue) -> (String, Vec<GridCell>) {
    let start = (reference.year() - YEAR_WINDOW_LEAD).max(MIN_YEAR);
    let end = start + YEAR_CELLS as i32;

    let cells = (start..end)
        .map(|year| {
            let mut cell = GridCell::new(year, year.to_string(), Granularity::Year);
            if year == reference.year() {
                cell.flags |= CellFlags::Selected;
            }
            cell
        })
        .collect();

    (format!("{start}\u{2013}{}", end - 1), cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: i32, day: i32) -> CalendarValue {
        CalendarValue::new(year, month, day).unwrap()
    }

    fn values(cells: &[GridCell]) -> Vec<i32> {
        cells.iter().map(|c| c.value).collect()
    }

    #[test]
    fn every_month_has_42_day_cells() {
        let today = date(2024, 0, 1);
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let grid = build_grid(&date(year, month, 1), Granularity::Day, &today);
                assert_eq!(grid.cells.len(), grid.granularity.cell_count(), "{year}-{month}");

                let in_month = grid.cells.iter().filter(|c| !c.is_overflow()).count();
                assert_eq!(in_month as u32, days_in_month(year, month as u32));
            }
        }
    }

    #[test]
    fn february_2024_layout() {
        let grid = build_grid(&date(2024, 1, 10), Granularity::Day, &date(2000, 0, 1));
        assert_eq!(grid.header, "February 2024");

        // Thursday start: Jan 28..31 lead in
        assert_eq!(values(&grid.cells[..4]), vec![28, 29, 30, 31]);
        assert!(grid.cells[..4]
            .iter()
            .all(|c| c.carry == Some(Carry::PrevMonth) && c.flags == CellFlags::OverflowPrev));

        assert_eq!(grid.cells[4].value, 1);
        assert_eq!(grid.cells[4].carry, None);

        // 4 + 29 = 33, nine March days fill the grid
        let tail = &grid.cells[33..];
        assert_eq!(values(tail), (1..=9).collect::<Vec<_>>());
        assert!(tail.iter().all(|c| c.carry == Some(Carry::NextMonth)));
    }

    #[test]
    fn sunday_start_has_no_lead_cells() {
        // 1 Sep 2024 was a Sunday
        let grid = build_grid(&date(2024, 8, 1), Granularity::Day, &date(2000, 0, 1));
        assert_eq!(grid.cells[0].value, 1);
        assert!(!grid.cells[0].is_overflow());
    }

    #[test]
    fn january_lead_cells_come_from_december() {
        // 1 Jan 2025 was a Wednesday
        let grid = build_grid(&date(2025, 0, 15), Granularity::Day, &date(2000, 0, 1));
        assert_eq!(values(&grid.cells[..3]), vec![29, 30, 31]);
    }

    #[test]
    fn selected_and_today_flags() {
        let grid = build_grid(&date(2024, 2, 15), Granularity::Day, &date(2024, 2, 20));

        let selected: Vec<_> = grid.cells.iter().filter(|c| c.is_selected()).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, 15);

        let today: Vec<_> = grid.cells.iter().filter(|c| c.is_today()).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].value, 20);
    }

    #[test]
    fn today_in_other_month_is_not_flagged() {
        let grid = build_grid(&date(2024, 2, 15), Granularity::Day, &date(2024, 3, 15));
        assert!(grid.cells.iter().all(|c| !c.is_today()));
    }

    #[test]
    fn month_grid() {
        let grid = build_grid(&date(2024, 4, 3), Granularity::Month, &date(2024, 4, 3));
        assert_eq!(grid.header, "2024");
        assert_eq!(grid.cells.len(), Granularity::Month.cell_count());
        assert_eq!(grid.cells[0].label, "Jan");
        assert_eq!(grid.cells[11].label, "Dec");

        let selected: Vec<_> = grid.cells.iter().filter(|c| c.is_selected()).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, 4);
        assert_eq!(selected[0].kind, Granularity::Month);
    }

    #[test]
    fn year_grid_window() {
        let grid = build_grid(&date(2024, 0, 1), Granularity::Year, &date(2024, 0, 1));
        assert_eq!(grid.header, "2020\u{2013}2031");
        assert_eq!(grid.cells.len(), Granularity::Year.cell_count());
        assert_eq!(grid.cells.first().map(|c| c.value), Some(2020));
        assert_eq!(grid.cells.last().map(|c| c.value), Some(2031));

        let selected: Vec<_> = grid.cells.iter().filter(|c| c.is_selected()).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, 2024);
    }

    #[test]
    fn year_grid_window_starts_at_year_one() {
        let grid = build_grid(&date(3, 5, 1), Granularity::Year, &date(2024, 0, 1));
        assert_eq!(grid.header, "1\u{2013}12");
        assert_eq!(values(&grid.cells), (1..=12).collect::<Vec<_>>());

        let selected: Vec<_> = grid.cells.iter().filter(|c| c.is_selected()).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, 3);
    }

    #[test]
    fn january_of_year_one_still_has_a_lead() {
        let grid = build_grid(&date(MIN_YEAR, 0, 10), Granularity::Day, &date(2024, 0, 1));
        assert_eq!(grid.header, "January 1");
        assert_eq!(grid.cells.len(), DAY_CELLS);
    }

    #[test]
    fn cell_counts_per_granularity() {
        assert_eq!(Granularity::Day.cell_count(), DAY_CELLS);
        assert_eq!(Granularity::Month.cell_count(), MONTH_CELLS);
        assert_eq!(Granularity::Year.cell_count(), YEAR_CELLS);
    }

    #[test]
    fn granularity_cycle() {
        assert_eq!(Granularity::Day.coarser(), Granularity::Month);
        assert_eq!(Granularity::Month.coarser(), Granularity::Year);
        assert_eq!(Granularity::Year.coarser(), Granularity::Month);
    }
}
