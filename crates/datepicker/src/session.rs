//! The picking session: owns the reference date and granularity, and turns
//! host events into fresh render snapshots.
//!
//! A [`CalendarSession`] lives from activation of the host field until the
//! user commits or cancels. Both of those consume the session, so nothing
//! can touch it afterwards.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{PickerConfig, Theme};
use crate::format::{self, FormatSpec};
use crate::grid::{build_grid, Carry, Granularity, GridCell};
use crate::nav::{self, Direction};
use crate::value::{CalendarValue, WEEKDAY_LABELS};

/// Nominal length of a slide transition. Hosts clear the visual state after
/// this long.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);

const MAX_HOUR: u32 = 23;
const MAX_MINUTE: u32 = 59;
const MAX_SECOND: u32 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Left,
    Right,
}

impl From<Direction> for Slide {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Prev => Slide::Left,
            Direction::Next => Slide::Right,
        }
    }
}

/// Advisory animation hint attached to a snapshot.
///
/// The host's timer for this transition should no-op if
/// [`CalendarSession::is_current`] says `generation` is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub slide: Slide,
    pub duration: Duration,
    pub generation: u64,
}

/// Hour, minute and second chosen in the time row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSelection {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Option labels for the time row selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOptions {
    pub hours: Vec<String>,
    pub minutes: Vec<String>,
    pub seconds: Option<Vec<String>>,
}

/// Everything the renderer needs to draw the dialog once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub header: String,
    pub granularity: Granularity,
    pub cells: Vec<GridCell>,
    /// Column labels, only for the day grid
    pub weekday_labels: Option<[&'static str; 7]>,
    pub transition: Option<Transition>,
    pub generation: u64,
    /// Current time row values, when the time row is shown
    pub time: Option<TimeSelection>,
    pub theme: Theme,
    pub width: u32,
    pub commit_label: String,
    pub cancel_label: String,
}

/// Releases a host event registration (e.g. the outside-click dismiss
/// listener) when dropped.
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct CalendarSession {
    reference: CalendarValue,
    granularity: Granularity,
    today: CalendarValue,
    config: PickerConfig,
    time: TimeSelection,
    generation: u64,
    listeners: Vec<ListenerGuard>,
}

impl CalendarSession {
    /// Starts a session from the host field's current text.
    pub fn new(initial_text: &str, config: PickerConfig) -> Self {
        Self::with_today(initial_text, config, CalendarValue::now())
    }

    /// Like [`CalendarSession::new`] but with an explicit wall-clock value,
    /// which is both the `Today` marker and the fallback when the text
    /// cannot be parsed.
    pub fn with_today(initial_text: &str, config: PickerConfig, today: CalendarValue) -> Self {
        let reference = match format::parse(initial_text, &config.format) {
            Ok(parsed) => {
                debug!("date picker seeded from host text: {parsed}");
                parsed
            }
            Err(err) => {
                debug!("date picker seeded from clock ({err}) for {initial_text:?}");
                today
            }
        };

        let time = TimeSelection {
            hour: reference.hour(),
            minute: reference.minute(),
            second: if config.show_seconds {
                reference.second()
            } else {
                0
            },
        };

        Self {
            reference,
            granularity: Granularity::Day,
            today,
            config,
            time,
            generation: 0,
            listeners: Vec::new(),
        }
    }

    pub fn reference(&self) -> CalendarValue {
        self.reference
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Wall-clock value captured when the session started.
    pub fn today(&self) -> CalendarValue {
        self.today
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn time_selection(&self) -> TimeSelection {
        self.time
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `generation` still names the latest snapshot.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Ties a host registration to this session. It is released when the
    /// session ends, however it ends.
    pub fn attach_listener(&mut self, guard: ListenerGuard) {
        self.listeners.push(guard);
    }

    /// The current view without changing anything.
    pub fn snapshot(&self) -> Snapshot {
        self.render(None)
    }

    /// Header click: Day to Month, Month to Year, Year back to Month.
    pub fn change_granularity(&mut self) -> Snapshot {
        let next = self.granularity.coarser();
        debug!("granularity {:?} -> {:?}", self.granularity, next);
        self.granularity = next;
        self.advance(None)
    }

    pub fn navigate_prev(&mut self) -> Snapshot {
        self.navigate(Direction::Prev)
    }

    pub fn navigate_next(&mut self) -> Snapshot {
        self.navigate(Direction::Next)
    }

    /// Applies a click on `cell`.
    ///
    /// Day cells move the reference day (overflow cells also move the month
    /// and slide). Month cells drill into the day grid and year cells drill
    /// into the month grid.
    pub fn pick_cell(&mut self, cell: &GridCell) -> Snapshot {
        let (moved, slide) = match (cell.kind, cell.carry) {
            (Granularity::Day, None) => {
                self.granularity = Granularity::Day;
                (self.reference.with_day(cell.value), None)
            }
            (Granularity::Day, Some(carry)) => {
                self.granularity = Granularity::Day;
                let month = self.reference.month() as i32 + carry.month_delta();
                let slide = match carry {
                    Carry::PrevMonth => Slide::Left,
                    Carry::NextMonth => Slide::Right,
                };
                (
                    self.reference.with_month_and_day(month, cell.value),
                    Some(slide),
                )
            }
            (Granularity::Month, _) => {
                self.granularity = Granularity::Day;
                (self.month_from_cell(cell.value), None)
            }
            (Granularity::Year, _) => {
                self.granularity = Granularity::Month;
                (self.reference.with_year(cell.value), None)
            }
        };

        self.set_reference(moved);
        self.advance(slide)
    }

    /// Updates the time row. Out-of-range values are clamped.
    pub fn set_time(&mut self, hour: u32, minute: u32, second: u32) -> Snapshot {
        let clamped = TimeSelection {
            hour: hour.min(MAX_HOUR),
            minute: minute.min(MAX_MINUTE),
            second: second.min(MAX_SECOND),
        };

        if clamped.hour != hour || clamped.minute != minute || clamped.second != second {
            warn!("clamped time selection {hour}:{minute}:{second}");
        }

        self.time = clamped;
        self.advance(None)
    }

    /// Labels for the time row selectors, zero-padded.
    pub fn time_options(&self) -> TimeOptions {
        TimeOptions {
            hours: padded_range(MAX_HOUR),
            minutes: padded_range(MAX_MINUTE),
            seconds: self
                .config
                .show_seconds
                .then(|| padded_range(MAX_SECOND)),
        }
    }

    /// Ends the session and returns the text to write into the host field.
    ///
    /// Without the time row, time fields are written as zero. Without the
    /// seconds selector, seconds are zero. The time row has no millisecond
    /// selector, so with it shown the seeded millisecond is kept.
    pub fn commit(self) -> String {
        let (hour, minute, second, millisecond) = if self.config.show_time {
            let second = if self.config.show_seconds {
                self.time.second
            } else {
                0
            };
            (
                self.time.hour,
                self.time.minute,
                second,
                self.reference.millisecond(),
            )
        } else {
            if FormatSpec::new(&self.config.format).has_time() {
                debug!("time row hidden, writing zero time of day");
            }
            (0, 0, 0, 0)
        };

        let value = match self.reference.at_time(hour, minute, second, millisecond) {
            Some(value) => value,
            None => {
                warn!("invalid time {hour}:{minute}:{second}, committing date as-is");
                self.reference
            }
        };

        let text = format::format(&value, &self.config.format);
        debug!("date picker committed {text:?}");
        text
    }

    /// Ends the session without writing anything.
    pub fn cancel(self) {
        debug!("date picker cancelled");
    }

    fn navigate(&mut self, direction: Direction) -> Snapshot {
        let moved = nav::step(&self.reference, self.granularity, direction);
        self.set_reference(moved);
        self.advance(Some(direction.into()))
    }

    fn month_from_cell(&self, month: i32) -> Option<CalendarValue> {
        let month = u32::try_from(month).ok().filter(|m| *m < 12)?;
        self.reference.with_month(month)
    }

    fn set_reference(&mut self, moved: Option<CalendarValue>) {
        match moved {
            Some(value) => self.reference = value,
            None => warn!("date out of range, keeping {}", self.reference),
        }
    }

    fn advance(&mut self, slide: Option<Slide>) -> Snapshot {
        self.generation += 1;
        self.render(slide)
    }

    fn render(&self, slide: Option<Slide>) -> Snapshot {
        let grid = build_grid(&self.reference, self.granularity, &self.today);
        let weekday_labels = (self.granularity == Granularity::Day).then_some(WEEKDAY_LABELS);
        let transition = slide.map(|slide| Transition {
            slide,
            duration: TRANSITION_DURATION,
            generation: self.generation,
        });

        Snapshot {
            header: grid.header,
            granularity: grid.granularity,
            cells: grid.cells,
            weekday_labels,
            transition,
            generation: self.generation,
            time: self.config.show_time.then_some(self.time),
            theme: self.config.theme,
            width: self.config.width,
            commit_label: self.config.commit_label.clone(),
            cancel_label: self.config.cancel_label.clone(),
        }
    }
}

fn padded_range(max: u32) -> Vec<String> {
    (0..=max).map(|n| format!("{n:02}")).collect()
}
