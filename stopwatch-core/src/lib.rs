//! Pure stopwatch engine with no platform dependencies.
//! Testable on host; the hosting app supplies ticks and does the drawing.

use std::fmt;

/// Tick delta the host delivers by default.
pub const DEFAULT_TICK_MS: u64 = 10;

const MS_PER_SEC: u64 = 1000;
const MS_PER_MIN: u64 = 60 * MS_PER_SEC;
const MS_PER_HOUR: u64 = 60 * MS_PER_MIN;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Stopped,
    Running,
}

/// Display decomposition of a millisecond count.
///
/// `millis < 1000`, `seconds < 60` and `minutes < 60` always hold; hours have
/// no ceiling. Values only come from [`ElapsedTime::from_ms`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ElapsedTime {
    hours: u64,
    minutes: u8,
    seconds: u8,
    millis: u16,
}

impl ElapsedTime {
    pub const ZERO: ElapsedTime = ElapsedTime { hours: 0, minutes: 0, seconds: 0, millis: 0 };

    #[cfg(test)]
    fn new(hours: u64, minutes: u8, seconds: u8, millis: u16) -> Self {
        Self { hours, minutes, seconds, millis }
    }

    pub fn from_ms(ms: u64) -> Self {
        Self {
            hours: ms / MS_PER_HOUR,
            minutes: ((ms % MS_PER_HOUR) / MS_PER_MIN) as u8,
            seconds: ((ms % MS_PER_MIN) / MS_PER_SEC) as u8,
            millis: (ms % MS_PER_SEC) as u16,
        }
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn millis(&self) -> u16 {
        self.millis
    }

    /// Inverse of `from_ms`, so it can't overflow.
    pub fn total_ms(&self) -> u64 {
        self.hours * MS_PER_HOUR
            + self.minutes as u64 * MS_PER_MIN
            + self.seconds as u64 * MS_PER_SEC
            + self.millis as u64
    }
}

/// Formats as "HH:MM:SS.mmm"
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRecord {
    pub number: u32,
    pub snapshot: ElapsedTime,
}

/// What an engine operation changed. The host redraws from
/// [`Stopwatch::snapshot`] whenever it gets one of these.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Change {
    Started,
    Stopped,
    Reset,
    Ticked,
    LapRecorded(u32),
    LapsCleared,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub elapsed: ElapsedTime,
    pub state: RunState,
    /// Most recent first.
    pub laps: &'a [LapRecord],
}

pub struct Stopwatch {
    state: RunState,
    elapsed_ms: u64,
    // most recent first
    laps: Vec<LapRecord>,
    next_lap: u32,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: RunState::Stopped,
            elapsed_ms: 0,
            laps: Vec::new(),
            next_lap: 1,
        }
    }

    pub fn start(&mut self) -> Option<Change> {
        if self.state == RunState::Running {
            return None;
        }
        self.state = RunState::Running;
        Some(Change::Started)
    }

    pub fn stop(&mut self) -> Option<Change> {
        if self.state != RunState::Running {
            return None;
        }
        self.state = RunState::Stopped;
        Some(Change::Stopped)
    }

    /// Zeroes the time and lap numbering and lands in `Stopped`.
    /// Recorded laps are kept; use [`Stopwatch::clear_laps`] to drop them.
    pub fn reset(&mut self) -> Option<Change> {
        self.state = RunState::Stopped;
        self.elapsed_ms = 0;
        self.next_lap = 1;
        Some(Change::Reset)
    }

    /// Advances the elapsed time by `delta_ms`. Ignored while stopped.
    pub fn tick(&mut self, delta_ms: u64) -> Option<Change> {
        if self.state != RunState::Running {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        Some(Change::Ticked)
    }

    pub fn record_lap(&mut self) -> Option<Change> {
        if self.state != RunState::Running {
            return None;
        }
        let number = self.next_lap;
        self.laps.insert(0, LapRecord { number, snapshot: self.elapsed() });
        self.next_lap += 1;
        Some(Change::LapRecorded(number))
    }

    pub fn clear_laps(&mut self) -> Option<Change> {
        self.laps.clear();
        self.next_lap = 1;
        Some(Change::LapsCleared)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn elapsed(&self) -> ElapsedTime {
        ElapsedTime::from_ms(self.elapsed_ms)
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn next_lap_number(&self) -> u32 {
        self.next_lap
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            elapsed: self.elapsed(),
            state: self.state,
            laps: &self.laps,
        }
    }
}
