//! Player-visible game log
//!
//! Every engine operation with a visible consequence adds one line of the
//! form `"[HH:MM:SS] message"`. Lines are kept newest-first, which is the
//! order the presentation layer shows them in. Timestamps come from a
//! [`Clock`] so tests can pin them.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time of day
pub trait Clock {
    /// Hours, minutes and seconds of the current time of day
    fn time_of_day(&self) -> (u32, u32, u32);
}

/// Time of day from the system clock, shifted by a fixed UTC offset
///
/// The default offset is zero (UTC). The table's local offset is passed in
/// by the caller, e.g. `ledger --utc-offset 120`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset_minutes: i32,
}

impl SystemClock {
    pub fn with_offset(offset_minutes: i32) -> Self {
        SystemClock { offset_minutes }
    }
}

impl Clock for SystemClock {
    fn time_of_day(&self) -> (u32, u32, u32) {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        time_of_day_at(secs, self.offset_minutes)
    }
}

/// Wall-clock (h, m, s) for a Unix timestamp at the given UTC offset
fn time_of_day_at(unix_secs: u64, offset_minutes: i32) -> (u32, u32, u32) {
    let local = i64::try_from(unix_secs).unwrap_or(i64::MAX) + i64::from(offset_minutes) * 60;
    let of_day = local.rem_euclid(86_400) as u32;
    (of_day / 3600, (of_day / 60) % 60, of_day % 60)
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32, pub u32, pub u32);

impl Clock for FixedClock {
    fn time_of_day(&self) -> (u32, u32, u32) {
        (self.0, self.1, self.2)
    }
}

/// Output destination for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Keep lines in the state only (default)
    #[default]
    Memory,
    /// Keep lines and echo each one to stdout
    Both,
}

/// Newest-first list of timestamped log lines
#[derive(Clone)]
pub struct GameLog {
    entries: VecDeque<String>,
    clock: Rc<dyn Clock>,
    output_mode: OutputMode,
}

impl GameLog {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock::default()))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        GameLog {
            entries: VecDeque::new(),
            clock,
            output_mode: OutputMode::default(),
        }
    }

    pub fn set_clock(&mut self, clock: Rc<dyn Clock>) {
        self.clock = clock;
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Timestamp a message and put it at the front
    pub fn push(&mut self, message: impl AsRef<str>) {
        let (h, m, s) = self.clock.time_of_day();
        let line = format!("[{h:02}:{m:02}:{s:02}] {}", message.as_ref());
        if self.output_mode == OutputMode::Both {
            println!("{line}");
        }
        self.entries.push_front(line);
    }

    /// Lines, newest first
    pub fn entries(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    /// Lines, oldest first (for export)
    pub fn chronological(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().rev()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Does any line contain the given text?
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|line| line.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for GameLog {
    fn default() -> Self {
        Self::new()
    }
}

// Equality, Debug and serde cover the lines only; the clock and the
// echo setting are runtime wiring.
impl PartialEq for GameLog {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for GameLog {}

impl fmt::Debug for GameLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLog")
            .field("entries", &self.entries)
            .field("output_mode", &self.output_mode)
            .finish()
    }
}

impl Serialize for GameLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameLog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = VecDeque::<String>::deserialize(deserializer)?;
        Ok(GameLog {
            entries,
            ..GameLog::new()
        })
    }
}
