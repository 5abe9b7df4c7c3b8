//! Time block model shared across the whole pipeline.
//!
//! Every component reads and writes `TimeBlock`s. Blocks are created fresh
//! per generation call and never mutated after the engine returns; the
//! day's block list is replaced wholesale on every regeneration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock;

/// Category of a scheduled block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Workout,
    MealPrep,
    MealEating,
    Work,
    Sleep,
    Personal,
    Commute,
    CalendarEvent,
    Buffer,
}

impl BlockType {
    /// Whether this is one of the meal categories.
    pub fn is_meal(&self) -> bool {
        matches!(self, BlockType::MealPrep | BlockType::MealEating)
    }

    /// Default display color for engine-created blocks of this type.
    pub fn default_color(&self) -> &'static str {
        match self {
            BlockType::Workout => "#E65100",
            BlockType::MealPrep | BlockType::MealEating => "#2E7D32",
            BlockType::Work => "#1565C0",
            BlockType::Sleep => "#283593",
            BlockType::Personal => "#6A1B9A",
            BlockType::Commute => "#546E7A",
            BlockType::CalendarEvent => "#4F83CC",
            BlockType::Buffer => "#90A4AE",
        }
    }
}

/// One scheduled interval in the daily timeline.
///
/// `start_time`/`end_time` are "HH:MM" local wall clock. `duration_minutes`
/// equals the start-to-end span except for all-day calendar events, which
/// carry a zero duration and a full "00:00"-"23:59" span purely for display
/// and are excluded from every temporal computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub block_type: BlockType,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    /// 1-5, 5 = immovable.
    pub priority: u8,
    /// 0.0-1.0, 0 = immovable.
    pub flexibility: f32,
    pub color: String,
    /// True when the engine, not the user or an external calendar, chose
    /// the time.
    pub ai_generated: bool,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub is_ooo: bool,
}

impl TimeBlock {
    /// Start as minutes since midnight.
    pub fn start_minutes(&self) -> u32 {
        clock::parse_hhmm(&self.start_time)
    }

    /// End as minutes since midnight, unwrapped past midnight: the sleep
    /// block's end lands beyond 1440 so interval math stays monotonic.
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes() + self.duration_minutes
    }

    /// Whether the block participates in temporal computations.
    pub fn is_timed(&self) -> bool {
        !self.is_all_day
    }
}

/// Source of process-unique block ids.
///
/// Injected into the engine so tests can pin ids and make generation fully
/// deterministic.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Default id source backed by UUID v4.
#[derive(Debug, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic id source for tests and replayable generation.
#[derive(Debug)]
pub struct SequentialIdSource {
    prefix: String,
    next: u64,
}

impl SequentialIdSource {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 0,
        }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Rotating color assignment for imported calendar blocks.
///
/// Explicit state threaded through the placer call, not module-level, so
/// generation stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: &'static [&'static str],
    cursor: usize,
}

/// Muted color applied to recovery-adjusted workouts.
pub const MUTED_COLOR: &str = "#9E9E9E";

const CALENDAR_COLORS: &[&str] = &["#4F83CC", "#7E57C2", "#26A69A", "#EF6C00", "#8D6E63"];

impl ColorPalette {
    pub fn new() -> Self {
        Self {
            colors: CALENDAR_COLORS,
            cursor: 0,
        }
    }

    /// Next color in rotation.
    pub fn next_color(&mut self) -> String {
        let color = self.colors[self.cursor % self.colors.len()];
        self.cursor += 1;
        color.to_string()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new()
    }
}
