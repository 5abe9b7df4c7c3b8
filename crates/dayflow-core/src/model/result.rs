//! Engine output contract.

use serde::{Deserialize, Serialize};

use crate::model::block::TimeBlock;

/// What went wrong between two blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Two blocks occupy overlapping time.
    Overlap,
    /// A positive gap below the minimum transition threshold.
    TooTight,
    /// A candidate could not fit the awake window at all.
    Impossible,
}

/// A detected problem between two placed blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConflict {
    pub conflict_type: ConflictType,
    pub block_id: String,
    pub other_block_id: String,
    pub message: String,
}

/// The finished day: sorted blocks plus aggregate minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTimeline {
    /// Local "YYYY-MM-DD" date key the timeline was built for.
    pub date: String,
    pub day_of_week: String,
    /// Sorted ascending by start time; all-day events sort to the front on
    /// their display span.
    pub blocks: Vec<TimeBlock>,
    pub total_scheduled_minutes: u32,
    pub total_free_minutes: u32,
    /// Mean learned completion rate over the placed candidate types; 0.0
    /// when no pattern data was supplied.
    pub completion_rate: f64,
}

impl DailyTimeline {
    /// An empty timeline for a date, used when the pipeline fails.
    pub fn empty(date: &str, day_of_week: &str) -> Self {
        Self {
            date: date.to_string(),
            day_of_week: day_of_week.to_string(),
            blocks: Vec::new(),
            total_scheduled_minutes: 0,
            total_free_minutes: 0,
            completion_rate: 0.0,
        }
    }
}

/// Result of one generation call. `success` is true iff zero conflicts
/// were recorded; warnings and suggestions are free text for the caller
/// to surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub success: bool,
    pub timeline: DailyTimeline,
    pub conflicts: Vec<SchedulingConflict>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl SchedulingResult {
    /// Failure result carrying the boundary error text as a warning. The
    /// engine never propagates an error to its caller.
    pub fn failure(date: &str, day_of_week: &str, error: String) -> Self {
        Self {
            success: false,
            timeline: DailyTimeline::empty(date, day_of_week),
            conflicts: Vec::new(),
            warnings: vec![error],
            suggestions: Vec::new(),
        }
    }
}
