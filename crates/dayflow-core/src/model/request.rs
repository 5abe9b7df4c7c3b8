//! Engine input contract.
//!
//! A `SchedulingRequest` arrives from the external day-planning controller
//! with workout/meal candidates already resolved and device-calendar events
//! already imported and filtered. The engine only places blocks; it never
//! persists or fetches anything.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::block::BlockType;
use crate::model::context::{CompletionPattern, LifeContext, RecoveryContext};

/// Energy-peak tier from onboarding preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyPeak {
    Morning,
    Afternoon,
    Evening,
}

/// How much the user tolerates the engine moving things around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexibilityTier {
    Rigid,
    Balanced,
    Flexible,
}

impl Default for FlexibilityTier {
    fn default() -> Self {
        FlexibilityTier::Balanced
    }
}

/// User scheduling preferences: the sleep window plus coarse tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePreferences {
    /// "HH:MM" wake time.
    pub wake_time: String,
    /// "HH:MM" bed time.
    pub sleep_time: String,
    #[serde(default)]
    pub flexibility: FlexibilityTier,
    #[serde(default)]
    pub energy_peak: Option<EnergyPeak>,
}

/// Which meal of the day a meal candidate is for. Drives the static
/// preferred-start defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

/// A block not yet assigned a real time: the caller supplies the desired
/// duration and type, the engine chooses when it happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCandidate {
    pub title: String,
    pub block_type: BlockType,
    pub duration_minutes: u32,
    /// Optional caller-suggested "HH:MM" start. Placeholder times from the
    /// training/meal-planning subsystems land here; learned patterns still
    /// take precedence.
    #[serde(default)]
    pub preferred_start: Option<String>,
    #[serde(default)]
    pub meal_slot: Option<MealSlot>,
}

/// An already-timed, immovable commitment from the device calendar.
///
/// Canceled titles are filtered and all-day range overlap is resolved by
/// the controller before the request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarBlock {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub is_ooo: bool,
}

/// Everything the engine needs to build one day's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    /// Local "YYYY-MM-DD" date key.
    pub date: String,
    pub preferences: SchedulePreferences,
    #[serde(default)]
    pub workout_blocks: Vec<BlockCandidate>,
    #[serde(default)]
    pub meal_blocks: Vec<BlockCandidate>,
    #[serde(default)]
    pub calendar_blocks: Vec<CalendarBlock>,
    #[serde(default)]
    pub recovery_context: Option<RecoveryContext>,
    #[serde(default)]
    pub completion_patterns: HashMap<BlockType, CompletionPattern>,
    #[serde(default)]
    pub life_context: Option<LifeContext>,
}
