//! Shared data shapes for the placement engine.

mod block;
mod context;
mod request;
mod result;

pub use block::{
    BlockType, ColorPalette, IdSource, SequentialIdSource, TimeBlock, UuidIdSource, MUTED_COLOR,
};
pub use context::{CompletionPattern, LifeContext, MeetingDensity, RecoveryContext};
pub use request::{
    BlockCandidate, CalendarBlock, EnergyPeak, FlexibilityTier, MealSlot, SchedulePreferences,
    SchedulingRequest,
};
pub use result::{ConflictType, DailyTimeline, SchedulingConflict, SchedulingResult};
