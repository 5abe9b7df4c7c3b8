//! # Dayflow Core Library
//!
//! Deterministic daily-timeline builder for a personal scheduling
//! assistant. Given a sleep window, must-include activities (workouts,
//! meals), immovable calendar commitments, and adaptive context signals
//! (recovery status, intermittent-fasting window, learned completion
//! habits, meeting density), one synchronous call produces a conflict-free
//! ordered sequence of time blocks covering one day plus a
//! conflict/warning report.
//!
//! ## Architecture
//!
//! - **Clock**: "HH:MM" wall-clock arithmetic with overnight wraparound
//! - **Model**: the shared `TimeBlock` shape plus the request/result
//!   contracts exchanged with the surrounding application
//! - **Placer**: installs the sleep block and imports calendar events
//! - **Adapters**: ordered per-category adjustment passes applied to a
//!   candidate before placement
//! - **Slot finder**: forward/backward/gap search under asymmetric buffer
//!   rules
//! - **Buffer injector** and **conflict detector**: post-placement passes
//! - **Engine**: the orchestrator driving the fixed pipeline
//!
//! The engine persists nothing, calls no external service, and guarantees
//! best-effort placement with accurate conflict reporting when no feasible
//! schedule exists.
//!
//! ## Key Components
//!
//! - [`DayPlanner`]: the single entry point
//! - [`SchedulingRequest`] / [`SchedulingResult`]: the external contract
//! - [`BufferRules`] / [`TransitionRules`]: the heuristic tables

pub mod adapters;
pub mod buffer;
pub mod clock;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod model;
pub mod placer;
pub mod slot;
pub mod stats;

pub use buffer::TransitionRules;
pub use conflict::TOO_TIGHT_MINUTES;
pub use engine::{DayPlanner, PlannerConfig};
pub use error::EngineError;
pub use model::{
    BlockCandidate, BlockType, CalendarBlock, CompletionPattern, ConflictType, DailyTimeline,
    EnergyPeak, FlexibilityTier, IdSource, LifeContext, MealSlot, MeetingDensity,
    RecoveryContext, SchedulePreferences, SchedulingConflict, SchedulingRequest,
    SchedulingResult, SequentialIdSource, TimeBlock, UuidIdSource,
};
pub use slot::BufferRules;
pub use stats::OVERLOAD_MINUTES;
