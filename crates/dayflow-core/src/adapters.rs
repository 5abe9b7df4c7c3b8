//! Context adapters: independent adjustment passes applied to a candidate
//! block before the slot search runs.
//!
//! Each adapter has the signature `(candidate, context) -> candidate` and
//! the per-category pipelines compose them in a fixed order:
//!
//! ```text
//! workouts: recovery shrink -> preferred-time resolution -> density retime
//! meals:    cheat-day relax -> preferred-time resolution -> fasting clamp
//! ```

use std::collections::HashMap;

use crate::clock;
use crate::model::{
    BlockCandidate, BlockType, CompletionPattern, EnergyPeak, LifeContext, MealSlot,
    MeetingDensity, RecoveryContext, MUTED_COLOR,
};

/// Shortest block the engine will place.
pub const MIN_BLOCK_MINUTES: u32 = 15;

/// A candidate mid-shaping: duration and preferred start in minutes, still
/// without a placed slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCandidate {
    pub title: String,
    pub block_type: BlockType,
    pub duration_minutes: u32,
    /// Resolved by the preferred-time adapter; `None` until then.
    pub preferred_minutes: Option<u32>,
    pub meal_slot: Option<MealSlot>,
    pub color: String,
}

impl PlacementCandidate {
    /// Seed a candidate from the caller-supplied block.
    pub fn from_candidate(candidate: &BlockCandidate) -> Self {
        Self {
            title: candidate.title.clone(),
            block_type: candidate.block_type,
            duration_minutes: candidate.duration_minutes.max(MIN_BLOCK_MINUTES),
            preferred_minutes: candidate
                .preferred_start
                .as_deref()
                .map(clock::parse_hhmm),
            meal_slot: candidate.meal_slot,
            color: candidate.block_type.default_color().to_string(),
        }
    }
}

/// Read-only context every adapter sees.
pub struct AdapterContext<'a> {
    pub wake_minutes: u32,
    pub energy_peak: Option<EnergyPeak>,
    pub recovery: Option<&'a RecoveryContext>,
    pub patterns: &'a HashMap<BlockType, CompletionPattern>,
    pub life: Option<&'a LifeContext>,
    pub meeting_density: MeetingDensity,
}

/// One adjustment pass over a candidate.
pub type Adapter = fn(PlacementCandidate, &AdapterContext) -> PlacementCandidate;

/// Ordered pipeline for workout candidates.
pub const WORKOUT_ADAPTERS: [Adapter; 3] =
    [recovery_shrink, resolve_workout_time, avoid_meeting_density];

/// Ordered pipeline for meal candidates.
pub const MEAL_ADAPTERS: [Adapter; 3] = [cheat_day_relax, resolve_meal_time, fasting_clamp];

/// Run a pipeline over a candidate.
pub fn apply(
    adapters: &[Adapter],
    candidate: PlacementCandidate,
    ctx: &AdapterContext<'_>,
) -> PlacementCandidate {
    adapters
        .iter()
        .fold(candidate, |candidate, adapter| adapter(candidate, ctx))
}

/// Low recovery shrinks the workout to 75% of its duration, rounded to the
/// nearest 15 minutes and floored at the minimum block duration.
fn recovery_shrink(
    mut candidate: PlacementCandidate,
    ctx: &AdapterContext<'_>,
) -> PlacementCandidate {
    let low_recovery = ctx.recovery.is_some_and(|r| r.is_low_recovery);
    if candidate.block_type != BlockType::Workout || !low_recovery {
        return candidate;
    }

    let scaled = candidate.duration_minutes as f64 * 0.75;
    let rounded = ((scaled / 15.0).round() as u32) * 15;
    candidate.duration_minutes = rounded.max(MIN_BLOCK_MINUTES);
    candidate.title.push_str(" (Recovery)");
    candidate.color = MUTED_COLOR.to_string();
    candidate
}

/// Resolve the preferred start for a workout.
///
/// A strong learned pattern wins over everything; then a caller-suggested
/// start, then the recovery-aware default, then the energy-peak defaults.
fn resolve_workout_time(
    mut candidate: PlacementCandidate,
    ctx: &AdapterContext<'_>,
) -> PlacementCandidate {
    if let Some(window) = learned_window(&candidate, ctx) {
        candidate.preferred_minutes = Some(window);
        return candidate;
    }
    if candidate.preferred_minutes.is_some() {
        return candidate;
    }

    let low_recovery = ctx.recovery.is_some_and(|r| r.is_low_recovery);
    let preferred = if low_recovery {
        10 * 60
    } else {
        match ctx.energy_peak {
            Some(EnergyPeak::Morning) => 7 * 60,
            Some(EnergyPeak::Afternoon) => 14 * 60,
            Some(EnergyPeak::Evening) => 18 * 60,
            None => 10 * 60,
        }
    };
    candidate.preferred_minutes = Some(preferred);
    candidate
}

/// On high-density meeting days, swap a morning-preferred workout to 14:00
/// and an afternoon-preferred one to 07:00. A single binary swap, not a
/// re-optimization.
fn avoid_meeting_density(
    mut candidate: PlacementCandidate,
    ctx: &AdapterContext<'_>,
) -> PlacementCandidate {
    if ctx.meeting_density != MeetingDensity::High {
        return candidate;
    }
    let noon = 12 * 60;
    candidate.preferred_minutes = candidate.preferred_minutes.map(|preferred| {
        if preferred < noon {
            14 * 60
        } else {
            7 * 60
        }
    });
    candidate
}

/// Cheat days get extra cook time and a relaxed title; the fasting clamp
/// never fires on them.
fn cheat_day_relax(
    mut candidate: PlacementCandidate,
    ctx: &AdapterContext<'_>,
) -> PlacementCandidate {
    let cheat_day = ctx.life.is_some_and(|life| life.is_cheat_day);
    if !candidate.block_type.is_meal() || !cheat_day {
        return candidate;
    }
    candidate.duration_minutes += 15;
    candidate.title.push_str(" (Flex Day)");
    candidate
}

/// Resolve the preferred start for a meal: learned pattern, then a
/// caller-suggested start, then the per-slot defaults.
fn resolve_meal_time(
    mut candidate: PlacementCandidate,
    ctx: &AdapterContext<'_>,
) -> PlacementCandidate {
    if let Some(window) = learned_window(&candidate, ctx) {
        candidate.preferred_minutes = Some(window);
        return candidate;
    }
    if candidate.preferred_minutes.is_some() {
        return candidate;
    }

    let preferred = match candidate.meal_slot {
        Some(MealSlot::Breakfast) => ctx.wake_minutes + 15,
        Some(MealSlot::Lunch) | None => 12 * 60,
        Some(MealSlot::Dinner) => 18 * 60,
    };
    candidate.preferred_minutes = Some(preferred);
    candidate
}

/// Clamp a meal into the eating window when intermittent fasting is active
/// and it is not a cheat day.
fn fasting_clamp(
    mut candidate: PlacementCandidate,
    ctx: &AdapterContext<'_>,
) -> PlacementCandidate {
    if !candidate.block_type.is_meal() {
        return candidate;
    }
    let Some((open, close)) = ctx.life.and_then(LifeContext::eating_window) else {
        return candidate;
    };
    let Some(mut preferred) = candidate.preferred_minutes else {
        return candidate;
    };

    if preferred < open {
        preferred = open;
    }
    if preferred + candidate.duration_minutes > close {
        // end exactly at the window close
        preferred = close.saturating_sub(candidate.duration_minutes);
    }
    candidate.preferred_minutes = Some(preferred);
    candidate
}

fn learned_window(candidate: &PlacementCandidate, ctx: &AdapterContext<'_>) -> Option<u32> {
    let pattern = ctx.patterns.get(&candidate.block_type)?;
    if !pattern.overrides_default() {
        return None;
    }
    pattern
        .preferred_window
        .as_deref()
        .map(clock::parse_hhmm)
}
