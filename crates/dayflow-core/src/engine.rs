//! The orchestrator: one call in, one finished day out.
//!
//! `DayPlanner::generate` runs the fixed pipeline -- sleep, calendar
//! import, meeting density, workouts, meals, fasting marker, sort,
//! conflict detection, buffer injection, re-sort, stats -- and converts
//! any internal error at this boundary into a failed result. It never
//! returns an `Err` and never panics on malformed input.

use tracing::{debug, warn};

use crate::adapters::{self, AdapterContext, PlacementCandidate, MEAL_ADAPTERS, WORKOUT_ADAPTERS};
use crate::buffer::{inject_transition_buffers, TransitionRules};
use crate::clock;
use crate::conflict::detect_conflicts;
use crate::error::{EngineError, Result};
use crate::model::{
    BlockType, ColorPalette, ConflictType, DailyTimeline, IdSource, LifeContext, MeetingDensity,
    SchedulingConflict, SchedulingRequest, SchedulingResult, TimeBlock, UuidIdSource,
};
use crate::placer::{build_sleep_block, import_calendar_blocks};
use crate::slot::{BufferRules, SlotFinder, SlotOutcome};
use crate::stats::compute_stats;

/// Engine configuration: the heuristic tables, with defaults pinning the
/// product values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerConfig {
    pub buffer_rules: BufferRules,
    pub transition_rules: TransitionRules,
}

/// The daily-timeline builder.
///
/// Purely synchronous and single-threaded: one call fully computes one
/// day with no I/O and no shared state between invocations. The id source
/// is the only injected non-determinism; swap in a sequential source and
/// generation becomes a pure function of the request.
pub struct DayPlanner {
    config: PlannerConfig,
    ids: Box<dyn IdSource>,
}

impl DayPlanner {
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
            ids: Box::new(UuidIdSource),
        }
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            config,
            ids: Box::new(UuidIdSource),
        }
    }

    /// Replace the id source (e.g. with `SequentialIdSource` in tests).
    pub fn with_id_source(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Build one day's timeline. Single entry point.
    pub fn generate(&mut self, request: &SchedulingRequest) -> SchedulingResult {
        match self.run_pipeline(request) {
            Ok(result) => result,
            Err(error) => {
                warn!(%error, date = %request.date, "pipeline failed");
                let day_of_week =
                    clock::day_of_week(&request.date).unwrap_or_else(|| "Unknown".to_string());
                SchedulingResult::failure(&request.date, &day_of_week, error.to_string())
            }
        }
    }

    fn run_pipeline(&mut self, request: &SchedulingRequest) -> Result<SchedulingResult> {
        let day_of_week = clock::day_of_week(&request.date)
            .ok_or_else(|| EngineError::InvalidDate(request.date.clone()))?;

        let wake = clock::parse_hhmm(&request.preferences.wake_time);
        let sleep = clock::parse_hhmm(&request.preferences.sleep_time);
        if wake == sleep {
            return Err(EngineError::InvalidPreferences(
                "wake and sleep times leave no awake window".to_string(),
            ));
        }
        let day_start = wake;
        // A start at or past 24:00 would re-parse to the front of the day,
        // so the placeable window stops at midnight.
        let day_end = (if sleep > wake {
            sleep
        } else {
            sleep + clock::MINUTES_PER_DAY
        })
        .min(clock::MINUTES_PER_DAY);

        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();
        let mut conflicts = Vec::new();

        // Fixed blocks anchor the day.
        let sleep_block = build_sleep_block(&request.preferences, self.ids.as_mut());
        let sleep_block_id = sleep_block.id.clone();
        let mut blocks = vec![sleep_block];
        let mut palette = ColorPalette::new();
        blocks.extend(import_calendar_blocks(
            &request.calendar_blocks,
            self.ids.as_mut(),
            &mut palette,
        ));

        // Meeting density is the one signal the engine derives itself,
        // written back into the life context before the adapters see it.
        let density = MeetingDensity::from_calendar(&blocks[1..]);
        let life = request.life_context.clone().map(|mut life| {
            life.meeting_density = Some(density);
            life
        });
        debug!(?density, date = %request.date, "derived meeting density");

        let ctx = AdapterContext {
            wake_minutes: wake,
            energy_peak: request.preferences.energy_peak,
            recovery: request.recovery_context.as_ref(),
            patterns: &request.completion_patterns,
            life: life.as_ref(),
            meeting_density: density,
        };

        for candidate in &request.workout_blocks {
            let shaped =
                adapters::apply(&WORKOUT_ADAPTERS, PlacementCandidate::from_candidate(candidate), &ctx);
            self.place_candidate(
                shaped,
                &mut blocks,
                day_start,
                day_end,
                &sleep_block_id,
                &mut conflicts,
                &mut warnings,
            );
        }
        for candidate in &request.meal_blocks {
            let shaped =
                adapters::apply(&MEAL_ADAPTERS, PlacementCandidate::from_candidate(candidate), &ctx);
            self.place_candidate(
                shaped,
                &mut blocks,
                day_start,
                day_end,
                &sleep_block_id,
                &mut conflicts,
                &mut warnings,
            );
        }

        blocks.sort_by_key(|b| b.start_minutes());
        conflicts.extend(detect_conflicts(&blocks));

        // The marker is display-only and never an operand in a conflict.
        if let Some(marker) = self.fasting_marker(life.as_ref(), &blocks, day_end) {
            blocks.push(marker);
            blocks.sort_by_key(|b| b.start_minutes());
        }

        let buffers =
            inject_transition_buffers(&blocks, &self.config.transition_rules, self.ids.as_mut());
        blocks.extend(buffers);
        blocks.sort_by_key(|b| b.start_minutes());

        let stats = compute_stats(
            &blocks,
            &request.preferences.wake_time,
            &request.preferences.sleep_time,
        );
        if stats.is_overloaded() {
            warnings.push(format!(
                "Over {} hours scheduled; consider trimming the day",
                stats.scheduled_minutes / 60
            ));
        }
        if stats.free_minutes < 120 {
            suggestions
                .push("Your day is tightly packed; consider moving an activity to tomorrow".into());
        }
        if request
            .recovery_context
            .as_ref()
            .is_some_and(|r| r.is_low_recovery)
        {
            suggestions.push("Low recovery today; workouts were shortened".into());
        }

        let success = conflicts.is_empty();
        Ok(SchedulingResult {
            success,
            timeline: DailyTimeline {
                date: request.date.clone(),
                day_of_week,
                blocks,
                total_scheduled_minutes: stats.scheduled_minutes,
                total_free_minutes: stats.free_minutes,
                completion_rate: mean_completion_rate(request),
            },
            conflicts,
            warnings,
            suggestions,
        })
    }

    /// Run the slot search for a shaped candidate and append the placed
    /// block. Exhaustion is a soft failure; an awake window too small for
    /// the duration is an `impossible` conflict.
    #[allow(clippy::too_many_arguments)]
    fn place_candidate(
        &mut self,
        shaped: PlacementCandidate,
        blocks: &mut Vec<TimeBlock>,
        day_start: u32,
        day_end: u32,
        sleep_block_id: &str,
        conflicts: &mut Vec<SchedulingConflict>,
        warnings: &mut Vec<String>,
    ) {
        let preferred = shaped.preferred_minutes.unwrap_or(day_start);
        let id = self.ids.next_id();

        let start = if shaped.duration_minutes > day_end - day_start {
            conflicts.push(SchedulingConflict {
                conflict_type: ConflictType::Impossible,
                block_id: id.clone(),
                other_block_id: sleep_block_id.to_string(),
                message: format!(
                    "'{}' needs {} minutes but only {} are awake",
                    shaped.title,
                    shaped.duration_minutes,
                    day_end - day_start
                ),
            });
            preferred
        } else {
            let finder = SlotFinder::new(&self.config.buffer_rules, day_start, day_end);
            match finder.find_start(preferred, shaped.duration_minutes, shaped.block_type, blocks) {
                SlotOutcome::Placed(start) => start,
                SlotOutcome::Fallback(start) => {
                    warnings.push(format!(
                        "No free slot for '{}'; kept its preferred time",
                        shaped.title
                    ));
                    start
                }
            }
        };

        blocks.push(TimeBlock {
            id,
            block_type: shaped.block_type,
            title: shaped.title,
            start_time: clock::format_hhmm(start),
            end_time: clock::format_hhmm(start + shaped.duration_minutes),
            duration_minutes: shaped.duration_minutes,
            priority: 3,
            flexibility: 0.5,
            color: shaped.color,
            ai_generated: true,
            is_all_day: false,
            is_ooo: false,
        });
    }

    /// One synthetic buffer marking the evening fast, from the eating
    /// window close to bed time, trimmed past anything already placed.
    /// Added after conflict detection; it is display-only.
    fn fasting_marker(
        &mut self,
        life: Option<&LifeContext>,
        blocks: &[TimeBlock],
        day_end: u32,
    ) -> Option<TimeBlock> {
        let (_, close) = life?.eating_window()?;
        let mut start = close;
        for block in blocks.iter().filter(|b| b.is_timed()) {
            if block.start_minutes() < day_end && block.end_minutes() > start {
                start = start.max(block.end_minutes());
            }
        }
        if start >= day_end {
            return None;
        }

        Some(TimeBlock {
            id: self.ids.next_id(),
            block_type: BlockType::Buffer,
            title: "Fasting Window".to_string(),
            start_time: clock::format_hhmm(start),
            end_time: clock::format_hhmm(day_end),
            duration_minutes: day_end - start,
            priority: 1,
            flexibility: 1.0,
            color: BlockType::Buffer.default_color().to_string(),
            ai_generated: true,
            is_all_day: false,
            is_ooo: false,
        })
    }
}

impl Default for DayPlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean learned completion rate over the candidate block types in the
/// request; 0.0 without pattern data. Rates fold in candidate order so
/// the mean is bit-identical across calls.
fn mean_completion_rate(request: &SchedulingRequest) -> f64 {
    let mut seen = std::collections::HashSet::new();
    let rates: Vec<f64> = request
        .workout_blocks
        .iter()
        .chain(request.meal_blocks.iter())
        .filter(|c| seen.insert(c.block_type))
        .filter_map(|c| request.completion_patterns.get(&c.block_type))
        .map(|p| p.completion_rate)
        .collect();
    if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    }
}
