//! Adaptive context signals consumed by the placement pipeline.
//!
//! The engine does not learn anything itself: recovery status, completion
//! patterns, and life context arrive pre-aggregated from the surrounding
//! application. Meeting density is the one signal the engine derives, from
//! the imported calendar blocks, before the adapters run.

use serde::{Deserialize, Serialize};

use crate::clock;
use crate::model::block::TimeBlock;

/// External recovery signal (e.g. sleep/HRV-derived score) indicating
/// whether the user should receive a lighter workout today.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecoveryContext {
    pub is_low_recovery: bool,
    #[serde(default)]
    pub recovery_score: Option<f64>,
}

/// Pre-aggregated completion habit for one block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPattern {
    /// Fraction of past blocks of this type the user actually completed.
    pub completion_rate: f64,
    /// Learned "HH:MM" start the user tends to complete this block at.
    #[serde(default)]
    pub preferred_window: Option<String>,
    #[serde(default)]
    pub sample_count: u32,
}

impl CompletionPattern {
    /// Whether the pattern is strong enough to override the defaults.
    pub fn overrides_default(&self) -> bool {
        self.completion_rate > 0.6 && self.preferred_window.is_some()
    }
}

/// Coarse tier summarizing how many timed calendar events fall in the
/// morning vs. the afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingDensity {
    Low,
    Medium,
    High,
}

impl MeetingDensity {
    /// Derive the tier from the imported calendar blocks. All-day events
    /// carry no meeting time and are ignored.
    pub fn from_calendar(blocks: &[TimeBlock]) -> Self {
        let noon = 12 * 60;
        let timed: Vec<u32> = blocks
            .iter()
            .filter(|b| b.is_timed())
            .map(|b| b.start_minutes())
            .collect();
        let morning = timed.iter().filter(|&&start| start < noon).count();
        let afternoon = timed.len() - morning;

        if morning >= 3 || afternoon >= 3 {
            MeetingDensity::High
        } else if timed.len() >= 3 {
            MeetingDensity::Medium
        } else {
            MeetingDensity::Low
        }
    }
}

/// Day-level lifestyle context: intermittent fasting window, cheat-day
/// flag, out-of-office flag, and the engine-computed meeting density.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LifeContext {
    #[serde(default)]
    pub is_fasting: bool,
    /// "HH:MM" at which the fast begins -- the eating window closes here.
    #[serde(default)]
    pub fasting_start: Option<String>,
    /// "HH:MM" at which the fast ends -- the eating window opens here.
    #[serde(default)]
    pub fasting_end: Option<String>,
    #[serde(default)]
    pub is_cheat_day: bool,
    #[serde(default)]
    pub is_ooo: bool,
    /// Computed by the engine from the calendar blocks and written back
    /// here before the adapters run.
    #[serde(default)]
    pub meeting_density: Option<MeetingDensity>,
}

impl LifeContext {
    /// Eating window as (open, close) minutes since midnight, when the
    /// fasting clamp is active (fasting and not a cheat day).
    pub fn eating_window(&self) -> Option<(u32, u32)> {
        if !self.is_fasting || self.is_cheat_day {
            return None;
        }
        let open = clock::parse_hhmm(self.fasting_end.as_deref()?);
        let close = clock::parse_hhmm(self.fasting_start.as_deref()?);
        Some((open, close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::block::BlockType;

    fn calendar_block(start: &str, all_day: bool) -> TimeBlock {
        TimeBlock {
            id: start.to_string(),
            block_type: BlockType::CalendarEvent,
            title: "Meeting".into(),
            start_time: if all_day { "00:00".into() } else { start.into() },
            end_time: if all_day { "23:59".into() } else { start.into() },
            duration_minutes: if all_day { 0 } else { 30 },
            priority: 4,
            flexibility: 0.0,
            color: "#4F83CC".into(),
            ai_generated: false,
            is_all_day: all_day,
            is_ooo: false,
        }
    }

    #[test]
    fn density_low_for_sparse_days() {
        let blocks = vec![calendar_block("09:00", false), calendar_block("15:00", false)];
        assert_eq!(MeetingDensity::from_calendar(&blocks), MeetingDensity::Low);
    }

    #[test]
    fn density_medium_for_spread_out_days() {
        let blocks = vec![
            calendar_block("09:00", false),
            calendar_block("10:00", false),
            calendar_block("14:00", false),
        ];
        assert_eq!(MeetingDensity::from_calendar(&blocks), MeetingDensity::Medium);
    }

    #[test]
    fn density_high_when_one_half_is_packed() {
        let blocks = vec![
            calendar_block("09:00", false),
            calendar_block("10:00", false),
            calendar_block("11:00", false),
        ];
        assert_eq!(MeetingDensity::from_calendar(&blocks), MeetingDensity::High);
    }

    #[test]
    fn density_ignores_all_day_events() {
        let blocks = vec![
            calendar_block("09:00", true),
            calendar_block("10:00", true),
            calendar_block("11:00", true),
        ];
        assert_eq!(MeetingDensity::from_calendar(&blocks), MeetingDensity::Low);
    }

    #[test]
    fn eating_window_requires_active_fast() {
        let mut ctx = LifeContext {
            is_fasting: true,
            fasting_start: Some("20:00".into()),
            fasting_end: Some("12:00".into()),
            ..Default::default()
        };
        assert_eq!(ctx.eating_window(), Some((720, 1200)));

        ctx.is_cheat_day = true;
        assert_eq!(ctx.eating_window(), None);

        ctx.is_cheat_day = false;
        ctx.is_fasting = false;
        assert_eq!(ctx.eating_window(), None);
    }
}
