//! Day-level aggregate minutes and the feasibility warning.

use crate::clock;
use crate::model::{BlockType, TimeBlock};

/// A day counts as over-scheduled past 16 hours of non-sleep blocks.
pub const OVERLOAD_MINUTES: u32 = 16 * 60;

/// Aggregate minutes for the finished day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStats {
    pub awake_minutes: u32,
    pub scheduled_minutes: u32,
    pub free_minutes: u32,
}

impl DayStats {
    /// Whether the scheduled total trips the overload warning. A warning,
    /// never an error.
    pub fn is_overloaded(&self) -> bool {
        self.scheduled_minutes > OVERLOAD_MINUTES
    }
}

/// Compute the day's totals from the finished block list.
///
/// Scheduled minutes sum every non-sleep, non-all-day block, injected
/// buffers included. Free minutes never go negative.
pub fn compute_stats(blocks: &[TimeBlock], wake_time: &str, sleep_time: &str) -> DayStats {
    let wake = clock::parse_hhmm(wake_time);
    let sleep = clock::parse_hhmm(sleep_time);
    let awake_minutes = if sleep > wake {
        sleep - wake
    } else {
        clock::MINUTES_PER_DAY - wake + sleep
    };

    let scheduled_minutes = blocks
        .iter()
        .filter(|b| b.is_timed() && b.block_type != BlockType::Sleep)
        .map(|b| b.duration_minutes)
        .sum();

    DayStats {
        awake_minutes,
        scheduled_minutes,
        free_minutes: awake_minutes.saturating_sub(scheduled_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(block_type: BlockType, duration: u32, all_day: bool) -> TimeBlock {
        TimeBlock {
            id: "b".into(),
            block_type,
            title: "Block".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            duration_minutes: duration,
            priority: 3,
            flexibility: 0.5,
            color: block_type.default_color().into(),
            ai_generated: true,
            is_all_day: all_day,
            is_ooo: false,
        }
    }

    #[test]
    fn awake_minutes_wrap_overnight() {
        let stats = compute_stats(&[], "06:00", "22:00");
        assert_eq!(stats.awake_minutes, 960);

        // bed time past midnight
        let stats = compute_stats(&[], "06:00", "01:00");
        assert_eq!(stats.awake_minutes, 19 * 60);
    }

    #[test]
    fn sleep_and_all_day_blocks_are_excluded() {
        let blocks = vec![
            block(BlockType::Sleep, 480, false),
            block(BlockType::CalendarEvent, 0, true),
            block(BlockType::Workout, 45, false),
            block(BlockType::Buffer, 15, false),
        ];
        let stats = compute_stats(&blocks, "06:00", "22:00");
        assert_eq!(stats.scheduled_minutes, 60);
        assert_eq!(stats.free_minutes, 900);
    }

    #[test]
    fn free_minutes_never_go_negative() {
        let blocks = vec![block(BlockType::Work, 1100, false)];
        let stats = compute_stats(&blocks, "06:00", "22:00");
        assert_eq!(stats.free_minutes, 0);
        assert!(stats.is_overloaded());
    }

    #[test]
    fn overload_threshold_is_sixteen_hours() {
        let blocks = vec![block(BlockType::Work, OVERLOAD_MINUTES, false)];
        let stats = compute_stats(&blocks, "05:00", "23:00");
        assert!(!stats.is_overloaded());

        let blocks = vec![block(BlockType::Work, OVERLOAD_MINUTES + 1, false)];
        let stats = compute_stats(&blocks, "05:00", "23:00");
        assert!(stats.is_overloaded());
    }
}
