//! Fixed-block placement: the sleep block and imported calendar events.
//!
//! These blocks anchor the day before any adaptive placement runs. They
//! carry top priority and zero flexibility -- no later step ever moves
//! them.

use crate::clock;
use crate::model::{
    BlockType, CalendarBlock, ColorPalette, IdSource, SchedulePreferences, TimeBlock,
};

/// Build the single sleep block for the day.
///
/// Starts at the bed time and ends at the wake time; an overnight window
/// (wake earlier than bed time) wraps through midnight.
pub fn build_sleep_block(preferences: &SchedulePreferences, ids: &mut dyn IdSource) -> TimeBlock {
    let sleep = clock::parse_hhmm(&preferences.sleep_time);
    let wake = clock::parse_hhmm(&preferences.wake_time);
    let duration = clock::span_minutes(sleep, wake);

    TimeBlock {
        id: ids.next_id(),
        block_type: BlockType::Sleep,
        title: "Sleep".to_string(),
        start_time: clock::format_hhmm(sleep),
        end_time: clock::format_hhmm(wake),
        duration_minutes: duration,
        priority: 5,
        flexibility: 0.0,
        color: BlockType::Sleep.default_color().to_string(),
        ai_generated: false,
        is_all_day: false,
        is_ooo: false,
    }
}

/// Import device-calendar commitments as immovable blocks.
///
/// Timed events become priority-4 zero-flexibility blocks with a palette
/// color. All-day events pass through with a zero duration and a full
/// display span; every later pass skips them.
pub fn import_calendar_blocks(
    calendar: &[CalendarBlock],
    ids: &mut dyn IdSource,
    palette: &mut ColorPalette,
) -> Vec<TimeBlock> {
    calendar
        .iter()
        .map(|event| {
            if event.is_all_day {
                TimeBlock {
                    id: ids.next_id(),
                    block_type: BlockType::CalendarEvent,
                    title: event.title.clone(),
                    start_time: "00:00".to_string(),
                    end_time: "23:59".to_string(),
                    duration_minutes: 0,
                    priority: 4,
                    flexibility: 0.0,
                    color: palette.next_color(),
                    ai_generated: false,
                    is_all_day: true,
                    is_ooo: event.is_ooo,
                }
            } else {
                let start = clock::parse_hhmm(&event.start_time);
                let end = clock::parse_hhmm(&event.end_time);
                TimeBlock {
                    id: ids.next_id(),
                    block_type: BlockType::CalendarEvent,
                    title: event.title.clone(),
                    start_time: clock::format_hhmm(start),
                    end_time: clock::format_hhmm(end),
                    duration_minutes: end.saturating_sub(start),
                    priority: 4,
                    flexibility: 0.0,
                    color: palette.next_color(),
                    ai_generated: false,
                    is_all_day: false,
                    is_ooo: event.is_ooo,
                }
            }
        })
        .collect()
}
