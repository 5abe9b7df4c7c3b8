//! Transition buffer injection.
//!
//! After the timeline is sorted, adjacent pairs whose natural gap is
//! positive but below a context-specific minimum get an explicit `buffer`
//! block filling exactly that gap. Because the buffer fills the gap
//! precisely, later passes see back-to-back blocks and nothing new to
//! flag.

use crate::clock;
use crate::model::{BlockType, IdSource, TimeBlock};

/// Minimum transition gaps between adjacent block types, in minutes.
/// Heuristic constants -- tests pin them.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRules {
    pub sleep_to_meal: u32,
    pub calendar_to_meal: u32,
    pub into_workout: u32,
    pub out_of_workout: u32,
    pub meal_to_calendar: u32,
    pub default_gap: u32,
}

impl Default for TransitionRules {
    fn default() -> Self {
        Self {
            sleep_to_meal: 60,
            calendar_to_meal: 45,
            into_workout: 30,
            out_of_workout: 20,
            meal_to_calendar: 15,
            default_gap: 10,
        }
    }
}

impl TransitionRules {
    /// Minimum gap and buffer title for a `prev -> next` transition.
    pub fn transition(&self, prev: BlockType, next: BlockType) -> (u32, &'static str) {
        match (prev, next) {
            (BlockType::Sleep, next) if next.is_meal() => (self.sleep_to_meal, "Morning Routine"),
            (BlockType::CalendarEvent, next) if next.is_meal() => {
                (self.calendar_to_meal, "Transition Time")
            }
            (_, BlockType::Workout) => (self.into_workout, "Workout Prep"),
            (BlockType::Workout, _) => (self.out_of_workout, "Cooldown"),
            (prev, BlockType::CalendarEvent) if prev.is_meal() => {
                (self.meal_to_calendar, "Wrap Up")
            }
            _ => (self.default_gap, "Transition"),
        }
    }
}

/// Walk adjacent non-all-day pairs of a sorted block list and synthesize
/// buffer blocks for the too-small positive gaps. Returns only the new
/// buffers; the caller merges and re-sorts.
pub fn inject_transition_buffers(
    blocks: &[TimeBlock],
    rules: &TransitionRules,
    ids: &mut dyn IdSource,
) -> Vec<TimeBlock> {
    let timed: Vec<&TimeBlock> = blocks.iter().filter(|b| b.is_timed()).collect();
    let mut buffers = Vec::new();

    for pair in timed.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let prev_end = prev.end_minutes();
        let next_start = next.start_minutes();
        if next_start <= prev_end {
            continue; // overlap or back-to-back; the detector owns overlaps
        }

        let gap = next_start - prev_end;
        let (minimum, title) = rules.transition(prev.block_type, next.block_type);
        if gap >= minimum {
            continue;
        }

        buffers.push(TimeBlock {
            id: ids.next_id(),
            block_type: BlockType::Buffer,
            title: title.to_string(),
            start_time: clock::format_hhmm(prev_end),
            end_time: clock::format_hhmm(next_start),
            duration_minutes: gap,
            priority: 1,
            flexibility: 1.0,
            color: BlockType::Buffer.default_color().to_string(),
            ai_generated: true,
            is_all_day: false,
            is_ooo: false,
        });
    }

    buffers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SequentialIdSource;

    fn block(block_type: BlockType, start: &str, duration: u32) -> TimeBlock {
        let start_minutes = crate::clock::parse_hhmm(start);
        TimeBlock {
            id: start.to_string(),
            block_type,
            title: "Block".into(),
            start_time: start.to_string(),
            end_time: crate::clock::format_hhmm(start_minutes + duration),
            duration_minutes: duration,
            priority: 3,
            flexibility: 0.5,
            color: block_type.default_color().into(),
            ai_generated: true,
            is_all_day: false,
            is_ooo: false,
        }
    }

    #[test]
    fn transition_table_pins_default_constants() {
        let rules = TransitionRules::default();
        assert_eq!(
            rules.transition(BlockType::Sleep, BlockType::MealEating),
            (60, "Morning Routine")
        );
        assert_eq!(
            rules.transition(BlockType::CalendarEvent, BlockType::MealPrep),
            (45, "Transition Time")
        );
        assert_eq!(
            rules.transition(BlockType::Sleep, BlockType::Workout),
            (30, "Workout Prep")
        );
        assert_eq!(
            rules.transition(BlockType::Workout, BlockType::CalendarEvent),
            (20, "Cooldown")
        );
        assert_eq!(
            rules.transition(BlockType::MealEating, BlockType::CalendarEvent),
            (15, "Wrap Up")
        );
        assert_eq!(
            rules.transition(BlockType::Personal, BlockType::Work),
            (10, "Transition")
        );
    }

    #[test]
    fn small_gap_gets_an_exactly_filling_buffer() {
        let rules = TransitionRules::default();
        let mut ids = SequentialIdSource::new("buf");
        // calendar event ends 08:00, workout starts 08:15: 15 < 30 minimum
        let blocks = vec![
            block(BlockType::CalendarEvent, "07:00", 60),
            block(BlockType::Workout, "08:15", 45),
        ];
        let buffers = inject_transition_buffers(&blocks, &rules, &mut ids);
        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].title, "Workout Prep");
        assert_eq!(buffers[0].start_time, "08:00");
        assert_eq!(buffers[0].end_time, "08:15");
        assert_eq!(buffers[0].duration_minutes, 15);
        assert_eq!(buffers[0].priority, 1);
        assert_eq!(buffers[0].flexibility, 1.0);
    }

    #[test]
    fn generous_gaps_and_overlaps_get_no_buffer() {
        let rules = TransitionRules::default();
        let mut ids = SequentialIdSource::new("buf");
        let blocks = vec![
            block(BlockType::Workout, "07:00", 45),
            // 75 minute gap, well past the 20-minute cooldown minimum
            block(BlockType::Personal, "09:00", 30),
            // overlapping pair: detector territory, not buffer territory
            block(BlockType::CalendarEvent, "09:15", 60),
        ];
        let buffers = inject_transition_buffers(&blocks, &rules, &mut ids);
        assert!(buffers.is_empty());
    }

    #[test]
    fn back_to_back_blocks_get_no_buffer() {
        let rules = TransitionRules::default();
        let mut ids = SequentialIdSource::new("buf");
        let blocks = vec![
            block(BlockType::MealEating, "12:00", 30),
            block(BlockType::Work, "12:30", 60),
        ];
        let buffers = inject_transition_buffers(&blocks, &rules, &mut ids);
        assert!(buffers.is_empty());
    }

    #[test]
    fn all_day_blocks_are_skipped() {
        let rules = TransitionRules::default();
        let mut ids = SequentialIdSource::new("buf");
        let mut all_day = block(BlockType::CalendarEvent, "00:00", 0);
        all_day.is_all_day = true;
        all_day.end_time = "23:59".into();
        let blocks = vec![
            all_day,
            block(BlockType::Workout, "07:00", 45),
            block(BlockType::Personal, "07:50", 30),
        ];
        let buffers = inject_transition_buffers(&blocks, &rules, &mut ids);
        // only the workout -> personal pair is considered: 5 < 20
        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].title, "Cooldown");
        assert_eq!(buffers[0].duration_minutes, 5);
    }
}
