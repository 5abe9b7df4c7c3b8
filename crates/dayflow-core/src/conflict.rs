//! Residual conflict detection over the sorted timeline.
//!
//! Runs after placement and sorting, before buffer injection. Only
//! non-all-day blocks participate; all-day calendar events never appear as
//! an operand in a conflict. Conflicts never stop the pipeline -- they flip
//! `success` to false and surface in the result.

use crate::model::{ConflictType, SchedulingConflict, TimeBlock};

/// Positive gaps strictly below this many minutes are reported as
/// too-tight. Heuristic constant -- tests pin it.
pub const TOO_TIGHT_MINUTES: u32 = 5;

/// Scan adjacent pairs of the sorted block list for overlaps and
/// too-tight gaps. A block can appear in multiple conflicts.
pub fn detect_conflicts(blocks: &[TimeBlock]) -> Vec<SchedulingConflict> {
    let timed: Vec<&TimeBlock> = blocks.iter().filter(|b| b.is_timed()).collect();
    let mut conflicts = Vec::new();

    for pair in timed.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let current_end = current.end_minutes();
        let next_start = next.start_minutes();

        if current_end > next_start {
            conflicts.push(SchedulingConflict {
                conflict_type: ConflictType::Overlap,
                block_id: current.id.clone(),
                other_block_id: next.id.clone(),
                message: format!(
                    "'{}' ({} - {}) overlaps '{}' ({} - {})",
                    current.title,
                    current.start_time,
                    current.end_time,
                    next.title,
                    next.start_time,
                    next.end_time
                ),
            });
        } else {
            let gap = next_start - current_end;
            if gap > 0 && gap < TOO_TIGHT_MINUTES {
                conflicts.push(SchedulingConflict {
                    conflict_type: ConflictType::TooTight,
                    block_id: current.id.clone(),
                    other_block_id: next.id.clone(),
                    message: format!(
                        "Only {gap} minutes between '{}' and '{}'",
                        current.title, next.title
                    ),
                });
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockType;

    fn block(id: &str, start: &str, duration: u32) -> TimeBlock {
        let start_minutes = crate::clock::parse_hhmm(start);
        TimeBlock {
            id: id.to_string(),
            block_type: BlockType::CalendarEvent,
            title: id.to_string(),
            start_time: start.to_string(),
            end_time: crate::clock::format_hhmm(start_minutes + duration),
            duration_minutes: duration,
            priority: 4,
            flexibility: 0.0,
            color: "#4F83CC".into(),
            ai_generated: false,
            is_all_day: false,
            is_ooo: false,
        }
    }

    #[test]
    fn overlapping_pair_is_reported() {
        let blocks = vec![block("a", "09:00", 60), block("b", "09:30", 60)];
        let conflicts = detect_conflicts(&blocks);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].conflict_type, ConflictType::Overlap);
        assert_eq!(conflicts[0].block_id, "a");
        assert_eq!(conflicts[0].other_block_id, "b");
    }

    #[test]
    fn too_tight_gap_is_reported() {
        for gap in 1..5 {
            let blocks = vec![block("a", "09:00", 60), block("b", "10:00", 30)];
            let mut shifted = blocks.clone();
            shifted[1] = block("b", &crate::clock::format_hhmm(600 + gap), 30);
            let conflicts = detect_conflicts(&shifted);
            assert_eq!(conflicts.len(), 1, "gap of {gap} should be too tight");
            assert_eq!(conflicts[0].conflict_type, ConflictType::TooTight);
        }
    }

    #[test]
    fn boundary_gaps_are_clean() {
        // back-to-back is fine, and so is exactly five minutes
        let blocks = vec![block("a", "09:00", 60), block("b", "10:00", 30)];
        assert!(detect_conflicts(&blocks).is_empty());

        let blocks = vec![block("a", "09:00", 60), block("b", "10:05", 30)];
        assert!(detect_conflicts(&blocks).is_empty());
    }

    #[test]
    fn all_day_blocks_never_conflict() {
        let mut all_day = block("all-day", "00:00", 0);
        all_day.is_all_day = true;
        all_day.end_time = "23:59".into();
        let blocks = vec![all_day, block("a", "09:00", 60), block("b", "09:30", 30)];
        let conflicts = detect_conflicts(&blocks);
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts.iter().all(|c| c.block_id != "all-day"
            && c.other_block_id != "all-day"));
    }

    #[test]
    fn one_block_can_appear_in_multiple_conflicts() {
        let blocks = vec![
            block("a", "09:00", 120),
            block("b", "09:30", 45),
            block("c", "10:00", 30),
        ];
        let conflicts = detect_conflicts(&blocks);
        assert_eq!(conflicts.len(), 2);
        // b overlaps both neighbors
        assert!(conflicts
            .iter()
            .all(|c| c.block_id == "b" || c.other_block_id == "b"));
    }
}
