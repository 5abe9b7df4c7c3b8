//! Adaptive slot search under asymmetric buffer rules.
//!
//! Given a preferred start, a duration, and the block type being placed,
//! find a start for which no conflict exists against the already-placed
//! blocks. Search order:
//!
//! 1. forward scan in 15-minute steps from the preferred time
//! 2. backward scan in 15-minute steps down to the wake time
//! 3. gap scan over the sorted existing blocks as a last resort
//!
//! Exhaustion is a soft failure: the preferred time comes back unchanged
//! with a logged warning, and the conflict detector flags the fallout.

use tracing::{debug, warn};

use crate::model::{BlockType, TimeBlock};

/// Asymmetric buffer requirements between adjacent blocks, in minutes.
///
/// `after_*` is the clearance an existing block demands behind it;
/// `before_*` is the clearance a block demands in front of it. The gap
/// between consecutive blocks A then B must be at least
/// `max(after(A), before(B))`. Heuristic constants -- tests pin them.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferRules {
    pub after_sleep: u32,
    pub after_calendar: u32,
    pub after_workout: u32,
    pub after_default: u32,
    pub before_workout: u32,
    pub before_meal: u32,
    pub before_default: u32,
    /// Scan step in minutes.
    pub slot_step: u32,
    /// Forward/backward scan length: 96 steps of 15 minutes covers 24h.
    pub max_steps: u32,
}

impl Default for BufferRules {
    fn default() -> Self {
        Self {
            after_sleep: 15,
            after_calendar: 15,
            after_workout: 15,
            after_default: 10,
            before_workout: 15,
            before_meal: 5,
            before_default: 10,
            slot_step: 15,
            max_steps: 96,
        }
    }
}

impl BufferRules {
    /// Required clearance after a block of the given type.
    pub fn required_after(&self, block_type: BlockType) -> u32 {
        match block_type {
            BlockType::Sleep => self.after_sleep,
            BlockType::CalendarEvent => self.after_calendar,
            BlockType::Workout => self.after_workout,
            _ => self.after_default,
        }
    }

    /// Required clearance before a block of the given type.
    pub fn required_before(&self, block_type: BlockType) -> u32 {
        match block_type {
            BlockType::Workout => self.before_workout,
            t if t.is_meal() => self.before_meal,
            _ => self.before_default,
        }
    }

    /// Required gap between consecutive blocks `earlier` then `later`.
    pub fn required_gap(&self, earlier: BlockType, later: BlockType) -> u32 {
        self.required_after(earlier).max(self.required_before(later))
    }
}

/// Outcome of a slot search, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// A conflict-free start was found.
    Placed(u32),
    /// Nothing fits; the preferred time comes back unchanged.
    Fallback(u32),
}

impl SlotOutcome {
    pub fn start_minutes(&self) -> u32 {
        match self {
            SlotOutcome::Placed(start) | SlotOutcome::Fallback(start) => *start,
        }
    }
}

/// Slot finder for one day's awake window `[day_start, day_end)`.
///
/// The engine clamps `day_end` to midnight; starts at or past 24:00 are
/// not representable in sorted "HH:MM" order.
pub struct SlotFinder<'a> {
    rules: &'a BufferRules,
    day_start: u32,
    day_end: u32,
}

impl<'a> SlotFinder<'a> {
    pub fn new(rules: &'a BufferRules, day_start: u32, day_end: u32) -> Self {
        Self {
            rules,
            day_start,
            day_end,
        }
    }

    /// Find a start time for a candidate of `duration` minutes and the
    /// given type against the existing non-all-day blocks.
    pub fn find_start(
        &self,
        preferred: u32,
        duration: u32,
        block_type: BlockType,
        existing: &[TimeBlock],
    ) -> SlotOutcome {
        let step = self.rules.slot_step;

        // Forward scan from the preferred time.
        for i in 0..self.rules.max_steps {
            let start = preferred + i * step;
            if self.fits(start, duration, block_type, existing) {
                debug!(start, duration, "slot found on forward scan");
                return SlotOutcome::Placed(start);
            }
        }

        // Backward scan down to the wake time.
        for i in 1..self.rules.max_steps {
            let offset = i * step;
            if preferred < self.day_start + offset {
                break;
            }
            let start = preferred - offset;
            if self.fits(start, duration, block_type, existing) {
                debug!(start, duration, "slot found on backward scan");
                return SlotOutcome::Placed(start);
            }
        }

        // Gap scan as a last resort.
        if let Some(start) = self.scan_gaps(duration, block_type, existing) {
            debug!(start, duration, "slot found on gap scan");
            return SlotOutcome::Placed(start);
        }

        warn!(
            preferred,
            duration,
            ?block_type,
            "no feasible slot; day is over-scheduled"
        );
        SlotOutcome::Fallback(preferred)
    }

    /// Whether `[start, start + duration)` sits inside the awake window
    /// without overlapping or crowding any existing block.
    fn fits(&self, start: u32, duration: u32, block_type: BlockType, existing: &[TimeBlock]) -> bool {
        let end = start + duration;
        if start < self.day_start || end > self.day_end {
            return false;
        }

        existing.iter().filter(|b| b.is_timed()).all(|block| {
            let block_start = block.start_minutes();
            let block_end = block.end_minutes();

            if start < block_end && end > block_start {
                return false; // direct overlap
            }
            if block_end <= start {
                // candidate follows the block
                start - block_end >= self.rules.required_gap(block.block_type, block_type)
            } else {
                // candidate precedes the block
                block_start - end >= self.rules.required_gap(block_type, block.block_type)
            }
        })
    }

    /// Walk the gaps around and between the sorted existing blocks and
    /// return the first whose free span, after subtracting the required
    /// buffers, fits the duration.
    fn scan_gaps(
        &self,
        duration: u32,
        block_type: BlockType,
        existing: &[TimeBlock],
    ) -> Option<u32> {
        let mut timed: Vec<&TimeBlock> = existing.iter().filter(|b| b.is_timed()).collect();
        timed.sort_by_key(|b| b.start_minutes());

        if timed.is_empty() {
            return (self.day_start + duration <= self.day_end).then_some(self.day_start);
        }

        let mut candidates = Vec::with_capacity(timed.len() + 1);
        candidates.push((None, Some(timed[0])));
        for pair in timed.windows(2) {
            candidates.push((Some(pair[0]), Some(pair[1])));
        }
        candidates.push((Some(timed[timed.len() - 1]), None));

        for (earlier, later) in candidates {
            let usable_start = match earlier {
                Some(block) => {
                    block.end_minutes() + self.rules.required_gap(block.block_type, block_type)
                }
                None => self.day_start,
            };
            let usable_end = match later {
                Some(block) => block
                    .start_minutes()
                    .saturating_sub(self.rules.required_gap(block_type, block.block_type)),
                None => self.day_end,
            };
            if usable_start < self.day_start || usable_end > self.day_end {
                continue;
            }
            if usable_end >= usable_start + duration {
                return Some(usable_start);
            }
        }
        None
    }
}
