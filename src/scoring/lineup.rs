// Optimal lineup selection under fixed position-slot limits.
//
// Slot quotas are fixed and disjoint per position, so taking the top scorers
// within each position independently maximizes the team sum; no cross-slot
// search is needed.

use crate::model::PlayerScore;

// ---------------------------------------------------------------------------
// Slot configuration
// ---------------------------------------------------------------------------

/// Position slot quotas in lineup display order.
///
/// Backed by an explicit ordered sequence rather than a map so that slot
/// iteration order (and therefore lineup concatenation order) is a stated
/// part of the configuration, never an artifact of map iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupSlots {
    slots: Vec<(String, usize)>,
}

impl LineupSlots {
    /// Build slot quotas from `(position, count)` pairs in display order.
    /// Positions are trimmed and upper-cased.
    pub fn new(slots: Vec<(String, usize)>) -> Self {
        LineupSlots {
            slots: slots
                .into_iter()
                .map(|(pos, count)| (pos.trim().to_uppercase(), count))
                .collect(),
        }
    }

    /// Iterate `(position, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.slots.iter().map(|(pos, count)| (pos.as_str(), *count))
    }

    /// Slot count for a position, if it has any.
    pub fn count_for(&self, position: &str) -> Option<usize> {
        let position = position.trim().to_uppercase();
        self.slots
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, count)| *count)
    }
}

/// Standard lineup: 1 QB, 1 RB, 2 WR, 1 TE.
impl Default for LineupSlots {
    fn default() -> Self {
        LineupSlots::new(vec![
            ("QB".into(), 1),
            ("RB".into(), 1),
            ("WR".into(), 2),
            ("TE".into(), 1),
        ])
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Select the highest-scoring lineup that fits the slot quotas.
///
/// Players are grouped by position; each group is stable-sorted by points
/// descending (ties keep input order) and the top `count` are taken. A group
/// smaller than its quota fills only what it has. Positions without a slot
/// are dropped; they never fill another position's slot. Groups are
/// concatenated in slot display order.
pub fn select_lineup(scored: &[PlayerScore], slots: &LineupSlots) -> Vec<PlayerScore> {
    let mut lineup = Vec::new();

    for (position, count) in slots.iter() {
        let mut group: Vec<&PlayerScore> =
            scored.iter().filter(|p| p.position == position).collect();
        // sort_by is stable: equal points keep their input order.
        group.sort_by(|a, b| {
            b.points
                .partial_cmp(&a.points)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        lineup.extend(group.into_iter().take(count).cloned());
    }

    lineup
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
