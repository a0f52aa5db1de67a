//! Parking lot record.

use serde::Serialize;

/// A named parking lot with its capacity and current occupancy.
///
/// # Over-capacity lots
///
/// `occupied` is not capped at `capacity`. A hand-edited data file may hold a
/// lot with more occupied spaces than its capacity (or even a negative
/// count); such a lot loads as-is and simply reports zero free spaces.
///
/// Field order matches the persisted column order: `name,capacity,occupied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lot {
    /// Display name. Must not contain a comma to survive a save/load cycle.
    pub name: String,

    /// Total spaces.
    pub capacity: i64,

    /// Spaces currently reserved.
    pub occupied: i64,
}

impl Lot {
    /// Creates a lot record.
    pub fn new(name: impl Into<String>, capacity: i64, occupied: i64) -> Self {
        Lot {
            name: name.into(),
            capacity,
            occupied,
        }
    }

    /// Returns `capacity - occupied`, floored at zero.
    pub fn free_spaces(&self) -> i64 {
        self.capacity.saturating_sub(self.occupied).max(0)
    }

    /// Returns `true` if at least one space is free.
    pub fn can_reserve(&self) -> bool {
        self.free_spaces() > 0
    }
}
