//! In-memory lot collection and its bounds-checked mutations.
//!
//! Lots are addressed by 0-based position only. Names are not required to be
//! unique.

use crate::error::Rejection;
use crate::lot::Lot;
use log::debug;

/// An ordered set of parking lots owned by one session.
///
/// Order is the load order and is preserved through every mutation and save.
/// The set of lots is fixed once built: lots are never added or removed, only
/// their `occupied` counts change (or the whole collection is replaced by
/// [`LotCollection::reset`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotCollection {
    lots: Vec<Lot>,
}

impl LotCollection {
    /// Wraps lots in their given order.
    pub fn new(lots: Vec<Lot>) -> Self {
        LotCollection { lots }
    }

    /// The canonical four-lot configuration.
    pub fn default_lots() -> Self {
        LotCollection::new(vec![
            Lot::new("Parqueo A", 5, 2),
            Lot::new("Parqueo B", 3, 3),
            Lot::new("El Hoyo", 4, 1),
            Lot::new("Puerta B", 6, 4),
        ])
    }

    /// Returns a fresh, independently owned copy of the default configuration.
    pub fn reset() -> Self {
        debug!("Resetting lots to default configuration");
        Self::default_lots()
    }

    /// Reserves one space at `index`.
    ///
    /// Returns `false` and leaves the collection untouched if the index is
    /// out of range or the lot is full.
    pub fn reserve(&mut self, index: usize) -> bool {
        self.try_reserve(index).is_ok()
    }

    /// Cancels one reservation at `index`.
    ///
    /// Returns `false` and leaves the collection untouched if the index is
    /// out of range or the lot has nothing occupied.
    pub fn cancel(&mut self, index: usize) -> bool {
        self.try_cancel(index).is_ok()
    }

    /// Like [`reserve`](Self::reserve), but reports why it was refused.
    pub fn try_reserve(&mut self, index: usize) -> Result<&Lot, Rejection> {
        let len = self.lots.len();
        let lot = self
            .lots
            .get_mut(index)
            .ok_or(Rejection::InvalidIndex { index, len })?;

        if !lot.can_reserve() {
            return Err(Rejection::NoFreeSpaces {
                name: lot.name.clone(),
            });
        }

        lot.occupied += 1;
        debug!(
            "Reserved a space in {} ({} of {} occupied)",
            lot.name, lot.occupied, lot.capacity
        );
        Ok(&*lot)
    }

    /// Like [`cancel`](Self::cancel), but reports why it was refused.
    pub fn try_cancel(&mut self, index: usize) -> Result<&Lot, Rejection> {
        let len = self.lots.len();
        let lot = self
            .lots
            .get_mut(index)
            .ok_or(Rejection::InvalidIndex { index, len })?;

        // Negative counts from a hand-edited file are left alone too.
        if lot.occupied <= 0 {
            return Err(Rejection::NoReservations {
                name: lot.name.clone(),
            });
        }

        lot.occupied -= 1;
        debug!(
            "Cancelled a reservation in {} ({} of {} occupied)",
            lot.name, lot.occupied, lot.capacity
        );
        Ok(&*lot)
    }

    /// Returns the lot at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Lot> {
        self.lots.get(index)
    }

    /// Iterates lots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Lot> {
        self.lots.iter()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn as_slice(&self) -> &[Lot] {
        &self.lots
    }
}

impl Default for LotCollection {
    fn default() -> Self {
        Self::default_lots()
    }
}

impl From<Vec<Lot>> for LotCollection {
    fn from(lots: Vec<Lot>) -> Self {
        LotCollection::new(lots)
    }
}

impl<'a> IntoIterator for &'a LotCollection {
    type Item = &'a Lot;
    type IntoIter = std::slice::Iter<'a, Lot>;

    fn into_iter(self) -> Self::IntoIter {
        self.lots.iter()
    }
}
