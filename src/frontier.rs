//! Bounded frontier queue: a circular buffer of fixed capacity kept sorted by ascending
//! priority. Pops come off the front in O(1); inserts shift the later entries back by one slot.
//! Entries of equal priority keep their insertion order.
use crate::cost::Cost;
use crate::error::{PathError, Result};
use crate::Coord;
use log::warn;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierEntry {
    pub coord: Coord,
    pub priority: Cost,
}

impl FrontierEntry {
    const EMPTY: FrontierEntry = FrontierEntry {
        coord: Coord::new(0, 0),
        priority: Cost::Infeasible,
    };
}

#[derive(Clone, Debug)]
pub struct Frontier<const Q: usize> {
    slots: [FrontierEntry; Q],
    head: usize,
    len: usize,
}

impl<const Q: usize> Default for Frontier<Q> {
    fn default() -> Frontier<Q> {
        Frontier::new()
    }
}

impl<const Q: usize> Frontier<Q> {
    pub fn new() -> Frontier<Q> {
        Frontier {
            slots: [FrontierEntry::EMPTY; Q],
            head: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        Q
    }

    /// Maps a position in sorted order to its slot in the ring. Only valid while `Q > 0`.
    fn slot(&self, pos: usize) -> usize {
        (self.head + pos) % Q
    }

    fn at(&self, pos: usize) -> &FrontierEntry {
        &self.slots[self.slot(pos)]
    }

    /// First sorted position whose priority is strictly greater than `priority`, so a new entry
    /// lands behind every entry it ties with.
    fn insertion_point(&self, priority: Cost) -> usize {
        let (mut lo, mut hi) = (0, self.len);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.at(mid).priority <= priority {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Inserts in sorted position. A full queue reports [PathError::QueueOverflow] and is left
    /// untouched.
    pub fn push(&mut self, coord: Coord, priority: Cost) -> Result<()> {
        if self.len == self.capacity() {
            warn!(
                "Frontier is full ({} entries), cannot queue {}",
                self.len, coord
            );
            return Err(PathError::QueueOverflow {
                capacity: self.capacity(),
            });
        }
        let pos = self.insertion_point(priority);
        for i in (pos..self.len).rev() {
            let (from, to) = (self.slot(i), self.slot(i + 1));
            self.slots[to] = self.slots[from];
        }
        let at = self.slot(pos);
        self.slots[at] = FrontierEntry { coord, priority };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the lowest-priority entry.
    pub fn pop_front(&mut self) -> Option<FrontierEntry> {
        if self.len == 0 {
            return None;
        }
        let entry = self.slots[self.head];
        self.head = (self.head + 1) % Q;
        self.len -= 1;
        Some(entry)
    }

    pub fn peek(&self) -> Option<&FrontierEntry> {
        (self.len > 0).then(|| self.at(0))
    }

    pub fn position(&self, coord: Coord) -> Option<usize> {
        (0..self.len).find(|&pos| self.at(pos).coord == coord)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.position(coord).is_some()
    }

    fn remove_at(&mut self, pos: usize) -> FrontierEntry {
        let entry = *self.at(pos);
        for i in pos..self.len - 1 {
            let (from, to) = (self.slot(i + 1), self.slot(i));
            self.slots[to] = self.slots[from];
        }
        self.len -= 1;
        entry
    }

    /// Moves an already queued coordinate to the sorted position of its new priority. Returns
    /// [false] if the coordinate isn't queued.
    pub fn reprioritize(&mut self, coord: Coord, priority: Cost) -> bool {
        match self.position(coord) {
            Some(pos) => {
                self.remove_at(pos);
                // A slot was just freed, so this can't overflow.
                self.push(coord, priority).is_ok()
            }
            None => false,
        }
    }

    /// Entries in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> + '_ {
        (0..self.len).map(move |pos| self.at(pos))
    }
}
