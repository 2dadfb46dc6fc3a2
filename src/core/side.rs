//! Combatant slots and per-side data storage.
//!
//! ## Side
//!
//! A battle always has exactly two combatants. `Side::First` acts first
//! in every round, `Side::Second` responds.
//!
//! ## SideMap
//!
//! Fixed two-entry storage indexed by `Side`. Supports iteration and
//! split borrows so one side can act on the other.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two combatant slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Acts first in every round.
    First,
    /// Acts second in every round.
    Second,
}

impl Side {
    /// Both sides in turn order.
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// Get the 0-based slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "Unit 1"),
            Side::Second => write!(f, "Unit 2"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_duel::core::{Side, SideMap};
///
/// let mut hp = SideMap::new(|_| 50);
/// hp[Side::Second] -= 7;
///
/// assert_eq!(hp[Side::First], 50);
/// assert_eq!(hp[Side::Second], 43);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::First), factory(Side::Second)],
        }
    }

    /// Create a SideMap from explicit values.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Borrow `side` and its opponent mutably at the same time.
    ///
    /// Returns `(side, side.opponent())`.
    pub fn split_mut(&mut self, side: Side) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        match side {
            Side::First => (first, second),
            Side::Second => (second, first),
        }
    }

    /// Iterate over `(Side, &T)` pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over `(Side, &mut T)` pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::BOTH.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
