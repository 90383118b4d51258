//! Shared integer counters
//!
//! A `Counter` is handed to every object that reads or mutates the same piece
//! of game state (strikes, bricks remaining, perk paddle state, camera switch).
//! Clones share the cell, so a change made through one handle is visible
//! through all of them. Single-threaded only.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared mutable integer cell (no clamping)
#[derive(Clone, Default)]
pub struct Counter(Rc<Cell<i32>>);

impl Counter {
    pub fn new(value: i32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn value(&self) -> i32 {
        self.0.get()
    }

    pub fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn decrement(&self) {
        self.0.set(self.0.get() - 1);
    }

    /// Set back to zero
    pub fn reset(&self) {
        self.0.set(0);
    }

    /// True if both handles point at the same cell
    pub fn shares_cell(&self, other: &Counter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Counter").field(&self.value()).finish()
    }
}
