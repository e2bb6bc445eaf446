//! Table registry: fixed seating slots and the occupancy invariant
//!
//! The registry owns all table slots for the process lifetime. Slots are
//! never created or destroyed; only their occupancy changes. A slot id out
//! of range is a programmer error and asserts immediately.

use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::order::Order;

/// Fixed table slot identifier, `1..=table_count`
pub type TableId = u8;

/// Errors raised by booking operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("meja {0} sudah terisi")]
    SlotOccupied(TableId),
}

/// Owns the fixed set of table slots, each empty or holding one order
///
/// Single-threaded by design: callers run on the UI event loop, so there
/// is no internal locking.
#[derive(Debug)]
pub struct TableRegistry {
    slots: Vec<Option<Order>>,
    rng: ChaCha8Rng,
}

impl TableRegistry {
    /// Creates a registry with tables `1..=count`, all empty.
    pub fn new(count: u8) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(count, seed)
    }

    /// Like `new`, but with a fixed RNG seed for deterministic assignment.
    pub fn with_seed(count: u8, seed: u64) -> Self {
        assert!(count > 0, "registry needs at least one table slot");
        Self {
            slots: (0..count).map(|_| None).collect(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn table_count(&self) -> u8 {
        self.slots.len() as u8
    }

    /// All slot ids in ascending order, empty or occupied.
    pub fn table_ids(&self) -> impl Iterator<Item = TableId> {
        1..=self.table_count()
    }

    fn index(&self, table: TableId) -> usize {
        assert!(
            table >= 1 && table <= self.table_count(),
            "table id {table} out of range 1..={}",
            self.table_count()
        );
        usize::from(table - 1)
    }

    pub fn is_available(&self, table: TableId) -> bool {
        self.slots[self.index(table)].is_none()
    }

    /// Slot ids currently empty, ascending.
    pub fn available(&self) -> Vec<TableId> {
        self.table_ids().filter(|&t| self.is_available(t)).collect()
    }

    /// Slot ids currently occupied, ascending.
    pub fn booked(&self) -> Vec<TableId> {
        self.table_ids().filter(|&t| !self.is_available(t)).collect()
    }

    /// Assigns `order` to `table`. The slot must be empty; booking an
    /// occupied slot is rejected rather than silently replacing the
    /// resident order.
    pub fn book(&mut self, table: TableId, order: Order) -> Result<(), TableError> {
        let idx = self.index(table);
        if self.slots[idx].is_some() {
            return Err(TableError::SlotOccupied(table));
        }
        info!(table, customer = %order.customer, "booking table");
        self.slots[idx] = Some(order);
        Ok(())
    }

    /// Clears `table` to empty, returning the retired order. No-op
    /// (`None`) if the slot was already empty.
    pub fn checkout(&mut self, table: TableId) -> Option<Order> {
        let idx = self.index(table);
        let order = self.slots[idx].take();
        if let Some(order) = &order {
            info!(table, customer = %order.customer, "table checked out");
        }
        order
    }

    /// One slot id chosen uniformly at random from the empty slots, or
    /// `None` when every table is occupied.
    pub fn assign_random_available(&mut self) -> Option<TableId> {
        let open = self.available();
        if open.is_empty() {
            return None;
        }
        let pick = open[self.rng.next_u32() as usize % open.len()];
        debug!(table = pick, "provisional table assigned");
        Some(pick)
    }

    /// Exact, case-sensitive scan of the occupied slots' customer names.
    pub fn is_username_taken(&self, name: &str) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|order| order.customer == name)
    }

    pub fn order_at(&self, table: TableId) -> Option<&Order> {
        self.slots[self.index(table)].as_ref()
    }
}
