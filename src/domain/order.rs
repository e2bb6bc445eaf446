//! Orders and line-item pricing
//!
//! An order always spans the full catalog: exactly one line item per
//! catalog entry, created with quantity zero. The total price is derived
//! on every read rather than cached, so it can never go stale.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::catalog::{Catalog, CatalogEntry, CategoryFilter};
use crate::domain::tables::TableId;

/// Errors raised by quantity updates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("jumlah harus berupa bilangan bulat non-negatif, bukan {input:?}")]
    InvalidQuantity { input: String },

    #[error("menu {0:?} tidak ada di katalog")]
    UnknownEntry(String),
}

/// A mutable quantity paired with one shared catalog entry
#[derive(Debug, Clone)]
pub struct LineItem {
    entry: Arc<CatalogEntry>,
    quantity: u32,
}

impl LineItem {
    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> u64 {
        u64::from(self.quantity) * self.entry.unit_price
    }
}

/// One customer's full set of line items plus table and name
///
/// The table number stays provisional (and mutable) until the order is
/// booked into the registry; `None` means no table could be assigned.
#[derive(Debug, Clone)]
pub struct Order {
    pub table: Option<TableId>,
    pub customer: String,
    lines: Vec<LineItem>,
}

impl Order {
    /// Creates an order covering every catalog entry with quantity zero.
    pub fn new(catalog: &Catalog, table: Option<TableId>, customer: impl Into<String>) -> Self {
        let lines = catalog
            .iter()
            .map(|entry| LineItem {
                entry: Arc::clone(entry),
                quantity: 0,
            })
            .collect();
        Self {
            table,
            customer: customer.into(),
            lines,
        }
    }

    /// Updates the quantity of the line item for `entry_id`.
    ///
    /// Last write wins; the running total reflects the change on the next
    /// `total_price` call.
    pub fn set_quantity(&mut self, entry_id: &str, quantity: u32) -> Result<(), OrderError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.entry.id == entry_id)
            .ok_or_else(|| OrderError::UnknownEntry(entry_id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn quantity_of(&self, entry_id: &str) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.entry.id == entry_id)
            .map(LineItem::quantity)
    }

    /// Sum of quantity x unit price over all line items, recomputed per call.
    pub fn total_price(&self) -> u64 {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Lazy, restartable view of the line items matching `filter`, in
    /// catalog order. Display grouping only, never mutation.
    pub fn lines_in(&self, filter: CategoryFilter) -> impl Iterator<Item = &LineItem> {
        self.lines
            .iter()
            .filter(move |line| filter.matches(line.entry.category))
    }
}

/// Validates raw quantity text from an input widget.
///
/// An empty field reads as zero; anything else must be a non-negative
/// whole number.
pub fn parse_quantity(input: &str) -> Result<u32, OrderError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u32>().map_err(|_| OrderError::InvalidQuantity {
        input: input.to_string(),
    })
}
