//! Render-models exposed to the external UI layer
//!
//! Frames describe what should be on screen through these plain data
//! structures; the rendering collaborator draws them however it likes and
//! never reaches into frame internals.

use crate::domain::catalog::{Category, CategoryFilter};
use crate::domain::tables::TableId;

/// Whether a frame is creating an order or checking one out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Order,
    Checkout,
}

/// Readiness of a page's background artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundState {
    /// Fetch still in flight; show a placeholder
    Pending,
    /// Decoded asset available from the cache
    Ready,
    /// Fetch failed or never requested; render without it
    Unavailable,
}

/// One menu listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub unit_price: u64,
    pub attribute_label: &'static str,
    pub attribute_value: u32,
    pub quantity: u32,
}

/// One table button in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView {
    pub table: TableId,
    pub occupied: bool,
    pub selected: bool,
}

/// Frame-specific content of a render-model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    /// Entry actions: create an order or check out a table
    Landing,
    /// Customer name entry for a new order
    NameEntry { name: String },
    /// The menu listing with quantities and the running total
    Menu {
        mode: PageMode,
        filter: CategoryFilter,
        customer: String,
        table: Option<TableId>,
        rows: Vec<MenuRow>,
        total: u64,
    },
    /// The table picker grid
    Tables {
        mode: PageMode,
        slots: Vec<SlotView>,
        selected: Option<TableId>,
    },
}

/// Complete render-model of the visible frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub background: BackgroundState,
    pub body: PageBody,
}
