//! Input vocabulary of the view boundary
//!
//! The external UI layer translates raw user input (buttons, key presses,
//! text fields) into these events and feeds them to the navigator, which
//! routes them to the visible frame.

use crate::domain::catalog::CategoryFilter;
use crate::domain::tables::TableId;

/// One user input, as seen by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Landing: begin a new order flow
    StartOrder,
    /// Landing: begin the checkout flow
    StartCheckout,
    /// Text committed into the focused input field
    Input(String),
    /// Primary action of the visible frame (OK / continue / commit)
    Submit,
    /// Leave the visible frame
    Back,
    /// Menu: restrict the listing to one category
    Filter(CategoryFilter),
    /// Menu: raw quantity text entered for one line item
    SetQuantity { entry_id: String, input: String },
    /// Menu: open the table picker for the in-progress order
    ChangeTable,
    /// Table picker: a table button was pressed
    ChooseTable(TableId),
}
