//! View boundary of the core
//!
//! Events in (`event`), render-models out (`view`), with the concrete
//! frames (`pages`) in between. Actual drawing belongs to the external
//! rendering collaborator.

pub mod event;
pub mod format;
pub mod pages;
pub mod view;

pub use event::UiEvent;
pub use pages::{CreateOrderPage, LandingPage, MenuPage, TablePage};
pub use view::{BackgroundState, MenuRow, PageBody, PageMode, PageView, SlotView};
