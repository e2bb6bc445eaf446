//! Application-state core of a single-workstation cafe ordering terminal
//!
//! Customers create a table order, adjust catalog item quantities, and
//! later check out the table, freeing it for reuse. The core is a
//! stack-based view navigator over a small in-memory registry enforcing
//! one active order per table, plus the immutable menu catalog and a
//! fetch-once cache for remote artwork. Rendering is left to an external
//! collaborator that feeds `ui::UiEvent`s in and draws `ui::PageView`s
//! out.

pub mod app;
pub mod assets;
pub mod config;
pub mod domain;
pub mod ui;
