//! Startup configuration sources
//!
//! Concentrates the external data consumed once at startup, currently the
//! menu source that seeds the immutable catalog.

pub mod menu;

pub use menu::{MenuError, load_menu, parse_menu};
