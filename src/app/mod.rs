//! Application orchestration layer
//!
//! Holds the navigation stack that routes between views and the owned
//! application context threaded through them.

pub mod context;
pub mod navigator;

pub use context::AppContext;
pub use navigator::{EmptyStackError, Frame, NavRequests, Navigator, Toast, TOAST_DURATION};
