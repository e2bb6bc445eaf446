//! Domain logic and core data structures
//!
//! This module contains the pure ordering model: catalog, orders, and the
//! table registry. It has no knowledge of the UI layer or the network.

pub mod catalog;
pub mod order;
pub mod tables;
