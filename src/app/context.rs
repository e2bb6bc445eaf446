//! Shared application context
//!
//! The catalog, table registry, and asset cache are constructed once at
//! startup and passed by reference into the navigator and its frames,
//! rather than living as process-wide globals. Views call into the
//! context; nothing in the context calls back into views.

use crate::assets::AssetCache;
use crate::domain::catalog::Catalog;
use crate::domain::tables::TableRegistry;

/// Owned application state threaded through every frame
pub struct AppContext {
    pub catalog: Catalog,
    pub tables: TableRegistry,
    pub assets: AssetCache,
}

impl AppContext {
    pub fn new(catalog: Catalog, tables: TableRegistry, assets: AssetCache) -> Self {
        Self {
            catalog,
            tables,
            assets,
        }
    }
}
