//! Catalog types: the fixed list of purchasable menu entries
//!
//! The catalog is loaded once at startup (see `config::menu`) and never
//! mutated afterwards. Entries are shared into orders behind `Arc`, so a
//! line item can reference its entry without owning it.

use std::sync::Arc;

/// Menu category of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Meals,
    Drinks,
    Sides,
}

impl Category {
    /// Parses a category header token from the menu source (`MEALS` etc.)
    pub fn parse_header(token: &str) -> Option<Self> {
        match token {
            "MEALS" => Some(Self::Meals),
            "DRINKS" => Some(Self::Drinks),
            "SIDES" => Some(Self::Sides),
            _ => None,
        }
    }

    /// Display label of the category-specific attribute column
    ///
    /// Each category grades its entries on a different axis; the value is
    /// stored uniformly on the entry, only the label differs.
    pub fn attribute_label(self) -> &'static str {
        match self {
            Self::Meals => "Kegurihan",
            Self::Drinks => "Kemanisan",
            Self::Sides => "Keviralan",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Meals => "MEALS",
            Self::Drinks => "DRINKS",
            Self::Sides => "SIDES",
        }
    }
}

/// Category filter used when grouping line items for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parses the filter vocabulary exposed to the UI (`ALL` plus the
    /// category header tokens).
    pub fn parse(token: &str) -> Option<Self> {
        if token == "ALL" {
            return Some(Self::All);
        }
        Category::parse_header(token).map(Self::Only)
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// One immutable purchasable item
///
/// Identity is `id`. `unit_price` is in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub unit_price: u64,
    pub category: Category,
    pub attribute_value: u32,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: u64,
        category: Category,
        attribute_value: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            category,
            attribute_value,
        }
    }
}

/// The full menu: an ordered, immutable list of entries
///
/// Iteration order is the source order of the menu file, which is also the
/// display order used by the UI.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Arc<CatalogEntry>>,
}

impl Catalog {
    /// Builds a catalog from already-validated entries (the menu parser is
    /// responsible for rejecting duplicate ids).
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn entry(&self, id: &str) -> Option<&Arc<CatalogEntry>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogEntry>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
