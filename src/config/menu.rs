//! Menu source parsing
//!
//! The catalog is loaded from a plain-text resource organized into
//! category blocks. A header line starts with `===` and names one of
//! `MEALS`, `DRINKS`, `SIDES`; the records that follow are
//! `id;name;unitPrice;attributeValue`, one entry per line, until the next
//! header or end of input. A malformed source is a startup-fatal error;
//! nothing here is user-recoverable.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::domain::catalog::{Catalog, CatalogEntry, Category};

/// Fatal menu source errors; these abort startup.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("could not read menu source {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: unrecognized category header {header:?}")]
    UnknownCategory { line: usize, header: String },

    #[error("line {line}: menu entry before any category header")]
    MissingHeader { line: usize },

    #[error("line {line}: expected id;name;unitPrice;attributeValue, found {found} fields")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: {field} is not a number: {value:?}")]
    BadNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: duplicate menu id {id:?}")]
    DuplicateId { line: usize, id: String },

    #[error("menu source contains no entries")]
    Empty,
}

/// Reads and parses the menu file at `path`.
pub fn load_menu(path: &Path) -> Result<Catalog, MenuError> {
    let text = fs::read_to_string(path).map_err(|source| MenuError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_menu(&text)?;
    info!(path = %path.display(), entries = catalog.len(), "menu loaded");
    Ok(catalog)
}

/// Parses the menu source text into a catalog.
pub fn parse_menu(text: &str) -> Result<Catalog, MenuError> {
    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut current: Option<Category> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with("===") {
            // Decorative '=' padding on either side of the token is tolerated.
            let header = trimmed.trim_matches(|c: char| c == '=' || c.is_whitespace());
            current = Some(Category::parse_header(header).ok_or_else(|| {
                MenuError::UnknownCategory {
                    line,
                    header: header.to_string(),
                }
            })?);
            continue;
        }

        let category = current.ok_or(MenuError::MissingHeader { line })?;
        let fields: Vec<&str> = trimmed.split(';').collect();
        if fields.len() != 4 {
            return Err(MenuError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let id = fields[0].trim();
        let name = fields[1].trim();
        let unit_price: u64 = fields[2]
            .trim()
            .parse()
            .map_err(|_| MenuError::BadNumber {
                line,
                field: "unit price",
                value: fields[2].trim().to_string(),
            })?;
        let attribute_value: u32 = fields[3]
            .trim()
            .parse()
            .map_err(|_| MenuError::BadNumber {
                line,
                field: "attribute value",
                value: fields[3].trim().to_string(),
            })?;

        if !seen_ids.insert(id.to_string()) {
            return Err(MenuError::DuplicateId {
                line,
                id: id.to_string(),
            });
        }
        entries.push(CatalogEntry::new(id, name, unit_price, category, attribute_value));
    }

    if entries.is_empty() {
        return Err(MenuError::Empty);
    }
    Ok(Catalog::new(entries))
}
