//! Catalog Models
//!
//! Packages, themes, grazing tables and menu items the user browses and
//! references from a reservation.

use serde::{Deserialize, Serialize};

/// Reference to a catalog entry (package, theme, grazing table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRef {
    pub id: i64,
    pub name: String,
}

impl CatalogRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Category key this item belongs to (e.g. "beef", "dessert")
    pub category: String,
    pub is_active: bool,
}
