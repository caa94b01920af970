//! Menu selection aggregator
//!
//! Tracks one chosen menu item per fixed category and produces the flat
//! id list persisted with the reservation. The only failure mode is
//! "incomplete": categories are independent, so there is no conflict or
//! duplicate concern.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed menu categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
    Beef,
    Chicken,
    Vegetable,
    Pork,
    Pasta,
    Fillet,
    Dessert,
    Juice,
}

impl MenuCategory {
    /// All categories, in display order
    pub const ALL: [MenuCategory; 8] = [
        MenuCategory::Beef,
        MenuCategory::Chicken,
        MenuCategory::Vegetable,
        MenuCategory::Pork,
        MenuCategory::Pasta,
        MenuCategory::Fillet,
        MenuCategory::Dessert,
        MenuCategory::Juice,
    ];

    /// Category key as stored in rows and item records
    pub fn key(&self) -> &'static str {
        match self {
            Self::Beef => "beef",
            Self::Chicken => "chicken",
            Self::Vegetable => "vegetable",
            Self::Pork => "pork",
            Self::Pasta => "pasta",
            Self::Fillet => "fillet",
            Self::Dessert => "dessert",
            Self::Juice => "juice",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One chosen menu item id per category; empty string means unselected.
///
/// Serializes as a plain category -> id map for the reservation row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSelection {
    pub beef: String,
    pub chicken: String,
    pub vegetable: String,
    pub pork: String,
    pub pasta: String,
    pub fillet: String,
    pub dessert: String,
    pub juice: String,
}

impl MenuSelection {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, category: MenuCategory) -> &String {
        match category {
            MenuCategory::Beef => &self.beef,
            MenuCategory::Chicken => &self.chicken,
            MenuCategory::Vegetable => &self.vegetable,
            MenuCategory::Pork => &self.pork,
            MenuCategory::Pasta => &self.pasta,
            MenuCategory::Fillet => &self.fillet,
            MenuCategory::Dessert => &self.dessert,
            MenuCategory::Juice => &self.juice,
        }
    }

    fn slot_mut(&mut self, category: MenuCategory) -> &mut String {
        match category {
            MenuCategory::Beef => &mut self.beef,
            MenuCategory::Chicken => &mut self.chicken,
            MenuCategory::Vegetable => &mut self.vegetable,
            MenuCategory::Pork => &mut self.pork,
            MenuCategory::Pasta => &mut self.pasta,
            MenuCategory::Fillet => &mut self.fillet,
            MenuCategory::Dessert => &mut self.dessert,
            MenuCategory::Juice => &mut self.juice,
        }
    }

    /// Record the chosen item for a category (string form of its id)
    pub fn select(&mut self, category: MenuCategory, item_id: i64) {
        *self.slot_mut(category) = item_id.to_string();
    }

    /// Clear the selection for a category
    pub fn clear(&mut self, category: MenuCategory) {
        self.slot_mut(category).clear();
    }

    /// The selected item id for a category, if any
    pub fn get(&self, category: MenuCategory) -> Option<&str> {
        let value = self.slot(category);
        if value.is_empty() { None } else { Some(value) }
    }

    /// Completion gate: every category has a selection
    pub fn is_complete(&self) -> bool {
        MenuCategory::ALL
            .iter()
            .all(|category| !self.slot(*category).is_empty())
    }

    /// Flat list of selected item ids, in category order, for bulk
    /// persistence. Slots that fail to parse as numbers are skipped.
    pub fn selected_ids(&self) -> Vec<i64> {
        MenuCategory::ALL
            .iter()
            .filter_map(|category| self.slot(*category).parse::<i64>().ok())
            .collect()
    }
}
