//! Storefront search and category filtering
//!
//! A product is shown when its name or description contains the search
//! text (case-insensitive) and its category equals the selected one. The
//! `All` selector ("Todos" on the storefront) disables the category check.
//! Filtering is stable: results keep catalog order.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::InsuranceId;

use crate::insurance::Insurance;

/// Label the storefront uses for the "every category" option
pub const ALL_CATEGORIES_LABEL: &str = "Todos";

/// Category selection for the storefront filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategorySelector {
    /// No category restriction
    #[default]
    All,
    /// Exact category match
    Category(String),
}

impl CategorySelector {
    /// Selects a single category
    pub fn category(name: impl Into<String>) -> Self {
        CategorySelector::Category(name.into())
    }

    /// Parses a storefront option, mapping "Todos" to [`CategorySelector::All`]
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES_LABEL {
            CategorySelector::All
        } else {
            CategorySelector::Category(label.to_string())
        }
    }

    /// Returns true if `category` passes this selector
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Category(selected) => selected == category,
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelector::All => f.write_str(ALL_CATEGORIES_LABEL),
            CategorySelector::Category(name) => f.write_str(name),
        }
    }
}

/// Search text plus category selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub query: String,
    pub category: CategorySelector,
}

impl CatalogFilter {
    pub fn new(query: impl Into<String>, category: CategorySelector) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Returns the matching products in their original order
    pub fn apply<'a>(&self, products: &'a [Insurance]) -> Vec<&'a Insurance> {
        let query = self.query.to_lowercase();
        products
            .iter()
            .filter(|p| p.matches_lowercase(&query) && self.category.accepts(&p.category))
            .collect()
    }
}

/// Category options: `All` first, then each distinct category in first-seen order
pub fn categories(products: &[Insurance]) -> Vec<CategorySelector> {
    let mut options = vec![CategorySelector::All];
    for product in products {
        let option = CategorySelector::category(product.category.as_str());
        if !options.contains(&option) {
            options.push(option);
        }
    }
    options
}

/// Looks up a product by id
pub fn find_by_id<'a>(products: &'a [Insurance], id: &InsuranceId) -> Option<&'a Insurance> {
    products.iter().find(|p| &p.id == id)
}
