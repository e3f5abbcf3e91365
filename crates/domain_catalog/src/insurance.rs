//! Insurance product entity
//!
//! Products are immutable catalog records; identity is the product id.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{InsuranceId, Money};

/// The unit a product's base price is charged per
///
/// Serialized with the storefront labels ("Por día", "Por mes", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationUnit {
    #[serde(rename = "Por día")]
    Day,
    #[serde(rename = "Por mes")]
    Month,
    #[serde(rename = "Por evento")]
    Event,
    #[serde(rename = "Por viaje")]
    Trip,
}

impl DurationUnit {
    /// Storefront label shown next to the price
    pub fn label(&self) -> &'static str {
        match self {
            DurationUnit::Day => "Por día",
            DurationUnit::Month => "Por mes",
            DurationUnit::Event => "Por evento",
            DurationUnit::Trip => "Por viaje",
        }
    }

    /// Parses a storefront label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        [Self::Day, Self::Month, Self::Event, Self::Trip]
            .into_iter()
            .find(|unit| unit.label().to_lowercase() == label)
    }

    /// Human description of `count` units, as printed on a policy ("7 días", "1 mes")
    pub fn describe(&self, count: u32) -> String {
        let (singular, plural) = match self {
            DurationUnit::Day => ("día", "días"),
            DurationUnit::Month => ("mes", "meses"),
            DurationUnit::Event => ("evento", "eventos"),
            DurationUnit::Trip => ("viaje", "viajes"),
        };
        if count == 1 {
            format!("{} {}", count, singular)
        } else {
            format!("{} {}", count, plural)
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Icon shown on the product card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductIcon {
    Plane,
    Smartphone,
    Ticket,
    Bike,
    Heart,
    Luggage,
}

/// An insurance product offered on the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    /// Unique identifier
    pub id: InsuranceId,
    /// Display name
    pub name: String,
    /// Category label used by the storefront filter
    pub category: String,
    /// Full description shown on the detail page
    pub description: String,
    /// One-line description shown on the product card
    pub short_description: String,
    /// Price per duration unit
    pub base_price: Money,
    /// Unit the base price is charged per
    pub duration: DurationUnit,
    /// What the product covers, in display order
    pub coverage: Vec<String>,
    /// Card image
    pub image_url: String,
    /// Card icon
    pub icon: ProductIcon,
}

impl Insurance {
    /// Returns true if `query` (already lowercased) appears in the name or description
    pub(crate) fn matches_lowercase(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
    }
}
