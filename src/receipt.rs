use serde::{Deserialize, Serialize};

/// A submitted purchase receipt.
///
/// Every field defaults to its empty value when absent from the JSON payload,
/// so a missing field is reported by validation rather than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String, // "YYYY-MM-DD"
    pub purchase_time: String, // "HH:MM", 24h
    pub items: Vec<Item>,
    pub total: String, // decimal amount, e.g. "35.35"
}

/// One line entry on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}
