//! Domain models for order summary lines.
//!
//! The wire format follows the backend's SQL projection: one row per
//! product variant with the ordered, manufactured, and delivered
//! quantities aggregated. The backend serializes rows with a stringifying
//! fallback, so quantity fields may arrive as JSON numbers or as strings;
//! deserialization accepts both.

use serde::{Deserialize, Deserializer, Serialize};

/// One line of the order summary: a product variant and its aggregated
/// quantities.
///
/// `product_id` is the identity key: it is unique within a collection and
/// stable across updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// Product variant id (unique within the collection).
    pub product_id: i64,
    /// Product template id.
    pub template_id: i64,
    /// Display name of the product template.
    pub template_name: String,
    /// Internal reference code, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_code: Option<String>,
    /// Total quantity on confirmed sale order lines.
    #[serde(deserialize_with = "lenient_f64")]
    pub ordered_quantity: f64,
    /// Total quantity from completed manufacturing orders.
    #[serde(deserialize_with = "lenient_f64")]
    pub manufactured_quantity: f64,
    /// Total quantity on completed outgoing stock moves.
    #[serde(deserialize_with = "lenient_f64")]
    pub delivered_quantity: f64,
}

/// A partial update for a single summary line.
///
/// Only `product_id` is required; absent fields leave the corresponding
/// fields of the existing line untouched. Patches never create lines:
/// a patch whose `product_id` matches nothing is dropped by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryPatch {
    /// Product variant id of the line to update.
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_code: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub ordered_quantity: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufactured_quantity: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivered_quantity: Option<f64>,
}

impl SummaryLine {
    /// Merge a patch into this line, field by field. Fields absent from
    /// the patch keep their current values.
    pub fn merge(&mut self, patch: &SummaryPatch) {
        debug_assert_eq!(self.product_id, patch.product_id);
        if let Some(template_id) = patch.template_id {
            self.template_id = template_id;
        }
        if let Some(template_name) = &patch.template_name {
            self.template_name = template_name.clone();
        }
        if let Some(default_code) = &patch.default_code {
            self.default_code = Some(default_code.clone());
        }
        if let Some(qty) = patch.ordered_quantity {
            self.ordered_quantity = qty;
        }
        if let Some(qty) = patch.manufactured_quantity {
            self.manufactured_quantity = qty;
        }
        if let Some(qty) = patch.delivered_quantity {
            self.delivered_quantity = qty;
        }
    }
}

/// Accepts a JSON number or a numeric string (the backend stringifies
/// Decimal values when serializing rows).
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "lenient_f64")] f64);

    Option::<Wrapper>::deserialize(deserializer).map(|opt| opt.map(|w| w.0))
}
