use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Display reference
// ============================================================================

/// Canonical shape for fields that arrive from the store either as a bare
/// string or as an object carrying a display name (category, supplier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRef {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl DisplayRef {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    /// Normalize `"Coffee"` or `{"name": "Coffee", ...}` into one shape.
    /// Anything else falls back to `default`.
    pub fn from_value(value: Option<&serde_json::Value>, default: &str) -> Self {
        let name = value
            .and_then(|v| {
                if let Some(s) = v.as_str() {
                    Some(s.to_string())
                } else {
                    v.get("name").and_then(|n| n.as_str()).map(String::from)
                }
            })
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default.to_string());
        Self { display_name: name }
    }
}

// ============================================================================
// Variant
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    pub sku: Option<String>,
    /// Authoritative external key for variant-level mutation and deletion.
    #[serde(rename = "pluUpc")]
    pub plu_upc: Option<String>,
    pub quantity: Option<i64>,
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<String>,
    pub sku: Option<String>,
    pub plu: Option<String>,
    pub name: String,
    /// Meaningful only when `has_variants` is false.
    pub quantity: i64,
    /// Display string with currency prefix, e.g. "$4.50".
    pub price: String,
    pub category: DisplayRef,
    pub supplier: DisplayRef,
    #[serde(rename = "hasVariants")]
    pub has_variants: bool,
    pub variants: Vec<Variant>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Best-available identifier: `id`, falling back to `sku`, then `plu`.
    /// `None` means the record cannot be targeted by edit or delete.
    pub fn key(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.sku.as_deref())
            .or(self.plu.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn is_actionable(&self) -> bool {
        self.key().is_some()
    }

    /// Numeric value of the display price, currency prefix stripped.
    pub fn price_value(&self) -> f64 {
        parse_price(&self.price)
    }
}

/// Strip a leading currency symbol and parse the remainder.
pub fn parse_price(display: &str) -> f64 {
    display
        .trim()
        .trim_start_matches(['$', '€', '£'])
        .trim()
        .replace(',', "")
        .parse()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_ref_accepts_bare_string() {
        let v = json!("Coffee");
        assert_eq!(
            DisplayRef::from_value(Some(&v), "Uncategorized").display_name,
            "Coffee"
        );
    }

    #[test]
    fn display_ref_accepts_object_with_name() {
        let v = json!({"name": "Beans", "id": "c1"});
        assert_eq!(
            DisplayRef::from_value(Some(&v), "Uncategorized").display_name,
            "Beans"
        );
    }

    #[test]
    fn display_ref_falls_back_on_junk() {
        let v = json!(42);
        assert_eq!(
            DisplayRef::from_value(Some(&v), "Uncategorized").display_name,
            "Uncategorized"
        );
        assert_eq!(
            DisplayRef::from_value(None, "Unknown Supplier").display_name,
            "Unknown Supplier"
        );
    }

    #[test]
    fn key_priority_is_id_sku_plu() {
        let mut p = Product {
            id: Some("p1".into()),
            sku: Some("SKU-1".into()),
            plu: Some("0001".into()),
            name: "X".into(),
            quantity: 0,
            price: "$0.00".into(),
            category: DisplayRef::new("Uncategorized"),
            supplier: DisplayRef::new(""),
            has_variants: false,
            variants: vec![],
            created_at: None,
            updated_at: None,
        };
        assert_eq!(p.key(), Some("p1"));
        p.id = None;
        assert_eq!(p.key(), Some("SKU-1"));
        p.sku = None;
        assert_eq!(p.key(), Some("0001"));
        p.plu = None;
        assert_eq!(p.key(), None);
        assert!(!p.is_actionable());
    }

    #[test]
    fn price_value_strips_currency_prefix() {
        let p = Product {
            id: Some("p1".into()),
            sku: None,
            plu: None,
            name: "X".into(),
            quantity: 0,
            price: "$1,234.50".into(),
            category: DisplayRef::new("Uncategorized"),
            supplier: DisplayRef::new(""),
            has_variants: false,
            variants: vec![],
            created_at: None,
            updated_at: None,
        };
        assert!((p.price_value() - 1234.5).abs() < f64::EPSILON);
        assert_eq!(parse_price("garbage"), 0.0);
    }
}
