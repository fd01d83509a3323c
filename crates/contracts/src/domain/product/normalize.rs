//! Shapes raw store records into the canonical [`Product`] form.
//!
//! The store is not trusted: fields go missing, arrive under legacy names
//! (`itemQuantity`, `singleItemSellingPrice`) or with the wrong type. Every
//! accessor here substitutes a safe default so that one malformed record can
//! never blank the whole grid.

use super::aggregate::{DisplayRef, Product, Variant};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub const DEFAULT_NAME: &str = "Unknown Product";
pub const DEFAULT_PRICE: &str = "$0.00";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_SUPPLIER: &str = "Unknown Supplier";

/// Total: any input yields a renderable `Product`.
pub fn normalize_product(raw: &Value) -> Product {
    if !raw.is_object() {
        return minimal_product();
    }

    let variants: Vec<Variant> = raw
        .get("variants")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(normalize_variant).collect())
        .unwrap_or_default();

    let has_variants = raw
        .get("hasVariants")
        .and_then(|v| v.as_bool())
        .unwrap_or(!variants.is_empty());

    Product {
        id: str_field(raw, "id"),
        sku: str_field(raw, "sku"),
        plu: str_field(raw, "plu").or_else(|| str_field(raw, "pluUpc")),
        name: str_field(raw, "name").unwrap_or_else(|| DEFAULT_NAME.to_string()),
        quantity: int_field(raw, "itemQuantity")
            .or_else(|| int_field(raw, "quantity"))
            .unwrap_or(0),
        price: price_field(raw),
        category: DisplayRef::from_value(raw.get("category"), DEFAULT_CATEGORY),
        supplier: DisplayRef::from_value(raw.get("supplier"), DEFAULT_SUPPLIER),
        has_variants,
        variants,
        created_at: time_field(raw, "createdAt"),
        updated_at: time_field(raw, "updatedAt"),
    }
}

/// Non-object variant entries are dropped rather than defaulted: a variant
/// with no shape at all has nothing to render or key off.
fn normalize_variant(raw: &Value) -> Option<Variant> {
    if !raw.is_object() {
        return None;
    }
    Some(Variant {
        id: str_field(raw, "id"),
        name: str_field(raw, "name").unwrap_or_else(|| "Unnamed Variant".to_string()),
        price: raw
            .get("price")
            .and_then(|v| v.as_f64().or_else(|| v.as_str()?.parse().ok()))
            .unwrap_or(0.0),
        sku: str_field(raw, "sku"),
        plu_upc: str_field(raw, "pluUpc").or_else(|| str_field(raw, "plu_upc")),
        quantity: int_field(raw, "quantity").or_else(|| int_field(raw, "itemQuantity")),
    })
}

fn minimal_product() -> Product {
    Product {
        id: None,
        sku: None,
        plu: None,
        name: DEFAULT_NAME.to_string(),
        quantity: 0,
        price: DEFAULT_PRICE.to_string(),
        category: DisplayRef::new(DEFAULT_CATEGORY),
        supplier: DisplayRef::new(DEFAULT_SUPPLIER),
        has_variants: false,
        variants: vec![],
        created_at: None,
        updated_at: None,
    }
}

fn str_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(|v| {
            if let Some(s) = v.as_str() {
                Some(s.to_string())
            } else {
                // Numeric ids/skus are tolerated
                v.as_i64().map(|n| n.to_string())
            }
        })
        .filter(|s| !s.trim().is_empty())
}

fn int_field(raw: &Value, key: &str) -> Option<i64> {
    raw.get(key).and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .or_else(|| v.as_str()?.trim().parse().ok())
    })
}

/// The selling price may be a number or an already-formatted string.
/// Either way the result carries the currency prefix.
fn price_field(raw: &Value) -> String {
    let v = raw
        .get("singleItemSellingPrice")
        .or_else(|| raw.get("price"));
    match v {
        Some(Value::Number(n)) => format!("${:.2}", n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) if !s.trim().is_empty() => {
            if s.trim_start().starts_with('$') {
                s.trim().to_string()
            } else {
                format!("${}", s.trim())
            }
        }
        _ => DEFAULT_PRICE.to_string(),
    }
}

fn time_field(raw: &Value, key: &str) -> Option<DateTime<Utc>> {
    raw.get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record_normalizes() {
        let raw = json!({
            "id": "p1",
            "sku": "SKU-9",
            "pluUpc": "000123",
            "name": "House Blend",
            "itemQuantity": 14,
            "singleItemSellingPrice": 4.5,
            "category": {"name": "Coffee"},
            "supplier": "Acme Roasters",
            "hasVariants": false,
            "variants": [],
            "createdAt": "2026-01-10T08:30:00Z",
        });
        let p = normalize_product(&raw);
        assert_eq!(p.id.as_deref(), Some("p1"));
        assert_eq!(p.plu.as_deref(), Some("000123"));
        assert_eq!(p.quantity, 14);
        assert_eq!(p.price, "$4.50");
        assert_eq!(p.category.display_name, "Coffee");
        assert_eq!(p.supplier.display_name, "Acme Roasters");
        assert!(p.created_at.is_some());
    }

    #[test]
    fn empty_object_gets_all_defaults() {
        let p = normalize_product(&json!({}));
        assert_eq!(p.name, DEFAULT_NAME);
        assert_eq!(p.price, DEFAULT_PRICE);
        assert_eq!(p.category.display_name, DEFAULT_CATEGORY);
        assert_eq!(p.quantity, 0);
        assert!(p.variants.is_empty());
        assert!(!p.has_variants);
        assert_eq!(p.key(), None);
    }

    #[test]
    fn non_object_input_never_panics() {
        for raw in [json!(null), json!("junk"), json!(7), json!([1, 2])] {
            let p = normalize_product(&raw);
            assert_eq!(p.name, DEFAULT_NAME);
        }
    }

    #[test]
    fn malformed_fields_degrade_individually() {
        let raw = json!({
            "id": "p2",
            "name": 17,
            "itemQuantity": "12",
            "singleItemSellingPrice": "3.25",
            "category": ["not", "a", "category"],
            "variants": "nope",
        });
        let p = normalize_product(&raw);
        assert_eq!(p.id.as_deref(), Some("p2"));
        // numeric name is tolerated as its string form
        assert_eq!(p.name, "17");
        assert_eq!(p.quantity, 12);
        assert_eq!(p.price, "$3.25");
        assert_eq!(p.category.display_name, DEFAULT_CATEGORY);
        assert!(p.variants.is_empty());
    }

    #[test]
    fn variants_normalize_and_skip_junk_entries() {
        let raw = json!({
            "id": "p3",
            "hasVariants": true,
            "variants": [
                {"name": "Dark", "price": 5.0, "pluUpc": "A1", "quantity": 5},
                "junk",
                {"name": "Light", "price": "5.50", "quantity": 8},
            ],
        });
        let p = normalize_product(&raw);
        assert!(p.has_variants);
        assert_eq!(p.variants.len(), 2);
        assert_eq!(p.variants[0].plu_upc.as_deref(), Some("A1"));
        assert_eq!(p.variants[1].plu_upc, None);
        assert!((p.variants[1].price - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn has_variants_inferred_from_variant_list_when_absent() {
        let raw = json!({
            "id": "p4",
            "variants": [{"name": "Only", "price": 1.0}],
        });
        assert!(normalize_product(&raw).has_variants);
    }
}
