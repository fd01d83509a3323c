//! The base-variant-as-product-row convention, in one place.
//!
//! When a product has variants, `variants[0]` IS the product's display row:
//! its quantity, price, sku and plu populate the product columns, and the
//! sub-rows revealed on expansion are `variants[1..]`. Every renderer and
//! every edit/delete path goes through these accessors instead of re-deriving
//! the convention.

use super::aggregate::{Product, Variant};

/// What the grid shows in the product's own row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub name: String,
    pub quantity: i64,
    pub price: String,
    pub sku: Option<String>,
    pub plu_upc: Option<String>,
    /// True when the row is backed by `variants[0]` ("Base Product" label).
    pub from_base_variant: bool,
}

pub fn display_row(product: &Product) -> DisplayRow {
    match base_variant(product) {
        Some(v) => DisplayRow {
            name: v.name.clone(),
            quantity: v.quantity.unwrap_or(0),
            price: format!("${:.2}", v.price),
            sku: v.sku.clone(),
            plu_upc: v.plu_upc.clone(),
            from_base_variant: true,
        },
        None => DisplayRow {
            name: product.name.clone(),
            quantity: product.quantity,
            price: product.price.clone(),
            sku: product.sku.clone(),
            plu_upc: product.plu.clone(),
            from_base_variant: false,
        },
    }
}

/// Sub-rows revealed on expansion: everything after the base variant.
pub fn expandable_rows(product: &Product) -> &[Variant] {
    match base_variant(product) {
        Some(_) => &product.variants[1..],
        None => &[],
    }
}

fn base_variant(product: &Product) -> Option<&Variant> {
    if product.has_variants {
        product.variants.first()
    } else {
        None
    }
}

// ============================================================================
// Edit target
// ============================================================================

/// Identifies exactly one editable quantity cell.
///
/// `variant_index` of 0 is the base-variant-as-product-row; `1..n-1` are the
/// nested sub-rows. `None` means the non-variant product's own quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub product_key: String,
    pub variant_index: Option<usize>,
}

impl EditTarget {
    pub fn product(key: impl Into<String>) -> Self {
        Self {
            product_key: key.into(),
            variant_index: None,
        }
    }

    pub fn variant(key: impl Into<String>, index: usize) -> Self {
        Self {
            product_key: key.into(),
            variant_index: Some(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::aggregate::DisplayRef;

    fn variant(name: &str, qty: i64, plu: Option<&str>) -> Variant {
        Variant {
            id: None,
            name: name.into(),
            price: 5.0,
            sku: None,
            plu_upc: plu.map(String::from),
            quantity: Some(qty),
        }
    }

    fn product(has_variants: bool, variants: Vec<Variant>) -> Product {
        Product {
            id: Some("p1".into()),
            sku: Some("SKU-1".into()),
            plu: Some("0001".into()),
            name: "Roast".into(),
            quantity: 42,
            price: "$9.99".into(),
            category: DisplayRef::new("Coffee"),
            supplier: DisplayRef::new("Acme"),
            has_variants,
            variants,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn base_variant_doubles_as_product_row() {
        // Product row shows Dark/5; expansion shows exactly Light/8.
        let p = product(
            true,
            vec![variant("Dark", 5, Some("A1")), variant("Light", 8, Some("A2"))],
        );
        let row = display_row(&p);
        assert_eq!(row.name, "Dark");
        assert_eq!(row.quantity, 5);
        assert_eq!(row.plu_upc.as_deref(), Some("A1"));
        assert!(row.from_base_variant);

        let subs = expandable_rows(&p);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "Light");
        assert_eq!(subs[0].quantity, Some(8));
    }

    #[test]
    fn single_product_shows_its_own_fields() {
        let p = product(false, vec![]);
        let row = display_row(&p);
        assert_eq!(row.name, "Roast");
        assert_eq!(row.quantity, 42);
        assert_eq!(row.price, "$9.99");
        assert_eq!(row.plu_upc.as_deref(), Some("0001"));
        assert!(!row.from_base_variant);
        assert!(expandable_rows(&p).is_empty());
    }

    #[test]
    fn has_variants_with_empty_list_falls_back_to_product_fields() {
        let p = product(true, vec![]);
        let row = display_row(&p);
        assert_eq!(row.name, "Roast");
        assert!(!row.from_base_variant);
        assert!(expandable_rows(&p).is_empty());
    }

    #[test]
    fn single_variant_product_has_no_expandable_rows() {
        let p = product(true, vec![variant("Only", 3, Some("B1"))]);
        assert!(display_row(&p).from_base_variant);
        assert!(expandable_rows(&p).is_empty());
    }
}
