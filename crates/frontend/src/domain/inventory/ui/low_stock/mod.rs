//! Low-stock subview: a pure re-filter of the already-fetched product list
//! with its own page/rows-per-page pair. It never issues a network call and
//! its pagination does not touch the main grid's.

use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use contracts::domain::product::{display_row, Product};
use contracts::shared::pagination::{page_bounds, total_pages};
use leptos::prelude::*;
use thaw::*;

/// Products at or above this effective quantity are considered stocked.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Filter on the *displayed* quantity: for variant products that is the base
/// variant's quantity, same as the grid shows.
pub fn low_stock_products(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| display_row(p).quantity < LOW_STOCK_THRESHOLD)
        .cloned()
        .collect()
}

#[component]
pub fn LowStockPanel(#[prop(into)] products: Signal<Vec<Product>>) -> impl IntoView {
    // independent pagination pair
    let (page, set_page) = signal(1usize);
    let (page_size, set_page_size) = signal(10usize);

    let filtered = Memo::new(move |_| low_stock_products(&products.get()));

    // a shrinking result set may strand the current page past the end
    Effect::new(move |_| {
        let pages = total_pages(filtered.get().len(), page_size.get());
        if page.get_untracked() > pages.max(1) {
            set_page.set(1);
        }
    });

    let visible = move || {
        let items = filtered.get();
        let (start, end) = page_bounds(items.len(), page.get(), page_size.get());
        items[start..end].to_vec()
    };

    view! {
        <div class="low-stock-panel">
            <div style="display: flex; align-items: center; justify-content: space-between; margin-bottom: 8px;">
                <div style="display: flex; align-items: center; gap: 8px;">
                    {icon("alert-triangle")}
                    <h3 style="margin: 0;">"Low stock"</h3>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                        <span>{move || filtered.get().len().to_string()}</span>
                    </Badge>
                </div>
                <PaginationControls
                    current_page=Signal::derive(move || page.get())
                    total_pages=Signal::derive(move || total_pages(filtered.get().len(), page_size.get()))
                    total_count=Signal::derive(move || filtered.get().len())
                    page_size=Signal::derive(move || page_size.get())
                    on_page_change=Callback::new(move |p| set_page.set(p))
                    on_page_size_change=Callback::new(move |size: usize| {
                        set_page_size.set(size.max(1));
                        set_page.set(1);
                    })
                    page_size_options=vec![5, 10, 25, 50]
                />
            </div>

            <table class="data-table" style="width: 100%; border-collapse: collapse;">
                <thead>
                    <tr style="background: #f5f5f5;">
                        <th style="border: 1px solid #ddd; padding: 8px; text-align: left;">"Product"</th>
                        <th style="border: 1px solid #ddd; padding: 8px; text-align: left;">"Category"</th>
                        <th style="border: 1px solid #ddd; padding: 8px; text-align: right;">"Quantity"</th>
                        <th style="border: 1px solid #ddd; padding: 8px; text-align: right;">"Price"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let items = visible();
                        if items.is_empty() {
                            view! {
                                <tr>
                                    <td colspan="4" style="text-align: center; padding: 16px; color: #888;">
                                        "No products below the threshold"
                                    </td>
                                </tr>
                            }.into_any()
                        } else {
                            items.into_iter().map(|p| {
                                let row = display_row(&p);
                                view! {
                                    <tr>
                                        <td style="border: 1px solid #ddd; padding: 8px;">{row.name.clone()}</td>
                                        <td style="border: 1px solid #ddd; padding: 8px;">{p.category.display_name.clone()}</td>
                                        <td style="border: 1px solid #ddd; padding: 8px; text-align: right; color: #c33; font-weight: 500;">
                                            {row.quantity}
                                        </td>
                                        <td style="border: 1px solid #ddd; padding: 8px; text-align: right;">{row.price.clone()}</td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::product::{DisplayRef, Variant};

    fn product(name: &str, qty: i64) -> Product {
        Product {
            id: Some(name.to_string()),
            sku: None,
            plu: None,
            name: name.into(),
            quantity: qty,
            price: "$1.00".into(),
            category: DisplayRef::new("Uncategorized"),
            supplier: DisplayRef::new("Unknown Supplier"),
            has_variants: false,
            variants: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn filters_strictly_below_threshold() {
        let products = vec![product("a", 0), product("b", 9), product("c", 10), product("d", 11)];
        let low = low_stock_products(&products);
        let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn uses_base_variant_quantity_for_variant_products() {
        let mut p = product("v", 50);
        p.has_variants = true;
        p.variants = vec![Variant {
            id: None,
            name: "Base".into(),
            price: 3.0,
            sku: None,
            plu_upc: Some("A1".into()),
            quantity: Some(2),
        }];
        // own quantity 50 is ignored; the displayed quantity 2 is low
        assert_eq!(low_stock_products(&[p]).len(), 1);
    }

    #[test]
    fn recomputes_from_source_without_mutation() {
        let products = vec![product("a", 1)];
        let low = low_stock_products(&products);
        assert_eq!(low.len(), 1);
        assert_eq!(products.len(), 1);
    }
}
