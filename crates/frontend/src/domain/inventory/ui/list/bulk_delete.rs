//! Selective, batched variant deletion for one product.
//!
//! Selection is a set of `pluUpc` strings; variants without one are shown
//! but can never enter the set, not even through Select All. The batched
//! call returns an itemized outcome: fully successful runs close the modal,
//! mixed outcomes keep it open with the failures listed and the deleted keys
//! dropped from the selection.

use crate::domain::inventory::api::{self, BulkDeleteOutcome};
use crate::shared::modal::Modal;
use contracts::domain::product::Variant;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

// ============================================================================
// Selection set
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantSelection {
    selected: HashSet<String>,
}

impl VariantSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The keys Select All operates on: every non-empty `pluUpc`.
    pub fn selectable_keys(variants: &[Variant]) -> Vec<String> {
        variants
            .iter()
            .filter_map(|v| v.plu_upc.as_deref())
            .filter(|k| !k.trim().is_empty())
            .map(String::from)
            .collect()
    }

    pub fn toggle(&mut self, plu_upc: &str) {
        if !self.selected.remove(plu_upc) {
            self.selected.insert(plu_upc.to_string());
        }
    }

    pub fn is_selected(&self, plu_upc: &str) -> bool {
        self.selected.contains(plu_upc)
    }

    /// Select every selectable key; if all are already selected, clear.
    pub fn toggle_all(&mut self, variants: &[Variant]) {
        let keys = Self::selectable_keys(variants);
        if !keys.is_empty() && keys.iter().all(|k| self.selected.contains(k)) {
            for k in &keys {
                self.selected.remove(k);
            }
        } else {
            self.selected.extend(keys);
        }
    }

    pub fn all_selected(&self, variants: &[Variant]) -> bool {
        let keys = Self::selectable_keys(variants);
        !keys.is_empty() && keys.iter().all(|k| self.selected.contains(k))
    }

    pub fn remove_all(&mut self, keys: &[String]) {
        for k in keys {
            self.selected.remove(k);
        }
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.selected.iter().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

// ============================================================================
// Modal
// ============================================================================

#[component]
pub fn BulkDeleteModal(
    /// Product name shown in the title
    product_name: String,
    /// All variants of the product (base variant included)
    variants: Vec<Variant>,
    /// Close without touching anything
    on_close: Callback<()>,
    /// At least one variant was deleted; the grid must refresh
    on_deleted: Callback<()>,
    /// Transport-level failure; reported by the parent, modal closes
    on_error: Callback<String>,
) -> impl IntoView {
    let (selection, set_selection) = signal(VariantSelection::new());
    let (deleting, set_deleting) = signal(false);
    let (failures, set_failures) = signal(Vec::<(String, String)>::new());

    let variants = StoredValue::new(variants);

    let confirm = move |_| {
        let keys = selection.get().keys();
        if keys.is_empty() || deleting.get() {
            return;
        }
        set_deleting.set(true);
        set_failures.set(Vec::new());

        leptos::task::spawn_local(async move {
            match api::bulk_delete_variants(&keys).await {
                Ok(BulkDeleteOutcome { deleted, failed }) => {
                    set_deleting.set(false);
                    if !deleted.is_empty() {
                        on_deleted.run(());
                    }
                    if failed.is_empty() {
                        on_close.run(());
                    } else {
                        // reconcile: drop what is gone, keep the rest selected
                        set_selection.update(|s| s.remove_all(&deleted));
                        set_failures
                            .set(failed.into_iter().map(|f| (f.plu_upc, f.error)).collect());
                    }
                }
                Err(e) => {
                    set_deleting.set(false);
                    log::warn!("bulk variant delete failed: {e}");
                    on_error.run(e);
                    on_close.run(());
                }
            }
        });
    };

    view! {
        <Modal
            title=format!("Delete variants: {}", product_name)
            on_close=on_close
        >
            <table class="data-table" style="width: 100%; border-collapse: collapse;">
                <thead>
                    <tr style="background: #f5f5f5;">
                        <th style="border: 1px solid #ddd; padding: 8px; width: 40px; text-align: center;">
                            <input
                                type="checkbox"
                                prop:checked=move || {
                                    variants.with_value(|v| selection.get().all_selected(v))
                                }
                                on:change=move |_| {
                                    variants.with_value(|v| {
                                        set_selection.update(|s| s.toggle_all(v));
                                    })
                                }
                                title="Select all"
                            />
                        </th>
                        <th style="border: 1px solid #ddd; padding: 8px; text-align: left;">"Variant"</th>
                        <th style="border: 1px solid #ddd; padding: 8px; text-align: left;">"PLU/UPC"</th>
                        <th style="border: 1px solid #ddd; padding: 8px; text-align: right;">"Price"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || variants.with_value(|vs| vs.iter().map(|v| {
                        let plu = v.plu_upc.clone().filter(|p| !p.trim().is_empty());
                        let selectable = plu.is_some();
                        let plu_for_check = plu.clone();
                        let plu_for_toggle = plu.clone();
                        view! {
                            <tr>
                                <td style="border: 1px solid #ddd; padding: 8px; text-align: center;">
                                    <input
                                        type="checkbox"
                                        disabled=!selectable
                                        title=if selectable { "" } else { "No PLU/UPC; cannot be deleted" }
                                        prop:checked=move || {
                                            plu_for_check
                                                .as_deref()
                                                .is_some_and(|p| selection.get().is_selected(p))
                                        }
                                        on:change=move |_| {
                                            if let Some(p) = plu_for_toggle.clone() {
                                                set_selection.update(|s| s.toggle(&p));
                                            }
                                        }
                                    />
                                </td>
                                <td style="border: 1px solid #ddd; padding: 8px;">{v.name.clone()}</td>
                                <td style="border: 1px solid #ddd; padding: 8px;">
                                    {plu.clone().unwrap_or_else(|| "—".to_string())}
                                </td>
                                <td style="border: 1px solid #ddd; padding: 8px; text-align: right;">
                                    {format!("${:.2}", v.price)}
                                </td>
                            </tr>
                        }
                    }).collect_view())}
                </tbody>
            </table>

            {move || {
                let fails = failures.get();
                if fails.is_empty() {
                    view! { <></> }.into_any()
                } else {
                    view! {
                        <div class="warning-box warning-box--error" style="margin-top: 8px;">
                            <span class="warning-box__text">
                                {format!("{} variant(s) could not be deleted:", fails.len())}
                            </span>
                            <ul>
                                {fails.into_iter().map(|(plu, err)| view! {
                                    <li><code>{plu}</code>": "{err}</li>
                                }).collect_view()}
                            </ul>
                        </div>
                    }.into_any()
                }
            }}

            <div style="margin-top: 12px;">
                <Flex gap=FlexGap::Small justify=FlexJustify::End>
                    <span class="text-muted" style="margin-right: auto;">
                        {move || format!("Selected: {}", selection.get().len())}
                    </span>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || selection.get().is_empty() || deleting.get())
                        on_click=confirm
                    >
                        {move || if deleting.get() {
                            "Deleting...".to_string()
                        } else {
                            format!("Delete ({})", selection.get().len())
                        }}
                    </Button>
                </Flex>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(name: &str, plu: Option<&str>) -> Variant {
        Variant {
            id: None,
            name: name.into(),
            price: 2.5,
            sku: None,
            plu_upc: plu.map(String::from),
            quantity: Some(1),
        }
    }

    #[test]
    fn select_all_skips_variants_without_plu() {
        // 3 variants, 2 with keys: Select All picks exactly those 2
        let variants = vec![
            variant("Dark", Some("A1")),
            variant("Medium", None),
            variant("Light", Some("A2")),
        ];
        let mut sel = VariantSelection::new();
        sel.toggle_all(&variants);
        assert_eq!(sel.keys(), vec!["A1".to_string(), "A2".to_string()]);
        assert!(sel.all_selected(&variants));
    }

    #[test]
    fn keyless_variant_never_enters_the_selection() {
        let variants = vec![variant("Medium", None), variant("Other", Some(""))];
        let mut sel = VariantSelection::new();
        sel.toggle_all(&variants);
        assert!(sel.is_empty());
        assert!(!sel.all_selected(&variants));
    }

    #[test]
    fn toggle_all_twice_clears() {
        let variants = vec![variant("Dark", Some("A1")), variant("Light", Some("A2"))];
        let mut sel = VariantSelection::new();
        sel.toggle_all(&variants);
        assert_eq!(sel.len(), 2);
        sel.toggle_all(&variants);
        assert!(sel.is_empty());
    }

    #[test]
    fn individual_toggle_flips_membership() {
        let mut sel = VariantSelection::new();
        sel.toggle("A1");
        assert!(sel.is_selected("A1"));
        sel.toggle("A1");
        assert!(!sel.is_selected("A1"));
    }

    #[test]
    fn reconciliation_drops_deleted_keys_only() {
        let mut sel = VariantSelection::new();
        sel.toggle("A1");
        sel.toggle("A2");
        sel.toggle("A3");
        sel.remove_all(&["A1".to_string(), "A3".to_string()]);
        assert_eq!(sel.keys(), vec!["A2".to_string()]);
    }
}
