pub mod bulk_delete;
pub mod edit;
pub mod state;

use crate::domain::inventory::api;
use crate::domain::inventory::ui::low_stock::LowStockPanel;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::search_input::SearchInput;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, sort_list, Sortable};
use bulk_delete::BulkDeleteModal;
use contracts::domain::product::{
    display_row, expandable_rows, normalize_product, EditTarget, Product,
};
use contracts::shared::pagination::{page_bounds, total_pages, SortDirection};
use edit::{EditEffect, EditEvent, EditState, GridEditState};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use state::{create_state, persist_state};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thaw::*;

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        let a = display_row(self);
        let b = display_row(other);
        match field {
            "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            "category" => self
                .category
                .display_name
                .to_lowercase()
                .cmp(&other.category.display_name.to_lowercase()),
            "sku" => a.sku.cmp(&b.sku),
            "quantity" => a.quantity.cmp(&b.quantity),
            "price" => self
                .price_value()
                .partial_cmp(&other.price_value())
                .unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    }
}

/// Pending confirmation for the two single-target delete paths.
#[derive(Clone)]
enum PendingDelete {
    /// One variant, keyed by its PLU/UPC.
    Variant { plu_upc: String, name: String },
    /// A variantless product, by its best-available identifier.
    Product { key: String, name: String },
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    let state = create_state();

    // server mode: the fetched page; overlay mode: the full search result set
    let (server_items, set_server_items) = signal(Vec::<Product>::new());
    let (search_results, set_search_results) = signal(Option::<Vec<Product>>::None);

    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    // transient mutation-failure notice, auto-dismissed
    let (flash, set_flash) = signal(Option::<String>::None);
    let flash_timer = StoredValue::new_local(None::<Timeout>);
    let show_flash = move |msg: String| {
        set_flash.set(Some(msg));
        flash_timer.update_value(|t| {
            if let Some(prev) = t.take() {
                prev.cancel();
            }
            *t = Some(Timeout::new(5_000, move || set_flash.set(None)));
        });
    };

    let grid_edit = RwSignal::new(GridEditState::new());

    let (bulk_target, set_bulk_target) = signal(Option::<Product>::None);
    let (pending_delete, set_pending_delete) = signal(Option::<PendingDelete>::None);
    let (delete_busy, set_delete_busy) = signal(false);

    let (show_low_stock, set_show_low_stock) = signal(false);

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    let load_server = move || {
        set_is_loading.set(true);
        set_error.set(None);

        let (st, generation) = {
            let mut generation = 0;
            state.update(|s| generation = s.next_generation());
            (state.get_untracked(), generation)
        };
        let sort_key = st.sort_key.clone();
        let sort_dir = sort_key.as_ref().map(|_| {
            if st.sort_ascending {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            }
        });

        leptos::task::spawn_local(async move {
            let result = api::list_products(
                st.page,
                st.page_size,
                None,
                sort_key.as_deref(),
                sort_dir,
                None,
                None,
            )
            .await;

            // a newer fetch supersedes this response
            if !state.with_untracked(|s| s.is_current(generation)) {
                return;
            }

            match result {
                Ok(resp) => {
                    let items: Vec<Product> =
                        resp.items.iter().map(normalize_product).collect();
                    set_server_items.set(items);
                    state.update(|s| {
                        if resp.page > 0 {
                            s.page = resp.page;
                        }
                        s.set_page_metadata(resp.total);
                        if resp.total_pages > 0 {
                            s.total_pages = resp.total_pages;
                        }
                        s.is_loaded = true;
                        s.reset_expansion();
                    });
                    persist_state(state);
                    set_is_loading.set(false);
                }
                Err(e) => {
                    log::warn!("product list fetch failed: {e}");
                    set_error.set(Some(e));
                    set_is_loading.set(false);
                }
            }
        });
    };

    let run_search = move |term: String| {
        set_is_loading.set(true);
        set_error.set(None);

        let mut generation = 0;
        state.update(|s| generation = s.next_generation());

        leptos::task::spawn_local(async move {
            let result = api::search_products(&term, None).await;
            if !state.with_untracked(|s| s.is_current(generation)) {
                return;
            }
            match result {
                Ok(raw) => {
                    let items: Vec<Product> = raw.iter().map(normalize_product).collect();
                    // a fresh term already landed on page 1 via the debounce
                    // acceptance; a refresh only clamps a stranded page
                    state.update(|s| {
                        let pages = total_pages(items.len(), s.page_size).max(1);
                        if s.page > pages {
                            s.page = 1;
                        }
                        s.reset_expansion();
                    });
                    set_search_results.set(Some(items));
                    set_is_loading.set(false);
                }
                Err(e) => {
                    log::warn!("product search failed: {e}");
                    set_error.set(Some(e));
                    set_is_loading.set(false);
                }
            }
        });
    };

    // refresh whichever source is active (after any successful mutation)
    let refresh = move || {
        let term = state.with_untracked(|s| s.q.clone());
        if search_results.get_untracked().is_some() && !term.is_empty() {
            run_search(term);
        } else {
            load_server();
        }
    };

    // initial load (once)
    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_server();
        }
    });

    // ------------------------------------------------------------------
    // Coordinator callbacks
    // ------------------------------------------------------------------

    let handle_search_keystroke = Callback::new(move |raw: String| {
        state.update(|s| s.q_input = raw);
    });

    let handle_search_debounced = Callback::new(move |term: String| {
        let mut apply = false;
        state.update(|s| apply = s.accept_debounced(&term));
        if !apply {
            return;
        }
        if term.trim().is_empty() {
            set_search_results.set(None);
            load_server();
        } else {
            run_search(term);
        }
    });

    let toggle_sort = move |key: &'static str| {
        state.update(|s| s.toggle_sort(key));
        persist_state(state);
        // overlay mode re-sorts client-side in the derived view; server mode
        // refetches, never both
        if search_results.get_untracked().is_none() {
            load_server();
        }
    };

    let go_to_page = move |page: usize| {
        if search_results.get_untracked().is_some() {
            let len = search_results.get_untracked().map(|v| v.len()).unwrap_or(0);
            let pages = state.with_untracked(|s| total_pages(len, s.page_size));
            if page >= 1 && page <= pages.max(1) && page != state.with_untracked(|s| s.page) {
                state.update(|s| s.page = page);
            }
        } else {
            if !state.with_untracked(|s| s.page_change_allowed(page, is_loading.get_untracked())) {
                return;
            }
            state.update(|s| s.page = page);
            load_server();
        }
    };

    let change_page_size = move |size: usize| {
        if !state
            .with_untracked(|s| s.page_size_change_allowed(size, is_loading.get_untracked()))
        {
            return;
        }
        state.update(|s| {
            s.page_size = size;
            s.page = 1;
        });
        persist_state(state);
        if search_results.get_untracked().is_none() {
            load_server();
        }
    };

    // ------------------------------------------------------------------
    // Derived rows
    // ------------------------------------------------------------------

    // the normalized list the low-stock subview derives from
    let all_products = Signal::derive(move || {
        search_results
            .get()
            .unwrap_or_else(|| server_items.get())
    });

    // what the grid shows on the current page
    let page_items = Signal::derive(move || {
        let st = state.get();
        match search_results.get() {
            Some(mut items) => {
                if let Some(key) = st.sort_key.as_deref() {
                    sort_list(&mut items, key, st.sort_ascending);
                }
                let (start, end) = page_bounds(items.len(), st.page, st.page_size);
                items[start..end].to_vec()
            }
            None => server_items.get(),
        }
    });

    let visible_total_count = Signal::derive(move || match search_results.get() {
        Some(items) => items.len(),
        None => state.get().total_count,
    });

    let visible_total_pages = Signal::derive(move || match search_results.get() {
        Some(items) => total_pages(items.len(), state.get().page_size),
        None => state.get().total_pages,
    });

    // ------------------------------------------------------------------
    // Inline quantity editing
    // ------------------------------------------------------------------

    // routes a validated save to the variant- or product-level endpoint
    let issue_save = move |target: EditTarget, quantity: i64| {
        let products = page_items.get_untracked();
        let product = products
            .iter()
            .find(|p| p.key() == Some(target.product_key.as_str()))
            .cloned();

        let plu_upc = match (&product, target.variant_index) {
            (Some(p), Some(idx)) => p
                .variants
                .get(idx)
                .and_then(|v| v.plu_upc.clone())
                .filter(|plu| !plu.trim().is_empty()),
            _ => None,
        };
        let product_key = target.product_key.clone();

        leptos::task::spawn_local(async move {
            let result = match plu_upc {
                Some(plu) => api::update_variant_quantity_by_key(&plu, quantity).await,
                // no resolvable PLU/UPC (or a plain product edit): fall back
                // to the product-level update
                None => api::update_product_quantity(&product_key, quantity).await,
            };
            match result {
                Ok(()) => {
                    grid_edit.update(|g| {
                        g.apply(EditEvent::SaveSucceeded);
                    });
                    refresh();
                }
                Err(e) => {
                    log::warn!("quantity update failed: {e}");
                    grid_edit.update(|g| {
                        g.apply(EditEvent::SaveFailed);
                    });
                    show_flash(format!("Quantity update failed: {e}"));
                }
            }
        });
    };

    let save_now = move || {
        let mut effect = None;
        grid_edit.update(|g| effect = g.apply(EditEvent::Save));
        if let Some(EditEffect::IssueSave { target, quantity }) = effect {
            issue_save(target, quantity);
        }
    };

    let begin_edit = move |target: EditTarget, current: i64| {
        grid_edit.update(|g| {
            g.apply(EditEvent::Begin {
                target,
                initial: current.to_string(),
            });
        });
    };

    let cancel_edit = move || {
        grid_edit.update(|g| {
            g.apply(EditEvent::Cancel);
        });
    };

    // one editable quantity cell; the closure-heavy part of the grid
    let quantity_cell = move |target: EditTarget, quantity: i64, actionable: bool| {
        let target_for_view = target.clone();
        view! {
            <td style="border: 1px solid #ddd; padding: 4px 8px; text-align: right; min-width: 110px;">
                {move || {
                    let g = grid_edit.get();
                    let target = target_for_view.clone();
                    if g.is_in_flight(&target) {
                        return view! {
                            <span class="spinner" title="Saving...">{"⏳"}</span>
                        }
                        .into_any();
                    }
                    match &g.edit {
                        EditState::Editing { target: t, staged, error } if *t == target => {
                            let staged = staged.clone();
                            let invalid = error.is_some();
                            let error_text = error.as_ref().map(|e| e.to_string());
                            view! {
                                <span style="display: inline-flex; align-items: center; gap: 4px;">
                                    <input
                                        type="text"
                                        inputmode="numeric"
                                        autofocus=true
                                        style=format!(
                                            "width: 64px; padding: 2px 6px; text-align: right; border: 1px solid {}; border-radius: 3px;",
                                            if invalid { "#c33" } else { "#2196F3" }
                                        )
                                        title=error_text.clone().unwrap_or_default()
                                        prop:value=staged
                                        on:input=move |ev| {
                                            grid_edit.update(|g| {
                                                g.apply(EditEvent::Input(event_target_value(&ev)));
                                            });
                                        }
                                        on:keydown=move |ev| {
                                            match ev.key().as_str() {
                                                "Enter" => save_now(),
                                                "Escape" => cancel_edit(),
                                                _ => {}
                                            }
                                        }
                                        on:blur=move |_| save_now()
                                    />
                                    <button
                                        class="button button--icon"
                                        title="Save"
                                        on:mousedown=move |ev| ev.prevent_default()
                                        on:click=move |_| save_now()
                                    >
                                        {icon("check")}
                                    </button>
                                    <button
                                        class="button button--icon"
                                        title="Cancel"
                                        on:mousedown=move |ev| ev.prevent_default()
                                        on:click=move |_| cancel_edit()
                                    >
                                        {icon("x")}
                                    </button>
                                </span>
                            }
                            .into_any()
                        }
                        _ => {
                            let locked = g.locked();
                            view! {
                                <span style="display: inline-flex; align-items: center; gap: 6px; justify-content: flex-end;">
                                    <span>{quantity}</span>
                                    <button
                                        class="button button--icon"
                                        title=if actionable { "Edit quantity" } else { "No identifier; not editable" }
                                        disabled={locked || !actionable}
                                        on:click=move |_| {
                                            if !actionable {
                                                return;
                                            }
                                            begin_edit(target.clone(), quantity);
                                        }
                                    >
                                        {icon("edit")}
                                    </button>
                                </span>
                            }
                            .into_any()
                        }
                    }
                }}
            </td>
        }
    };

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    let confirm_pending_delete = move |_| {
        let Some(pending) = pending_delete.get_untracked() else {
            return;
        };
        if delete_busy.get_untracked() {
            return;
        }
        set_delete_busy.set(true);

        leptos::task::spawn_local(async move {
            let result = match &pending {
                PendingDelete::Variant { plu_upc, .. } => api::delete_variant(plu_upc).await,
                PendingDelete::Product { key, .. } => api::delete_product(key).await,
            };
            set_delete_busy.set(false);
            set_pending_delete.set(None);
            match result {
                Ok(()) => refresh(),
                Err(e) => {
                    log::warn!("delete failed: {e}");
                    show_flash(format!("Delete failed: {e}"));
                }
            }
        });
    };

    // ------------------------------------------------------------------
    // Row rendering
    // ------------------------------------------------------------------

    let product_rows = move |product: Product| {
        let key = product.key().map(String::from);
        let actionable = key.is_some();
        let row = display_row(&product);
        let subs: Vec<_> = expandable_rows(&product).to_vec();
        let expandable = !subs.is_empty();
        let product_key = key.clone().unwrap_or_default();

        let expanded = {
            let product_key = product_key.clone();
            move || {
                state.with(|s| s.expanded_products.contains(&product_key))
            }
        };

        let main_target = if row.from_base_variant {
            EditTarget::variant(product_key.clone(), 0)
        } else {
            EditTarget::product(product_key.clone())
        };

        let toggle_key = product_key.clone();
        let bulk_product = product.clone();
        let delete_key = product_key.clone();
        let delete_name = row.name.clone();
        let has_variants = product.has_variants;

        let sub_rows = {
            let product_key = product_key.clone();
            let expanded = expanded.clone();
            move || {
                if !expanded() {
                    return vec![];
                }
                subs.iter()
                    .enumerate()
                    .map(|(i, v)| {
                        // index 0 is the base variant shown as the product row
                        let variant_index = i + 1;
                        let target = EditTarget::variant(product_key.clone(), variant_index);
                        let plu = v.plu_upc.clone().filter(|p| !p.trim().is_empty());
                        let deletable = plu.is_some();
                        let del_plu = plu.clone().unwrap_or_default();
                        let del_name = v.name.clone();
                        view! {
                            <tr class="variant-row" style="background: #fafafa;">
                                <td style="border: 1px solid #ddd; padding: 8px;"></td>
                                <td style="border: 1px solid #ddd; padding: 8px 8px 8px 28px;">
                                    {v.name.clone()}
                                </td>
                                <td style="border: 1px solid #ddd; padding: 8px;"></td>
                                <td style="border: 1px solid #ddd; padding: 8px;">
                                    {plu.clone().unwrap_or_else(|| "—".to_string())}
                                </td>
                                <td style="border: 1px solid #ddd; padding: 8px; text-align: right;">
                                    {format!("${:.2}", v.price)}
                                </td>
                                {quantity_cell(target, v.quantity.unwrap_or(0), actionable)}
                                <td style="border: 1px solid #ddd; padding: 8px; text-align: center;">
                                    <button
                                        class="button button--icon"
                                        title=if deletable { "Delete variant" } else { "No PLU/UPC; cannot be deleted" }
                                        disabled=!deletable
                                        on:click=move |_| {
                                            if !deletable {
                                                return;
                                            }
                                            set_pending_delete.set(Some(PendingDelete::Variant {
                                                plu_upc: del_plu.clone(),
                                                name: del_name.clone(),
                                            }));
                                        }
                                    >
                                        {icon("trash")}
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()
            }
        };

        view! {
            <tr>
                <td style="border: 1px solid #ddd; padding: 8px; width: 32px; text-align: center;">
                    {if expandable {
                        let expanded = expanded.clone();
                        view! {
                            <button
                                class="button button--icon"
                                title="Show variants"
                                on:click=move |_| state.update(|s| s.toggle_product(&toggle_key))
                            >
                                {move || if expanded() { icon("chevron-down") } else { icon("chevron-right") }}
                            </button>
                        }.into_any()
                    } else {
                        view! { <></> }.into_any()
                    }}
                </td>
                <td style="border: 1px solid #ddd; padding: 8px;">
                    {row.name.clone()}
                    {if row.from_base_variant {
                        view! {
                            <span class="badge badge--muted" style="margin-left: 6px; font-size: 11px; color: #888;">
                                "Base Product"
                            </span>
                        }.into_any()
                    } else {
                        view! { <></> }.into_any()
                    }}
                </td>
                <td style="border: 1px solid #ddd; padding: 8px;">
                    {product.category.display_name.clone()}
                </td>
                <td style="border: 1px solid #ddd; padding: 8px;">
                    {row.sku.clone().or(row.plu_upc.clone()).unwrap_or_else(|| "—".to_string())}
                </td>
                <td style="border: 1px solid #ddd; padding: 8px; text-align: right;">
                    {row.price.clone()}
                </td>
                {quantity_cell(main_target, row.quantity, actionable)}
                <td style="border: 1px solid #ddd; padding: 8px; text-align: center;">
                    {if has_variants {
                        view! {
                            <button
                                class="button button--icon"
                                title="Delete variants..."
                                disabled=!actionable
                                on:click=move |_| set_bulk_target.set(Some(bulk_product.clone()))
                            >
                                {icon("trash")}
                            </button>
                        }.into_any()
                    } else {
                        view! {
                            <button
                                class="button button--icon"
                                title="Delete product"
                                disabled=!actionable
                                on:click=move |_| {
                                    if !actionable {
                                        return;
                                    }
                                    set_pending_delete.set(Some(PendingDelete::Product {
                                        key: delete_key.clone(),
                                        name: delete_name.clone(),
                                    }));
                                }
                            >
                                {icon("trash")}
                            </button>
                        }.into_any()
                    }}
                </td>
            </tr>
            {sub_rows}
        }
    };

    let header_cell = move |label: &'static str, field: &'static str, align: &'static str| {
        view! {
            <th style=format!("border: 1px solid #ddd; padding: 8px; cursor: pointer; user-select: none; text-align: {};", align)
                on:click=move |_| toggle_sort(field)
                title="Sort"
            >
                {move || {
                    let st = state.get();
                    let current = st.sort_key.clone().unwrap_or_default();
                    format!("{}{}", label, get_sort_indicator(field, &current, st.sort_ascending))
                }}
            </th>
        }
    };

    let grid_body = move || {
        let items = page_items.get();
        if items.is_empty() {
            return view! {
                <tr>
                    <td colspan="7" style="text-align: center; padding: 20px; color: #888;">
                        {if state.with(|s| s.q.is_empty()) {
                            "No products."
                        } else {
                            "Nothing matches the search."
                        }}
                    </td>
                </tr>
            }
            .into_any();
        }

        if state.with(|s| s.grouped) {
            // grouped view: category header rows gate their products
            let mut groups: BTreeMap<String, Vec<Product>> = BTreeMap::new();
            for p in items {
                groups
                    .entry(p.category.display_name.clone())
                    .or_default()
                    .push(p);
            }
            groups
                .into_iter()
                .map(|(category, members)| {
                    let cat_for_toggle = category.clone();
                    let cat_for_check = category.clone();
                    let cat_expanded =
                        move || state.with(|s| s.expanded_categories.contains(&cat_for_check));
                    let count = members.len();
                    let member_rows = {
                        let cat_expanded = cat_expanded.clone();
                        move || {
                            if cat_expanded() {
                                members
                                    .iter()
                                    .cloned()
                                    .map(|p| product_rows(p).into_any())
                                    .collect::<Vec<_>>()
                            } else {
                                vec![]
                            }
                        }
                    };
                    view! {
                        <tr class="category-row" style="background: #eef2f7; cursor: pointer;"
                            on:click=move |_| state.update(|s| s.toggle_category(&cat_for_toggle))
                        >
                            <td style="border: 1px solid #ddd; padding: 8px; text-align: center;">
                                {
                                    let cat_expanded = cat_expanded.clone();
                                    move || if cat_expanded() { icon("chevron-down") } else { icon("chevron-right") }
                                }
                            </td>
                            <td colspan="6" style="border: 1px solid #ddd; padding: 8px; font-weight: 600;">
                                {category.clone()} {format!(" ({})", count)}
                            </td>
                        </tr>
                        {member_rows}
                    }
                    .into_any()
                })
                .collect::<Vec<_>>()
                .into_any()
        } else {
            items
                .into_iter()
                .map(|p| product_rows(p).into_any())
                .collect::<Vec<_>>()
                .into_any()
        }
    };

    // ------------------------------------------------------------------
    // Page
    // ------------------------------------------------------------------

    view! {
        <div class="page page--wide">
            <div class="page__header" style="display: flex; align-items: center; justify-content: space-between; margin-bottom: 8px;">
                <div class="page__header-left" style="display: flex; align-items: center; gap: 8px;">
                    {icon("products")}
                    <h1 class="page__title" style="margin: 0;">"Inventory"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || visible_total_count.get().to_string()}</span>
                    </Badge>
                </div>
                <div class="page__header-right" style="display: flex; align-items: center; gap: 8px;">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh()
                        disabled=is_loading
                    >
                        {icon("refresh")}
                        {move || if is_loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            {move || flash.get().map(|msg| view! {
                <div class="warning-box warning-box--error" style="margin-bottom: 8px;">
                    <span class="warning-box__icon">{icon("alert-triangle")}</span>
                    <span class="warning-box__text">{msg}</span>
                </div>
            })}

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error" style="margin-bottom: 8px; display: flex; align-items: center; gap: 8px;">
                    <span class="warning-box__icon">{icon("alert-triangle")}</span>
                    <span class="warning-box__text">{e}</span>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh()
                    >
                        "Retry"
                    </Button>
                </div>
            })}

            <div class="filter-panel" style="display: flex; align-items: center; gap: 12px; flex-wrap: wrap; padding: 10px; background: #f9f9f9; border-radius: 4px; margin-bottom: 8px;">
                <SearchInput
                    on_input=handle_search_keystroke
                    on_change=handle_search_debounced
                    placeholder="Search by name, SKU or PLU..."
                />
                <label style="display: inline-flex; align-items: center; gap: 6px; cursor: pointer; user-select: none;">
                    <input
                        type="checkbox"
                        prop:checked=move || state.with(|s| s.grouped)
                        on:change=move |_| {
                            state.update(|s| {
                                s.grouped = !s.grouped;
                                s.reset_expansion();
                            });
                            persist_state(state);
                        }
                    />
                    <span>"Group by category"</span>
                </label>
                <label style="display: inline-flex; align-items: center; gap: 6px; cursor: pointer; user-select: none;">
                    <input
                        type="checkbox"
                        prop:checked=move || show_low_stock.get()
                        on:change=move |_| set_show_low_stock.update(|v| *v = !*v)
                    />
                    <span>"Low stock only"</span>
                </label>
                <div style="margin-left: auto;">
                    <PaginationControls
                        current_page=Signal::derive(move || state.get().page)
                        total_pages=visible_total_pages
                        total_count=visible_total_count
                        page_size=Signal::derive(move || state.get().page_size)
                        on_page_change=Callback::new(go_to_page)
                        on_page_size_change=Callback::new(change_page_size)
                    />
                </div>
            </div>

            {move || if show_low_stock.get() {
                view! { <LowStockPanel products=all_products /> }.into_any()
            } else {
                view! {
                    <div class="table-container">
                        <table class="data-table" style="width: 100%; border-collapse: collapse; font-size: 14px;">
                            <thead>
                                <tr style="background: #f5f5f5;">
                                    <th style="border: 1px solid #ddd; padding: 8px; width: 32px;"></th>
                                    {header_cell("Product", "name", "left")}
                                    {header_cell("Category", "category", "left")}
                                    {header_cell("SKU / PLU", "sku", "left")}
                                    {header_cell("Price", "price", "right")}
                                    {header_cell("Quantity", "quantity", "right")}
                                    <th style="border: 1px solid #ddd; padding: 8px; width: 60px;"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {grid_body}
                            </tbody>
                        </table>
                    </div>
                }.into_any()
            }}

            // Bulk variant deletion
            {move || bulk_target.get().map(|product| {
                let name = display_row(&product).name;
                view! {
                    <BulkDeleteModal
                        product_name=name
                        variants=product.variants.clone()
                        on_close=Callback::new(move |_| set_bulk_target.set(None))
                        on_deleted=Callback::new(move |_| refresh())
                        on_error=Callback::new(move |e: String| show_flash(format!("Bulk delete failed: {e}")))
                    />
                }
            })}

            // Single-target delete confirmation
            {move || pending_delete.get().map(|pending| {
                let (title, message) = match &pending {
                    PendingDelete::Variant { name, plu_upc } => (
                        "Delete variant".to_string(),
                        format!("Delete variant \"{}\" ({})? This cannot be undone.", name, plu_upc),
                    ),
                    PendingDelete::Product { name, .. } => (
                        "Delete product".to_string(),
                        format!("Delete product \"{}\"? This cannot be undone.", name),
                    ),
                };
                view! {
                    <ConfirmDialog
                        title=title
                        message=message
                        confirm_label="Delete"
                        busy=delete_busy
                        on_confirm=Callback::new(confirm_pending_delete)
                        on_cancel=Callback::new(move |_| set_pending_delete.set(None))
                    />
                }
            })}
        </div>
    }
}
