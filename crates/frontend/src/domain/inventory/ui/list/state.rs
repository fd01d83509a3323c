use contracts::shared::pagination::total_pages;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const STORAGE_KEY: &str = "inventory_list_state_v1";

/// Only presentation preferences survive a reload. Search text, page,
/// expansion and edit state never do.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedState {
    pub sort_key: Option<String>,
    pub sort_ascending: bool,
    pub page_size: usize,
    pub grouped: bool,
}

#[derive(Clone, Debug)]
pub struct InventoryListState {
    // search: raw input per keystroke, applied term once the debounce fires
    pub q_input: String,
    pub q: String,

    // sorting (None = store's default order)
    pub sort_key: Option<String>,
    pub sort_ascending: bool,

    // pagination, 1-based (server mode metadata)
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,

    // hierarchical expansion; independent sets
    pub expanded_products: HashSet<String>,
    pub expanded_categories: HashSet<String>,
    pub grouped: bool,

    // fetch bookkeeping
    pub is_loaded: bool,
    pub fetch_generation: u64,
}

impl Default for InventoryListState {
    fn default() -> Self {
        Self {
            q_input: String::new(),
            q: String::new(),
            sort_key: None,
            sort_ascending: true,
            page: 1,
            page_size: 25,
            total_count: 0,
            total_pages: 0,
            expanded_products: HashSet::new(),
            expanded_categories: HashSet::new(),
            grouped: false,
            is_loaded: false,
            fetch_generation: 0,
        }
    }
}

impl InventoryListState {
    /// A debounced term is applied only when it has caught up with the raw
    /// input (a stale timer firing behind further keystrokes is dropped) and
    /// actually differs from the currently applied term. Applying resets to
    /// page 1. Returns whether a fetch should be issued.
    pub fn accept_debounced(&mut self, emitted: &str) -> bool {
        if emitted != self.q_input || emitted == self.q {
            return false;
        }
        self.q = emitted.to_string();
        self.page = 1;
        true
    }

    /// Clicking an already-ascending column flips it to descending; a new
    /// column starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_ascending = true;
        }
        self.page = 1;
    }

    /// Re-entrancy guard: a request for the current page, an out-of-range
    /// page, or any page while a fetch is pending is a no-op.
    pub fn page_change_allowed(&self, requested: usize, fetch_pending: bool) -> bool {
        !fetch_pending
            && requested >= 1
            && requested != self.page
            && (self.total_pages == 0 || requested <= self.total_pages)
    }

    /// Same re-entrancy rule for rows-per-page: the current size, a zero
    /// size, or any change while a fetch is pending is a no-op.
    pub fn page_size_change_allowed(&self, requested: usize, fetch_pending: bool) -> bool {
        !fetch_pending && requested >= 1 && requested != self.page_size
    }

    pub fn set_page_metadata(&mut self, total: usize) {
        self.total_count = total;
        self.total_pages = total_pages(total, self.page_size);
    }

    pub fn toggle_product(&mut self, key: &str) {
        if !self.expanded_products.remove(key) {
            self.expanded_products.insert(key.to_string());
        }
    }

    pub fn toggle_category(&mut self, key: &str) {
        if !self.expanded_categories.remove(key) {
            self.expanded_categories.insert(key.to_string());
        }
    }

    /// Expansion does not survive a refetch/regroup.
    pub fn reset_expansion(&mut self) {
        self.expanded_products.clear();
        self.expanded_categories.clear();
    }

    /// Tag a fetch about to be issued. Only the response carrying the latest
    /// generation may be applied.
    pub fn next_generation(&mut self) -> u64 {
        self.fetch_generation += 1;
        self.fetch_generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.fetch_generation
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_persisted() -> Option<PersistedState> {
    let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    serde_json::from_str::<PersistedState>(&raw).ok()
}

fn save_persisted(st: &PersistedState) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(st) else { return };
    let _ = storage.set_item(STORAGE_KEY, &raw);
}

pub fn persist_state(signal: RwSignal<InventoryListState>) {
    let st = signal.get_untracked();
    save_persisted(&PersistedState {
        sort_key: st.sort_key,
        sort_ascending: st.sort_ascending,
        page_size: st.page_size,
        grouped: st.grouped,
    });
}

pub fn create_state() -> RwSignal<InventoryListState> {
    let mut st = InventoryListState::default();
    if let Some(p) = load_persisted() {
        st.sort_key = p.sort_key;
        st.sort_ascending = p.sort_ascending;
        if p.page_size > 0 {
            st.page_size = p.page_size;
        }
        st.grouped = p.grouped;
    }
    RwSignal::new(st)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounced_term_applied_once_when_caught_up() {
        let mut st = InventoryListState::default();
        st.page = 3;

        // typing "a", "ab", "abc": only the final quiet-period fire matches
        // the raw input
        st.q_input = "abc".to_string();
        assert!(!st.accept_debounced("a"));
        assert!(!st.accept_debounced("ab"));
        assert_eq!(st.q, "");
        assert_eq!(st.page, 3);

        assert!(st.accept_debounced("abc"));
        assert_eq!(st.q, "abc");
        assert_eq!(st.page, 1);

        // firing again with the same term is a no-op
        assert!(!st.accept_debounced("abc"));
    }

    #[test]
    fn clearing_search_is_applied() {
        let mut st = InventoryListState::default();
        st.q_input = "abc".to_string();
        assert!(st.accept_debounced("abc"));
        st.q_input.clear();
        assert!(st.accept_debounced(""));
        assert_eq!(st.q, "");
    }

    #[test]
    fn sort_toggles_direction_on_same_column() {
        let mut st = InventoryListState::default();
        st.toggle_sort("name");
        assert_eq!(st.sort_key.as_deref(), Some("name"));
        assert!(st.sort_ascending);

        st.toggle_sort("name");
        assert!(!st.sort_ascending);

        st.toggle_sort("quantity");
        assert_eq!(st.sort_key.as_deref(), Some("quantity"));
        assert!(st.sort_ascending);
    }

    #[test]
    fn page_change_guard_rejects_same_page_and_pending_fetch() {
        let mut st = InventoryListState::default();
        st.page = 2;
        st.total_pages = 5;
        assert!(st.page_change_allowed(3, false));
        assert!(!st.page_change_allowed(2, false));
        assert!(!st.page_change_allowed(3, true));
        assert!(!st.page_change_allowed(0, false));
        assert!(!st.page_change_allowed(6, false));
    }

    #[test]
    fn page_size_change_guard_rejects_same_size_and_pending_fetch() {
        let mut st = InventoryListState::default();
        st.page_size = 25;
        assert!(st.page_size_change_allowed(50, false));
        assert!(!st.page_size_change_allowed(25, false));
        // a change while a fetch is in flight must not fire a second request
        assert!(!st.page_size_change_allowed(50, true));
        assert!(!st.page_size_change_allowed(0, false));
    }

    #[test]
    fn expansion_sets_are_independent_and_resettable() {
        let mut st = InventoryListState::default();
        st.toggle_product("p1");
        st.toggle_category("Coffee");
        assert!(st.expanded_products.contains("p1"));
        assert!(st.expanded_categories.contains("Coffee"));

        st.toggle_product("p1");
        assert!(!st.expanded_products.contains("p1"));
        assert!(st.expanded_categories.contains("Coffee"));

        st.toggle_product("p2");
        st.reset_expansion();
        assert!(st.expanded_products.is_empty());
        assert!(st.expanded_categories.is_empty());
    }

    #[test]
    fn stale_generations_are_rejected() {
        let mut st = InventoryListState::default();
        let g1 = st.next_generation();
        let g2 = st.next_generation();
        assert!(!st.is_current(g1));
        assert!(st.is_current(g2));
    }

    #[test]
    fn page_metadata_rounds_up() {
        let mut st = InventoryListState::default();
        st.page_size = 10;
        st.set_page_metadata(23);
        assert_eq!(st.total_pages, 3);
        assert_eq!(st.total_count, 23);
    }
}
