use crate::domain::inventory::ui::list::InventoryPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <InventoryPage />
    }
}
