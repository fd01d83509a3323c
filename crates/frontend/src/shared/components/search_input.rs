use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Trailing debounce window for search input.
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Search box with trailing debounce and a clear button.
///
/// `on_input` fires on every keystroke with the raw value; `on_change` fires
/// once per quiet period with the debounced value. Any keystroke inside the
/// window restarts the timer, and the pending timer is dropped (cancelled)
/// with the component.
#[component]
pub fn SearchInput(
    /// Callback for every raw keystroke
    #[prop(into)]
    on_input: Callback<String>,
    /// Callback for the debounced value
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(String::new());

    // Pending trailing-debounce timer; replaced (and thereby cancelled) on
    // every keystroke.
    let debounce = StoredValue::new_local(None::<Timeout>);
    on_cleanup(move || {
        debounce.update_value(|t| {
            if let Some(t) = t.take() {
                t.cancel();
            }
        });
    });

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        on_input.run(new_value.clone());

        debounce.update_value(|t| {
            if let Some(prev) = t.take() {
                prev.cancel();
            }
            *t = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                on_change.run(new_value.clone());
            }));
        });
    };

    let clear = move |_| {
        set_input_value.set(String::new());
        debounce.update_value(|t| {
            if let Some(prev) = t.take() {
                prev.cancel();
            }
        });
        on_input.run(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                class="search-input"
                placeholder={placeholder}
                style="width: 280px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px;"
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                        on:click=clear
                        title="Clear"
                    >
                        {icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
