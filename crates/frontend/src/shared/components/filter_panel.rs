use crate::shared::icons::icon;
use contracts::domain::common::{FilterField, FilterKind, Status};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

/// Quiet period before a typed filter value is applied
pub const FILTER_DEBOUNCE_MS: u32 = 300;

/// FilterPanel component - collapsible filter panel with pagination
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of active filters (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Pagination controls (slot)
    #[prop(into)]
    pagination_controls: ViewFn,

    /// Filter content (form fields)
    #[prop(into)]
    filter_content: ViewFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=toggle_expanded
                >
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{count}</span>
                        })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls.run()}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {filter_content.run()}
                </div>
            </div>
        </div>
    }
}

/// Inputs for a resource's filter fields.
///
/// Text inputs report their value after `FILTER_DEBOUNCE_MS` of quiet; a
/// newer keystroke in the same field cancels the pending report. The status
/// select reports immediately. "Reset" clears every input, cancels pending
/// reports and calls `on_reset`.
#[component]
pub fn FilterFields(
    fields: &'static [FilterField],
    /// `(key, value)`; `None` means the filter was cleared
    on_change: Callback<(String, Option<String>)>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let values: HashMap<&'static str, RwSignal<String>> = fields
        .iter()
        .map(|f| (f.key, RwSignal::new(String::new())))
        .collect();
    let values = StoredValue::new(values);
    let generations = StoredValue::new(HashMap::<&'static str, u64>::new());

    let schedule = move |key: &'static str, value: String| {
        let mut ticket = 0;
        generations.update_value(|g| {
            let entry = g.entry(key).or_insert(0);
            *entry += 1;
            ticket = *entry;
        });
        spawn_local(async move {
            TimeoutFuture::new(FILTER_DEBOUNCE_MS).await;
            let latest = generations
                .try_with_value(|g| g.get(key).copied())
                .flatten();
            if latest == Some(ticket) {
                on_change.run((key.to_string(), Some(value)));
            }
        });
    };

    let reset = move |_| {
        generations.update_value(|g| g.values_mut().for_each(|n| *n += 1));
        values.with_value(|v| v.values().for_each(|s| s.set(String::new())));
        on_reset.run(());
    };

    let value_of = move |key: &'static str| {
        values
            .with_value(|v| v.get(key).copied())
            .unwrap_or_else(|| RwSignal::new(String::new()))
    };

    view! {
        <div class="filter-fields">
            {fields.iter().map(|field| {
                let key = field.key;
                let value = value_of(key);
                let input = match field.kind {
                    FilterKind::Text => view! {
                        <input
                            type="text"
                            class="form__input"
                            placeholder=field.label
                            prop:value=move || value.get()
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                value.set(text.clone());
                                schedule(key, text);
                            }
                        />
                    }.into_any(),
                    FilterKind::Status => view! {
                        <select
                            class="form__select"
                            prop:value=move || value.get()
                            on:change=move |ev| {
                                let selected = event_target_value(&ev);
                                value.set(selected.clone());
                                let selected = (!selected.is_empty()).then_some(selected);
                                on_change.run((key.to_string(), selected));
                            }
                        >
                            <option value="">"Any"</option>
                            {Status::ALL.iter().map(|status| view! {
                                <option value=status.as_str()>{status.label()}</option>
                            }).collect_view()}
                        </select>
                    }.into_any(),
                };

                view! {
                    <div class="form__group">
                        <label class="form__label">{field.label}</label>
                        {input}
                    </div>
                }
            }).collect_view()}

            <button class="button button--secondary filter-fields__reset" on:click=reset>
                "Reset"
            </button>
        </div>
    }
}
