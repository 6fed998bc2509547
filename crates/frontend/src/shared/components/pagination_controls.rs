use crate::shared::icons::icon;
use contracts::shared::paging::{page_window, parse_jump, PAGE_SIZE_OPTIONS, PAGE_WINDOW};
use leptos::prelude::*;

/// PaginationControls component - reusable pagination controls
///
/// Pages are 1-based. Renders first/prev, a window of page buttons centered
/// on the current page, next/last, a jump-to-page input and the page size
/// select. Edge buttons are disabled on the first/last page.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<u64>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u64>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<u64>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<u64>,

    /// Callback when page changes
    on_page_change: Callback<u64>,

    /// Callback when page size changes
    on_page_size_change: Callback<u64>,

    /// Available page size options (optional, defaults to [10, 20, 50, 100])
    #[prop(optional)]
    page_size_options: Option<Vec<u64>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| PAGE_SIZE_OPTIONS.to_vec());
    let jump_value = RwSignal::new(String::new());

    let at_start = move || current_page.get() <= 1;
    let at_end = move || current_page.get() >= total_pages.get();

    let jump = move || {
        if let Some(page) = parse_jump(&jump_value.get_untracked(), total_pages.get_untracked()) {
            on_page_change.run(page);
        }
        jump_value.set(String::new());
    };

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_start
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=at_start
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>

            {move || {
                let current = current_page.get();
                page_window(current, total_pages.get(), PAGE_WINDOW)
                    .into_iter()
                    .map(|page| {
                        view! {
                            <button
                                class="pagination-btn pagination-btn--page"
                                class:pagination-btn--active=page == current
                                on:click=move |_| {
                                    if page != current {
                                        on_page_change.run(page);
                                    }
                                }
                            >
                                {page.to_string()}
                            </button>
                        }
                    })
                    .collect_view()
            }}

            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=at_end
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total);
                    }
                }
                disabled=at_end
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>

            <span class="pagination-info">
                {move || {
                    let total = total_pages.get().max(1);
                    format!("{} / {} ({})", current_page.get().min(total), total, total_count.get())
                }}
            </span>

            <input
                type="text"
                inputmode="numeric"
                class="pagination-jump"
                placeholder="Go to"
                prop:value=move || jump_value.get()
                on:input=move |ev| jump_value.set(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        jump();
                    }
                }
                on:blur=move |_| jump()
            />

            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse::<u64>() {
                        on_page_size_change.run(val);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
