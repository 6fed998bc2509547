use crate::layout::center::registry::render_section;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Content area: renders the list page of the active section
#[component]
pub fn Center() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            {move || render_section(&ctx.active.get())}
        </div>
    }
}
