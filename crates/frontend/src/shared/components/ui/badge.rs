//! Small inline labels: the record counter in the list header and the
//! status column of every table.
//!
//! Colors come from the `badge--*` modifiers in the stylesheet.

use contracts::domain::common::Status;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    view! {
        <span class=move || format!("badge {}", variant_class())>
            {children()}
        </span>
    }
}

/// Enabled/disabled badge of a record.
///
/// The row toggle sends `change-status`; the badge itself only
/// shows what the last page fetch returned.
#[component]
pub fn StatusBadge(
    /// Current status of the row
    #[prop(into)]
    status: Signal<Status>,
) -> impl IntoView {
    let status_class = move || match status.get() {
        Status::Enabled => "badge badge--status badge--status-enabled",
        Status::Disabled => "badge badge--status badge--status-disabled",
    };

    view! {
        <span class=status_class>
            {move || status.get().label()}
        </span>
    }
}
