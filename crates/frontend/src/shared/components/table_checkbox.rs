use leptos::prelude::*;
use thaw::*;

/// Row checkbox cell.
///
/// Clicking the checkbox does not trigger a row click (stop_propagation).
///
/// # BEM classes
/// - `.table__cell--checkbox` - cell wrapper
/// - `.table__checkbox` - input element
#[component]
pub fn TableCheckbox(
    checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(optional)]
    disabled: bool,
) -> impl IntoView {
    view! {
        <TableCell class="table__cell--checkbox" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableCell>
    }
}

/// Select-all checkbox for the table header.
///
/// Checked when every row of the page is selected, indeterminate when only
/// some are. Changing it selects or clears the whole page.
#[component]
pub fn TableHeaderCheckbox(
    /// Every row of the page is checked
    all: Signal<bool>,
    /// Some but not all rows are checked
    partial: Signal<bool>,
    /// `true` = select the page, `false` = clear it
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // `indeterminate` has no HTML attribute, only a DOM property.
    Effect::new(move |_| {
        let partial = partial.get();
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(partial);
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || all.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
