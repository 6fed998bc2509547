use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Create/update dialog: overlay, title, form body, Cancel/Save.
///
/// Only mounted while open. The overlay closes the dialog only when both
/// press and release happen on the overlay itself, so selecting text inside
/// the form and releasing outside does not close it.
#[component]
pub fn EntityModal(
    #[prop(into)]
    title: Signal<String>,
    /// Save in flight: the Save button is disabled
    #[prop(into)]
    saving: Signal<bool>,
    on_save: Callback<()>,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Removing the overlay inside its own click dispatch drops the handler.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class="modal" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal__header">
                    <h3 class="modal__title">{move || title.get()}</h3>
                    <button class="modal__close" title="Close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>

                <form
                    class="modal__body"
                    on:submit=move |ev: ev::SubmitEvent| {
                        ev.prevent_default();
                        on_save.run(());
                    }
                >
                    {children()}
                    // Enter in any input submits
                    <button type="submit" hidden=true></button>
                </form>

                <div class="modal__footer">
                    <Flex gap=FlexGap::Small justify=FlexJustify::End>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_close.run(())
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_save.run(())
                            disabled=Signal::derive(move || saving.get())
                        >
                            {icon("save")}
                            {move || if saving.get() { " Saving..." } else { " Save" }}
                        </Button>
                    </Flex>
                </div>
            </div>
        </div>
    }
}
