use leptos::prelude::*;

use crate::system::auth::context::{sign_in, use_auth};
use crate::system::auth::storage::ACCESS_TOKEN_KEY;

/// Shown while no access token is stored. Tokens are issued outside the
/// console; the operator pastes one here and it is kept in localStorage.
#[component]
pub fn TokenPage() -> impl IntoView {
    let (token, set_token) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match sign_in(&token.get(), set_auth_state) {
            Ok(()) => set_error_message.set(None),
            Err(e) => set_error_message.set(Some(e)),
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Manage Console"</h1>
                <h2>"Access token"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="token">"Bearer token"</label>
                        <input
                            type="password"
                            id="token"
                            autocomplete="off"
                            prop:value=move || token.get()
                            on:input=move |ev| set_token.set(event_target_value(&ev))
                        />
                    </div>

                    <button type="submit" class="btn-primary">
                        "Continue"
                    </button>
                </form>

                <div class="login-info">
                    <p>"The token is stored in localStorage under " <code>{ACCESS_TOKEN_KEY}</code> "."</p>
                </div>
            </div>
        </div>
    }
}
