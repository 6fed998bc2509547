use leptos::prelude::*;

use super::context::use_auth;
use crate::system::pages::token::TokenPage;

/// Renders children only while an access token is present,
/// otherwise the token page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <TokenPage /> }
        >
            {children()}
        </Show>
    }
}
