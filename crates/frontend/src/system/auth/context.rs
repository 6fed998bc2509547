use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    // The token is issued elsewhere; the console only picks it up from localStorage.
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: storage::get_access_token(),
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: store a pasted token and switch to the signed-in state
pub fn sign_in(token: &str, set_auth_state: WriteSignal<AuthState>) -> Result<(), String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("Token must not be empty".to_string());
    }
    storage::save_access_token(token);
    set_auth_state.set(AuthState {
        access_token: Some(token.to_string()),
    });
    Ok(())
}

/// Helper: drop the token (logout or 401)
pub fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_access_token();
    set_auth_state.set(AuthState::default());
}
