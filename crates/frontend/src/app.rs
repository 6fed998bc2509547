use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::toast_service::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

/// Root component: provides the global contexts and mounts the shell
#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // Notifications raised by the HTTP client and the list pages
    provide_context(ToastService::new());

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppShell />
            </AuthProvider>
            <ToastHost />
        </ConfigProvider>
    }
}
