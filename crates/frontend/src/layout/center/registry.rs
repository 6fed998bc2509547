//! Section registry: the single place that maps a section key to its page.

use crate::domain::a001_user::ui::list::UserList;
use crate::domain::a002_role::ui::list::RoleList;
use crate::domain::a003_currency::ui::list::CurrencyList;
use crate::domain::a004_crypto_asset::ui::list::CryptoAssetList;
use crate::domain::a005_payment_method::ui::list::PaymentMethodList;
use contracts::domain::a001_user::UserResource;
use contracts::domain::a002_role::RoleResource;
use contracts::domain::a003_currency::CurrencyResource;
use contracts::domain::a004_crypto_asset::CryptoAssetResource;
use contracts::domain::a005_payment_method::PaymentMethodResource;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_SYSTEM};
use contracts::domain::common::Resource;
use leptos::prelude::*;

pub struct MenuGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// (section key, label, icon)
    pub items: Vec<(String, &'static str, &'static str)>,
}

fn item<R: Resource>(icon: &'static str) -> (String, &'static str, &'static str) {
    (R::full_name(), R::list_name(), icon)
}

pub fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "access",
            label: "Access",
            icon: "users",
            items: vec![item::<UserResource>("user"), item::<RoleResource>("shield")],
        },
        MenuGroup {
            id: "references",
            label: "Reference data",
            icon: "database",
            items: vec![
                item::<CurrencyResource>("dollar-sign"),
                item::<CryptoAssetResource>("coins"),
                item::<PaymentMethodResource>("credit-card"),
            ],
        },
    ]
}

/// Renders the page for a section key; unknown keys get a placeholder.
pub fn render_section(key: &str) -> AnyView {
    match key {
        k if k == UserResource::full_name() => view! { <UserList /> }.into_any(),
        k if k == RoleResource::full_name() => view! { <RoleList /> }.into_any(),
        k if k == CurrencyResource::full_name() => view! { <CurrencyList /> }.into_any(),
        k if k == CryptoAssetResource::full_name() => view! { <CryptoAssetList /> }.into_any(),
        k if k == PaymentMethodResource::full_name() => {
            view! { <PaymentMethodList /> }.into_any()
        }
        other => {
            log::warn!("unknown section: {}", other);
            let message = format!("Unknown section: {}", other);
            view! {
                <PageFrame page_id=page_id("unknown", PAGE_CAT_SYSTEM) category=PAGE_CAT_SYSTEM>
                    <div class="placeholder">{message}</div>
                </PageFrame>
            }
            .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_keys_are_unique() {
        let mut keys: Vec<String> = menu_groups()
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(key, _, _)| key))
            .collect();
        let count = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), count);
        assert!(keys.contains(&crate::layout::global_context::DEFAULT_SECTION.to_string()));
    }
}
