use contracts::domain::a001_user::aggregate::UserForm;
use contracts::domain::a002_role::aggregate::RoleForm;
use contracts::domain::a003_currency::aggregate::CurrencyForm;
use contracts::domain::a004_crypto_asset::aggregate::CryptoAssetForm;
use contracts::domain::a005_payment_method::aggregate::PaymentMethodForm;
use contracts::domain::common::Status;
use contracts::shared::paging::PageQuery;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use crate::domain::a001_user::service::UserService;
use crate::domain::a002_role::service::RoleService;
use crate::domain::a003_currency::service::CurrencyService;
use crate::domain::a004_crypto_asset::service::CryptoAssetService;
use crate::domain::a005_payment_method::service::PaymentMethodService;
use crate::manage::ManageService;
use crate::shared::error::ApiError;

const ROLES: &[(&str, &str, &str)] = &[
    ("Administrator", "ADMIN", "Full access to the console"),
    ("Operator", "OPERATOR", "Manages customers and payments"),
    ("Auditor", "AUDITOR", "Read-only access"),
];

const CURRENCIES: &[(&str, &str, &str, u8)] = &[
    ("USD", "US dollar", "$", 2),
    ("EUR", "Euro", "€", 2),
    ("GBP", "Pound sterling", "£", 2),
    ("JPY", "Japanese yen", "¥", 0),
];

const CRYPTO_ASSETS: &[(&str, &str, &str, Option<&str>, u8)] = &[
    ("BTC", "Bitcoin", "Bitcoin", None, 8),
    ("ETH", "Ether", "Ethereum", None, 18),
    (
        "USDT",
        "Tether",
        "Ethereum",
        Some("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
        6,
    ),
    ("USDT", "Tether", "Tron", Some("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"), 6),
];

const PAYMENT_METHODS: &[(&str, &str, &str, f64, i32)] = &[
    ("Bank card", "BANK_CARD", "USD", 0.025, 10),
    ("SEPA transfer", "SEPA", "EUR", 0.005, 20),
    ("Faster Payments", "FPS", "GBP", 0.0, 30),
];

const DEMO_USERS: usize = 25;

async fn is_empty<S: ManageService>(db: &DatabaseConnection) -> Result<bool, ApiError> {
    let page = S::page(db, &BTreeMap::new(), PageQuery::new(1, 1)).await?;
    Ok(page.total_num == 0)
}

/// Fills empty tables with demo records so every list has something to page through.
/// Tables that already hold data are left alone.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), ApiError> {
    if is_empty::<RoleService>(db).await? {
        for (name, code, description) in ROLES {
            RoleService::create(
                db,
                RoleForm {
                    name: name.to_string(),
                    code: code.to_string(),
                    description: description.to_string(),
                    ..Default::default()
                },
            )
            .await?;
        }
        tracing::info!("Seeded {} roles", ROLES.len());
    }

    if is_empty::<UserService>(db).await? {
        let roles = RoleService::list_all(db).await?;
        for n in 1..=DEMO_USERS {
            let role_id = roles.get(n % roles.len().max(1)).map(|r| r.id);
            UserService::create(
                db,
                UserForm {
                    username: format!("operator{:02}", n),
                    nickname: format!("Operator {}", n),
                    email: format!("operator{:02}@example.com", n),
                    role_id,
                    status: if n % 7 == 0 {
                        Status::Disabled
                    } else {
                        Status::Enabled
                    },
                    ..Default::default()
                },
            )
            .await?;
        }
        tracing::info!("Seeded {} users", DEMO_USERS);
    }

    if is_empty::<CurrencyService>(db).await? {
        for (code, name, symbol, precision) in CURRENCIES {
            CurrencyService::create(
                db,
                CurrencyForm {
                    code: code.to_string(),
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    precision: Some(*precision),
                    ..Default::default()
                },
            )
            .await?;
        }
        tracing::info!("Seeded {} currencies", CURRENCIES.len());
    }

    if is_empty::<CryptoAssetService>(db).await? {
        for (symbol, name, chain, contract, decimals) in CRYPTO_ASSETS {
            CryptoAssetService::create(
                db,
                CryptoAssetForm {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    chain: chain.to_string(),
                    contract_address: contract.unwrap_or_default().to_string(),
                    decimals: Some(*decimals),
                    ..Default::default()
                },
            )
            .await?;
        }
        tracing::info!("Seeded {} crypto assets", CRYPTO_ASSETS.len());
    }

    if is_empty::<PaymentMethodService>(db).await? {
        for (name, code, currency_code, fee_rate, sort_order) in PAYMENT_METHODS {
            PaymentMethodService::create(
                db,
                PaymentMethodForm {
                    name: name.to_string(),
                    code: code.to_string(),
                    currency_code: currency_code.to_string(),
                    fee_rate: Some(*fee_rate),
                    sort_order: Some(*sort_order),
                    ..Default::default()
                },
            )
            .await?;
        }
        tracing::info!("Seeded {} payment methods", PAYMENT_METHODS.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::in_memory;

    #[tokio::test]
    async fn seeding_twice_adds_nothing() {
        let db = in_memory().await.unwrap();
        seed_demo_data(&db).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        assert_eq!(RoleService::list_all(&db).await.unwrap().len(), ROLES.len());
        assert_eq!(UserService::list_all(&db).await.unwrap().len(), DEMO_USERS);
        assert_eq!(
            CryptoAssetService::list_all(&db).await.unwrap().len(),
            CRYPTO_ASSETS.len()
        );
        assert_eq!(
            PaymentMethodService::list_all(&db).await.unwrap().len(),
            PAYMENT_METHODS.len()
        );
    }
}
