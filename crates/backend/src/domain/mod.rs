pub mod a001_user;
pub mod a002_role;
pub mod a003_currency;
pub mod a004_crypto_asset;
pub mod a005_payment_method;
