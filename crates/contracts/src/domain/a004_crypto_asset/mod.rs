pub mod aggregate;

pub use aggregate::{CryptoAssetForm, CryptoAssetResource, CryptoAssetRow};
