pub mod aggregate;

pub use aggregate::{CurrencyForm, CurrencyResource, CurrencyRow};
