pub mod aggregate;

pub use aggregate::{PaymentMethodForm, PaymentMethodResource, PaymentMethodRow};
