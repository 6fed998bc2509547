pub mod aggregate;

pub use aggregate::{UserForm, UserResource, UserRow};
