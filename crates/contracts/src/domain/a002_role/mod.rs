pub mod aggregate;

pub use aggregate::{RoleForm, RoleResource, RoleRow};
