pub mod envelope;
pub mod paging;
pub mod query;
pub mod validation;
