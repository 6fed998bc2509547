//! Generic `/manage/{resource}` surface: one service trait, one set of
//! handlers, one router per resource.

pub mod extract;
pub mod filters;
pub mod handlers;
pub mod routes;
pub mod service;

pub use service::ManageService;
