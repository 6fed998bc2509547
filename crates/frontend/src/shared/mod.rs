pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod list_controller;
pub mod list_page;
pub mod manage_api;
pub mod page_frame;
pub mod page_standard;
pub mod selection;
