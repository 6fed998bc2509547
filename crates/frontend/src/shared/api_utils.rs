//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs. The console is served
//! from a different port than the manage API during development (trunk on its
//! own port, the backend on 3000), so every request goes to an absolute URL
//! built from the page's own host.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/manage/currency/page?currentPage=1&pageSize=10");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
