/// How a filter is edited in the search panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text, debounced
    Text,
    /// `ENABLED` / `DISABLED` / any
    Status,
}

/// A search filter offered by a list page.
/// `key` is the query parameter name understood by the page endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Text,
        }
    }

    pub const fn status() -> Self {
        Self {
            key: "status",
            label: "Status",
            kind: FilterKind::Status,
        }
    }
}
