//! Page category constants.
//!
//! Every page rendered in the center area declares:
//!   - HTML `id` in the format `{section}--{category}` (e.g. `"a003_currency--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the section key searchable: copy the id from the
//! DOM inspector and it leads to `domain/a003_currency/`.

/// List of records: table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Shell-level page outside the sections (token entry, placeholders).
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_SYSTEM];

/// Validate that a page id matches the `{section}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && ALL_CATEGORIES.contains(&parts[1])
}

/// Page id of a section page, e.g. `page_id("a001_user", PAGE_CAT_LIST)`.
pub fn page_id(section: &str, category: &str) -> String {
    format!("{section}--{category}")
}
