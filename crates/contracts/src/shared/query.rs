use std::collections::BTreeMap;

use super::paging::PageQuery;

/// Search filters of a list page: filter key -> optional value.
///
/// Keys are the wire names of the filter fields (`username`, `currencyCode`,
/// `status`, ...). A `None` or blank value means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams(BTreeMap<String, Option<String>>);

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` and returns `true` when the stored value actually changed.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) -> bool {
        let key = key.into();
        if self.0.get(&key) == Some(&value) {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.omit_empty().is_empty()
    }

    /// Drops `None`, empty and whitespace-only values; keeps the rest trimmed.
    pub fn omit_empty(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_deref()?.trim();
                (!value.is_empty()).then(|| (key.clone(), value.to_string()))
            })
            .collect()
    }

    /// Full parameter set of a page request: paging plus non-empty filters.
    /// Paging keys always win over a filter of the same name.
    pub fn to_page_params(&self, page: PageQuery) -> BTreeMap<String, String> {
        let mut params = self.omit_empty();
        params.extend(page.to_params());
        params
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

/// `?a=1&b=2` from a parameter map, or an empty string when there is nothing to send.
pub fn build_query(params: &BTreeMap<String, String>) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("?{}", pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omit_empty_strips_blank_and_missing_values() {
        let params: SearchParams = [("a", Some("")), ("b", Some("x")), ("c", None)]
            .into_iter()
            .collect();

        let expected = BTreeMap::from([("b".to_string(), "x".to_string())]);
        assert_eq!(params.omit_empty(), expected);
    }

    #[test]
    fn omit_empty_trims_and_drops_whitespace() {
        let params: SearchParams = [("name", Some("  usd ")), ("code", Some("   "))]
            .into_iter()
            .collect();

        let cleaned = params.omit_empty();
        assert_eq!(cleaned.get("name").map(String::as_str), Some("usd"));
        assert!(!cleaned.contains_key("code"));
    }

    #[test]
    fn set_reports_changes() {
        let mut params = SearchParams::new();
        assert!(params.set("status", Some("ENABLED".into())));
        assert!(!params.set("status", Some("ENABLED".into())));
        assert!(params.set("status", None));
        assert_eq!(params.get("status"), None);
        assert!(params.is_empty());
    }

    #[test]
    fn page_params_carry_paging_and_filters() {
        let mut params = SearchParams::new();
        params.set("username", Some("alice".into()));
        params.set("email", Some("".into()));
        params.set("currentPage", Some("99".into()));

        let all = params.to_page_params(PageQuery::new(2, 20));
        assert_eq!(all.get("username").map(String::as_str), Some("alice"));
        assert_eq!(all.get("currentPage").map(String::as_str), Some("2"));
        assert_eq!(all.get("pageSize").map(String::as_str), Some("20"));
        assert!(!all.contains_key("email"));
    }

    #[test]
    fn query_string_is_encoded() {
        let params = BTreeMap::from([
            ("name".to_string(), "a b&c".to_string()),
            ("pageSize".to_string(), "10".to_string()),
        ]);
        assert_eq!(build_query(&params), "?name=a%20b%26c&pageSize=10");
        assert_eq!(build_query(&BTreeMap::new()), "");
    }
}
