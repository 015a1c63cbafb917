//! Normalized query parameters for a forwarded search.

use std::collections::BTreeMap;

use crate::Error;

/// Name of the page-number query parameter understood by the backend.
pub const PAGE_PARAM: &str = "pageno";

/// Query parameters for one logical search, minus the page number.
///
/// The page number is either pinned (supplied by the caller, or forced by the
/// aggregator) or left to the failover executor, which assigns one per attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    params: BTreeMap<String, String>,
    pinned: Option<PinnedPage>,
}

/// A pinned page keeps the caller's spelling so it is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PinnedPage {
    number: u32,
    raw: String,
}

impl SearchParams {
    /// Build from raw query pairs. Later duplicates win.
    ///
    /// A `pageno` pair pins the page and is removed from the forwarded set.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `pageno` is not a positive integer.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: BTreeMap<String, String> =
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

        let pinned = match params.remove(PAGE_PARAM) {
            Some(raw) => Some(PinnedPage { number: parse_page(&raw)?, raw }),
            None => None,
        };

        Ok(Self { params, pinned })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Insert `value` under `key` unless the key is already present.
    pub fn set_default(&mut self, key: &str, value: &str) {
        self.params.entry(key.to_string()).or_insert_with(|| value.to_string());
    }

    pub fn pinned_page(&self) -> Option<u32> {
        self.pinned.as_ref().map(|p| p.number)
    }

    /// Copy of these parameters with the page forced to `page`.
    pub fn with_page(&self, page: u32) -> Self {
        Self { params: self.params.clone(), pinned: Some(PinnedPage { number: page, raw: page.to_string() }) }
    }

    /// Copy of these parameters with no page, so failover assigns it.
    pub fn without_page(&self) -> Self {
        Self { params: self.params.clone(), pinned: None }
    }

    /// The page to send on failover attempt `attempt`.
    pub fn page_for_attempt(&self, attempt: u32) -> u32 {
        self.pinned_page().unwrap_or(attempt)
    }

    /// Query pairs to forward, with `pageno` set to `page`.
    ///
    /// A pinned page is sent as the caller wrote it.
    pub fn query_pairs(&self, page: u32) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self.params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let page = match &self.pinned {
            Some(pinned) if pinned.number == page => pinned.raw.clone(),
            _ => page.to_string(),
        };
        pairs.push((PAGE_PARAM.to_string(), page));
        pairs
    }

    pub fn query(&self) -> Option<&str> {
        self.get("q")
    }
}

fn parse_page(raw: &str) -> Result<u32, Error> {
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(Error::InvalidInput(format!("invalid {PAGE_PARAM}: {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pageno_is_pinned_and_removed() {
        let params = SearchParams::from_pairs([("q", "rust"), ("pageno", "3")]).unwrap();
        assert_eq!(params.pinned_page(), Some(3));
        assert_eq!(params.get("pageno"), None);
        assert_eq!(params.page_for_attempt(1), 3);
        assert_eq!(params.page_for_attempt(2), 3);
    }

    #[test]
    fn test_unpinned_page_follows_attempt() {
        let params = SearchParams::from_pairs([("q", "rust")]).unwrap();
        assert_eq!(params.pinned_page(), None);
        assert_eq!(params.page_for_attempt(2), 2);
    }

    #[test]
    fn test_invalid_pageno() {
        assert!(matches!(SearchParams::from_pairs([("pageno", "abc")]), Err(Error::InvalidInput(_))));
        assert!(matches!(SearchParams::from_pairs([("pageno", "0")]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_later_duplicates_win() {
        let params = SearchParams::from_pairs([("q", "first"), ("q", "second")]).unwrap();
        assert_eq!(params.query(), Some("second"));
    }

    #[test]
    fn test_set_default_keeps_caller_value() {
        let mut params = SearchParams::from_pairs([("language", "de")]).unwrap();
        params.set_default("language", "all");
        assert_eq!(params.get("language"), Some("de"));

        let mut params = SearchParams::from_pairs([("q", "x")]).unwrap();
        params.set_default("language", "all");
        assert_eq!(params.get("language"), Some("all"));
    }

    #[test]
    fn test_query_pairs_append_page() {
        let params = SearchParams::from_pairs([("q", "rust"), ("format", "json")]).unwrap();
        let pairs = params.query_pairs(2);
        assert_eq!(pairs.last(), Some(&("pageno".to_string(), "2".to_string())));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_pinned_page_forwarded_as_written() {
        let params = SearchParams::from_pairs([("q", "rust"), ("pageno", "03")]).unwrap();
        assert_eq!(params.pinned_page(), Some(3));
        let pairs = params.query_pairs(params.page_for_attempt(1));
        assert_eq!(pairs.last(), Some(&("pageno".to_string(), "03".to_string())));
    }

    #[test]
    fn test_with_page_overrides_caller_page() {
        let params = SearchParams::from_pairs([("q", "rust"), ("pageno", "7")]).unwrap();
        let forced = params.without_page().with_page(2);
        assert_eq!(forced.page_for_attempt(1), 2);
    }
}
