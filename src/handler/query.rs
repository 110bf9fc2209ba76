//! Query string decoding
//!
//! Mirrors how form frameworks expose `?key=value` pairs: `+` and `%XX` are
//! decoded and the first occurrence of a key wins.

use std::borrow::Cow;

#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like `get`, but an empty value counts as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

/// Escape text that is echoed back inside an HTML body
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    html_escape::encode_text(raw)
}
