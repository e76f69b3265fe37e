//! Search URL construction.
//!
//! Invariants:
//! - The query is encoded with `encodeURIComponent` semantics and appended to
//!   the configured prefix verbatim.
//! - A URL longer than [`MAX_SEARCH_URL_LEN`] is rejected, never truncated.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use selchord_config::constants::MAX_SEARCH_URL_LEN;

use crate::actions::ActionError;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
pub const QUERY_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component.
pub fn encode_query_component(query: &str) -> String {
    utf8_percent_encode(query, QUERY_COMPONENT_ENCODE_SET).to_string()
}

/// `prefix + encode(query)`, rejected when longer than [`MAX_SEARCH_URL_LEN`].
pub fn build_search_url(prefix: &str, query: &str) -> Result<String, ActionError> {
    let url = format!("{}{}", prefix, encode_query_component(query));
    if url.len() > MAX_SEARCH_URL_LEN {
        return Err(ActionError::QueryTooLong { len: url.len() });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_uri_component() {
        assert_eq!(encode_query_component("APM traces"), "APM%20traces");
        assert_eq!(encode_query_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_query_component("it's (ok)!*~"), "it's%20(ok)!*~");
        assert_eq!(encode_query_component("ログ"), "%E3%83%AD%E3%82%B0");
    }

    #[test]
    fn test_build_search_url_appends_to_prefix() {
        let url = build_search_url("https://wiki.example.com/search?text=", "How to APM?").unwrap();
        assert_eq!(url, "https://wiki.example.com/search?text=How%20to%20APM%3F");
    }

    #[test]
    fn test_build_search_url_rejects_long_query() {
        let query = "あ".repeat(300);
        let err = build_search_url("https://x/?q=", &query).unwrap_err();
        assert!(matches!(err, ActionError::QueryTooLong { len } if len > MAX_SEARCH_URL_LEN));
    }

    #[test]
    fn test_url_at_limit_is_accepted() {
        let prefix = "https://x/?q=";
        let query = "a".repeat(MAX_SEARCH_URL_LEN - prefix.len());
        assert_eq!(build_search_url(prefix, &query).unwrap().len(), MAX_SEARCH_URL_LEN);
    }
}
