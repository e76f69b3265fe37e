//! Property-based tests for search-query post-processing.

use proptest::prelude::*;
use selchord_client::actions::search::{build_search_url, encode_query_component};
use selchord_client::actions::text::{clean_keywords, truncate_at_word_boundary};
use selchord_config::constants::MAX_SEARCH_URL_LEN;

proptest! {
    #[test]
    fn prop_truncation_bounded(s in "\\PC{0,400}", max in 10usize..200, min_space in 0usize..100) {
        let out = truncate_at_word_boundary(&s, max, min_space);
        if s.chars().count() <= max {
            prop_assert_eq!(out, s);
        } else {
            prop_assert!(out.ends_with("..."));
            prop_assert!(out.chars().count() <= max + 3);
            let body = out.trim_end_matches("...");
            prop_assert!(s.starts_with(body));
        }
    }

    #[test]
    fn prop_clean_keywords_respects_cap(s in "[a-zA-Z ,'\"]{0,200}", cap in 1usize..6) {
        let out = clean_keywords(&s, cap);
        prop_assert!(out.split(' ').filter(|w| !w.is_empty()).count() <= cap);
        prop_assert!(!out.contains(['"', '\'', ',']));
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn prop_encoded_query_is_url_safe(s in "\\PC{0,100}") {
        let encoded = encode_query_component(&s);
        prop_assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || "-_.!~*'()%".contains(c)));
    }

    #[test]
    fn prop_search_url_never_exceeds_limit(s in "\\PC{0,600}") {
        if let Ok(url) = build_search_url("https://x.example.com/?q=", &s) {
            prop_assert!(url.len() <= MAX_SEARCH_URL_LEN);
        }
    }
}
