//! Post-processing of model output before it becomes a search query.
//!
//! All lengths are counted in characters, never bytes, so Japanese and
//! Chinese text is cut on character boundaries.

/// Remove one leading and one trailing quote character (`"` or `'`), then trim.
pub fn strip_surrounding_quotes(s: &str) -> String {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    let s = s.strip_suffix(['"', '\'']).unwrap_or(s);
    s.trim().to_string()
}

/// Normalize a keyword list: drop quotes, treat commas as separators,
/// collapse whitespace and keep at most `cap` words.
pub fn clean_keywords(s: &str, cap: usize) -> String {
    s.replace(['"', '\''], "")
        .replace(',', " ")
        .split_whitespace()
        .take(cap)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shorten `s` to `max_chars`, preferring to cut at the last space when that
/// space sits beyond `min_space_index`, and append `...`.
///
/// Strings already within `max_chars` are returned unchanged.
pub fn truncate_at_word_boundary(s: &str, max_chars: usize, min_space_index: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let head: Vec<char> = s.chars().take(max_chars).collect();
    let cut = head
        .iter()
        .rposition(|c| *c == ' ')
        .filter(|&idx| idx > min_space_index)
        .unwrap_or(head.len());

    let mut out: String = head[..cut].iter().collect();
    out.push_str("...");
    out
}
