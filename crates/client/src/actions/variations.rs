//! Splitting the improve-japanese reply into its numbered variations.
//!
//! The reply is expected to contain sections headed
//! `【バリエーション1：…】`, `【バリエーション2：…】` and `【バリエーション3：…】`.
//! Sections that are missing or empty are skipped.

/// One improved rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    pub title: String,
    pub text: String,
}

const HEADER: &str = "【バリエーション";

/// Terminators for each section body, in addition to end of input.
fn terminators(index: usize) -> &'static [&'static str] {
    match index {
        1 => &["【バリエーション2", "【バリエーション３"],
        2 => &["【バリエーション3", "【バリエーション３"],
        _ => &["【"],
    }
}

/// Extract up to three titled variations, in order.
pub fn extract_variations(reply: &str) -> Vec<Variation> {
    (1..=3)
        .filter_map(|index| {
            section_body(reply, index).map(|text| Variation {
                title: format!("バリエーション{}", index),
                text,
            })
        })
        .collect()
}

fn section_body(reply: &str, index: usize) -> Option<String> {
    let marker = format!("{}{}", HEADER, index);
    let mut search_from = 0;

    while let Some(found) = reply[search_from..].find(&marker) {
        let after_marker = search_from + found + marker.len();
        search_from = after_marker;

        let rest = &reply[after_marker..];
        let Some(rest) = rest.strip_prefix(['：', ':']) else {
            continue;
        };

        // The header's closing bracket must sit on the same line.
        let line_end = rest.find('\n').unwrap_or(rest.len());
        let Some(close) = rest[..line_end].find('】') else {
            continue;
        };

        let body = rest[close + '】'.len_utf8()..].trim_start();
        let end = terminators(index)
            .iter()
            .filter_map(|t| body.find(t))
            .min()
            .unwrap_or(body.len());

        let text = body[..end].trim();
        if text.is_empty() {
            return None;
        }
        return Some(text.to_string());
    }

    None
}
