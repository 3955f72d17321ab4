//! Markup reduction for item titles and content.
//!
//! Item text arrives as light HTML (`<p>` paragraphs plus entities). Only
//! paragraphs and entities are handled; any other tag passes through as-is.

/// Reduce an HTML fragment to plain text.
///
/// Entities are decoded first with the HTML5 character-reference rules
/// (legacy names without `;`, C1 and NUL numeric remapping), so an escaped
/// `&lt;p&gt;` is treated as a paragraph tag too.
pub fn to_plain_text(html: Option<&str>) -> String {
    let Some(html) = html.filter(|html| !html.is_empty()) else {
        return String::new();
    };

    htmlize::unescape(html)
        .replace("<p>", "")
        .replace("</p>", "\n")
        .trim()
        .to_string()
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_absent_input_yield_empty_string() {
        assert_eq!(to_plain_text(None), "");
        assert_eq!(to_plain_text(Some("")), "");
    }

    #[test]
    fn paragraphs_become_lines() {
        assert_eq!(
            to_plain_text(Some("<p>Hello</p><p>World</p>")),
            "Hello\nWorld"
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            to_plain_text(Some("<p>Fish &amp; chips &lt;3 &quot;now&quot; &#8211; ok</p>")),
            "Fish & chips <3 \"now\" \u{2013} ok"
        );
    }

    #[test]
    fn character_references_follow_html5_rules() {
        let cases = [
            ("Fish &amp chips", "Fish & chips"),
            ("&copy 2024", "\u{a9} 2024"),
            ("&#128;", "\u{20ac}"),
            ("&#x9F;", "\u{178}"),
            ("&#0;", "\u{fffd}"),
            ("&#xD800;", "\u{fffd}"),
            ("&nbsp;x", "\u{a0}x"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_plain_text(Some(input)), expected, "input: {input}");
        }
    }

    #[test]
    fn escaped_paragraph_tags_are_stripped_after_decoding() {
        assert_eq!(to_plain_text(Some("&lt;p&gt;one&lt;/p&gt;two")), "one\ntwo");
    }

    #[test]
    fn other_tags_are_left_alone() {
        assert_eq!(
            to_plain_text(Some("<p><strong>bold</strong> text</p>")),
            "<strong>bold</strong> text"
        );
        assert_eq!(to_plain_text(Some("<p class=\"x\">kept</p>")), "<p class=\"x\">kept");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(to_plain_text(Some("  <p> padded </p>\n\n")), "padded");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 2000), "short");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("ab", 0), "");
    }
}
