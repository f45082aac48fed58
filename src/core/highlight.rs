use regex::RegexBuilder;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Escape `& < > " '` for safe inclusion in markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape `text`, then wrap every case-insensitive occurrence of `term` in
/// `<mark>`.
///
/// Matching runs against the already-escaped text with the literal term, so a
/// term containing `&`, `<`, `>` or quotes may not match. The result never
/// contains unescaped input.
pub fn highlight(text: &str, term: &str) -> String {
    let escaped = escape_html(text);
    if term.is_empty() {
        return escaped;
    }

    match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re
            .replace_all(&escaped, |caps: &regex::Captures| {
                format!("{}{}{}", MARK_OPEN, &caps[0], MARK_CLOSE)
            })
            .into_owned(),
        Err(e) => {
            tracing::warn!("Highlight pattern rejected, rendering plain text: {}", e);
            escaped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_empty_term_only_escapes() {
        for text in ["Tutoring", "<b>bold</b>", "", "a & b"] {
            assert_eq!(highlight(text, ""), escape_html(text));
        }
    }

    #[test]
    fn test_highlight_preserves_case() {
        assert_eq!(highlight("Tutoring", "tutor"), "<mark>Tutor</mark>ing");
    }

    #[test]
    fn test_highlight_every_occurrence_once() {
        assert_eq!(
            highlight("Tutoringing", "ing"),
            "Tutor<mark>ing</mark><mark>ing</mark>"
        );
        assert_eq!(highlight("aaa", "aa"), "<mark>aa</mark>a");
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        assert_eq!(
            highlight("<script>alert(1)</script> tutor", "tutor"),
            "&lt;script&gt;alert(1)&lt;/script&gt; <mark>tutor</mark>"
        );
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(highlight("Price (GHS) 3.50", "(ghs)"), "Price <mark>(GHS)</mark> 3.50");
        assert_eq!(highlight("3x50", "3.50"), "3x50");
    }

    #[test]
    fn test_escaped_characters_in_term_do_not_match() {
        // 先轉義再比對：'<' 已變成 "&lt;"
        assert_eq!(highlight("a<b", "<"), "a&lt;b");
    }
}
