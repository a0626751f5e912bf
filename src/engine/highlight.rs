use regex::Regex;

/// Wrap every case-insensitive occurrence of `term` in a highlight span,
/// preserving the matched text's own case. An empty term (or one the regex
/// engine cannot digest even escaped) leaves the markup unchanged.
///
/// The match runs over the raw markup, so a term that happens to occur
/// inside a tag gets wrapped too.
pub fn apply_highlight(markup: &str, term: &str) -> String {
    if term.is_empty() {
        return markup.to_string();
    }
    let re = match Regex::new(&format!("(?i){}", regex::escape(term))) {
        Ok(re) => re,
        Err(_) => return markup.to_string(),
    };
    re.replace_all(markup, |caps: &regex::Captures| {
        format!(
            "<span style='background-color: #ffeb3b; color: black;'>{}</span>",
            &caps[0]
        )
    })
    .into_owned()
}

/// Count words in rich-text markup: strip tags, then count
/// whitespace-separated runs.
pub fn word_count(markup: &str) -> usize {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_case_insensitively_preserving_case() {
        let out = apply_highlight("<p>Hello hello HELLO</p>", "hello");
        assert_eq!(
            out,
            "<p><span style='background-color: #ffeb3b; color: black;'>Hello</span> \
             <span style='background-color: #ffeb3b; color: black;'>hello</span> \
             <span style='background-color: #ffeb3b; color: black;'>HELLO</span></p>"
        );
    }

    #[test]
    fn empty_term_leaves_markup_unchanged() {
        assert_eq!(apply_highlight("<p>text</p>", ""), "<p>text</p>");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let out = apply_highlight("<p>c++ and (parens)</p>", "c++");
        assert!(out.contains("color: black;'>c++</span>"));

        let out = apply_highlight("<p>(parens)</p>", "(parens)");
        assert!(out.contains(">(parens)</span>"));
    }

    #[test]
    fn no_match_leaves_markup_unchanged() {
        assert_eq!(apply_highlight("<p>text</p>", "zzz"), "<p>text</p>");
    }

    #[test]
    fn word_count_strips_tags() {
        assert_eq!(word_count("<p>one two three</p>"), 3);
        assert_eq!(word_count("<html><body></body></html>"), 0);
        assert_eq!(word_count(""), 0);
        // Adjacent tags do not split a word.
        assert_eq!(word_count("<b>over</b><i>lap</i>"), 1);
    }
}
