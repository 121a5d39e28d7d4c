//! Reading `<span data-correct="...">` annotations out of a correction

use std::ops::Range;

use crate::sanitize::sanitize;

const OPEN_TAG: &str = "<span";
const CLOSE_TAG: &str = "</span>";
const ATTRIBUTE: &str = "data-correct=";

/// One annotated error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Visible text inside the span
    pub original: String,
    /// Value of the `data-correct` attribute
    pub suggestion: String,
    /// Byte range of the whole span element in the annotated markup
    pub range: Range<usize>,
}

/// All well-formed correction spans, in document order.
///
/// Spans without a `data-correct` attribute or without a closing tag are
/// skipped; models do not always produce valid markup.
pub fn parse_corrections(markup: &str) -> Vec<Correction> {
    let mut corrections = Vec::new();
    let mut cursor = 0;

    while let Some(found) = markup[cursor..].find(OPEN_TAG) {
        let start = cursor + found;
        let Some(parsed) = parse_span_at(markup, start) else {
            cursor = start + OPEN_TAG.len();
            continue;
        };
        cursor = parsed.range.end;
        corrections.push(parsed);
    }

    corrections
}

/// Corrected plain text: each annotated span is replaced by its suggestion
/// and all remaining markup is stripped.
pub fn apply_corrections(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;
    for correction in parse_corrections(markup) {
        out.push_str(&sanitize(&markup[last..correction.range.start]));
        out.push_str(&correction.suggestion);
        last = correction.range.end;
    }
    out.push_str(&sanitize(&markup[last..]));
    out
}

fn parse_span_at(markup: &str, start: usize) -> Option<Correction> {
    let tail = &markup[start..];
    // `<spanner>` is not a span
    let after_name = tail[OPEN_TAG.len()..].chars().next()?;
    if !(after_name.is_whitespace() || after_name == '>' || after_name == '/') {
        return None;
    }

    let tag_end = find_tag_end(tail)?;
    let suggestion = attribute_value(&tail[..tag_end], ATTRIBUTE)?;

    let body_start = tag_end + 1;
    let body_len = tail[body_start..].find(CLOSE_TAG)?;
    let body = &tail[body_start..body_start + body_len];
    let end = start + body_start + body_len + CLOSE_TAG.len();

    Some(Correction {
        original: sanitize(body),
        suggestion: sanitize(&suggestion),
        range: start..end,
    })
}

fn find_tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, ch) in tag.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == '>' => return Some(i),
            None => {}
        }
    }
    None
}

/// Value of `name` (given with its trailing `=`) inside an open tag
fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let at = tag.find(name)?;
    let rest = &tag[at + name.len()..];
    let quote = rest.chars().next()?;
    if quote == '"' || quote == '\'' {
        let body = &rest[1..];
        let end = body.find(quote)?;
        Some(body[..end].to_string())
    } else {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        Some(rest[..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOTATED: &str = r#"the <span data-correct="quick">qu1xk</span> brown fox"#;

    #[test]
    fn test_parse_single_span() {
        let corrections = parse_corrections(ANNOTATED);
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].original, "qu1xk");
        assert_eq!(corrections[0].suggestion, "quick");
        assert_eq!(&ANNOTATED[corrections[0].range.clone()], r#"<span data-correct="quick">qu1xk</span>"#);
    }

    #[test]
    fn test_apply_corrections() {
        assert_eq!(apply_corrections(ANNOTATED), "the quick brown fox");
        let many = r#"<span data-correct="You">you</span> <span className="error" data-correct="are">r</span> a fat <span data-correct='cat'>c8t</span>."#;
        assert_eq!(apply_corrections(many), "You are a fat cat.");
    }

    #[test]
    fn test_malformed_spans_are_skipped() {
        let markup = r#"<span data-correct="brown">br0wn/span> fox"#;
        assert!(parse_corrections(markup).is_empty());

        let no_attr = "<span>plain</span>";
        assert!(parse_corrections(no_attr).is_empty());
        assert_eq!(apply_corrections(no_attr), "plain");
    }

    #[test]
    fn test_suggestion_entities_decoded() {
        let markup = r#"<span data-correct="don&apos;t">dont</span>"#;
        assert_eq!(parse_corrections(markup)[0].suggestion, "don't");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert!(parse_corrections("nothing to fix").is_empty());
        assert_eq!(apply_corrections("nothing to fix"), "nothing to fix");
    }
}
