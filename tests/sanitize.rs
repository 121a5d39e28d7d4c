//! Sanitizer properties over a spread of realistic inputs

use proofread::sanitize::{contains_markup, escape_text, sanitize};

const PLAIN: &[&str] = &[
    "",
    "the quick brown fox",
    "a < b and c > d",
    "x<1 || y>2",
    "AT&T costs $5 & up",
    "multi\nline\ntext",
    "unicode: naïve café 日本語 🦀",
    "1 <= 2",
    "<",
    "a <3 b",
];

const MARKUP: &[(&str, &str)] = &[
    ("<b>bold</b>", "bold"),
    ("the <span data-correct=\"quick\">qu1xk</span> fox", "the qu1xk fox"),
    ("<p>one</p><p>two</p>", "one\ntwo"),
    ("line<br>break", "line\nbreak"),
    ("<a href=\"x>y\">link</a>", "link"),
    ("before<!-- hidden -->after", "beforeafter"),
    ("<style>p { color: red }</style>text", "text"),
    ("hello<script>alert(1)</script>world", "helloworld"),
    ("&lt;b&gt;x&lt;/b&gt;", "x"),
    ("fish &amp; chips", "fish & chips"),
];

#[test]
fn test_plain_text_is_unchanged() {
    for input in PLAIN {
        assert_eq!(sanitize(input), *input, "input: {:?}", input);
        assert!(!contains_markup(input), "input: {:?}", input);
    }
}

#[test]
fn test_markup_reduced_to_visible_text() {
    for (input, expected) in MARKUP {
        assert_eq!(sanitize(input), *expected, "input: {:?}", input);
    }
}

#[test]
fn test_output_never_contains_markup() {
    for (input, _) in MARKUP {
        let clean = sanitize(input);
        assert!(!contains_markup(&clean), "{:?} -> {:?}", input, clean);
    }
}

#[test]
fn test_sanitize_is_idempotent() {
    let inputs = PLAIN
        .iter()
        .copied()
        .chain(MARKUP.iter().map(|(input, _)| *input));
    for input in inputs {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once, "input: {:?}", input);
    }
}

#[test]
fn test_unterminated_raw_text_swallows_rest() {
    assert_eq!(sanitize("hello<script>"), "hello");
    assert_eq!(sanitize("ok<style>.a{}"), "ok");
}

#[test]
fn test_unclosed_tag_is_literal() {
    assert_eq!(sanitize("a <b"), "a <b");
}

#[test]
fn test_escaped_text_is_markup_free_when_rendered() {
    let escaped = escape_text("<img src=x onerror=alert(1)>");
    assert!(!escaped.contains('<'));
    assert!(contains_markup(&escaped));
}
