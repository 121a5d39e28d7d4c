//! Markup stripping for surface content
//!
//! [`sanitize`] reduces a markup string to the text a reader would see:
//! tags and comments are removed, `<script>`/`<style>` bodies are dropped,
//! line-breaking elements become newlines and character references are
//! decoded. It is a pure transform and never fails; input it does not
//! recognize as markup passes through as text.
//!
//! [`strip_tags`] is the same transform without reference decoding, for
//! content that is already text: an `&amp;` typed by a user stays as typed.
//!
//! A `<` only opens a tag when it is followed by a letter, `/`, `!` or `?`
//! and the tag is closed by a `>`. This keeps plain prose such as `a < b`
//! or `x<y` intact.

const MAX_PASSES: usize = 8;

/// Longest character reference body considered, e.g. `#x10FFFF`
const MAX_REFERENCE_LEN: usize = 10;

/// Elements whose text content is never visible
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Elements that start on a new line when rendered as text
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "div",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "tr",
    "ul",
];

/// Strip markup from `input`, keeping only human-visible text.
///
/// The result contains no tags: decoding `&lt;b&gt;` can produce a new tag,
/// so the transform is repeated until the output is stable.
pub fn sanitize(input: &str) -> String {
    strip(input, References::Decode)
}

/// Remove tags, comments and hidden element bodies from text, leaving
/// character references as literal text.
pub fn strip_tags(input: &str) -> String {
    strip(input, References::Keep)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum References {
    Decode,
    Keep,
}

fn strip(input: &str, references: References) -> String {
    let mut current = strip_once(input, references);
    for _ in 1..MAX_PASSES {
        let next = strip_once(&current, references);
        if next == current {
            return current;
        }
        current = next;
    }
    // Pathological nesting: drop anything still shaped like markup
    current.replace(&['<', '>'][..], "")
}

/// True if `input` contains a tag, comment or character reference
pub fn contains_markup(input: &str) -> bool {
    input.char_indices().any(|(i, ch)| match ch {
        '<' => scan_markup(&input[i..]).is_some(),
        '&' => decode_reference(&input[i..]).is_some(),
        _ => false,
    })
}

/// Escape text so it is inserted into markup as literal characters
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for use inside a double-quoted attribute
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn strip_once(input: &str, references: References) -> String {
    let mut out = TextWriter::with_capacity(input.len());
    let mut rest = input;
    let decode = references == References::Decode;

    while let Some(idx) = rest.find(|c: char| c == '<' || (decode && c == '&')) {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if tail.starts_with('&') {
            match decode_reference(tail) {
                Some((ch, len)) => {
                    out.push(ch);
                    rest = &tail[len..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            }
            continue;
        }

        let Some((markup, len)) = scan_markup(tail) else {
            out.push('<');
            rest = &tail[1..];
            continue;
        };

        rest = &tail[len..];
        match markup {
            Markup::Open { name, .. } if name == "br" => out.push('\n'),
            Markup::Open { name, self_closing } if RAW_TEXT_ELEMENTS.contains(&name.as_str()) => {
                if !self_closing {
                    rest = skip_raw_text(rest, &name);
                }
            }
            Markup::Open { name, .. } | Markup::Close { name }
                if BLOCK_ELEMENTS.contains(&name.as_str()) =>
            {
                out.request_break();
            }
            _ => {}
        }
    }

    out.push_str(rest);
    out.finish()
}

/// Output buffer that places block-element line breaks lazily, so markup
/// at either end of the input never adds leading or trailing newlines.
struct TextWriter {
    out: String,
    pending_break: bool,
}

impl TextWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            pending_break: false,
        }
    }

    fn request_break(&mut self) {
        if !self.out.is_empty() {
            self.pending_break = true;
        }
    }

    fn flush_break(&mut self, next: char) {
        if self.pending_break {
            self.pending_break = false;
            if next != '\n' && !self.out.ends_with('\n') {
                self.out.push('\n');
            }
        }
    }

    fn push(&mut self, ch: char) {
        self.flush_break(ch);
        self.out.push(ch);
    }

    fn push_str(&mut self, text: &str) {
        if let Some(first) = text.chars().next() {
            self.flush_break(first);
            self.out.push_str(text);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

#[derive(Debug, PartialEq)]
enum Markup {
    Open { name: String, self_closing: bool },
    Close { name: String },
    /// Comments, doctypes and processing instructions
    Other,
}

/// Recognize markup at the start of `tail` (which begins with `<`).
/// Returns the markup and its length in bytes.
fn scan_markup(tail: &str) -> Option<(Markup, usize)> {
    let bytes = tail.as_bytes();
    let next = *bytes.get(1)?;

    if let Some(body) = tail.strip_prefix("<!--") {
        let end = body.find("-->")?;
        return Some((Markup::Other, 4 + end + 3));
    }

    if !(next.is_ascii_alphabetic() || matches!(next, b'/' | b'!' | b'?')) {
        return None;
    }

    let end = find_tag_end(bytes)?;
    let inner = &tail[1..end];
    let markup = match next {
        b'!' | b'?' => Markup::Other,
        b'/' => Markup::Close {
            name: tag_name(&inner[1..]),
        },
        _ => Markup::Open {
            name: tag_name(inner),
            self_closing: inner.trim_end().ends_with('/'),
        },
    };
    Some((markup, end + 1))
}

/// Index of the `>` closing the tag that starts at byte 0, honoring quotes
fn find_tag_end(bytes: &[u8]) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None if b == b'<' => return None,
            None => {}
        }
    }
    None
}

fn tag_name(inner: &str) -> String {
    inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Skip the body of a raw-text element up to and including its end tag.
/// An unterminated element swallows the rest of the input.
fn skip_raw_text<'a>(rest: &'a str, name: &str) -> &'a str {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{name}");
    let Some(start) = lower.find(&needle) else {
        return "";
    };
    match rest[start..].find('>') {
        Some(end) => &rest[start + end + 1..],
        None => "",
    }
}

/// Decode a character reference at the start of `tail` (which begins with `&`).
/// Returns the character and the reference length in bytes.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    let (semi, _) = tail
        .char_indices()
        .skip(1)
        .take(MAX_REFERENCE_LEN)
        .find(|&(_, c)| c == ';')?;
    let body = &tail[1..semi];

    let ch = if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(&['x', 'X'][..]) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            _ => return None,
        }
    };
    Some((ch, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        for text in [
            "",
            "the quick brown fox",
            "a < b and c > d",
            "x<y",
            "tom & jerry",
            "line one\nline two",
            "héllo wörld",
        ] {
            assert_eq!(sanitize(text), text, "changed: {text:?}");
        }
    }

    #[test]
    fn test_strips_tags_keeps_text() {
        assert_eq!(sanitize("<b>bold</b> move"), "bold move");
        assert_eq!(
            sanitize(r#"the <span data-correct="quick">qu1xk</span> fox"#),
            "the qu1xk fox"
        );
    }

    #[test]
    fn test_script_is_dropped() {
        assert_eq!(sanitize("hello<script>"), "hello");
        assert_eq!(sanitize("a<script>alert(1)</script>b"), "ab");
        assert_eq!(sanitize("a<SCRIPT>x</Script >b"), "ab");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(sanitize("one<br>two<br/>three"), "one\ntwo\nthree");
        assert_eq!(sanitize("<div>a</div><div>b</div>"), "a\nb");
        assert_eq!(sanitize("<p>first</p>"), "first");
        assert_eq!(sanitize("<div>x</div>y"), "x\ny");
    }

    #[test]
    fn test_quoted_gt_inside_attribute() {
        assert_eq!(sanitize(r#"<span title="a>b">x</span>"#), "x");
    }

    #[test]
    fn test_comments_and_declarations() {
        assert_eq!(sanitize("a<!-- hidden -->b"), "ab");
        assert_eq!(sanitize("<!DOCTYPE html>text"), "text");
    }

    #[test]
    fn test_references() {
        assert_eq!(sanitize("fish &amp; chips"), "fish & chips");
        assert_eq!(sanitize("&#65;&#x42;"), "AB");
        assert_eq!(sanitize("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn test_decoded_tags_do_not_survive() {
        let out = sanitize("&lt;b&gt;x");
        assert!(!contains_markup(&out));
        assert_eq!(out, "x");
    }

    #[test]
    fn test_nested_angle_brackets() {
        let out = sanitize("<<b>b>");
        assert!(!contains_markup(&out), "{out:?}");
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["<i>it</i>&amp;", "a<b", "<div>x</div>y", "&lt;&lt;i&gt;&gt;"];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("hello<script>"), "hello&lt;script&gt;");
        assert_eq!(sanitize(&escape_text("a & b")), "a & b");
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_strip_tags_keeps_references() {
        assert_eq!(strip_tags("AT&amp;T"), "AT&amp;T");
        assert_eq!(strip_tags("5 &lt; 6"), "5 &lt; 6");
        assert_eq!(strip_tags("<b>fish</b> &amp; chips"), "fish &amp; chips");
        assert_eq!(strip_tags("one<br>two"), "one\ntwo");
        assert_eq!(strip_tags("a<script>x</script>b"), "ab");
    }

    #[test]
    fn test_strip_tags_nested() {
        let out = strip_tags("<<b>b>x");
        assert!(!out.contains("<b>"), "{out:?}");
        assert_eq!(strip_tags(&out), out);
    }

    #[test]
    fn test_contains_markup() {
        assert!(contains_markup("<b>x</b>"));
        assert!(contains_markup("a &amp; b"));
        assert!(!contains_markup("a < b & c"));
    }
}
