//! Instruction payloads sent to the generation model

use serde::{Deserialize, Serialize};

/// Which kind of corrected text the model is asked to return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptStyle {
    /// Original text with each error wrapped in `<span data-correct="...">`
    #[default]
    Annotated,
    /// Corrected plain text only
    Plain,
}

impl PromptStyle {
    /// Value of the request's `format` field, if any
    pub fn format(self) -> Option<&'static str> {
        match self {
            PromptStyle::Annotated => Some("html"),
            PromptStyle::Plain => None,
        }
    }

    /// Full prompt for `content`
    pub fn build(self, content: &str) -> String {
        match self {
            PromptStyle::Annotated => format!("{ANNOTATED_INSTRUCTIONS}\n+++\n{content}\n---\n"),
            PromptStyle::Plain => format!("{PLAIN_INSTRUCTIONS}\n{content}"),
        }
    }
}

const ANNOTATED_INSTRUCTIONS: &str = r#"
You are a spelling checker for English as written in the United States.
Reply with the user's original text and nothing else: no greetings, no acknowledgments, no added formatting, no extra new lines, no indentation.
Keep the original text as it is, except that every spelling or grammar error must be wrapped in an HTML5 span element whose "data-correct" attribute holds the corrected text, with the original erroneous text inside the span.
For example, "the qu1xk br0wn fox; jumped ov3r da fenze!" becomes "<span data-correct="The">the</span> <span data-correct="quick">qu1xk</span> <span data-correct="brown">br0wn</span> fox; jumped <span data-correct="over">ov3r</span> <span data-correct="the">da</span> <span data-correct="fence">fenze</span>!".
Another example: "you r a fat c8t." becomes "<span data-correct="You">you</span> <span data-correct="are">r</span> a fat <span data-correct="cat">c8t</span>.".
The data starts after the line containing "+++" and ends at the line containing "---". Any other kind of reply will not be accepted."#;

const PLAIN_INSTRUCTIONS: &str = "You are a spelling and grammar checker. Reply with the original data with both spelling and grammar corrected and nothing else: no phrases such as \"Here is the corrected text:\", no extra new lines, no indentation. Keep any formatting the same as the original:";
