//! Base64 encode/decode plugin (`base64`)

use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::answer::{escape_html, Answer, AnswerKind};
use crate::context::QueryContext;
use crate::error::Result;
use crate::plugin::{PatternMatcher, Plugin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Encode,
    Decode,
}

impl Operation {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "encode" | "to" => Some(Operation::Encode),
            "decode" | "from" => Some(Operation::Decode),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Operation::Encode => "encode",
            Operation::Decode => "decode",
        }
    }
}

/// Encodes text to base64 or decodes base64 to text
pub struct Base64Plugin {
    patterns: Vec<PatternMatcher>,
}

impl Base64Plugin {
    pub const NAME: &'static str = "base64";

    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: vec![PatternMatcher::new(&[
                r"^base64\s+(?P<op>encode|decode)(?:\s+(?P<text>.*))?$",
                r"^(?P<op>encode|decode)\s+(?P<text>.+?)\s+(?:to|from|in|as|with)\s+base64$",
                r"^(?P<text>.+?)\s+(?P<op>to|from)\s+base64$",
            ])?],
        })
    }
}

/// Decode with the standard alphabet first, then the padless and URL-safe variants
fn decode(input: &str) -> Option<Vec<u8>> {
    [STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(input).ok())
}

#[async_trait]
impl Plugin for Base64Plugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Base64 encoding and decoding"
    }

    fn examples(&self) -> &[&'static str] {
        &["base64 encode hello", "base64 decode aGVsbG8=", "hello to base64"]
    }

    fn patterns(&self) -> &[PatternMatcher] {
        &self.patterns
    }

    async fn handle(&self, _ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
        let Some(caps) = self.patterns[0].find(query) else {
            return Ok(None);
        };
        let text = caps.name("text").map(|m| m.as_str().trim()).unwrap_or_default();
        let Some(op) = caps.name("op").and_then(|m| Operation::from_word(m.as_str())) else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(None);
        }

        let title = format!("Base64 {}", op.as_str());
        let answer = match op {
            Operation::Encode => {
                let output = STANDARD.encode(text.as_bytes());
                let content = format!(
                    "<div class=\"answer-base64\"><code>{}</code></div>",
                    escape_html(&output)
                );
                Answer::new(AnswerKind::Base64, query, title, content)
                    .with_data("operation", op.as_str())?
                    .with_data("input", text)?
                    .with_data("output", &output)?
            }
            Operation::Decode => match decode(text) {
                Some(bytes) => match String::from_utf8(bytes) {
                    Ok(output) => {
                        let content = format!(
                            "<div class=\"answer-base64\"><code>{}</code></div>",
                            escape_html(&output)
                        );
                        Answer::new(AnswerKind::Base64, query, title, content)
                            .with_data("operation", op.as_str())?
                            .with_data("input", text)?
                            .with_data("output", &output)?
                    }
                    Err(err) => {
                        let bytes = err.into_bytes();
                        let hex = hex::encode(&bytes);
                        let content = format!(
                            "<div class=\"answer-base64\">{} bytes of binary data: <code>{}</code></div>",
                            bytes.len(),
                            hex
                        );
                        Answer::new(AnswerKind::Base64, query, title, content)
                            .with_data("operation", op.as_str())?
                            .with_data("input", text)?
                            .with_data("hex", &hex)?
                            .with_data("binary", true)?
                    }
                },
                None => {
                    let content = format!(
                        "<div class=\"answer-base64 answer-error\"><code>{}</code> is not valid base64</div>",
                        escape_html(text)
                    );
                    Answer::new(AnswerKind::Base64, query, title, content)
                        .with_data("operation", op.as_str())?
                        .with_data("input", text)?
                        .with_data("error", "INVALID_BASE64")?
                }
            },
        };

        Ok(Some(answer))
    }
}
