//! Answer - the structured result of a successful resolution

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AnswerError, Result};

/// Closed tag identifying the answer family
///
/// Keys inside `Answer.data` are stable per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    /// Arithmetic result (`expression`, `result`, `formatted`)
    Math,
    /// Unit conversion (`value`, `from`, `to`, `result`, `formatted`, `category`)
    Convert,
    /// Digest of the query text (`algorithm`, `input`, `digest`)
    Hash,
    /// Base64 encode/decode (`operation`, `input`, `output`)
    Base64,
    /// UUID generation or validation (`uuid`, `valid`, `version`, `variant`)
    Uuid,
    /// Unix timestamp rendering (`seconds`, `iso8601`, `weekday`)
    Timestamp,
    /// Externally fetched lookup (dictionary, CVE, RFC, ...)
    Lookup,
}

impl AnswerKind {
    /// Stable string tag
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Math => "math",
            AnswerKind::Convert => "convert",
            AnswerKind::Hash => "hash",
            AnswerKind::Base64 => "base64",
            AnswerKind::Uuid => "uuid",
            AnswerKind::Timestamp => "timestamp",
            AnswerKind::Lookup => "lookup",
        }
    }
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A precomputed, directly renderable result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer family
    pub kind: AnswerKind,

    /// Echo of the (trimmed) query
    pub query: String,

    /// Short heading
    pub title: String,

    /// HTML fragment; user input embedded here is already escaped
    pub content: String,

    /// Machine-readable fields, keys stable per `kind`
    #[serde(default)]
    pub data: Map<String, Value>,

    /// Provenance name for externally fetched answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Provenance link for externally fetched answers
    #[serde(rename = "sourceURL", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Optional related links fragment
    #[serde(rename = "relatedHTML", skip_serializing_if = "Option::is_none")]
    pub related_html: Option<String>,
}

impl Answer {
    /// Create a new answer with empty data
    pub fn new(
        kind: AnswerKind,
        query: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            query: query.into(),
            title: title.into(),
            content: content.into(),
            data: Map::new(),
            source: None,
            source_url: None,
            related_html: None,
        }
    }

    /// Add a data field
    ///
    /// Fails with `MalformedAnswer` when the value cannot be represented as
    /// JSON, which includes non-finite floats.
    pub fn with_data<T: Serialize>(mut self, key: &str, value: T) -> Result<Self> {
        self.insert_data(key, value)?;
        Ok(self)
    }

    /// Insert a data field in place
    pub fn insert_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| AnswerError::MalformedAnswer {
            field: key.to_string(),
            reason: e.to_string(),
        })?;

        // serde_json maps NaN and infinities to null instead of failing
        if value.is_null() {
            return Err(AnswerError::MalformedAnswer {
                field: key.to_string(),
                reason: "value serializes to null".to_string(),
            });
        }

        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Attach provenance for externally fetched answers
    pub fn with_source(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.source = Some(name.into());
        self.source_url = Some(url.into());
        self
    }

    /// Attach a related-links fragment
    pub fn with_related_html(mut self, html: impl Into<String>) -> Self {
        self.related_html = Some(html.into());
        self
    }

    /// Look up a data field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Content with tags stripped, for terminal rendering
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.content.len());
        let mut in_tag = false;
        for ch in self.content.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }
        unescape_html(out.trim())
    }
}

/// Escape text for embedding inside an HTML fragment
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
