//! Digest plugin (`hash`)

use async_trait::async_trait;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::answer::{escape_html, Answer, AnswerKind};
use crate::context::QueryContext;
use crate::error::Result;
use crate::plugin::{PatternMatcher, Plugin};

/// Computes SHA-2 digests of the query text
pub struct HashPlugin {
    patterns: Vec<PatternMatcher>,
}

impl HashPlugin {
    pub const NAME: &'static str = "hash";

    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: vec![PatternMatcher::new(&[
                r"^(?P<alg>sha-?(?:224|256|384|512))(?:\s+(?:hash|digest|sum))?(?:\s+of)?(?:\s+(?P<text>.*))?$",
                r"^hash\s+(?P<text>.+?)\s+(?:with|using)\s+(?P<alg>sha-?(?:224|256|384|512))$",
            ])?],
        })
    }
}

/// Lowercase hex digest, or `None` for an unsupported algorithm
fn digest(algorithm: &str, input: &[u8]) -> Option<String> {
    let hex = match algorithm {
        "sha224" => hex::encode(Sha224::digest(input)),
        "sha256" => hex::encode(Sha256::digest(input)),
        "sha384" => hex::encode(Sha384::digest(input)),
        "sha512" => hex::encode(Sha512::digest(input)),
        _ => return None,
    };
    Some(hex)
}

#[async_trait]
impl Plugin for HashPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "SHA-224/256/384/512 digests of text"
    }

    fn examples(&self) -> &[&'static str] {
        &["sha256 hello world", "sha512 of password", "hash abc with sha224"]
    }

    fn patterns(&self) -> &[PatternMatcher] {
        &self.patterns
    }

    async fn handle(&self, _ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
        let Some(caps) = self.patterns[0].find(query) else {
            return Ok(None);
        };
        let text = caps.name("text").map(|m| m.as_str().trim()).unwrap_or_default();
        if text.is_empty() {
            return Ok(None);
        }
        let algorithm = caps
            .name("alg")
            .map(|m| m.as_str().to_lowercase().replace('-', ""))
            .unwrap_or_default();

        let Some(hex) = digest(&algorithm, text.as_bytes()) else {
            return Ok(None);
        };

        let content = format!(
            "<div class=\"answer-hash\"><span class=\"algorithm\">{}</span>(<code>{}</code>) = <code class=\"digest\">{}</code></div>",
            algorithm.to_uppercase(),
            escape_html(text),
            hex
        );
        Answer::new(AnswerKind::Hash, query, format!("{} Hash", algorithm.to_uppercase()), content)
            .with_data("algorithm", &algorithm)?
            .with_data("input", text)?
            .with_data("digest", &hex)
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn answer(query: &str) -> Option<Answer> {
        HashPlugin::new()
            .unwrap()
            .handle(&QueryContext::new(), query)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sha256_known_vector() {
        let a = answer("sha256 abc").await.unwrap();
        assert_eq!(
            a.get("digest").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(a.get("algorithm").unwrap(), "sha256");
        assert_eq!(a.title, "SHA256 Hash");
    }

    #[tokio::test]
    async fn test_input_case_is_preserved() {
        let upper = answer("SHA-256 of ABC").await.unwrap();
        let lower = answer("sha256 abc").await.unwrap();
        assert_eq!(upper.get("input").unwrap(), "ABC");
        assert_ne!(upper.get("digest"), lower.get("digest"));
    }

    #[tokio::test]
    async fn test_hash_with_form() {
        let a = answer("hash abc with sha224").await.unwrap();
        assert_eq!(
            a.get("digest").unwrap(),
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
        );
    }

    #[tokio::test]
    async fn test_missing_text_is_no_answer() {
        let p = HashPlugin::new().unwrap();
        assert!(p.can_handle("sha512"));
        assert!(answer("sha512").await.is_none());
        assert!(answer("sha512 of").await.is_none());
    }

    #[tokio::test]
    async fn test_input_is_escaped() {
        let a = answer("sha256 <script>").await.unwrap();
        assert!(a.content.contains("&lt;script&gt;"));
    }
}
