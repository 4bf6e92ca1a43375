//! UUID plugin (`uuid`): generate a random v4 UUID or inspect one

use async_trait::async_trait;
use uuid::{Uuid, Variant};

use crate::answer::{escape_html, Answer, AnswerKind};
use crate::context::QueryContext;
use crate::error::Result;
use crate::plugin::{PatternMatcher, Plugin};

pub struct UuidPlugin {
    /// `[generate, validate]`
    patterns: Vec<PatternMatcher>,
}

impl UuidPlugin {
    pub const NAME: &'static str = "uuid";

    pub fn new() -> Result<Self> {
        let generate = PatternMatcher::new(&[
            r"^(?:uuid|guid)(?:\s*v?4)?$",
            r"^(?:generate|random|new|create)\s+(?:an?\s+)?(?:uuid|guid)(?:\s*v?4)?$",
            r"^(?:uuid|guid)\s+(?:generator|please)$",
        ])?;
        let validate = PatternMatcher::new(&[
            r"^is\s+(?P<value>\S+)\s+an?\s+valid\s+(?:uuid|guid)\s*\??$",
            r"^(?:validate|parse|inspect)\s+(?:uuid|guid)\s+(?P<value>\S+)$",
            r"^(?:uuid|guid)\s+(?P<value>\S+)$",
        ])?;

        Ok(Self {
            patterns: vec![generate, validate],
        })
    }

    fn generated(&self, query: &str) -> Result<Answer> {
        let id = Uuid::new_v4().to_string();
        let content = format!("<div class=\"answer-uuid\"><code>{}</code></div>", id);
        Answer::new(AnswerKind::Uuid, query, "Random UUID", content)
            .with_data("uuid", &id)?
            .with_data("valid", true)?
            .with_data("version", 4)?
            .with_data("variant", "RFC4122")
    }

    fn inspected(&self, query: &str, value: &str) -> Result<Answer> {
        match Uuid::parse_str(value) {
            Ok(id) => {
                let version = id.get_version_num();
                let variant = variant_name(id.get_variant());
                let content = format!(
                    "<div class=\"answer-uuid\"><code>{}</code> is a valid UUID (version {}, {} variant)</div>",
                    id.hyphenated(),
                    version,
                    variant
                );
                Answer::new(AnswerKind::Uuid, query, "UUID", content)
                    .with_data("uuid", id.hyphenated().to_string())?
                    .with_data("valid", true)?
                    .with_data("version", version)?
                    .with_data("variant", variant)
            }
            Err(err) => {
                let content = format!(
                    "<div class=\"answer-uuid answer-error\"><code>{}</code> is not a valid UUID</div>",
                    escape_html(value)
                );
                Answer::new(AnswerKind::Uuid, query, "UUID", content)
                    .with_data("uuid", value)?
                    .with_data("valid", false)?
                    .with_data("message", err.to_string())
            }
        }
    }
}

fn variant_name(variant: Variant) -> &'static str {
    match variant {
        Variant::NCS => "NCS",
        Variant::RFC4122 => "RFC4122",
        Variant::Microsoft => "Microsoft",
        Variant::Future => "Future",
        _ => "unknown",
    }
}

#[async_trait]
impl Plugin for UuidPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Generates random UUIDs and validates existing ones"
    }

    fn examples(&self) -> &[&'static str] {
        &[
            "uuid",
            "generate uuid",
            "is 550e8400-e29b-41d4-a716-446655440000 a valid uuid",
        ]
    }

    fn patterns(&self) -> &[PatternMatcher] {
        &self.patterns
    }

    async fn handle(&self, _ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
        if self.patterns[0].is_match(query) {
            return self.generated(query).map(Some);
        }
        match self.patterns[1].named(query, "value") {
            Some(value) if !value.is_empty() => self.inspected(query, &value).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn answer(query: &str) -> Option<Answer> {
        UuidPlugin::new()
            .unwrap()
            .handle(&QueryContext::new(), query)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_is_random_v4() {
        let a = answer("generate uuid").await.unwrap();
        let b = answer("UUID").await.unwrap();
        let id = a.get("uuid").unwrap().as_str().unwrap();
        let parsed = Uuid::parse_str(id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(a.get("uuid"), b.get("uuid"));
    }

    #[tokio::test]
    async fn test_validate_known_uuid() {
        let a = answer("is 550e8400-e29b-41d4-a716-446655440000 a valid uuid?")
            .await
            .unwrap();
        assert_eq!(a.get("valid").unwrap(), true);
        assert_eq!(a.get("version").unwrap(), 4);
        assert_eq!(a.get("variant").unwrap(), "RFC4122");
    }

    #[tokio::test]
    async fn test_validate_normalizes_simple_form() {
        let a = answer("uuid 550E8400E29B41D4A716446655440000").await.unwrap();
        assert_eq!(
            a.get("uuid").unwrap(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_rendered() {
        let a = answer("uuid not-a-uuid").await.unwrap();
        assert_eq!(a.get("valid").unwrap(), false);
        assert!(a.content.contains("is not a valid UUID"));
    }

    #[test]
    fn test_unrelated_queries() {
        let p = UuidPlugin::new().unwrap();
        assert!(!p.can_handle("what is a uuid made of"));
        assert!(!p.can_handle("2 + 2"));
    }
}
