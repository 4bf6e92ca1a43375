//! Unit conversion plugin (`convert`)

use async_trait::async_trait;

use crate::answer::{escape_html, Answer, AnswerKind};
use crate::calc::format_number;
use crate::context::QueryContext;
use crate::convert::{normalize_unit, UnitConverter};
use crate::error::{AnswerError, Result};
use crate::plugin::{PatternMatcher, Plugin};

const NUMBER: &str = r"[+-]?(?:\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?|\.\d+)";
const UNIT: &str = r"(?:degrees?\s+)?°?[a-z]+";

/// Converts "<value> <unit> to <unit>" style queries
pub struct ConverterPlugin {
    patterns: Vec<PatternMatcher>,
    converter: UnitConverter,
}

impl ConverterPlugin {
    pub const NAME: &'static str = "convert";

    pub fn new() -> Result<Self> {
        let direct = format!(
            r"^(?:convert\s+)?(?P<value>{NUMBER})\s*(?P<from>{UNIT})\s+(?:to|in|into|as)\s+(?P<to>{UNIT})\s*\??$"
        );
        let what_is = format!(
            r"^(?:what\s+is|what's|whats)\s+(?P<value>{NUMBER})\s*(?P<from>{UNIT})\s+(?:in|to|as)\s+(?P<to>{UNIT})\s*\??$"
        );
        let how_many = format!(
            r"^how\s+many\s+(?P<to>{UNIT})\s+(?:are\s+)?in\s+(?:(?:a|an|one)\s+|(?P<value>{NUMBER})\s*)(?P<from>{UNIT})\s*\??$"
        );

        Ok(Self {
            patterns: vec![PatternMatcher::new(&[&direct, &what_is, &how_many])?],
            converter: UnitConverter::new(),
        })
    }

    fn render(&self, query: &str, value: f64, from: &str, to: &str) -> Result<Answer> {
        let from = normalize_unit(from);
        let to = normalize_unit(to);

        match self.converter.convert(value, &from, &to) {
            Ok(result) => {
                let formatted = format_number(result);
                let category = self
                    .converter
                    .category_of(&from)
                    .map(|c| c.as_str())
                    .unwrap_or_default();
                let content = format!(
                    "<div class=\"answer-convert\"><span class=\"from\">{} {}</span> = <span class=\"to\">{} {}</span></div>",
                    format_number(value),
                    escape_html(&from),
                    formatted,
                    escape_html(&to)
                );
                Answer::new(AnswerKind::Convert, query, "Unit Conversion", content)
                    .with_data("value", value)?
                    .with_data("from", &from)?
                    .with_data("to", &to)?
                    .with_data("result", result)?
                    .with_data("formatted", &formatted)?
                    .with_data("category", category)
            }
            Err(err @ AnswerError::UnknownConversion { .. }) => {
                tracing::debug!(%from, %to, "no conversion between units");
                let content = format!(
                    "<div class=\"answer-convert answer-error\">Cannot convert {} to {}</div>",
                    escape_html(&from),
                    escape_html(&to)
                );
                Answer::new(AnswerKind::Convert, query, "Unit Conversion", content)
                    .with_data("value", value)?
                    .with_data("from", &from)?
                    .with_data("to", &to)?
                    .with_data("error", err.error_code())?
                    .with_data("message", err.to_string())
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl Plugin for ConverterPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Converts length, mass, volume, time, data and temperature units"
    }

    fn examples(&self) -> &[&'static str] {
        &[
            "1000 meters to kilometers",
            "convert 72 f to c",
            "how many feet in a mile",
            "what is 1 gb in mb",
        ]
    }

    fn patterns(&self) -> &[PatternMatcher] {
        &self.patterns
    }

    async fn handle(&self, _ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
        let Some(caps) = self.patterns[0].find(query) else {
            return Ok(None);
        };

        let from = caps.name("from").map(|m| m.as_str().trim()).unwrap_or_default();
        let to = caps.name("to").map(|m| m.as_str().trim()).unwrap_or_default();
        if from.is_empty() || to.is_empty() {
            return Ok(None);
        }

        // "how many feet in a mile" has no explicit value
        let value = match caps.name("value") {
            Some(m) => match m.as_str().replace(',', "").parse::<f64>() {
                Ok(v) => v,
                Err(_) => return Ok(None),
            },
            None => 1.0,
        };

        self.render(query, value, from, to).map(Some)
    }
}
