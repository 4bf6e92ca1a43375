//! Calculator plugin (`math`)

use async_trait::async_trait;

use crate::answer::{escape_html, Answer, AnswerKind};
use crate::calc::{format_number, Evaluator};
use crate::context::QueryContext;
use crate::error::Result;
use crate::plugin::{PatternMatcher, Plugin};

/// Characters that may appear in a bare arithmetic query
const ARITH: &str = r"[\d\s.+\-*/%^()×÷]";

/// Evaluates arithmetic, either prefixed ("calculate 2+2") or bare ("2+2")
pub struct CalculatorPlugin {
    patterns: Vec<PatternMatcher>,
    evaluator: Evaluator,
}

impl CalculatorPlugin {
    pub const NAME: &'static str = "calculator";

    pub fn new() -> Result<Self> {
        let prefixed = r"^(?:calc|calculate|compute|eval|evaluate|solve)\b\s*(.*?)\s*\??$".to_string();
        let what_is = format!(
            r"^(?:what\s+is|what's|whats)\s+({ARITH}+(?:%\s*of\s+{ARITH}+)?)\s*\??$"
        );
        let trailing_equals = format!(r"^({ARITH}+)=\s*\??$");
        let percent_of = format!(r"^(\d+(?:\.\d+)?\s*%\s*of\s+{ARITH}+)$");
        // At least one operator after the first character, so "-5" and "42" stay unanswered
        let bare = format!(r"^([-+(.\d]{ARITH}*[+\-*/%^×÷]{ARITH}*)$");

        let patterns = vec![PatternMatcher::new(&[
            &prefixed,
            &what_is,
            &trailing_equals,
            &percent_of,
            &bare,
        ])?];

        Ok(Self {
            patterns,
            evaluator: Evaluator::new(),
        })
    }

    fn render(&self, query: &str, expression: &str) -> Result<Answer> {
        let escaped = escape_html(expression);

        match self.evaluator.evaluate(expression) {
            Ok(value) => {
                let formatted = format_number(value);
                let content = format!(
                    "<div class=\"answer-math\"><span class=\"expression\">{}</span> = <span class=\"result\">{}</span></div>",
                    escaped, formatted
                );
                Answer::new(AnswerKind::Math, query, "Calculator", content)
                    .with_data("expression", expression)?
                    .with_data("result", value)?
                    .with_data("formatted", &formatted)
            }
            Err(err) if err.is_user_facing() => {
                tracing::debug!(expression, code = err.error_code(), "expression rejected");
                let content = format!(
                    "<div class=\"answer-math answer-error\">Cannot evaluate <code>{}</code>: {}</div>",
                    escaped,
                    escape_html(&err.to_string())
                );
                Answer::new(AnswerKind::Math, query, "Calculator", content)
                    .with_data("expression", expression)?
                    .with_data("error", err.error_code())?
                    .with_data("message", err.to_string())
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl Plugin for CalculatorPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Evaluates arithmetic with precedence, powers and percentages"
    }

    fn examples(&self) -> &[&'static str] {
        &["2 + 3 * 4", "calculate (2 + 3) * 4", "what is 2^10", "15% of 80"]
    }

    fn patterns(&self) -> &[PatternMatcher] {
        &self.patterns
    }

    async fn handle(&self, _ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
        let Some(expression) = self.patterns[0].first_arg(query) else {
            return Ok(None);
        };
        self.render(query, &expression).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin() -> CalculatorPlugin {
        CalculatorPlugin::new().unwrap()
    }

    async fn answer(query: &str) -> Option<Answer> {
        plugin().handle(&QueryContext::new(), query).await.unwrap()
    }

    #[test]
    fn test_recognized_shapes() {
        let p = plugin();
        for q in [
            "2 + 2",
            "(2+3)*4",
            "2^10",
            "-5 * 3",
            "50%",
            "15% of 80",
            "calculate 1/3",
            "Calc 7 % 4",
            "what is 2 + 2?",
            "3 * 3 =",
        ] {
            assert!(p.can_handle(q), "{q}");
        }
    }

    #[test]
    fn test_unrecognized_shapes() {
        let p = plugin();
        for q in ["42", "-5", "what is love", "10 km to miles", "sha256 abc", "calculus"] {
            assert!(!p.can_handle(q), "{q}");
        }
    }

    #[tokio::test]
    async fn test_bare_arithmetic() {
        let a = answer("2 + 3 * 4").await.unwrap();
        assert_eq!(a.kind, AnswerKind::Math);
        assert_eq!(a.get("formatted").unwrap(), "14");
        assert_eq!(a.get("result").unwrap(), 14.0);
        assert!(a.content.contains("<span class=\"result\">14</span>"));
    }

    #[tokio::test]
    async fn test_prefixed_and_percent() {
        let a = answer("what is 50% of 200?").await.unwrap();
        assert_eq!(a.get("expression").unwrap(), "50% of 200");
        assert_eq!(a.get("formatted").unwrap(), "100");

        let a = answer("evaluate 1/4").await.unwrap();
        assert_eq!(a.get("formatted").unwrap(), "0.25");
    }

    #[tokio::test]
    async fn test_empty_expression_is_no_answer() {
        assert!(answer("calculate").await.is_none());
        assert!(answer("calc   ?").await.is_none());
    }

    #[tokio::test]
    async fn test_errors_are_rendered_not_thrown() {
        let a = answer("1 / 0").await.unwrap();
        assert_eq!(a.get("error").unwrap(), "DIVISION_BY_ZERO");
        assert!(a.content.contains("answer-error"));
        assert!(a.get("result").is_none());

        let a = answer("calculate 2 + <b>").await.unwrap();
        assert_eq!(a.get("error").unwrap(), "INVALID_EXPRESSION");
        assert!(a.content.contains("&lt;b&gt;"));
        assert!(!a.content.contains("<b>"));
    }

    #[tokio::test]
    async fn test_percentage_after_an_operator_is_an_error() {
        let a = answer("what is 100 - 10% of 50?").await.unwrap();
        assert_eq!(a.get("error").unwrap(), "INVALID_EXPRESSION");
        assert!(a.get("result").is_none());
    }
}
