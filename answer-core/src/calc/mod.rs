//! Arithmetic Evaluator
//!
//! Evaluates general arithmetic with operator precedence, unary signs,
//! exponentiation and percentage shortcuts.
//!
//! ## Pipeline
//!
//! ```text
//!  input ──► percentage pre-pass ──► match? ──► (P/100)*V  or  N/100
//!                   │ no
//!                   ▼
//!               tokenize ──► parse (AST) ──► post-order eval ──► finite?
//! ```
//!
//! Percentages are not part of the grammar (`%` is modulo there), so the
//! two percentage forms are recognized textually first and short-circuit
//! the rest of the pipeline. The percentage itself must be a number or a
//! flat parenthesised group; `1 + 50% of 10` is not a percentage form and
//! fails in the grammar.
//!
//! ## Example
//!
//! ```rust
//! use answer_core::calc::{evaluate, format_number};
//!
//! assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
//! assert_eq!(evaluate("50% of 200").unwrap(), 100.0);
//! assert_eq!(format_number(evaluate("1 / 4").unwrap()), "0.25");
//! ```

mod ast;
mod format;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use format::format_number;
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse, MAX_DEPTH};

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::{AnswerError, Result};

/// Number literal accepted by both percentage forms
const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:e[+-]?\d+)?";

static SHARED: LazyLock<Evaluator> = LazyLock::new(Evaluator::new);

/// Evaluate an arithmetic expression using the shared evaluator
pub fn evaluate(expression: &str) -> Result<f64> {
    SHARED.evaluate(expression)
}

/// Expression evaluator owning its compiled percentage patterns
#[derive(Debug, Clone)]
pub struct Evaluator {
    percent_of: Regex,
    bare_percent: Regex,
}

impl Evaluator {
    /// Build the evaluator
    pub fn new() -> Self {
        Self {
            percent_of: build(&format!(
                r"^\s*(?P<pct>{NUMBER}|\([^()]*\))\s*%\s*of\s+(?P<base>.+)$"
            )),
            bare_percent: build(&format!(r"^\s*(?P<n>{NUMBER})\s*%\s*$")),
        }
    }

    /// Evaluate `expression` to a finite number
    pub fn evaluate(&self, expression: &str) -> Result<f64> {
        let value = match self.percentage(expression)? {
            Some(v) => v,
            None => parse(expression)?.eval()?,
        };

        if !value.is_finite() {
            return Err(AnswerError::NumericOverflow {
                expression: expression.trim().to_string(),
            });
        }
        Ok(value)
    }

    /// Percentage pre-pass; `None` when neither form applies
    fn percentage(&self, expression: &str) -> Result<Option<f64>> {
        if let Some(caps) = self.percent_of.captures(expression) {
            let pct = self.evaluate(&caps["pct"])?;
            let base = self.evaluate(&caps["base"])?;
            return Ok(Some(pct / 100.0 * base));
        }

        if let Some(caps) = self.bare_percent.captures(expression) {
            let n: f64 = caps["n"]
                .parse()
                .map_err(|_| AnswerError::invalid_expression(&caps["n"]))?;
            return Ok(Some(n / 100.0));
        }

        Ok(None)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn build(pattern: &str) -> Regex {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => unreachable!("static percentage pattern failed to compile: {e}"),
    }
}
