//! Recursive-descent parser producing an [`Expr`]
//!
//! ```text
//! expr    := term   (('+' | '-') term)*
//! term    := unary  (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! `^` is right-associative because its right operand re-enters `unary`,
//! which reaches `power` again: `2^2^2` parses as `2^(2^2)`. A sign on the
//! left applies to the whole power (`-2^2 = -4`); a sign on the right
//! belongs to the exponent (`2^-1 = 0.5`).
//!
//! Nesting is bounded by [`MAX_DEPTH`]: every sign, `^`, parenthesis and
//! chained binary operator deepens the tree by one level. Deeper input is
//! an `InvalidExpression`, so neither parsing nor evaluation can exhaust
//! the stack.

use crate::error::{AnswerError, Result};

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::lexer::{tokenize, Token, TokenKind};

/// Deepest expression tree the parser will build
pub const MAX_DEPTH: usize = 256;

/// Parse `input` into an expression tree
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(AnswerError::invalid_expression(input));
    }

    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;

    if parser.pos < parser.tokens.len() {
        return Err(parser.error_here());
    }
    Ok(expr)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Error carrying the source text from the current token on, or the
    /// whole input when the parser ran off the end
    fn error_here(&self) -> AnswerError {
        match self.tokens.get(self.pos) {
            Some(token) => AnswerError::invalid_expression(self.input[token.offset..].trim()),
            None => AnswerError::invalid_expression(self.input.trim()),
        }
    }

    /// Enter one more level of the tree
    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error_here());
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr> {
        let entry = self.depth;
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => {
                    self.depth = entry;
                    return Ok(lhs);
                }
            };
            self.advance();
            self.descend()?;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr> {
        let entry = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => {
                    self.depth = entry;
                    return Ok(lhs);
                }
            };
            self.advance();
            self.descend()?;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr> {
        self.descend()?;
        let expr = match self.peek() {
            Some(TokenKind::Plus) => {
                self.advance();
                Expr::unary(UnaryOp::Plus, self.unary()?)
            }
            Some(TokenKind::Minus) => {
                self.advance();
                Expr::unary(UnaryOp::Neg, self.unary()?)
            }
            _ => self.power()?,
        };
        self.depth -= 1;
        Ok(expr)
    }

    fn power(&mut self) -> Result<Expr> {
        let base = self.primary()?;
        if self.peek() == Some(TokenKind::Caret) {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(TokenKind::Number(v)) => {
                self.advance();
                Ok(Expr::Number(v))
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let inner = self.expr()?;
                if self.peek() != Some(TokenKind::RParen) {
                    return Err(self.error_here());
                }
                self.advance();
                Ok(Expr::Group(Box::new(inner)))
            }
            _ => Err(self.error_here()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> f64 {
        parse(input).unwrap().eval().unwrap()
    }

    fn invalid(input: &str) -> String {
        match parse(input) {
            Err(AnswerError::InvalidExpression { expression }) => expression,
            other => panic!("expected InvalidExpression for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("(2 + 3) * 4"), 20.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("100 / 10 / 5"), 2.0);
        assert_eq!(eval("7 % 4 * 2"), 6.0);
    }

    #[test]
    fn test_unary_binds_tighter_than_multiplication() {
        assert_eq!(eval("-3 * -2"), 6.0);
        assert_eq!(eval("--3"), 3.0);
        assert_eq!(eval("+4 - -1"), 5.0);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(eval("2^3"), 8.0);
        assert_eq!(eval("2^2^2"), 16.0);
        assert_eq!(eval("2^3^2"), 512.0);
        assert_eq!(eval("1 + 2^3"), 9.0);
        assert_eq!(eval("2 * 3^2"), 18.0);
    }

    #[test]
    fn test_power_and_signs() {
        assert_eq!(eval("-2^2"), -4.0);
        assert_eq!(eval("(-2)^2"), 4.0);
        assert_eq!(eval("2^-1"), 0.5);
    }

    #[test]
    fn test_group_node_is_kept() {
        let expr = parse("(1)").unwrap();
        assert_eq!(expr, Expr::Group(Box::new(Expr::Number(1.0))));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(invalid("(1 + 2"), "(1 + 2");
        assert_eq!(invalid("1 + 2)"), ")");
        assert_eq!(invalid("2 + * 3"), "* 3");
        assert_eq!(invalid("2 +"), "2 +");
        assert_eq!(invalid("()"), ")");
        assert_eq!(invalid("2 3"), "3");
        assert_eq!(invalid("   "), "   ");
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let depth = 10_000;
        let inputs = [
            format!("{}1{}", "(".repeat(depth), ")".repeat(depth)),
            format!("{}1", "-".repeat(depth)),
            format!("{}2", "2^".repeat(depth)),
            vec!["1"; depth].join(" + "),
            vec!["2"; depth].join(" * "),
        ];
        for input in &inputs {
            assert!(
                matches!(parse(input), Err(AnswerError::InvalidExpression { .. })),
                "{}...",
                &input[..16]
            );
        }
    }

    #[test]
    fn test_nesting_within_limit() {
        assert_eq!(eval(&format!("{}1{}", "(".repeat(100), ")".repeat(100))), 1.0);
        assert_eq!(eval(&format!("{}5", "-".repeat(100))), 5.0);
        assert_eq!(eval(&vec!["1"; 200].join(" + ")), 200.0);
        assert_eq!(eval(&format!("({}) * 2", vec!["1"; 100].join(" + "))), 200.0);
    }
}
