//! Tokenizer for arithmetic expressions

use crate::error::{AnswerError, Result};

/// A lexical token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

/// A token with its byte offset in the source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Split `input` into tokens
///
/// Accepts `×`/`÷` as aliases for `*`/`/` and `**` as an alias for `^`.
/// Anything else that is not a number, operator or parenthesis fails with
/// `InvalidExpression` carrying the text from the offending character on.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let (end, value) = lex_number(input, offset)?;
                while chars.peek().is_some_and(|&(i, _)| i < end) {
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    offset,
                });
                continue;
            }
            '+' => TokenKind::Plus,
            '-' | '−' => TokenKind::Minus,
            '*' | '×' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '*'))) {
                    chars.next();
                    tokens.push(Token {
                        kind: TokenKind::Caret,
                        offset,
                    });
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Star,
                        offset,
                    });
                }
                continue;
            }
            '/' | '÷' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => return Err(AnswerError::invalid_expression(&input[offset..])),
        };
        chars.next();
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

/// Lex a number starting at `start`; returns the end offset and value
///
/// Grammar: `digits [. digits] [e|E [+|-] digits]` or `. digits [...]`.
/// The exponent is only consumed when at least one digit follows it.
fn lex_number(input: &str, start: usize) -> Result<(usize, f64)> {
    let bytes = input.as_bytes();
    let mut end = start;

    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = digits(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return Err(AnswerError::invalid_expression(&input[start..]));
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    let text = &input[start..end];
    let value = text
        .parse::<f64>()
        .map_err(|_| AnswerError::invalid_expression(text))?;
    Ok((end, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_operators_and_parens() {
        assert_eq!(
            kinds("(1 + 2) * 3"),
            vec![
                TokenKind::LParen,
                TokenKind::Number(1.0),
                TokenKind::Plus,
                TokenKind::Number(2.0),
                TokenKind::RParen,
                TokenKind::Star,
                TokenKind::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds("1.5"), vec![TokenKind::Number(1.5)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("4."), vec![TokenKind::Number(4.0)]);
        assert_eq!(kinds("1e+16"), vec![TokenKind::Number(1e16)]);
        assert_eq!(kinds("1.5e-05"), vec![TokenKind::Number(1.5e-5)]);
        assert_eq!(kinds("2E3"), vec![TokenKind::Number(2000.0)]);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            kinds("2 ** 3 × 4 ÷ 5"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Caret,
                TokenKind::Number(3.0),
                TokenKind::Star,
                TokenKind::Number(4.0),
                TokenKind::Slash,
                TokenKind::Number(5.0),
            ]
        );
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("10 +  2").unwrap();
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 3, 6]);
    }

    #[test]
    fn test_identifier_is_invalid() {
        let err = tokenize("2 + abc").unwrap_err();
        match err {
            AnswerError::InvalidExpression { expression } => assert_eq!(expression, "abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dangling_exponent_is_not_consumed() {
        // "2e" lexes the number 2 and then fails on the stray 'e'
        let err = tokenize("2e").unwrap_err();
        assert!(matches!(err, AnswerError::InvalidExpression { ref expression } if expression == "e"));
    }

    #[test]
    fn test_lone_dot_is_invalid() {
        assert!(tokenize(".").is_err());
    }
}
