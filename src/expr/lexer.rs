//! Tokenizer for cleaned amount expressions

use crate::error::ExprError;

/// Token produced by the lexer, with its byte offset in the cleaned input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number {n}"),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
        }
    }
}

/// Characters an amount expression may contain once commas and whitespace are gone
pub fn is_allowed(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

/// Tokenize a cleaned expression.
///
/// The input must already have passed the whitelist; any other character is
/// reported rather than skipped.
pub fn tokenize(cleaned: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = cleaned.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        let kind = match b {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'0'..=b'9' | b'.' => {
                let start = pos;
                while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
                    pos += 1;
                }
                let text = &cleaned[start..pos];
                tokens.push(Token {
                    kind: TokenKind::Number(parse_number(text)?),
                    pos: start,
                });
                continue;
            }
            // pos only ever advances over ASCII, so it sits on a char boundary
            _ => match cleaned[pos..].chars().next() {
                Some(ch) => return Err(ExprError::DisallowedChar { ch, pos }),
                None => break,
            },
        };
        tokens.push(Token { kind, pos });
        pos += 1;
    }

    Ok(tokens)
}

/// Digits with at most one decimal point; "5." and ".5" are accepted
fn parse_number(text: &str) -> Result<f64, ExprError> {
    if text.matches('.').count() > 1 || text == "." {
        return Err(ExprError::MalformedNumber(text.to_string()));
    }
    text.parse::<f64>()
        .map_err(|_| ExprError::MalformedNumber(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        tokenize(s).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_operators_and_numbers() {
        assert_eq!(
            kinds("(10+5.5)*2"),
            vec![
                TokenKind::LParen,
                TokenKind::Number(10.0),
                TokenKind::Plus,
                TokenKind::Number(5.5),
                TokenKind::RParen,
                TokenKind::Star,
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("12-3").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![0, 2, 3]);
    }

    #[test]
    fn test_partial_decimals() {
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("5."), vec![TokenKind::Number(5.0)]);
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(matches!(tokenize("1.2.3"), Err(ExprError::MalformedNumber(_))));
        assert!(matches!(tokenize("."), Err(ExprError::MalformedNumber(_))));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("1e5"),
            Err(ExprError::DisallowedChar { ch: 'e', pos: 1 })
        );
        assert_eq!(
            tokenize("12\u{0663}"),
            Err(ExprError::DisallowedChar { ch: '\u{0663}', pos: 2 })
        );
    }
}
