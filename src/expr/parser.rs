//! Recursive-descent evaluator for four-function arithmetic
//!
//! Grammar:
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```

use super::lexer::{Token, TokenKind};
use crate::error::ExprError;

/// Deepest parenthesis nesting accepted before evaluation gives up
pub const MAX_NESTING: usize = 256;

/// Parser state wrapping a token stream
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    end: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], input_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end: input_len,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn unexpected(&self) -> ExprError {
        match self.peek() {
            Some(tok) => ExprError::Unexpected {
                found: tok.kind.describe(),
                pos: tok.pos,
            },
            None => ExprError::Unexpected {
                found: "end of input".to_string(),
                pos: self.end,
            },
        }
    }
}

/// Evaluate a token stream produced from `input_len` bytes of cleaned input
pub fn evaluate(tokens: &[Token], input_len: usize) -> Result<f64, ExprError> {
    let mut p = Parser::new(tokens, input_len);
    let value = parse_expr(&mut p)?;
    if p.peek().is_some() {
        return Err(p.unexpected());
    }
    if !value.is_finite() {
        return Err(ExprError::NonFinite);
    }
    Ok(value)
}

fn parse_expr(p: &mut Parser) -> Result<f64, ExprError> {
    let mut left = parse_term(p)?;
    loop {
        let add = match p.peek_kind() {
            Some(TokenKind::Plus) => true,
            Some(TokenKind::Minus) => false,
            _ => break,
        };
        let op = p.advance().map(|t| t.kind);
        if p.peek_kind() == op {
            return Err(p.unexpected());
        }
        let right = parse_term(p)?;
        left = if add { left + right } else { left - right };
    }
    Ok(left)
}

fn parse_term(p: &mut Parser) -> Result<f64, ExprError> {
    let mut left = parse_unary(p)?;
    loop {
        let mul = match p.peek_kind() {
            Some(TokenKind::Star) => true,
            Some(TokenKind::Slash) => false,
            _ => break,
        };
        p.advance();
        // "**" is not part of the four-function grammar
        if matches!(p.peek_kind(), Some(TokenKind::Star)) {
            return Err(p.unexpected());
        }
        let right = parse_unary(p)?;
        left = if mul {
            left * right
        } else {
            if right == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            left / right
        };
    }
    Ok(left)
}

fn parse_unary(p: &mut Parser) -> Result<f64, ExprError> {
    let mut sign = 1.0;
    loop {
        let flip = match p.peek_kind() {
            Some(TokenKind::Minus) => true,
            Some(TokenKind::Plus) => false,
            _ => break,
        };
        let op = p.advance().map(|t| t.kind);
        // "--" and "++" read as increment/decrement, not as two signs
        if p.peek_kind() == op {
            return Err(p.unexpected());
        }
        if flip {
            sign = -sign;
        }
    }
    Ok(sign * parse_primary(p)?)
}

fn parse_primary(p: &mut Parser) -> Result<f64, ExprError> {
    match p.peek_kind() {
        Some(TokenKind::Number(n)) => {
            p.advance();
            Ok(n)
        }
        Some(TokenKind::LParen) => {
            if p.depth >= MAX_NESTING {
                return Err(ExprError::TooDeep { limit: MAX_NESTING });
            }
            p.advance();
            p.depth += 1;
            let value = parse_expr(p)?;
            p.depth -= 1;
            match p.peek_kind() {
                Some(TokenKind::RParen) => {
                    p.advance();
                    Ok(value)
                }
                None => Err(ExprError::UnclosedParen),
                Some(_) => Err(p.unexpected()),
            }
        }
        _ => Err(p.unexpected()),
    }
}
