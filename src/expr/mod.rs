//! Amount-field expressions: live comma grouping and safe arithmetic evaluation
//!
//! Users may type `2,000+3,000` or `12,000 * 2` into an amount field. The raw
//! text is whitelisted before anything is parsed, and parsing is done by a
//! small recursive-descent evaluator; nothing is ever handed to a general
//! purpose interpreter.

mod lexer;
mod parser;

use crate::error::ExprError;
use crate::format::group_digits;

pub use lexer::is_allowed;

/// Re-group every run of digits and commas with thousands separators.
///
/// Operators, parentheses, spaces and decimal points pass through untouched,
/// so the display always shows grouped numbers while the user types.
pub fn format_expr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    let mut chars = raw.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if !ch.is_ascii_digit() {
            out.push(ch);
            continue;
        }

        let mut end = start + ch.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            if next.is_ascii_digit() || next == ',' {
                end = i + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let run = &raw[start..end];
        let digits: String = run.chars().filter(|&c| c != ',').collect();
        if digits.chars().all(|c| c.is_ascii_digit()) {
            out.push_str(&group_digits(&digits));
        } else {
            out.push_str(run);
        }
    }

    out
}

/// Strip thousands separators and whitespace
fn clean(expr: &str) -> String {
    expr.chars()
        .filter(|&c| c != ',' && !c.is_whitespace())
        .collect()
}

/// Evaluate an amount expression, reporting why it failed
pub fn try_evaluate_expr(expr: &str) -> Result<f64, ExprError> {
    let cleaned = clean(expr);
    if cleaned.is_empty() {
        return Err(ExprError::Empty);
    }
    if let Some((pos, ch)) = cleaned.char_indices().find(|&(_, c)| !is_allowed(c)) {
        return Err(ExprError::DisallowedChar { ch, pos });
    }

    let tokens = lexer::tokenize(&cleaned)?;
    parser::evaluate(&tokens, cleaned.len())
}

/// Evaluate an amount expression; `None` means "keep the previous amount"
pub fn evaluate_expr(expr: &str) -> Option<f64> {
    try_evaluate_expr(expr).ok()
}

/// Transient state of an amount field while a form is open
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountInput {
    display: String,
    committed: Option<f64>,
}

impl AmountInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing amount, e.g. when editing a transaction
    pub fn with_amount(amount: f64) -> Self {
        Self {
            display: crate::format::format_number(amount),
            committed: Some(amount),
        }
    }

    /// Apply a keystroke: re-format the text and commit the value if it evaluates.
    ///
    /// Returns whether the committed amount changed.
    pub fn update(&mut self, raw: &str) -> bool {
        self.display = format_expr(raw);
        match evaluate_expr(&self.display) {
            Some(value) if self.committed != Some(value) => {
                self.committed = Some(value);
                true
            }
            _ => false,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Last amount that evaluated successfully
    pub fn committed(&self) -> Option<f64> {
        self.committed
    }

    /// Whether the current text evaluates at all
    pub fn is_valid(&self) -> bool {
        evaluate_expr(&self.display).is_some()
    }

    /// Consume the field on submit
    pub fn submit(self) -> Option<f64> {
        self.committed
    }
}
