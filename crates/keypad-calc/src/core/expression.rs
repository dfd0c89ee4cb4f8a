//! Token model behind the two display lines
//!
//! Both the committed history and the live expression are ordered lists of
//! operands and operators. Edits address the last token directly and the text
//! is rendered on demand, so no display string is ever searched or spliced.

use std::fmt;

use crate::core::Operation;

/// One element of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Operand text exactly as entered (`"12."`, `"-3"`)
    Operand(String),
    /// Binary operator between two operands
    Operator(Operation),
}

/// Ordered operand/operator tokens, rendered as `"3 + 4 x "`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// Creates an empty expression
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an expression holding a single operand
    #[must_use]
    pub fn from_operand(text: impl Into<String>) -> Self {
        Self {
            tokens: vec![Token::Operand(text.into())],
        }
    }

    /// Returns true if there are no tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns true if the last token is an operator
    #[must_use]
    pub fn ends_with_operator(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Operator(_)))
    }

    /// Returns the last operator if it is the final token
    #[must_use]
    pub fn trailing_operator(&self) -> Option<Operation> {
        match self.tokens.last() {
            Some(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    /// Writes `text` into the trailing operand position: replaces the last
    /// operand, or starts a new one after a trailing operator.
    pub fn set_trailing_operand(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.tokens.last_mut() {
            Some(Token::Operand(current)) => *current = text,
            _ => self.tokens.push(Token::Operand(text)),
        }
    }

    /// Appends an operand token
    pub fn push_operand(&mut self, text: impl Into<String>) {
        self.tokens.push(Token::Operand(text.into()));
    }

    /// Appends an operator token
    pub fn push_operator(&mut self, op: Operation) {
        self.tokens.push(Token::Operator(op));
    }

    /// Swaps a trailing operator in place. Returns false if the expression
    /// does not end with an operator.
    pub fn replace_trailing_operator(&mut self, op: Operation) -> bool {
        match self.tokens.last_mut() {
            Some(Token::Operator(current)) => {
                *current = op;
                true
            }
            _ => false,
        }
    }

    /// Removes and returns a trailing operator
    pub fn pop_operator(&mut self) -> Option<Operation> {
        let op = self.trailing_operator()?;
        self.tokens.pop();
        Some(op)
    }

    /// Removes and returns a trailing operand
    pub fn pop_operand(&mut self) -> Option<String> {
        match self.tokens.pop() {
            Some(Token::Operand(text)) => Some(text),
            Some(other) => {
                self.tokens.push(other);
                None
            }
            None => None,
        }
    }

    /// Removes every token
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Renders the display text
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Operand(text) => f.write_str(text)?,
                Token::Operator(op) => write!(f, " {op} ")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expression {
        let mut expr = Expression::from_operand("3");
        expr.push_operator(Operation::Add);
        expr.push_operand("4");
        expr
    }

    #[test]
    fn test_empty_renders_nothing() {
        let expr = Expression::new();
        assert!(expr.is_empty());
        assert_eq!(expr.render(), "");
    }

    #[test]
    fn test_render_with_spaced_operators() {
        let mut expr = sample();
        assert_eq!(expr.render(), "3 + 4");
        expr.push_operator(Operation::Multiply);
        assert_eq!(expr.render(), "3 + 4 x ");
    }

    #[test]
    fn test_set_trailing_operand_replaces_last_operand() {
        let mut expr = sample();
        expr.set_trailing_operand("-4");
        assert_eq!(expr.render(), "3 + -4");
    }

    #[test]
    fn test_set_trailing_operand_after_operator_appends() {
        let mut expr = Expression::from_operand("5");
        expr.push_operator(Operation::Divide);
        expr.set_trailing_operand("2");
        assert_eq!(expr.render(), "5 / 2");
    }

    #[test]
    fn test_set_trailing_operand_on_empty() {
        let mut expr = Expression::new();
        expr.set_trailing_operand("0");
        assert_eq!(expr.render(), "0");
    }

    #[test]
    fn test_replace_trailing_operator() {
        let mut expr = Expression::from_operand("5");
        expr.push_operator(Operation::Add);
        assert!(expr.replace_trailing_operator(Operation::Multiply));
        assert_eq!(expr.render(), "5 x ");
        assert!(!sample().replace_trailing_operator(Operation::Add));
    }

    #[test]
    fn test_pop_operator_only_when_trailing() {
        let mut expr = sample();
        assert_eq!(expr.pop_operator(), None);
        expr.push_operator(Operation::Subtract);
        assert_eq!(expr.pop_operator(), Some(Operation::Subtract));
        assert_eq!(expr.render(), "3 + 4");
    }

    #[test]
    fn test_pop_operand_only_when_trailing() {
        let mut expr = sample();
        assert_eq!(expr.pop_operand(), Some("4".to_string()));
        assert_eq!(expr.pop_operand(), None);
        assert_eq!(expr.render(), "3 + ");
        assert_eq!(expr.trailing_operator(), Some(Operation::Add));
    }

    #[test]
    fn test_trailing_accessors() {
        let expr = sample();
        assert_eq!(expr.trailing_operator(), None);
        assert!(!expr.ends_with_operator());
    }

    #[test]
    fn test_clear() {
        let mut expr = sample();
        expr.clear();
        assert!(expr.is_empty());
    }
}
