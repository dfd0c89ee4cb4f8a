//! Button-driven expression engine
//!
//! One [`Engine`] owns the whole calculator state. Every input event is a
//! method that mutates that state and hands back the two display lines.
//!
//! ```text
//!              digit/.            operator
//!  AwaitingOperand ──► EnteringOperand ──► AfterOperator
//!        ▲                    │                 │ digit/.
//!        │ AC / ⌫ to "0"      │ =               ▼
//!        └────────────── ShowingResult ◄── EnteringOperand
//! ```
//!
//! Arithmetic is left to right with no precedence: each operator press folds
//! the operand just typed into the accumulator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::expression::Expression;
use crate::core::number::{self, MAX_OPERAND_DIGITS, ZERO_TEXT};
use crate::core::{CalcError, CalcResult, Operation};
use crate::keypad::Button;

/// The two strings a presentation layer shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLines {
    /// Committed left-hand context, or the expression just evaluated
    pub past: String,
    /// Live expression, the result after equals, or `"Error"`
    pub current: String,
}

impl DisplayLines {
    /// Lines of the all-clear state
    #[must_use]
    pub fn initial() -> Self {
        Self {
            past: String::new(),
            current: ZERO_TEXT.to_string(),
        }
    }

    /// Returns true if the current line shows the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current == CalcError::DISPLAY
    }
}

/// How the next key press is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryMode {
    /// The trailing operand is a placeholder; the next digit replaces it
    #[default]
    AwaitingOperand,
    /// Digits extend the trailing operand
    EnteringOperand,
    /// An operator was the last key; another operator replaces it
    AfterOperator,
    /// Equals produced a result; the next digit starts over
    ShowingResult,
}

impl EntryMode {
    /// Returns true if the next digit begins a fresh operand
    #[must_use]
    pub const fn starts_new_operand(self) -> bool {
        !matches!(self, Self::EnteringOperand)
    }
}

/// Calculator state machine
#[derive(Debug, Clone)]
pub struct Engine {
    /// Operand being edited, as typed
    operand: String,
    /// Result of every operation folded so far
    accumulator: Decimal,
    /// Operator waiting for its right-hand operand
    pending: Option<Operation>,
    /// Committed tokens (past line); non-empty iff `pending` is set
    history: Expression,
    /// Everything typed since the last equals or clear
    expression: Expression,
    mode: EntryMode,
    /// Accumulator values before each fold, for backspace over an operator
    folds: Vec<Decimal>,
    lines: DisplayLines,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine in the all-clear state
    #[must_use]
    pub fn new() -> Self {
        Self {
            operand: ZERO_TEXT.to_string(),
            accumulator: Decimal::ZERO,
            pending: None,
            history: Expression::new(),
            expression: Expression::from_operand(ZERO_TEXT),
            mode: EntryMode::AwaitingOperand,
            folds: Vec::new(),
            lines: DisplayLines::initial(),
        }
    }

    /// Returns the current display lines
    #[must_use]
    pub fn lines(&self) -> &DisplayLines {
        &self.lines
    }

    /// Returns the operand text
    #[must_use]
    pub fn operand(&self) -> &str {
        &self.operand
    }

    /// Returns the accumulator
    #[must_use]
    pub fn accumulator(&self) -> Decimal {
        self.accumulator
    }

    /// Returns the pending operation
    #[must_use]
    pub fn pending(&self) -> Option<Operation> {
        self.pending
    }

    /// Returns the entry mode
    #[must_use]
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    /// Renders the committed history
    #[must_use]
    pub fn history_line(&self) -> String {
        self.history.render()
    }

    /// Renders the live expression
    #[must_use]
    pub fn expression_line(&self) -> String {
        self.expression.render()
    }

    /// Dispatches one keypad button
    pub fn press(&mut self, button: Button) -> &DisplayLines {
        match button {
            Button::Digit(d) => self.digit(d),
            Button::Decimal => self.decimal(),
            Button::Operator(op) => self.operator(op),
            Button::Percent => self.percent(),
            Button::ToggleSign => self.toggle_sign(),
            Button::Equals => self.equals(),
            Button::Clear => self.clear(),
            Button::Backspace => self.backspace(),
        }
    }

    /// Enters digit `d` (0-9). Out-of-range values are ignored.
    pub fn digit(&mut self, d: u8) -> &DisplayLines {
        let Some(ch) = char::from_digit(u32::from(d), 10) else {
            warn!(digit = d, "ignoring out-of-range digit");
            return &self.lines;
        };
        self.clear_if_complete();

        if self.mode.starts_new_operand() {
            self.operand = ch.to_string();
        } else if number::is_bare_zero(&self.operand) {
            // "0" -> "5", "-0" -> "-5"
            self.operand.pop();
            self.operand.push(ch);
        } else if number::digit_count(&self.operand) >= MAX_OPERAND_DIGITS {
            debug!(operand = %self.operand, "operand is full");
            return &self.lines;
        } else {
            self.operand.push(ch);
        }

        self.mode = EntryMode::EnteringOperand;
        self.show_operand()
    }

    /// Enters the decimal point; a second point in one operand is ignored.
    pub fn decimal(&mut self) -> &DisplayLines {
        self.clear_if_complete();

        if self.mode.starts_new_operand() {
            self.operand = "0.".to_string();
        } else if self.operand.contains('.') {
            return &self.lines;
        } else {
            self.operand.push('.');
        }

        self.mode = EntryMode::EnteringOperand;
        self.show_operand()
    }

    /// Chooses the next operator, folding the operand just typed into the
    /// accumulator. Pressed right after another operator, it replaces that
    /// operator instead.
    pub fn operator(&mut self, op: Operation) -> &DisplayLines {
        if self.mode == EntryMode::AfterOperator {
            self.history.replace_trailing_operator(op);
            self.expression.replace_trailing_operator(op);
            debug!(%op, "operator replaced");
        } else {
            if let Some(pending) = self.pending {
                if let Err(err) = self.fold_operand(pending) {
                    return self.fail(&err);
                }
            } else {
                match number::parse_operand(&self.operand) {
                    Ok(value) => self.accumulator = value,
                    Err(err) => return self.fail(&err),
                }
                self.history = Expression::from_operand(self.operand.clone());
                self.folds.clear();
            }
            self.history.push_operator(op);
            self.expression.push_operator(op);
        }

        self.pending = Some(op);
        self.mode = EntryMode::AfterOperator;
        self.lines.past = self.history.render();
        self.refresh_current()
    }

    /// Replaces the operand with one hundredth of itself.
    pub fn percent(&mut self) -> &DisplayLines {
        if self.operand == ZERO_TEXT {
            return &self.lines;
        }
        let value = match number::parse_operand(&self.operand).and_then(number::percent_of) {
            Ok(value) => value,
            Err(err) => return self.fail(&err),
        };
        self.operand = number::to_plain_string(value);
        self.leave_operator_mode();
        self.show_operand()
    }

    /// Flips the sign of the operand.
    pub fn toggle_sign(&mut self) -> &DisplayLines {
        if self.operand == ZERO_TEXT {
            return &self.lines;
        }
        self.operand = number::toggle_sign(&self.operand);
        self.leave_operator_mode();
        self.show_operand()
    }

    /// Applies the pending operation and shows the result.
    ///
    /// Without a pending operation nothing changes. On failure the current
    /// line shows `"Error"` and the state is left as it was.
    pub fn equals(&mut self) -> &DisplayLines {
        let Some(op) = self.pending else {
            return &self.lines;
        };
        let value = match self.evaluate(op) {
            Ok(value) => value,
            Err(err) => return self.fail(&err),
        };

        let evaluated = self.expression.render();
        let result = number::to_plain_string(value);
        debug!(expression = %evaluated, %result, "calculation complete");

        self.accumulator = value;
        self.pending = None;
        self.history.clear();
        self.folds.clear();
        self.operand.clone_from(&result);
        self.expression = Expression::from_operand(result.clone());
        self.mode = EntryMode::ShowingResult;
        self.lines = DisplayLines {
            past: evaluated,
            current: result,
        };
        &self.lines
    }

    /// Resets everything to the all-clear state (AC).
    pub fn clear(&mut self) -> &DisplayLines {
        debug!("all clear");
        *self = Self::new();
        &self.lines
    }

    /// Deletes the last key's effect.
    ///
    /// Right after an operator, the operator is removed and the operand
    /// before it becomes editable again. Otherwise the last character of the
    /// operand is dropped; a single character resets it to `"0"`.
    pub fn backspace(&mut self) -> &DisplayLines {
        if self.mode == EntryMode::AfterOperator {
            return self.remove_operator();
        }

        self.operand.pop();
        if self.operand.is_empty() || self.operand == "-" {
            self.operand = ZERO_TEXT.to_string();
            if self.mode != EntryMode::ShowingResult {
                self.mode = EntryMode::AwaitingOperand;
            }
        }
        self.show_operand()
    }

    fn remove_operator(&mut self) -> &DisplayLines {
        if !self.history.ends_with_operator() || !self.expression.ends_with_operator() {
            return &self.lines;
        }
        self.history.pop_operator();
        self.expression.pop_operator();
        if let Some(restored) = self.history.pop_operand() {
            self.operand = restored;
        }

        if self.history.is_empty() {
            self.pending = None;
        } else {
            // The restored operand had been folded; undo that fold.
            self.pending = self.history.trailing_operator();
            if let Some(previous) = self.folds.pop() {
                self.accumulator = previous;
            }
        }
        debug!(operand = %self.operand, pending = ?self.pending, "operator removed");

        self.mode = EntryMode::AwaitingOperand;
        self.lines.past = self.history.render();
        self.refresh_current()
    }

    /// `accumulator op operand` without touching state
    fn evaluate(&self, op: Operation) -> CalcResult<Decimal> {
        let rhs = number::parse_operand(&self.operand)?;
        op.apply(self.accumulator, rhs)
    }

    fn fold_operand(&mut self, op: Operation) -> CalcResult<()> {
        let value = self.evaluate(op)?;
        debug!(%op, lhs = %self.accumulator, rhs = %self.operand, result = %value, "operation applied");
        self.folds.push(self.accumulator);
        self.accumulator = value;
        self.history.push_operand(self.operand.clone());
        Ok(())
    }

    fn fail(&mut self, err: &CalcError) -> &DisplayLines {
        warn!(error = %err, "operation aborted");
        self.lines.current = CalcError::DISPLAY.to_string();
        &self.lines
    }

    fn clear_if_complete(&mut self) {
        if self.mode == EntryMode::ShowingResult {
            self.clear();
        }
    }

    fn leave_operator_mode(&mut self) {
        if self.mode == EntryMode::AfterOperator {
            self.mode = EntryMode::AwaitingOperand;
        }
    }

    fn show_operand(&mut self) -> &DisplayLines {
        self.expression.set_trailing_operand(self.operand.clone());
        self.refresh_current()
    }

    fn refresh_current(&mut self) -> &DisplayLines {
        self.lines.current = self.expression.render();
        &self.lines
    }
}
