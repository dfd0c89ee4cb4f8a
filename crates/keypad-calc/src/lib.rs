//! Keypad Calc - a button-driven decimal calculator engine
//!
//! The engine receives one event per key press (digit, decimal point,
//! operator, percent, sign toggle, equals, clear, backspace) and keeps two
//! display lines up to date: the committed left-hand context and the live
//! expression or result.
//!
//! Evaluation is strictly left to right with no precedence, on exact decimal
//! values. Division keeps ten fractional digits, rounding half away from zero.
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut engine = Engine::new();
//! for button in parse_keys("3 + 4 x 2 =").unwrap() {
//!     engine.press(button);
//! }
//! assert_eq!(engine.lines().past, "3 + 4 x 2");
//! assert_eq!(engine.lines().current, "14");
//!
//! // Division by zero shows "Error" and leaves the engine usable
//! engine.clear();
//! engine.digit(5);
//! engine.operator(Operation::Divide);
//! engine.digit(0);
//! assert_eq!(engine.equals().current, "Error");
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        CalcError, CalcResult, DisplayLines, Engine, EntryMode, Expression, Operation, Token,
    };
    pub use crate::driver::{CalculatorDriver, Session};
    pub use crate::keypad::{parse_keys, Button, Keypad};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut engine = Engine::new();
        for button in parse_keys("6 x 7 =").unwrap() {
            engine.press(button);
        }
        assert_eq!(engine.lines().current, "42");
    }

    #[test]
    fn test_session_through_prelude() {
        let mut session = Session::new();
        let lines = session.press_all("1 0 / 4 =").unwrap();
        assert_eq!(lines.current, "2.5");
        assert_eq!(session.history().last().unwrap().to_string(), "10 / 4 = 2.5");
    }

    #[test]
    fn test_keypad_drives_engine() {
        let keypad = Keypad::new();
        let mut engine = Engine::new();
        for label in ["9", "-", "4", "="] {
            let index = keypad.find_button_by_label(label).unwrap();
            engine.press(keypad.get_button(index).unwrap());
        }
        assert_eq!(engine.lines().current, "5");
    }

    #[test]
    fn test_errors_are_values() {
        assert_eq!(
            parse_keys("1 ^ 2"),
            Err(CalcError::UnknownKey("^".into()))
        );
    }
}
