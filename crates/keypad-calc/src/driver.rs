//! Calculator driver
//!
//! Presentation layers (the CLI, a GUI, a test harness) talk to the engine
//! through [`CalculatorDriver`]. The `verify_*` functions are behavior checks
//! written once against the trait and runnable on any implementation.

use crate::core::history::{History, HistoryEntry};
use crate::core::{CalcResult, DisplayLines, Engine};
use crate::keypad::{parse_keys, Button};

/// Abstract driver for button-level calculator interaction
pub trait CalculatorDriver {
    /// Presses one button and returns the updated display
    fn press(&mut self, button: Button) -> DisplayLines;

    /// Presses every key of a sequence such as `"12+3="`
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::UnknownKey`](crate::core::CalcError::UnknownKey)
    /// before pressing anything if the sequence holds an unknown key.
    fn press_all(&mut self, keys: &str) -> CalcResult<DisplayLines> {
        for button in parse_keys(keys)? {
            self.press(button);
        }
        Ok(self.lines())
    }

    /// Returns the current display
    fn lines(&self) -> DisplayLines;

    /// All clear
    fn clear(&mut self);

    /// Completed calculations (newest first)
    fn tape(&self) -> Vec<HistoryEntry>;
}

/// An engine plus its calculation tape
#[derive(Debug, Clone, Default)]
pub struct Session {
    engine: Engine,
    tape: History,
}

impl Session {
    /// Creates a session with an empty tape
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose tape keeps at most `max_entries`
    #[must_use]
    pub fn with_tape_capacity(max_entries: usize) -> Self {
        Self {
            engine: Engine::new(),
            tape: History::with_capacity(max_entries),
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the tape
    #[must_use]
    pub fn history(&self) -> &History {
        &self.tape
    }
}

impl CalculatorDriver for Session {
    fn press(&mut self, button: Button) -> DisplayLines {
        let had_pending = self.engine.pending().is_some();
        let lines = self.engine.press(button).clone();
        if button == Button::Equals && had_pending && self.engine.pending().is_none() {
            self.tape.record(&lines.past, &lines.current);
        }
        lines
    }

    fn lines(&self) -> DisplayLines {
        self.engine.lines().clone()
    }

    fn clear(&mut self) {
        self.engine.clear();
    }

    fn tape(&self) -> Vec<HistoryEntry> {
        self.tape.iter_rev().cloned().collect()
    }
}

// ===== Driver-level behavior checks =====

/// Verifies digit concatenation and leading-zero replacement
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.press_all("1 2 3")?.current, "123");
    driver.clear();
    assert_eq!(driver.press_all("0 5")?.current, "5");
    driver.clear();
    Ok(())
}

/// Verifies a second decimal point is ignored
pub fn verify_decimal_point<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.press_all("3 . . 4")?.current, "3.4");
    driver.clear();
    Ok(())
}

/// Verifies consecutive operators replace each other
pub fn verify_operator_replacement<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.press_all("5 + x")?.past, "5 x ");
    assert_eq!(driver.press_all("2 =")?.current, "10");
    driver.clear();
    Ok(())
}

/// Verifies equals with nothing pending changes nothing
pub fn verify_equals_without_pending<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    let before = driver.press_all("4 2")?;
    assert_eq!(driver.press(Button::Equals), before);
    driver.clear();
    Ok(())
}

/// Verifies left-to-right evaluation and chaining from a result
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.press_all("3 + 4 =")?.current, "7");
    let lines = driver.press_all("+ 2 =")?;
    assert_eq!(lines.past, "7 + 2");
    assert_eq!(lines.current, "9");
    driver.clear();
    assert_eq!(driver.press_all("2 + 3 x 4 =")?.current, "20");
    driver.clear();
    Ok(())
}

/// Verifies division by zero shows `"Error"` and AC recovers
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    let lines = driver.press_all("5 / 0 =")?;
    assert!(lines.is_error());
    assert_eq!(lines.past, "5 / ");
    driver.clear();
    assert_eq!(driver.lines(), DisplayLines::initial());
    Ok(())
}

/// Verifies the percent key divides the operand by 100
pub fn verify_percent<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.press_all("5 0 %")?.current, "0.5");
    driver.clear();
    assert_eq!(driver.press_all("2 0 0 %")?.current, "2");
    driver.clear();
    Ok(())
}

/// Verifies backspace trims the operand and is a no-op on `"0"`
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.press(Button::Backspace), DisplayLines::initial());
    assert_eq!(driver.press_all("1 2 3 <-")?.current, "12");
    driver.clear();
    Ok(())
}

/// Verifies sign toggle is its own inverse
pub fn verify_sign_toggle<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    assert_eq!(driver.press_all("1 2 . 5 +/-")?.current, "-12.5");
    assert_eq!(driver.press(Button::ToggleSign).current, "12.5");
    driver.clear();
    Ok(())
}

/// Verifies completed calculations reach the tape, newest first
pub fn verify_tape<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    driver.press_all("3 + 4 = x 2 =")?;
    let tape = driver.tape();
    assert!(tape.len() >= 2);
    assert_eq!(tape[0], HistoryEntry::new("7 x 2", "14"));
    assert_eq!(tape[1], HistoryEntry::new("3 + 4", "7"));
    driver.clear();
    Ok(())
}
