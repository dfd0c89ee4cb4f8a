//! Keypad buttons and layout
//!
//! Every input event the [`Engine`](crate::core::Engine) understands has a
//! [`Button`]. Key sequences typed on a terminal are parsed into buttons with
//! [`parse_keys`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Operation};

/// A calculator key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Binary operator
    Operator(Operation),
    /// Operand to percent
    Percent,
    /// Flip the operand's sign
    ToggleSign,
    /// Evaluate
    Equals,
    /// All clear
    Clear,
    /// Delete the last input
    Backspace,
}

impl Button {
    /// Face label as printed on the keypad
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Percent => "%".to_string(),
            Self::ToggleSign => "+/-".to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Backspace => "<-".to_string(),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Button {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let mut chars = key.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(d) = ch.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                return Ok(Self::Digit(d));
            }
        }
        match key {
            "." | "," => Ok(Self::Decimal),
            "%" => Ok(Self::Percent),
            "+/-" | "±" | "neg" => Ok(Self::ToggleSign),
            "=" | "enter" => Ok(Self::Equals),
            "AC" | "ac" | "C" | "c" | "clear" => Ok(Self::Clear),
            "<-" | "⌫" | "back" | "bs" => Ok(Self::Backspace),
            other => other
                .parse::<Operation>()
                .map(Self::Operator)
                .map_err(|_| CalcError::UnknownKey(other.to_string())),
        }
    }
}

/// Labels longer than one character, longest first so `+/-` wins over `+`
const WORD_KEYS: [&str; 10] = [
    "clear", "enter", "back", "+/-", "neg", "AC", "ac", "<-", "bs", "⌫",
];

/// Parses a key sequence such as `"12+3="` or `"1 2 + 3 ="`.
///
/// Whitespace separates keys but is optional.
///
/// # Errors
///
/// Returns [`CalcError::UnknownKey`] naming the first text that is not a key.
pub fn parse_keys(input: &str) -> CalcResult<Vec<Button>> {
    let mut buttons = Vec::new();
    let mut rest = input;
    while let Some(ch) = rest.chars().next() {
        if ch.is_whitespace() {
            rest = &rest[ch.len_utf8()..];
            continue;
        }
        let len = WORD_KEYS
            .iter()
            .find(|word| rest.starts_with(*word))
            .map_or(ch.len_utf8(), |word| word.len());
        buttons.push(rest[..len].parse()?);
        rest = &rest[len..];
    }
    Ok(buttons)
}

/// The keypad layout - a 5x4 grid of buttons
/// ```text
/// [ AC ] [+/-] [ % ] [ / ]
/// [ 7  ] [ 8 ] [ 9 ] [ x ]
/// [ 4  ] [ 5 ] [ 6 ] [ - ]
/// [ 1  ] [ 2 ] [ 3 ] [ + ]
/// [ .  ] [ 0 ] [<- ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<Button>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            Button::Clear,
            Button::ToggleSign,
            Button::Percent,
            Button::Operator(Operation::Divide),
            Button::Digit(7),
            Button::Digit(8),
            Button::Digit(9),
            Button::Operator(Operation::Multiply),
            Button::Digit(4),
            Button::Digit(5),
            Button::Digit(6),
            Button::Operator(Operation::Subtract),
            Button::Digit(1),
            Button::Digit(2),
            Button::Digit(3),
            Button::Operator(Operation::Add),
            Button::Decimal,
            Button::Digit(0),
            Button::Backspace,
            Button::Equals,
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<Button> {
        self.buttons.get(index).copied()
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<Button> {
        if row < self.rows && col < self.cols {
            self.get_button(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button index by label or alias
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<usize> {
        let wanted = label.parse::<Button>().ok()?;
        self.buttons.iter().position(|b| *b == wanted)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = Button> + '_ {
        self.buttons.iter().copied()
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), Button)> + '_ {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), *btn)
        })
    }

    /// Draws the grid as text, one row per line
    #[must_use]
    pub fn render_text(&self) -> String {
        self.buttons
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|b| format!("[{:^5}]", b.label()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
