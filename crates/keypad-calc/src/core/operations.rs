//! Binary operations applied to the accumulator

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::number::{exact_add, exact_mul, round_division, DIVISION_SCALE};
use crate::core::{CalcError, CalcResult};

/// Type-safe operation enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (x)
    Multiply,
    /// Division (/)
    Divide,
    /// Percent of the accumulator (%): `lhs * rhs / 100`
    Percent,
}

impl Operation {
    /// Operations reachable from the keypad's operator column
    pub const KEYPAD: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "x",
            Self::Divide => "/",
            Self::Percent => "%",
        }
    }

    /// Applies `lhs op rhs`.
    ///
    /// Addition, subtraction and multiplication are exact: a result that needs
    /// more digits than a [`Decimal`] holds fails with [`CalcError::PrecisionLoss`]
    /// instead of being rounded. Division and percent keep
    /// [`DIVISION_SCALE`] fractional digits, rounding half away from zero.
    pub fn apply(self, lhs: Decimal, rhs: Decimal) -> CalcResult<Decimal> {
        match self {
            Self::Add => exact_or_error(exact_add(lhs, rhs), lhs.checked_add(rhs)),
            Self::Subtract => exact_or_error(exact_add(lhs, -rhs), lhs.checked_sub(rhs)),
            Self::Multiply => exact_or_error(exact_mul(lhs, rhs), lhs.checked_mul(rhs)),
            Self::Divide => divide(lhs, rhs),
            Self::Percent => {
                let product = Self::Multiply.apply(lhs, rhs)?;
                divide(product, Decimal::ONE_HUNDRED)
            }
        }
    }
}

/// Tells an out-of-range result apart from one that only lost digits.
fn exact_or_error(exact: Option<Decimal>, rounded: Option<Decimal>) -> CalcResult<Decimal> {
    match (exact, rounded) {
        (Some(value), _) => Ok(value),
        (None, Some(_)) => Err(CalcError::PrecisionLoss),
        (None, None) => Err(CalcError::Overflow),
    }
}

fn divide(lhs: Decimal, rhs: Decimal) -> CalcResult<Decimal> {
    if rhs.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    let quotient = lhs.checked_div(rhs).ok_or(CalcError::Overflow)?;
    // A quotient short of the rounding scale is either exact or ran out of digits.
    if quotient.scale() < DIVISION_SCALE && exact_mul(quotient, rhs) != Some(lhs) {
        return Err(CalcError::PrecisionLoss);
    }
    Ok(round_division(quotient))
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "x" | "X" | "*" | "×" => Ok(Self::Multiply),
            "/" | "÷" => Ok(Self::Divide),
            "%" => Ok(Self::Percent),
            other => Err(CalcError::UnknownKey(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), "+");
        assert_eq!(Operation::Subtract.symbol(), "-");
        assert_eq!(Operation::Multiply.symbol(), "x");
        assert_eq!(Operation::Divide.symbol(), "/");
        assert_eq!(Operation::Percent.symbol(), "%");
    }

    #[test]
    fn test_operation_display_matches_symbol() {
        for op in Operation::KEYPAD {
            assert_eq!(op.to_string(), op.symbol());
        }
    }

    #[test]
    fn test_operation_from_str_aliases() {
        assert_eq!("x".parse::<Operation>().unwrap(), Operation::Multiply);
        assert_eq!("*".parse::<Operation>().unwrap(), Operation::Multiply);
        assert_eq!("÷".parse::<Operation>().unwrap(), Operation::Divide);
        assert_eq!(
            "^".parse::<Operation>(),
            Err(CalcError::UnknownKey("^".into()))
        );
    }

    #[test]
    fn test_add_subtract_multiply_exact() {
        assert_eq!(Operation::Add.apply(dec("0.1"), dec("0.2")), Ok(dec("0.3")));
        assert_eq!(
            Operation::Subtract.apply(dec("10"), dec("4.5")),
            Ok(dec("5.5"))
        );
        assert_eq!(
            Operation::Multiply.apply(dec("1.5"), dec("-4")),
            Ok(dec("-6"))
        );
    }

    #[test]
    fn test_divide_rounds_to_scale() {
        assert_eq!(
            Operation::Divide.apply(dec("10"), dec("3")),
            Ok(dec("3.3333333333"))
        );
        assert_eq!(
            Operation::Divide.apply(dec("20"), dec("4")),
            Ok(dec("5"))
        );
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::Divide.apply(dec("5"), Decimal::ZERO),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operation::Divide.apply(dec("5"), dec("0.000")),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_percent_operation() {
        assert_eq!(
            Operation::Percent.apply(dec("200"), dec("15")),
            Ok(dec("30"))
        );
        assert_eq!(
            Operation::Percent.apply(dec("1"), dec("1")),
            Ok(dec("0.01"))
        );
    }

    #[test]
    fn test_multiply_underflow_is_precision_loss() {
        let tiny = dec("0.0000000001");
        let square = Operation::Multiply.apply(tiny, tiny).unwrap();
        assert_eq!(square, dec("0.00000000000000000001"));
        assert_eq!(
            Operation::Multiply.apply(square, tiny),
            Err(CalcError::PrecisionLoss)
        );
    }

    #[test]
    fn test_add_subtract_precision_loss() {
        let tiny = dec("0.000000000000000000000000001");
        assert_eq!(
            Operation::Add.apply(tiny, dec("100")),
            Err(CalcError::PrecisionLoss)
        );
        assert_eq!(
            Operation::Subtract.apply(dec("100"), tiny),
            Err(CalcError::PrecisionLoss)
        );
        assert_eq!(
            Operation::Subtract.apply(dec("1"), tiny),
            Ok(dec("0.999999999999999999999999999"))
        );
    }

    #[test]
    fn test_divide_short_quotient_is_precision_loss() {
        let big = dec("1234567890123456789012345678");
        assert_eq!(
            Operation::Divide.apply(big, dec("7")),
            Err(CalcError::PrecisionLoss)
        );
        assert_eq!(
            Operation::Divide.apply(big, dec("2")),
            Ok(dec("617283945061728394506172839"))
        );
    }

    #[test]
    fn test_multiply_overflow() {
        assert_eq!(
            Operation::Multiply.apply(Decimal::MAX, dec("2")),
            Err(CalcError::Overflow)
        );
    }
}
