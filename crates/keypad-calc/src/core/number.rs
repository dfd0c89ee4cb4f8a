//! Decimal operand helpers
//!
//! Operands travel through the engine as text (what the user typed) and are
//! only turned into [`Decimal`] values when an operation consumes them.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{CalcError, CalcResult};

/// Fractional digits kept by division and percent
pub const DIVISION_SCALE: u32 = 10;

/// Digits an operand may hold before further digit presses are ignored
pub const MAX_OPERAND_DIGITS: usize = 28;

/// Operand text of the all-clear state
pub const ZERO_TEXT: &str = "0";

/// Parses operand text, accepting a trailing decimal point (`"12."`).
pub fn parse_operand(text: &str) -> CalcResult<Decimal> {
    let literal = text.strip_suffix('.').unwrap_or(text);
    Decimal::from_str(literal).map_err(|_| CalcError::InvalidOperand(text.to_string()))
}

/// Plain decimal notation with trailing zeros stripped (`2.50` -> `"2.5"`, `2.00` -> `"2"`).
#[must_use]
pub fn to_plain_string(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Rounds half away from zero to [`DIVISION_SCALE`] fractional digits.
#[must_use]
pub fn round_division(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DIVISION_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Exact `lhs + rhs`, or `None` when the sum needs more digits than a [`Decimal`] holds.
#[must_use]
pub fn exact_add(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let (lhs, rhs) = (lhs.normalize(), rhs.normalize());
    let scale = lhs.scale().max(rhs.scale());
    let sum = rescaled_mantissa(lhs, scale)?.checked_add(rescaled_mantissa(rhs, scale)?)?;
    from_parts(sum, scale)
}

/// Exact `lhs * rhs`, or `None` when the product needs more digits than a [`Decimal`] holds.
#[must_use]
pub fn exact_mul(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let (lhs, rhs) = (lhs.normalize(), rhs.normalize());
    let (mut a, mut b) = (lhs.mantissa(), rhs.mantissa());
    let mut scale = lhs.scale() + rhs.scale();
    // Cancel factors of ten out of the product until it fits an i128.
    loop {
        if let Some(product) = a.checked_mul(b) {
            return from_parts(product, scale);
        }
        if scale == 0 {
            return None;
        }
        if a % 10 == 0 {
            a /= 10;
        } else if b % 10 == 0 {
            b /= 10;
        } else if a % 2 == 0 && b % 5 == 0 {
            a /= 2;
            b /= 5;
        } else if a % 5 == 0 && b % 2 == 0 {
            a /= 5;
            b /= 2;
        } else {
            return None;
        }
        scale -= 1;
    }
}

fn rescaled_mantissa(value: Decimal, scale: u32) -> Option<i128> {
    10i128
        .checked_pow(scale - value.scale())
        .and_then(|factor| value.mantissa().checked_mul(factor))
}

fn from_parts(mut mantissa: i128, mut scale: u32) -> Option<Decimal> {
    while scale > 0 && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    Decimal::try_from_i128_with_scale(mantissa, scale).ok()
}

/// `value / 100`, rounded like division.
pub fn percent_of(value: Decimal) -> CalcResult<Decimal> {
    value
        .checked_div(Decimal::ONE_HUNDRED)
        .map(round_division)
        .ok_or(CalcError::Overflow)
}

/// Flips the leading minus sign of operand text.
#[must_use]
pub fn toggle_sign(text: &str) -> String {
    match text.strip_prefix('-') {
        Some(magnitude) => magnitude.to_string(),
        None => format!("-{text}"),
    }
}

/// Number of digit characters in operand text (sign and point excluded).
#[must_use]
pub fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

/// True for `"0"` and `"-0"`, the operands a new digit replaces instead of extending.
#[must_use]
pub fn is_bare_zero(text: &str) -> bool {
    text.strip_prefix('-').unwrap_or(text) == ZERO_TEXT
}
