//! Integer money helpers.
//!
//! Amounts travel as `i64` minor units (cents for USD). Anything that sums
//! more than one amount works in `i128` and narrows back with [`narrow`],
//! so an overflow surfaces as an error instead of a wrapped balance.

use crate::core::error::SimplifyError;
use rust_decimal::Decimal;

/// Signed amount in a currency's minor unit.
pub type Amount = i64;

/// Convert a wide intermediate value back to the wire amount type.
pub fn narrow(value: i128) -> Result<Amount, SimplifyError> {
    Amount::try_from(value).map_err(|_| SimplifyError::AmountOverflow(value))
}

/// Render minor units as a decimal in major units, e.g. `1050` with two
/// digits becomes `10.50`. Display only; never fed back into the engine.
/// `digits` must not exceed 28.
pub fn to_major_units(amount: Amount, digits: u32) -> Decimal {
    Decimal::new(amount, digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_narrow_in_range() {
        assert_eq!(narrow(-42).unwrap(), -42);
        assert_eq!(narrow(i64::MAX as i128).unwrap(), i64::MAX);
    }

    #[test]
    fn test_narrow_overflow() {
        let too_big = i64::MAX as i128 + 1;
        assert!(matches!(
            narrow(too_big),
            Err(SimplifyError::AmountOverflow(v)) if v == too_big
        ));
    }

    #[test]
    fn test_major_units() {
        assert_eq!(to_major_units(1050, 2), dec!(10.50));
        assert_eq!(to_major_units(1050, 2).to_string(), "10.50");
        assert_eq!(to_major_units(-7, 2).to_string(), "-0.07");
        assert_eq!(to_major_units(1200, 0).to_string(), "1200");
    }
}
