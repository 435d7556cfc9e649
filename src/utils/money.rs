//! Conversions between wire amounts and stored minor units.
//!
//! Prices and totals are kept as integer cents in the store and exposed as
//! two-decimal `BigDecimal` values, serialized as strings such as `"25.00"`.

use bigdecimal::{BigDecimal, ToPrimitive, Zero};

/// Rounds to two places and converts to cents. `None` for negative amounts
/// or values that do not fit in an `i64`.
pub fn to_cents(amount: &BigDecimal) -> Option<i64> {
    if amount < &BigDecimal::zero() {
        return None;
    }

    (amount.round(2) * BigDecimal::from(100)).to_i64()
}

pub fn from_cents(cents: i64) -> BigDecimal {
    (BigDecimal::from(cents) / BigDecimal::from(100)).with_scale(2)
}
