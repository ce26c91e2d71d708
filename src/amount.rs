//! Validation for the money amounts of transactions and budgets.

use crate::Error;

/// The largest amount accepted for a single transaction or budget.
///
/// Keeps totals over any realistic number of records finite.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Check that `amount` is greater than zero and at most [MAX_AMOUNT].
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if `amount` is zero, negative or not a number,
/// - or [Error::AmountTooLarge] if `amount` is greater than [MAX_AMOUNT] or infinite.
pub(crate) fn validate_amount(amount: f64) -> Result<f64, Error> {
    // Written this way so that NaN is rejected too.
    if !(amount > 0.0) {
        return Err(Error::NonPositiveAmount(amount));
    }

    if amount > MAX_AMOUNT {
        return Err(Error::AmountTooLarge(amount));
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        amount::{MAX_AMOUNT, validate_amount},
    };

    #[test]
    fn accepts_positive_amounts_up_to_max() {
        assert_eq!(validate_amount(0.01), Ok(0.01));
        assert_eq!(validate_amount(MAX_AMOUNT), Ok(MAX_AMOUNT));
    }

    #[test]
    fn rejects_non_positive_amounts() {
        assert_eq!(validate_amount(0.0), Err(Error::NonPositiveAmount(0.0)));
        assert_eq!(validate_amount(-1.0), Err(Error::NonPositiveAmount(-1.0)));
        assert!(matches!(
            validate_amount(f64::NAN),
            Err(Error::NonPositiveAmount(_))
        ));
        assert_eq!(
            validate_amount(f64::NEG_INFINITY),
            Err(Error::NonPositiveAmount(f64::NEG_INFINITY))
        );
    }

    #[test]
    fn rejects_amounts_above_max() {
        assert_eq!(
            validate_amount(MAX_AMOUNT * 2.0),
            Err(Error::AmountTooLarge(MAX_AMOUNT * 2.0))
        );
        assert_eq!(validate_amount(1e308), Err(Error::AmountTooLarge(1e308)));
        assert_eq!(
            validate_amount(f64::INFINITY),
            Err(Error::AmountTooLarge(f64::INFINITY))
        );
    }
}
