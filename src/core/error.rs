use crate::core::amount::Amount;
use crate::core::currency::CurrencyCode;
use crate::core::member::MemberId;
use thiserror::Error;

/// Contract violations detected while simplifying a balance graph.
///
/// None of these are recoverable inside the engine: each one means the
/// caller handed over data that would otherwise produce a wrong settlement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimplifyError {
    #[error("member {member} in {currency} balances is not in the member list")]
    UnknownMember {
        member: MemberId,
        currency: CurrencyCode,
    },
    #[error("pair {paid_by} -> {borrowed_by} appears more than once in {currency} balances")]
    DuplicatePair {
        paid_by: MemberId,
        borrowed_by: MemberId,
        currency: CurrencyCode,
    },
    #[error("{currency} balance {paid_by} -> {borrowed_by} of {amount} has mirror {mirror:?}")]
    AsymmetricBalance {
        paid_by: MemberId,
        borrowed_by: MemberId,
        currency: CurrencyCode,
        amount: Amount,
        mirror: Option<Amount>,
    },
    #[error("net imbalances must sum to zero (found {0})")]
    ImbalancedTotal(i128),
    #[error("amount {0} does not fit in a 64-bit minor-unit value")]
    AmountOverflow(i128),
    #[error("net position of member {member} in {currency} changed from {expected} to {actual}")]
    ConservationViolated {
        member: MemberId,
        currency: CurrencyCode,
        expected: i128,
        actual: i128,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asymmetric_message() {
        let err = SimplifyError::AsymmetricBalance {
            paid_by: MemberId::new(1),
            borrowed_by: MemberId::new(2),
            currency: CurrencyCode::new("USD"),
            amount: 500,
            mirror: Some(-400),
        };
        assert_eq!(
            err.to_string(),
            "USD balance 1 -> 2 of 500 has mirror Some(-400)"
        );
    }

    #[test]
    fn test_unknown_member_message() {
        let err = SimplifyError::UnknownMember {
            member: MemberId::new(9),
            currency: CurrencyCode::new("EUR"),
        };
        assert!(err.to_string().contains("member 9"));
    }
}
