use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a candidate payment cannot be recorded against a due.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentRejection {
    #[error("payment amount must be greater than zero (got {amount})")]
    InvalidAmount { amount: Decimal },

    #[error("discount cannot be negative (got {discount})")]
    InvalidDiscount { discount: Decimal },

    #[error("amount plus discount ({requested}) exceeds remaining due ({remaining})")]
    ExceedsRemaining {
        requested: Decimal,
        remaining: Decimal,
    },
}
