use iso_currency::Currency;

use crate::entities::PaymentRejection;

use super::utils::format_amount;

impl PaymentRejection {
    /// Message shown next to the payment form.
    pub(crate) fn user_message(&self, currency: Currency) -> String {
        match self {
            PaymentRejection::InvalidAmount { .. } => {
                "Payment amount must be greater than zero.".to_string()
            }
            PaymentRejection::InvalidDiscount { .. } => "Discount cannot be negative.".to_string(),
            PaymentRejection::ExceedsRemaining { remaining, .. } if remaining.is_zero() => {
                "This due is already fully paid.".to_string()
            }
            PaymentRejection::ExceedsRemaining { remaining, .. } => format!(
                "Total payment cannot exceed {} remaining.",
                format_amount(*remaining, currency)
            ),
        }
    }
}
