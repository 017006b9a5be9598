use super::{due::DueAggregate, payment::PaymentDraft, payment_rejection::PaymentRejection};

/// Result of checking a payment before it is submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementOutcome {
    Accepted {
        draft: PaymentDraft,
        /// Body for the "record payment" request.
        request_body: String,
        /// The due as it will stand once the payment is recorded.
        projected: DueAggregate,
    },
    Rejected {
        rejection: PaymentRejection,
        /// Ready to show to the user.
        message: String,
    },
}

impl SettlementOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SettlementOutcome::Accepted { .. })
    }
}
