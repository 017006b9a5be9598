use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentId(pub(crate) String);

/// A settlement recorded against a single due. Owned by that due.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: Decimal,
    /// Waived portion. Reduces the remaining amount like `amount` does, but is
    /// not counted as money paid.
    pub discount: Decimal,
    pub account: Option<String>,
    pub date: NaiveDate,
    pub purpose: Option<String>,
}

/// A payment the user is about to submit (not yet persisted, so no id).
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub amount: Decimal,
    pub discount: Decimal,
    pub account: Option<String>,
    pub date: NaiveDate,
    pub purpose: Option<String>,
}

// --

pub fn payment_id(id: impl Into<String>) -> PaymentId {
    PaymentId(id.into())
}

impl PaymentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Payment {
    pub fn new(id: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: payment_id(id),
            amount,
            discount: Decimal::ZERO,
            account: None,
            date,
            purpose: None,
        }
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Portion of the original due this payment settles.
    /// Saturates instead of overflowing.
    pub fn settled_amount(&self) -> Decimal {
        self.amount.saturating_add(self.discount)
    }
}

impl PaymentDraft {
    pub fn new(amount: Decimal, date: NaiveDate) -> Self {
        Self {
            amount,
            discount: Decimal::ZERO,
            account: None,
            date,
            purpose: None,
        }
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    /// Materializes the draft once the backend has assigned an id.
    pub fn into_payment(self, id: impl Into<String>) -> Payment {
        Payment {
            id: payment_id(id),
            amount: self.amount,
            discount: self.discount,
            account: self.account,
            date: self.date,
            purpose: self.purpose,
        }
    }
}
