use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{payment::Payment, transaction::Transaction};

/// A `Due` transaction together with the payments recorded against it.
///
/// Nothing derived (paid, remaining, status) is stored here; see
/// `compute_due_aggregate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Due {
    pub(crate) transaction: Transaction,
    pub(crate) due_date: NaiveDate,
    pub(crate) payments: Vec<Payment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueStatus {
    Pending,
    PartiallyPaid,
    FullyPaid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DueAggregate {
    pub original_amount: Decimal,
    /// Sum of payment amounts (money actually paid).
    pub paid_amount: Decimal,
    /// Sum of payment discounts (amount waived).
    pub discount_amount: Decimal,
    pub remaining_amount: Decimal,
    pub status: DueStatus,
    pub is_overdue: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DueBookEntry {
    pub due: Due,
    pub aggregate: DueAggregate,
}

/// Outstanding-dues overview for a set of dues (e.g. all dues of a vendor).
#[derive(Debug, Clone, PartialEq)]
pub struct DueBook {
    /// Ordered by due date, earliest first.
    pub entries: Vec<DueBookEntry>,
    pub total_original: Decimal,
    pub total_paid: Decimal,
    pub total_discount: Decimal,
    pub total_remaining: Decimal,
    pub overdue_count: usize,
    pub overdue_remaining: Decimal,
}

// --

impl Due {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn original_amount(&self) -> Decimal {
        self.transaction.amount_or_zero()
    }
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueStatus::Pending => write!(f, "Pending"),
            DueStatus::PartiallyPaid => write!(f, "Partially Paid"),
            DueStatus::FullyPaid => write!(f, "Fully Paid"),
        }
    }
}
