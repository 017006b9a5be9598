use chrono::NaiveDate;
use fractic_server_error::ServerError;
use rust_decimal::Decimal;

use crate::{
    entities::{
        Due, DueAggregate, DueBook, DueBookEntry, DueStatus, Payment, PaymentId,
        PaymentRejection, Transaction, TransactionKind,
    },
    errors::NotADue,
};

impl Due {
    pub fn new(transaction: Transaction, payments: Vec<Payment>) -> Result<Self, ServerError> {
        let TransactionKind::Due { due_date } = transaction.kind else {
            return Err(NotADue::new(transaction.id.as_str()));
        };
        Ok(Self {
            transaction,
            due_date,
            payments,
        })
    }

    /// Returns the due with the payment appended, after validating it against
    /// the payments currently on record.
    pub fn with_payment(&self, payment: Payment) -> Result<Due, PaymentRejection> {
        validate_payment(self, payment.amount, payment.discount)?;
        let mut payments = self.payments.clone();
        payments.push(payment);
        Ok(Due {
            transaction: self.transaction.clone(),
            due_date: self.due_date,
            payments,
        })
    }

    /// Returns the due as it stands after the given payment is deleted.
    pub fn without_payment(&self, id: &PaymentId) -> Due {
        Due {
            transaction: self.transaction.clone(),
            due_date: self.due_date,
            payments: self
                .payments
                .iter()
                .filter(|p| &p.id != id)
                .cloned()
                .collect(),
        }
    }

    pub fn remaining_amount(&self) -> Decimal {
        remaining_amount(self)
    }
}

/// Saturating sum. Fetched amounts are unbounded, so a plain `Sum` could
/// overflow.
fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn settled_total(due: &Due) -> Decimal {
    saturating_sum(due.payments.iter().map(Payment::settled_amount))
}

/// Original amount minus everything settled (paid + waived). Never negative,
/// even if the fetched payments overshoot the original amount.
pub fn remaining_amount(due: &Due) -> Decimal {
    due.original_amount()
        .saturating_sub(settled_total(due))
        .max(Decimal::ZERO)
}

pub fn compute_due_aggregate(due: &Due, reference_date: NaiveDate) -> DueAggregate {
    let original_amount = due.original_amount();
    let paid_amount = saturating_sum(due.payments.iter().map(|p| p.amount));
    let discount_amount = saturating_sum(due.payments.iter().map(|p| p.discount));
    let settled = settled_total(due);
    if settled > original_amount {
        tracing::warn!(
            due = %due.transaction.id,
            %original_amount,
            %settled,
            "payments on record exceed the original due amount"
        );
    }
    let remaining_amount = original_amount
        .saturating_sub(settled)
        .max(Decimal::ZERO);

    let status = if settled.is_zero() {
        DueStatus::Pending
    } else if remaining_amount.is_zero() {
        DueStatus::FullyPaid
    } else {
        DueStatus::PartiallyPaid
    };

    DueAggregate {
        original_amount,
        paid_amount,
        discount_amount,
        remaining_amount,
        status,
        is_overdue: due.due_date < reference_date && remaining_amount > Decimal::ZERO,
    }
}

/// Checks a candidate payment against the due's live remaining amount.
pub fn validate_payment(
    due: &Due,
    amount: Decimal,
    discount: Decimal,
) -> Result<(), PaymentRejection> {
    if amount <= Decimal::ZERO {
        return Err(PaymentRejection::InvalidAmount { amount });
    }
    if discount < Decimal::ZERO {
        return Err(PaymentRejection::InvalidDiscount { discount });
    }
    let remaining = remaining_amount(due);
    // A request too large to represent exceeds any remaining amount.
    let (requested, overflowed) = match amount.checked_add(discount) {
        Some(requested) => (requested, false),
        None => (Decimal::MAX, true),
    };
    if overflowed || requested > remaining {
        tracing::debug!(
            due = %due.transaction.id,
            %requested,
            %remaining,
            "payment rejected"
        );
        return Err(PaymentRejection::ExceedsRemaining {
            requested,
            remaining,
        });
    }
    Ok(())
}

pub fn is_overdue_due(due: &Due, reference_date: NaiveDate) -> bool {
    due.due_date < reference_date && remaining_amount(due) > Decimal::ZERO
}

pub fn summarize_dues(dues: impl IntoIterator<Item = Due>, reference_date: NaiveDate) -> DueBook {
    let mut entries: Vec<DueBookEntry> = dues
        .into_iter()
        .map(|due| DueBookEntry {
            aggregate: compute_due_aggregate(&due, reference_date),
            due,
        })
        .collect();
    // Stable, so dues sharing a due date keep their fetched order.
    entries.sort_by_key(|e| e.due.due_date);

    let mut book = DueBook {
        entries: Vec::new(),
        total_original: Decimal::ZERO,
        total_paid: Decimal::ZERO,
        total_discount: Decimal::ZERO,
        total_remaining: Decimal::ZERO,
        overdue_count: 0,
        overdue_remaining: Decimal::ZERO,
    };
    for entry in &entries {
        let a = &entry.aggregate;
        book.total_original = book.total_original.saturating_add(a.original_amount);
        book.total_paid = book.total_paid.saturating_add(a.paid_amount);
        book.total_discount = book.total_discount.saturating_add(a.discount_amount);
        book.total_remaining = book.total_remaining.saturating_add(a.remaining_amount);
        if a.is_overdue {
            book.overdue_count += 1;
            book.overdue_remaining = book.overdue_remaining.saturating_add(a.remaining_amount);
        }
    }
    book.entries = entries;
    book
}
