use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::entity_ref::EntityRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(pub(crate) String);

/// Coarse transaction type, as shown in the ledger views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Credit,
    Debit,
    Due,
}

/// Transaction type together with the data only some types carry. A due date
/// can only exist on a `Due`, so it lives inside that variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Credit,
    Debit,
    Due { due_date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    /// `None` when the source record carried no usable amount. Aggregations
    /// count such records as zero.
    pub amount: Option<Decimal>,
    /// Effective (local calendar) date.
    pub date: NaiveDate,
    pub account: Option<String>,
    pub purpose: String,
    pub entity: EntityRef,
    /// Display-only.
    pub added_by: Option<String>,
}

// --

pub fn transaction_id(id: impl Into<String>) -> TransactionId {
    TransactionId(id.into())
}

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionKind {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionKind::Credit => TransactionType::Credit,
            TransactionKind::Debit => TransactionType::Debit,
            TransactionKind::Due { .. } => TransactionType::Due,
        }
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        match self {
            TransactionKind::Due { due_date } => Some(*due_date),
            _ => None,
        }
    }
}

impl Transaction {
    fn new(id: TransactionId, kind: TransactionKind, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id,
            kind,
            amount: Some(amount),
            date,
            account: None,
            purpose: String::new(),
            entity: EntityRef::Personal,
            added_by: None,
        }
    }

    pub fn credit(id: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self::new(transaction_id(id), TransactionKind::Credit, amount, date)
    }

    pub fn debit(id: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self::new(transaction_id(id), TransactionKind::Debit, amount, date)
    }

    /// Returns `None` if the due date precedes the issue date.
    pub fn due(
        id: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        due_date: NaiveDate,
    ) -> Option<Self> {
        (due_date >= date).then(|| {
            Self::new(
                transaction_id(id),
                TransactionKind::Due { due_date },
                amount,
                date,
            )
        })
    }

    pub fn with_entity(mut self, entity: impl Into<EntityRef>) -> Self {
        self.entity = entity.into();
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }

    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}
