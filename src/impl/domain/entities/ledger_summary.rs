use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{entity_ref::EntityRef, record_issue::RecordIssue, transaction::Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityTotals {
    pub credits: Decimal,
    /// `Debit` and `Due` transactions, dues at their full original amount.
    pub debits: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub totals: EntityTotals,
    pub estimated_budget: Option<Decimal>,
    /// Unclamped; above 100 means over budget.
    pub budget_usage_percent: Option<Decimal>,
    /// `budget_usage_percent` clamped to the configured display cap.
    pub display_budget_usage: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// Most recently entered first.
    pub transactions: Vec<Transaction>,
    pub totals: EntityTotals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    /// Most recently entered first.
    pub transactions: Vec<Transaction>,
    pub totals: EntityTotals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityStatement {
    /// `None` for a statement over the whole book.
    pub entity: Option<EntityRef>,
    pub totals: EntityTotals,
    pub days: Vec<DayGroup>,
    pub months: Vec<MonthGroup>,
    pub issues: Vec<RecordIssue>,
}

// --

impl DayGroup {
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl MonthGroup {
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}
