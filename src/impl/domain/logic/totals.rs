use rust_decimal::Decimal;

use crate::entities::{EntityRef, EntityTotals, ProjectSummary, Transaction, TransactionKind};

/// Credits, debits and balance over the given transactions.
///
/// A `Due` counts as a debit at its full original amount as soon as it
/// exists. Payments against a due are not entity transactions and never show
/// up here. Missing amounts count as zero. Sums saturate rather than
/// overflow.
pub fn aggregate_entity_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> EntityTotals {
    let (credits, debits) = transactions.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(credits, debits), tx| match tx.kind {
            TransactionKind::Credit => (credits.saturating_add(tx.amount_or_zero()), debits),
            TransactionKind::Debit | TransactionKind::Due { .. } => {
                (credits, debits.saturating_add(tx.amount_or_zero()))
            }
        },
    );
    EntityTotals {
        credits,
        debits,
        balance: credits.saturating_sub(debits),
    }
}

pub fn transactions_for_entity<'a>(
    transactions: &'a [Transaction],
    entity: &'a EntityRef,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |tx| &tx.entity == entity)
}

/// Totals plus budget usage. Without a positive budget there is no usage
/// figure; a usage too large to represent saturates.
pub fn summarize_project<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    estimated_budget: Option<Decimal>,
    display_cap: Decimal,
) -> ProjectSummary {
    let totals = aggregate_entity_totals(transactions);
    let budget_usage_percent = estimated_budget
        .filter(|b| *b > Decimal::ZERO)
        .map(|b| {
            totals
                .debits
                .checked_div(b)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX)
                .round_dp(2)
        });
    ProjectSummary {
        totals,
        estimated_budget,
        budget_usage_percent,
        display_budget_usage: budget_usage_percent.map(|p| p.min(display_cap)),
    }
}
