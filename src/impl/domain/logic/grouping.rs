use std::collections::BTreeMap;

use chrono::{Datelike as _, NaiveDate};

use crate::entities::{DayGroup, MonthGroup, Transaction};

use super::{totals::aggregate_entity_totals, utils::month_start_date};

/// Groups transactions (given in insertion order) by key, newest-entered
/// first inside each group, groups ordered by descending key.
fn group_newest_first<K, F>(transactions: &[Transaction], key: F) -> Vec<(K, Vec<Transaction>)>
where
    K: Ord,
    F: Fn(&Transaction) -> K,
{
    transactions
        .iter()
        .rev()
        .fold(BTreeMap::<K, Vec<Transaction>>::new(), |mut groups, tx| {
            groups.entry(key(tx)).or_default().push(tx.clone());
            groups
        })
        .into_iter()
        .rev()
        .collect()
}

/// Daily feed: one group per local calendar day, most recent day first.
///
/// `transactions` must be in the order they were entered (as fetched).
pub fn group_by_calendar_day(transactions: &[Transaction]) -> Vec<DayGroup> {
    group_newest_first(transactions, |tx| tx.date)
        .into_iter()
        .map(|(date, transactions)| DayGroup {
            date,
            totals: aggregate_entity_totals(&transactions),
            transactions,
        })
        .collect()
}

/// Monthly summary, most recent month first. Same ordering rules as
/// `group_by_calendar_day`.
pub fn group_by_calendar_month(transactions: &[Transaction]) -> Vec<MonthGroup> {
    group_newest_first(transactions, |tx| month_start_date(tx.date))
        .into_iter()
        .map(|(month_start, transactions): (NaiveDate, _)| MonthGroup {
            year: month_start.year(),
            month: month_start.month(),
            totals: aggregate_entity_totals(&transactions),
            transactions,
        })
        .collect()
}
