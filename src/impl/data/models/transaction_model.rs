use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate};
use fractic_server_error::ServerError;

use crate::{
    entities::{
        project, transaction_id, vendor, worker, EntityRef, RecordIssue, RecordIssueKind,
        Transaction, TransactionKind, TransactionType,
    },
    errors::UnknownTransactionType,
};

use super::{amount_model::AmountModel, iso_date_model::ISODateModel, ref_model::RefModel};

/// Transaction document as returned by the API.
#[derive(Debug, Default, Clone, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TransactionModel {
    /// Documents may carry `_id`, `id` or both (virtuals); `_id` wins.
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: AmountModel,
    pub date: Option<String>,
    pub due_date: Option<String>,
    pub created_at: Option<String>,
    pub account: Option<RefModel>,
    pub purpose: Option<String>,
    pub project: Option<RefModel>,
    pub vendor: Option<RefModel>,
    pub worker: Option<RefModel>,
    pub added_by: Option<RefModel>,
}

/// Case-insensitive (`Credit`, `credit`, `CREDIT`).
impl FromStr for TransactionType {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            "due" => Ok(TransactionType::Due),
            _ => Err(UnknownTransactionType::new(s)),
        }
    }
}

/// Collects issues for one record, tagged with its position and id.
pub(crate) struct IssueSink<'a> {
    index: usize,
    id: Option<String>,
    issues: &'a mut Vec<RecordIssue>,
}

impl<'a> IssueSink<'a> {
    pub(crate) fn new(index: usize, id: Option<String>, issues: &'a mut Vec<RecordIssue>) -> Self {
        Self { index, id, issues }
    }

    pub(crate) fn push(&mut self, kind: RecordIssueKind) {
        self.issues.push(RecordIssue {
            index: self.index,
            id: self.id.clone(),
            kind,
        });
    }

    /// Records why the record is dropped. Always `None`.
    pub(crate) fn skip<T>(&mut self, kind: RecordIssueKind) -> Option<T> {
        self.push(kind);
        None
    }
}

pub(crate) fn parse_date(
    raw: Option<&str>,
    offset: FixedOffset,
) -> Result<NaiveDate, RecordIssueKind> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Err(RecordIssueKind::MissingDate),
        Some(s) => ISODateModel::from_str(s)
            .map(|d| d.local_date(offset))
            .map_err(|_| RecordIssueKind::InvalidDate { raw: s.to_string() }),
    }
}

impl TransactionModel {
    pub(crate) fn record_id(&self) -> Option<String> {
        self.object_id.clone().or_else(|| self.id.clone())
    }

    /// Converts to a domain transaction, degrading where possible. Returns
    /// `None` (with the reason recorded) if the record can't be used at all.
    ///
    /// `default_type` applies when the record carries no type (e.g. a due
    /// fetched from the dues endpoint).
    pub(crate) fn into_transaction(
        self,
        index: usize,
        offset: FixedOffset,
        default_type: Option<TransactionType>,
        issues: &mut Vec<RecordIssue>,
    ) -> Option<Transaction> {
        let record_id = self.record_id();
        let mut sink = IssueSink::new(index, record_id.clone(), issues);

        let transaction_type = match self.kind.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match TransactionType::from_str(raw) {
                Ok(t) => t,
                Err(_) => {
                    return sink.skip(RecordIssueKind::UnknownType {
                        raw: raw.to_string(),
                    })
                }
            },
            _ => match default_type {
                Some(t) => t,
                None => {
                    return sink.skip(RecordIssueKind::UnknownType {
                        raw: String::new(),
                    })
                }
            },
        };

        let date = match parse_date(self.date.as_deref().or(self.created_at.as_deref()), offset) {
            Ok(d) => d,
            Err(kind) => return sink.skip(kind),
        };

        let kind = match transaction_type {
            TransactionType::Credit => TransactionKind::Credit,
            TransactionType::Debit => TransactionKind::Debit,
            TransactionType::Due => {
                let due_date = match parse_date(self.due_date.as_deref(), offset) {
                    Ok(d) => d,
                    Err(RecordIssueKind::MissingDate) => {
                        return sink.skip(RecordIssueKind::MissingDueDate)
                    }
                    Err(kind) => return sink.skip(kind),
                };
                if due_date < date {
                    return sink.skip(RecordIssueKind::DueDateBeforeIssueDate);
                }
                TransactionKind::Due { due_date }
            }
        };

        let amount = match self.amount.non_negative() {
            Ok(a) => Some(a),
            Err(kind) => {
                sink.push(kind);
                None
            }
        };

        let entity = {
            let mut refs = [
                self.project
                    .as_ref()
                    .and_then(RefModel::id)
                    .map(|id| EntityRef::from(project(id))),
                self.vendor
                    .as_ref()
                    .and_then(RefModel::id)
                    .map(|id| EntityRef::from(vendor(id))),
                self.worker
                    .as_ref()
                    .and_then(RefModel::id)
                    .map(|id| EntityRef::from(worker(id))),
            ]
            .into_iter()
            .flatten();
            let first = refs.next();
            if refs.next().is_some() {
                sink.push(RecordIssueKind::AmbiguousEntity);
            }
            first.unwrap_or(EntityRef::Personal)
        };

        Some(Transaction {
            id: transaction_id(record_id.unwrap_or_else(|| format!("#{}", index))),
            kind,
            amount,
            date,
            account: self.account.as_ref().and_then(RefModel::display),
            purpose: self.purpose.unwrap_or_default(),
            entity,
            added_by: self.added_by.as_ref().and_then(RefModel::display),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    fn convert(json: &str) -> (Option<Transaction>, Vec<RecordIssue>) {
        let model: TransactionModel = serde_json::from_str(json).unwrap();
        let mut issues = Vec::new();
        let tx = model.into_transaction(0, ist(), None, &mut issues);
        (tx, issues)
    }

    #[test]
    fn full_record() {
        let (tx, issues) = convert(
            r#"{"_id": "t1", "type": "debit", "amount": 250, "date": "2024-04-02",
                "purpose": "Cement", "vendor": {"_id": "v9", "name": "Shree Traders"},
                "addedBy": {"_id": "u1", "name": "Ravi"}}"#,
        );
        let tx = tx.unwrap();
        assert!(issues.is_empty());
        assert_eq!(tx.transaction_type(), TransactionType::Debit);
        assert_eq!(tx.amount, Some(Decimal::from(250)));
        assert_eq!(tx.entity, vendor("v9").into());
        assert_eq!(tx.added_by.as_deref(), Some("Ravi"));
        assert_eq!(tx.purpose, "Cement");
    }

    #[test]
    fn bad_amount_is_coerced_with_issue() {
        let (tx, issues) = convert(r#"{"_id": "t1", "type": "Credit", "date": "2024-04-02"}"#);
        assert_eq!(tx.unwrap().amount, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, RecordIssueKind::MissingAmount);
        assert_eq!(issues[0].id.as_deref(), Some("t1"));
    }

    #[test]
    fn unknown_type_is_skipped() {
        let (tx, issues) =
            convert(r#"{"_id": "t1", "type": "refund", "amount": 5, "date": "2024-04-02"}"#);
        assert!(tx.is_none());
        assert!(issues[0].kind.is_skipped());
    }

    #[test]
    fn due_requires_valid_due_date() {
        let (tx, issues) = convert(r#"{"type": "Due", "amount": 5, "date": "2024-04-02"}"#);
        assert!(tx.is_none());
        assert_eq!(issues[0].kind, RecordIssueKind::MissingDueDate);

        let (tx, issues) = convert(
            r#"{"type": "Due", "amount": 5, "date": "2024-04-02", "dueDate": "2024-04-01"}"#,
        );
        assert!(tx.is_none());
        assert_eq!(issues[0].kind, RecordIssueKind::DueDateBeforeIssueDate);

        let (tx, _) = convert(
            r#"{"type": "Due", "amount": 5, "date": "2024-04-02", "dueDate": "2024-05-01"}"#,
        );
        assert_eq!(
            tx.unwrap().kind.due_date(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn more_than_one_entity_keeps_first() {
        let (tx, issues) = convert(
            r#"{"type": "Debit", "amount": 5, "date": "2024-04-02",
                "project": "p1", "worker": "w1"}"#,
        );
        assert_eq!(tx.unwrap().entity, project("p1").into());
        assert_eq!(issues[0].kind, RecordIssueKind::AmbiguousEntity);
    }

    #[test]
    fn timestamp_date_uses_local_day() {
        let (tx, _) = convert(
            r#"{"type": "Credit", "amount": 5, "date": "2024-04-02T20:30:00.000Z"}"#,
        );
        assert_eq!(tx.unwrap().date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
    }

    #[test]
    fn type_parsing_is_case_insensitive() {
        assert_eq!(TransactionType::from_str("CREDIT").unwrap(), TransactionType::Credit);
        assert_eq!(TransactionType::from_str(" due ").unwrap(), TransactionType::Due);
        assert!(TransactionType::from_str("loan").is_err());
    }

    #[test]
    fn both_id_keys_are_accepted() {
        let (tx, issues) = convert(
            r#"{"_id": "t1", "id": "t1", "type": "Debit", "amount": 40, "date": "2024-04-02"}"#,
        );
        assert!(issues.is_empty());
        assert_eq!(tx.unwrap().id.as_str(), "t1");

        let (tx, _) =
            convert(r#"{"id": "t2", "type": "Debit", "amount": 40, "date": "2024-04-02"}"#);
        assert_eq!(tx.unwrap().id.as_str(), "t2");
    }
}
