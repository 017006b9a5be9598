use chrono::FixedOffset;
use fractic_server_error::ServerError;
use serde_json::Value;

use crate::{
    data::models::{payment_model::PaymentModel, transaction_model::TransactionModel},
    entities::{
        Due, Loaded, Payment, RecordIssue, RecordIssueKind, Transaction, TransactionType,
    },
    errors::{InvalidDueRecord, InvalidJson},
};

/// Reads the JSON payloads served by the bookkeeping API.
pub(crate) trait LedgerJsonDatasource: Send + Sync {
    /// Transactions, in the order the API returned them (insertion order).
    fn transactions_from_string(&self, s: &str) -> Result<Loaded<Transaction>, ServerError>;

    /// A single due (as served by the dues endpoint) and its payments.
    fn due_from_string(
        &self,
        due: &str,
        payments: &str,
    ) -> Result<(Due, Vec<RecordIssue>), ServerError>;

    /// A list of dues, each with its payments embedded under `payments`.
    fn dues_from_string(&self, s: &str) -> Result<Loaded<Due>, ServerError>;
}

pub(crate) struct LedgerJsonDatasourceImpl {
    offset: FixedOffset,
}

impl LedgerJsonDatasourceImpl {
    pub(crate) fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

/// Accepts either a bare array or an envelope of the form `{ "data": [...] }`.
fn records_array(s: &str, payload: &str) -> Result<Vec<Value>, ServerError> {
    match serde_json::from_str::<Value>(s).map_err(|e| InvalidJson::with_debug(payload, &e))? {
        Value::Array(records) => Ok(records),
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(InvalidJson::with_debug(payload, &"expected array or { data: [...] }")),
        },
        other => Err(InvalidJson::with_debug(payload, &other)),
    }
}

/// Accepts either a bare object or an envelope of the form `{ "data": {...} }`.
fn record_object(s: &str, payload: &str) -> Result<Value, ServerError> {
    match serde_json::from_str::<Value>(s).map_err(|e| InvalidJson::with_debug(payload, &e))? {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(inner @ Value::Object(_)) => Ok(inner),
            Some(other) => {
                obj.insert("data".to_string(), other);
                Ok(Value::Object(obj))
            }
            None => Ok(Value::Object(obj)),
        },
        other => Err(InvalidJson::with_debug(payload, &other)),
    }
}

fn record_id(record: &Value) -> Option<String> {
    record
        .get("_id")
        .or_else(|| record.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn unreadable(index: usize, record: &Value, e: serde_json::Error) -> RecordIssue {
    RecordIssue {
        index,
        id: record_id(record),
        kind: RecordIssueKind::Unreadable {
            details: e.to_string(),
        },
    }
}

pub(crate) fn log_issues(what: &str, issues: &[RecordIssue]) {
    for issue in issues {
        tracing::warn!(
            records = what,
            index = issue.index,
            id = issue.id.as_deref().unwrap_or("-"),
            skipped = issue.kind.is_skipped(),
            "malformed record: {}",
            issue.kind
        );
    }
}

impl LedgerJsonDatasourceImpl {
    fn payments_from_values(
        &self,
        values: Vec<Value>,
        due: &Transaction,
        issues: &mut Vec<RecordIssue>,
    ) -> Vec<Payment> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                let model = serde_json::from_value::<PaymentModel>(v.clone()).unwrap_or_else(|e| {
                    issues.push(unreadable(i, &v, e));
                    PaymentModel {
                        object_id: record_id(&v),
                        ..Default::default()
                    }
                });
                model.into_payment(i, self.offset, due.date, issues)
            })
            .collect()
    }

    fn due_from_value(
        &self,
        index: usize,
        mut record: Value,
        issues: &mut Vec<RecordIssue>,
    ) -> Option<Due> {
        let payments = match record.as_object_mut().and_then(|o| o.remove("payments")) {
            Some(Value::Array(p)) => p,
            _ => Vec::new(),
        };
        let model = match serde_json::from_value::<TransactionModel>(record.clone()) {
            Ok(m) => m,
            Err(e) => {
                issues.push(unreadable(index, &record, e));
                return None;
            }
        };
        let transaction =
            model.into_transaction(index, self.offset, Some(TransactionType::Due), issues)?;
        let mut payment_issues = Vec::new();
        let payments = self.payments_from_values(payments, &transaction, &mut payment_issues);
        // Payment issues are reported against the due that owns them.
        issues.extend(payment_issues.into_iter().map(|p| RecordIssue {
            index,
            id: Some(transaction.id.to_string()),
            kind: p.kind,
        }));
        match Due::new(transaction, payments) {
            Ok(due) => Some(due),
            Err(_) => {
                issues.push(RecordIssue {
                    index,
                    id: record_id(&record),
                    kind: RecordIssueKind::UnknownType {
                        raw: "expected Due".to_string(),
                    },
                });
                None
            }
        }
    }
}

impl LedgerJsonDatasource for LedgerJsonDatasourceImpl {
    fn transactions_from_string(&self, s: &str) -> Result<Loaded<Transaction>, ServerError> {
        let mut issues = Vec::new();
        let records = records_array(s, "transactions")?
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| match serde_json::from_value::<TransactionModel>(v.clone()) {
                Ok(model) => model.into_transaction(i, self.offset, None, &mut issues),
                Err(e) => {
                    issues.push(unreadable(i, &v, e));
                    None
                }
            })
            .collect::<Vec<_>>();
        log_issues("transactions", &issues);
        tracing::debug!(
            loaded = records.len(),
            issues = issues.len(),
            "transactions loaded"
        );
        Ok(Loaded { records, issues })
    }

    fn due_from_string(
        &self,
        due: &str,
        payments: &str,
    ) -> Result<(Due, Vec<RecordIssue>), ServerError> {
        let record = record_object(due, "due")?;
        let id = record_id(&record).unwrap_or_default();
        let model = serde_json::from_value::<TransactionModel>(record)
            .map_err(|e| InvalidDueRecord::with_debug(&id, &e.to_string(), &e))?;

        let mut issues = Vec::new();
        let transaction = model
            .into_transaction(0, self.offset, Some(TransactionType::Due), &mut issues)
            .ok_or_else(|| {
                let details = issues
                    .iter()
                    .map(|i| i.kind.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                InvalidDueRecord::new(&id, &details)
            })?;

        let payment_values = records_array(payments, "payments")?;
        let mut payment_issues = Vec::new();
        let payments = self.payments_from_values(payment_values, &transaction, &mut payment_issues);
        log_issues("due", &issues);
        log_issues("payments", &payment_issues);
        issues.extend(payment_issues);

        tracing::debug!(
            due = %transaction.id,
            payments = payments.len(),
            "due loaded"
        );
        Ok((Due::new(transaction, payments)?, issues))
    }

    fn dues_from_string(&self, s: &str) -> Result<Loaded<Due>, ServerError> {
        let mut issues = Vec::new();
        let records = records_array(s, "dues")?
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| self.due_from_value(i, v, &mut issues))
            .collect::<Vec<_>>();
        log_issues("dues", &issues);
        tracing::debug!(loaded = records.len(), issues = issues.len(), "dues loaded");
        Ok(Loaded { records, issues })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn datasource() -> LedgerJsonDatasourceImpl {
        LedgerJsonDatasourceImpl::new(FixedOffset::east_opt(330 * 60).unwrap())
    }

    #[test]
    fn bad_records_do_not_fail_the_list() {
        let loaded = datasource()
            .transactions_from_string(
                r#"[
                    {"_id": "a", "type": "Credit", "amount": 500, "date": "2024-03-01"},
                    {"_id": "b", "type": "Debit", "amount": "oops", "date": "2024-03-01"},
                    {"_id": "c", "type": "Bonus", "amount": 1, "date": "2024-03-01"},
                    "not an object"
                ]"#,
            )
            .unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[1].amount, None);
        assert_eq!(loaded.issues.len(), 3);
        assert!(matches!(
            loaded.issues[2].kind,
            RecordIssueKind::Unreadable { .. }
        ));
    }

    #[test]
    fn envelope_is_accepted() {
        let loaded = datasource()
            .transactions_from_string(
                r#"{"data": [{"_id": "a", "type": "credit", "amount": 1, "date": "2024-03-01"}]}"#,
            )
            .unwrap();
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn invalid_json_fails() {
        assert!(datasource().transactions_from_string("[{").is_err());
        assert!(datasource().transactions_from_string("42").is_err());
    }

    #[test]
    fn single_due_without_type_field() {
        let (due, issues) = datasource()
            .due_from_string(
                r#"{"_id": "d1", "amount": 1000, "date": "2024-01-05", "dueDate": "2024-02-05",
                    "vendor": "v1", "purpose": "Steel"}"#,
                r#"[{"_id": "p1", "amount": 600, "discount": 0, "date": "2024-01-20"}]"#,
            )
            .unwrap();
        assert!(issues.is_empty());
        assert_eq!(due.original_amount(), Decimal::from(1000));
        assert_eq!(due.payments().len(), 1);
        assert_eq!(due.remaining_amount(), Decimal::from(400));
    }

    #[test]
    fn documents_with_duplicate_key_spellings_keep_their_amounts() {
        let (due, issues) = datasource()
            .due_from_string(
                r#"{"_id": "d1", "id": "d1", "amount": 1000, "date": "2024-01-05",
                    "dueDate": "2024-02-05"}"#,
                r#"[{"_id": "p1", "id": "p1", "amount": 600, "date": "2024-01-20",
                     "paymentDate": "2024-01-20"}]"#,
            )
            .unwrap();
        assert!(issues.is_empty());
        assert_eq!(due.transaction().id.as_str(), "d1");
        assert_eq!(due.remaining_amount(), Decimal::from(400));

        let loaded = datasource()
            .transactions_from_string(
                r#"[{"_id": "a", "id": "a", "type": "Debit", "amount": 70, "date": "2024-03-01"}]"#,
            )
            .unwrap();
        assert!(loaded.issues.is_empty());
        assert_eq!(loaded.records[0].amount, Some(Decimal::from(70)));
    }

    #[test]
    fn single_due_that_is_not_a_due_fails() {
        let res = datasource().due_from_string(
            r#"{"_id": "d1", "type": "Debit", "amount": 10, "date": "2024-01-05"}"#,
            "[]",
        );
        assert!(res.is_err());
    }

    #[test]
    fn single_due_with_bad_due_date_fails() {
        let res = datasource().due_from_string(
            r#"{"_id": "d1", "amount": 10, "date": "2024-01-05", "dueDate": "2024-01-01"}"#,
            "[]",
        );
        assert!(res.is_err());
    }

    #[test]
    fn due_list_with_embedded_payments() {
        let loaded = datasource()
            .dues_from_string(
                r#"[
                    {"_id": "d1", "type": "Due", "amount": 300, "date": "2024-01-05",
                     "dueDate": "2024-02-05", "payments": [{"_id": "p1", "amount": 100, "date": "2024-01-10"}]},
                    {"_id": "d2", "type": "Due", "amount": 50, "date": "2024-01-05"},
                    {"_id": "d3", "amount": 80, "date": "2024-01-06", "dueDate": "2024-01-30",
                     "payments": [{"_id": "p2", "amount": "bad"}]}
                ]"#,
            )
            .unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].remaining_amount(), Decimal::from(200));
        assert_eq!(loaded.records[1].payments()[0].amount, Decimal::ZERO);
        let d2_issue = loaded.issues.iter().find(|i| i.index == 1).unwrap();
        assert_eq!(d2_issue.kind, RecordIssueKind::MissingDueDate);
        assert!(loaded
            .issues
            .iter()
            .any(|i| i.id.as_deref() == Some("d3")
                && matches!(i.kind, RecordIssueKind::NonNumericAmount { .. })));
    }
}
