use chrono::FixedOffset;
use fractic_server_error::ServerError;

use crate::{
    data::models::{
        amount_model::AmountModel, ref_model::RefModel, transaction_model::TransactionModel,
    },
    entities::{Loaded, RecordIssue, RecordIssueKind, Transaction},
    errors::{InvalidCsv, InvalidCsvContent},
};

use super::ledger_json_datasource::log_issues;

/// Spreadsheet exports of the transaction book, one row per transaction, in
/// entry order:
///
/// `id,type,amount,date,due_date,account,purpose,entity,added_by`
///
/// where `entity` is `project:<id>`, `vendor:<id>`, `worker:<id>` or empty.
pub(crate) trait TransactionsCsvDatasource: Send + Sync {
    fn from_string(&self, s: &str) -> Result<Loaded<Transaction>, ServerError>;
}

pub(crate) struct TransactionsCsvDatasourceImpl {
    offset: FixedOffset,
}

impl TransactionsCsvDatasourceImpl {
    pub(crate) fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

const EXPECTED_COLUMNS: usize = 9;

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Fills the matching entity slot of the model. Returns false if the column
/// is not in a recognized format.
fn assign_entity(model: &mut TransactionModel, raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return true;
    }
    let Some((kind, id)) = raw.split_once(':') else {
        return false;
    };
    let r = Some(RefModel::Id(id.trim().to_string()));
    match kind.trim().to_ascii_lowercase().as_str() {
        "project" => model.project = r,
        "vendor" => model.vendor = r,
        "worker" => model.worker = r,
        _ => return false,
    }
    true
}

impl TransactionsCsvDatasource for TransactionsCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Loaded<Transaction>, ServerError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(s.as_bytes());
        let headers = reader.headers().map_err(|e| InvalidCsv::with_debug(&e))?;
        if headers.len() < EXPECTED_COLUMNS {
            return Err(InvalidCsvContent::new(&format!(
                "expected {} columns, found {}",
                EXPECTED_COLUMNS,
                headers.len()
            )));
        }

        let mut issues = Vec::new();
        let mut records = Vec::new();
        for (i, r) in reader.records().enumerate() {
            let r = r.map_err(|e| InvalidCsv::with_debug(&e))?;

            // Extract from CSV record.
            let mut model = TransactionModel {
                id: non_empty(r.get(0)),
                kind: non_empty(r.get(1)),
                amount: AmountModel::from_raw(r.get(2).unwrap_or("")),
                date: non_empty(r.get(3)),
                due_date: non_empty(r.get(4)),
                account: non_empty(r.get(5)).map(RefModel::Id),
                purpose: non_empty(r.get(6)),
                added_by: non_empty(r.get(8)).map(RefModel::Id),
                ..Default::default()
            };
            let raw_entity = r.get(7).unwrap_or("");
            if !assign_entity(&mut model, raw_entity) {
                issues.push(RecordIssue {
                    index: i,
                    id: model.record_id(),
                    kind: RecordIssueKind::Unreadable {
                        details: format!("unrecognized entity '{}'", raw_entity),
                    },
                });
                continue;
            }

            // Build.
            if let Some(tx) = model.into_transaction(i, self.offset, None, &mut issues) {
                records.push(tx);
            }
        }

        log_issues("csv transactions", &issues);
        tracing::debug!(
            loaded = records.len(),
            issues = issues.len(),
            "csv transactions loaded"
        );
        Ok(Loaded { records, issues })
    }
}
