use async_trait::async_trait;
use chrono::FixedOffset;
use fractic_server_error::{CriticalError, ServerError};

use crate::{
    data::{
        datasources::{
            ledger_json_datasource::{LedgerJsonDatasource, LedgerJsonDatasourceImpl},
            transactions_csv_datasource::{
                TransactionsCsvDatasource, TransactionsCsvDatasourceImpl,
            },
        },
        models::payment_model::PaymentRequestModel,
    },
    domain::repositories::ledger_repository::LedgerRepository,
    entities::{Due, Loaded, PaymentDraft, RecordIssue, Transaction},
    errors::ReadError,
};

pub(crate) struct LedgerRepositoryImpl<
    DS1 = LedgerJsonDatasourceImpl,     // Default.
    DS2 = TransactionsCsvDatasourceImpl, // Default.
> where
    DS1: LedgerJsonDatasource,
    DS2: TransactionsCsvDatasource,
{
    json_datasource: DS1,
    csv_datasource: DS2,
}

async fn read_to_string<P>(path: P) -> Result<String, ServerError>
where
    P: AsRef<std::path::Path>,
{
    tokio::fs::read_to_string(path.as_ref())
        .await
        .map_err(|e| ReadError::with_debug(&e))
}

fn is_csv(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

#[async_trait]
impl<DS1, DS2> LedgerRepository for LedgerRepositoryImpl<DS1, DS2>
where
    DS1: LedgerJsonDatasource,
    DS2: TransactionsCsvDatasource,
{
    fn transactions_from_json(&self, json: &str) -> Result<Loaded<Transaction>, ServerError> {
        self.json_datasource.transactions_from_string(json)
    }

    fn transactions_from_csv(&self, csv: &str) -> Result<Loaded<Transaction>, ServerError> {
        self.csv_datasource.from_string(csv)
    }

    fn due_from_json(
        &self,
        due_json: &str,
        payments_json: &str,
    ) -> Result<(Due, Vec<RecordIssue>), ServerError> {
        self.json_datasource.due_from_string(due_json, payments_json)
    }

    fn dues_from_json(&self, json: &str) -> Result<Loaded<Due>, ServerError> {
        self.json_datasource.dues_from_string(json)
    }

    fn payment_request_body(&self, draft: &PaymentDraft) -> Result<String, ServerError> {
        serde_json::to_string(&PaymentRequestModel::from(draft))
            .map_err(|e| CriticalError::with_debug("failed to serialize payment request", &e))
    }

    async fn transactions_from_file<P>(&self, path: P) -> Result<Loaded<Transaction>, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let csv = is_csv(path.as_ref());
        let content = read_to_string(path).await?;
        if csv {
            self.transactions_from_csv(&content)
        } else {
            self.transactions_from_json(&content)
        }
    }

    async fn due_from_files<P>(
        &self,
        due_path: P,
        payments_path: P,
    ) -> Result<(Due, Vec<RecordIssue>), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let (due_json, payments_json) =
            futures::try_join!(read_to_string(due_path), read_to_string(payments_path))?;
        self.due_from_json(&due_json, &payments_json)
    }
}

impl LedgerRepositoryImpl<LedgerJsonDatasourceImpl, TransactionsCsvDatasourceImpl> {
    pub(crate) fn new(offset: FixedOffset) -> Self {
        LedgerRepositoryImpl {
            json_datasource: LedgerJsonDatasourceImpl::new(offset),
            csv_datasource: TransactionsCsvDatasourceImpl::new(offset),
        }
    }
}
