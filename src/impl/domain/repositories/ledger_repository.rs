use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{Due, Loaded, PaymentDraft, RecordIssue, Transaction};

#[async_trait]
pub(crate) trait LedgerRepository: Send + Sync {
    fn transactions_from_json(&self, json: &str) -> Result<Loaded<Transaction>, ServerError>;

    fn transactions_from_csv(&self, csv: &str) -> Result<Loaded<Transaction>, ServerError>;

    fn due_from_json(
        &self,
        due_json: &str,
        payments_json: &str,
    ) -> Result<(Due, Vec<RecordIssue>), ServerError>;

    fn dues_from_json(&self, json: &str) -> Result<Loaded<Due>, ServerError>;

    /// JSON body for submitting the payment.
    fn payment_request_body(&self, draft: &PaymentDraft) -> Result<String, ServerError>;

    /// JSON or CSV, chosen by file extension.
    async fn transactions_from_file<P>(&self, path: P) -> Result<Loaded<Transaction>, ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    async fn due_from_files<P>(
        &self,
        due_path: P,
        payments_path: P,
    ) -> Result<(Due, Vec<RecordIssue>), ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}
