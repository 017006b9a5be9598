use async_trait::async_trait;
use chrono::NaiveDate;
use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::{
    data::repositories::ledger_repository_impl::LedgerRepositoryImpl,
    domain::{
        logic::due_logic::{compute_due_aggregate, summarize_dues},
        repositories::ledger_repository::LedgerRepository,
    },
    entities::{Due, DueAggregate, DueBook, PaymentDraft, RecordIssue, SettlementOutcome},
};

#[async_trait]
pub trait SettlementUsecase: Send + Sync {
    fn due_status_from_string(
        &self,
        due_json: &str,
        payments_json: &str,
        today: NaiveDate,
    ) -> Result<(DueAggregate, Vec<RecordIssue>), ServerError>;

    fn prepare_payment_from_string(
        &self,
        due_json: &str,
        payments_json: &str,
        draft: PaymentDraft,
        today: NaiveDate,
    ) -> Result<SettlementOutcome, ServerError>;

    async fn prepare_payment_from_file<P>(
        &self,
        due_path: P,
        payments_path: P,
        draft: PaymentDraft,
        today: NaiveDate,
    ) -> Result<SettlementOutcome, ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    fn due_book_from_string(
        &self,
        dues_json: &str,
        today: NaiveDate,
    ) -> Result<(DueBook, Vec<RecordIssue>), ServerError>;
}

pub(crate) struct SettlementUsecaseImpl<
    R1 = LedgerRepositoryImpl, // Default.
> where
    R1: LedgerRepository,
{
    ledger_repository: R1,
    currency: Currency,
}

impl<R1: LedgerRepository> SettlementUsecaseImpl<R1> {
    /// Validates against the due exactly as just fetched; nothing is cached
    /// between calls.
    fn settle(
        &self,
        due: &Due,
        draft: PaymentDraft,
        today: NaiveDate,
    ) -> Result<SettlementOutcome, ServerError> {
        // The id is a placeholder; only the projection uses this payment.
        let candidate = draft.clone().into_payment("pending");
        match due.with_payment(candidate) {
            Ok(projected_due) => Ok(SettlementOutcome::Accepted {
                request_body: self.ledger_repository.payment_request_body(&draft)?,
                projected: compute_due_aggregate(&projected_due, today),
                draft,
            }),
            Err(rejection) => Ok(SettlementOutcome::Rejected {
                message: rejection.user_message(self.currency),
                rejection,
            }),
        }
    }
}

#[async_trait]
impl<R1> SettlementUsecase for SettlementUsecaseImpl<R1>
where
    R1: LedgerRepository,
{
    fn due_status_from_string(
        &self,
        due_json: &str,
        payments_json: &str,
        today: NaiveDate,
    ) -> Result<(DueAggregate, Vec<RecordIssue>), ServerError> {
        let (due, issues) = self.ledger_repository.due_from_json(due_json, payments_json)?;
        Ok((compute_due_aggregate(&due, today), issues))
    }

    fn prepare_payment_from_string(
        &self,
        due_json: &str,
        payments_json: &str,
        draft: PaymentDraft,
        today: NaiveDate,
    ) -> Result<SettlementOutcome, ServerError> {
        let (due, _) = self.ledger_repository.due_from_json(due_json, payments_json)?;
        self.settle(&due, draft, today)
    }

    async fn prepare_payment_from_file<P>(
        &self,
        due_path: P,
        payments_path: P,
        draft: PaymentDraft,
        today: NaiveDate,
    ) -> Result<SettlementOutcome, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let (due, _) = self
            .ledger_repository
            .due_from_files(due_path, payments_path)
            .await?;
        self.settle(&due, draft, today)
    }

    fn due_book_from_string(
        &self,
        dues_json: &str,
        today: NaiveDate,
    ) -> Result<(DueBook, Vec<RecordIssue>), ServerError> {
        let loaded = self.ledger_repository.dues_from_json(dues_json)?;
        Ok((summarize_dues(loaded.records, today), loaded.issues))
    }
}

impl SettlementUsecaseImpl {
    pub(crate) fn new(ledger_repository: LedgerRepositoryImpl, currency: Currency) -> Self {
        SettlementUsecaseImpl {
            ledger_repository,
            currency,
        }
    }
}
