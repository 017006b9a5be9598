use chrono::NaiveDate;
use fractic_server_error::ServerError;
use rust_decimal::Decimal;

use crate::{
    config::LedgerConfig,
    data::repositories::ledger_repository_impl::LedgerRepositoryImpl,
    domain::usecases::{
        settlement_usecase::{SettlementUsecase as _, SettlementUsecaseImpl},
        statement_usecase::{StatementUsecase as _, StatementUsecaseImpl},
    },
    entities::{
        DueAggregate, DueBook, EntityRef, EntityStatement, PaymentDraft, PaymentRejection,
        ProjectId, ProjectSummary, RecordIssue, SettlementOutcome,
    },
    presentation::utils::format_amount,
};

/// Entry point for the views: takes the API's payloads, returns what to show.
pub struct ContractorLedgerUtil {
    config: LedgerConfig,
    statement_usecase: StatementUsecaseImpl,
    settlement_usecase: SettlementUsecaseImpl,
}

impl ContractorLedgerUtil {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            statement_usecase: StatementUsecaseImpl::new(
                LedgerRepositoryImpl::new(config.utc_offset),
                config.budget_display_cap,
            ),
            settlement_usecase: SettlementUsecaseImpl::new(
                LedgerRepositoryImpl::new(config.utc_offset),
                config.currency,
            ),
            config,
        }
    }

    pub fn from_ron_config(ron: &str) -> Result<Self, ServerError> {
        Ok(Self::new(LedgerConfig::from_ron(ron)?))
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    // Entity views.
    // ---

    pub fn statement(
        &self,
        transactions_json: &str,
        entity: Option<&EntityRef>,
    ) -> Result<EntityStatement, ServerError> {
        self.statement_usecase
            .statement_from_string(transactions_json, entity)
    }

    pub async fn statement_from_file<P>(
        &self,
        path: P,
        entity: Option<&EntityRef>,
    ) -> Result<EntityStatement, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        self.statement_usecase
            .statement_from_file(path, entity)
            .await
    }

    pub fn project_summary(
        &self,
        transactions_json: &str,
        project: &ProjectId,
        estimated_budget: Option<Decimal>,
    ) -> Result<(ProjectSummary, Vec<RecordIssue>), ServerError> {
        self.statement_usecase
            .project_summary_from_string(transactions_json, project, estimated_budget)
    }

    // Dues.
    // ---

    pub fn due_status(
        &self,
        due_json: &str,
        payments_json: &str,
    ) -> Result<(DueAggregate, Vec<RecordIssue>), ServerError> {
        self.settlement_usecase
            .due_status_from_string(due_json, payments_json, self.today())
    }

    pub fn due_book(&self, dues_json: &str) -> Result<(DueBook, Vec<RecordIssue>), ServerError> {
        self.settlement_usecase
            .due_book_from_string(dues_json, self.today())
    }

    /// Must be called with the due and payments as freshly fetched, right
    /// before submitting.
    pub fn prepare_payment(
        &self,
        due_json: &str,
        payments_json: &str,
        draft: PaymentDraft,
    ) -> Result<SettlementOutcome, ServerError> {
        self.settlement_usecase.prepare_payment_from_string(
            due_json,
            payments_json,
            draft,
            self.today(),
        )
    }

    pub async fn prepare_payment_from_file<P>(
        &self,
        due_path: P,
        payments_path: P,
        draft: PaymentDraft,
    ) -> Result<SettlementOutcome, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        self.settlement_usecase
            .prepare_payment_from_file(due_path, payments_path, draft, self.today())
            .await
    }

    // Presentation.
    // ---

    pub fn rejection_message(&self, rejection: &PaymentRejection) -> String {
        rejection.user_message(self.config.currency)
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format_amount(amount, self.config.currency)
    }
}
