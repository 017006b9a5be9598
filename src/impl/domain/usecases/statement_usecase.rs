use async_trait::async_trait;
use fractic_server_error::ServerError;
use rust_decimal::Decimal;

use crate::{
    data::repositories::ledger_repository_impl::LedgerRepositoryImpl,
    domain::{
        logic::{
            grouping::{group_by_calendar_day, group_by_calendar_month},
            totals::{aggregate_entity_totals, summarize_project, transactions_for_entity},
        },
        repositories::ledger_repository::LedgerRepository,
    },
    entities::{
        EntityRef, EntityStatement, Loaded, ProjectId, ProjectSummary, RecordIssue, Transaction,
    },
};

#[async_trait]
pub trait StatementUsecase: Send + Sync {
    /// Statement for one entity, or for the whole book if `entity` is `None`.
    fn statement_from_string(
        &self,
        transactions_json: &str,
        entity: Option<&EntityRef>,
    ) -> Result<EntityStatement, ServerError>;

    /// As `statement_from_string`, reading a JSON or CSV file.
    async fn statement_from_file<P>(
        &self,
        path: P,
        entity: Option<&EntityRef>,
    ) -> Result<EntityStatement, ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    fn project_summary_from_string(
        &self,
        transactions_json: &str,
        project: &ProjectId,
        estimated_budget: Option<Decimal>,
    ) -> Result<(ProjectSummary, Vec<RecordIssue>), ServerError>;
}

pub(crate) struct StatementUsecaseImpl<
    R1 = LedgerRepositoryImpl, // Default.
> where
    R1: LedgerRepository,
{
    ledger_repository: R1,
    budget_display_cap: Decimal,
}

fn build_statement(loaded: Loaded<Transaction>, entity: Option<&EntityRef>) -> EntityStatement {
    let Loaded { records, issues } = loaded;
    let scoped: Vec<Transaction> = match entity {
        Some(entity) => transactions_for_entity(&records, entity).cloned().collect(),
        None => records,
    };
    EntityStatement {
        entity: entity.cloned(),
        totals: aggregate_entity_totals(&scoped),
        days: group_by_calendar_day(&scoped),
        months: group_by_calendar_month(&scoped),
        issues,
    }
}

#[async_trait]
impl<R1> StatementUsecase for StatementUsecaseImpl<R1>
where
    R1: LedgerRepository,
{
    fn statement_from_string(
        &self,
        transactions_json: &str,
        entity: Option<&EntityRef>,
    ) -> Result<EntityStatement, ServerError> {
        let loaded = self.ledger_repository.transactions_from_json(transactions_json)?;
        Ok(build_statement(loaded, entity))
    }

    async fn statement_from_file<P>(
        &self,
        path: P,
        entity: Option<&EntityRef>,
    ) -> Result<EntityStatement, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let loaded = self.ledger_repository.transactions_from_file(path).await?;
        Ok(build_statement(loaded, entity))
    }

    fn project_summary_from_string(
        &self,
        transactions_json: &str,
        project: &ProjectId,
        estimated_budget: Option<Decimal>,
    ) -> Result<(ProjectSummary, Vec<RecordIssue>), ServerError> {
        let loaded = self.ledger_repository.transactions_from_json(transactions_json)?;
        let entity = EntityRef::from(project.clone());
        let summary = summarize_project(
            transactions_for_entity(&loaded.records, &entity),
            estimated_budget,
            self.budget_display_cap,
        );
        Ok((summary, loaded.issues))
    }
}

impl StatementUsecaseImpl {
    pub(crate) fn new(ledger_repository: LedgerRepositoryImpl, budget_display_cap: Decimal) -> Self {
        StatementUsecaseImpl {
            ledger_repository,
            budget_display_cap,
        }
    }
}
