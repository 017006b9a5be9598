// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod ledger_json_datasource;
        pub(crate) mod transactions_csv_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod amount_model;
        pub(crate) mod iso_date_model;
        pub(crate) mod payment_model;
        pub(crate) mod ref_model;
        pub(crate) mod transaction_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod ledger_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod due;
        pub(crate) mod entity_ref;
        pub(crate) mod ledger_summary;
        pub(crate) mod payment;
        pub(crate) mod payment_rejection;
        pub(crate) mod record_issue;
        pub(crate) mod settlement;
        pub(crate) mod transaction;
    }
    pub(crate) mod logic {
        pub(crate) mod due_logic;
        pub(crate) mod grouping;
        pub(crate) mod totals;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod ledger_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod settlement_usecase;
        pub(crate) mod statement_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod rejection_fmt;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::due::*;
        pub use crate::domain::entities::entity_ref::*;
        pub use crate::domain::entities::ledger_summary::*;
        pub use crate::domain::entities::payment::*;
        pub use crate::domain::entities::payment_rejection::*;
        pub use crate::domain::entities::record_issue::*;
        pub use crate::domain::entities::settlement::*;
        pub use crate::domain::entities::transaction::*;
    }

    /// Pure ledger computations. Callers pass in freshly fetched records;
    /// nothing is cached between calls.
    pub mod ledger {
        pub use crate::domain::logic::due_logic::{
            compute_due_aggregate, is_overdue_due, remaining_amount, summarize_dues,
            validate_payment,
        };
        pub use crate::domain::logic::grouping::{group_by_calendar_day, group_by_calendar_month};
        pub use crate::domain::logic::totals::{
            aggregate_entity_totals, summarize_project, transactions_for_entity,
        };
    }

    pub mod usecases {
        pub use crate::domain::usecases::settlement_usecase::SettlementUsecase;
        pub use crate::domain::usecases::statement_usecase::StatementUsecase;
    }
}
