use chrono::NaiveDate;
use fractic_contractor_ledger::{
    config::LedgerConfig,
    entities::{Due, DueStatus, Payment, Transaction},
    ledger::{aggregate_entity_totals, compute_due_aggregate, remaining_amount, validate_payment},
    util::ContractorLedgerUtil,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn rupees() -> impl Strategy<Value = Decimal> {
    (0_i64..10_000_000).prop_map(|paise| Decimal::new(paise, 2))
}

fn due_with(original: Decimal, payments: Vec<(Decimal, Decimal)>) -> Due {
    let tx = Transaction::due("due", original, d(1), d(15)).unwrap();
    let payments = payments
        .into_iter()
        .enumerate()
        .map(|(i, (amount, discount))| {
            Payment::new(format!("p{}", i), amount, d(2)).with_discount(discount)
        })
        .collect();
    Due::new(tx, payments).unwrap()
}

proptest! {
    #[test]
    fn remaining_is_original_minus_settled_floored_at_zero(
        original in rupees(),
        payments in proptest::collection::vec((rupees(), rupees()), 0..6),
    ) {
        let settled: Decimal = payments.iter().map(|(a, disc)| *a + *disc).sum();
        let due = due_with(original, payments);
        let remaining = remaining_amount(&due);

        prop_assert!(remaining >= Decimal::ZERO);
        prop_assert_eq!(remaining, (original - settled).max(Decimal::ZERO));
        prop_assert_eq!(compute_due_aggregate(&due, d(10)).remaining_amount, remaining);
    }

    #[test]
    fn accepted_payments_never_overshoot(
        original in rupees(),
        attempts in proptest::collection::vec((rupees(), rupees()), 0..12),
    ) {
        let mut due = due_with(original, vec![]);
        for (i, (amount, discount)) in attempts.into_iter().enumerate() {
            let accepted = validate_payment(&due, amount, discount).is_ok();
            match due.with_payment(Payment::new(format!("p{}", i), amount, d(3)).with_discount(discount)) {
                Ok(next) => {
                    prop_assert!(accepted);
                    due = next;
                }
                Err(_) => prop_assert!(!accepted),
            }

            let agg = compute_due_aggregate(&due, d(20));
            prop_assert_eq!(agg.paid_amount + agg.discount_amount + agg.remaining_amount, original);
            prop_assert_eq!(agg.is_overdue, !agg.remaining_amount.is_zero());
        }
    }

    #[test]
    fn status_follows_settled_amount(
        original in rupees(),
        payments in proptest::collection::vec((rupees(), rupees()), 0..4),
    ) {
        let agg = compute_due_aggregate(&due_with(original, payments), d(10));
        let settled = agg.paid_amount + agg.discount_amount;
        let expected = if settled.is_zero() {
            DueStatus::Pending
        } else if agg.remaining_amount.is_zero() {
            DueStatus::FullyPaid
        } else {
            DueStatus::PartiallyPaid
        };
        prop_assert_eq!(agg.status, expected);
    }

    #[test]
    fn totals_do_not_depend_on_order(
        entries in proptest::collection::vec((0_u8..3, rupees()), 0..20),
    ) {
        let mut txs: Vec<Transaction> = entries
            .iter()
            .enumerate()
            .map(|(i, (kind, amount))| {
                let id = format!("t{}", i);
                match kind {
                    0 => Transaction::credit(id, *amount, d(1)),
                    1 => Transaction::debit(id, *amount, d(1)),
                    _ => Transaction::due(id, *amount, d(1), d(9)).unwrap(),
                }
            })
            .collect();
        let forward = aggregate_entity_totals(&txs);
        txs.reverse();
        let backward = aggregate_entity_totals(&txs);

        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward.balance, forward.credits - forward.debits);
    }

    #[test]
    fn fetched_snapshot_derives_the_same_aggregate(
        original in rupees(),
        payments in proptest::collection::vec((rupees(), rupees()), 0..5),
    ) {
        let direct = compute_due_aggregate(&due_with(original, payments.clone()), d(10));

        let due_json = json!({
            "_id": "due",
            "amount": original.to_string(),
            "date": "2024-06-01",
            "dueDate": "2024-06-15",
        })
        .to_string();
        let payments_json = serde_json::Value::Array(
            payments
                .iter()
                .enumerate()
                .map(|(i, (amount, discount))| {
                    json!({
                        "_id": format!("p{}", i),
                        "amount": amount.to_string(),
                        "discount": discount.to_string(),
                        "date": "2024-06-02",
                    })
                })
                .collect(),
        )
        .to_string();

        let util = ContractorLedgerUtil::new(LedgerConfig::default());
        let (fetched, issues) = util.due_status(&due_json, &payments_json).unwrap();
        prop_assert!(issues.is_empty());
        prop_assert_eq!(fetched.remaining_amount, direct.remaining_amount);
        prop_assert_eq!(fetched.paid_amount, direct.paid_amount);
        prop_assert_eq!(fetched.status, direct.status);
    }

    #[test]
    fn payments_against_a_due_leave_entity_totals_alone(
        credit in rupees(),
        original in rupees(),
        installments in proptest::collection::vec(rupees(), 0..6),
    ) {
        let due_tx = Transaction::due("due", original, d(1), d(15)).unwrap();
        let feed = vec![Transaction::credit("c", credit, d(1)), due_tx.clone()];
        let before = aggregate_entity_totals(&feed);

        let mut due = Due::new(due_tx, vec![]).unwrap();
        for (i, amount) in installments.into_iter().enumerate() {
            if let Ok(next) = due.with_payment(Payment::new(format!("p{}", i), amount, d(2))) {
                due = next;
            }
        }

        let feed_after = vec![feed[0].clone(), due.transaction().clone()];
        prop_assert_eq!(aggregate_entity_totals(&feed_after), before);
        prop_assert_eq!(before.debits, original);
    }
}
