use chrono::{FixedOffset, NaiveDate};
use rust_decimal::Decimal;

use crate::entities::{payment_id, Payment, PaymentDraft, RecordIssue, RecordIssueKind};

use super::{
    amount_model::AmountModel,
    ref_model::RefModel,
    transaction_model::{parse_date, IssueSink},
};

/// Payment document as returned by the API.
#[derive(Debug, Default, Clone, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PaymentModel {
    /// `_id` wins over `id` when both are present.
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub id: Option<String>,
    pub amount: AmountModel,
    pub discount: AmountModel,
    pub account: Option<RefModel>,
    /// `paymentDate` wins over `date` when both are present.
    pub payment_date: Option<String>,
    pub date: Option<String>,
    pub created_at: Option<String>,
    pub purpose: Option<String>,
}

/// Body of the "record payment" request.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentRequestModel {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub payment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl PaymentModel {
    /// Payments are never dropped, since losing one would overstate what is
    /// still owed. Unusable amounts become zero; a missing date falls back to
    /// `fallback_date`.
    pub(crate) fn into_payment(
        self,
        index: usize,
        offset: FixedOffset,
        fallback_date: NaiveDate,
        issues: &mut Vec<RecordIssue>,
    ) -> Payment {
        let record_id = self.object_id.clone().or_else(|| self.id.clone());
        let mut sink = IssueSink::new(index, record_id.clone(), issues);

        let amount = self.amount.non_negative().unwrap_or_else(|kind| {
            sink.push(kind);
            Decimal::ZERO
        });
        let discount = match self.discount {
            AmountModel::Missing => Decimal::ZERO,
            ref d => d.non_negative().unwrap_or_else(|_| {
                sink.push(RecordIssueKind::InvalidDiscount {
                    raw: match d {
                        AmountModel::Malformed(raw) => raw.clone(),
                        AmountModel::Value(v) => v.to_string(),
                        AmountModel::Missing => String::new(),
                    },
                });
                Decimal::ZERO
            }),
        };
        let raw_date = self
            .payment_date
            .as_deref()
            .or(self.date.as_deref())
            .or(self.created_at.as_deref());
        let date = parse_date(raw_date, offset)
            .unwrap_or_else(|kind| {
                sink.push(RecordIssueKind::UndatedPayment {
                    raw: match kind {
                        RecordIssueKind::InvalidDate { raw } => raw,
                        _ => String::new(),
                    },
                });
                fallback_date
            });

        Payment {
            id: payment_id(record_id.unwrap_or_else(|| format!("#{}", index))),
            amount,
            discount,
            account: self.account.as_ref().and_then(RefModel::display),
            date,
            purpose: self.purpose.filter(|p| !p.trim().is_empty()),
        }
    }
}

impl From<&PaymentDraft> for PaymentRequestModel {
    fn from(draft: &PaymentDraft) -> Self {
        Self {
            amount: draft.amount,
            discount: draft.discount,
            account: draft.account.clone(),
            payment_date: draft.date.format("%Y-%m-%d").to_string(),
            purpose: draft.purpose.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn convert(json: &str) -> (Payment, Vec<RecordIssue>) {
        let model: PaymentModel = serde_json::from_str(json).unwrap();
        let mut issues = Vec::new();
        let fallback = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let offset = FixedOffset::east_opt(0).unwrap();
        let p = model.into_payment(3, offset, fallback, &mut issues);
        (p, issues)
    }

    #[test]
    fn regular_payment() {
        let (p, issues) = convert(
            r#"{"_id": "p1", "amount": "600", "discount": 25.5, "account": "acc-1",
                "paymentDate": "2024-02-03", "purpose": "first installment"}"#,
        );
        assert!(issues.is_empty());
        assert_eq!(p.amount, Decimal::from(600));
        assert_eq!(p.discount, Decimal::from_str("25.5").unwrap());
        assert_eq!(p.account.as_deref(), Some("acc-1"));
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
    }

    #[test]
    fn missing_discount_is_zero_without_issue() {
        let (p, issues) = convert(r#"{"_id": "p1", "amount": 10, "date": "2024-02-03"}"#);
        assert_eq!(p.discount, Decimal::ZERO);
        assert!(issues.is_empty());
    }

    #[test]
    fn malformed_fields_degrade() {
        let (p, issues) = convert(r#"{"_id": "p1", "amount": "ten", "discount": -4}"#);
        assert_eq!(p.amount, Decimal::ZERO);
        assert_eq!(p.discount, Decimal::ZERO);
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let kinds: Vec<_> = issues.iter().map(|i| i.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                RecordIssueKind::NonNumericAmount { raw: "ten".into() },
                RecordIssueKind::InvalidDiscount { raw: "-4".into() },
                RecordIssueKind::UndatedPayment { raw: String::new() },
            ]
        );
        assert!(issues.iter().all(|i| i.index == 3));
    }

    #[test]
    fn record_with_both_date_and_id_spellings() {
        let (p, issues) = convert(
            r#"{"_id": "p1", "id": "p1", "amount": 600, "date": "2024-01-19",
                "paymentDate": "2024-01-20"}"#,
        );
        assert!(issues.is_empty());
        assert_eq!(p.id.as_str(), "p1");
        assert_eq!(p.amount, Decimal::from(600));
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }

    #[test]
    fn request_body_shape() {
        let draft = PaymentDraft::new(
            Decimal::from(400),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        )
        .with_account("acc-2");
        let body = serde_json::to_value(PaymentRequestModel::from(&draft)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "amount": 400.0,
                "discount": 0.0,
                "account": "acc-2",
                "paymentDate": "2024-02-10",
            })
        );
    }
}
