use std::str::FromStr;

use fractic_server_error::ServerError;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::{entities::RecordIssueKind, errors::InvalidAccountingAmount};

/// Amount as written in spreadsheets and exports: thousands separators are
/// allowed, and parentheses mean negative.
#[derive(Debug)]
pub(crate) struct AccountingAmountModel(pub Decimal);
impl FromStr for AccountingAmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.replace(",", "");
        let is_negative = raw.trim().starts_with("(") && raw.trim().ends_with(")");
        let numeric_part = raw.trim().trim_matches(|c| c == '(' || c == ')').trim();
        let amount = Decimal::from_str(numeric_part)
            .or_else(|_| Decimal::from_scientific(numeric_part))
            .map_err(|_| InvalidAccountingAmount::new(numeric_part))?;
        Ok(AccountingAmountModel(if is_negative {
            -amount
        } else {
            amount
        }))
    }
}

impl From<AccountingAmountModel> for Decimal {
    fn from(model: AccountingAmountModel) -> Self {
        model.0
    }
}

/// Amount field of a fetched record. Never fails to deserialize; whatever was
/// there is kept so the conversion step can decide how to degrade.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) enum AmountModel {
    #[default]
    Missing,
    Value(Decimal),
    Malformed(String),
}

impl AmountModel {
    pub(crate) fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return AmountModel::Missing;
        }
        match AccountingAmountModel::from_str(raw) {
            Ok(amount) => AmountModel::Value(amount.into()),
            Err(_) => AmountModel::Malformed(raw.to_string()),
        }
    }

    /// Non-negative amount, or the reason it isn't usable.
    pub(crate) fn non_negative(&self) -> Result<Decimal, RecordIssueKind> {
        match self {
            AmountModel::Missing => Err(RecordIssueKind::MissingAmount),
            AmountModel::Malformed(raw) => {
                Err(RecordIssueKind::NonNumericAmount { raw: raw.clone() })
            }
            AmountModel::Value(v) if v.is_sign_negative() && !v.is_zero() => {
                Err(RecordIssueKind::NegativeAmount { raw: v.to_string() })
            }
            AmountModel::Value(v) => Ok(*v),
        }
    }
}

impl<'de> Deserialize<'de> for AmountModel {
    fn deserialize<D>(deserializer: D) -> Result<AmountModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => AmountModel::Missing,
            Some(Value::Number(n)) => AmountModel::from_raw(&n.to_string()),
            Some(Value::String(s)) => AmountModel::from_raw(&s),
            Some(other) => AmountModel::Malformed(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AmountModel {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accounting_notation() {
        let v: Decimal = AccountingAmountModel::from_str("(1,250.50)").unwrap().into();
        assert_eq!(v, Decimal::from_str("-1250.50").unwrap());
        assert!(AccountingAmountModel::from_str("abc").is_err());
    }

    #[test]
    fn json_numbers_and_strings() {
        assert_eq!(parse("1200"), AmountModel::Value(Decimal::from(1200)));
        assert_eq!(
            parse("12.75"),
            AmountModel::Value(Decimal::from_str("12.75").unwrap())
        );
        assert_eq!(parse("\"3,000\""), AmountModel::Value(Decimal::from(3000)));
        assert_eq!(parse("null"), AmountModel::Missing);
        assert_eq!(parse("\"\""), AmountModel::Missing);
        assert_eq!(parse("\"twelve\""), AmountModel::Malformed("twelve".into()));
        assert!(matches!(parse("true"), AmountModel::Malformed(_)));
    }

    #[test]
    fn negative_values_are_not_usable() {
        assert!(matches!(
            parse("-5").non_negative(),
            Err(RecordIssueKind::NegativeAmount { .. })
        ));
        assert_eq!(parse("0").non_negative(), Ok(Decimal::ZERO));
    }
}
