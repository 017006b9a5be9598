use chrono::{FixedOffset, NaiveDate, Utc};
use fractic_server_error::ServerError;
use iso_currency::Currency;
use rust_decimal::Decimal;

use crate::errors::{InvalidIsoCurrencyCode, InvalidRon, InvalidUtcOffset};

/// Raw configuration, as written in RON. Every field is optional.
///
/// ```ron
/// (
///     currency: "INR",
///     utc_offset_minutes: 330,
///     budget_display_cap: 100,
/// )
/// ```
#[derive(Debug, Default, serde_derive::Deserialize)]
#[serde(default)]
struct LedgerConfigModel {
    currency: Option<String>,
    utc_offset_minutes: Option<i32>,
    budget_display_cap: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub currency: Currency,
    /// Offset used to turn timestamps into local calendar days, and to decide
    /// what "today" is.
    pub utc_offset: FixedOffset,
    /// Budget usage is clamped to this percentage for display.
    pub budget_display_cap: Decimal,
}

const DEFAULT_CURRENCY: Currency = Currency::INR;
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
const DEFAULT_BUDGET_DISPLAY_CAP: u32 = 100;

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY,
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
                .expect("hardcoded default offset should be valid"),
            budget_display_cap: Decimal::from(DEFAULT_BUDGET_DISPLAY_CAP),
        }
    }
}

impl LedgerConfig {
    pub fn from_ron(s: &str) -> Result<Self, ServerError> {
        let model: LedgerConfigModel =
            ron::from_str(s).map_err(|e| InvalidRon::with_debug("LedgerConfig", &e))?;

        let currency = match model.currency {
            Some(code) => Currency::from_code(&code.to_uppercase())
                .ok_or_else(|| InvalidIsoCurrencyCode::new(&code))?,
            None => DEFAULT_CURRENCY,
        };
        let minutes = model
            .utc_offset_minutes
            .unwrap_or(DEFAULT_UTC_OFFSET_MINUTES);
        let utc_offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| InvalidUtcOffset::new(minutes))?;
        let budget_display_cap = Decimal::from(
            model
                .budget_display_cap
                .unwrap_or(DEFAULT_BUDGET_DISPLAY_CAP),
        );

        Ok(Self {
            currency,
            utc_offset,
            budget_display_cap,
        })
    }

    /// Current local calendar date.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }
}
