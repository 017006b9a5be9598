use fractic_server_error::define_client_error;

// IO-related.
define_client_error!(ReadError, "Error reading file.");

// Parsing-related.
define_client_error!(InvalidJson, "Invalid {payload} (invalid JSON format).", { payload: &str });
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidCsvContent, "Invalid CSV content: {details}.", { details: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoDate, "Invalid ISO date: {date}.", { date: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(
    InvalidAccountingAmount,
    "Invalid accounting amount: '{value}'.",
    { value: &str }
);
define_client_error!(
    UnknownTransactionType,
    "Unknown transaction type: '{value}' (expected Credit, Debit or Due).",
    { value: &str }
);
define_client_error!(
    InvalidUtcOffset,
    "Invalid UTC offset: {minutes} minutes.",
    { minutes: i32 }
);

// Ledger-related.
define_client_error!(
    NotADue,
    "Transaction '{id}' is not a Due and cannot carry payments.",
    { id: &str }
);
define_client_error!(
    InvalidDueRecord,
    "Due record '{id}' could not be read: {details}.",
    { id: &str, details: &str }
);
