/// A problem found in a fetched record. Issues degrade the result (the record
/// is coerced or skipped) instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    /// Position of the record in the fetched collection.
    pub index: usize,
    pub id: Option<String>,
    pub kind: RecordIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssueKind {
    /// Amount absent; counted as zero.
    MissingAmount,
    /// Amount could not be read as a number; counted as zero.
    NonNumericAmount { raw: String },
    /// Amount below zero; counted as zero.
    NegativeAmount { raw: String },
    /// Discount unreadable or negative; counted as zero.
    InvalidDiscount { raw: String },
    /// Record skipped.
    UnknownType { raw: String },
    /// Record skipped.
    MissingDate,
    /// Payment date missing or unreadable; dated on its due's issue date
    /// instead.
    UndatedPayment { raw: String },
    /// Record skipped.
    InvalidDate { raw: String },
    /// Record skipped.
    MissingDueDate,
    /// Record skipped.
    DueDateBeforeIssueDate,
    /// More than one of project/vendor/worker set; the first (in that order)
    /// is kept.
    AmbiguousEntity,
    /// Record was not an object of the expected shape. Record skipped.
    Unreadable { details: String },
}

// --

impl RecordIssueKind {
    /// Whether the record was dropped rather than coerced.
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            RecordIssueKind::UnknownType { .. }
                | RecordIssueKind::MissingDate
                | RecordIssueKind::InvalidDate { .. }
                | RecordIssueKind::MissingDueDate
                | RecordIssueKind::DueDateBeforeIssueDate
                | RecordIssueKind::Unreadable { .. }
        )
    }
}

impl std::fmt::Display for RecordIssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordIssueKind::MissingAmount => write!(f, "missing amount"),
            RecordIssueKind::NonNumericAmount { raw } => write!(f, "non-numeric amount '{raw}'"),
            RecordIssueKind::NegativeAmount { raw } => write!(f, "negative amount '{raw}'"),
            RecordIssueKind::InvalidDiscount { raw } => write!(f, "invalid discount '{raw}'"),
            RecordIssueKind::UnknownType { raw } => write!(f, "unknown transaction type '{raw}'"),
            RecordIssueKind::MissingDate => write!(f, "missing date"),
            RecordIssueKind::UndatedPayment { raw } => write!(f, "unusable payment date '{raw}'"),
            RecordIssueKind::InvalidDate { raw } => write!(f, "invalid date '{raw}'"),
            RecordIssueKind::MissingDueDate => write!(f, "due without due date"),
            RecordIssueKind::DueDateBeforeIssueDate => write!(f, "due date before issue date"),
            RecordIssueKind::AmbiguousEntity => write!(f, "more than one associated entity"),
            RecordIssueKind::Unreadable { details } => write!(f, "unreadable record: {details}"),
        }
    }
}

/// Records that loaded, plus what was wrong with the ones that didn't (or
/// loaded only after coercion).
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub issues: Vec<RecordIssue>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            issues: Vec::new(),
        }
    }
}
