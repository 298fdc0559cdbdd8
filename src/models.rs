use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// One column of the medication matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum FieldName {
    Drug,
    Class,
    Route,
    Indication,
    Contra,
    Dose,
}

impl FieldName {
    pub const ALL: [FieldName; 6] = [
        FieldName::Drug,
        FieldName::Class,
        FieldName::Route,
        FieldName::Indication,
        FieldName::Contra,
        FieldName::Dose,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldName::Drug => "Drug",
            FieldName::Class => "Class",
            FieldName::Route => "Route",
            FieldName::Indication => "Indication",
            FieldName::Contra => "Contra",
            FieldName::Dose => "Dose",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldName::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown field '{}'", wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MedicationRecord {
    pub drug: String,
    pub class: String,
    pub route: String,
    pub indication: String,
    pub contra: String,
    pub dose: String,
}

impl MedicationRecord {
    pub fn new(
        drug: &str,
        class: &str,
        route: &str,
        indication: &str,
        contra: &str,
        dose: &str,
    ) -> Self {
        Self {
            drug: drug.to_string(),
            class: class.to_string(),
            route: route.to_string(),
            indication: indication.to_string(),
            contra: contra.to_string(),
            dose: dose.to_string(),
        }
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Drug => &self.drug,
            FieldName::Class => &self.class,
            FieldName::Route => &self.route,
            FieldName::Indication => &self.indication,
            FieldName::Contra => &self.contra,
            FieldName::Dose => &self.dose,
        }
    }
}

/// What the renderer asks for when starting or resetting a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfiguration {
    pub selected_fields: BTreeSet<FieldName>,
    pub row_count: usize,
}

impl QuizConfiguration {
    pub fn new(fields: impl IntoIterator<Item = FieldName>, row_count: usize) -> Self {
        Self {
            selected_fields: fields.into_iter().collect(),
            row_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuiz {
    pub rows: Vec<MedicationRecord>,
    pub quiz_fields: BTreeSet<FieldName>,
}

impl ActiveQuiz {
    pub fn is_quiz_cell(&self, row_index: usize, field: FieldName) -> bool {
        row_index < self.rows.len() && self.quiz_fields.contains(&field)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.quiz_fields.len()
    }
}

/// State of a single blank in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellEntry {
    #[default]
    Unanswered,
    /// Leading part of the true answer revealed by a hint.
    Hinted(String),
    /// A value placed from the answer pool.
    Answered(String),
}

pub const PLACEHOLDER: &str = "---";
pub const HINT_MARKER: &str = "...";

impl CellEntry {
    pub fn display_text(&self) -> String {
        match self {
            CellEntry::Unanswered => PLACEHOLDER.to_string(),
            CellEntry::Hinted(prefix) => format!("{}{}", prefix, HINT_MARKER),
            CellEntry::Answered(value) => value.clone(),
        }
    }

    pub fn is_hint(&self) -> bool {
        matches!(self, CellEntry::Hinted(_))
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            CellEntry::Answered(value) => Some(value),
            _ => None,
        }
    }
}

pub type CellKey = (usize, FieldName);
pub type UserTable = HashMap<CellKey, CellEntry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub row_index: usize,
    pub field: FieldName,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GradeResult {
    pub score: usize,
    pub total: usize,
    pub mismatches: Vec<Mismatch>,
}

impl GradeResult {
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Setup,
    Matrix,
    MatrixQuitConfirm,
    Summary,
}
