//! The matrix quiz state machine: configure, pick, place, hint, grade.
//!
//! The engine knows nothing about rendering. A renderer drives it one
//! operation at a time and redraws from the accessors.

use crate::catalog::builtin_catalog;
use crate::error::QuizError;
use crate::logger;
use crate::models::{
    ActiveQuiz, CellEntry, FieldName, GradeResult, MedicationRecord, Mismatch, QuizConfiguration,
    UserTable,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

const MIN_HINT_CHARS: usize = 3;

/// How much of an answer a hint reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum HintPolicy {
    /// max(3, 30% of the answer) characters.
    #[default]
    Proportional,
    /// A fixed number of characters.
    Fixed(usize),
}

impl HintPolicy {
    /// Number of characters to reveal for an answer of `answer_len` characters.
    /// Never the whole answer.
    pub fn prefix_len(self, answer_len: usize) -> usize {
        let wanted = match self {
            HintPolicy::Proportional => MIN_HINT_CHARS.max(answer_len * 3 / 10),
            HintPolicy::Fixed(n) => n,
        };
        wanted.min(answer_len.saturating_sub(1))
    }
}

impl FromStr for HintPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "proportional" {
            return Ok(HintPolicy::Proportional);
        }
        match s.strip_prefix("fixed") {
            Some("") => Ok(HintPolicy::Fixed(MIN_HINT_CHARS)),
            Some(rest) => rest
                .trim_start_matches(':')
                .parse()
                .map(HintPolicy::Fixed)
                .map_err(|_| format!("invalid fixed hint length in '{}'", s)),
            None => Err(format!("unknown hint policy '{}'", s)),
        }
    }
}

impl TryFrom<String> for HintPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone)]
pub struct QuizEngine {
    catalog: Cow<'static, [MedicationRecord]>,
    hint_policy: HintPolicy,
    active: Option<ActiveQuiz>,
    user_table: UserTable,
    selected_piece: Option<String>,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEngine {
    /// Engine over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: Cow::Borrowed(builtin_catalog()),
            hint_policy: HintPolicy::default(),
            active: None,
            user_table: UserTable::new(),
            selected_piece: None,
        }
    }

    /// Engine over a caller-supplied catalog, e.g. one loaded from a deck file.
    pub fn with_catalog(catalog: Vec<MedicationRecord>) -> Self {
        Self {
            catalog: Cow::Owned(catalog),
            ..Self::new()
        }
    }

    pub fn with_hint_policy(mut self, hint_policy: HintPolicy) -> Self {
        self.hint_policy = hint_policy;
        self
    }

    pub fn catalog(&self) -> &[MedicationRecord] {
        &self.catalog
    }

    pub fn hint_policy(&self) -> HintPolicy {
        self.hint_policy
    }

    pub fn active_quiz(&self) -> Option<&ActiveQuiz> {
        self.active.as_ref()
    }

    pub fn user_table(&self) -> &UserTable {
        &self.user_table
    }

    pub fn selected_piece(&self) -> Option<&str> {
        self.selected_piece.as_deref()
    }

    pub fn cell(&self, row_index: usize, field: FieldName) -> &CellEntry {
        static UNANSWERED: CellEntry = CellEntry::Unanswered;
        self.user_table
            .get(&(row_index, field))
            .unwrap_or(&UNANSWERED)
    }

    pub fn configure(&mut self, config: &QuizConfiguration) -> Result<&ActiveQuiz, QuizError> {
        self.configure_with_rng(config, &mut rand::thread_rng())
    }

    /// Starts a new quiz drawing rows with the given random source.
    pub fn configure_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: &QuizConfiguration,
        rng: &mut R,
    ) -> Result<&ActiveQuiz, QuizError> {
        self.validate_fields(&config.selected_fields)?;
        if config.row_count == 0 || config.row_count > self.catalog.len() {
            return Err(QuizError::InvalidConfiguration(format!(
                "row count {} is outside 1..={}",
                config.row_count,
                self.catalog.len()
            )));
        }

        let rows = self
            .catalog
            .choose_multiple(rng, config.row_count)
            .cloned()
            .collect();
        Ok(self.start(rows, config.selected_fields.clone()))
    }

    /// Starts a new quiz over explicitly chosen catalog rows, in the given order.
    pub fn configure_with_rows(
        &mut self,
        fields: impl IntoIterator<Item = FieldName>,
        row_indices: &[usize],
    ) -> Result<&ActiveQuiz, QuizError> {
        let quiz_fields: BTreeSet<FieldName> = fields.into_iter().collect();
        self.validate_fields(&quiz_fields)?;
        if row_indices.is_empty() {
            return Err(QuizError::InvalidConfiguration(
                "at least one row is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for &index in row_indices {
            if index >= self.catalog.len() {
                return Err(QuizError::InvalidConfiguration(format!(
                    "row {} is not in the catalog",
                    index
                )));
            }
            if !seen.insert(index) {
                return Err(QuizError::InvalidConfiguration(format!(
                    "row {} chosen twice",
                    index
                )));
            }
        }

        let rows = row_indices
            .iter()
            .map(|&index| self.catalog[index].clone())
            .collect();
        Ok(self.start(rows, quiz_fields))
    }

    fn validate_fields(&self, fields: &BTreeSet<FieldName>) -> Result<(), QuizError> {
        if fields.is_empty() {
            return Err(QuizError::InvalidConfiguration(
                "select at least one column".to_string(),
            ));
        }
        Ok(())
    }

    fn start(&mut self, rows: Vec<MedicationRecord>, quiz_fields: BTreeSet<FieldName>) -> &ActiveQuiz {
        logger::log(&format!(
            "Starting quiz: {} rows, fields {:?}",
            rows.len(),
            quiz_fields
        ));
        self.user_table.clear();
        self.selected_piece = None;
        self.active.insert(ActiveQuiz { rows, quiz_fields })
    }

    /// Picks up a pool value. The last pick wins.
    pub fn pick_from_pool(&mut self, value: impl Into<String>) {
        self.selected_piece = Some(value.into());
    }

    fn check_cell(&self, row_index: usize, field: FieldName) -> Result<(), QuizError> {
        match &self.active {
            Some(quiz) if quiz.is_quiz_cell(row_index, field) => Ok(()),
            _ => Err(QuizError::InvalidCell { row_index, field }),
        }
    }

    /// Drops the selected piece into a blank. Without a selection this does nothing.
    pub fn place_at(&mut self, row_index: usize, field: FieldName) -> Result<(), QuizError> {
        self.check_cell(row_index, field)?;
        if let Some(piece) = self.selected_piece.take() {
            self.user_table
                .insert((row_index, field), CellEntry::Answered(piece));
        }
        Ok(())
    }

    pub fn clear_cell(&mut self, row_index: usize, field: FieldName) -> Result<(), QuizError> {
        self.check_cell(row_index, field)?;
        self.user_table.remove(&(row_index, field));
        Ok(())
    }

    /// Reveals the start of every blank that has no placed value.
    /// Placed values, right or wrong, are left alone.
    pub fn request_hint(&mut self) {
        let Some(quiz) = &self.active else {
            return;
        };

        let mut hinted = 0;
        for (row_index, record) in quiz.rows.iter().enumerate() {
            for &field in &quiz.quiz_fields {
                let key = (row_index, field);
                if let Some(CellEntry::Answered(_)) = self.user_table.get(&key) {
                    continue;
                }
                let truth = record.get(field);
                let len = self.hint_policy.prefix_len(truth.chars().count());
                let prefix: String = truth.chars().take(len).collect();
                self.user_table.insert(key, CellEntry::Hinted(prefix));
                hinted += 1;
            }
        }
        logger::log(&format!("Hint requested: {} cells hinted", hinted));
    }

    pub fn grade(&self) -> GradeResult {
        let Some(quiz) = &self.active else {
            return GradeResult::default();
        };

        let mut score = 0;
        let mut mismatches = Vec::new();
        for (row_index, record) in quiz.rows.iter().enumerate() {
            for &field in &quiz.quiz_fields {
                let expected = record.get(field);
                if self.cell(row_index, field).answer() == Some(expected) {
                    score += 1;
                } else {
                    mismatches.push(Mismatch {
                        row_index,
                        field,
                        expected: expected.to_string(),
                    });
                }
            }
        }

        let result = GradeResult {
            score,
            total: quiz.cell_count(),
            mismatches,
        };
        logger::log(&format!("Graded: {} / {}", result.score, result.total));
        result
    }

    /// Every distinct value of the quiz columns across the whole catalog, sorted.
    pub fn compute_answer_pool(&self) -> Vec<String> {
        let Some(quiz) = &self.active else {
            return Vec::new();
        };

        let pool: BTreeSet<&str> = quiz
            .quiz_fields
            .iter()
            .flat_map(|&field| self.catalog.iter().map(move |record| record.get(field)))
            .collect();
        pool.into_iter().map(str::to_string).collect()
    }
}
