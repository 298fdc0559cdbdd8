use crate::engine::HintPolicy;
use crate::error::ConfigError;
use crate::logger::DEFAULT_LOG_FILE;
use crate::models::{FieldName, QuizConfiguration};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "med_matrix.json";
pub const DEFAULT_ROW_COUNT: usize = 5;

/// Whether the fields picked on the setup screen are the blanks or the shown columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    #[default]
    Fill,
    Reveal,
}

impl ColumnMode {
    /// Quiz fields for a set of picked fields.
    pub fn quiz_fields(self, picked: &BTreeSet<FieldName>) -> BTreeSet<FieldName> {
        match self {
            ColumnMode::Fill => picked.clone(),
            ColumnMode::Reveal => FieldName::ALL
                .into_iter()
                .filter(|field| !picked.contains(field))
                .collect(),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ColumnMode::Fill => ColumnMode::Reveal,
            ColumnMode::Reveal => ColumnMode::Fill,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnMode::Fill => "Columns to fill",
            ColumnMode::Reveal => "Columns to reveal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fields: Vec<FieldName>,
    pub rows: usize,
    pub hint_policy: HintPolicy,
    pub column_mode: ColumnMode,
    pub deck: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fields: vec![
                FieldName::Drug,
                FieldName::Class,
                FieldName::Indication,
                FieldName::Dose,
            ],
            rows: DEFAULT_ROW_COUNT,
            hint_policy: HintPolicy::Proportional,
            column_mode: ColumnMode::Fill,
            deck: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Config file (if present) with `MED_MATRIX_*` environment overrides on top.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("MED_MATRIX_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let invalid = |key: &str, value: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        if let Some(value) = lookup("MED_MATRIX_ROWS") {
            self.rows = value
                .trim()
                .parse()
                .map_err(|_| invalid("MED_MATRIX_ROWS", &value))?;
        }
        if let Some(value) = lookup("MED_MATRIX_FIELDS") {
            self.fields = value
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(str::parse::<FieldName>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| invalid("MED_MATRIX_FIELDS", &value))?;
        }
        if let Some(value) = lookup("MED_MATRIX_HINT") {
            self.hint_policy = value
                .parse()
                .map_err(|_| invalid("MED_MATRIX_HINT", &value))?;
        }
        if let Some(value) = lookup("MED_MATRIX_MODE") {
            self.column_mode = match value.trim().to_ascii_lowercase().as_str() {
                "fill" => ColumnMode::Fill,
                "reveal" => ColumnMode::Reveal,
                _ => return Err(invalid("MED_MATRIX_MODE", &value)),
            };
        }
        if let Some(value) = lookup("MED_MATRIX_DECK") {
            self.deck = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("MED_MATRIX_LOG") {
            self.log_file = PathBuf::from(value);
        }
        Ok(())
    }

    /// Initial setup-screen selection, with the row count clamped to the catalog.
    pub fn initial_setup(&self, catalog_len: usize) -> QuizConfiguration {
        QuizConfiguration::new(
            self.fields.iter().copied(),
            self.rows.clamp(1, catalog_len.max(1)),
        )
    }
}
