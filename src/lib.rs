pub mod catalog;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use catalog::builtin_catalog;
pub use config::{AppConfig, ColumnMode};
pub use deck::{list_decks, load_deck};
pub use engine::{HintPolicy, QuizEngine};
pub use error::{ConfigError, DeckError, QuizError};
pub use models::{
    ActiveQuiz, AppState, CellEntry, FieldName, GradeResult, MedicationRecord, Mismatch,
    QuizConfiguration, UserTable,
};
pub use session::{
    MatrixSession, handle_matrix_input, handle_quit_confirm_input, handle_setup_input,
    handle_summary_input,
};
pub use ui::{draw_matrix, draw_quit_confirmation, draw_setup, draw_summary};
