use crate::config::{AppConfig, ColumnMode};
use crate::deck::load_deck;
use crate::engine::QuizEngine;
use crate::logger;
use crate::models::{AppState, FieldName, GradeResult, QuizConfiguration};
use crate::utils::grid_rows;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const POOL_COLUMNS: usize = 5;

/// Setup items: the six fields, then the column mode, the row count and the deck.
const MODE_ITEM: usize = FieldName::ALL.len();
const ROWS_ITEM: usize = MODE_ITEM + 1;
const DECK_ITEM: usize = ROWS_ITEM + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Pool,
    Grid,
}

#[derive(Debug, Clone)]
pub struct SetupState {
    pub picked: BTreeSet<FieldName>,
    pub row_count: usize,
    pub column_mode: ColumnMode,
    pub cursor: usize,
    pub error: Option<String>,
    /// Deck files on offer; index 0 of the chooser is the built-in catalog.
    pub decks: Vec<PathBuf>,
    pub deck_index: usize,
}

impl SetupState {
    pub fn item_count() -> usize {
        DECK_ITEM + 1
    }

    pub fn is_deck_item(&self) -> bool {
        self.cursor == DECK_ITEM
    }

    pub fn deck_label(&self) -> String {
        match self.deck_index.checked_sub(1).and_then(|i| self.decks.get(i)) {
            Some(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            None => "Built-in EMT catalog".to_string(),
        }
    }

    pub fn is_mode_item(&self) -> bool {
        self.cursor == MODE_ITEM
    }

    pub fn is_rows_item(&self) -> bool {
        self.cursor == ROWS_ITEM
    }

    pub fn quiz_configuration(&self) -> QuizConfiguration {
        QuizConfiguration {
            selected_fields: self.column_mode.quiz_fields(&self.picked),
            row_count: self.row_count,
        }
    }
}

/// Everything the terminal renderer keeps between key presses.
#[derive(Debug)]
pub struct MatrixSession {
    pub engine: QuizEngine,
    pub setup: SetupState,
    pub focus: Focus,
    pub pool_cursor: usize,
    pub grid_row: usize,
    pub grid_col: usize,
    /// Scroll state of the pool and grid tables; follows the cursors.
    pub pool_state: TableState,
    pub grid_state: TableState,
    pub status: Option<String>,
    pub last_grade: Option<GradeResult>,
    pub summary_scroll: u16,
    pub should_quit: bool,
}

impl MatrixSession {
    pub fn new(engine: QuizEngine, config: &AppConfig) -> Self {
        let initial = config.initial_setup(engine.catalog().len());
        Self {
            setup: SetupState {
                picked: initial.selected_fields,
                row_count: initial.row_count,
                column_mode: config.column_mode,
                cursor: 0,
                error: None,
                decks: Vec::new(),
                deck_index: 0,
            },
            engine,
            focus: Focus::Pool,
            pool_cursor: 0,
            grid_row: 0,
            grid_col: 0,
            pool_state: TableState::default(),
            grid_state: TableState::default(),
            status: None,
            last_grade: None,
            summary_scroll: 0,
            should_quit: false,
        }
    }

    /// Offers `decks` on the setup screen. `current` marks the deck the engine
    /// was built from; it is added to the list when it lives elsewhere.
    pub fn with_decks(mut self, decks: Vec<PathBuf>, current: Option<&Path>) -> Self {
        self.setup.decks = decks;
        if let Some(current) = current {
            let position = match self.setup.decks.iter().position(|d| d == current) {
                Some(position) => position,
                None => {
                    self.setup.decks.push(current.to_path_buf());
                    self.setup.decks.len() - 1
                }
            };
            self.setup.deck_index = position + 1;
        }
        self
    }

    /// Swaps the engine's catalog for chooser entry `index` (0 = built-in).
    /// A deck that fails to load leaves the current catalog in place.
    pub fn select_deck(&mut self, index: usize) {
        let hint_policy = self.engine.hint_policy();
        let engine = match index.checked_sub(1).and_then(|i| self.setup.decks.get(i)) {
            Some(path) => match load_deck(path) {
                Ok(catalog) => {
                    logger::log(&format!(
                        "Switched to deck {} ({} medications)",
                        path.display(),
                        catalog.len()
                    ));
                    QuizEngine::with_catalog(catalog)
                }
                Err(e) => {
                    logger::log(&format!("Deck switch failed: {}", e));
                    self.setup.error = Some(e.to_string());
                    return;
                }
            },
            None => QuizEngine::new(),
        };

        self.engine = engine.with_hint_policy(hint_policy);
        self.setup.deck_index = index;
        self.setup.error = None;
        let max_rows = self.engine.catalog().len();
        self.setup.row_count = self.setup.row_count.clamp(1, max_rows.max(1));
    }

    fn cycle_deck(&mut self, step: isize) {
        let choices = (self.setup.decks.len() + 1) as isize;
        let index = (self.setup.deck_index as isize + step).rem_euclid(choices);
        self.select_deck(index as usize);
    }

    /// Quiz fields in column order, empty before the first quiz.
    pub fn quiz_columns(&self) -> Vec<FieldName> {
        self.engine
            .active_quiz()
            .map(|quiz| quiz.quiz_fields.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn selected_cell(&self) -> Option<(usize, FieldName)> {
        self.quiz_columns()
            .get(self.grid_col)
            .map(|field| (self.grid_row, *field))
    }

    pub fn start_quiz(&mut self, app_state: &mut AppState) {
        let config = self.setup.quiz_configuration();
        match self.engine.configure(&config) {
            Ok(_) => {
                self.setup.error = None;
                self.focus = Focus::Pool;
                self.pool_cursor = 0;
                self.grid_row = 0;
                self.grid_col = 0;
                self.pool_state = TableState::default();
                self.grid_state = TableState::default();
                self.status = None;
                self.last_grade = None;
                self.summary_scroll = 0;
                *app_state = AppState::Matrix;
            }
            Err(e) => {
                logger::log(&format!("Rejected quiz setup: {}", e));
                self.setup.error = Some(e.to_string());
            }
        }
    }

    fn move_pool_cursor(&mut self, d_row: isize, d_col: isize) {
        let len = self.engine.compute_answer_pool().len();
        if len == 0 {
            return;
        }
        let rows = grid_rows(len, POOL_COLUMNS) as isize;
        let row = (self.pool_cursor / POOL_COLUMNS) as isize;
        let col = (self.pool_cursor % POOL_COLUMNS) as isize;
        let new_row = (row + d_row).clamp(0, rows - 1);
        let new_col = (col + d_col).clamp(0, POOL_COLUMNS as isize - 1);
        let index = (new_row * POOL_COLUMNS as isize + new_col) as usize;
        self.pool_cursor = index.min(len - 1);
    }

    fn move_grid_cursor(&mut self, d_row: isize, d_col: isize) {
        let Some(quiz) = self.engine.active_quiz() else {
            return;
        };
        let rows = quiz.rows.len() as isize;
        let cols = quiz.quiz_fields.len() as isize;
        self.grid_row = (self.grid_row as isize + d_row).clamp(0, rows - 1) as usize;
        self.grid_col = (self.grid_col as isize + d_col).clamp(0, cols - 1) as usize;
    }

    fn pick_under_cursor(&mut self) {
        let pool = self.engine.compute_answer_pool();
        if let Some(value) = pool.get(self.pool_cursor) {
            self.engine.pick_from_pool(value.as_str());
            self.status = Some(format!("Selected: {}", value));
            self.focus = Focus::Grid;
        }
    }

    fn place_under_cursor(&mut self) {
        let Some((row_index, field)) = self.selected_cell() else {
            return;
        };
        if self.engine.selected_piece().is_none() {
            self.status = Some("Pick an answer from the pool first".to_string());
            return;
        }
        self.status = match self.engine.place_at(row_index, field) {
            Ok(()) => None,
            Err(e) => Some(e.to_string()),
        };
        self.focus = Focus::Pool;
    }

    fn clear_under_cursor(&mut self) {
        if let Some((row_index, field)) = self.selected_cell()
            && let Err(e) = self.engine.clear_cell(row_index, field)
        {
            self.status = Some(e.to_string());
        }
    }
}

pub fn handle_setup_input(session: &mut MatrixSession, key: KeyEvent, app_state: &mut AppState) {
    let setup = &mut session.setup;
    match key.code {
        KeyCode::Up => {
            setup.cursor = setup.cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if setup.cursor < SetupState::item_count() - 1 {
                setup.cursor += 1;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(field) = FieldName::ALL.get(setup.cursor) {
                if !setup.picked.remove(field) {
                    setup.picked.insert(*field);
                }
            } else if setup.is_mode_item() {
                setup.column_mode = setup.column_mode.toggle();
            }
        }
        KeyCode::Left if setup.is_rows_item() => {
            setup.row_count = setup.row_count.saturating_sub(1).max(1);
        }
        KeyCode::Right if setup.is_rows_item() => {
            let max = session.engine.catalog().len();
            setup.row_count = (setup.row_count + 1).min(max);
        }
        KeyCode::Left if setup.is_deck_item() => session.cycle_deck(-1),
        KeyCode::Right if setup.is_deck_item() => session.cycle_deck(1),
        KeyCode::Enter => session.start_quiz(app_state),
        KeyCode::Char('q') | KeyCode::Esc => session.should_quit = true,
        _ => {}
    }
}

pub fn handle_matrix_input(session: &mut MatrixSession, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Esc => *app_state = AppState::MatrixQuitConfirm,
        KeyCode::Tab | KeyCode::BackTab => {
            session.focus = match session.focus {
                Focus::Pool => Focus::Grid,
                Focus::Grid => Focus::Pool,
            };
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            let (d_row, d_col) = match key.code {
                KeyCode::Up => (-1, 0),
                KeyCode::Down => (1, 0),
                KeyCode::Left => (0, -1),
                _ => (0, 1),
            };
            match session.focus {
                Focus::Pool => session.move_pool_cursor(d_row, d_col),
                Focus::Grid => session.move_grid_cursor(d_row, d_col),
            }
        }
        KeyCode::Enter => match session.focus {
            Focus::Pool => session.pick_under_cursor(),
            Focus::Grid => session.place_under_cursor(),
        },
        KeyCode::Backspace | KeyCode::Delete if session.focus == Focus::Grid => {
            session.clear_under_cursor();
        }
        KeyCode::Char('h') => {
            session.engine.request_hint();
            session.status = Some("Hint revealed for the open blanks".to_string());
        }
        KeyCode::Char('g') => {
            session.last_grade = Some(session.engine.grade());
            session.summary_scroll = 0;
            *app_state = AppState::Summary;
        }
        KeyCode::Char('r') => *app_state = AppState::Setup,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.should_quit = true;
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(
    session: &mut MatrixSession,
    key: KeyEvent,
    app_state: &mut AppState,
) {
    match key.code {
        KeyCode::Char('y') => {
            session.status = None;
            *app_state = AppState::Setup;
        }
        KeyCode::Char('n') | KeyCode::Esc => *app_state = AppState::Matrix,
        _ => {}
    }
}

pub fn handle_summary_input(session: &mut MatrixSession, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Up => session.summary_scroll = session.summary_scroll.saturating_sub(1),
        KeyCode::Down => session.summary_scroll = session.summary_scroll.saturating_add(1),
        KeyCode::Char('b') | KeyCode::Esc => *app_state = AppState::Matrix,
        KeyCode::Char('r') => *app_state = AppState::Setup,
        KeyCode::Char('q') => session.should_quit = true,
        _ => {}
    }
}
