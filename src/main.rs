use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use med_matrix::{
    handle_matrix_input, handle_quit_confirm_input, handle_setup_input, handle_summary_input,
    list_decks, logger, AppConfig, AppState, MatrixSession, QuizEngine,
};
use med_matrix::deck::DECKS_DIR;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;

/// Engine for the configured deck, plus that deck's path when it loaded.
fn build_engine(config: &AppConfig) -> (QuizEngine, Option<&Path>) {
    let (engine, loaded) = match &config.deck {
        Some(path) => match med_matrix::load_deck(path) {
            Ok(catalog) => {
                logger::log(&format!(
                    "Loaded deck {} ({} medications)",
                    path.display(),
                    catalog.len()
                ));
                (QuizEngine::with_catalog(catalog), Some(path.as_path()))
            }
            Err(e) => {
                logger::log(&format!("Deck load failed, using built-in catalog: {}", e));
                eprintln!("Warning: {}; using the built-in catalog", e);
                (QuizEngine::new(), None)
            }
        },
        None => (QuizEngine::new(), None),
    };
    (engine.with_hint_policy(config.hint_policy), loaded)
}

fn main() -> io::Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}; using default settings", e);
            AppConfig::default()
        }
    };
    logger::init(&config.log_file);
    logger::log("Starting med-matrix");

    let (engine, loaded_deck) = build_engine(&config);
    let mut session = MatrixSession::new(engine, &config)
        .with_decks(list_decks(DECKS_DIR), loaded_deck);
    let mut app_state = AppState::Setup;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, &mut app_state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut MatrixSession,
    app_state: &mut AppState,
) -> io::Result<()> {
    while !session.should_quit {
        terminal.draw(|f| match *app_state {
            AppState::Setup => med_matrix::draw_setup(f, session),
            AppState::Matrix => med_matrix::draw_matrix(f, session),
            AppState::MatrixQuitConfirm => med_matrix::draw_quit_confirmation(f),
            AppState::Summary => med_matrix::draw_summary(f, session),
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            match *app_state {
                AppState::Setup => handle_setup_input(session, key, app_state),
                AppState::Matrix => handle_matrix_input(session, key, app_state),
                AppState::MatrixQuitConfirm => handle_quit_confirm_input(session, key, app_state),
                AppState::Summary => handle_summary_input(session, key, app_state),
            }
        }
    }

    logger::log("Exiting med-matrix");
    Ok(())
}
