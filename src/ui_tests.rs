#[cfg(test)]
mod ui_integration_tests {
    use crate::config::AppConfig;
    use crate::engine::QuizEngine;
    use crate::models::{AppState, FieldName};
    use crate::session::{handle_matrix_input, Focus, MatrixSession};
    use crate::ui::{draw_matrix, draw_quit_confirmation, draw_setup, draw_summary, summary_lines};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn create_test_session() -> MatrixSession {
        let mut engine = QuizEngine::new();
        engine
            .configure_with_rows([FieldName::Drug, FieldName::Dose], &[0, 1])
            .unwrap();
        MatrixSession::new(engine, &AppConfig::default())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for row in buffer.content.chunks(width) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render<F>(draw: F) -> String
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        render_sized(140, 40, draw)
    }

    fn render_sized<F>(width: u16, height: u16, draw: F) -> String
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn line_texts(session: &MatrixSession) -> Vec<String> {
        summary_lines(session)
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn press(session: &mut MatrixSession, code: KeyCode) {
        let mut state = AppState::Matrix;
        handle_matrix_input(session, KeyEvent::new(code, KeyModifiers::empty()), &mut state);
    }

    #[test]
    fn test_setup_screen_lists_fields_and_count() {
        let session = MatrixSession::new(QuizEngine::new(), &AppConfig::default());
        let screen = render(|f| draw_setup(f, &session));
        assert!(screen.contains("[x] Drug"));
        assert!(screen.contains("[ ] Route"));
        assert!(screen.contains("Number of drugs: < 5 >"));
        assert!(screen.contains("Columns to fill"));
    }

    #[test]
    fn test_setup_screen_shows_error() {
        let mut session = MatrixSession::new(QuizEngine::new(), &AppConfig::default());
        session.setup.error = Some("invalid configuration: select at least one column".into());
        let screen = render(|f| draw_setup(f, &session));
        assert!(screen.contains("select at least one column"));
    }

    #[test]
    fn test_matrix_screen_shows_blanks_and_info_columns() {
        let mut session = create_test_session();
        let screen = render(|f| draw_matrix(f, &mut session));
        assert!(screen.contains("1. Pick an Answer"));
        assert!(screen.contains("2. Complete the Table"));
        assert!(screen.contains("---"));
        // Non-quiz columns are shown as plain info
        assert!(screen.contains("Anti-platelet"));
        assert!(screen.contains("Nitrate"));
    }

    #[test]
    fn test_matrix_screen_shows_selection_and_hints() {
        let mut session = create_test_session();
        session.engine.pick_from_pool("324 mg");
        let screen = render(|f| draw_matrix(f, &mut session));
        assert!(screen.contains("Selected: 324 mg"));

        session.engine.request_hint();
        let screen = render(|f| draw_matrix(f, &mut session));
        assert!(screen.contains("0.4..."));
        assert!(screen.contains("Asp..."));
    }

    #[test]
    fn test_matrix_without_quiz_draws_nothing() {
        let mut session = MatrixSession::new(QuizEngine::new(), &AppConfig::default());
        let screen = render(|f| draw_matrix(f, &mut session));
        assert!(screen.trim().is_empty());
    }

    #[test]
    fn test_summary_perfect_score() {
        let mut session = create_test_session();
        for (row, field, value) in [
            (0, FieldName::Drug, "Aspirin"),
            (0, FieldName::Dose, "324 mg"),
            (1, FieldName::Drug, "Nitroglycerin"),
            (1, FieldName::Dose, "0.4 mg"),
        ] {
            session.engine.pick_from_pool(value);
            session.engine.place_at(row, field).unwrap();
        }
        session.last_grade = Some(session.engine.grade());

        let lines = line_texts(&session);
        assert_eq!(lines[0], "Final Score: 4 / 4");
        assert!(lines.iter().any(|l| l == "Perfect Score! You are ready for the exam."));
    }

    #[test]
    fn test_summary_lists_mismatches() {
        let mut session = create_test_session();
        session.engine.pick_from_pool("Narcan");
        session.engine.place_at(0, FieldName::Drug).unwrap();
        session.last_grade = Some(session.engine.grade());

        let lines = line_texts(&session);
        assert_eq!(lines[0], "Final Score: 0 / 4");
        assert!(lines.contains(&"❌ Row 1, Drug: Expected 'Aspirin'".to_string()));
        assert!(lines.contains(&"   Your answer: Narcan".to_string()));
        assert!(lines.contains(&"❌ Row 2, Dose: Expected '0.4 mg'".to_string()));

        let screen = render(|f| draw_summary(f, &session));
        assert!(screen.contains("Final Score: 0 / 4"));
    }

    #[test]
    fn test_quit_confirmation_screen() {
        let screen = render(draw_quit_confirmation);
        assert!(screen.contains("Leave Quiz"));
        assert!(screen.contains("Continue Quiz"));
    }

    #[test]
    fn test_full_round_through_keys() {
        let mut session = create_test_session();
        let pool = session.engine.compute_answer_pool();
        let targets = [
            ("Aspirin", 0, 0),
            ("324 mg", 0, 1),
            ("Nitroglycerin", 1, 0),
            ("0.4 mg", 1, 1),
        ];
        for (value, row, col) in targets {
            session.focus = Focus::Pool;
            session.pool_cursor = pool.iter().position(|v| v == value).unwrap();
            press(&mut session, KeyCode::Enter);
            session.grid_row = row;
            session.grid_col = col;
            press(&mut session, KeyCode::Enter);
        }

        let mut state = AppState::Matrix;
        handle_matrix_input(
            &mut session,
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::empty()),
            &mut state,
        );
        assert_eq!(state, AppState::Summary);
        assert!(session.last_grade.as_ref().unwrap().is_perfect());
    }

    #[test]
    fn test_grid_scrolls_to_cursor_row() {
        let mut engine = QuizEngine::new();
        let all_rows: Vec<usize> = (0..12).collect();
        engine
            .configure_with_rows([FieldName::Dose], &all_rows)
            .unwrap();
        let mut session = MatrixSession::new(engine, &AppConfig::default());
        session.focus = Focus::Grid;

        let screen = render_sized(120, 20, |f| draw_matrix(f, &mut session));
        assert!(screen.contains("Aspirin"));
        assert!(!screen.contains("Duo-Dote"));

        for _ in 0..11 {
            press(&mut session, KeyCode::Down);
        }
        assert_eq!(session.grid_row, 11);

        let screen = render_sized(120, 20, |f| draw_matrix(f, &mut session));
        assert!(screen.contains("Duo-Dote"));
        assert!(!screen.contains("Aspirin"));
    }

    #[test]
    fn test_pool_scrolls_to_cursor_row() {
        let mut engine = QuizEngine::new();
        engine
            .configure_with_rows(
                [
                    FieldName::Drug,
                    FieldName::Class,
                    FieldName::Indication,
                    FieldName::Dose,
                ],
                &[0],
            )
            .unwrap();
        let mut session = MatrixSession::new(engine, &AppConfig::default());
        let pool = session.engine.compute_answer_pool();
        assert_eq!(pool.last().map(String::as_str), Some("Zofran"));

        let screen = render_sized(120, 24, |f| draw_matrix(f, &mut session));
        assert!(screen.contains("0.3 mg"));
        assert!(!screen.contains("Zofran"));

        for _ in 0..pool.len() {
            press(&mut session, KeyCode::Down);
            press(&mut session, KeyCode::Right);
        }
        assert_eq!(session.pool_cursor, pool.len() - 1);

        let screen = render_sized(120, 24, |f| draw_matrix(f, &mut session));
        assert!(screen.contains("Zofran"));
        assert!(!screen.contains("0.3 mg"));
    }

    #[test]
    fn test_setup_screen_shows_deck_choice() {
        let session = MatrixSession::new(QuizEngine::new(), &AppConfig::default())
            .with_decks(vec![std::path::PathBuf::from("decks/emt_core.csv")], None);
        let screen = render(|f| draw_setup(f, &session));
        assert!(screen.contains("Deck: < Built-in EMT catalog >  (2 available)"));
    }
}
