use crate::models::{CellEntry, FieldName};
use crate::session::{Focus, MatrixSession, POOL_COLUMNS};
use crate::ui::layout::calculate_matrix_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const HINT_ICON: &str = "🔍 ";

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn cursor_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Text of a blank, with the hint icon in front of partial reveals.
pub(crate) fn cell_label(entry: &CellEntry) -> String {
    if entry.is_hint() {
        format!("{}{}", HINT_ICON, entry.display_text())
    } else {
        entry.display_text()
    }
}

pub fn draw_matrix(f: &mut Frame, session: &mut MatrixSession) {
    // Selecting the cursor rows makes both tables scroll to keep them visible.
    session
        .pool_state
        .select(Some(session.pool_cursor / POOL_COLUMNS));
    session.grid_state.select(Some(session.grid_row));

    let Some(quiz) = session.engine.active_quiz() else {
        return;
    };
    let pool = session.engine.compute_answer_pool();
    let layout = calculate_matrix_chunks(f.area(), pool.len());

    let mut header_spans = vec![Span::styled(
        format!("Custom Medical Matrix - {} drugs", quiz.rows.len()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(piece) = session.engine.selected_piece() {
        header_spans.push(Span::from("   Selected: "));
        header_spans.push(Span::styled(
            piece.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    // 1. Answer pool
    let pool_focused = session.focus == Focus::Pool;
    let pool_width = (layout.pool_area.width.saturating_sub(2) as usize / POOL_COLUMNS).max(4);
    let pool_rows: Vec<Row> = pool
        .chunks(POOL_COLUMNS)
        .enumerate()
        .map(|(row, values)| {
            Row::new(values.iter().enumerate().map(|(col, value)| {
                let index = row * POOL_COLUMNS + col;
                let style = if pool_focused && index == session.pool_cursor {
                    cursor_style()
                } else if session.engine.selected_piece() == Some(value.as_str()) {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                Cell::from(truncate_string(value, pool_width.saturating_sub(1))).style(style)
            }))
        })
        .collect();
    let pool_table = Table::new(pool_rows, [Constraint::Ratio(1, POOL_COLUMNS as u32); POOL_COLUMNS])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(pool_focused))
                .title("1. Pick an Answer"),
        );
    f.render_stateful_widget(pool_table, layout.pool_area, &mut session.pool_state);

    // 2. The grid: blanks for quiz fields, plain info for the rest
    let grid_focused = session.focus == Focus::Grid;
    let selected = session.selected_cell();
    let col_width = (layout.grid_area.width.saturating_sub(2) as usize / FieldName::ALL.len()).max(4);
    let header_row = Row::new(FieldName::ALL.iter().map(|field| {
        let style = if quiz.quiz_fields.contains(field) {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Cell::from(field.label()).style(style)
    }));
    let grid_rows: Vec<Row> = quiz
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, record)| {
            Row::new(FieldName::ALL.iter().map(|&field| {
                if !quiz.quiz_fields.contains(&field) {
                    return Cell::from(truncate_string(record.get(field), col_width - 1))
                        .style(Style::default().fg(Color::DarkGray));
                }
                let entry = session.engine.cell(row_index, field);
                let style = if grid_focused && selected == Some((row_index, field)) {
                    cursor_style()
                } else if entry.is_hint() {
                    Style::default().fg(Color::Magenta)
                } else if entry.answer().is_some() {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Cell::from(truncate_string(&cell_label(entry), col_width - 1)).style(style)
            }))
        })
        .collect();
    let grid_table = Table::new(
        grid_rows,
        [Constraint::Ratio(1, FieldName::ALL.len() as u32); FieldName::ALL.len()],
    )
    .header(header_row)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(grid_focused))
            .title("2. Complete the Table"),
    );
    f.render_stateful_widget(grid_table, layout.grid_area, &mut session.grid_state);

    let status_line = match &session.status {
        Some(status) => Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(""),
    };
    let help_text = vec![
        status_line,
        Line::from(vec![
            key_span("Tab"),
            Span::from(" Pool/Grid  "),
            key_span("Enter"),
            Span::from(" Pick/Place  "),
            key_span("Del"),
            Span::from(" Clear  "),
            key_span("h"),
            Span::from(" Hint  "),
            key_span("g"),
            Span::from(" Grade Matrix  "),
            key_span("r"),
            Span::from(" New Quiz  "),
            key_span("Esc"),
            Span::from(" Quit"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Leave Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Discard this matrix and return to setup?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Back to Setup)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
