use crate::session::MatrixSession;
use crate::ui::layout::calculate_summary_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn summary_lines(session: &MatrixSession) -> Vec<Line<'static>> {
    let Some(result) = &session.last_grade else {
        return vec![Line::from("Nothing graded yet.")];
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Final Score: {} / {}", result.score, result.total),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if result.is_perfect() {
        lines.push(Line::from(Span::styled(
            "Perfect Score! You are ready for the exam.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        return lines;
    }

    for mismatch in &result.mismatches {
        lines.push(Line::from(Span::styled(
            format!(
                "❌ Row {}, {}: Expected '{}'",
                mismatch.row_index + 1,
                mismatch.field,
                mismatch.expected
            ),
            Style::default().fg(Color::Red),
        )));
        let given = session
            .engine
            .cell(mismatch.row_index, mismatch.field)
            .display_text();
        lines.push(Line::from(Span::styled(
            format!("   Your answer: {}", given),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

pub fn draw_summary(f: &mut Frame, session: &MatrixSession) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new("Grade Matrix")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let summary = Paragraph::new(summary_lines(session))
        .wrap(Wrap { trim: true })
        .scroll((session.summary_scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "b",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back to Matrix  "),
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" New Quiz  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit  "),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
