use crate::models::FieldName;
use crate::session::{MatrixSession, SetupState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn item_style(setup: &SetupState, index: usize) -> Style {
    if setup.cursor == index {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_setup(f: &mut Frame, session: &MatrixSession) {
    let setup = &session.setup;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("EMT Pharma Matrix - Quiz Setup")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let mut items: Vec<ListItem> = FieldName::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let mark = if setup.picked.contains(field) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, field)).style(item_style(setup, i))
        })
        .collect();
    let mode_index = FieldName::ALL.len();
    items.push(ListItem::new(""));
    items.push(
        ListItem::new(format!("Mode: {}", setup.column_mode.label()))
            .style(item_style(setup, mode_index)),
    );
    items.push(
        ListItem::new(format!(
            "Number of drugs: < {} >  (1-{})",
            setup.row_count,
            session.engine.catalog().len()
        ))
        .style(item_style(setup, mode_index + 1)),
    );
    items.push(
        ListItem::new(format!(
            "Deck: < {} >  ({} available)",
            setup.deck_label(),
            setup.decks.len() + 1
        ))
        .style(item_style(setup, mode_index + 2)),
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(setup.column_mode.label()),
    );
    f.render_widget(list, chunks[1]);

    let message = match &setup.error {
        Some(error) => Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new("Pick your columns and drug count, then press Enter to start.")
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(
        message
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );

    let help = Paragraph::new(Line::from(vec![
        key_span("↑/↓"),
        Span::from(" Move  "),
        key_span("Space"),
        Span::from(" Toggle  "),
        key_span("←/→"),
        Span::from(" Count/Deck  "),
        key_span("Enter"),
        Span::from(" Start New Quiz  "),
        key_span("q"),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
