use crate::session::POOL_COLUMNS;
use crate::utils::grid_rows;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MatrixLayout {
    pub header_area: Rect,
    pub pool_area: Rect,
    pub grid_area: Rect,
    pub help_area: Rect,
}

pub struct SummaryLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
}

/// The pool gets one line per row of buttons plus borders, capped at 40% of the screen.
pub fn calculate_matrix_chunks(area: Rect, pool_len: usize) -> MatrixLayout {
    let pool_height = (grid_rows(pool_len, POOL_COLUMNS) as u16).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(pool_height.max(3)),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(area);

    let pool_cap = area.height * 2 / 5;
    let mut pool_area = chunks[1];
    let mut grid_area = chunks[2];
    if pool_area.height > pool_cap && pool_cap >= 3 {
        let spare = pool_area.height - pool_cap;
        pool_area.height = pool_cap;
        grid_area.y -= spare;
        grid_area.height += spare;
    }

    MatrixLayout {
        header_area: chunks[0],
        pool_area,
        grid_area,
        help_area: chunks[3],
    }
}

pub fn calculate_summary_chunks(area: Rect) -> SummaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    SummaryLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
    }
}
