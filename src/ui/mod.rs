mod columns;
mod connections;
mod diagram;
mod help;
mod status;
mod tables;

use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

pub use columns::render_columns;
pub use connections::render_connections;
pub use diagram::render_diagram;
pub use help::render_help;
pub use status::render_status;
pub use tables::render_tables;

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();

    if app.state.show_help {
        render_help(frame, size);
        return;
    }

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(size);

    if app.state.focus == Focus::Connections || app.state.schema.is_none() {
        render_connections(frame, vertical_chunks[0], app);
    } else {
        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25), // Tables
                Constraint::Percentage(30), // Columns
                Constraint::Percentage(45), // Diagram
            ])
            .split(vertical_chunks[0]);

        render_tables(frame, horizontal_chunks[0], app);
        render_columns(frame, horizontal_chunks[1], app);
        render_diagram(frame, horizontal_chunks[2], app);
    }

    render_status(frame, vertical_chunks[1], app);
}

/// Bordered pane, highlighted when focused
fn pane_block(title: String, focused: bool) -> Block<'static> {
    let (border_style, title_style) = if focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
    } else {
        (Style::default().fg(Color::Gray), Style::default().fg(Color::Gray))
    };

    Block::default()
        .title(format!(" {} ", title))
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x] "
    } else {
        "[ ] "
    }
}
