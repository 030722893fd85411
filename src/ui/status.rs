use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let line = match &app.state.status {
        Some(status) if status.is_error => {
            // Multi-line error descriptions are flattened for the status bar
            let message = status.message.split_whitespace().collect::<Vec<_>>().join(" ");
            Line::from(Span::styled(message, Style::default().fg(Color::Red)))
        }
        Some(status) => {
            let style = if app.state.loading {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };
            Line::from(Span::styled(status.message.clone(), style))
        }
        None => Line::from(Span::styled(
            "? help  Tab panes  Space toggle  w write  q quit",
            Style::default().fg(Color::Gray),
        )),
    };

    let selected = app.state.selection.len();
    let summary = Span::styled(
        format!("  [{} selected -> {}]", selected, app.state.output_path.display()),
        Style::default().fg(Color::DarkGray),
    );

    let mut spans = line.spans;
    spans.push(summary);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
