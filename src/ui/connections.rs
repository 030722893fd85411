use crate::app::{App, Focus};
use crate::ui::{highlight_style, pane_block};
use erd_builder::config::CONNECTIONS_ENV;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render_connections(frame: &mut Frame, area: Rect, app: &App) {
    let block = pane_block("Connections".to_string(), app.state.focus == Focus::Connections);

    if app.state.connections.is_empty() {
        let lines = vec![
            Line::from("No connections configured."),
            Line::from(""),
            Line::from(vec![
                Span::raw("Set "),
                Span::styled(CONNECTIONS_ENV, Style::default().fg(Color::Cyan)),
                Span::raw(" to name=postgres://... pairs separated by commas,"),
            ]),
            Line::from("or pass a connection URL on the command line."),
        ];
        let para = Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(para, area);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .connections
        .iter()
        .map(|connection| {
            let active = app.state.current_connection.as_deref() == Some(connection.url.as_str());
            let name_style = if active {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Cyan)
            };
            ListItem::new(Line::from(vec![
                Span::styled(connection.name.clone(), name_style),
                Span::raw("  "),
                Span::styled(connection.masked_url(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(app.state.selected_connection_index));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
