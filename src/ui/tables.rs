use crate::app::{App, Focus};
use crate::ui::{checkbox, highlight_style, pane_block};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

pub fn render_tables(frame: &mut Frame, area: Rect, app: &App) {
    let filtered_tables = app.state.filtered_tables();
    let items: Vec<ListItem> = filtered_tables
        .iter()
        .map(|table| {
            let selected = app.state.selection.contains_table(&table.name);
            let style = if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(checkbox(selected), style),
                Span::styled(table.name.to_string(), style),
            ]))
        })
        .collect();

    let title = if app.state.table_filter.is_empty() && !app.state.filter_mode {
        format!("Tables ({})", filtered_tables.len())
    } else {
        format!("Tables (filtered: {})", filtered_tables.len())
    };

    let mut list_state = ListState::default();
    if !filtered_tables.is_empty() {
        list_state.select(Some(app.state.selected_table_index));
    }

    let list = List::new(items)
        .block(pane_block(title, app.state.focus == Focus::Tables))
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut list_state);

    // Show filter if active
    if app.state.filter_mode || !app.state.table_filter.is_empty() {
        let cursor = if app.state.filter_mode { "_" } else { "" };
        let filter_text = format!("/{}{}", app.state.table_filter, cursor);
        let filter_line = Line::from(Span::styled(filter_text, Style::default().fg(Color::Cyan)));
        let y = area.y + area.height.saturating_sub(2);
        frame.render_widget(
            filter_line,
            Rect::new(area.x + 1, y, area.width.saturating_sub(2), 1),
        );
    }
}
