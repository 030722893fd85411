use crate::app::{App, Focus};
use crate::ui::{checkbox, highlight_style, pane_block};
use erd_builder::diagram::markers_for;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render_columns(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == Focus::Columns;

    let Some(table) = app.state.current_table() else {
        let block = pane_block("Columns".to_string(), focused);
        let empty = Paragraph::new("No table selected")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let relationships: Vec<Line> = app
        .state
        .schema
        .as_ref()
        .map(|schema| {
            schema
                .relationships_of(&table.name)
                .map(|rel| {
                    Line::from(vec![
                        Span::styled(
                            format!("{}.{}", rel.from_table, rel.from_column),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::raw(" -> "),
                        Span::styled(
                            format!("{}.{}", rel.to_table, rel.to_column),
                            Style::default().fg(Color::Cyan),
                        ),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length((relationships.len() as u16 + 2).clamp(3, 8)),
        ])
        .split(area);

    let items: Vec<ListItem> = table
        .columns
        .iter()
        .map(|column| {
            let selected = app.state.selection.is_column_selected(&table.name, &column.name);
            let markers: Vec<&str> = markers_for(table, &column.name)
                .iter()
                .map(|m| m.as_str())
                .collect();

            let mut spans = vec![
                Span::raw(checkbox(selected)),
                Span::styled(
                    column.name.clone(),
                    if selected {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    },
                ),
                Span::styled(format!(" {}", column.data_type), Style::default().fg(Color::Gray)),
            ];
            if !markers.is_empty() {
                spans.push(Span::styled(
                    format!(" {}", markers.join(" ")),
                    Style::default().fg(Color::Yellow),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    if !table.columns.is_empty() {
        list_state.select(Some(app.state.selected_column_index));
    }

    let list = List::new(items)
        .block(pane_block(format!("Columns: {}", table.name), focused))
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let references = if relationships.is_empty() {
        Paragraph::new("No foreign keys").style(Style::default().fg(Color::Gray))
    } else {
        Paragraph::new(relationships)
    };
    frame.render_widget(
        references
            .block(pane_block("References".to_string(), false))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}
