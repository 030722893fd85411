use crate::app::{App, Focus};
use crate::ui::pane_block;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_diagram(frame: &mut Frame, area: Rect, app: &App) {
    let block = pane_block("ER Diagram (Mermaid)".to_string(), app.state.focus == Focus::Diagram);

    let Some(diagram) = &app.state.diagram else {
        let empty = Paragraph::new("Select tables to build a diagram")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let lines: Vec<Line> = diagram.lines().map(highlight_line).collect();
    let para = Paragraph::new(lines)
        .block(block)
        .scroll((app.state.diagram_scroll, 0));
    frame.render_widget(para, area);
}

/// Colour a single line of erDiagram markup
fn highlight_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    let pad = Span::raw(" ".repeat(indent));

    if trimmed == "erDiagram" {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(name) = trimmed.strip_suffix(" {") {
        return Line::from(vec![
            pad,
            Span::styled(
                name.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" {"),
        ]);
    }

    if trimmed.contains("||--o{") {
        return Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Blue)));
    }

    let mut parts = trimmed.splitn(3, ' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(data_type), Some(column), markers) => {
            let mut spans = vec![
                pad,
                Span::styled(data_type.to_string(), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::raw(column.to_string()),
            ];
            if let Some(markers) = markers {
                spans.push(Span::styled(
                    format!(" {}", markers),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Line::from(spans)
        }
        _ => Line::from(line.to_string()),
    }
}
