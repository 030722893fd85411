use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation:",
        &[
            ("Tab / Shift+Tab", "Switch between panes"),
            ("Up / Down (k / j)", "Move in the focused pane"),
            ("c", "Back to connection picker"),
        ],
    ),
    (
        "Selection:",
        &[
            ("Enter / Space", "Load connection / toggle table / toggle column"),
            ("a", "Select all columns of the current table"),
            ("/", "Filter tables"),
            ("r", "Reload schema (clears selection)"),
        ],
    ),
    (
        "Output:",
        &[
            ("w", "Write diagram to the output .mmd file"),
            ("J", "Write schema snapshot as JSON"),
        ],
    ),
    (
        "General:",
        &[
            ("?", "Show this help"),
            ("Esc", "Close modal / Clear filter"),
            ("q", "Quit application"),
        ],
    ),
];

pub fn render_help(frame: &mut Frame, area: Rect) {
    // Create a centered modal
    let popup_area = centered_rect(70, 80, area);

    let block = Block::default()
        .title("Help (Press ? or Esc to close)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            "erd - ER diagram builder",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (section, bindings) in KEYS {
        lines.push(Line::from(Span::styled(*section, heading)));
        lines.push(Line::from(""));
        for (key, description) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(*key, Style::default().fg(Color::Cyan)),
                Span::raw(format!("  {}", description)),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Panes:", heading)));
    lines.push(Line::from(""));
    lines.push(Line::from("  Left:   Tables ([x] = in diagram)"));
    lines.push(Line::from("  Middle: Columns of the current table, with key markers"));
    lines.push(Line::from("  Right:  Mermaid erDiagram preview"));

    let para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: true });

    frame.render_widget(para, inner);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
