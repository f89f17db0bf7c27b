use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::AppState;

pub struct ShortcutsWidget;

impl ShortcutsWidget {
    pub fn render(frame: &mut Frame, area: Rect, _state: &AppState) {
        let key = |label: &str| {
            Span::styled(
                label.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let text = |label: &str| Span::styled(label.to_string(), Style::default().fg(Color::Gray));

        let shortcuts_text = vec![Line::from(vec![
            key("q"),
            text(" quit  "),
            key("r"),
            text(" reload  "),
            key("↑/↓"),
            text(" select  "),
            key("c"),
            text(" cycle category  "),
            key("x"),
            text(" clear filters  "),
            key("d"),
            text(" delete"),
        ])];

        let shortcuts = Paragraph::new(shortcuts_text).alignment(Alignment::Center);

        frame.render_widget(shortcuts, area);
    }
}
