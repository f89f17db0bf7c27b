use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let title = format!("Expense Tracker - {} expenses", state.tracker.len());

        let mut spans = vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(error) = &state.error_message {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ));
        } else {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("updated {}", state.last_update.format("%H:%M:%S UTC")),
                Style::default().fg(Color::Gray),
            ));
        }

        let header = Paragraph::new(vec![Line::from(spans)])
            .block(Block::bordered().title(state.data_file.clone()))
            .alignment(Alignment::Center);

        frame.render_widget(header, area);
    }
}
