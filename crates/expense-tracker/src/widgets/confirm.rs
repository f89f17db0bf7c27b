use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::AppState;

pub struct ConfirmDeleteWidget;

impl ConfirmDeleteWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = Self::centered_rect(50, 30, area);

        // Clear the area first
        frame.render_widget(Clear, popup_area);

        let mut text = vec![Line::from(" ")];
        if let Some(record) = state.pending_delete_record() {
            text.push(Line::from(vec![
                Span::styled("Delete ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("${:.2} {}", record.amount(), record.category()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" on {}?", record.date()),
                    Style::default().fg(Color::White),
                ),
            ]));
            text.push(Line::from(Span::styled(
                record.description().to_string(),
                Style::default().fg(Color::Gray),
            )));
        } else {
            text.push(Line::from("Delete this expense?"));
        }
        text.push(Line::from(" "));
        text.push(Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to delete, ", Style::default().fg(Color::Gray)),
            Span::styled(
                "n",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to cancel", Style::default().fg(Color::Gray)),
        ]));

        let popup = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title("Confirm Delete")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(popup, popup_area);
    }

    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
