use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct SummaryWidget;

impl SummaryWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        let cards = [
            ("Total Expenses", state.tracker.total_sum(), Color::Yellow),
            (
                "This Week",
                state.tracker.current_week_sum(state.now),
                Color::Green,
            ),
            (
                "This Month",
                state.tracker.current_month_sum(state.now),
                Color::Cyan,
            ),
        ];

        for (chunk, (title, value, color)) in chunks.iter().zip(cards) {
            let card = Paragraph::new(vec![
                Line::from(" "),
                Line::from(Span::styled(
                    format!("${:.2}", value),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ])
            .block(Block::bordered().title(title))
            .alignment(Alignment::Center);

            frame.render_widget(card, *chunk);
        }
    }
}
