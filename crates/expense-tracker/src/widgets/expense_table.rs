use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{category_color, category_label};
use crate::AppState;

pub struct ExpenseTableWidget;

impl ExpenseTableWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let visible = state.visible();

        let title = match state.criteria.category() {
            Some(category) => format!("Expenses (category: {})", category),
            None => "Expenses".to_string(),
        };

        if visible.is_empty() {
            let empty = Paragraph::new("No expenses found matching your filters.")
                .block(Block::bordered().title(title))
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(["Date", "Category", "Description", "Amount"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = visible
            .iter()
            .map(|record| {
                Row::new(vec![
                    Cell::from(record.date().to_string()),
                    Cell::from(category_label(record.category()))
                        .style(Style::default().fg(category_color(record.category()))),
                    Cell::from(record.description().to_string()),
                    Cell::from(format!("${:.2}", record.amount())),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Min(20),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(Block::bordered().title(title))
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        let mut table_state = TableState::default().with_selected(Some(state.selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}
