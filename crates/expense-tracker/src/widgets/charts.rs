use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph},
    Frame,
};

use expense_tracker_core::{Category, ChartSeries};

use super::{category_color, category_label};
use crate::AppState;

pub struct ChartsWidget;

impl ChartsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        Self::render_category_chart(frame, chunks[0], state);
        Self::render_series_chart(
            frame,
            chunks[1],
            "Weekly Spending",
            &state.tracker.weekly_series(state.now),
            Color::LightBlue,
        );
        Self::render_series_chart(
            frame,
            chunks[2],
            "Monthly Spending",
            &state.tracker.monthly_series(state.now),
            Color::LightGreen,
        );
    }

    fn render_category_chart(frame: &mut Frame, area: Rect, state: &AppState) {
        let totals = state.tracker.category_totals();

        if totals.is_empty() {
            let empty = Paragraph::new("No expenses yet")
                .block(Block::bordered().title("Spending by Category"))
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(empty, area);
            return;
        }

        // Fixed categories in their usual order, then anything unrecognized
        let mut entries: Vec<(Category, f64)> = Category::FIXED
            .iter()
            .filter_map(|category| totals.get(category).map(|total| (category.clone(), *total)))
            .collect();
        let mut rest: Vec<(Category, f64)> = totals
            .iter()
            .filter(|(category, _)| !category.is_recognized())
            .map(|(category, total)| (category.clone(), *total))
            .collect();
        rest.sort_by(|a, b| a.0.name().cmp(b.0.name()));
        entries.extend(rest);

        let bars: Vec<Bar> = entries
            .iter()
            .map(|(category, total)| {
                Bar::default()
                    .label(Line::from(short_label(&category_label(category))))
                    .value(total.round() as u64)
                    .text_value(format!("${:.0}", total))
                    .style(Style::default().fg(category_color(category)))
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::bordered().title("Spending by Category"))
            .data(BarGroup::default().bars(&bars))
            .bar_width(5)
            .bar_gap(1);

        frame.render_widget(chart, area);
    }

    fn render_series_chart(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        series: &ChartSeries,
        color: Color,
    ) {
        let bars: Vec<Bar> = series
            .labels()
            .iter()
            .zip(series.values())
            .map(|(label, value)| {
                Bar::default()
                    .label(Line::from(label.clone()))
                    .value(value.round() as u64)
                    .text_value(format!("${:.0}", value))
                    .style(Style::default().fg(color))
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::bordered().title(title))
            .data(BarGroup::default().bars(&bars))
            .bar_width(8)
            .bar_gap(1);

        frame.render_widget(chart, area);
    }
}

// Bar labels only get a few columns each
fn short_label(label: &str) -> String {
    label.chars().take(5).collect()
}
