//! TUI widget modules

pub mod charts;
pub mod confirm;
pub mod expense_table;
pub mod header;
pub mod shortcuts;
pub mod summary;

pub use charts::*;
pub use confirm::*;
pub use expense_table::*;
pub use header::*;
pub use shortcuts::*;
pub use summary::*;

use expense_tracker_core::Category;
use ratatui::style::Color;

/// Chart and badge color per category; anything unrecognized falls back to
/// the `other` color.
pub fn category_color(category: &Category) -> Color {
    match category {
        Category::Fuel => Color::Yellow,
        Category::Food => Color::Green,
        Category::Travel => Color::Blue,
        Category::Utilities => Color::Magenta,
        Category::Entertainment => Color::LightMagenta,
        Category::Shopping => Color::LightRed,
        Category::Other | Category::Unrecognized(_) => Color::Gray,
    }
}

/// Capitalized display label, matching the original badge text.
pub fn category_label(category: &Category) -> String {
    let name = category.name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
