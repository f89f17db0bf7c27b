use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use expense_tracker_core::{Category, ExpenseDraft, ExpenseRecord, ExpenseTracker, FilterCriteria};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod widgets;
use widgets::*;

const DEFAULT_DATA_FILE: &str = "~/.expense-tracker/expenses.json";

#[derive(Parser, Debug)]
#[clap(version, about = "Track, filter and chart personal expenses from the terminal")]
struct Args {
    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Path to the JSON expense store
    #[arg(short = 'f', long = "data-file")]
    data_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense
    Add {
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// One of fuel, food, travel, utilities, entertainment, shopping, other
        #[arg(short, long)]
        category: Category,

        /// Amount spent, must be positive
        #[arg(short, long)]
        amount: f64,

        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an existing expense; omitted flags keep the current value
    Edit {
        id: String,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(short, long)]
        category: Option<Category>,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an expense
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Print expenses as a table
    List {
        #[arg(short, long)]
        category: Option<Category>,

        /// Only expenses on or after this date
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only expenses on or before this date
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct TrackerConfig {
    data_file: Option<String>,
}

fn config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.expense-tracker/config.json").as_ref())
}

fn load_config() -> Result<TrackerConfig> {
    let config_path = config_path();

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let config: TrackerConfig = serde_json::from_str(&content)?;
        Ok(config)
    } else {
        Ok(TrackerConfig::default())
    }
}

fn save_config(config: &TrackerConfig) -> Result<()> {
    let config_path = config_path();
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, content)?;
    Ok(())
}

fn resolve_data_file(args: &Args) -> String {
    let mut config = load_config().unwrap_or_default();

    let chosen = if let Some(flag) = &args.data_file {
        // An explicitly chosen store becomes the new default
        config.data_file = Some(flag.clone());
        if let Err(e) = save_config(&config) {
            eprintln!("Warning: could not save config: {}", e);
        }
        flag.clone()
    } else {
        config
            .data_file
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
    };

    shellexpand::tilde(&chosen).into_owned()
}

pub struct AppState {
    pub tracker: ExpenseTracker,
    pub criteria: FilterCriteria,
    pub selected: usize,
    pub now: NaiveDate,
    pub last_update: DateTime<Utc>,
    pub error_message: Option<String>,
    pub pending_delete: Option<String>,
    pub data_file: String,
}

impl AppState {
    fn new(tracker: ExpenseTracker, data_file: String) -> Self {
        Self {
            tracker,
            criteria: FilterCriteria::new(),
            selected: 0,
            now: Local::now().date_naive(),
            last_update: Utc::now(),
            error_message: None,
            pending_delete: None,
            data_file,
        }
    }

    pub fn visible(&self) -> Vec<&ExpenseRecord> {
        self.tracker.filtered(&self.criteria)
    }

    pub fn selected_record(&self) -> Option<&ExpenseRecord> {
        self.visible().get(self.selected).copied()
    }

    pub fn pending_delete_record(&self) -> Option<&ExpenseRecord> {
        self.pending_delete
            .as_deref()
            .and_then(|id| self.tracker.get(id))
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible().len().saturating_sub(1));
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.visible().len() {
            self.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // None -> fuel -> ... -> other -> None, like stepping through the
    // filter dropdown
    fn cycle_category_filter(&mut self) {
        let next = match self.criteria.category() {
            None => Some(Category::FIXED[0].clone()),
            Some(current) => Category::FIXED
                .iter()
                .position(|category| category == current)
                .and_then(|index| Category::FIXED.get(index + 1))
                .cloned(),
        };
        self.criteria.set_category(next);
        self.clamp_selection();
    }

    fn clear_filters(&mut self) {
        self.criteria.clear();
        self.clamp_selection();
    }

    fn reload(&mut self) {
        match self.tracker.reload() {
            Ok(()) => self.error_message = None,
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.last_update = Utc::now();
        self.clamp_selection();
    }

    fn request_delete(&mut self) {
        if let Some(record) = self.selected_record() {
            self.pending_delete = Some(record.id().to_string());
        }
    }

    fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            match self.tracker.delete(&id) {
                Ok(_) => self.error_message = None,
                Err(e) => self.error_message = Some(e.to_string()),
            }
            self.last_update = Utc::now();
            self.clamp_selection();
        }
    }

    fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

pub struct App {
    state: AppState,
    exit: bool,
}

impl App {
    pub fn new(tracker: ExpenseTracker, data_file: String) -> Self {
        Self {
            state: AppState::new(tracker, data_file),
            exit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            self.state.now = Local::now().date_naive();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(100))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            if self.exit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(12),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        HeaderWidget::render(frame, chunks[0], &self.state);
        SummaryWidget::render(frame, chunks[1], &self.state);
        ChartsWidget::render(frame, chunks[2], &self.state);
        ExpenseTableWidget::render(frame, chunks[3], &self.state);
        ShortcutsWidget::render(frame, chunks[4], &self.state);

        if self.state.pending_delete.is_some() {
            ConfirmDeleteWidget::render(frame, area, &self.state);
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key_event) = event {
            if key_event.kind == KeyEventKind::Press {
                // The confirmation popup swallows everything but its own keys
                if self.state.pending_delete.is_some() {
                    match key_event.code {
                        KeyCode::Char('y') | KeyCode::Enter => self.state.confirm_delete(),
                        KeyCode::Char('n') | KeyCode::Esc => self.state.cancel_delete(),
                        _ => {}
                    }
                    return;
                }

                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
                    KeyCode::Char('r') => self.state.reload(),
                    KeyCode::Up | KeyCode::Char('k') => self.state.select_previous(),
                    KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),
                    KeyCode::Char('c') => self.state.cycle_category_filter(),
                    KeyCode::Char('x') => self.state.clear_filters(),
                    KeyCode::Char('d') => self.state.request_delete(),
                    _ => {}
                }
            }
        }
    }
}

fn run_add(
    tracker: &mut ExpenseTracker,
    date: Option<NaiveDate>,
    category: Category,
    amount: f64,
    description: Option<String>,
) -> Result<()> {
    // The date defaults to today, like the entry form did
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let record = tracker.add(ExpenseDraft::new(
        date,
        category,
        amount,
        description.unwrap_or_default(),
    ))?;

    println!(
        "Added expense {}: {} {} ${:.2} ({})",
        record.id(),
        record.date(),
        record.category(),
        record.amount(),
        record.description()
    );
    Ok(())
}

fn run_edit(
    tracker: &mut ExpenseTracker,
    id: &str,
    date: Option<NaiveDate>,
    category: Option<Category>,
    amount: Option<f64>,
    description: Option<String>,
) -> Result<()> {
    let existing = tracker
        .get(id)
        .cloned()
        .ok_or_else(|| expense_tracker_core::Error::NotFound(id.to_string()))?;

    // Flags left out keep the current value, like the prefilled edit form
    let draft = ExpenseDraft::new(
        date.unwrap_or(existing.date()),
        category.unwrap_or_else(|| existing.category().clone()),
        amount.unwrap_or(existing.amount()),
        description.unwrap_or_else(|| existing.description().to_string()),
    );

    let record = tracker.update(id, draft)?;
    println!(
        "Updated expense {}: {} {} ${:.2} ({})",
        record.id(),
        record.date(),
        record.category(),
        record.amount(),
        record.description()
    );
    Ok(())
}

fn run_delete(tracker: &mut ExpenseTracker, id: &str, yes: bool) -> Result<()> {
    if !yes {
        let Some(record) = tracker.get(id) else {
            println!("No expense with id '{}'; nothing to delete.", id);
            return Ok(());
        };

        print!(
            "Delete expense {} ({} ${:.2} on {})? [y/N] ",
            record.id(),
            record.category(),
            record.amount(),
            record.date()
        );
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if tracker.delete(id)? {
        println!("Deleted expense {}.", id);
    } else {
        println!("No expense with id '{}'; nothing to delete.", id);
    }
    Ok(())
}

fn build_criteria(
    category: Option<Category>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> FilterCriteria {
    let mut criteria = FilterCriteria::new();
    if let Some(category) = category {
        criteria = criteria.with_category(category);
    }
    if let Some(from) = from {
        criteria = criteria.with_date_from(from);
    }
    if let Some(to) = to {
        criteria = criteria.with_date_to(to);
    }
    criteria
}

fn run_list(
    tracker: &ExpenseTracker,
    category: Option<Category>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let criteria = build_criteria(category, from, to);
    let matches = tracker.filtered(&criteria);

    if matches.is_empty() {
        println!("No expenses found matching your filters.");
        return Ok(());
    }

    println!(
        "{:<14} {:<11} {:<14} {:>10}  {}",
        "ID", "DATE", "CATEGORY", "AMOUNT", "DESCRIPTION"
    );
    for record in &matches {
        println!(
            "{:<14} {:<11} {:<14} {:>10}  {}",
            record.id(),
            record.date().to_string(),
            record.category().to_string(),
            format!("${:.2}", record.amount()),
            record.description()
        );
    }

    let total: f64 = matches.iter().map(|record| record.amount()).sum();
    println!();
    println!("{} expenses, ${:.2} total", matches.len(), total);
    Ok(())
}

fn run_dashboard(tracker: ExpenseTracker, data_file: String) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = App::new(tracker, data_file);

    let result = app.run(&mut terminal);

    ratatui::restore();

    result
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(io::stderr)
            .init();
    }

    let data_file = resolve_data_file(&args);
    let mut tracker = ExpenseTracker::open(&data_file)?;

    match args.command {
        Some(Command::Add {
            date,
            category,
            amount,
            description,
        }) => run_add(&mut tracker, date, category, amount, description),
        Some(Command::Edit {
            id,
            date,
            category,
            amount,
            description,
        }) => run_edit(&mut tracker, &id, date, category, amount, description),
        Some(Command::Delete { id, yes }) => run_delete(&mut tracker, &id, yes),
        Some(Command::List { category, from, to }) => run_list(&tracker, category, from, to),
        None => run_dashboard(tracker, data_file),
    }
}
