// Terminal presenter: renders pickers and comparison tables to stdout.

use colored::{ColoredString, Colorize};
use compare_core::{Catalog, ComparisonResult, Presenter};
use serde_json::Value;

const COLUMN_WIDTH: usize = 24;

#[derive(Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for TerminalPresenter {
    fn catalog_loading(&self, loading: bool) {
        if loading {
            println!("{}", "Loading starships...".dimmed());
        }
    }

    fn populate_pickers(&self, catalog: &Catalog) {
        let selection = catalog.selection();
        for (index, ship) in catalog.ships().iter().enumerate() {
            let marker = match (index == selection.left, index == selection.right) {
                (true, true) => "LR",
                (true, false) => "L ",
                (false, true) => " R",
                (false, false) => "  ",
            };
            println!("{} {:>4}  {}", marker.bold(), ship.id, ship.name);
        }
    }

    fn comparison_loading(&self, loading: bool) {
        if loading {
            println!("{}", "Comparing...".dimmed());
        }
    }

    fn selection_invalid(&self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("{}", message.yellow());
        }
    }

    fn show_comparison(&self, results: &[ComparisonResult]) {
        println!();
        for row in results {
            let (left, right) = render_row(row);
            println!("{:<26} {} {}", row.field.label().bold(), left, right);
        }
    }

    fn show_error(&self, error: &(dyn std::error::Error + 'static)) {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
}

/// Raw value as shown in a table cell.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

fn cell(value: Option<&Value>, wins: Option<bool>) -> ColoredString {
    let text = format!("{:<width$}", display_value(value), width = COLUMN_WIDTH);
    match wins {
        Some(true) => text.on_truecolor(0xFF, 0x80, 0x80).black(),
        _ => text.normal(),
    }
}

fn render_row(row: &ComparisonResult) -> (ColoredString, ColoredString) {
    (
        cell(row.left_value.as_ref(), row.left_wins),
        cell(row.right_value.as_ref(), row.right_wins),
    )
}
