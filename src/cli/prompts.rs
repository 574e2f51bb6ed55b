//! Terminal prompts and the local validation applied before any request is sent.

use crate::error::{AppError, Result};
use crate::models::ExpenseDraft;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};
use std::str::FromStr;

/// Date format accepted for expenses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Add,
        MenuChoice::View,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Expense",
            MenuChoice::View => "View Expenses",
            MenuChoice::Update => "Update Expense",
            MenuChoice::Delete => "Delete Expense",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::View),
            "3" => Ok(MenuChoice::Update),
            "4" => Ok(MenuChoice::Delete),
            "5" => Ok(MenuChoice::Exit),
            other => Err(AppError::InvalidInput(format!(
                "Invalid menu choice: {}",
                other
            ))),
        }
    }
}

/// Menu text printed before each choice prompt.
pub fn menu_text() -> String {
    let mut text = String::from("Expense Tracker Menu:");
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", i + 1, choice.label()));
    }
    text
}

/// Parses an amount as a finite float.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppError::InvalidInput(format!(
            "could not convert amount to a number: '{}'",
            trimmed
        ))),
    }
}

/// Checks that `raw` is a real calendar date in `YYYY-MM-DD` form.
pub fn validate_date(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    // chrono accepts unpadded fields, so pin the shape first.
    let well_formed = trimmed.len() == 10
        && trimmed
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });

    if well_formed && NaiveDate::parse_from_str(trimmed, DATE_FORMAT).is_ok() {
        Ok(trimmed.to_string())
    } else {
        Err(AppError::InvalidInput(format!(
            "date '{}' does not match format YYYY-MM-DD",
            trimmed
        )))
    }
}

/// Parses an expense id.
pub fn parse_expense_id(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| AppError::InvalidInput(format!("invalid expense id: '{}'", trimmed)))
}

fn prompt_text(prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Prompts for the numbered menu choice. Returns the raw text so the caller
/// can report unknown choices and re-prompt.
pub fn prompt_menu_choice() -> Result<String> {
    prompt_text("Enter your choice (1-5)")
}

/// Prompts for description, amount and date of a new expense.
pub fn prompt_new_expense() -> Result<ExpenseDraft> {
    let description = prompt_text("Enter expense description")?;
    let amount = parse_amount(&prompt_text("Enter expense amount")?)?;
    let date = validate_date(&prompt_text("Enter expense date (YYYY-MM-DD)")?)?;
    Ok(ExpenseDraft {
        description,
        amount,
        date,
    })
}

/// Prompts for the id of the expense to update and its replacement fields.
pub fn prompt_expense_update() -> Result<(u64, ExpenseDraft)> {
    let id = parse_expense_id(&prompt_text("Enter expense ID to update")?)?;
    let description = prompt_text("Enter new expense description")?;
    let amount = parse_amount(&prompt_text("Enter new expense amount")?)?;
    let date = validate_date(&prompt_text("Enter new expense date (YYYY-MM-DD)")?)?;
    let draft = ExpenseDraft {
        description,
        amount,
        date,
    };
    Ok((id, draft))
}

/// Prompts for the id of the expense to delete.
pub fn prompt_expense_id() -> Result<u64> {
    parse_expense_id(&prompt_text("Enter expense ID to delete")?)
}
