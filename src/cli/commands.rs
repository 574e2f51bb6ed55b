use crate::api::ExpenseClient;
use crate::cli::render::render_expenses;
use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::models::{Expense, ExpenseDraft};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

/// A menu action with the input already collected and validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create an expense
    Add(ExpenseDraft),

    /// List all expenses
    View,

    /// Replace the fields of an existing expense
    Update { id: u64, draft: ExpenseDraft },

    /// Delete an expense by id
    Delete { id: u64 },
}

impl Commands {
    /// Prefix used when reporting a failed command.
    pub fn failure_label(&self) -> &'static str {
        match self {
            Commands::Add(_) => "Error adding expense",
            Commands::View => "Error retrieving expenses",
            Commands::Update { .. } => "Error updating expense",
            Commands::Delete { .. } => "Error deleting expense",
        }
    }

    /// User-facing description of `err` raised while running this command.
    pub fn describe_failure(&self, err: &AppError) -> String {
        match err {
            AppError::Api(inner) => format!("Error connecting to server: {}", inner),
            other => format!("{}: {}", self.failure_label(), other),
        }
    }
}

/// CLI application
pub struct App {
    client: ExpenseClient,
}

impl App {
    /// Create a new CLI application talking to the configured API.
    pub fn new(config: &ClientConfig) -> Self {
        info!("Using expense API at {}", config.base_url);
        Self {
            client: ExpenseClient::new(&config.base_url),
        }
    }

    /// Run one command and print its outcome on success.
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        debug!("Running command {:?}", command);
        let output = self.execute(command).await?;
        println!("{}", output);
        Ok(())
    }

    /// Run one command and return the text to show the user.
    async fn execute(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Add(draft) => {
                let spinner = spinner("Adding expense...")?;
                let result = self.client.create_expense(&draft).await;
                spinner.finish_and_clear();

                let expense = result?;
                Ok(format!(
                    "{} {}",
                    "Expense added successfully:".green(),
                    describe(&expense)
                ))
            },
            Commands::View => {
                let spinner = spinner("Fetching expenses...")?;
                let result = self.client.list_expenses().await;
                spinner.finish_and_clear();

                let expenses = result?;
                if expenses.is_empty() {
                    return Ok(render_expenses(&expenses).yellow().to_string());
                }
                Ok(format!("{}\n{}", "Expenses:".cyan().bold(), render_expenses(&expenses)))
            },
            Commands::Update { id, draft } => {
                let spinner = spinner("Updating expense...")?;
                let result = self.client.update_expense(id, &draft).await;
                spinner.finish_and_clear();

                let expense = result?;
                Ok(format!(
                    "{} {}",
                    "Expense updated successfully:".green(),
                    describe(&expense)
                ))
            },
            Commands::Delete { id } => {
                let spinner = spinner("Deleting expense...")?;
                let result = self.client.delete_expense(id).await;
                spinner.finish_and_clear();

                result?;
                Ok(format!("Expense {} deleted successfully.", id)
                    .green()
                    .to_string())
            },
        }
    }
}

fn describe(expense: &Expense) -> String {
    format!(
        "#{} {} ${:?} on {}",
        expense.id, expense.description, expense.amount, expense.date
    )
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
