//! Table rendering for the expense listing.

use crate::models::Expense;
use comfy_table::{presets::ASCII_MARKDOWN, Table};

/// Printed instead of a table when the collection is empty.
pub const NO_EXPENSES_MESSAGE: &str = "No expenses found.";

/// Renders expenses as an `ID | Description | Amount | Date` table.
pub fn render_expenses(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return NO_EXPENSES_MESSAGE.to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_header(vec!["ID", "Description", "Amount", "Date"]);

    for expense in expenses {
        table.add_row(vec![
            expense.id.to_string(),
            expense.description.clone(),
            format!("${:?}", expense.amount),
            expense.date.clone(),
        ]);
    }

    table.to_string()
}
