//! Defines the expense record and the request bodies exchanged with the API.
//!
//! Includes structs for:
//! - The persisted record (`Expense`) and the list envelope (`ExpenseList`).
//! - Create and update bodies as they arrive on the wire (`NewExpense`, `ExpensePatch`).
//! - Their validated forms used by the store (`ExpenseDraft`, `ExpenseUpdate`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned when a create body lacks one of the required fields.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing one or more required fields: description, amount, date";

/// A single expense entry, as stored in the backing file and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub description: String,
    pub amount: f64,
    pub date: String, // YYYY-MM-DD, only checked by the CLI
}

/// Response envelope for `GET /expenses`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseList {
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Reasons a create or update body is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpenseInputError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// An amount as supplied by a caller: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Coerces the amount to a finite `f64`.
    pub fn to_f64(&self) -> Result<f64, ExpenseInputError> {
        let value = match self {
            Amount::Number(value) => *value,
            Amount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ExpenseInputError::InvalidAmount(text.clone()))?,
        };

        // serde_json writes non-finite floats as null, which would not load back.
        if !value.is_finite() {
            return Err(ExpenseInputError::InvalidAmount(value.to_string()));
        }
        Ok(value)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

/// Body of `POST /expenses`. Every field is optional on the wire so that
/// absence can be reported as a single "missing fields" error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewExpense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl NewExpense {
    /// Checks that all required fields are present and coerces the amount.
    pub fn validate(self) -> Result<ExpenseDraft, ExpenseInputError> {
        match (self.description, self.amount, self.date) {
            (Some(description), Some(amount), Some(date)) => Ok(ExpenseDraft {
                description,
                amount: amount.to_f64()?,
                date,
            }),
            _ => Err(ExpenseInputError::MissingFields),
        }
    }
}

/// Body of `PUT /expenses/{id}`. Each field is independently optional;
/// unknown keys are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ExpensePatch {
    /// Coerces the amount, if any, without touching any record.
    pub fn validate(self) -> Result<ExpenseUpdate, ExpenseInputError> {
        let amount = self.amount.as_ref().map(Amount::to_f64).transpose()?;
        Ok(ExpenseUpdate {
            description: self.description,
            amount,
            date: self.date,
        })
    }
}

/// A fully specified expense without an id, ready to be stored or sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub date: String,
}

impl ExpenseDraft {
    pub fn into_expense(self, id: u64) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            date: self.date,
        }
    }
}

impl From<&ExpenseDraft> for NewExpense {
    fn from(draft: &ExpenseDraft) -> Self {
        Self {
            description: Some(draft.description.clone()),
            amount: Some(draft.amount.into()),
            date: Some(draft.date.clone()),
        }
    }
}

impl From<&ExpenseDraft> for ExpensePatch {
    fn from(draft: &ExpenseDraft) -> Self {
        Self {
            description: Some(draft.description.clone()),
            amount: Some(draft.amount.into()),
            date: Some(draft.date.clone()),
        }
    }
}

/// Validated partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
}

impl ExpenseUpdate {
    /// Merges the supplied fields into `expense`. The id is never changed.
    pub fn apply_to(self, expense: &mut Expense) {
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn dinner() -> Expense {
        Expense {
            id: 1,
            description: "Dinner".to_string(),
            amount: 15.0,
            date: "2023-11-02".to_string(),
        }
    }

    #[test]
    fn test_expense_serializes_fields_in_order() {
        let body = serde_json::to_string(&dinner()).unwrap();
        assert_eq!(
            body,
            r#"{"id":1,"description":"Dinner","amount":15.0,"date":"2023-11-02"}"#
        );
    }

    #[test]
    fn test_new_expense_validate_complete() {
        let new: NewExpense = serde_json::from_value(json!({
            "description": "Lunch",
            "amount": 10.5,
            "date": "2023-11-01",
            "category": "food" // ignored
        }))
        .unwrap();

        let draft = new.validate().unwrap();
        assert_eq!(draft.description, "Lunch");
        assert!((draft.amount - 10.5).abs() < 1e-9);
        assert_eq!(draft.date, "2023-11-01");
    }

    #[rstest]
    #[case(json!({"amount": 1.0, "date": "2023-11-01"}))]
    #[case(json!({"description": "Lunch", "date": "2023-11-01"}))]
    #[case(json!({"description": "Lunch", "amount": 1.0}))]
    #[case(json!({"description": "Lunch"}))]
    #[case(json!({}))]
    fn test_new_expense_missing_fields(#[case] body: serde_json::Value) {
        let new: NewExpense = serde_json::from_value(body).unwrap();
        assert_eq!(new.validate(), Err(ExpenseInputError::MissingFields));
    }

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(
            ExpenseInputError::MissingFields.to_string(),
            "Missing one or more required fields: description, amount, date"
        );
    }

    #[rstest]
    #[case(json!(12), 12.0)]
    #[case(json!(10.5), 10.5)]
    #[case(json!("10.5"), 10.5)]
    #[case(json!(" 7 "), 7.0)]
    fn test_amount_coercion(#[case] raw: serde_json::Value, #[case] expected: f64) {
        let amount: Amount = serde_json::from_value(raw).unwrap();
        assert!((amount.to_f64().unwrap() - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case("ten")]
    #[case("")]
    #[case("inf")]
    #[case("NaN")]
    fn test_amount_coercion_rejects(#[case] raw: &str) {
        let amount = Amount::Text(raw.to_string());
        assert!(matches!(
            amount.to_f64(),
            Err(ExpenseInputError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let patch: ExpensePatch =
            serde_json::from_value(json!({"amount": "20", "note": "dropped"})).unwrap();
        let mut expense = dinner();
        patch.validate().unwrap().apply_to(&mut expense);

        assert_eq!(expense.id, 1);
        assert_eq!(expense.description, "Dinner");
        assert!((expense.amount - 20.0).abs() < 1e-9);
        assert_eq!(expense.date, "2023-11-02");
    }

    #[test]
    fn test_patch_ignores_id_key() {
        let patch: ExpensePatch =
            serde_json::from_value(json!({"id": 42, "description": "Brunch"})).unwrap();
        let mut expense = dinner();
        patch.validate().unwrap().apply_to(&mut expense);

        assert_eq!(expense.id, 1);
        assert_eq!(expense.description, "Brunch");
    }

    #[test]
    fn test_draft_converts_to_full_bodies() {
        let draft = ExpenseDraft {
            description: "Taxi".to_string(),
            amount: 8.25,
            date: "2024-02-29".to_string(),
        };

        let body = serde_json::to_value(NewExpense::from(&draft)).unwrap();
        assert_eq!(
            body,
            json!({"description": "Taxi", "amount": 8.25, "date": "2024-02-29"})
        );
        assert_eq!(
            serde_json::to_value(ExpensePatch::from(&draft)).unwrap(),
            body
        );
    }
}
