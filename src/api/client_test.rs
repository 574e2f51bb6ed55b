#[cfg(test)]
mod tests {
    use crate::api::ExpenseClient;
    use crate::error::{AppError, Result};
    use crate::models::{Expense, ExpenseDraft, ExpenseList};
    use mockito::Matcher;
    use reqwest::StatusCode;
    use serde_json::json; // For creating JSON bodies easily

    // Helper to create an expense record for mock responses
    fn create_test_expense(id: u64, description: &str, amount: f64, date: &str) -> Expense {
        Expense {
            id,
            description: description.to_string(),
            amount,
            date: date.to_string(),
        }
    }

    fn lunch_draft() -> ExpenseDraft {
        ExpenseDraft {
            description: "Lunch".to_string(),
            amount: 10.5,
            date: "2023-11-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_expenses_success() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&server.url());

        let response_body = ExpenseList {
            expenses: vec![
                create_test_expense(1, "Dinner", 15.0, "2023-11-02"),
                create_test_expense(2, "Lunch", 10.5, "2023-11-01"),
            ],
        };
        let m = server
            .mock("GET", "/expenses")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&response_body).unwrap())
            .create_async()
            .await;

        let expenses = client.list_expenses().await?;

        m.assert_async().await;
        assert_eq!(expenses, response_body.expenses);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_expenses_empty() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&format!("{}/", server.url())); // trailing slash trimmed

        let _m = server
            .mock("GET", "/expenses")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"expenses": []}"#)
            .create_async()
            .await;

        assert!(client.list_expenses().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_success() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&server.url());

        let created = create_test_expense(2, "Lunch", 10.5, "2023-11-01");
        let m = server
            .mock("POST", "/expenses")
            .match_body(Matcher::Json(json!({
                "description": "Lunch",
                "amount": 10.5,
                "date": "2023-11-01"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&created).unwrap())
            .create_async()
            .await;

        let result = client.create_expense(&lunch_draft()).await?;

        m.assert_async().await;
        assert_eq!(result, created);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_bad_request() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&server.url());

        let _m = server
            .mock("POST", "/expenses")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": "Missing one or more required fields: description, amount, date"}"#,
            )
            .create_async()
            .await;

        let result = client.create_expense(&lunch_draft()).await;

        match result {
            Err(AppError::Status { status, message }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(message.contains("Missing one or more required fields"));
            },
            other => panic!("Expected Status error, got {:?}", other),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_update_expense_success() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&server.url());

        let draft = ExpenseDraft {
            description: "Updated Dinner".to_string(),
            amount: 20.0,
            date: "2023-11-03".to_string(),
        };
        let updated = create_test_expense(1, "Updated Dinner", 20.0, "2023-11-03");
        let m = server
            .mock("PUT", "/expenses/1")
            .match_body(Matcher::Json(json!({
                "description": "Updated Dinner",
                "amount": 20.0,
                "date": "2023-11-03"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&updated).unwrap())
            .create_async()
            .await;

        let result = client.update_expense(1, &draft).await?;

        m.assert_async().await;
        assert_eq!(result, updated);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_expense_not_found() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&server.url());

        let _m = server
            .mock("PUT", "/expenses/999")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Expense not found"}"#)
            .create_async()
            .await;

        let err = client.update_expense(999, &lunch_draft()).await.unwrap_err();

        assert!(matches!(
            &err,
            AppError::Status { status, .. } if *status == StatusCode::NOT_FOUND
        ));
        assert_eq!(err.to_string(), "404 Not Found: Expense not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_expense_success() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&server.url());

        let m = server
            .mock("DELETE", "/expenses/999")
            .with_status(204)
            .create_async()
            .await;

        client.delete_expense(999).await?;
        m.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_expense_unexpected_status() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let client = ExpenseClient::new(&server.url());

        let _m = server
            .mock("DELETE", "/expenses/3")
            .with_status(500)
            .with_body("internal failure")
            .create_async()
            .await;

        match client.delete_expense(3).await {
            Err(AppError::Status { status, message }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "internal failure"); // non-JSON body kept as is
            },
            other => panic!("Expected Status error, got {:?}", other),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_connection_refused_is_api_error() -> Result<()> {
        // Nothing listens on port 1.
        let client = ExpenseClient::new("http://127.0.0.1:1");

        let result = client.list_expenses().await;

        assert!(matches!(result, Err(AppError::Api(_))));

        Ok(())
    }
}
