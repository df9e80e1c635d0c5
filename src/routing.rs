//! Defines the endpoints for the REST API and glues them to the handlers in
//! [routes](crate::routes).

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{
    AppState, endpoints,
    auth::ChallengeAuthenticator,
    logging::logging_middleware,
    routes::{auth, budgets, categories, goals, reports, transactions},
    stores::{BudgetStore, CategoryStore, GoalStore, TransactionStore},
};

/// Create a router for the REST API with all endpoints registered.
pub fn build_router<C, T, B, G, A>(state: AppState<C, T, B, G, A>) -> Router
where
    C: CategoryStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
    B: BudgetStore + Clone + Send + Sync + 'static,
    G: GoalStore + Clone + Send + Sync + 'static,
    A: ChallengeAuthenticator + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::CATEGORIES,
            get(categories::get_categories::<C>).post(categories::create_category::<C>),
        )
        .route(
            endpoints::CATEGORY,
            put(categories::update_category::<C>).delete(categories::delete_category::<C>),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(transactions::get_transactions::<T>).post(transactions::create_transaction::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            put(transactions::update_transaction::<T>)
                .delete(transactions::delete_transaction::<T>),
        )
        .route(
            endpoints::BUDGETS,
            get(budgets::get_budgets::<B, C, T>).post(budgets::create_budget::<B, C, T>),
        )
        .route(
            endpoints::BUDGET,
            put(budgets::update_budget::<B, C, T>).delete(budgets::delete_budget::<B, C, T>),
        )
        .route(
            endpoints::GOALS,
            get(goals::get_goals::<G>).post(goals::create_goal::<G>),
        )
        .route(
            endpoints::GOAL,
            put(goals::update_goal::<G>).delete(goals::delete_goal::<G>),
        )
        .route(endpoints::GOAL_FUNDS, post(goals::add_funds_to_goal::<G>))
        .route(endpoints::REPORT_SUMMARY, get(reports::get_summary::<C, T>))
        .route(
            endpoints::REPORT_CATEGORIES,
            get(reports::get_category_breakdown::<C, T>),
        )
        .route(endpoints::REPORT_TRENDS, get(reports::get_trends::<C, T>))
        .route(
            endpoints::AUTH_CHALLENGE,
            post(auth::request_challenge::<A>),
        )
        .route(endpoints::AUTH_VERIFY, post(auth::verify_challenge::<A>))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod api_tests {
    use std::sync::{Arc, Mutex};

    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState, auth::StubAuthenticator, db::initialize, endpoints, endpoints::format_endpoint,
        local_today,
        stores::sqlite::{
            SQLiteBudgetStore, SQLiteCategoryStore, SQLiteGoalStore, SQLiteTransactionStore,
        },
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        initialize(&connection.lock().unwrap()).unwrap();

        let state = AppState::new(
            SQLiteCategoryStore::new(connection.clone()),
            SQLiteTransactionStore::new(connection.clone()),
            SQLiteBudgetStore::new(connection.clone()),
            SQLiteGoalStore::new(connection),
            StubAuthenticator,
            "UTC",
        );

        TestServer::new(build_router(state))
    }

    async fn create_category(server: &TestServer, name: &str, kind: &str) -> i64 {
        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({"name": name, "type": kind, "color": "blue", "icon": null}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        response.json::<Value>()["id"].as_i64().unwrap()
    }

    async fn create_transaction(server: &TestServer, amount: f64, kind: &str, category_id: i64) {
        let today = local_today("UTC").unwrap();
        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "test",
                "amount": amount,
                "date": today.to_string(),
                "type": kind,
                "category_id": category_id,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn summary_reflects_the_full_ledger() {
        let server = get_test_server();
        let salary = create_category(&server, "Salary", "income").await;
        let rent = create_category(&server, "Rent", "expense").await;
        let groceries = create_category(&server, "Groceries", "expense").await;
        create_transaction(&server, 5000.0, "income", salary).await;
        create_transaction(&server, 1200.0, "expense", rent).await;
        create_transaction(&server, 250.0, "expense", groceries).await;

        let response = server.get(endpoints::REPORT_SUMMARY).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "income": 5000.0,
            "expense": 1450.0,
            "balance": 3550.0,
        }));
    }

    #[tokio::test]
    async fn budget_list_reports_spent_utilization_and_tier() {
        let server = get_test_server();
        let groceries = create_category(&server, "Groceries", "expense").await;
        server
            .post(endpoints::BUDGETS)
            .json(&json!({"category_id": groceries, "amount": 800.0, "period": "monthly"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        create_transaction(&server, 250.0, "expense", groceries).await;

        let response = server.get(endpoints::BUDGETS).await;

        response.assert_status_ok();
        let budgets = response.json::<Value>();
        assert_eq!(budgets[0]["spent"], json!(250.0));
        assert_eq!(budgets[0]["utilization"], json!(31.25));
        assert_eq!(budgets[0]["tier"], json!("safe"));
    }

    #[tokio::test]
    async fn adding_funds_moves_goal_progress() {
        let server = get_test_server();
        let response = server
            .post(endpoints::GOALS)
            .json(&json!({
                "name": "Emergency fund",
                "target_amount": 10000.0,
                "current_amount": 2500.0,
                "target_date": "2030-12-31",
                "description": null,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let goal_id = response.json::<Value>()["id"].as_i64().unwrap();

        let response = server
            .post(&format_endpoint(endpoints::GOAL_FUNDS, goal_id))
            .json(&json!({"amount": 3000.0}))
            .await;

        response.assert_status_ok();
        let goal = response.json::<Value>();
        assert_eq!(goal["current_amount"], json!(5500.0));
        assert_eq!(goal["progress"], json!(55.0));
    }

    #[tokio::test]
    async fn deleting_a_transaction_lowers_the_summary() {
        let server = get_test_server();
        let groceries = create_category(&server, "Groceries", "expense").await;
        create_transaction(&server, 250.0, "expense", groceries).await;
        let transactions = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
        let transaction_id = transactions[0]["id"].as_i64().unwrap();

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, transaction_id))
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);

        let response = server.get(endpoints::REPORT_SUMMARY).await;
        response.assert_json(&json!({"income": 0.0, "expense": 0.0, "balance": 0.0}));
    }

    #[tokio::test]
    async fn missing_resources_return_json_errors() {
        let server = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::GOAL, 999))
            .await;

        response.assert_status(axum::http::StatusCode::NOT_FOUND);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn invalid_payloads_return_unprocessable_entity() {
        let server = get_test_server();
        let groceries = create_category(&server, "Groceries", "expense").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "test",
                "amount": -5.0,
                "date": "2025-01-15",
                "type": "expense",
                "category_id": groceries,
            }))
            .await;

        response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn auth_flow_round_trips_through_the_stub_webhook() {
        let server = get_test_server();

        let response = server
            .post(endpoints::AUTH_CHALLENGE)
            .json(&json!({"identity": "user@example.com"}))
            .await;
        response.assert_status_ok();
        let challenge_id = response.json::<Value>()["challenge_id"].clone();

        let response = server
            .post(endpoints::AUTH_VERIFY)
            .json(&json!({"challenge_id": challenge_id.clone(), "code": "123456"}))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"outcome": "granted"}));

        let response = server
            .post(endpoints::AUTH_VERIFY)
            .json(&json!({"challenge_id": challenge_id, "code": "000000"}))
            .await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({"outcome": "denied"}));
    }
}
