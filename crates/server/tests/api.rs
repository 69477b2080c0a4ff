use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use engine::{Engine, MemoryStore, RecordingNotifier};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::{ServerState, router};
use tower::ServiceExt;

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let notifications = Arc::new(RecordingNotifier::new());
    let engine = Engine::builder()
        .store(store.clone())
        .notifier(notifications.clone())
        .build()
        .unwrap();
    (router(ServerState::new(engine, notifications)), store)
}

fn seed(store: &MemoryStore, collection: &str, value: Value) -> i64 {
    let Value::Object(record) = value else {
        panic!("not an object");
    };
    store.insert(collection, record).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn transaction_crud() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "amount": 42.5,
            "category": "Food",
            "date": "2024-01-10",
            "description": "Groceries",
            "type": "expense",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["amount"], json!(42.5));
    assert_eq!(created["type"], json!("expense"));
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/transactions/{id}"),
        Some(json!({ "notes": "weekly" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["notes"], json!("weekly"));
    assert_eq!(updated["description"], json!("Groceries"));

    let (status, january) = send(&app, "GET", "/transactions/month/2024-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(january.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "DELETE", &format!("/transactions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": true }));

    let (status, body) = send(&app, "GET", &format!("/transactions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn invalid_month_is_unprocessable() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/budgets/summary/2024-13", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("2024-13"));
}

#[tokio::test]
async fn budget_summary_and_spent_sync() {
    let (app, store) = app();
    for (category, limit, spent) in [("Food", 500, 300), ("Rent", 1000, 1000)] {
        seed(
            &store,
            "budget_c",
            json!({
                "category_c": category,
                "month_c": "2024-01",
                "monthly_limit_c": limit,
                "spent_c": spent,
            }),
        );
    }

    let (status, summary) = send(&app, "GET", "/budgets/summary/2024-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalBudget"], json!(1500));
    assert_eq!(summary["totalSpent"], json!(1300));
    assert_eq!(summary["remaining"], json!(200));
    assert_eq!(summary["categories"], json!(2));

    let (status, budget) = send(
        &app,
        "POST",
        "/budgets/spent",
        Some(json!({ "category": "Food", "month": "2024-01", "amount": 350 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(budget["spent"], json!(350));

    let (status, _) = send(
        &app,
        "POST",
        "/budgets/spent",
        Some(json!({ "category": "Travel", "month": "2024-01", "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn built_in_category_delete_is_forbidden() {
    let (app, store) = app();
    let id = seed(
        &store,
        "category_c",
        json!({ "name_c": "Food", "is_custom_c": false }),
    );

    let (status, _) = send(&app, "DELETE", &format!("/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(store.len("category_c").unwrap(), 1);

    let (status, notes) = send(&app, "GET", "/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notes, json!(["Category not found or cannot be deleted"]));

    let (_, notes) = send(&app, "GET", "/notifications", None).await;
    assert_eq!(notes, json!([]));
}

#[tokio::test]
async fn goal_contribution_and_summary() {
    let (app, _) = app();
    let (status, goal) = send(
        &app,
        "POST",
        "/goals",
        Some(json!({ "name": "Bike", "targetAmount": 500, "priority": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = goal["id"].as_i64().unwrap();

    for amount in [100, 50] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/goals/{id}/contribution"),
            Some(json!({ "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, goal) = send(&app, "GET", &format!("/goals/{id}"), None).await;
    assert_eq!(goal["currentAmount"], json!(150));
    assert_eq!(goal["remaining"], json!(350));
    assert_eq!(goal["progress"], json!(30.0));
    assert_eq!(goal["completed"], json!(false));

    let (status, summary) = send(&app, "GET", "/goals/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalGoalsCount"], json!(1));
    assert_eq!(summary["activeGoalsCount"], json!(1));
    assert_eq!(summary["totalRemaining"], json!(350));

    let (status, _) = send(
        &app,
        "POST",
        "/goals/999/contribution",
        Some(json!({ "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_goal_amounts_do_not_break_requests() {
    let (app, store) = app();
    let id = seed(
        &store,
        "savings_goal_c",
        json!({ "Name": "Moon", "target_amount_c": 5e16, "current_amount_c": 5e16 }),
    );
    seed(
        &store,
        "savings_goal_c",
        json!({ "Name": "Mars", "target_amount_c": 5e16, "current_amount_c": 0 }),
    );

    let (status, body) = send(
        &app,
        "POST",
        &format!("/goals/{id}/contribution"),
        Some(json!({ "amount": 5e16 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("overflows"));

    let (status, summary) = send(&app, "GET", "/goals/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalGoalsCount"], json!(2));
    assert_eq!(summary["completedGoalsCount"], json!(1));
}

#[tokio::test]
async fn trend_window_is_validated() {
    let (app, _) = app();
    let months = vec!["2024-01"; 121].join(",");
    let (status, body) = send(&app, "GET", &format!("/stats/trend?months={months}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "GET", "/stats/trend?months=2024-01&last=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("use either months or last, not both"));
}

#[tokio::test]
async fn stats_trend_and_breakdown() {
    let (app, store) = app();
    for (kind, category, amount, date) in [
        ("expense", "Food", 50, "2024-01-03"),
        ("expense", "Food", 20, "2024-01-09"),
        ("income", "Salary", 1000, "2024-01-01"),
    ] {
        seed(
            &store,
            "transaction_c",
            json!({
                "type_c": kind,
                "category_c": category,
                "amount_c": amount,
                "date_c": date,
            }),
        );
    }

    let (status, breakdown) = send(&app, "GET", "/stats/breakdown/2024-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breakdown, json!([{ "category": "Food", "amount": 70 }]));

    let (status, trend) = send(&app, "GET", "/stats/trend?months=2024-02,2024-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        trend,
        json!([
            { "month": "2024-02", "income": 0, "expenses": 0, "net": 0 },
            { "month": "2024-01", "income": 1000, "expenses": 70, "net": 930 },
        ])
    );

    let (status, _) = send(&app, "GET", "/stats/trend?last=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_collects_every_section() {
    let (app, store) = app();
    seed(
        &store,
        "budget_c",
        json!({ "category_c": "Food", "month_c": "2024-03", "monthly_limit_c": 200, "spent_c": 50 }),
    );
    seed(
        &store,
        "transaction_c",
        json!({ "type_c": "expense", "category_c": "Food", "amount_c": 50, "date_c": "2024-03-02" }),
    );

    let (status, dashboard) = send(&app, "GET", "/dashboard/2024-03", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["month"], json!("2024-03"));
    assert_eq!(dashboard["budgetSummary"]["remaining"], json!(150));
    assert_eq!(dashboard["goals"], json!([]));
    assert_eq!(dashboard["trend"].as_array().unwrap().len(), 6);
    assert_eq!(dashboard["trend"][5]["expenses"], json!(50));
    assert_eq!(dashboard["transactions"].as_array().unwrap().len(), 1);
}
