use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{budgets, categories, dashboard, goals, statistics, transactions};
use engine::{Engine, RecordingNotifier};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Must be the notifier the engine was built with.
    pub notifications: Arc<RecordingNotifier>,
}

impl ServerState {
    pub fn new(engine: Engine, notifications: Arc<RecordingNotifier>) -> Self {
        Self {
            engine: Arc::new(engine),
            notifications,
        }
    }
}

/// Pending notifications, oldest first. Reading drains them.
async fn notifications(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.notifications.take())
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .patch(transactions::update)
                .delete(transactions::delete),
        )
        .route("/transactions/month/{month}", get(transactions::by_month))
        .route(
            "/transactions/category/{category}",
            get(transactions::by_category),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route(
            "/budgets/{id}",
            get(budgets::get).patch(budgets::update).delete(budgets::delete),
        )
        .route("/budgets/month/{month}", get(budgets::by_month))
        .route("/budgets/summary/{month}", get(budgets::summary))
        .route("/budgets/spent", post(budgets::update_spent))
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get)
                .patch(categories::update)
                .delete(categories::delete),
        )
        .route("/categories/name/{name}", get(categories::by_name))
        .route("/goals", get(goals::list).post(goals::create))
        .route("/goals/summary", get(goals::summary))
        .route(
            "/goals/{id}",
            get(goals::get).patch(goals::update).delete(goals::delete),
        )
        .route("/goals/{id}/contribution", post(goals::contribute))
        .route("/stats/trend", get(statistics::trend))
        .route("/stats/breakdown/{month}", get(statistics::breakdown))
        .route("/dashboard/{month}", get(dashboard::get))
        .route("/notifications", get(notifications))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
