use std::sync::Arc;

use engine::{Engine, EngineError, MemoryStore, RecordStore, RecordingNotifier};
use server::ServerState;
use store_client::{ClientError, RecordClient};

mod settings;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("record store client error: {0}")]
    Client(#[from] ClientError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finance={level},server={level},engine={level},store_client={level},notify={level}",
            level = settings.app.level
        ))
        .init();

    let store: Arc<dyn RecordStore> = if settings.store.in_memory {
        tracing::warn!("Using an in-memory record store, data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("Using record store at {}", settings.store.base_url);
        Arc::new(RecordClient::new(
            &settings.store.base_url,
            settings.store.token.clone(),
            settings.store.timeout(),
        )?)
    };

    let notifications = Arc::new(RecordingNotifier::with_capacity(
        settings.server.notification_capacity,
    ));
    let engine = Engine::builder()
        .store(store)
        .notifier(notifications.clone())
        .build()?;

    let listener = tokio::net::TcpListener::bind(settings.server.addr()).await?;
    server::run_with_listener(ServerState::new(engine, notifications), listener).await?;

    Ok(())
}
