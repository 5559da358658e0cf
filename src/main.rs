use domain::gateway::insight::NoInsight;
use domain::InMemoryReservationStore;
use events::EventPublisher;
use log::*;
use service::{config::Config, logging::Logger};
use sse::{Manager, SseDomainEventHandler};
use std::sync::Arc;
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let sse_manager = Arc::new(Manager::new());
    let event_publisher = Arc::new(
        EventPublisher::new().with_handler(Arc::new(SseDomainEventHandler::new(
            sse_manager.clone(),
        ))),
    );
    let reservation_store = Arc::new(InMemoryReservationStore::new());

    let app_state = AppState::new(
        config,
        reservation_store,
        event_publisher,
        sse_manager,
        Arc::new(NoInsight),
    );

    if let Err(e) = web::init_server(app_state).await {
        error!("Server failed to start: {e}");
        std::process::exit(1);
    }
}
