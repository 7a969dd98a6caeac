use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use server_api::{
    create_post, list_posts, receive_event, ApiContext, EventPublisher, HttpEventPublisher,
    NoopEventPublisher,
};
use shared::{
    domain::Post,
    error::ApiError,
    protocol::{CreatePostRequest, EventAck, IncomingEvent, PostsListing},
};
use storage::PostStore;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};

mod config;

use config::{load_settings, Settings};

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let publisher = build_publisher(&settings)?;
    let api = ApiContext::new(PostStore::new(), publisher);
    let app = build_router(Arc::new(AppState { api }));

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "posts service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("posts service stopped");
    Ok(())
}

fn build_publisher(settings: &Settings) -> anyhow::Result<Arc<dyn EventPublisher>> {
    match settings.event_bus_url()? {
        Some(url) => {
            info!(%url, "publishing events to event bus");
            Ok(Arc::new(HttpEventPublisher::new(
                url,
                settings.notify_timeout(),
            )?))
        }
        None => {
            warn!("no event bus configured; events will be dropped");
            Ok(Arc::new(NoopEventPublisher))
        }
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/posts", get(http_list_posts).post(http_create_post))
        .route("/events", post(http_receive_event))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_posts(State(state): State<Arc<AppState>>) -> Json<PostsListing> {
    Json(list_posts(&state.api).await)
}

async fn http_create_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), HttpError> {
    let Json(req) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::validation(format!(
                "expected a JSON body with a string `title`: {}",
                rejection.body_text()
            ))),
        )
    })?;

    let post = create_post(&state.api, req).await;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn http_receive_event(body: Bytes) -> Json<EventAck> {
    let payload = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    Json(receive_event(&IncomingEvent::from_value(payload)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
