use crate::models::AppState;
use axum::body::Bytes;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http::{HeaderMap, Request, Response, StatusCode};
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::Any;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

mod api_routes;

/// HTTP API состояния: проверка живости и просмотр журнала баланса
pub fn init(state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any);
    let trace = TraceLayer::new_for_http()
        .make_span_with(|_request: &Request<axum::body::Body>| {
            tracing::debug_span!("http-request")
        })
        .on_request(|request: &Request<axum::body::Body>, _span: &Span| {
            tracing::debug!("started {} {}", request.method(), request.uri().path())
        })
        .on_response(
            |response: &Response<axum::body::Body>, latency: Duration, _span: &Span| {
                tracing::debug!("{} in {:?}", response.status(), latency)
            },
        )
        .on_body_chunk(|chunk: &Bytes, _latency: Duration, _span: &Span| {
            tracing::debug!("sending {} bytes", chunk.len())
        })
        .on_eos(
            |_trailers: Option<&HeaderMap>, stream_duration: Duration, _span: &Span| {
                tracing::debug!("stream closed after {:?}", stream_duration)
            },
        )
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                tracing::error!("request failed: {error:?} latency: {latency:?}")
            },
        );
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes::init(state))
        .layer(trace)
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .layer(cors)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok").into_response()
}

/// Поднимает HTTP-сервер и обслуживает запросы до ошибки
pub async fn serve(addr: std::net::SocketAddr, state: AppState) -> crate::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP API слушает {addr}");
    axum::serve(listener, init(state)).await?;
    Ok(())
}
