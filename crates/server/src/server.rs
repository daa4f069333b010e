use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::post,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::{ServerError, predictions};
use engine::Predictor;

#[derive(Clone)]
pub struct ServerState {
    pub predictor: Arc<Predictor>,
}

/// HTTP layer options.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    /// The only origin allowed to call the API from a browser.
    pub allowed_origin: String,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

fn cors(options: &ServerOptions) -> Result<CorsLayer, ServerError> {
    let origin = HeaderValue::from_str(&options.allowed_origin).map_err(|err| {
        ServerError::Config(format!(
            "invalid allowed origin \"{}\": {err}",
            options.allowed_origin
        ))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Build the application router.
///
/// Fails only when the configured origin is not a valid header value.
pub fn router(predictor: Predictor, options: &ServerOptions) -> Result<Router, ServerError> {
    let state = ServerState {
        predictor: Arc::new(predictor),
    };

    let api = Router::new()
        .route("/predictions", post(predictions::predict))
        .layer(cors(options)?);

    Ok(Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn run_with_listener(
    predictor: Predictor,
    options: &ServerOptions,
    listener: tokio::net::TcpListener,
) -> Result<(), ServerError> {
    let app = router(predictor, options)?;
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn spawn_with_listener(
    predictor: Predictor,
    options: ServerOptions,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, ServerError> {
    let app = router(predictor, &options)?;
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
