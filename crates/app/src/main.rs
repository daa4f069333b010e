mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_predictor={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let predictor = engine::Predictor::builder()
        .horizon_days(settings.prediction.horizon_days)
        .build();
    tracing::info!(
        horizon_days = predictor.horizon_days(),
        "expense predictor ready"
    );

    let options = server::ServerOptions {
        allowed_origin: settings.server.allowed_origin,
    };
    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    if let Err(err) = server::run_with_listener(predictor, &options, listener).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}
