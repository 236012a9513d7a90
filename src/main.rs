use chessnotes::api::router::create_router;
use chessnotes::api::state::AppState;
use chessnotes::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --health-check flag for container health probes.
    if std::env::args().any(|a| a == "--health-check") {
        match health_check().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Health check failed: {e}");
                std::process::exit(1);
            }
        }
    }

    // Initialize tracing (structured logging).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chessnotes=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr();
    if !config.lessons_dir.is_dir() {
        tracing::warn!(
            lessons_dir = %config.lessons_dir.display(),
            "lessons directory not found; lesson catalogs and pages will be unavailable"
        );
    }
    let state = AppState::new(config);

    let app = create_router(state);

    tracing::info!(
        "chessnotes v{} starting on {bind_addr}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Request `GET /health` on the local port and require a 200.
///
/// Reuses the server's own environment configuration, so the check and the
/// server agree on the port.
async fn health_check() -> Result<(), Box<dyn std::error::Error>> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let port = AppConfig::from_env().port;
    let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", port)).await?;
    stream
        .write_all(b"GET /health HTTP/1.0\r\nConnection: close\r\n\r\n")
        .await?;

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await?;
    let reply = String::from_utf8_lossy(&reply);
    let status_line = reply.lines().next().unwrap_or_default();

    if status_is_ok(status_line) {
        Ok(())
    } else {
        Err(format!("unhealthy: {status_line:?}").into())
    }
}

/// `HTTP/1.x 200 ...` and nothing else.
fn status_is_ok(status_line: &str) -> bool {
    let mut parts = status_line.split_whitespace();
    matches!(
        (parts.next(), parts.next()),
        (Some(version), Some("200")) if version.starts_with("HTTP/")
    )
}
