#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use promptpack::server;

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => match raw.trim().parse() {
            Ok(port) => port,
            Err(e) => {
                tracing::error!(%raw, error = %e, "invalid PORT");
                std::process::exit(1);
            }
        },
        Err(_) => 3000,
    };

    let app = match server::app() {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to build router");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%port, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "promptpack listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {}
