use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sadaqah_api::bootstrap::{ensure_admin, AdminSeed};
use sadaqah_api::config::ServerConfig;
use sadaqah_api::payments::stripe::StripeGateway;
use sadaqah_api::router::build_app_router;
use sadaqah_api::state::AppState;
use sadaqah_events::{EmailNotifier, EventBus};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    if config.stripe.secret_key.is_empty() {
        tracing::warn!("STRIPE_SECRET_KEY is not set, donation checkout will fail");
    }

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sadaqah_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    sadaqah_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    sadaqah_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    if let Some(seed) = AdminSeed::from_env() {
        if let Err(e) = ensure_admin(&pool, &seed).await {
            tracing::error!(error = %e, "Failed to create bootstrap admin");
        }
    }

    // --- Events ---
    let event_bus = Arc::new(EventBus::default());
    let notifier = EmailNotifier::from_env();
    let notifier_handle = tokio::spawn(notifier.run(event_bus.subscribe()));

    // --- Payments ---
    let gateway = StripeGateway::new(&config.stripe).expect("Failed to build Stripe HTTP client");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        payments: Arc::new(gateway),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // The router (and its state clones) is gone; dropping the last bus
    // handle closes the channel so the notifier drains and exits.
    tracing::info!("Server stopped accepting connections, cleaning up");
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), notifier_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// `RUST_LOG` controls filtering; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sadaqah_api=debug,sadaqah_events=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Resolve on SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
