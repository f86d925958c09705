//! Hotel Bookings server
//!
//! Loads configuration from the environment, connects to PostgreSQL (and
//! Redis when sessions live there), and serves the booking, login and admin
//! routes until Ctrl+C or SIGTERM.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hotel_bookings::adapters::http::{app_router, AppState, CookieSettings};
use hotel_bookings::adapters::{
    spawn_mail_listener, ChannelMailer, InMemorySessionStore, PostgresReservationRepository,
    PostgresRestrictionRepository, PostgresRoomRepository, PostgresUserRepository,
    RedisSessionStore,
};
use hotel_bookings::config::{AppConfig, SessionBackend};
use hotel_bookings::ports::SessionStore;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        session_backend = ?config.session.backend,
        "Configuration loaded"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    info!("Connected to PostgreSQL");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    let statement_timeout = config.database.statement_timeout();
    let sessions = session_store(&config).await?;

    let (mailer, mail_rx) = ChannelMailer::channel();
    let mail_listener = spawn_mail_listener(mail_rx);

    let state = AppState {
        rooms: Arc::new(PostgresRoomRepository::new(pool.clone(), statement_timeout)),
        reservations: Arc::new(PostgresReservationRepository::new(pool.clone(), statement_timeout)),
        restrictions: Arc::new(PostgresRestrictionRepository::new(pool.clone(), statement_timeout)),
        users: Arc::new(PostgresUserRepository::new(pool.clone(), statement_timeout)),
        sessions,
        mailer: Arc::new(mailer),
        notifications: config.email.notification_settings(),
        cookies: CookieSettings {
            name: config.session.cookie_name.clone(),
            max_age_secs: config.session.lifetime_secs,
            secure: config.secure_cookies(),
        },
    };

    let app = app_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Dropping the router dropped the last mailer, which closes the queue.
    match tokio::time::timeout(config.server.shutdown_grace(), mail_listener).await {
        Ok(Ok(sent)) => info!(sent, "Mail listener drained"),
        Ok(Err(e)) => warn!(error = %e, "Mail listener task failed"),
        Err(_) => warn!("Mail listener shutdown timed out"),
    }

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.environment.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, Box<dyn Error>> {
    let lifetime = config.session.lifetime_secs;
    match config.session.backend {
        SessionBackend::Memory => {
            let store = Arc::new(InMemorySessionStore::new(lifetime));
            let purger = store.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
                loop {
                    ticker.tick().await;
                    let purged = purger.purge_expired().await;
                    if purged > 0 {
                        tracing::debug!(purged, "Expired sessions purged");
                    }
                }
            });
            Ok(store as Arc<dyn SessionStore>)
        }
        SessionBackend::Redis => {
            let client = redis::Client::open(config.redis.url.as_str())?;
            let conn = tokio::time::timeout(
                config.redis.timeout(),
                client.get_multiplexed_tokio_connection(),
            )
            .await
            .map_err(|_| "Timed out connecting to Redis")??;
            info!("Connected to Redis");
            Ok(Arc::new(RedisSessionStore::new(
                conn,
                config.redis.key_prefix.clone(),
                lifetime,
            )))
        }
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal"),
        () = terminate => info!("Received SIGTERM signal"),
    }
}
