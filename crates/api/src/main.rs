use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use storefront_api::auth::mailer::{LogMailer, MailConfig, OtpMailer, SmtpMailer};
use storefront_api::config::ServerConfig;
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_cdn::{CdnClient, CdnConfig};
use storefront_db::repositories::OtpRepo;

const OTP_PURGE_EVERY: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let cdn = CdnConfig::from_env().expect("CDN settings are incomplete");
    tracing::info!(cloud = %cdn.cloud_name, "Configuration loaded");

    let pool = connect_database().await;
    let purge = spawn_otp_purge(pool.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploader: Arc::new(CdnClient::new(cdn.clone())),
        cdn: Arc::new(cdn),
        mailer: select_mailer(),
    };
    let app = build_app_router(state, &config);

    let ip = config.host.parse().expect("HOST is not an IP address");
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot listen on {addr}: {e}"));
    tracing::info!(%addr, "Storefront API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout_secs))
        .await
        .expect("HTTP server failed");

    purge.abort();
    tracing::info!("Stopped");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storefront_api=debug,storefront_db=info,tower_http=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, check and migrate. Any failure aborts startup.
async fn connect_database() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = storefront_db::create_pool(&url)
        .await
        .expect("Cannot connect to the database");
    storefront_db::health_check(&pool)
        .await
        .expect("Database is not answering");
    storefront_db::run_migrations(&pool)
        .await
        .expect("Migrations failed");
    tracing::info!("Database ready");
    pool
}

/// SMTP when `SMTP_HOST` is set, otherwise codes only reach the log.
fn select_mailer() -> Arc<dyn OtpMailer> {
    match MailConfig::from_env() {
        Some(mail) => {
            tracing::info!(smtp_host = %mail.smtp_host, "Sign-in codes go out by SMTP");
            Arc::new(SmtpMailer::new(mail).expect("SMTP settings are invalid"))
        }
        None => {
            tracing::warn!("SMTP_HOST unset; sign-in codes are only logged");
            Arc::new(LogMailer)
        }
    }
}

fn spawn_otp_purge(pool: PgPool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(OTP_PURGE_EVERY);
        loop {
            ticker.tick().await;
            match OtpRepo::delete_expired(&pool).await {
                Ok(0) => {}
                Ok(deleted) => tracing::debug!(deleted, "Expired sign-in codes removed"),
                Err(e) => tracing::warn!(error = %e, "Sign-in code purge failed"),
            }
        }
    })
}

/// Resolves on Ctrl-C or SIGTERM. After that, in-flight requests get
/// `drain_secs` before the process exits regardless.
async fn shutdown_signal(drain_secs: u64) {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Ctrl-C handler failed");
            }
            tracing::info!("Interrupted, draining");
        }
        () = terminate => tracing::info!("Terminated, draining"),
    }

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(drain_secs)).await;
        tracing::warn!(drain_secs, "Drain window over, exiting");
        std::process::exit(0);
    });
}
