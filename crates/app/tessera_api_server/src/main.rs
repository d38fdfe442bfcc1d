//! Tessera API server binary.
//!
//! Wires the user-pool identity client and the item store into the API router
//! and serves it until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use tessera_api::config::{ApiConfig, DEFAULT_CLAIMS_HEADER};
use tessera_core::identity::IdentityService;
use tessera_core::identity::cognito::{CognitoIdentityClient, DEFAULT_REGION, regional_endpoint};
use tessera_core::store::{MemoryRecordStore, PgRecordStore, RecordStore};
use tracing::{info, warn};
use url::Url;

/// Where items are kept.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// PostgreSQL table (`--database-url`, `--items-table`).
    Postgres,
    /// Process memory; contents are lost on exit.
    Memory,
}

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "tessera_api_server", about = "Tessera API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind_addr: String,

    /// Identity pool region; selects the default identity endpoint.
    #[arg(long, env = "REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Identity service endpoint. Defaults to the regional endpoint.
    #[arg(long, env = "IDENTITY_ENDPOINT")]
    identity_endpoint: Option<Url>,

    /// Identity pool app client id.
    #[arg(long, env = "COGNITO_CLIENT_ID")]
    client_id: Option<String>,

    /// Identity pool app client secret.
    #[arg(long, env = "COGNITO_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Item store backend.
    #[arg(long = "store", env = "ITEMS_STORE", value_enum, default_value_t = StoreKind::Postgres)]
    store: StoreKind,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/tessera"
    )]
    database_url: String,

    /// Items table name.
    #[arg(long, env = "ITEMS_TABLE", default_value = "items")]
    items_table: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Header carrying the authorizer's verified claims.
    #[arg(long, env = "CLAIMS_HEADER", default_value = DEFAULT_CLAIMS_HEADER)]
    claims_header: String,

    /// Timeout for calls to the identity service, in seconds.
    #[arg(long, default_value_t = 10)]
    upstream_timeout_secs: u64,
}

async fn build_store(args: &Args) -> Result<Arc<dyn RecordStore>, Box<dyn std::error::Error>> {
    match args.store {
        StoreKind::Memory => {
            warn!("using in-memory item store; items are lost on exit");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        StoreKind::Postgres => {
            info!(
                max_connections = args.max_connections,
                table = %args.items_table,
                "configuring connection pool"
            );
            let pool = PgPoolOptions::new()
                .max_connections(args.max_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(&args.database_url)
                .await?;
            let store = PgRecordStore::new(pool, args.items_table.as_str())?;
            store.ensure_table().await?;
            Ok(Arc::new(store))
        }
    }
}

fn build_identity(args: &Args) -> Result<Arc<dyn IdentityService>, Box<dyn std::error::Error>> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.upstream_timeout_secs))
        .build()?;
    let endpoint = match &args.identity_endpoint {
        Some(url) => url.clone(),
        None => regional_endpoint(&args.region)?,
    };
    info!(endpoint = %endpoint, "identity service endpoint");
    Ok(Arc::new(CognitoIdentityClient::new(http, endpoint)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tessera_api=debug,tessera_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    info!(bind_addr = %args.bind_addr, store = ?args.store, "starting tessera_api_server");

    let config = ApiConfig {
        bind_addr: args.bind_addr.clone(),
        client_id: args.client_id.clone(),
        client_secret: args.client_secret.clone(),
        claims_header: args.claims_header.clone(),
    };
    if config.client_credentials().is_none() {
        warn!("COGNITO_CLIENT_ID / COGNITO_CLIENT_SECRET not set; auth routes will fail");
    }

    let identity = build_identity(&args)?;
    let store = build_store(&args).await?;

    let state = tessera_api::AppState::new(identity, store, config.clone());
    let app = tessera_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
