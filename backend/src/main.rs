use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use migration::{Migrator, MigratorTrait};
use potpourri_backend::{config::Args, server, BackendContext};
use potpourri_core::{http::client_builder, lyrics::HttpLyricsSource};

fn init_logging(args: &Args) {
    let level = args.log_level.as_deref().unwrap_or("warn");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn prepare_db(args: &Args) -> Result<DatabaseConnection, anyhow::Error> {
    let db = potpourri_core::db::connect(&args.database_url(), args.max_connections).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_logging(&args);

    let db = prepare_db(&args).await?;
    let client = client_builder(&args.user_agent, Duration::from_secs(args.fetch_timeout)).build()?;
    let ctx = BackendContext::new(db, Arc::new(HttpLyricsSource::new(client)));

    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Listening on: {}", local_addr);

    server::serve(listener, ctx, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}
