use std::{
    fs::OpenOptions,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack_rs::{
    AppState, build_router, graceful_shutdown, local_today,
    auth::WebhookAuthenticator,
    stores::sqlite::{
        SQLiteBudgetStore, SQLiteCategoryStore, SQLiteGoalStore, SQLiteTransactionStore,
    },
};

/// The REST API server for fintrack_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone for date bucketing, e.g. 'Pacific/Auckland'.
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// The base URL of the webhook that issues and verifies one-time codes.
    #[arg(long)]
    auth_webhook_url: String,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    // Fail fast on a bad timezone rather than erroring on every request.
    if let Err(error) = local_today(&args.timezone) {
        eprintln!("Invalid timezone {:?}: {error}", args.timezone);
        std::process::exit(1);
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open database.");
    fintrack_rs::initialize_db(&conn).expect("Could not initialize database.");
    let conn = Arc::new(Mutex::new(conn));

    let app_config = AppState::new(
        SQLiteCategoryStore::new(conn.clone()),
        SQLiteTransactionStore::new(conn.clone()),
        SQLiteBudgetStore::new(conn.clone()),
        SQLiteGoalStore::new(conn.clone()),
        WebhookAuthenticator::new(args.auth_webhook_url),
        &args.timezone,
    );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_config));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
