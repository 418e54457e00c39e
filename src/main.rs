use crate::app::App;
use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::sessions::purge_sessions;
use crate::router::handle;
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod auth;
mod backend;
mod config;
mod dashboard;
mod db;
mod errors;
mod handlers;
mod report;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        error!("database initialization failed: {e}");
        std::process::exit(1);
    }
    match db.with_conn(|conn| purge_sessions(conn, auth::now_unix())) {
        Ok(n) if n > 0 => info!(purged = n, "expired sessions removed"),
        Ok(_) => {}
        Err(e) => error!("session cleanup failed: {e}"),
    }

    // 2️⃣ Backend client
    let backend = match BackendClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("backend client setup failed: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr = config.bind;
    info!(%addr, backend = %config.backend_url, "starting server");

    let server = Server::bind(&addr).max_workers(config.max_workers);
    let app = App {
        db,
        backend: Box::new(backend),
        config,
    };

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
