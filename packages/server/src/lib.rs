#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the relief-ops operations center.
//!
//! Exposes the triage-and-dispatch pipeline as a REST API: civilians
//! (or their relay gateways) post SOS reports, the operations console
//! reads the triage board and requests dispatches, and field apps
//! report unit movements and shelter headcounts. All state lives in
//! one in-memory [`OpsCenter`] shared across workers; restarting the
//! server starts an empty shift.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use relief_ops_dispatch::OpsCenter;

/// Shared application state.
pub struct AppState {
    /// The single operations center all handlers talk to.
    pub ops: Arc<OpsCenter>,
}

/// Starts the relief-ops API server.
///
/// Binds to `BIND_ADDR`/`PORT` (default `127.0.0.1:8080`) with
/// permissive CORS and request logging. This is a regular async
/// function — the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to
/// bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let ops = Arc::new(OpsCenter::new());
    let state = web::Data::new(AppState { ops });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/reports", web::post().to(handlers::submit_report))
                    .route("/triage", web::get().to(handlers::triage_board))
                    .route("/incidents/{id}", web::get().to(handlers::incident))
                    .route(
                        "/incidents/{id}/dispatch",
                        web::post().to(handlers::dispatch_incident),
                    )
                    .route(
                        "/incidents/{id}/resolve",
                        web::post().to(handlers::resolve_incident),
                    )
                    .route("/responders", web::get().to(handlers::responders))
                    .route("/responders", web::post().to(handlers::register_responder))
                    .route(
                        "/responders/available",
                        web::get().to(handlers::available_responders),
                    )
                    .route(
                        "/responders/{id}/location",
                        web::post().to(handlers::update_responder_location),
                    )
                    .route(
                        "/responders/{id}/on-site",
                        web::post().to(handlers::responder_on_site),
                    )
                    .route(
                        "/responders/{id}/complete",
                        web::post().to(handlers::complete_responder),
                    )
                    .route("/shelters", web::get().to(handlers::shelters))
                    .route("/shelters", web::post().to(handlers::register_shelter))
                    .route(
                        "/shelters/nearest",
                        web::get().to(handlers::nearest_shelter),
                    )
                    .route(
                        "/shelters/{id}/occupancy",
                        web::post().to(handlers::update_occupancy),
                    )
                    .route("/summary", web::get().to(handlers::summary))
                    .route("/drill", web::post().to(handlers::run_drill)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
