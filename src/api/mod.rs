// API module for the game-catalog HTTP server

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::catalog::GameStore;
use crate::ingest::feeds::FeedClient;
use crate::util::db::Db;

pub use server::ApiServer;

/// Shared application state handed to every handler.
pub struct AppState {
    pub db: Db,
    pub store: Arc<dyn GameStore>,
    pub feeds: FeedClient,
}
