// HTTP request handlers for the catalog endpoints.

use actix_web::{web, HttpResponse};

use crate::api::models::{DeleteResponse, HealthResponse};
use crate::api::AppState;
use crate::catalog::search::{GameQuery, SearchFilter};
use crate::catalog::NewGame;
use crate::error::CatalogError;
use crate::ingest;

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    // Quick database connectivity check
    let db_status = match sqlx::query_scalar::<_, bool>("SELECT true")
        .fetch_one(&state.db.pool)
        .await
    {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        database: db_status.to_string(),
    })
}

/// GET /api/games — every record, id order.
pub async fn list_games(state: web::Data<AppState>) -> Result<HttpResponse, CatalogError> {
    let games = state.store.find_all(&GameQuery::default()).await?;
    Ok(HttpResponse::Ok().json(games))
}

/// POST /api/games
pub async fn create_game(
    state: web::Data<AppState>,
    payload: web::Json<NewGame>,
) -> Result<HttpResponse, CatalogError> {
    let game = state.store.create(&payload).await?;
    tracing::info!(id = game.id, platform = %game.platform, "game created");
    Ok(HttpResponse::Ok().json(game))
}

/// PUT /api/games/{id}
pub async fn update_game(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<NewGame>,
) -> Result<HttpResponse, CatalogError> {
    let id = path.into_inner();
    match state.store.update(id, &payload).await? {
        Some(game) => Ok(HttpResponse::Ok().json(game)),
        None => Err(CatalogError::NotFound(id)),
    }
}

/// DELETE /api/games/{id}
pub async fn delete_game(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, CatalogError> {
    let id = path.into_inner();
    if !state.store.delete(id).await? {
        return Err(CatalogError::NotFound(id));
    }
    tracing::info!(id, "game deleted");
    Ok(HttpResponse::Ok().json(DeleteResponse { id }))
}

/// POST /api/games/search — invalid filter fields are dropped, not rejected.
pub async fn search_games(
    state: web::Data<AppState>,
    filter: web::Json<SearchFilter>,
) -> Result<HttpResponse, CatalogError> {
    let query = GameQuery::from_filter(&filter);
    tracing::debug!(
        name = ?query.name_contains,
        platform = ?query.platform,
        "search requested"
    );
    let games = state.store.find_all(&query).await?;
    Ok(HttpResponse::Ok().json(games))
}

/// POST /api/games/populate — run the feed ingestion pipeline and report the
/// per-record outcome summary.
pub async fn populate_games(state: web::Data<AppState>) -> Result<HttpResponse, CatalogError> {
    tracing::info!("population run requested");
    let summary = ingest::populate(state.store.as_ref(), &state.feeds).await?;
    Ok(HttpResponse::Ok().json(summary))
}
