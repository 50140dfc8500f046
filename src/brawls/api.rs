use axum::{debug_handler, extract::{Path, State}, http::StatusCode, Json};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::AppResult;

use super::{
    model::{Brawl, CreateBrawlBody, NewSong, VotesBody, WinnerBody},
    store, winner,
};

#[debug_handler]
pub(crate) async fn get_brawl(
    State(db_pool): State<SqlitePool>,
    Path(brawl_id): Path<String>,
) -> AppResult<Json<Brawl>> {
    Ok(Json(store::get_brawl(&db_pool, &brawl_id).await?))
}

#[debug_handler]
pub(crate) async fn create_brawl(
    State(db_pool): State<SqlitePool>,
    body: Option<Json<CreateBrawlBody>>,
) -> AppResult<Json<Brawl>> {
    let brawl_id = body
        .and_then(|Json(CreateBrawlBody { id })| id)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    Ok(Json(store::create_brawl(&db_pool, &brawl_id).await?))
}

#[debug_handler]
pub(crate) async fn delete_brawl(
    State(db_pool): State<SqlitePool>,
    Path(brawl_id): Path<String>,
) -> AppResult<StatusCode> {
    store::delete_brawl(&db_pool, &brawl_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler]
pub(crate) async fn add_song(
    State(db_pool): State<SqlitePool>,
    Path(brawl_id): Path<String>,
    Json(song): Json<NewSong>,
) -> AppResult<Json<Brawl>> {
    Ok(Json(store::add_song(&db_pool, &brawl_id, song).await?))
}

#[debug_handler]
pub(crate) async fn set_votes(
    State(db_pool): State<SqlitePool>,
    Path((brawl_id, song_id)): Path<(String, String)>,
    Json(VotesBody { votes }): Json<VotesBody>,
) -> AppResult<Json<Brawl>> {
    Ok(Json(store::set_votes(&db_pool, &brawl_id, &song_id, votes).await?))
}

#[debug_handler]
pub(crate) async fn cast_vote(
    State(db_pool): State<SqlitePool>,
    Path((brawl_id, song_id)): Path<(String, String)>,
) -> AppResult<Json<Brawl>> {
    Ok(Json(store::cast_vote(&db_pool, &brawl_id, &song_id).await?))
}

#[debug_handler]
pub(crate) async fn select_winner(
    State(db_pool): State<SqlitePool>,
    Path(brawl_id): Path<String>,
) -> AppResult<Json<Brawl>> {
    Ok(Json(winner::select_winner(&db_pool, &brawl_id).await?))
}

#[debug_handler]
pub(crate) async fn set_winner(
    State(db_pool): State<SqlitePool>,
    Path(brawl_id): Path<String>,
    Json(WinnerBody { winner_id }): Json<WinnerBody>,
) -> AppResult<Json<Brawl>> {
    Ok(Json(store::set_winner(&db_pool, &brawl_id, &winner_id).await?))
}

#[debug_handler]
pub(crate) async fn clear_winner(
    State(db_pool): State<SqlitePool>,
    Path(brawl_id): Path<String>,
) -> AppResult<Json<Brawl>> {
    Ok(Json(store::clear_winner(&db_pool, &brawl_id).await?))
}
