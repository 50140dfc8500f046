mod api;
pub mod model;
pub mod store;
pub mod winner;

use axum::{routing::{get, post, put}, Router};

use crate::AppState;

pub use model::{Brawl, NewSong, Song};
pub use store::{StoreError, StoreResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(api::create_brawl))
        .route("/{brawl_id}", get(api::get_brawl).delete(api::delete_brawl))
        .route("/{brawl_id}/songs", post(api::add_song))
        .route("/{brawl_id}/songs/{song_id}/votes", put(api::set_votes))
        .route("/{brawl_id}/songs/{song_id}/vote", post(api::cast_vote))
        .route(
            "/{brawl_id}/winner",
            post(api::select_winner)
                .put(api::set_winner)
                .delete(api::clear_winner),
        )
}
