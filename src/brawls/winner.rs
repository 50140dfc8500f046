use rand::{rngs::StdRng, Rng, SeedableRng};
use sqlx::SqlitePool;

use super::{model::{Brawl, Song}, store::{self, StoreResult}};

fn weight(song: &Song) -> u64 {
    u64::try_from(song.votes).unwrap_or(0)
}

/// Weighted draw: every song owns as many slots as it has votes, one slot in
/// `[0, total)` is picked uniformly and its owner wins.
///
/// Slots are located with a binary search over running totals instead of
/// expanding one entry per vote. Songs with no votes own no slots, and `None`
/// comes back when no song owns any.
pub fn draw<'a, R: Rng + ?Sized>(songs: &'a [Song], rng: &mut R) -> Option<&'a Song> {
    let bounds: Vec<u64> = songs
        .iter()
        .scan(0u64, |total, song| {
            *total = total.saturating_add(weight(song));
            Some(*total)
        })
        .collect();

    let total = bounds.last().copied().unwrap_or(0);
    if total == 0 {
        return None;
    }

    let slot = ((rng.random::<f64>() * total as f64) as u64).min(total - 1);
    songs.get(bounds.partition_point(|&bound| bound <= slot))
}

/// Draws a winner for `brawl_id` and stores it.
pub async fn select_winner(db_pool: &SqlitePool, brawl_id: &str) -> StoreResult<Brawl> {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    select_winner_with(db_pool, brawl_id, &mut rng).await
}

/// Reading the songs and writing the winner share one transaction, so the
/// stored winner is always drawn from the songs that existed at commit time.
/// The transaction takes the write lock up front: a deferred one would fail
/// with `SQLITE_BUSY` when two draws try to upgrade their read locks at once.
pub async fn select_winner_with<R: Rng + Send>(
    db_pool: &SqlitePool,
    brawl_id: &str,
    rng: &mut R,
) -> StoreResult<Brawl> {
    let mut tx = db_pool.begin_with("BEGIN IMMEDIATE").await?;
    let songs = store::fetch_songs(&mut *tx, brawl_id).await?;

    let Some(winner) = draw(&songs, rng) else {
        tx.rollback().await?;
        tracing::debug!(brawl_id, songs = songs.len(), "no winner to draw");
        return store::get_brawl(db_pool, brawl_id).await;
    };

    store::write_winner(&mut *tx, brawl_id, Some(winner.id.as_str())).await?;
    tx.commit().await?;

    tracing::info!(brawl_id, winner_id = %winner.id, votes = winner.votes, "winner drawn");
    store::get_brawl(db_pool, brawl_id).await
}
