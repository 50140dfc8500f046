use sqlx::{Sqlite, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{BrawlRow, SongRow};

use super::model::{Brawl, NewSong, Song};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("brawl {0} does not exist")]
    MissingBrawl(String),

    #[error("song {0} already exists")]
    DuplicateSong(String),

    #[error("song name must not be empty")]
    EmptySongName,

    #[error("vote count must not be negative, got {0}")]
    NegativeVotes(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Songs of a brawl in insertion order.
pub(crate) async fn fetch_songs<'e, E>(executor: E, brawl_id: &str) -> Result<Vec<Song>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows: Vec<SongRow> =
        sqlx::query_as("SELECT id,brawl_id,name,youtube_link,votes FROM songs WHERE brawl_id=? ORDER BY rowid")
            .bind(brawl_id)
            .fetch_all(executor)
            .await?;

    Ok(rows.into_iter().map(Song::from).collect())
}

pub(crate) async fn write_winner<'e, E>(executor: E, brawl_id: &str, winner_id: Option<&str>) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE brawls SET winner_id=? WHERE id=?")
        .bind(winner_id)
        .bind(brawl_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Songs plus the resolved winner. The winner only resolves if it is one of
/// this brawl's own songs.
pub async fn get_brawl(db_pool: &SqlitePool, brawl_id: &str) -> StoreResult<Brawl> {
    let Some(BrawlRow { id, winner_id }) =
        sqlx::query_as::<_, BrawlRow>("SELECT id,winner_id FROM brawls WHERE id=?")
            .bind(brawl_id)
            .fetch_optional(db_pool)
            .await?
    else {
        return Ok(Brawl::empty(brawl_id));
    };

    let songs = fetch_songs(db_pool, &id).await?;
    let winner = winner_id.and_then(|winner_id| {
        songs.iter().find(|song| song.id == winner_id).cloned()
    });

    Ok(Brawl { id, songs, winner })
}

/// Creating an existing brawl leaves it untouched and returns it as is.
pub async fn create_brawl(db_pool: &SqlitePool, brawl_id: &str) -> StoreResult<Brawl> {
    let created = sqlx::query("INSERT INTO brawls (id) VALUES (?) ON CONFLICT(id) DO NOTHING")
        .bind(brawl_id)
        .execute(db_pool)
        .await?
        .rows_affected() > 0;

    if created {
        tracing::info!(brawl_id, "brawl created");
    } else {
        tracing::debug!(brawl_id, "brawl already exists");
    }

    get_brawl(db_pool, brawl_id).await
}

/// Removes the brawl and, through the cascade, its songs. Returns whether it existed.
pub async fn delete_brawl(db_pool: &SqlitePool, brawl_id: &str) -> StoreResult<bool> {
    let deleted = sqlx::query("DELETE FROM brawls WHERE id=?")
        .bind(brawl_id)
        .execute(db_pool)
        .await?
        .rows_affected() > 0;

    if deleted {
        tracing::info!(brawl_id, "brawl deleted");
    }
    Ok(deleted)
}

pub async fn add_song(db_pool: &SqlitePool, brawl_id: &str, song: NewSong) -> StoreResult<Brawl> {
    let name = song.name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptySongName);
    }

    let song_id = song.id.unwrap_or_else(|| Uuid::now_v7().to_string());
    let youtube_link = song.youtube_link
        .map(|link| link.trim().to_owned())
        .filter(|link| !link.is_empty());

    sqlx::query("INSERT INTO songs (id,brawl_id,name,youtube_link,votes) VALUES (?,?,?,?,1)")
        .bind(&song_id)
        .bind(brawl_id)
        .bind(name)
        .bind(youtube_link)
        .execute(db_pool)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                StoreError::MissingBrawl(brawl_id.to_owned())
            } else if is_unique_violation(&err) {
                StoreError::DuplicateSong(song_id.clone())
            } else {
                StoreError::Database(err)
            }
        })?;

    tracing::info!(brawl_id, song_id = %song_id, name, "song added");
    get_brawl(db_pool, brawl_id).await
}

/// Overwrites the vote count. Unknown (brawl, song) pairs are left alone.
pub async fn set_votes(db_pool: &SqlitePool, brawl_id: &str, song_id: &str, votes: i64) -> StoreResult<Brawl> {
    if votes < 0 {
        return Err(StoreError::NegativeVotes(votes));
    }

    let updated = sqlx::query("UPDATE songs SET votes=? WHERE id=? AND brawl_id=?")
        .bind(votes)
        .bind(song_id)
        .bind(brawl_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    tracing::debug!(brawl_id, song_id, votes, updated, "votes set");
    get_brawl(db_pool, brawl_id).await
}

/// Adds one vote in a single statement, so concurrent voters never lose a vote.
pub async fn cast_vote(db_pool: &SqlitePool, brawl_id: &str, song_id: &str) -> StoreResult<Brawl> {
    let updated = sqlx::query("UPDATE songs SET votes=votes+1 WHERE id=? AND brawl_id=?")
        .bind(song_id)
        .bind(brawl_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    tracing::debug!(brawl_id, song_id, updated, "vote cast");
    get_brawl(db_pool, brawl_id).await
}

/// Stores `winner_id` without checking that it belongs to the brawl.
pub async fn set_winner(db_pool: &SqlitePool, brawl_id: &str, winner_id: &str) -> StoreResult<Brawl> {
    write_winner(db_pool, brawl_id, Some(winner_id)).await?;
    tracing::info!(brawl_id, winner_id, "winner set");
    get_brawl(db_pool, brawl_id).await
}

/// Starts a new round: songs and votes stay, the winner goes.
pub async fn clear_winner(db_pool: &SqlitePool, brawl_id: &str) -> StoreResult<Brawl> {
    write_winner(db_pool, brawl_id, None).await?;
    tracing::debug!(brawl_id, "winner cleared");
    get_brawl(db_pool, brawl_id).await
}
