use std::str::FromStr;

use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, SqlitePool};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS brawls (
    id TEXT PRIMARY KEY,
    winner_id TEXT
);

CREATE TABLE IF NOT EXISTS songs (
    id TEXT PRIMARY KEY,
    brawl_id TEXT NOT NULL,
    name TEXT NOT NULL,
    youtube_link TEXT,
    votes INTEGER DEFAULT 1,
    FOREIGN KEY (brawl_id) REFERENCES brawls(id) ON DELETE CASCADE
);
"#;

/// Row of the `brawls` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrawlRow {
    pub id: String,
    pub winner_id: Option<String>,
}

/// Row of the `songs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SongRow {
    pub id: String,
    pub brawl_id: String,
    pub name: String,
    pub youtube_link: Option<String>,
    pub votes: i64,
}

/// Opens (creating if needed) the database at `url` and makes sure both tables exist.
///
/// `sqlite::memory:` gives every connection its own database, so callers using it
/// should keep `max_connections` at 1.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&db_pool).await?;
    Ok(db_pool)
}

pub async fn migrate(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA)
        .execute(db_pool)
        .await?;
    Ok(())
}
