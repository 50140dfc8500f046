use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::brawls::{
    model::{CreateBrawlBody, VotesBody, WinnerBody},
    winner, Brawl, NewSong,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Talks to the `/api/brawls` surface of a running server.
#[derive(Debug, Clone)]
pub struct BrawlClient {
    http: Client,
    base_url: Url,
}

impl BrawlClient {
    /// `base_url` is the API root, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// `brawls/{segments..}` under the API root, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("brawls").extend(segments);
        }
        url
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, message });
        }
        Ok(response)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_brawl(&self, brawl_id: Option<&str>) -> ClientResult<Brawl> {
        let body = CreateBrawlBody { id: brawl_id.map(str::to_owned) };
        let response = self.http.post(self.url(&[])).json(&body).send().await?;
        Self::read(response).await
    }

    pub async fn get_brawl(&self, brawl_id: &str) -> ClientResult<Brawl> {
        let response = self.http.get(self.url(&[brawl_id])).send().await?;
        Self::read(response).await
    }

    pub async fn delete_brawl(&self, brawl_id: &str) -> ClientResult<()> {
        let response = self.http.delete(self.url(&[brawl_id])).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn add_song(&self, brawl_id: &str, song: &NewSong) -> ClientResult<Brawl> {
        let response = self.http
            .post(self.url(&[brawl_id, "songs"]))
            .json(song)
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn set_votes(&self, brawl_id: &str, song_id: &str, votes: i64) -> ClientResult<Brawl> {
        let response = self.http
            .put(self.url(&[brawl_id, "songs", song_id, "votes"]))
            .json(&VotesBody { votes })
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn vote(&self, brawl_id: &str, song_id: &str) -> ClientResult<Brawl> {
        let response = self.http
            .post(self.url(&[brawl_id, "songs", song_id, "vote"]))
            .send()
            .await?;
        Self::read(response).await
    }

    /// Lets the server draw and store the winner.
    pub async fn select_winner(&self, brawl_id: &str) -> ClientResult<Brawl> {
        let response = self.http.post(self.url(&[brawl_id, "winner"])).send().await?;
        Self::read(response).await
    }

    /// Draws locally from the current votes and stores the result. Returns the
    /// fetched brawl unchanged when there is nothing to draw.
    pub async fn draw_winner(&self, brawl_id: &str) -> ClientResult<Brawl> {
        let brawl = self.get_brawl(brawl_id).await?;
        let Some(winner_id) = winner::draw(&brawl.songs, &mut rand::rng()).map(|song| song.id.clone()) else {
            return Ok(brawl);
        };
        self.set_winner(brawl_id, &winner_id).await
    }

    pub async fn set_winner(&self, brawl_id: &str, winner_id: &str) -> ClientResult<Brawl> {
        let response = self.http
            .put(self.url(&[brawl_id, "winner"]))
            .json(&WinnerBody { winner_id: winner_id.to_owned() })
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn clear_winner(&self, brawl_id: &str) -> ClientResult<Brawl> {
        let response = self.http.delete(self.url(&[brawl_id, "winner"])).send().await?;
        Self::read(response).await
    }
}
