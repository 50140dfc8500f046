use serde::{Deserialize, Serialize};

use crate::db::SongRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,
    pub votes: i64,
}

impl From<SongRow> for Song {
    fn from(SongRow { id, name, youtube_link, votes, .. }: SongRow) -> Self {
        Self { id, name, youtube_link, votes }
    }
}

/// A room and everything in it. An unknown id yields an empty `Brawl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brawl {
    pub id: String,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Song>,
}

impl Brawl {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            songs: Vec::new(),
            winner: None,
        }
    }
}

/// Song as submitted by a client; votes always start at 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,
}

impl NewSong {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_link(mut self, youtube_link: impl Into<String>) -> Self {
        self.youtube_link = Some(youtube_link.into());
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateBrawlBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VotesBody {
    pub votes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerBody {
    pub winner_id: String,
}
