use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Player row, serialized without games (collection and create responses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub username: String,
}

impl Player {
    pub fn with_games(self, games: Vec<Game>) -> PlayerWithGames {
        PlayerWithGames {
            id: self.id,
            username: self.username,
            games,
        }
    }
}

/// Player together with every game it owns (single fetch and update responses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWithGames {
    pub id: i64,
    pub username: String,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub release_year: Option<i64>,
    pub weight: Option<f64>,
    pub genre: Option<String>,
    pub player_id: i64,
}

impl Game {
    pub fn fields(&self) -> GameFields {
        GameFields {
            title: self.title.clone(),
            price: self.price,
            release_year: self.release_year,
            weight: self.weight,
            genre: self.genre.clone(),
            player_id: self.player_id,
        }
    }
}

/// The writable columns of a game, already checked for required values.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFields {
    pub title: String,
    pub price: f64,
    pub release_year: Option<i64>,
    pub weight: Option<f64>,
    pub genre: Option<String>,
    pub player_id: i64,
}

// Request payloads

/// Body of `POST /api/players`.
#[derive(Debug, Default, Deserialize)]
pub struct NewPlayer {
    pub username: Option<String>,
}

impl NewPlayer {
    pub fn into_username(self) -> Result<String, ApiError> {
        self.username.ok_or_else(|| missing("username"))
    }
}

/// Body of `PATCH /api/players/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerChanges {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Option<String>>,
}

impl PlayerChanges {
    pub fn apply(self, player: &mut Player) -> Result<(), ApiError> {
        if let Some(username) = self.username {
            player.username = username.ok_or_else(|| null_not_allowed("username"))?;
        }
        Ok(())
    }
}

/// Body of `POST /api/games`.
#[derive(Debug, Default, Deserialize)]
pub struct NewGame {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub release_year: Option<i64>,
    pub weight: Option<f64>,
    pub genre: Option<String>,
    pub player_id: Option<i64>,
}

impl NewGame {
    pub fn into_fields(self) -> Result<GameFields, ApiError> {
        Ok(GameFields {
            title: self.title.ok_or_else(|| missing("title"))?,
            price: self.price.unwrap_or(0.0),
            release_year: self.release_year,
            weight: self.weight,
            genre: self.genre,
            player_id: self.player_id.ok_or_else(|| missing("player_id"))?,
        })
    }
}

/// Body of `PATCH /api/games/{id}`.
///
/// The outer `Option` records whether the key was present at all; the inner
/// one carries an explicit JSON `null`.
#[derive(Debug, Default, Deserialize)]
pub struct GameChanges {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub release_year: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub weight: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub player_id: Option<Option<i64>>,
}

impl GameChanges {
    pub fn apply(self, fields: &mut GameFields) -> Result<(), ApiError> {
        if let Some(title) = self.title {
            fields.title = title.ok_or_else(|| null_not_allowed("title"))?;
        }
        if let Some(price) = self.price {
            fields.price = price.ok_or_else(|| null_not_allowed("price"))?;
        }
        if let Some(release_year) = self.release_year {
            fields.release_year = release_year;
        }
        if let Some(weight) = self.weight {
            fields.weight = weight;
        }
        if let Some(genre) = self.genre {
            fields.genre = genre;
        }
        if let Some(player_id) = self.player_id {
            fields.player_id = player_id.ok_or_else(|| null_not_allowed("player_id"))?;
        }
        Ok(())
    }

    /// The new owner, if this change re-parents the game.
    pub fn player_id(&self) -> Option<i64> {
        self.player_id.flatten()
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn missing(field: &str) -> ApiError {
    ApiError::Validation(format!("missing field `{field}`"))
}

fn null_not_allowed(field: &str) -> ApiError {
    ApiError::Validation(format!("field `{field}` cannot be null"))
}
