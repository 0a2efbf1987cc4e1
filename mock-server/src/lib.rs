//! Local stand-in for the public character API.
//!
//! Serves `GET /api/character` over a fixed in-memory roster. Filters match
//! the way the real service does: case-insensitive equality for `gender` and
//! `status`, case-insensitive substring for `name` and `species`, and a 404
//! with `{"error":"There is nothing here"}` when nothing matches.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: usize,
    pub pages: usize,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CharacterQuery {
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
    pub gender: Option<String>,
}

impl CharacterQuery {
    fn matches(&self, c: &Character) -> bool {
        fn equals(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().is_none_or(|f| f.eq_ignore_ascii_case(value))
        }
        fn contains(filter: &Option<String>, value: &str) -> bool {
            filter
                .as_deref()
                .is_none_or(|f| value.to_lowercase().contains(&f.to_lowercase()))
        }
        equals(&self.status, &c.status)
            && equals(&self.gender, &c.gender)
            && contains(&self.name, &c.name)
            && contains(&self.species, &c.species)
    }
}

pub type Roster = Arc<Vec<Character>>;

/// Router over the built-in roster.
pub fn app() -> Router {
    app_with(roster())
}

/// Router over a caller-supplied roster, served in the given order.
pub fn app_with(characters: Vec<Character>) -> Router {
    let roster: Roster = Arc::new(characters);
    Router::new()
        .route("/api/character", get(list_characters))
        .layer(TraceLayer::new_for_http())
        .with_state(roster)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_characters(State(roster): State<Roster>, Query(query): Query<CharacterQuery>) -> Response {
    let results: Vec<Character> = roster.iter().filter(|c| query.matches(c)).cloned().collect();
    tracing::debug!(?query, count = results.len(), "character query");
    if results.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "There is nothing here" })),
        )
            .into_response();
    }
    let page = CharacterPage {
        info: PageInfo {
            count: results.len(),
            pages: 1,
            next: None,
            prev: None,
        },
        results,
    };
    Json(page).into_response()
}

/// A small fixed roster covering every gender and status value.
pub fn roster() -> Vec<Character> {
    [
        (1, "Rick Sanchez", "Alive", "Human", "Male"),
        (2, "Morty Smith", "Alive", "Human", "Male"),
        (3, "Summer Smith", "Alive", "Human", "Female"),
        (4, "Beth Smith", "Alive", "Human", "Female"),
        (6, "Abadango Cluster Princess", "Alive", "Alien", "Female"),
        (8, "Adjudicator Rick", "Dead", "Human", "Male"),
        (9, "Agency Director", "Dead", "Human", "Male"),
        (14, "Alien Morty", "unknown", "Alien", "Male"),
        (19, "Antenna Rick", "unknown", "Human", "Male"),
        (110, "Eli's Girlfriend", "Alive", "Human", "Female"),
        (241, "Mr. Poopybutthole", "Alive", "Alien", "Male"),
        (344, "Robot Snake", "Dead", "Robot", "Genderless"),
        (331, "Reverse Giraffe", "Alive", "Animal", "unknown"),
        (333, "Risotto Groupon", "Dead", "Human", "Male"),
    ]
    .into_iter()
    .map(|(id, name, status, species, gender)| Character {
        id,
        name: name.to_string(),
        status: status.to_string(),
        species: species.to_string(),
        gender: gender.to_string(),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
    })
    .collect()
}
