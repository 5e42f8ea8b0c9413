use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{header::ACCEPT, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allegiance {
    None,
    Rebellion,
    Empire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trilogy {
    None,
    Original,
    Prequel,
    Sequel,
}

/// The catalog's view of a character. `homeworld` is not part of the public
/// record; clients are expected to ignore it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub allegiance: Allegiance,
    pub trilogy_introduced_in: Trilogy,
    pub is_jedi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homeworld: Option<String>,
}

/// How `Characters/ByName/{name}` answers when no character matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Missing {
    #[default]
    NoContent,
    Null,
    NotFound,
}

#[derive(Clone)]
pub struct Catalog {
    characters: Arc<Vec<Character>>,
    missing: Missing,
}

pub fn seed() -> Vec<Character> {
    fn character(
        id: i32,
        name: &str,
        allegiance: Allegiance,
        trilogy: Trilogy,
        is_jedi: bool,
        homeworld: Option<&str>,
    ) -> Character {
        Character {
            id,
            name: name.to_string(),
            allegiance,
            trilogy_introduced_in: trilogy,
            is_jedi,
            homeworld: homeworld.map(str::to_string),
        }
    }

    use Allegiance::{Empire, Rebellion};
    use Trilogy::{Original, Prequel, Sequel};

    vec![
        character(1, "Luke Skywalker", Rebellion, Original, true, Some("Tatooine")),
        character(2, "Darth Vader", Empire, Original, false, Some("Tatooine")),
        character(3, "Leia Organa", Rebellion, Original, false, Some("Alderaan")),
        character(4, "Han Solo", Rebellion, Original, false, Some("Corellia")),
        character(5, "Jar Jar Binks", Allegiance::None, Prequel, false, Some("Naboo")),
        character(6, "Mace Windu", Allegiance::None, Prequel, true, Some("Haruun Kal")),
        character(7, "Kylo Ren", Empire, Sequel, false, Option::None),
        character(8, "Rey", Rebellion, Sequel, true, Some("Jakku")),
        character(9, "Grand Moff Tarkin", Empire, Original, false, Some("Eriadu")),
    ]
}

pub fn app() -> Router {
    app_with(seed(), Missing::default())
}

/// Serve `characters` under `/api`. Every request must accept JSON.
pub fn app_with(characters: Vec<Character>, missing: Missing) -> Router {
    let catalog = Catalog {
        characters: Arc::new(characters),
        missing,
    };
    let api = Router::new()
        .route("/Characters", get(list_characters))
        .route("/Characters/ByName/{name}", get(get_character_by_name))
        .route(
            "/Characters/AllByAllegiance/{allegiance}",
            get(list_characters_by_allegiance),
        )
        .route(
            "/Characters/AllByTrilogy/{trilogy}",
            get(list_characters_by_trilogy),
        );
    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(require_json))
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn require_json(request: Request, next: Next) -> Response {
    let accepts_json = request
        .headers()
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("application/json"));
    if !accepts_json {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }
    next.run(request).await
}

async fn list_characters(State(catalog): State<Catalog>) -> Json<Vec<Character>> {
    Json(catalog.characters.to_vec())
}

async fn get_character_by_name(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
) -> Response {
    match catalog.characters.iter().find(|c| c.name == name) {
        Some(character) => Json(character.clone()).into_response(),
        None => match catalog.missing {
            Missing::NoContent => StatusCode::NO_CONTENT.into_response(),
            Missing::Null => Json(serde_json::Value::Null).into_response(),
            Missing::NotFound => StatusCode::NOT_FOUND.into_response(),
        },
    }
}

async fn list_characters_by_allegiance(
    State(catalog): State<Catalog>,
    Path(allegiance): Path<Allegiance>,
) -> Json<Vec<Character>> {
    filtered(&catalog, |c| c.allegiance == allegiance)
}

async fn list_characters_by_trilogy(
    State(catalog): State<Catalog>,
    Path(trilogy): Path<Trilogy>,
) -> Json<Vec<Character>> {
    filtered(&catalog, |c| c.trilogy_introduced_in == trilogy)
}

fn filtered(catalog: &Catalog, keep: impl Fn(&Character) -> bool) -> Json<Vec<Character>> {
    Json(
        catalog
            .characters
            .iter()
            .filter(|&c| keep(c))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_serializes_to_camel_case() {
        let json = serde_json::to_value(&seed()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Luke Skywalker");
        assert_eq!(json["allegiance"], "Rebellion");
        assert_eq!(json["trilogyIntroducedIn"], "Original");
        assert_eq!(json["isJedi"], true);
        assert_eq!(json["homeworld"], "Tatooine");
    }

    #[test]
    fn missing_homeworld_is_omitted() {
        let kylo = seed().into_iter().find(|c| c.name == "Kylo Ren").unwrap();
        let json = serde_json::to_value(&kylo).unwrap();
        assert!(json.get("homeworld").is_none());
    }

    #[test]
    fn seed_ids_and_names_are_unique() {
        let characters = seed();
        let mut ids: Vec<i32> = characters.iter().map(|c| c.id).collect();
        let mut names: Vec<&str> = characters.iter().map(|c| c.name.as_str()).collect();
        ids.sort();
        ids.dedup();
        names.sort();
        names.dedup();
        assert_eq!(ids.len(), characters.len());
        assert_eq!(names.len(), characters.len());
    }

    #[test]
    fn seed_leaves_trilogy_none_empty() {
        assert!(seed()
            .iter()
            .all(|c| c.trilogy_introduced_in != Trilogy::None));
    }
}
