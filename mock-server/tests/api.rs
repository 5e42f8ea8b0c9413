use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, seed, Allegiance, Character, Missing, Trilogy};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::ACCEPT, "application/json")
        .body(String::new())
        .unwrap()
}

// --- content negotiation ---

#[tokio::test]
async fn request_without_json_accept_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/Characters")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE);
}

// --- list ---

#[tokio::test]
async fn list_characters_returns_whole_catalog() {
    let resp = app().oneshot(json_get("/api/Characters")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let characters: Vec<Character> = body_json(resp).await;
    assert_eq!(characters.len(), seed().len());
}

#[tokio::test]
async fn list_characters_empty_catalog() {
    let resp = app_with(Vec::new(), Missing::default())
        .oneshot(json_get("/api/Characters"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let characters: Vec<Character> = body_json(resp).await;
    assert!(characters.is_empty());
}

// --- by name ---

#[tokio::test]
async fn get_character_by_name_decodes_path() {
    let resp = app()
        .oneshot(json_get("/api/Characters/ByName/Jar%20Jar%20Binks"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let character: Character = body_json(resp).await;
    assert_eq!(character.name, "Jar Jar Binks");
    assert_eq!(character.homeworld.as_deref(), Some("Naboo"));
}

#[tokio::test]
async fn get_character_by_name_missing_is_no_content() {
    let resp = app()
        .oneshot(json_get("/api/Characters/ByName/Unknown"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_character_by_name_missing_as_null() {
    let resp = app_with(seed(), Missing::Null)
        .oneshot(json_get("/api/Characters/ByName/Unknown"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"null");
}

#[tokio::test]
async fn get_character_by_name_missing_as_not_found() {
    let resp = app_with(seed(), Missing::NotFound)
        .oneshot(json_get("/api/Characters/ByName/Unknown"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- filters ---

#[tokio::test]
async fn list_by_allegiance_filters() {
    let resp = app()
        .oneshot(json_get("/api/Characters/AllByAllegiance/Empire"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let characters: Vec<Character> = body_json(resp).await;
    assert!(!characters.is_empty());
    assert!(characters.iter().all(|c| c.allegiance == Allegiance::Empire));
}

#[tokio::test]
async fn list_by_trilogy_none_is_empty_array() {
    let resp = app()
        .oneshot(json_get("/api/Characters/AllByTrilogy/None"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"[]");
}

#[tokio::test]
async fn list_by_trilogy_filters() {
    let resp = app()
        .oneshot(json_get("/api/Characters/AllByTrilogy/Prequel"))
        .await
        .unwrap();

    let characters: Vec<Character> = body_json(resp).await;
    assert!(!characters.is_empty());
    assert!(characters
        .iter()
        .all(|c| c.trilogy_introduced_in == Trilogy::Prequel));
}

#[tokio::test]
async fn unknown_filter_label_returns_400() {
    let resp = app()
        .oneshot(json_get("/api/Characters/AllByAllegiance/Sith"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lowercase_filter_label_returns_400() {
    let resp = app()
        .oneshot(json_get("/api/Characters/AllByTrilogy/original"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
