// Remote entry client against a mocked service

mod common;

use common::{entry_json, history_body, ids, weather_json};
use mockito::{Matcher, Server};
use road_noise::client::NoiseEntryClient;
use road_noise::client_error::ClientError;
use road_noise::model::NoiseLevel;
use serde_json::json;

#[tokio::test]
async fn test_fetch_all_sorts_newest_first() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(history_body())
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), "secret".to_string());
    let entries = client.fetch_all().await.unwrap();

    assert_eq!(ids(&entries), vec!["a", "b", "c"]);
    for pair in entries.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_all_server_error_is_transport() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), String::new());
    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, ClientError::Status(503)));
    assert!(err.is_transport());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_all_unreachable_is_transport() {
    let client = NoiseEntryClient::new("http://127.0.0.1:9".to_string(), String::new());
    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_all_missing_condition_is_decode_error() {
    let mut broken = entry_json("a", "2024-01-02T10:00:00.000Z", 1);
    broken["weather"]
        .as_object_mut()
        .unwrap()
        .remove("condition");

    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(json!([broken]).to_string())
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), String::new());
    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
    assert!(err.to_string().contains("condition"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_all_rejects_loose_timestamps() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(json!([entry_json("a", "2024-01-02T10:00:00+00:00", 1)]).to_string())
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), String::new());
    let result = client.fetch_all().await;

    assert!(matches!(result, Err(ClientError::Decode(_))));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_all_ignores_extra_fields_and_optional_rain() {
    let mut with_rain = entry_json("wet", "2024-01-05T12:00:00.000Z", 2);
    with_rain["weather"]["rain"] = json!({"lastHour": 0.3, "last3Hours": 0.8});
    with_rain["weather"]["condition"] = json!({"category": "Rain", "description": "moderate rain"});
    with_rain["userAgent"] = json!("Shortcuts");

    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(json!([entry_json("dry", "2024-01-04T12:00:00.000Z", 0), with_rain]).to_string())
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), String::new());
    let entries = client.fetch_all().await.unwrap();

    assert_eq!(ids(&entries), vec!["wet", "dry"]);
    let rain = entries[0].weather.rain.as_ref().unwrap();
    assert_eq!(rain.last_hour, 0.3);
    assert_eq!(rain.last_3_hours, Some(0.8));
    assert!(entries[1].weather.rain.is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_entry_sends_bearer_and_plain_level() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", "Bearer s3cret")
        .match_header("content-type", Matcher::Regex("^text/plain".to_string()))
        .match_body("3")
        .with_status(201)
        .with_body(entry_json("d", "2024-01-03T00:00:00.000Z", 3).to_string())
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), "s3cret".to_string());
    let entry = client.post_entry(NoiseLevel::Three).await.unwrap();

    assert_eq!(entry.id, "d");
    assert_eq!(entry.noise_level, NoiseLevel::Three);
    assert_eq!(road_noise::model::timestamp::format(&entry.date), "2024-01-03T00:00:00.000Z");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_entry_rejected_credential_is_auth_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), "wrong".to_string());
    let err = client.post_entry(NoiseLevel::Zero).await.unwrap_err();

    assert!(matches!(err, ClientError::Auth(401)));
    assert!(!err.is_transport());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_entry_bad_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(json!({"id": "d", "noiseLevel": 3, "weather": weather_json("Clear")}).to_string())
        .create_async()
        .await;

    let client = NoiseEntryClient::new(server.url(), "s3cret".to_string());
    let result = client.post_entry(NoiseLevel::Three).await;

    assert!(matches!(result, Err(ClientError::Decode(_))));

    mock.assert_async().await;
}
