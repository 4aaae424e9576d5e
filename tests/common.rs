// Shared fixtures for tests that talk to a mocked road noise service

use serde_json::{json, Value};

pub fn weather_json(category: &str) -> Value {
    json!({
        "temp": 61.3,
        "feelsLike": 60.2,
        "tempMin": 57.0,
        "tempMax": 65.4,
        "pressure": 1016,
        "humidity": 72,
        "clouds": 75,
        "wind": {"speed": 6.9, "deg": 240},
        "condition": {"category": category, "description": "broken clouds"}
    })
}

pub fn entry_json(id: &str, date: &str, level: u8) -> Value {
    json!({
        "id": id,
        "date": date,
        "noiseLevel": level,
        "weather": weather_json("Clouds")
    })
}

/// The three-entry history used across scenarios, deliberately out of order.
pub fn history_body() -> String {
    json!([
        entry_json("b", "2024-01-02T09:00:00.000Z", 2),
        entry_json("c", "2024-01-01T08:00:00.000Z", 0),
        entry_json("a", "2024-01-02T10:00:00.000Z", 1),
    ])
    .to_string()
}

pub fn ids<'a>(entries: impl IntoIterator<Item = &'a road_noise::model::NoiseEntry>) -> Vec<&'a str> {
    entries.into_iter().map(|e| e.id.as_str()).collect()
}
