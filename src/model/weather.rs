use serde::{Deserialize, Serialize};

/// Weather conditions recorded by the service alongside a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Degrees Fahrenheit
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Millibar
    pub pressure: f64,
    /// Percent, 0-100
    pub humidity: f64,
    /// Cloud cover percent, 0-100
    pub clouds: f64,
    pub wind: Wind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Rain>,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Direction in degrees
    pub deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rain {
    pub last_hour: f64,
    #[serde(default, rename = "last3Hours", skip_serializing_if = "Option::is_none")]
    pub last_3_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Coarse tag such as "Rain", "Clouds", "Snow" or "Clear"
    pub category: String,
    pub description: String,
}

impl Condition {
    /// Short glyph for the condition category. Unknown categories read as clear sky.
    pub fn symbol(&self) -> &'static str {
        match self.category.as_str() {
            "Thunderstorm" => "⛈",
            "Drizzle" => "🌦",
            "Rain" => "🌧",
            "Snow" => "🌨",
            "Clouds" => "☁",
            _ => "☀",
        }
    }
}
