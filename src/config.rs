use std::env;
use std::path::PathBuf;

use crate::client::DEFAULT_URL;
use crate::client_error::ConfigError;
use crate::reminder::ReminderSchedule;
use crate::settings;

#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: String,
    pub settings_path: PathBuf,
    /// Overrides the stored credential when set
    pub key_override: Option<String>,
    /// Overrides the stored reminder schedule when set
    pub reminder_hours: Option<ReminderSchedule>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let reminder_hours = match env::var("REMINDER_HOURS") {
            Ok(raw) => Some(raw.parse::<ReminderSchedule>().map_err(|_| {
                ConfigError::Invalid {
                    name: "REMINDER_HOURS",
                    value: raw.clone(),
                }
            })?),
            Err(_) => None,
        };

        let service_url = env::var("ROAD_NOISE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        if service_url.trim().is_empty() {
            return Err(ConfigError::Missing("ROAD_NOISE_URL"));
        }

        Ok(Config {
            service_url,
            settings_path: env::var_os("ROAD_NOISE_SETTINGS")
                .map(PathBuf::from)
                .unwrap_or_else(settings::default_path),
            key_override: env::var("ROAD_NOISE_KEY").ok().filter(|k| !k.is_empty()),
            reminder_hours,
        })
    }
}
