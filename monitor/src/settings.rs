use config::{Config, ConfigError, File};
use directories::ProjectDirs;
use serde_derive::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    /// Width of the timeline window in hours.
    pub timeline_hours: i64,
    /// Draw callsign labels next to the map markers.
    pub map_labels: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// LEOP cluster to follow. Enables launch operations when set.
    pub leop: Option<String>,
    pub log_level: Option<u64>,
    /// Full configuration sync every this many seconds.
    pub sync_interval: u64,
    /// Station message poll every this many seconds during launch operations.
    pub message_interval: u64,
    pub ui: UiConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut settings = Config::new();
        Self::defaults(&mut settings)?;

        if let Some(project_dirs) = ProjectDirs::from("org", "satnet", "satnet-monitor") {
            let file = File::with_name(
                project_dirs
                    .config_dir()
                    .join("config.toml")
                    .to_str()
                    .ok_or_else(|| ConfigError::Message("Invalid project dir".to_string()))?,
            );
            settings.merge(file.required(false))?;
        }

        settings.try_into()
    }

    pub fn from_file(file: &str) -> Result<Self, ConfigError> {
        let mut settings = Config::new();
        Self::defaults(&mut settings)?;

        settings.merge(File::with_name(file))?;
        settings.try_into()
    }

    fn defaults(settings: &mut Config) -> Result<(), ConfigError> {
        settings.set_default("api_endpoint", "http://localhost:8000/jrpc/")?;
        settings.set_default("sync_interval", 60)?;
        settings.set_default("message_interval", 10)?;
        settings.set_default("ui.timeline_hours", 12)?;
        settings.set_default("ui.map_labels", true)?;
        Ok(())
    }

    /// Basic auth credentials, present only when both parts are configured.
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        }
    }
}
