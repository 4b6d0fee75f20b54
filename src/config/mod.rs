mod settings;
#[cfg(test)]
mod tests;

use config::{Config, ConfigError, Environment, File};

use crate::config::settings::PartialSettings;

pub use settings::{HttpSettings, RelaySettings, Settings, StorageSettings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the front, relay and storage configurations
///
/// # Errors
///
/// Throws a `ConfigError` if a configured source cannot be read or
/// deserialized.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        http: HttpSettings {
            host: partial
                .http
                .as_ref()
                .and_then(|h| h.host.clone())
                .unwrap_or(default.http.host),
            port: partial
                .http
                .as_ref()
                .and_then(|h| h.port)
                .unwrap_or(default.http.port),
            serve_dir: partial
                .http
                .as_ref()
                .and_then(|h| h.serve_dir.clone())
                .unwrap_or(default.http.serve_dir),
        },
        relay: RelaySettings {
            host: partial
                .relay
                .as_ref()
                .and_then(|r| r.host.clone())
                .unwrap_or(default.relay.host),
            port: partial
                .relay
                .as_ref()
                .and_then(|r| r.port)
                .unwrap_or(default.relay.port),
        },
        storage: StorageSettings {
            data_file: partial
                .storage
                .as_ref()
                .and_then(|s| s.data_file.clone())
                .unwrap_or(default.storage.data_file),
        },
    })
}
