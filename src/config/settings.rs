use serde::Deserialize;

/// Top-level configuration for the relay application.
///
/// Includes settings for the HTTP front, the relay listener and the message
/// store.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Settings of the HTTP front.
    pub http: HttpSettings,
    /// Settings of the relay listener.
    pub relay: RelaySettings,
    /// Settings of the message store.
    pub storage: StorageSettings,
}

/// Configuration for the HTTP front.
///
/// Defines the listening address and the directory pages and static assets
/// are served from.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    /// Host the front binds to.
    pub host: String,
    /// Port the front binds to.
    pub port: u16,
    /// Directory pages and static assets are served from.
    pub serve_dir: String,
}

/// Configuration for the relay listener.
///
/// Defines the address the datagram socket binds to.
#[derive(Debug, Deserialize, Clone)]
pub struct RelaySettings {
    /// Host the listener binds to.
    pub host: String,
    /// Port the listener binds to.
    pub port: u16,
}

/// Configuration for the message store.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Store file path, relative to the serve directory.
    pub data_file: String,
}

/// Partial configuration loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled
/// using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub http: Option<PartialHttpSettings>,
    pub relay: Option<PartialRelaySettings>,
    pub storage: Option<PartialStorageSettings>,
}

/// Partial front settings.
///
/// Used when loading the front configuration from external sources with
/// optional values.
#[derive(Debug, Deserialize)]
pub struct PartialHttpSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub serve_dir: Option<String>,
}

/// Partial relay settings.
#[derive(Debug, Deserialize)]
pub struct PartialRelaySettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial storage settings.
#[derive(Debug, Deserialize)]
pub struct PartialStorageSettings {
    pub data_file: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Running with nothing configured binds the front on 3000 and the
/// listener on 5000, serving from the working directory.
impl Default for Settings {
    fn default() -> Self {
        Self {
            http: HttpSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
                serve_dir: ".".to_string(),
            },
            relay: RelaySettings {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            storage: StorageSettings {
                data_file: "storage/data.json".to_string(),
            },
        }
    }
}
