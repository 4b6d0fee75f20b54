use config::{Config, File, FileFormat};

use super::settings::{PartialSettings, Settings};

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.http.host, "127.0.0.1");
    assert_eq!(settings.http.port, 3000);
    assert_eq!(settings.http.serve_dir, ".");
    assert_eq!(settings.relay.host, "127.0.0.1");
    assert_eq!(settings.relay.port, 5000);
    assert_eq!(settings.storage.data_file, "storage/data.json");
}

#[test]
fn test_partial_settings_deserialize_from_file() {
    let config = Config::builder()
        .add_source(File::from_str(
            "[http]\nport = 8080\n\n[storage]\ndata_file = \"other/data.json\"\n",
            FileFormat::Toml,
        ))
        .build()
        .unwrap();

    let partial: PartialSettings = config.try_deserialize().unwrap();

    let http = partial.http.unwrap();
    assert_eq!(http.port, Some(8080));
    assert_eq!(http.host, None);
    assert!(partial.relay.is_none());
    assert_eq!(
        partial.storage.unwrap().data_file.as_deref(),
        Some("other/data.json")
    );
}
