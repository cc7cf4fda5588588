use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static LOADED: OnceLock<FeatureFlags> = OnceLock::new();

const CONFIG_PATH: &str = "config.toml";

/// Parse `config.toml` into the global flag set. Idempotent; only the
/// first call reads the file. A missing or broken file leaves every
/// flag off, so a bad deploy degrades to a plain app instead of
/// refusing to start.
pub fn load_feature_flags() {
    LOADED.get_or_init(|| {
        let contents = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[config] no {CONFIG_PATH} ({e}); running with all flags off");
                return FeatureFlags::default();
            }
        };
        let config: AppConfig = toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("[config] could not parse {CONFIG_PATH}: {e}; running with all flags off");
            AppConfig::default()
        });
        eprintln!("[config] flags: {:?}", config.features);
        config.features
    });
}

/// The loaded flags, or all-off defaults when [`load_feature_flags`]
/// has not run yet.
pub fn feature_flags() -> &'static FeatureFlags {
    static ALL_OFF: FeatureFlags = FeatureFlags {
        telemetry: false,
        demo_data: false,
    };
    LOADED.get().unwrap_or(&ALL_OFF)
}
