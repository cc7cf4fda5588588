use serde::{Deserialize, Serialize};

/// Optional behavior toggles, read from `config.toml` at startup and
/// handed to clients through a server function. Each field defaults
/// off, so a missing or truncated config file disables extras rather
/// than failing the boot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Seed a demo portfolio on first boot of an empty database.
    #[serde(default)]
    pub demo_data: bool,
}

/// Shape of `config.toml` itself.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_flag_starts_off() {
        let flags = FeatureFlags::default();
        assert!(!flags.telemetry);
        assert!(!flags.demo_data);
    }

    #[test]
    fn empty_config_file_means_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.features, FeatureFlags::default());
    }

    #[test]
    fn config_may_name_only_some_flags() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            telemetry = true
            "#,
        )
        .unwrap();
        assert!(config.features.telemetry);
        assert!(!config.features.demo_data);
    }

    // The client receives flags as JSON from a server function, so older
    // clients may see payloads missing newer fields.
    #[test]
    fn json_payload_with_missing_fields_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, FeatureFlags::default());
    }
}
