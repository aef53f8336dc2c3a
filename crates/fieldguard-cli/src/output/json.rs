//! JSON output formatting.

use fieldguard_core::{EncryptionBundle, ProtectionConfig, ProtectionLevel};

use crate::security::SecretSource;

/// A bundle tagged with the level it was sealed at.
///
/// `decrypt` accepts this shape directly; the extra field is ignored.
pub fn bundle_json(level: ProtectionLevel, bundle: &EncryptionBundle) -> serde_json::Value {
    serde_json::json!({
        "level": level,
        "ciphertext": bundle.ciphertext,
        "nonce": bundle.nonce,
        "tag": bundle.tag,
    })
}

/// Effective service parameters, as reported by `check`.
pub fn check_json(
    config: &ProtectionConfig,
    source: &SecretSource,
    config_path: &str,
) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "config_path": config_path,
        "secret_source": source.to_string(),
        "protection": config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_json_round_trips_into_bundle() {
        let bundle = EncryptionBundle {
            ciphertext: "aa".to_string(),
            nonce: "bb".to_string(),
            tag: "cc".to_string(),
        };
        let value = bundle_json(ProtectionLevel::Restricted, &bundle);
        assert_eq!(value["level"], "restricted");

        let parsed = EncryptionBundle::from_json(&value.to_string()).unwrap();
        assert_eq!(parsed, bundle);
    }

    #[test]
    fn test_check_json_never_contains_secret() {
        let value = check_json(
            &ProtectionConfig::default(),
            &SecretSource::Env,
            "/tmp/config.toml",
        );
        assert_eq!(value["protection"]["kdf_iterations"], 100_000);
        assert!(value["secret_source"].as_str().unwrap().starts_with("env"));
    }
}
