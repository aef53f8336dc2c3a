//! Plain and pretty text formatting.

use fieldguard_core::ProtectionConfig;

use crate::security::SecretSource;

/// Key/value rows describing the effective service parameters.
pub fn check_rows(
    config: &ProtectionConfig,
    source: &SecretSource,
    config_path: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("Config", config_path.to_string()),
        ("Secret", source.to_string()),
        ("Algorithm", config.algorithm.as_str().to_string()),
        ("Nonce", format!("{} bytes", config.iv_length)),
        ("KDF", format!("PBKDF2-SHA256, {} iterations", config.kdf_iterations)),
        ("Hash cost", config.hash_cost.to_string()),
        ("Encoding", format!("{:?}", config.bundle_encoding).to_lowercase()),
        (
            "Key cache",
            if config.cache_derived_keys { "on" } else { "off" }.to_string(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rows_describe_defaults() {
        let rows = check_rows(&ProtectionConfig::default(), &SecretSource::Keychain, "c.toml");
        let find = |key: &str| rows.iter().find(|(k, _)| *k == key).unwrap().1.clone();
        assert_eq!(find("Algorithm"), "aes256_gcm");
        assert_eq!(find("Nonce"), "16 bytes");
        assert_eq!(find("Encoding"), "hex");
        assert_eq!(find("Key cache"), "off");
        assert_eq!(find("Secret"), "keychain");
    }
}
