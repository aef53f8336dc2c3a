//! Protection levels.
//!
//! A level selects which derived key and which associated-data context apply
//! to a payload. Levels are ordered by sensitivity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtectionError;

/// Prefix of every level's context string.
const CONTEXT_PREFIX: &str = "protection_level_";

/// Sensitivity tier of a protected payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionLevel {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl ProtectionLevel {
    /// Every level, least sensitive first.
    pub const ALL: [ProtectionLevel; 4] = [
        ProtectionLevel::Public,
        ProtectionLevel::Internal,
        ProtectionLevel::Confidential,
        ProtectionLevel::Restricted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Confidential => "confidential",
            Self::Restricted => "restricted",
        }
    }

    /// Context string bound to this level, e.g. `protection_level_confidential`.
    ///
    /// Used both as the KDF salt input and as AEAD associated data, so it must
    /// never change for existing levels.
    pub fn context(&self) -> String {
        format!("{}{}", CONTEXT_PREFIX, self.as_str())
    }

    /// Position in [`ProtectionLevel::ALL`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtectionLevel {
    type Err = ProtectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ProtectionLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ProtectionError::UnsupportedLevel(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(ProtectionLevel::Public < ProtectionLevel::Internal);
        assert!(ProtectionLevel::Internal < ProtectionLevel::Confidential);
        assert!(ProtectionLevel::Confidential < ProtectionLevel::Restricted);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "CONFIDENTIAL".parse::<ProtectionLevel>().unwrap(),
            ProtectionLevel::Confidential
        );
        assert_eq!(
            " restricted ".parse::<ProtectionLevel>().unwrap(),
            ProtectionLevel::Restricted
        );
    }

    #[test]
    fn test_unknown_level_rejected() {
        let err = "top_secret".parse::<ProtectionLevel>().unwrap_err();
        assert!(matches!(err, ProtectionError::UnsupportedLevel(ref name) if name == "top_secret"));
    }

    #[test]
    fn test_context_strings() {
        assert_eq!(ProtectionLevel::Public.context(), "protection_level_public");
        assert_eq!(
            ProtectionLevel::Confidential.context(),
            "protection_level_confidential"
        );
    }

    #[test]
    fn test_index_matches_all() {
        for (i, level) in ProtectionLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ProtectionLevel::Internal).unwrap();
        assert_eq!(json, "\"internal\"");
    }
}
