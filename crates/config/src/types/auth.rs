//! Secret storage types for selchord configuration.
//!
//! Responsibilities:
//! - Provide secure value storage (plain text or keyring) for the API key.
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Keyring entry creation/management (only retrieval).
//! - Sending credentials anywhere (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization includes secrets for config file persistence; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::constants::KEYRING_SERVICE;

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// A value that can be stored either in plain text or in the system keyring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecureValue {
    /// Value stored in the system keyring.
    Keyring {
        /// The account name in the keyring.
        keyring_account: String,
    },
    /// Value stored in plain text (as a SecretString).
    #[serde(with = "secret_string")]
    Plain(SecretString),
}

impl SecureValue {
    /// Resolve the secure value to a SecretString.
    ///
    /// If the value is stored in the keyring, it will be fetched.
    pub fn resolve(&self) -> Result<SecretString, keyring::Error> {
        match self {
            Self::Plain(secret) => Ok(secret.clone()),
            Self::Keyring { keyring_account } => {
                let entry = keyring::Entry::new(KEYRING_SERVICE, keyring_account)?;
                let password = entry.get_password()?;
                Ok(SecretString::new(password.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secure_value_resolve_plain() {
        let secret = SecretString::new("sk-test".to_string().into());
        let val = SecureValue::Plain(secret.clone());
        let resolved = val.resolve().unwrap();
        assert_eq!(resolved.expose_secret(), secret.expose_secret());
    }

    #[test]
    fn test_secure_value_plain_not_exposed_in_debug() {
        let secure_value = SecureValue::Plain(SecretString::new("sk-hidden-123".to_string().into()));

        let debug_output = format!("{:?}", secure_value);

        assert!(
            !debug_output.contains("sk-hidden-123"),
            "Debug output should not contain the secret"
        );
    }

    #[test]
    fn test_secure_value_keyring_not_exposed_in_debug() {
        let secure_value = SecureValue::Keyring {
            keyring_account: "openai-work".to_string(),
        };

        let debug_output = format!("{:?}", secure_value);

        assert!(debug_output.contains("openai-work"));
        assert!(debug_output.contains("Keyring"));
    }

    #[test]
    fn test_secure_value_untagged_serde() {
        let plain: SecureValue = serde_json::from_str("\"sk-plain\"").unwrap();
        match plain {
            SecureValue::Plain(s) => assert_eq!(s.expose_secret(), "sk-plain"),
            _ => panic!("Expected SecureValue::Plain"),
        }

        let keyring: SecureValue =
            serde_json::from_str(r#"{ "keyring_account": "openai" }"#).unwrap();
        assert!(matches!(keyring, SecureValue::Keyring { .. }));

        // Serialization includes the secret for persistence.
        let json =
            serde_json::to_string(&SecureValue::Plain(SecretString::new("sk-x".to_string().into())))
                .unwrap();
        assert_eq!(json, "\"sk-x\"");
    }
}
