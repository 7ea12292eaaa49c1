//! Credential and token types.
//!
//! Secrets are wrapped in newtypes whose `Debug` output is redacted so they
//! cannot leak through `tracing` fields or error messages.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::errors::FetchError;

/// Credential section holding IBM Cloud API keys
pub const IBM_CLOUD_PROVIDER: &str = "ibm_cloud";

/// Credential key for an account's API key
pub fn api_key_name(account: &str) -> String {
    format!("{account}_api_key")
}

/// An IBM Cloud API key
///
/// Deserializes from any scalar: config providers turn digit-only values
/// into numbers, and the key must keep its text either way.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building the token exchange request only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ApiKeyVisitor)
    }
}

struct ApiKeyVisitor;

impl Visitor<'_> for ApiKeyVisitor {
    type Value = ApiKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an API key string or scalar")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ApiKey, E> {
        Ok(ApiKey::new(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<ApiKey, E> {
        Ok(ApiKey(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }

    fn visit_char<E: de::Error>(self, value: char) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// A short-lived IAM bearer token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// Tokens returned by the IAM API key grant
///
/// Only the access token is required; the remaining fields are kept for
/// logging expiry information.
#[derive(Debug, Clone, Deserialize)]
pub struct IamTokens {
    pub access_token: BearerToken,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Expiry as a Unix timestamp
    #[serde(default)]
    pub expiration: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Credential store: provider section -> key name -> API key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Credentials {
    sections: BTreeMap<String, BTreeMap<String, ApiKey>>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used when assembling credentials in code
    #[must_use]
    pub fn with_api_key(
        mut self,
        provider: impl Into<String>,
        key: impl Into<String>,
        api_key: ApiKey,
    ) -> Self {
        self.insert(provider, key, api_key);
        self
    }

    pub fn insert(&mut self, provider: impl Into<String>, key: impl Into<String>, api_key: ApiKey) {
        self.sections
            .entry(provider.into())
            .or_default()
            .insert(key.into(), api_key);
    }

    /// Look up `key` in the `provider` section
    pub fn api_key(&self, provider: &str, key: &str) -> Result<&ApiKey, FetchError> {
        self.sections
            .get(provider)
            .and_then(|section| section.get(key))
            .ok_or_else(|| FetchError::MissingCredential {
                provider: provider.to_string(),
                key: key.to_string(),
            })
    }

    pub fn contains(&self, provider: &str, key: &str) -> bool {
        self.api_key(provider, key).is_ok()
    }

    /// Key names present in a section (never the values)
    pub fn keys(&self, provider: &str) -> Vec<&str> {
        self.sections
            .get(provider)
            .map(|section| section.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_name() {
        assert_eq!(api_key_name("acct1"), "acct1_api_key");
    }

    #[test]
    fn test_lookup() {
        let creds = Credentials::new().with_api_key(
            IBM_CLOUD_PROVIDER,
            "acct1_api_key",
            ApiKey::new("key-1"),
        );

        assert_eq!(
            creds.api_key(IBM_CLOUD_PROVIDER, "acct1_api_key").unwrap().expose(),
            "key-1"
        );
        assert!(creds.contains(IBM_CLOUD_PROVIDER, "acct1_api_key"));
        assert_eq!(creds.keys(IBM_CLOUD_PROVIDER), vec!["acct1_api_key"]);
    }

    #[test]
    fn test_missing_key_and_section() {
        let creds = Credentials::new().with_api_key("github", "token", ApiKey::new("x"));

        match creds.api_key(IBM_CLOUD_PROVIDER, "acct1_api_key") {
            Err(FetchError::MissingCredential { provider, key }) => {
                assert_eq!(provider, "ibm_cloud");
                assert_eq!(key, "acct1_api_key");
            }
            other => panic!("Expected MissingCredential, got {other:?}"),
        }
        assert!(creds.keys(IBM_CLOUD_PROVIDER).is_empty());
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let key = ApiKey::new("super-secret-key");
        let token = BearerToken::new("eyJhbGciOi.secret.token");

        assert!(!format!("{key:?}").contains("super-secret-key"));
        assert!(!format!("{token:?}").contains("secret"));

        let creds = Credentials::new().with_api_key(IBM_CLOUD_PROVIDER, "a_api_key", key);
        assert!(!format!("{creds:?}").contains("super-secret-key"));
    }

    #[test]
    fn test_api_key_from_scalars() {
        let key: ApiKey = serde_json::from_str(r#""abc-123""#).unwrap();
        assert_eq!(key.expose(), "abc-123");

        let key: ApiKey = serde_json::from_str("1234567890").unwrap();
        assert_eq!(key.expose(), "1234567890");

        let key: ApiKey = serde_json::from_str("-42").unwrap();
        assert_eq!(key.expose(), "-42");

        let key: ApiKey = serde_json::from_str("true").unwrap();
        assert_eq!(key.expose(), "true");

        assert!(serde_json::from_str::<ApiKey>(r#"{"nested": "map"}"#).is_err());
        assert!(serde_json::from_str::<ApiKey>("null").is_err());
    }

    #[test]
    fn test_iam_tokens_deserialize() {
        let json = r#"{
            "access_token": "eyJraWQiOi",
            "refresh_token": "not_used",
            "token_type": "Bearer",
            "expires_in": 3600,
            "expiration": 1700000000,
            "scope": "ibm openid"
        }"#;
        let tokens: IamTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token.expose(), "eyJraWQiOi");
        assert_eq!(tokens.token_type.as_deref(), Some("Bearer"));
        assert_eq!(tokens.expires_in, Some(3600));
    }
}
