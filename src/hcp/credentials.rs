//! TFE token resolution from multiple sources

use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::credentials;
use crate::error::{Result, TfeError};

/// Credentials file structure
#[derive(Deserialize, Debug)]
struct TfeCredentials {
    credentials: HashMap<String, TfeCredential>,
}

/// Single credential entry
#[derive(Deserialize, Debug)]
struct TfeCredential {
    token: String,
}

/// Environment lookup used by the resolver
pub(crate) type EnvLookup = fn(&str) -> Option<String>;

pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Token resolution with fallback logic
pub struct TokenResolver {
    host: String,
    credentials_path: Option<PathBuf>,
    env: EnvLookup,
}

impl TokenResolver {
    /// Create a new token resolver for the given host
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            credentials_path: Self::default_credentials_path(),
            env: process_env,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    /// Use a specific credentials file instead of the platform default
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Resolve token from multiple sources with fallback:
    /// 1. Explicit token (if provided)
    /// 2. Environment variables (HCP_TOKEN, TFC_TOKEN, TFE_TOKEN - in order)
    /// 3. Credentials file (~/.terraform.d/credentials.tfrc.json)
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(token) = explicit.filter(|t| !t.is_empty()) {
            debug!("Using explicitly provided token");
            return Ok(token.to_string());
        }

        for env_var in credentials::TOKEN_ENV_VARS {
            if let Some(token) = (self.env)(env_var) {
                if !token.is_empty() {
                    debug!("Using token from {} environment variable", env_var);
                    return Ok(token);
                }
            }
        }

        debug!(
            "No token found in environment variables {:?}, trying credentials file",
            credentials::TOKEN_ENV_VARS
        );
        self.read_from_credentials_file()
    }

    /// Read token from Terraform credentials file
    fn read_from_credentials_file(&self) -> Result<String> {
        let credentials_path = self
            .credentials_path
            .as_deref()
            .ok_or_else(|| TfeError::TokenNotFound(self.token_not_found_message(None)))?;

        debug!(
            "Looking for credentials file at: {}",
            credentials_path.display()
        );

        let content = fs::read_to_string(credentials_path).map_err(|_| {
            TfeError::TokenNotFound(self.token_not_found_message(Some(credentials_path)))
        })?;

        let token = Self::token_for_host(&content, &self.host).map_err(|e| {
            TfeError::Credentials(format!(
                "Could not parse credentials file {}: {}",
                credentials_path.display(),
                e
            ))
        })?;

        token.ok_or_else(|| {
            TfeError::TokenNotFound(self.token_not_found_message(Some(credentials_path)))
        })
    }

    /// Look up the token for `host` in credentials file content
    fn token_for_host(
        content: &str,
        host: &str,
    ) -> std::result::Result<Option<String>, serde_json::Error> {
        let creds: TfeCredentials = serde_json::from_str(content)?;
        Ok(creds.credentials.get(host).map(|cred| {
            debug!("Using token from credentials file for host: {}", host);
            cred.token.clone()
        }))
    }

    /// Generate helpful error message when token is not found
    fn token_not_found_message(&self, credentials_path: Option<&Path>) -> String {
        let env_vars = credentials::TOKEN_ENV_VARS.join(", ");
        let creds_info = credentials_path
            .map(|p| format!(" or in credentials file {}", p.display()))
            .unwrap_or_default();

        format!(
            "No API token found for host '{}'. Set one of [{}] or run `terraform login {}`. \
             Checked: env vars [{}]{}",
            self.host, env_vars, self.host, env_vars, creds_info
        )
    }

    /// Get the path to Terraform credentials file (platform-specific)
    /// - Windows: %APPDATA%\terraform.d\credentials.tfrc.json
    /// - Linux/macOS: ~/.terraform.d/credentials.tfrc.json
    fn default_credentials_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join(credentials::FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            dirs::home_dir().map(|p| p.join(credentials::FILE_PATH_UNIX))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolver_explicit_token_takes_precedence() {
        let resolver = TokenResolver::new("test.example.com");
        let result = resolver.resolve(Some("explicit-token-123"));
        assert_eq!(result.unwrap(), "explicit-token-123");
    }

    #[test]
    fn test_resolver_new() {
        let resolver = TokenResolver::new("custom.host.com");
        assert_eq!(resolver.host, "custom.host.com");
    }

    #[test]
    fn test_token_not_found_message_format() {
        let resolver = TokenResolver::new("app.terraform.io");
        let msg = resolver.token_not_found_message(None);
        assert!(msg.contains("app.terraform.io"));
        assert!(msg.contains("HCP_TOKEN"));
        assert!(msg.contains("terraform login"));
    }

    #[test]
    fn test_token_not_found_message_with_path() {
        let resolver = TokenResolver::new("app.terraform.io");
        let path = Path::new("/home/user/.terraform.d/credentials.tfrc.json");
        let msg = resolver.token_not_found_message(Some(path));
        assert!(msg.contains("/home/user/.terraform.d/credentials.tfrc.json"));
    }

    #[test]
    fn test_token_for_host() {
        let json = r#"{
            "credentials": {
                "app.terraform.io": {
                    "token": "test-token-123"
                },
                "custom.host.com": {
                    "token": "custom-token-456"
                }
            }
        }"#;

        assert_eq!(
            TokenResolver::token_for_host(json, "custom.host.com").unwrap(),
            Some("custom-token-456".to_string())
        );
        assert_eq!(
            TokenResolver::token_for_host(json, "other.host.com").unwrap(),
            None
        );
        assert!(TokenResolver::token_for_host("not json", "x").is_err());
    }

    #[test]
    fn test_read_from_credentials_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"credentials": {{"tfe.example.com": {{"token": "file-token"}}}}}}"#
        )
        .unwrap();

        let resolver = TokenResolver::new("tfe.example.com").with_credentials_path(file.path());
        assert_eq!(resolver.read_from_credentials_file().unwrap(), "file-token");

        let resolver = TokenResolver::new("missing.example.com").with_credentials_path(file.path());
        match resolver.read_from_credentials_file() {
            Err(TfeError::TokenNotFound(msg)) => assert!(msg.contains("missing.example.com")),
            other => panic!("Expected TokenNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_from_missing_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TokenResolver::new("app.terraform.io")
            .with_credentials_path(dir.path().join("nope.json"));
        assert!(matches!(
            resolver.read_from_credentials_file(),
            Err(TfeError::TokenNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_env_in_order() {
        let resolver = TokenResolver::new("app.terraform.io").with_env(|key| match key {
            "TFC_TOKEN" => Some("tfc".to_string()),
            "TFE_TOKEN" => Some("tfe".to_string()),
            "HCP_TOKEN" => Some(String::new()),
            _ => None,
        });
        assert_eq!(resolver.resolve(None).unwrap(), "tfc");
        assert_eq!(resolver.resolve(Some("explicit")).unwrap(), "explicit");
    }

    #[test]
    fn test_resolve_falls_back_to_credentials_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"credentials": {{"app.terraform.io": {{"token": "file-token"}}}}}}"#
        )
        .unwrap();

        let resolver = TokenResolver::new("app.terraform.io")
            .with_credentials_path(file.path())
            .with_env(|_| None);
        assert_eq!(resolver.resolve(None).unwrap(), "file-token");
    }

    #[test]
    fn test_default_credentials_path() {
        let path = TokenResolver::default_credentials_path();
        assert!(path.is_some());
        assert!(path
            .unwrap()
            .to_string_lossy()
            .contains("credentials.tfrc.json"));
    }
}
