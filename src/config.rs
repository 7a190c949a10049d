//! Client configuration and API constants

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::hcp::credentials::{process_env, EnvLookup};
use crate::hcp::TokenResolver;

/// Configuration constants for TFE API
pub mod api {
    /// Base path for TFE API v2
    pub const BASE_PATH: &str = "/api/v2/";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Workspaces endpoint
    pub const WORKSPACES: &str = "workspaces";

    /// Runs endpoint
    pub const RUNS: &str = "runs";

    /// Projects endpoint
    pub const PROJECTS: &str = "projects";

    /// Configuration versions endpoint
    pub const CONFIGURATION_VERSIONS: &str = "configuration-versions";

    /// Policy sets endpoint
    pub const POLICY_SETS: &str = "policy-sets";

    /// Agent pools endpoint
    pub const AGENT_POOLS: &str = "agent-pools";

    /// OAuth clients endpoint
    pub const OAUTH_CLIENTS: &str = "oauth-clients";

    /// Teams endpoint
    pub const TEAMS: &str = "teams";

    /// Team-project access endpoint
    pub const TEAM_PROJECTS: &str = "team-projects";

    /// State versions endpoint
    pub const STATE_VERSIONS: &str = "state-versions";

    /// Plans endpoint
    pub const PLANS: &str = "plans";

    /// Applies endpoint
    pub const APPLIES: &str = "applies";

    /// Workspace variables, nested under a workspace
    pub const VARS: &str = "vars";

    /// Agents endpoint
    pub const AGENTS: &str = "agents";

    /// Organization memberships endpoint
    pub const ORGANIZATION_MEMBERSHIPS: &str = "organization-memberships";

    /// Details of the user owning the token
    pub const ACCOUNT_DETAILS: &str = "account/details";

    /// Default page size for API requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Maximum page size accepted by the API
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Maximum concurrent page requests for parallel pagination
    pub const MAX_CONCURRENT_PAGE_REQUESTS: usize = 10;

    /// JSON:API media type used for request and response bodies
    pub const CONTENT_TYPE: &str = "application/vnd.api+json";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Credentials file name
    pub const FILE_NAME: &str = "terraform.d/credentials.tfrc.json";

    /// Path to Terraform credentials file on Unix (relative to HOME)
    pub const FILE_PATH_UNIX: &str = ".terraform.d/credentials.tfrc.json";

    /// Environment variable names for token (checked in order)
    pub const TOKEN_ENV_VARS: &[&str] = &["HCP_TOKEN", "TFC_TOKEN", "TFE_TOKEN"];
}

/// Default values for the client
pub mod defaults {
    /// Default TFE address
    pub const ADDRESS: &str = "https://app.terraform.io";

    /// Environment variable for the API address
    pub const ADDRESS_ENV_VAR: &str = "TFE_ADDRESS";

    /// Environment variable for a bare hostname (used when no address is set)
    pub const HOSTNAME_ENV_VAR: &str = "TFE_HOSTNAME";

    /// Environment variable for the API token
    pub const TOKEN_ENV_VAR: &str = "TFE_TOKEN";

    /// Maximum number of retries for a single request
    pub const RETRY_MAX: u32 = 30;

    /// Lower bound for the rate limit backoff
    pub const RETRY_WAIT_MIN_MS: u64 = 100;

    /// Upper bound for the rate limit backoff
    pub const RETRY_WAIT_MAX_MS: u64 = 400;

    /// Maximum number of redirects followed
    pub const MAX_REDIRECTS: usize = 10;

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
}

/// Callback invoked before every retry with the attempt number and the
/// status of the response that triggered it (`None` for transport errors)
pub type RetryLogHook = Arc<dyn Fn(u32, Option<u16>) + Send + Sync>;

/// Client configuration
#[derive(Clone)]
pub struct Config {
    /// Scheme and host of the API, e.g. `https://app.terraform.io`
    pub address: String,
    /// API base path, e.g. `/api/v2/`
    pub base_path: String,
    /// API token
    pub token: String,
    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,
    /// Also retry 425/5xx responses and transport errors
    pub retry_server_errors: bool,
    /// Maximum number of retries
    pub retry_max: u32,
    /// Lower bound for the rate limit backoff
    pub retry_wait_min: Duration,
    /// Upper bound for the rate limit backoff
    pub retry_wait_max: Duration,
    /// Optional retry observer
    pub retry_log_hook: Option<RetryLogHook>,
}

impl Default for Config {
    /// Address from `TFE_ADDRESS` (or `TFE_HOSTNAME`), token from `TFE_TOKEN`
    fn default() -> Self {
        let token = std::env::var(defaults::TOKEN_ENV_VAR).unwrap_or_default();
        Self {
            address: resolve_address(process_env),
            base_path: api::BASE_PATH.to_string(),
            token,
            headers: Vec::new(),
            retry_server_errors: false,
            retry_max: defaults::RETRY_MAX,
            retry_wait_min: Duration::from_millis(defaults::RETRY_WAIT_MIN_MS),
            retry_wait_max: Duration::from_millis(defaults::RETRY_WAIT_MAX_MS),
            retry_log_hook: None,
        }
    }
}

impl Config {
    /// Build a config for the given address and token
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    /// Build a config from the environment, falling back to the Terraform
    /// credentials file for the token
    pub fn from_env() -> Result<Self> {
        Self::default().with_resolved_token(TokenResolver::new)
    }

    /// Replace the token with one resolved for this config's host
    fn with_resolved_token<F>(mut self, resolver: F) -> Result<Self>
    where
        F: FnOnce(&str) -> TokenResolver,
    {
        let host = self.hostname()?;
        self.token = resolver(&host).resolve(None)?;
        Ok(self)
    }

    /// Add an extra header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Enable retries of 425/5xx responses
    pub fn with_retry_server_errors(mut self, enabled: bool) -> Self {
        self.retry_server_errors = enabled;
        self
    }

    /// Install a retry observer
    pub fn with_retry_log_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(u32, Option<u16>) + Send + Sync + 'static,
    {
        self.retry_log_hook = Some(Arc::new(hook));
        self
    }

    /// Hostname part of the address
    pub fn hostname(&self) -> Result<String> {
        let url = reqwest::Url::parse(&self.address).map_err(|e| {
            crate::TfeError::Config(format!("invalid address '{}': {}", self.address, e))
        })?;
        url.host_str().map(|h| h.to_string()).ok_or_else(|| {
            crate::TfeError::Config(format!("address '{}' has no host", self.address))
        })
    }

    /// Full base URL: address joined with base path, without a trailing slash
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.address.trim_end_matches('/'),
            self.base_path.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("address", &self.address)
            .field("base_path", &self.base_path)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("headers", &self.headers.len())
            .field("retry_server_errors", &self.retry_server_errors)
            .field("retry_max", &self.retry_max)
            .field("retry_wait_min", &self.retry_wait_min)
            .field("retry_wait_max", &self.retry_wait_max)
            .field("retry_log_hook", &self.retry_log_hook.is_some())
            .finish()
    }
}

/// `TFE_ADDRESS`, then `https://` + `TFE_HOSTNAME`, then the default address
fn resolve_address(env: EnvLookup) -> String {
    if let Some(address) = env(defaults::ADDRESS_ENV_VAR).filter(|a| !a.is_empty()) {
        return address;
    }
    match env(defaults::HOSTNAME_ENV_VAR) {
        Some(host) if !host.is_empty() => format!("https://{}", host),
        _ => defaults::ADDRESS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_path_format() {
        assert!(api::BASE_PATH.starts_with('/'));
        assert!(api::BASE_PATH.ends_with('/'));
    }

    #[test]
    fn test_credentials_env_vars() {
        assert_eq!(
            credentials::TOKEN_ENV_VARS,
            &["HCP_TOKEN", "TFC_TOKEN", "TFE_TOKEN"]
        );
    }

    #[test]
    fn test_default_address_is_https() {
        assert!(defaults::ADDRESS.starts_with("https://"));
    }

    #[test]
    fn test_base_url_joins_cleanly() {
        let config = Config::new("https://tfe.example.com/", "token");
        assert_eq!(config.base_url(), "https://tfe.example.com/api/v2");

        let mut config = Config::new("https://tfe.example.com", "token");
        config.base_path = "/".to_string();
        assert_eq!(config.base_url(), "https://tfe.example.com");
    }

    #[test]
    fn test_hostname() {
        let config = Config::new("https://app.terraform.io", "token");
        assert_eq!(config.hostname().unwrap(), "app.terraform.io");

        let config = Config::new("not a url", "token");
        assert!(config.hostname().is_err());
    }

    #[test]
    fn test_builders() {
        let config = Config::new("https://app.terraform.io", "token")
            .with_header("X-Custom", "1")
            .with_retry_server_errors(true)
            .with_retry_log_hook(|_, _| {});
        assert_eq!(config.headers, vec![("X-Custom".to_string(), "1".to_string())]);
        assert!(config.retry_server_errors);
        assert!(config.retry_log_hook.is_some());
        assert_eq!(config.retry_max, defaults::RETRY_MAX);
    }

    #[test]
    fn test_address_prefers_tfe_address() {
        let address = resolve_address(|key| match key {
            "TFE_ADDRESS" => Some("https://tfe.internal:8443".to_string()),
            "TFE_HOSTNAME" => Some("ignored.example.com".to_string()),
            _ => None,
        });
        assert_eq!(address, "https://tfe.internal:8443");
    }

    #[test]
    fn test_address_falls_back_to_hostname() {
        let address = resolve_address(|key| match key {
            "TFE_ADDRESS" => Some(String::new()),
            "TFE_HOSTNAME" => Some("tfe.example.com".to_string()),
            _ => None,
        });
        assert_eq!(address, "https://tfe.example.com");
    }

    #[test]
    fn test_address_falls_back_to_default() {
        assert_eq!(resolve_address(|_| None), defaults::ADDRESS);
        let address = resolve_address(|key| (key == "TFE_HOSTNAME").then(String::new));
        assert_eq!(address, defaults::ADDRESS);
    }

    #[test]
    fn test_resolved_token_uses_credentials_file_for_host() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"credentials": {{"tfe.example.com": {{"token": "from-file"}}}}}}"#
        )
        .unwrap();
        let path = file.path().to_path_buf();

        let config = Config::new("https://tfe.example.com", "")
            .with_resolved_token(|host| {
                assert_eq!(host, "tfe.example.com");
                TokenResolver::new(host)
                    .with_credentials_path(path)
                    .with_env(|_| None)
            })
            .unwrap();
        assert_eq!(config.token, "from-file");
        assert_eq!(config.address, "https://tfe.example.com");
    }

    #[test]
    fn test_resolved_token_missing_is_token_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.tfrc.json");
        let err = Config::new("https://tfe.example.com", "")
            .with_resolved_token(|host| {
                TokenResolver::new(host)
                    .with_credentials_path(path)
                    .with_env(|_| None)
            })
            .unwrap_err();
        assert!(matches!(err, crate::TfeError::TokenNotFound(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new("https://app.terraform.io", "secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("***"));
    }
}
