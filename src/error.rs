use std::fmt;

/// Custom error type for TFE operations
#[derive(Debug)]
pub enum TfeError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// The token was rejected (401)
    Unauthorized,
    /// The requested resource does not exist or is not visible to the token (404)
    NotFound(String),
    /// The workspace is already locked
    WorkspaceLocked,
    /// The workspace is not locked
    WorkspaceNotLocked,
    /// The workspace is locked by a run and cannot be unlocked manually
    WorkspaceLockedByRun,
    /// Request options failed local validation; nothing was sent
    Validation(String),
    /// Token not found in any source
    TokenNotFound(String),
    /// Failed to read or parse credentials file
    Credentials(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
    /// Local file system error
    Io { message: String },
    /// A mock received a call it had no response for
    Mock(String),
}

impl TfeError {
    /// Check if the error is a 404 from the API
    pub fn is_not_found(&self) -> bool {
        matches!(self, TfeError::NotFound(_))
    }

    /// HTTP status code associated with the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TfeError::Api { status, .. } => Some(*status),
            TfeError::Unauthorized => Some(401),
            TfeError::NotFound(_) => Some(404),
            TfeError::WorkspaceLocked
            | TfeError::WorkspaceNotLocked
            | TfeError::WorkspaceLockedByRun => Some(409),
            TfeError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        TfeError::Validation(msg.into())
    }
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfeError::Http(e) => write!(f, "HTTP request failed: {}", e),
            TfeError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            TfeError::Unauthorized => write!(f, "unauthorized"),
            TfeError::NotFound(what) => write!(f, "resource not found: {}", what),
            TfeError::WorkspaceLocked => write!(f, "workspace already locked"),
            TfeError::WorkspaceNotLocked => write!(f, "workspace already unlocked"),
            TfeError::WorkspaceLockedByRun => {
                write!(f, "unable to unlock workspace locked by run")
            }
            TfeError::Validation(msg) => write!(f, "{}", msg),
            TfeError::TokenNotFound(msg) => write!(f, "{}", msg),
            TfeError::Credentials(msg) => write!(f, "{}", msg),
            TfeError::Json(msg) => write!(f, "JSON error: {}", msg),
            TfeError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfeError::Io { message } => write!(f, "IO error: {}", message),
            TfeError::Mock(msg) => write!(f, "mock: {}", msg),
        }
    }
}

impl std::error::Error for TfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfeError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        TfeError::Http(err)
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        TfeError::Json(err.to_string())
    }
}

impl From<std::io::Error> for TfeError {
    fn from(err: std::io::Error) -> Self {
        TfeError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::env::VarError> for TfeError {
    fn from(err: std::env::VarError) -> Self {
        TfeError::Config(err.to_string())
    }
}

/// Result type alias for TFE operations
pub type Result<T> = std::result::Result<T, TfeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TfeError::TokenNotFound("test host".to_string());
        assert!(err.to_string().contains("test host"));
    }

    #[test]
    fn test_api_error_display() {
        let err = TfeError::Api {
            status: 422,
            message: "Name has already been taken".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("Name has already been taken"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        // Verify TfeError is Send + Sync for async usage
        assert_send_sync::<TfeError>();
    }

    #[test]
    fn test_not_found_helpers() {
        let err = TfeError::NotFound("workspace 'ws-123'".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("ws-123"));

        assert!(!TfeError::Unauthorized.is_not_found());
        assert_eq!(TfeError::Unauthorized.status(), Some(401));
    }

    #[test]
    fn test_workspace_lock_errors_map_to_conflict() {
        assert_eq!(TfeError::WorkspaceLocked.status(), Some(409));
        assert_eq!(TfeError::WorkspaceNotLocked.status(), Some(409));
        assert_eq!(TfeError::WorkspaceLockedByRun.status(), Some(409));
    }

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = TfeError::validation("invalid value for organization");
        assert_eq!(err.to_string(), "invalid value for organization");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_json_error_display() {
        let err = TfeError::Json("Invalid JSON".to_string());
        assert!(err.to_string().contains("JSON error"));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_config_error_display() {
        let err = TfeError::Config("Missing required config".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Missing required config"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TfeError = json_err.into();
        match err {
            TfeError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected TfeError::Json"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TfeError = io_err.into();
        match err {
            TfeError::Io { message } => assert!(message.contains("file not found")),
            _ => panic!("Expected TfeError::Io"),
        }
    }

    #[test]
    fn test_error_source_non_http() {
        use std::error::Error;
        let err = TfeError::Api {
            status: 500,
            message: "Server error".to_string(),
        };
        assert!(err.source().is_none());
    }
}
