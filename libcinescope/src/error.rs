//! Error types for Cinescope

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CinescopeError>;

#[derive(Error, Debug)]
pub enum CinescopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CinescopeError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CinescopeError::InvalidInput(_) => 3,
            CinescopeError::Api(ApiError::Unauthorized(_)) => 2,
            CinescopeError::Api(_) => 1,
            CinescopeError::Config(_) => 1,
            CinescopeError::Store(_) => 1,
            CinescopeError::Serialization(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database operation failed: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt persisted value for '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = CinescopeError::InvalidInput("Empty query".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_unauthorized() {
        let error = CinescopeError::Api(ApiError::Unauthorized("bad key".to_string()));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_other_api_errors() {
        let status = CinescopeError::Api(ApiError::Status {
            status: 404,
            url: "/movie/1".to_string(),
        });
        assert_eq!(status.exit_code(), 1);

        let network = CinescopeError::Api(ApiError::Network("connection refused".to_string()));
        assert_eq!(network.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_and_store() {
        let config = CinescopeError::Config(ConfigError::MissingField("api.api_key".to_string()));
        assert_eq!(config.exit_code(), 1);

        let store = CinescopeError::Store(StoreError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        )));
        assert_eq!(store.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting() {
        let error = CinescopeError::InvalidInput("Query cannot be empty".to_string());
        assert_eq!(error.to_string(), "Invalid input: Query cannot be empty");

        let error = CinescopeError::Config(ConfigError::MissingField("api.api_key".to_string()));
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field: api.api_key"
        );

        let error = CinescopeError::Api(ApiError::Status {
            status: 500,
            url: "https://api.themoviedb.org/3/movie/1".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "API error: Request failed with status 500: https://api.themoviedb.org/3/movie/1"
        );
    }

    #[test]
    fn test_error_conversion_from_api_error() {
        let api_error = ApiError::Decode("missing field `id`".to_string());
        let error: CinescopeError = api_error.into();

        match error {
            CinescopeError::Api(ApiError::Decode(_)) => {}
            _ => panic!("Expected CinescopeError::Api"),
        }
    }
}
