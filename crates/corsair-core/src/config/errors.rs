use crate::errors::CorsairError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config source not found at '{path}'")]
    SourceNotFound { path: String },

    #[error("Failed to parse config source: {message}")]
    SourceParse { message: String },

    #[error("Config section '[{section}]' is not a table of keys")]
    MalformedSection { section: String },

    #[error("Missing required config section '[{section}]'")]
    MissingSection { section: &'static str },

    #[error("Missing required key '{key}' in config section '[{section}]'")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error(
        "Invalid value for '{key}' in config section '[{section}]': expected {expected}, found {found}"
    )]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid derivation: {message}")]
    InvalidDerivation { message: String },

    #[error("IO error reading config source: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CorsairError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            ConfigError::SourceParse { .. } => "SOURCE_PARSE_ERROR",
            ConfigError::MalformedSection { .. }
            | ConfigError::MissingSection { .. }
            | ConfigError::MissingKey { .. }
            | ConfigError::InvalidValue { .. } => "MALFORMED_CONFIG",
            ConfigError::InvalidDerivation { .. } => "INVALID_DERIVATION",
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::SourceParse { .. }
                | ConfigError::MalformedSection { .. }
                | ConfigError::MissingSection { .. }
                | ConfigError::MissingKey { .. }
                | ConfigError::InvalidValue { .. }
                | ConfigError::InvalidDerivation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_display() {
        let error = ConfigError::MissingKey {
            section: "agent",
            key: "agent_batch_size",
        };
        assert_eq!(
            error.to_string(),
            "Missing required key 'agent_batch_size' in config section '[agent]'"
        );
        assert_eq!(error.error_code(), "MALFORMED_CONFIG");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_invalid_value_display() {
        let error = ConfigError::InvalidValue {
            section: "environment",
            key: "env_size",
            expected: "a positive integer",
            found: "string \"ten\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'env_size' in config section '[environment]': \
             expected a positive integer, found string \"ten\""
        );
        assert!(error.is_user_error());
    }

    #[test]
    fn test_source_not_found_is_not_a_user_error() {
        let error = ConfigError::SourceNotFound {
            path: "config_files/voyage.toml".to_string(),
        };
        assert_eq!(error.error_code(), "SOURCE_NOT_FOUND");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_invalid_derivation_display() {
        let error = ConfigError::InvalidDerivation {
            message: "zero divisor".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid derivation: zero divisor");
        assert_eq!(error.error_code(), "INVALID_DERIVATION");
    }
}
