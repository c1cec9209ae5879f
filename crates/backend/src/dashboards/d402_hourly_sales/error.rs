use thiserror::Error;

/// Errors of the hourly sales dashboard. All of them are recoverable by
/// correcting the input.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Uploaded content is not valid tabular data; the session is unchanged
    #[error("Parse error: {0}")]
    Parse(String),

    /// Analysis requested before the dataset was confirmed
    #[error("Data not loaded: {0}")]
    NotLoaded(String),

    /// Invalid projection inputs (closing time, staff count)
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Stable machine-readable kind used in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse_error",
            Self::NotLoaded(_) => "not_loaded",
            Self::Configuration(_) => "configuration_error",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(value: csv::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_display() {
        let err = DashboardError::configuration("closing time must be after current time");
        assert_eq!(err.kind(), "configuration_error");
        assert_eq!(
            err.to_string(),
            "Configuration error: closing time must be after current time"
        );
        assert_eq!(DashboardError::parse("bad").kind(), "parse_error");
    }
}
