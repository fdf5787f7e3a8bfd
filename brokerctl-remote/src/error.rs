use reqwest::StatusCode;
use thiserror::Error;

use crate::util::http::InvalidUriError;
use crate::util::types::UnknownEnvironmentError;

/// The form cannot be submitted as entered. Raised before any call to the remote.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Gateway ID and API Key are required.")]
    MissingFields,

    #[error("Port must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error(transparent)]
    UnknownEnvironment(#[from] UnknownEnvironmentError),

    #[error("{field} '{value}' cannot be used as a request path segment")]
    InvalidPathSegment { field: &'static str, value: String },

    #[error("API Key contains characters that are not allowed in a header")]
    InvalidApiKey,

    #[error("Cannot build request URI: {0}")]
    InvalidUri(#[from] InvalidUriError),
}

/// The access token could not be obtained
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error ({status}):\n{body}")]
    Status { status: StatusCode, body: String },

    #[error("Token response is not valid JSON: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("No access token in response.")]
    MissingToken,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Custom message failed ({status}):\n{body}")]
    Submission { status: StatusCode, body: String },

    #[error("Request to remote failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    Submission,
    Transport,
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmitError::Validation(_) => ErrorKind::Validation,
            SubmitError::Auth(_) => ErrorKind::Auth,
            SubmitError::Submission { .. } => ErrorKind::Submission,
            SubmitError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Short heading to present the error to the user with
    pub fn title(&self) -> &'static str {
        match self {
            SubmitError::Validation(ValidationError::MissingFields) => "Missing fields",
            SubmitError::Validation(ValidationError::UnknownEnvironment(_)) => {
                "Invalid Environment"
            }
            SubmitError::Validation(_) => "Invalid input",
            SubmitError::Auth(AuthError::Status { .. }) => "Auth Failed",
            SubmitError::Auth(_) => "Token Error",
            SubmitError::Submission { .. } => "Failed",
            SubmitError::Transport(_) => "Exception",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_environment_renders() {
        let err: SubmitError =
            ValidationError::from(UnknownEnvironmentError::new("GCP_DEV")).into();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.title(), "Invalid Environment");
        assert_eq!(err.to_string(), "Unknown environment: GCP_DEV");
    }

    #[test]
    fn test_submission_error_carries_body() {
        let err = SubmitError::Submission {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };

        assert_eq!(err.kind(), ErrorKind::Submission);
        assert_eq!(err.title(), "Failed");
        assert!(err.to_string().contains("boom"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_auth_titles() {
        let status: SubmitError = AuthError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        }
        .into();
        let missing: SubmitError = AuthError::MissingToken.into();

        assert_eq!(status.title(), "Auth Failed");
        assert_eq!(missing.title(), "Token Error");
        assert_eq!(missing.kind(), ErrorKind::Auth);
    }
}
