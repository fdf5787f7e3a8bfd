use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{Span, debug, field, instrument};

use crate::error::{AuthError, SubmitError};
use crate::util::http::Uri;

/// Short-lived bearer credential returned by the remote
#[derive(Debug)]
pub(crate) struct AccessToken(SecretString);

impl AccessToken {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Trade the API key for an access token.
///
/// The key is sent as is in the `Authorization` header, without any scheme.
#[instrument(skip_all, fields(status = field::Empty))]
pub(crate) async fn request_token(
    client: &Client,
    endpoint: &Uri,
    api_key: &HeaderValue,
    timeout: Option<Duration>,
) -> Result<AccessToken, SubmitError> {
    let mut request = client
        .post(endpoint.to_string())
        .header(AUTHORIZATION, api_key.clone());
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    debug!("requesting access token");
    let response = request.send().await?;
    let status = response.status();
    Span::current().record("status", field::display(status));

    let body = response.text().await?;
    if status != StatusCode::OK {
        return Err(AuthError::Status { status, body }.into());
    }

    let response: TokenResponse =
        serde_json::from_str(&body).map_err(AuthError::InvalidResponse)?;
    let token = response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    Ok(AccessToken(SecretString::from(token)))
}
