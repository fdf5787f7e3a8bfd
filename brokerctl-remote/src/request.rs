use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::config::EnvironmentTable;
use crate::error::ValidationError;
use crate::message::CustomBrokerMessage;
use crate::submit::PreparedSubmission;
use crate::util::http::Uri;
use crate::util::types::{ApiKey, Environment, UnknownEnvironmentError};

/// Broker configuration fields as entered by the user
///
/// Values are kept as entered; surrounding whitespace is dropped and the
/// port is parsed when the request is prepared.
#[derive(Debug)]
pub struct SubmissionRequest {
    pub port: String,
    pub broker_url: String,
    pub owner_id: String,
    pub username: String,
    pub password: SecretString,
    pub gateway_id: String,
    pub api_key: ApiKey,
    pub environment: String,
}

impl SubmissionRequest {
    /// Validate the form and resolve everything needed to call the remote.
    pub(crate) fn prepare(
        self,
        environments: &EnvironmentTable,
    ) -> Result<PreparedSubmission, ValidationError> {
        let gateway_id = self.gateway_id.trim();
        let api_key = self.api_key.expose().trim();
        if gateway_id.is_empty() || api_key.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let port = self.port.trim();
        let port = port
            .parse::<u16>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| ValidationError::InvalidPort(port.to_string()))?;

        let environment: Environment = self.environment.parse()?;
        let api_endpoint = environments
            .resolve(environment)
            .ok_or_else(|| UnknownEnvironmentError::new(environment.as_str()))?;

        let owner_id = self.owner_id.trim();
        check_path_segment("Owner ID", owner_id)?;
        check_path_segment("Gateway ID", gateway_id)?;

        let mut api_key =
            HeaderValue::from_str(api_key).map_err(|_| ValidationError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let token_endpoint = Uri::join(api_endpoint, "/v1/auth/token/api")?;
        let message_endpoint = Uri::join(
            api_endpoint,
            &format!("/v1/owner/{owner_id}/gateway/{gateway_id}/custom-message"),
        )?;

        let message = CustomBrokerMessage::new(
            owner_id,
            gateway_id,
            port,
            self.broker_url.trim().to_string(),
            self.username.trim().to_string(),
            SecretString::from(self.password.expose_secret().trim().to_owned()),
        );

        Ok(PreparedSubmission {
            environment,
            owner_id: owner_id.to_string(),
            gateway_id: gateway_id.to_string(),
            token_endpoint,
            message_endpoint,
            api_key,
            message,
        })
    }
}

// Ids are inserted verbatim in the request path, so they must not be able to
// change its structure
fn check_path_segment(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let is_pchar = |c: char| c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@%".contains(c);
    if value.chars().all(is_pchar) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPathSegment {
            field,
            value: value.to_string(),
        })
    }
}
