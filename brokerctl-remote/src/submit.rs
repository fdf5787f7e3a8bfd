use reqwest::header::HeaderValue;
use reqwest::{Client, StatusCode};
use tracing::{Level, Span, debug, field, info, instrument};

use crate::config::RemoteConfig;
use crate::error::SubmitError;
use crate::message::CustomBrokerMessage;
use crate::request::SubmissionRequest;
use crate::token::request_token;
use crate::util::http::Uri;
use crate::util::types::Environment;

/// A validated submission, ready to be sent to the remote
#[derive(Debug)]
pub struct PreparedSubmission {
    pub(crate) environment: Environment,
    pub(crate) owner_id: String,
    pub(crate) gateway_id: String,
    pub(crate) token_endpoint: Uri,
    pub(crate) message_endpoint: Uri,
    pub(crate) api_key: HeaderValue,
    pub(crate) message: CustomBrokerMessage,
}

impl PreparedSubmission {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn token_endpoint(&self) -> &Uri {
        &self.token_endpoint
    }

    pub fn message_endpoint(&self) -> &Uri {
        &self.message_endpoint
    }

    pub fn message(&self) -> &CustomBrokerMessage {
        &self.message
    }
}

/// Sends custom broker messages to gateways through the remote API
pub struct ConfigSubmitter {
    client: Client,
    config: RemoteConfig,
}

impl ConfigSubmitter {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Validate a request against the configured environments without
    /// calling the remote.
    pub fn prepare(&self, request: SubmissionRequest) -> Result<PreparedSubmission, SubmitError> {
        Ok(request.prepare(&self.config.environments)?)
    }

    /// Validate the request, get an access token and send the broker
    /// configuration to the gateway.
    ///
    /// Nothing is retried. If the token is obtained but the message is
    /// rejected, the whole submission can be repeated.
    pub async fn submit(&self, request: SubmissionRequest) -> Result<(), SubmitError> {
        let prepared = self.prepare(request)?;
        self.send(prepared).await
    }

    #[instrument(
        skip_all,
        fields(
            environment = %prepared.environment,
            owner = %prepared.owner_id,
            gateway = %prepared.gateway_id,
            status = field::Empty
        ),
        err(level = Level::DEBUG)
    )]
    pub async fn send(&self, prepared: PreparedSubmission) -> Result<(), SubmitError> {
        let timeout = self.config.request.timeout;
        let token = request_token(
            &self.client,
            &prepared.token_endpoint,
            &prepared.api_key,
            timeout,
        )
        .await?;

        let mut request = self
            .client
            .post(prepared.message_endpoint.to_string())
            .bearer_auth(token.expose())
            .json(&prepared.message);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        debug!("sending custom broker message");
        let response = request.send().await?;
        let status = response.status();
        Span::current().record("status", field::display(status));

        if status != StatusCode::OK {
            let body = response.text().await?;
            return Err(SubmitError::Submission { status, body });
        }

        info!(
            broker = %prepared.message.effective_broker(),
            "custom broker message accepted"
        );
        Ok(())
    }
}
