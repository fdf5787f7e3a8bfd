/*
This crate is home to everything related to the cloud backend that manages
the gateways whose broker we want to change.

It provides the two-step exchange with the remote: trading an API key for an
access token, then sending a custom broker message to a single gateway with
that token.
*/

mod config;
mod error;
mod message;
mod request;
mod submit;
mod token;

pub use config::{AWS_PROD_API_ENDPOINT, EnvironmentTable, RemoteConfig, RequestConfig};
pub use error::{AuthError, ErrorKind, SubmitError, ValidationError};
pub use message::CustomBrokerMessage;
pub use request::SubmissionRequest;
pub use submit::{ConfigSubmitter, PreparedSubmission};

use brokerctl_util as util;
