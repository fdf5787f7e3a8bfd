use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::util::config::StoredConfig;
use crate::util::http::Uri;
use crate::util::types::Environment;

/// Base URI of the production API, the only environment mapped by default
pub const AWS_PROD_API_ENDPOINT: &str = "https://api.us-east-2.prod.wiliot.cloud";

/// Maps each environment to the base URI of its API
///
/// Environments missing from the table are selectable but will be rejected
/// on submission.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EnvironmentTable(HashMap<Environment, Uri>);

impl EnvironmentTable {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn with(mut self, environment: Environment, api_endpoint: Uri) -> Self {
        self.0.insert(environment, api_endpoint);
        self
    }

    /// Add all entries from `other`, replacing those already present
    pub fn merge(&mut self, other: EnvironmentTable) {
        self.0.extend(other.0);
    }

    pub fn resolve(&self, environment: Environment) -> Option<&Uri> {
        self.0.get(&environment)
    }
}

impl Default for EnvironmentTable {
    fn default() -> Self {
        Self::empty().with(
            Environment::AwsProd,
            Uri::from_static(AWS_PROD_API_ENDPOINT),
        )
    }
}

impl StoredConfig for EnvironmentTable {
    fn kind() -> &'static str {
        "environments"
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequestConfig {
    /// Timeout applied to each call to the remote. The HTTP client default
    /// is used when not set.
    pub timeout: Option<Duration>,
}

/// Remote API configuration
#[derive(Clone, Debug, Default)]
pub struct RemoteConfig {
    pub environments: EnvironmentTable,
    pub request: RequestConfig,
}
