use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cloud environments a gateway can be managed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Environment {
    AwsDev,
    AwsTest,
    AwsProd,
    GcpDev,
    WmtNonProd,
    WmtProd,
}

impl Environment {
    pub const ALL: [Environment; 6] = [
        Environment::AwsDev,
        Environment::AwsTest,
        Environment::AwsProd,
        Environment::GcpDev,
        Environment::WmtNonProd,
        Environment::WmtProd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::AwsDev => "AWS_DEV",
            Environment::AwsTest => "AWS_TEST",
            Environment::AwsProd => "AWS_PROD",
            Environment::GcpDev => "GCP_DEV",
            Environment::WmtNonProd => "WMT_NON_PROD",
            Environment::WmtProd => "WMT_PROD",
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown environment: {0}")]
pub struct UnknownEnvironmentError(String);

impl UnknownEnvironmentError {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == name)
            .ok_or_else(|| UnknownEnvironmentError::new(name))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Environment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
