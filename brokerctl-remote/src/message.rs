use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::json;
use std::sync::LazyLock;

use crate::util::json::serialize_secret;

static BROKER_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(mqtts|mqtt|tcp|ssl|ws|wss)://").expect("regular expression should compile")
});

/// Custom broker configuration sent to a gateway
///
/// Topics are always derived from the owner and gateway so that the gateway
/// publishes under its own namespace on the new broker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBrokerMessage {
    custom_broker: bool,
    port: u16,
    broker_url: String,
    username: String,
    #[serde(serialize_with = "serialize_secret")]
    password: SecretString,
    update_topic: String,
    status_topic: String,
    data_topic: String,
}

impl CustomBrokerMessage {
    pub fn new(
        owner_id: &str,
        gateway_id: &str,
        port: u16,
        broker_url: String,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            custom_broker: true,
            port,
            broker_url,
            username,
            password,
            update_topic: format!("update-test/{owner_id}/{gateway_id}"),
            status_topic: format!("status-test/{owner_id}/{gateway_id}"),
            data_topic: format!("data-test/{owner_id}/{gateway_id}"),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn broker_url(&self) -> &str {
        &self.broker_url
    }

    pub fn update_topic(&self) -> &str {
        &self.update_topic
    }

    pub fn status_topic(&self) -> &str {
        &self.status_topic
    }

    pub fn data_topic(&self) -> &str {
        &self.data_topic
    }

    /// Address the gateway will connect to once the message is applied.
    ///
    /// Gateways always connect over TLS, so any known MQTT scheme is replaced
    /// with `ssl://` and the port is appended.
    pub fn effective_broker(&self) -> String {
        let url = BROKER_SCHEME.replace(&self.broker_url, "ssl://");
        format!("{url}:{}", self.port)
    }

    /// Owner the gateway will report under, read back from the data topic
    pub fn owner_id(&self) -> Option<&str> {
        self.data_topic.split('/').nth(1)
    }

    /// JSON view of the message safe to print, with the password masked
    pub fn redacted(&self) -> serde_json::Value {
        let password = if self.password.expose_secret().is_empty() {
            ""
        } else {
            "********"
        };
        json!({
            "customBroker": self.custom_broker,
            "port": self.port,
            "brokerUrl": self.broker_url,
            "username": self.username,
            "password": password,
            "updateTopic": self.update_topic,
            "statusTopic": self.status_topic,
            "dataTopic": self.data_topic,
        })
    }
}
