use clap::Parser;
use secrecy::SecretString;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use crate::remote::SubmissionRequest;
use crate::util::types::ApiKey;

fn parse_duration(s: &str) -> Result<Duration, ParseIntError> {
    let millis: u64 = s.parse()?;
    Ok(Duration::from_millis(millis))
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)] // read from Cargo.toml
pub struct Cli {
    /// Port of the MQTT broker the gateway should connect to
    #[arg(
        env = "BROKERCTL_PORT",
        long = "port",
        value_name = "int",
        default_value = "8883"
    )]
    pub port: String,

    /// URL of the MQTT broker the gateway should connect to
    #[arg(
        env = "BROKERCTL_BROKER_URL",
        long = "broker-url",
        value_name = "url",
        default_value = "mqtts://mqtt.eclipseprojects.io"
    )]
    pub broker_url: String,

    /// Owner (account) the gateway is registered under
    #[arg(
        env = "BROKERCTL_OWNER_ID",
        long = "owner-id",
        value_name = "id",
        default_value = "wiliot"
    )]
    pub owner_id: String,

    /// Username for the MQTT broker
    #[arg(
        env = "BROKERCTL_USERNAME",
        long = "username",
        value_name = "str",
        default_value = ""
    )]
    pub username: String,

    /// Password for the MQTT broker. Prefer the environment variable over the flag
    #[arg(
        env = "BROKERCTL_PASSWORD",
        long = "password",
        value_name = "str",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// ID of the gateway to configure (required)
    #[arg(
        env = "BROKERCTL_GATEWAY_ID",
        long = "gateway-id",
        value_name = "id",
        default_value = ""
    )]
    pub gateway_id: String,

    /// API key for authentication with remote (required)
    #[arg(
        env = "BROKERCTL_API_KEY",
        long = "api-key",
        value_name = "key",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub api_key: String,

    /// Remote environment, one of AWS_DEV, AWS_TEST, AWS_PROD, GCP_DEV,
    /// WMT_NON_PROD or WMT_PROD
    #[arg(
        env = "BROKERCTL_ENVIRONMENT",
        long = "environment",
        value_name = "name",
        default_value = "AWS_PROD"
    )]
    pub environment: String,

    /// JSON file mapping environment names to API endpoints. Defaults to
    /// `environments.json` in the config directory, if present
    #[arg(
        env = "BROKERCTL_ENVIRONMENTS_FILE",
        long = "environments-file",
        value_name = "path"
    )]
    pub environments_file: Option<PathBuf>,

    /// Remote request timeout in milliseconds
    #[arg(
        env = "BROKERCTL_REQUEST_TIMEOUT_MS",
        long = "request-timeout-ms",
        value_name = "ms",
        value_parser = parse_duration
    )]
    pub request_timeout: Option<Duration>,

    /// Validate the form and print what would be sent without calling remote
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Cli {
    pub fn into_request(self) -> SubmissionRequest {
        SubmissionRequest {
            port: self.port,
            broker_url: self.broker_url,
            owner_id: self.owner_id,
            username: self.username,
            password: SecretString::from(self.password),
            gateway_id: self.gateway_id,
            api_key: ApiKey::from(self.api_key),
            environment: self.environment,
        }
    }
}

pub fn parse() -> Cli {
    Parser::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command, CommandFactory};
    use secrecy::ExposeSecret;
    use std::ffi::OsStr;

    fn arg(cmd: &Command, id: &str) -> Arg {
        cmd.get_arguments()
            .find(|arg| arg.get_id() == id)
            .cloned()
            .unwrap_or_else(|| panic!("no argument {id}"))
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_form_defaults() {
        let cmd = Cli::command();
        for (id, default) in [
            ("port", "8883"),
            ("broker_url", "mqtts://mqtt.eclipseprojects.io"),
            ("owner_id", "wiliot"),
            ("username", ""),
            ("password", ""),
            ("gateway_id", ""),
            ("api_key", ""),
            ("environment", "AWS_PROD"),
        ] {
            let arg = arg(&cmd, id);
            let values: Vec<_> = arg
                .get_default_values()
                .iter()
                .map(|value| value.to_string_lossy())
                .collect();
            assert_eq!(values, [default], "{id}");
        }
        for id in ["environments_file", "request_timeout"] {
            assert!(arg(&cmd, id).get_default_values().is_empty(), "{id}");
        }
    }

    #[test]
    fn test_every_form_field_reads_the_environment() {
        let cmd = Cli::command();
        for (id, var) in [
            ("port", "BROKERCTL_PORT"),
            ("broker_url", "BROKERCTL_BROKER_URL"),
            ("owner_id", "BROKERCTL_OWNER_ID"),
            ("username", "BROKERCTL_USERNAME"),
            ("password", "BROKERCTL_PASSWORD"),
            ("gateway_id", "BROKERCTL_GATEWAY_ID"),
            ("api_key", "BROKERCTL_API_KEY"),
            ("environment", "BROKERCTL_ENVIRONMENT"),
            ("environments_file", "BROKERCTL_ENVIRONMENTS_FILE"),
            ("request_timeout", "BROKERCTL_REQUEST_TIMEOUT_MS"),
        ] {
            assert_eq!(arg(&cmd, id).get_env(), Some(OsStr::new(var)), "{id}");
        }
    }

    #[test]
    fn test_missing_required_fields_still_build_a_request() {
        // missing fields are reported on submission, not as usage errors
        let cli = Cli {
            port: "8883".to_string(),
            broker_url: "mqtts://mqtt.eclipseprojects.io".to_string(),
            owner_id: "wiliot".to_string(),
            username: String::new(),
            password: String::new(),
            gateway_id: String::new(),
            api_key: String::new(),
            environment: "AWS_PROD".to_string(),
            environments_file: None,
            request_timeout: None,
            dry_run: false,
        };
        let request = cli.into_request();

        assert!(request.gateway_id.is_empty());
        assert!(request.api_key.expose().is_empty());
        assert!(request.password.expose_secret().is_empty());
    }

    #[test]
    fn test_into_request_carries_all_fields() {
        let cli = Cli::try_parse_from([
            "brokerctl",
            "--port",
            "1883",
            "--broker-url",
            "mqtt://broker.example.com",
            "--owner-id",
            "acme",
            "--username",
            "user",
            "--password",
            "pass",
            "--gateway-id",
            "gw-01",
            "--api-key",
            "key",
            "--environment",
            "GCP_DEV",
            "--request-timeout-ms",
            "2500",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.request_timeout, Some(Duration::from_millis(2500)));
        assert!(cli.dry_run);

        let request = cli.into_request();
        assert_eq!(request.port, "1883");
        assert_eq!(request.broker_url, "mqtt://broker.example.com");
        assert_eq!(request.owner_id, "acme");
        assert_eq!(request.username, "user");
        assert_eq!(request.password.expose_secret(), "pass");
        assert_eq!(request.gateway_id, "gw-01");
        assert_eq!(request.api_key.expose(), "key");
        assert_eq!(request.environment, "GCP_DEV");
    }

    #[test]
    fn test_invalid_timeout_is_a_usage_error() {
        let result = Cli::try_parse_from(["brokerctl", "--request-timeout-ms", "soon"]);
        assert!(result.is_err());
    }
}
