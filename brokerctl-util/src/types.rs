mod api_key;
mod environment;

pub use api_key::ApiKey;
pub use environment::{Environment, UnknownEnvironmentError};
