use secrecy::{ExposeSecret, SecretString};

/// API key used to request access tokens from the remote.
///
/// The key is kept in a [`SecretString`] so that it is zeroed on drop and
/// redacted from `Debug` output.
#[derive(Debug)]
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(SecretString::from(value))
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let key = ApiKey::from("super-secret-key");
        let debug = format!("{key:?}");

        assert!(!debug.contains("super-secret-key"));
        assert_eq!(key.expose(), "super-secret-key");
    }
}
