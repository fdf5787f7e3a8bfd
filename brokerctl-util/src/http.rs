pub use uri::{InvalidUriError, Uri};

mod uri {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub struct InvalidUriError(String);

    impl Display for InvalidUriError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.fmt(f)
        }
    }

    impl From<http::uri::InvalidUri> for InvalidUriError {
        fn from(value: http::uri::InvalidUri) -> Self {
            InvalidUriError(value.to_string())
        }
    }

    impl From<http::uri::InvalidUriParts> for InvalidUriError {
        fn from(value: http::uri::InvalidUriParts) -> Self {
            InvalidUriError(value.to_string())
        }
    }

    /// An absolute `http(s)` URI
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Uri(http::Uri);

    impl Uri {
        pub fn from_static(src: &'static str) -> Self {
            Self(http::Uri::from_static(src))
        }

        /// Append `path` to the path of `base_uri`, dropping any query.
        ///
        /// Unlike replacing the path outright, this keeps a base path prefix
        /// such as `https://host/api` so that joining `/v1/x` gives
        /// `https://host/api/v1/x`.
        pub fn join(base_uri: &Uri, path: &str) -> Result<Self, InvalidUriError> {
            let prefix = base_uri.0.path().trim_end_matches('/');
            let path = path.trim_start_matches('/');
            let path_and_query =
                http::uri::PathAndQuery::from_maybe_shared(format!("{prefix}/{path}"))?;

            let mut parts = base_uri.0.clone().into_parts();
            parts.path_and_query = Some(path_and_query);

            Ok(http::Uri::from_parts(parts).map(Self)?)
        }
    }

    impl Display for Uri {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.fmt(f)
        }
    }

    impl FromStr for Uri {
        type Err = InvalidUriError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let uri = http::Uri::from_str(s)?;
            if uri.scheme().is_none() || uri.authority().is_none() {
                return Err(InvalidUriError(format!(
                    "expected an absolute URI with scheme and host, got '{s}'"
                )));
            }
            Ok(Self(uri))
        }
    }

    impl Serialize for Uri {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Uri {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_on_bare_host() {
        let base: Uri = "https://api.example.com".parse().unwrap();
        let uri = Uri::join(&base, "/v1/auth/token/api").unwrap();
        assert_eq!(uri.to_string(), "https://api.example.com/v1/auth/token/api");
    }

    #[test]
    fn test_join_keeps_base_path_and_port() {
        let base: Uri = "http://127.0.0.1:1234/prefix/".parse().unwrap();
        let uri = Uri::join(&base, "/v1/auth/token/api").unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:1234/prefix/v1/auth/token/api");
    }

    #[test]
    fn test_join_rejects_invalid_path() {
        let base: Uri = "https://api.example.com".parse().unwrap();
        assert!(Uri::join(&base, "/v1/owner/has space").is_err());
    }

    #[test]
    fn test_relative_uri_is_rejected() {
        assert!("/just/a/path".parse::<Uri>().is_err());
        assert!("api.example.com".parse::<Uri>().is_err());
    }

    #[test]
    fn test_uri_deserializes_from_string() {
        let uri: Uri = serde_json::from_str(r#""https://api.example.com""#).unwrap();
        assert_eq!(uri, Uri::from_static("https://api.example.com"));
    }
}
