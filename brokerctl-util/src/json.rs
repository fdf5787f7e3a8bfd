use secrecy::{ExposeSecret, SecretString};

/// Serialize a secret as a plain JSON string.
///
/// Only use this on types that are sent over the wire, never on anything that
/// may end up in a log line.
pub fn serialize_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Login {
        #[serde(serialize_with = "serialize_secret")]
        password: SecretString,
    }

    #[test]
    fn test_secret_is_serialized_verbatim() {
        let login = Login {
            password: SecretString::from("hunter2".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&login).unwrap(),
            r#"{"password":"hunter2"}"#
        );
    }
}
