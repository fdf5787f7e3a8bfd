use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

pub trait StoredConfig
where
    Self: DeserializeOwned,
{
    fn kind() -> &'static str;

    /// This config's preferred file name excluding the extension.
    fn default_name() -> &'static str {
        Self::kind()
    }
}

#[derive(Debug, Error)]
pub enum ReadConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and decode a config stored with its default name under `dir`,
/// usually the application config dir.
///
/// All stored configs automatically get a `.json` extension. Returns `None`
/// if no config has been stored with the default name.
pub async fn get_in<C: StoredConfig, P: AsRef<Path>>(dir: P) -> Result<Option<C>, ReadConfigError> {
    let path = dir.as_ref().join(C::default_name()).with_extension("json");
    match read_file(&path).await {
        Ok(config) => Ok(Some(config)),
        Err(ReadConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!("no {} config found at {}", C::kind(), path.display());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Load and decode a config from an explicit path. The file must exist.
pub async fn read_file<C: StoredConfig, P: AsRef<Path>>(path: P) -> Result<C, ReadConfigError> {
    let path = path.as_ref();
    debug!("reading {} config from {}", C::kind(), path.display());

    let contents = fs::read(path).await.map_err(|source| ReadConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&contents).map_err(|source| ReadConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
