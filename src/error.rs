use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Directory creation, artifact read or artifact write failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sidecar manifest could not be serialized
    #[error("manifest error on {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML config file exists but does not parse
    #[error("config error in {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Artifact name cannot be emitted as a class name
    #[error("invalid artifact name '{0}': expected an ASCII letter followed by letters, digits or '_'")]
    InvalidArtifactName(String),
}

impl GeneratorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }
}
