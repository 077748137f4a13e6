use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Raised at construction time in production builds when no usable
    /// Google Maps API key was configured.
    #[error("No Google Maps apiKey was provided; the provider will not be able to load the API")]
    MissingApiKey,

    #[error("Invalid plugin options: {0}")]
    InvalidOptions(String),

    #[error("Failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        PluginError::InvalidOptions(err.to_string())
    }
}
