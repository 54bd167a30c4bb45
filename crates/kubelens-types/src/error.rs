use std::path::PathBuf;

use crate::ApiGroup;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the cluster adapter and the formatters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("kubeconfig not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("invalid kubeconfig {}: {message}", path.display())]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Kubernetes client not initialized")]
    NotInitialized,

    #[error("no client for API group '{group}'")]
    UnknownApiGroup { group: ApiGroup },

    #[error("failed to list {kind}: {source}")]
    Upstream {
        kind: String,
        #[source]
        source: BoxError,
    },

    #[error("{kind} is missing required field '{field}'")]
    FormattingAssumptionViolated { kind: String, field: &'static str },
}

impl Error {
    /// Whether the error means the kubeconfig itself is unusable
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. } | Self::ConfigInvalid { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
