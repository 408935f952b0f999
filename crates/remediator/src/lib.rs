pub mod config;
pub mod dispatch;
pub mod kubernetes;
pub mod metrics;
pub mod remediation;
pub mod server;
pub mod sources;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Kubernetes error: {0}")]
    Kubernetes(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Payload error: {0}")]
    Payload(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<kube::Error> for Error {
    fn from(e: kube::Error) -> Self {
        Error::Kubernetes(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
