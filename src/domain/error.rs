use std::error::Error as StdError;
use std::fmt;
use std::io;

use thiserror::Error;

/// Kind of server entity a lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Environment,
    Release,
    Channel,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Project => "Project",
            EntityKind::Environment => "Environment",
            EntityKind::Release => "Release",
            EntityKind::Channel => "Channel",
        };
        f.write_str(label)
    }
}

/// Required command-line input that was not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingParameter {
    Server,
    ApiKey,
    ProjectName,
    SemVer,
    Environment,
}

impl MissingParameter {
    /// Operator-facing diagnostic line for this parameter.
    pub fn message(&self) -> &'static str {
        match self {
            MissingParameter::Server => "Server parameter must be passed.",
            MissingParameter::ApiKey => "API Key parameter must be passed.",
            MissingParameter::ProjectName => "Project Name parameter must be passed.",
            MissingParameter::SemVer => "SemVer parameter must be passed.",
            MissingParameter::Environment => "Environment parameter must be passed.",
        }
    }
}

/// Library-wide error type for octorelease operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// One or more required parameters were absent.
    #[error("{}", format_missing(.0))]
    MissingParameters(Vec<MissingParameter>),

    /// A named entity has no match in the remote collection.
    #[error("{entity} '{key}' not found")]
    NotFound { entity: EntityKind, key: String },

    /// Transport error, authentication failure, or server-rejected request.
    #[error("{message}")]
    RemoteFailure {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

fn format_missing(params: &[MissingParameter]) -> String {
    params.iter().map(MissingParameter::message).collect::<Vec<_>>().join("\n")
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        AppError::NotFound { entity, key: key.into() }
    }

    pub(crate) fn remote(message: impl Into<String>, status: Option<u16>) -> Self {
        AppError::RemoteFailure { message: message.into(), status, source: None }
    }

    /// Remote failure keeping the transport or decoding error as its cause.
    pub(crate) fn remote_caused<E>(
        message: impl Into<String>,
        status: Option<u16>,
        source: E,
    ) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        AppError::RemoteFailure { message: message.into(), status, source: Some(Box::new(source)) }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParse(_)
            | AppError::MissingParameters(_) => io::ErrorKind::InvalidInput,
            AppError::NotFound { .. } => io::ErrorKind::NotFound,
            AppError::RemoteFailure { status: Some(401 | 403), .. } => {
                io::ErrorKind::PermissionDenied
            }
            AppError::RemoteFailure { .. } => io::ErrorKind::Other,
        }
    }
}
