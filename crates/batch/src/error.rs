use std::path::PathBuf;

use skilldoc_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(
        "{} and {} both map to output {}",
        .first.display(),
        .second.display(),
        .destination.display()
    )]
    DestinationCollision {
        destination: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
    #[error(
        "output {} for {} would overwrite an input",
        .destination.display(),
        .location.display()
    )]
    DestinationIsInput {
        destination: PathBuf,
        location: PathBuf,
    },
    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

skilldoc_common::impl_context!();
