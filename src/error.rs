use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("no image is loaded")]
    NoImage,

    #[error("no horizon points have been marked")]
    NoPoints,

    #[error("the azimuth zero column has not been set")]
    NoAzimuthZero,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
