use crate::api::automods::ApiError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Other(String),

    #[error("{0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
