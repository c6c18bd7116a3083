use thiserror::Error;

#[derive(Error, Debug)]
pub enum PptxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML formatting error")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, PptxError>;
