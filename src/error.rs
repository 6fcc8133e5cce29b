use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediscanError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Common(#[from] mediscan_common::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No QR code found in image: {0}")]
    QrDecode(String),

    #[error("No images found in: {0}")]
    NoImagesFound(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MediscanError>;
