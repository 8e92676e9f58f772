use thiserror::Error;

use crate::network::TransportError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("ui error: {0}")]
    Ui(#[from] eframe::Error),
}
