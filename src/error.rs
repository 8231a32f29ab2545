//! Error type shared by the simulation modules.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeciateError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpeciateError>;
