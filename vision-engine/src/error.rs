use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown device: {0}")]
    DeviceNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
