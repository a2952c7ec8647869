use thiserror::Error;

pub type RulerResult<T> = Result<T, RulerError>;

#[derive(Debug, Error)]
pub enum RulerError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("container cannot be mounted: {0}")]
    UnmountableContainer(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
