use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("payload of {0} bytes exceeds the 16-bit length field")]
    PayloadTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, ModemError>;
