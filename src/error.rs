//! Error taxonomy for the whiteboard core.
//!
//! DESIGN
//! ======
//! Contract violations (unsupported element kind, invalid resize corner) are
//! programming errors that the guarded state-machine transitions never
//! trigger; the functions that can observe them still reject bad input
//! explicitly and return a typed error. User-driven edge cases (zero drags,
//! empty strokes, history underflow) are never errors.

/// Stable machine-readable code for an error, for host-side logging.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("unsupported element kind: {0}")]
    UnsupportedKind(String),
    #[error("invalid resize corner: {0}")]
    InvalidCorner(String),
}

impl ErrorCode for ContractError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedKind(_) => "E_UNSUPPORTED_KIND",
            Self::InvalidCorner(_) => "E_INVALID_CORNER",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid element: {0}")]
    Element(#[from] ContractError),
    #[error("history index {index} out of range for {len} snapshots")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ErrorCode for PersistError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "E_PERSIST_DECODE",
            Self::Element(e) => e.error_code(),
            Self::IndexOutOfRange { .. } => "E_PERSIST_INDEX",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_CONFIG_PARSE",
        }
    }
}
