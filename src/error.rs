use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObfError {
    #[error("Invalid key argument")]
    InvalidKey,

    #[error("Invalid IV argument")]
    InvalidIv,

    #[error("Invalid data argument")]
    InvalidData,

    #[error("Invalid length argument")]
    InvalidLength,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex value: {0}")]
    InvalidHex(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}

impl ObfError {
    /// Status code reported for this error
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidKey => Status::InvalidKey,
            Self::InvalidIv => Status::InvalidIv,
            Self::InvalidData => Status::InvalidData,
            Self::InvalidLength => Status::InvalidLength,
            _ => Status::Failure,
        }
    }
}

pub type Result<T> = std::result::Result<T, ObfError>;

/// Numeric status codes for encode/decode callers.
/// `Failure` covers everything outside the argument contract (I/O, file format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Success = 0,
    Failure = 1,
    InvalidKey = 2,
    InvalidIv = 3,
    InvalidData = 4,
    InvalidLength = 5,
}

impl Status {
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => e.status(),
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::InvalidKey => "invalid key",
            Self::InvalidIv => "invalid iv",
            Self::InvalidData => "invalid data",
            Self::InvalidLength => "invalid length",
        };
        f.write_str(name)
    }
}
