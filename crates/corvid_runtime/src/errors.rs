//! Runtime errors and the message texts shared by the built-ins.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Resolution target is missing or is not a directory.
    #[error("No such file or directory - {0}")]
    NotFound(String),

    #[error("File exists - {0}")]
    AlreadyExists(String),

    /// An underlying create/delete failed for OS reasons.
    #[error("{0}")]
    SystemCall(String),

    #[error("{0}")]
    ClosedResource(String),

    #[error("Argument count mismatch: expected {expected} but got {actual}")]
    ArgumentCount { expected: String, actual: usize },

    #[error("{0}")]
    Argument(String),

    #[error("{0}")]
    NotImplemented(String),

    #[error("Type mismatch: expected {expected} but got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Undefined method '{method}' for {receiver}")]
    NoMethod {
        method: String,
        receiver: &'static str,
    },

    #[error("Invalid object reference")]
    DanglingObject,
}

impl RuntimeError {
    pub fn arity(min: usize, max: usize, actual: usize) -> Self {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min}..{max}")
        };
        RuntimeError::ArgumentCount { expected, actual }
    }

    pub fn not_a_directory(path: &str) -> Self {
        RuntimeError::NotFound(format!("{path} is not a directory"))
    }
}

pub mod messages {
    pub const CLOSED_DIRECTORY: &str = "closed directory";
    pub const DIRECTORY_ALREADY_CLOSED: &str = "Directory already closed";
    pub const NO_SUCH_DIRECTORY: &str = "No such directory";
    pub const NO_BLOCK_GIVEN: &str = "no block given";
    pub const CHROOT_UNSUPPORTED: &str =
        "chroot not implemented: chroot is non-portable and is not supported.";
}
