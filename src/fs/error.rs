use std::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Failures of tree operations. The tree is left unchanged by all of them.
///
/// Pool exhaustion is deliberately absent: with no reclamation and no
/// fallback allocator it is not a recoverable condition, and the arena
/// terminates the process instead of reporting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A path segment does not resolve.
    NotFound,
    /// The operation target is not a directory.
    NotADirectory,
    /// The operation target is not a file.
    NotAFile,
    /// Create on an occupied name.
    AlreadyExists,
    /// The parent directory has no free child slot.
    DirectoryFull,
    /// Empty or malformed input, or an illegal operation on the root.
    InvalidPath,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::NotFound => "no such file or directory",
            Error::NotADirectory => "not a directory",
            Error::NotAFile => "not a file",
            Error::AlreadyExists => "file exists",
            Error::DirectoryFull => "directory full",
            Error::InvalidPath => "invalid path",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}
