use thiserror::Error;

/// Failure of an encode or decode call.
///
/// Truncated sequences, values above `U+10FFFF` and surrogates all report the
/// same kind; callers are only told that the input was not legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("illegal source")]
    InvalidSource,
}

pub type Result<T> = std::result::Result<T, Error>;
