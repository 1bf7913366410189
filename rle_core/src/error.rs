use std::fmt;
use std::io;

use thiserror::Error;

/// The on-disk structure a stream ended inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Header,
    Packet,
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Packet => write!(f, "packet"),
        }
    }
}

/// Why a stream was rejected as not being an RLE stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("bad signature {found:02x?}, not an RLE stream")]
    BadSignature { found: [u8; 3] },
    #[error("unsupported version 0x{found:02x}")]
    BadVersion { found: u8 },
    #[error("stream ends before the 4-byte header")]
    TruncatedHeader,
}

/// Error type for every codec operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
    #[error("stream truncated in the middle of a {0}")]
    Truncated(Structure),
    #[error("invalid format: {0}")]
    InvalidFormat(#[from] FormatError),
    #[error("nothing to compress: input is empty")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, Error>;
