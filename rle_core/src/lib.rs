//! Run-length encoded file streams.
//!
//! A stream is a 4-byte header (`"RLE"` + version `0x10`) followed by 2-byte
//! `[count][value]` packets until end of data. [`compress`] and [`decompress`]
//! work over any `Read` / `Write` pair; [`Encoder`] and [`Decoder`] expose the
//! same logic incrementally.

pub mod error;
pub mod format;
pub mod packet;
pub mod reader;
pub mod stats;
pub mod writer;

pub use error::{Error, FormatError, Result, Structure};
pub use format::{
    read_header, validate_header, write_header, Header, HEADER_SIZE, SIGNATURE, VERSION,
};
pub use packet::{read_packet, write_packet, Packet};
pub use reader::{decompress, Decoder};
pub use stats::Stats;
pub use writer::{compress, Encoder};
