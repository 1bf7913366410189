use std::io::{Read, Write};

use tracing::debug;

use crate::error::{Error, FormatError, Result};
use crate::format::{read_header, Header, MAX_RUN};
use crate::packet::{read_packet, Packet};
use crate::stats::Stats;

/// Sequential reader for RLE streams.
///
/// # Open sequence
/// [`Decoder::new`] reads the 4-byte header and validates it before handing
/// back a decoder, so no output is ever produced for a foreign stream.
///
/// # Access pattern
/// Packets are read strictly in order. Expansion goes through a fixed
/// 255-byte buffer, one packet at a time; the total output size is never
/// needed up front.
pub struct Decoder<R: Read> {
    input: R,
    header: Header,
    stats: Stats,
}

impl<R: Read> Decoder<R> {
    /// Read and validate the header.
    ///
    /// A header cut short by end-of-stream counts as a format problem, not a
    /// truncation: the input simply is not an RLE stream.
    pub fn new(mut input: R) -> Result<Self> {
        let header = match read_header(&mut input) {
            Ok(header) => header,
            Err(Error::Truncated(_)) => return Err(FormatError::TruncatedHeader.into()),
            Err(e) => return Err(e),
        };
        header.validate()?;

        Ok(Self {
            input,
            header,
            stats: Stats::default(),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Next packet, or `None` at a clean end of stream.
    pub fn next_packet(&mut self) -> Result<Option<Packet>> {
        let packet = read_packet(&mut self.input)?;
        if packet.is_some() {
            self.stats.packets += 1;
        }
        Ok(packet)
    }

    /// Expand every remaining packet into `output`, then flush it.
    pub fn expand_into<W: Write + ?Sized>(mut self, output: &mut W) -> Result<Stats> {
        let mut buf = [0u8; MAX_RUN as usize];
        while let Some(packet) = self.next_packet()? {
            let run = &mut buf[..packet.count as usize];
            run.fill(packet.value);
            output.write_all(run)?;
            self.stats.raw_bytes += u64::from(packet.count);
        }
        output.flush()?;

        debug!(
            raw_bytes = self.stats.raw_bytes,
            packets = self.stats.packets,
            "decoded stream"
        );
        Ok(self.stats)
    }
}

/// Validate the header of `input` and expand its packets into `output`.
pub fn decompress<R: Read, W: Write>(input: R, mut output: W) -> Result<Stats> {
    Decoder::new(input)?.expand_into(&mut output)
}
