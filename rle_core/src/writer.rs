use std::io::{self, Read, Write};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::format::{write_header, MAX_RUN};
use crate::packet::{write_packet, Packet};
use crate::stats::Stats;

/// Bytes pulled from the input per `read` call in [`compress`].
const READ_CHUNK: usize = 8 * 1024;

/// Streaming run-length encoder.
///
/// # Write contract
/// Call [`write`](Encoder::write) any number of times with arbitrary-sized
/// byte slices; chunk boundaries never change the encoded output. The header
/// goes out with the first byte, so an encoder that never sees a byte writes
/// nothing. Call [`finish`](Encoder::finish) to emit the trailing run and
/// flush.
///
/// # Layout written
/// ```text
/// [HEADER: "RLE" 0x10]
/// [count value] [count value] ...          ← one packet per run, runs cap at 255
/// ```
pub struct Encoder<W: Write> {
    output: W,
    /// Value and length of the run being accumulated; `None` until the first byte.
    run: Option<(u8, u8)>,
    stats: Stats,
}

impl<W: Write> Encoder<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            run: None,
            stats: Stats::default(),
        }
    }

    /// Feed `data` through run detection, emitting every run it closes.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        for &byte in data {
            match self.run {
                None => {
                    write_header(&mut self.output)?;
                    self.run = Some((byte, 1));
                }
                Some((value, len)) if value == byte && len < MAX_RUN => {
                    self.run = Some((value, len + 1));
                }
                Some((value, len)) => {
                    self.emit(Packet::new(len, value))?;
                    self.run = Some((byte, 1));
                }
            }
            self.stats.raw_bytes += 1;
        }
        Ok(())
    }

    fn emit(&mut self, packet: Packet) -> Result<()> {
        trace!(count = packet.count, value = packet.value, "emit packet");
        write_packet(&mut self.output, packet)?;
        self.stats.packets += 1;
        Ok(())
    }

    /// Emit the trailing run and flush the output.
    ///
    /// Fails with [`Error::EmptyInput`] if no byte was ever written.
    pub fn finish(mut self) -> Result<Stats> {
        let Some((value, len)) = self.run.take() else {
            return Err(Error::EmptyInput);
        };
        self.emit(Packet::new(len, value))?;
        self.output.flush()?;

        debug!(
            raw_bytes = self.stats.raw_bytes,
            packets = self.stats.packets,
            "encoded stream"
        );
        Ok(self.stats)
    }
}

/// Compress everything `input` yields into `output`, header included.
///
/// Errors abort immediately; whatever already reached `output` stays there.
pub fn compress<R: Read, W: Write>(mut input: R, output: W) -> Result<Stats> {
    let mut encoder = Encoder::new(output);
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        encoder.write(&buf[..n])?;
    }
    encoder.finish()
}
