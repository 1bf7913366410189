use std::io::{Read, Write};

use crate::error::{Error, Result, Structure};
use crate::format::{read_up_to, PACKET_SIZE};

/// One run descriptor: `value` repeated `count` times.
///
/// The encoder only ever produces packets with `count >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub count: u8,
    pub value: u8,
}

impl Packet {
    pub fn new(count: u8, value: u8) -> Self {
        Self { count, value }
    }

    /// Wire form: count byte, then value byte.
    #[inline]
    pub fn to_bytes(self) -> [u8; PACKET_SIZE] {
        [self.count, self.value]
    }

    #[inline]
    pub fn from_bytes(buf: [u8; PACKET_SIZE]) -> Self {
        Self {
            count: buf[0],
            value: buf[1],
        }
    }
}

/// Write `packet` as exactly `PACKET_SIZE` bytes.
pub fn write_packet<W: Write + ?Sized>(output: &mut W, packet: Packet) -> Result<()> {
    output.write_all(&packet.to_bytes())?;
    Ok(())
}

/// Read the next packet.
///
/// `Ok(None)` means the input ended cleanly on a packet boundary. A single
/// dangling byte is [`Error::Truncated`].
pub fn read_packet<R: Read + ?Sized>(input: &mut R) -> Result<Option<Packet>> {
    let mut buf = [0u8; PACKET_SIZE];
    match read_up_to(input, &mut buf)? {
        0 => Ok(None),
        PACKET_SIZE => Ok(Some(Packet::from_bytes(buf))),
        _ => Err(Error::Truncated(Structure::Packet)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_is_count_then_value() {
        let mut out = Vec::new();
        write_packet(&mut out, Packet::new(3, 0x41)).unwrap();
        assert_eq!(out, [3, 0x41]);
    }

    #[test]
    fn every_packet_is_two_bytes() {
        let mut out = Vec::new();
        for (count, value) in [(1, 0), (255, 255), (128, 7)] {
            write_packet(&mut out, Packet::new(count, value)).unwrap();
        }
        assert_eq!(out.len(), 3 * PACKET_SIZE);
    }

    #[test]
    fn read_stops_cleanly_at_boundary() {
        let mut input: &[u8] = &[2, 0x42, 1, 0x43];
        assert_eq!(read_packet(&mut input).unwrap(), Some(Packet::new(2, 0x42)));
        assert_eq!(read_packet(&mut input).unwrap(), Some(Packet::new(1, 0x43)));
        assert_eq!(read_packet(&mut input).unwrap(), None);
        // exhausted input keeps reporting a clean end
        assert_eq!(read_packet(&mut input).unwrap(), None);
    }

    #[test]
    fn dangling_count_byte_is_truncation() {
        let mut input: &[u8] = &[5, 0x00, 7];
        read_packet(&mut input).unwrap();
        let err = read_packet(&mut input).unwrap_err();
        assert!(matches!(err, Error::Truncated(Structure::Packet)));
    }

    /// Hands out one byte per `read` call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn short_reads_are_not_truncation() {
        let mut input = Trickle(&[9, 0xEE]);
        assert_eq!(read_packet(&mut input).unwrap(), Some(Packet::new(9, 0xEE)));
    }
}
