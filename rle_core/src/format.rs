use std::io::{self, Read, Write};

use crate::error::{Error, FormatError, Result, Structure};

/// Signature bytes that open every RLE stream.
pub const SIGNATURE: &[u8; 3] = b"RLE";

/// The only format version this crate reads and writes.
pub const VERSION: u8 = 0x10;

/// Fixed size of the stream header in bytes.
///   signature[3] + version:u8 = 4
pub const HEADER_SIZE: usize = 4;

/// Size of one packet in bytes: count:u8 + value:u8.
pub const PACKET_SIZE: usize = 2;

/// Longest run a single packet can describe.
pub const MAX_RUN: u8 = u8::MAX;

// ── Header ─────────────────────────────────────────────────────────────────

/// Decoded representation of the 4-byte stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub signature: [u8; 3],
    pub version: u8,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            signature: *SIGNATURE,
            version: VERSION,
        }
    }
}

impl Header {
    /// Serialize to exactly `HEADER_SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[..3].copy_from_slice(&self.signature);
        buf[3] = self.version;
        buf
    }

    /// Deserialize from `HEADER_SIZE` bytes. No validation happens here, see
    /// [`Header::validate`].
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Self {
        Self {
            signature: [buf[0], buf[1], buf[2]],
            version: buf[3],
        }
    }

    /// Check the signature, then the version, byte for byte.
    pub fn validate(&self) -> std::result::Result<(), FormatError> {
        if &self.signature != SIGNATURE {
            return Err(FormatError::BadSignature {
                found: self.signature,
            });
        }
        if self.version != VERSION {
            return Err(FormatError::BadVersion {
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Write the signature and version. Advances `output` by `HEADER_SIZE` bytes.
pub fn write_header<W: Write + ?Sized>(output: &mut W) -> Result<()> {
    output.write_all(&Header::default().to_bytes())?;
    Ok(())
}

/// Read the 4 header bytes without validating them.
///
/// An input that ends early, including an empty one, is
/// [`Error::Truncated`]; anything else that goes wrong is [`Error::Io`].
pub fn read_header<R: Read + ?Sized>(input: &mut R) -> Result<Header> {
    let mut buf = [0u8; HEADER_SIZE];
    let filled = read_up_to(input, &mut buf)?;
    if filled < HEADER_SIZE {
        return Err(Error::Truncated(Structure::Header));
    }
    Ok(Header::from_bytes(&buf))
}

/// Free-function form of [`Header::validate`].
pub fn validate_header(header: &Header) -> std::result::Result<(), FormatError> {
    header.validate()
}

/// Fill `buf` from `input` until it is full or the input is exhausted.
///
/// Returns how many bytes were filled, so callers can tell a clean end
/// (0) from a short structure (between 0 and `buf.len()`).
pub(crate) fn read_up_to<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bytes_are_signature_then_version() {
        let mut out = Vec::new();
        write_header(&mut out).unwrap();
        assert_eq!(out, b"RLE\x10");
        assert_eq!(out.len(), HEADER_SIZE);
    }

    #[test]
    fn read_header_accepts_exactly_four_bytes() {
        let mut input: &[u8] = b"RLE\x10\x03\x41";
        let header = read_header(&mut input).unwrap();
        assert_eq!(header, Header::default());
        // packet bytes are left for the packet codec
        assert_eq!(input, b"\x03\x41");
    }

    #[test]
    fn read_header_reports_truncation() {
        for short in [&b""[..], &b"R"[..], &b"RL"[..], &b"RLE"[..]] {
            let mut input = short;
            let err = read_header(&mut input).unwrap_err();
            assert!(matches!(err, Error::Truncated(Structure::Header)), "{err:?}");
        }
    }

    #[test]
    fn validate_rejects_lowercase_signature() {
        let header = Header::from_bytes(b"rle\x10");
        assert_eq!(
            header.validate(),
            Err(FormatError::BadSignature { found: *b"rle" })
        );
    }

    #[test]
    fn validate_rejects_other_versions() {
        let header = Header::from_bytes(b"RLE\x11");
        assert_eq!(
            validate_header(&header),
            Err(FormatError::BadVersion { found: 0x11 })
        );
    }

    #[test]
    fn signature_is_checked_before_version() {
        let header = Header::from_bytes(b"XYZ\x00");
        assert!(matches!(
            header.validate(),
            Err(FormatError::BadSignature { .. })
        ));
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn read_errors_are_not_truncation() {
        let err = read_header(&mut Failing).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
    }
}
