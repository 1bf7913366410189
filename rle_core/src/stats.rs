/// What a compress or decompress pass moved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Uncompressed bytes consumed (compress) or produced (decompress).
    pub raw_bytes: u64,
    /// Packets written (compress) or read (decompress).
    pub packets: u64,
}

impl Stats {
    /// Size of the encoded stream these stats describe, header included.
    pub fn encoded_bytes(&self) -> u64 {
        crate::format::HEADER_SIZE as u64 + self.packets * crate::format::PACKET_SIZE as u64
    }

    /// Compression ratio (raw / encoded).
    pub fn ratio(&self) -> f64 {
        self.raw_bytes as f64 / self.encoded_bytes() as f64
    }
}
