//! Container header (64 bytes).
//!
//! Layout (little-endian):
//! - 0-3: magic `DHRD`
//! - 4-5: version (u16)
//! - 6-7: source count (u16)
//! - 8-11: feature flags (u32)
//! - 12-63: element counts (13 x u32), in section order

/// Magic bytes: `DHRD`.
pub const MAGIC: [u8; 4] = *b"DHRD";

/// Container format version.
pub const VERSION: u16 = 0;

/// Decoded container header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u16,
    pub sources: u16,
    /// Raw feature word; decoded by the loader.
    pub features: u32,

    pub strings_non_debug: u32,
    pub strings: u32,
    pub nodes: u32,
    pub registers: u32,
    pub functions: u32,
    pub enums: u32,
    pub enum_values: u32,
    pub annotations: u32,
    pub arrays: u32,
    pub array_sizes: u32,
    pub members: u32,
    pub types: u32,
    pub buffers: u32,
}

/// Serialized header size in bytes.
pub const HEADER_SIZE: usize = 64;

const _: () = assert!(std::mem::size_of::<Header>() == HEADER_SIZE);

impl Header {
    /// Decode a header from the first [`HEADER_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        let u16_at = |o: usize| u16::from_le_bytes([bytes[o], bytes[o + 1]]);
        let u32_at =
            |o: usize| u32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u16_at(4),
            sources: u16_at(6),
            features: u32_at(8),
            strings_non_debug: u32_at(12),
            strings: u32_at(16),
            nodes: u32_at(20),
            registers: u32_at(24),
            functions: u32_at(28),
            enums: u32_at(32),
            enum_values: u32_at(36),
            annotations: u32_at(40),
            arrays: u32_at(44),
            array_sizes: u32_at(48),
            members: u32_at(52),
            types: u32_at(56),
            buffers: u32_at(60),
        }
    }

    /// Encode to [`HEADER_SIZE`] bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.sources.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.features.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.strings_non_debug.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.strings.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.nodes.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.registers.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.functions.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.enums.to_le_bytes());
        bytes[36..40].copy_from_slice(&self.enum_values.to_le_bytes());
        bytes[40..44].copy_from_slice(&self.annotations.to_le_bytes());
        bytes[44..48].copy_from_slice(&self.arrays.to_le_bytes());
        bytes[48..52].copy_from_slice(&self.array_sizes.to_le_bytes());
        bytes[52..56].copy_from_slice(&self.members.to_le_bytes());
        bytes[56..60].copy_from_slice(&self.types.to_le_bytes());
        bytes[60..64].copy_from_slice(&self.buffers.to_le_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }
}
