//! Load and validation errors.

use crate::header::VERSION;

/// Entity kind named by a validation error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Entity {
    Source,
    Node,
    Register,
    Function,
    Enum,
    EnumValue,
    Annotation,
    Array,
    Member,
    Type,
    Buffer,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Source => "source",
            Self::Node => "node",
            Self::Register => "register",
            Self::Function => "function",
            Self::Enum => "enum",
            Self::EnumValue => "enum value",
            Self::Annotation => "annotation",
            Self::Array => "array",
            Self::Member => "member",
            Self::Type => "type",
            Self::Buffer => "buffer",
        };
        f.write_str(name)
    }
}

/// Error loading or validating a reflection container.
///
/// A failed load discards the instance; no partially-initialized value
/// escapes.
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    #[error("invalid magic: expected DHRD")]
    InvalidMagic,

    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u16),

    #[error("unknown feature bits: {0:#x}")]
    UnknownFeatures(u32),

    #[error("data too small for header: {0} bytes")]
    TooSmall(usize),

    #[error("unexpected end of data at offset {offset} (need {needed} more bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("string {index} is not valid UTF-8")]
    InvalidUtf8 { index: u32 },

    #[error("debug strings and sources require symbol info")]
    DebugWithoutSymbols,

    #[error("trailing bytes: consumed {consumed} of {total}")]
    TrailingBytes { consumed: usize, total: usize },

    #[error("{entity} {index}: {reason}")]
    Invalid {
        entity: Entity,
        index: u32,
        reason: &'static str,
    },
}

impl ReflectError {
    pub(crate) fn invalid(entity: Entity, index: u32, reason: &'static str) -> Self {
        Self::Invalid {
            entity,
            index,
            reason,
        }
    }
}
