//! HLSL reflection data model and binary container.
//!
//! This crate contains:
//! - Packed entity records and their taxonomies (`records`, `taxonomy`)
//! - The reflection instance and its append-only producer operations
//!   (`reflection`, `strings`)
//! - The binary container codec and validator (`header`, `codec`,
//!   `validate`)
//! - Fully-qualified name lookup and a human-readable dump (`lookup`,
//!   `print`)
//!
//! Producers (see the `hlslr-compiler` crate) build an instance during an
//! AST walk; consumers load one from bytes, which validates every
//! cross-reference before the instance is handed out.

pub mod codec;
pub mod error;
pub mod features;
pub mod header;
pub mod lookup;
pub mod print;
pub mod records;
pub mod reflection;
pub mod strings;
pub mod taxonomy;
pub mod validate;

pub use error::{Entity, ReflectError};
pub use features::Features;
pub use header::{Header, HEADER_SIZE, MAGIC, VERSION};
pub use records::{
    Annotation, ArrayDesc, Buffer, EnumDesc, EnumValue, Function, Node, NodeSymbol, Register,
    TypeDesc, NONE, NO_FILE, ROOT_PARENT,
};
pub use reflection::{NameLookup, NodeAnnotation, Pool, Reflection, SourceSpan};
pub use strings::{SourceTable, StringPool};
pub use taxonomy::{
    input_flags, CbufferType, EnumElementType, LocalTable, NodeType, ReturnType, ShaderInputType,
    SrvDimension, VariableClass, VariableType,
};
pub use validate::validate;

#[cfg(test)]
mod reflection_tests;
#[cfg(test)]
mod taxonomy_tests;
