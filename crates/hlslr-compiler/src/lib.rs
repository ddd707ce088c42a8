//! Producer side of HLSL reflection: the declaration/type facade and the
//! builder that turns a walked module into a packed reflection instance.
//!
//! - `ast` - the declaration and type facade the frontend fills in
//! - `classify` - resource template classification
//! - `types` - recursive type registration with structural dedup
//! - `registers` - resource registers and cbuffer/tbuffer blocks
//! - `walk` - the module-walk driver
//!
//! The produced [`hlslr_reflection::Reflection`] instance is the
//! consumer-facing artifact; see that crate for the codec, validator and
//! name lookup.

pub mod ast;
pub mod classify;
pub mod registers;
pub mod types;
pub mod walk;

pub use ast::{
    AstDecl, AstField, AstType, AstTypeKind, BlockKind, BufferBlock, EnumDecl, FunctionDecl,
    RegisterAssignment, ResourceDecl, Scalar, TemplateArg,
};
pub use classify::{classify_resource, RegisterTypeInfo, SAMPLE_COUNT_NOT_APPLICABLE};
pub use registers::{fill_register, register_buffer};
pub use types::register_type;
pub use walk::{reflect, ReflectOptions};

#[cfg(test)]
mod types_tests;
#[cfg(test)]
mod walk_tests;
