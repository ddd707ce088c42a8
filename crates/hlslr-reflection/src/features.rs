//! Feature flags persisted in the container header.

use bitflags::bitflags;

bitflags! {
    /// What the producer was asked to collect. Consumers read these to know
    /// which entity tables are meaningful.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct Features: u32 {
        /// Resource bindings and cbuffer/tbuffer blocks.
        const BASICS = 1 << 0;
        /// Function declarations.
        const FUNCTIONS = 1 << 1;
        /// Enums, typedefs and using declarations.
        const USER_TYPES = 1 << 2;
        /// Namespace scopes.
        const NAMESPACES = 1 << 3;
        /// Debug strings, source locations, member/type names.
        const SYMBOL_INFO = 1 << 4;
        /// Recurse into function bodies.
        const SCOPES = 1 << 5;
    }
}

impl Features {
    pub fn has_symbol_info(self) -> bool {
        self.contains(Self::SYMBOL_INFO)
    }
}
