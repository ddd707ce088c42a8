//! The reflection instance: flat entity tables plus the append-only
//! primitive operations the producer drives during its AST walk.
//!
//! An instance is built once, then read-only. Loading from bytes is the
//! other constructor (see `codec`); `strip_symbols` is the only
//! destructive operation.

use indexmap::IndexMap;

use crate::features::Features;
use crate::records::{
    Annotation, ArrayDesc, Buffer, EnumDesc, EnumValue, Function, Node, NodeSymbol, Register,
    TypeDesc, NONE, ROOT_PARENT,
};
use crate::strings::{SourceTable, StringPool};
use crate::taxonomy::NodeType;

/// Which string pool to intern into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pool {
    /// Human names and file paths; cleared by `strip_symbols`.
    Debug,
    /// Annotation text; survives stripping.
    NonDebug,
}

/// Source location of a declaration, as reported by the producing
/// frontend. Lines and columns are 1-based.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceSpan {
    pub file: String,
    pub line_start: u32,
    pub line_end: u32,
    pub column_start: u32,
    pub column_end: u32,
}

/// One annotation attached to a node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NodeAnnotation {
    pub text: String,
    pub is_builtin: bool,
}

impl NodeAnnotation {
    /// Free-form user annotation text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_builtin: false,
        }
    }

    /// The compiler-recognised shader-stage attribute.
    pub fn shader_stage(stage: &str) -> Self {
        Self {
            text: format!("shader(\"{stage}\")"),
            is_builtin: true,
        }
    }
}

/// Reverse indices from fully-qualified names, built on demand by
/// `generate_name_lookup_table`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameLookup {
    pub fully_resolved_to_node_id: IndexMap<String, u32>,
    /// Parallel to the nodes table.
    pub node_id_to_fully_resolved: Vec<String>,
    pub fully_resolved_to_member_id: IndexMap<String, u32>,
}

/// A complete reflection of one shader program.
#[derive(Clone, Debug, Default)]
pub struct Reflection {
    features: Features,

    strings: StringPool,
    strings_non_debug: StringPool,
    sources: SourceTable,

    nodes: Vec<Node>,
    registers: Vec<Register>,
    functions: Vec<Function>,
    enums: Vec<EnumDesc>,
    enum_values: Vec<EnumValue>,
    annotations: Vec<Annotation>,
    arrays: Vec<ArrayDesc>,
    array_sizes: Vec<u32>,
    member_type_ids: Vec<u32>,
    types: Vec<TypeDesc>,
    buffers: Vec<Buffer>,

    // Symbol-side tables; empty without SYMBOL_INFO.
    node_symbols: Vec<NodeSymbol>,
    member_name_ids: Vec<u32>,
    type_name_ids: Vec<u32>,

    lookup: Option<NameLookup>,
}

impl Reflection {
    /// Create an empty instance holding only the root (global scope)
    /// namespace node.
    pub fn new(features: Features) -> Self {
        let mut refl = Self {
            features,
            ..Self::default()
        };

        if features.has_symbol_info() {
            let empty = refl.strings.intern("");
            refl.node_symbols.push(NodeSymbol::unlocated(empty));
        }
        refl.nodes
            .push(Node::new(NodeType::Namespace, 0, 0, 0, ROOT_PARENT, 0));

        refl
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn has_symbol_info(&self) -> bool {
        self.features.has_symbol_info()
    }

    // ---- producer operations -------------------------------------------

    /// Intern a string into the chosen pool.
    pub fn intern_string(&mut self, text: &str, pool: Pool) -> u32 {
        match pool {
            Pool::Debug => self.strings.intern(text),
            Pool::NonDebug => self.strings_non_debug.intern(text),
        }
    }

    /// Append a node under `parent_id` (0 = global scope) and propagate its
    /// existence into every ancestor's transitive child count.
    ///
    /// `local_id` indexes the table selected by `node_type`; for
    /// Namespace/Typedef/Using it must be 0.
    pub fn push_node(
        &mut self,
        name: &str,
        node_type: NodeType,
        parent_id: u32,
        local_id: u32,
        annotations: &[NodeAnnotation],
        span: Option<&SourceSpan>,
    ) -> u32 {
        assert!(self.nodes.len() < 1 << 24, "node table overflow");

        let node_id = self.nodes.len() as u32;

        let annotation_start = self.annotations.len() as u32;
        for annotation in annotations {
            assert!(self.annotations.len() < 1 << 20, "annotation table overflow");
            let string_id = self.strings_non_debug.intern(&annotation.text);
            self.annotations
                .push(Annotation::new(string_id, annotation.is_builtin));
        }

        if self.has_symbol_info() {
            let name_id = self.strings.intern(name);
            let symbol = match span {
                Some(span) => {
                    let file_id = self.sources.intern(&span.file, &mut self.strings);
                    let line_count = span.line_end - span.line_start + 1;
                    assert!(line_count < 0xFFFF, "source line count out of bounds");
                    NodeSymbol::new(
                        name_id,
                        file_id,
                        line_count as u16,
                        span.line_start,
                        span.column_start,
                        span.column_end,
                    )
                }
                None => NodeSymbol::unlocated(name_id),
            };
            self.node_symbols.push(symbol);
        }

        self.nodes.push(Node::new(
            node_type,
            local_id,
            annotation_start,
            0,
            parent_id,
            annotations.len() as u16,
        ));

        let mut ancestor = parent_id;
        while ancestor != 0 {
            let parent = &mut self.nodes[ancestor as usize];
            parent.increase_child_count();
            ancestor = parent.parent_id();
        }
        self.nodes[0].increase_child_count();

        node_id
    }

    /// Register a multi-dimensional array descriptor.
    ///
    /// Returns [`NONE`] when no descriptor is needed (flat count ≤ 1 or
    /// rank ≤ 1). Dimensions beyond the seventh fold into dimension 7 by
    /// multiplication. Identical `(rank, sizes)` descriptors deduplicate to
    /// the first registration.
    pub fn push_array(&mut self, total_flat: u32, sizes: &[u32]) -> u32 {
        if total_flat <= 1 || sizes.len() <= 1 {
            return NONE;
        }

        let rank = sizes.len().min(8);
        let mut folded: Vec<u32> = sizes[..rank].to_vec();
        if sizes.len() > 8 {
            for &size in &sizes[8..] {
                folded[7] = folded[7]
                    .checked_mul(size)
                    .unwrap_or_else(|| panic!("array size overflow folding dimension {size}"));
            }
        }

        for (id, descriptor) in self.arrays.iter().enumerate() {
            let start = descriptor.size_start() as usize;
            if descriptor.rank() as usize == rank
                && self.array_sizes[start..start + rank] == folded[..]
            {
                return id as u32;
            }
        }

        assert!(self.arrays.len() < (1 << 31) - 1, "array table overflow");
        assert!(
            self.array_sizes.len() + rank < (1 << 28) - 1,
            "array size table overflow"
        );

        let array_id = self.arrays.len() as u32;
        let size_start = self.array_sizes.len() as u32;
        self.array_sizes.extend_from_slice(&folded);
        self.arrays.push(ArrayDesc::new(rank as u32, size_start));
        array_id
    }

    /// Append one record's member ids contiguously; returns the member
    /// start. `name_ids` must parallel `type_ids` when symbol info is on
    /// and is ignored otherwise.
    pub fn push_members(&mut self, type_ids: &[u32], name_ids: &[u32]) -> u32 {
        assert!(
            self.member_type_ids.len() + type_ids.len() < 1 << 24,
            "member table overflow"
        );
        let member_start = self.member_type_ids.len() as u32;
        self.member_type_ids.extend_from_slice(type_ids);
        if self.has_symbol_info() {
            assert_eq!(
                type_ids.len(),
                name_ids.len(),
                "member names must parallel member types"
            );
            self.member_name_ids.extend_from_slice(name_ids);
        }
        member_start
    }

    /// Append a type record, deduplicating against structurally identical
    /// existing records. `name_id` (debug pool) is recorded only for a
    /// newly appended type and only under symbol info.
    pub fn push_type(&mut self, desc: TypeDesc, name_id: u32) -> u32 {
        for (id, existing) in self.types.iter().enumerate() {
            if *existing == desc {
                return id as u32;
            }
        }

        let type_id = self.types.len() as u32;
        if self.has_symbol_info() {
            self.type_name_ids.push(name_id);
        }
        self.types.push(desc);
        type_id
    }

    pub fn push_register(&mut self, register: Register) -> u32 {
        let id = self.registers.len() as u32;
        self.registers.push(register);
        id
    }

    pub fn push_function(&mut self, function: Function) -> u32 {
        let id = self.functions.len() as u32;
        self.functions.push(function);
        id
    }

    pub fn push_enum(&mut self, desc: EnumDesc) -> u32 {
        let id = self.enums.len() as u32;
        self.enums.push(desc);
        id
    }

    pub fn push_enum_value(&mut self, value: EnumValue) -> u32 {
        assert!(self.enum_values.len() < 1 << 30, "enum value table overflow");
        let id = self.enum_values.len() as u32;
        self.enum_values.push(value);
        id
    }

    pub fn push_buffer(&mut self, buffer: Buffer) -> u32 {
        let id = self.buffers.len() as u32;
        self.buffers.push(buffer);
        id
    }

    // ---- table access ---------------------------------------------------

    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    pub fn strings_non_debug(&self) -> &StringPool {
        &self.strings_non_debug
    }

    pub fn sources(&self) -> &SourceTable {
        &self.sources
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_symbols(&self) -> &[NodeSymbol] {
        &self.node_symbols
    }

    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn enums(&self) -> &[EnumDesc] {
        &self.enums
    }

    pub fn enum_values(&self) -> &[EnumValue] {
        &self.enum_values
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn arrays(&self) -> &[ArrayDesc] {
        &self.arrays
    }

    pub fn array_sizes(&self) -> &[u32] {
        &self.array_sizes
    }

    pub fn member_type_ids(&self) -> &[u32] {
        &self.member_type_ids
    }

    pub fn member_name_ids(&self) -> &[u32] {
        &self.member_name_ids
    }

    pub fn types(&self) -> &[TypeDesc] {
        &self.types
    }

    pub fn type_name_ids(&self) -> &[u32] {
        &self.type_name_ids
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    /// Name-lookup maps, if `generate_name_lookup_table` has run.
    pub fn name_lookup(&self) -> Option<&NameLookup> {
        self.lookup.as_ref()
    }

    /// Iterate the direct children of a node in tree order.
    pub fn direct_children(&self, node_id: u32) -> DirectChildren<'_> {
        let node = &self.nodes[node_id as usize];
        DirectChildren {
            nodes: &self.nodes,
            next: node_id + 1,
            end: node_id + 1 + node.child_count(),
        }
    }

    /// Local (unscoped) name of a node; `None` without symbol info.
    pub fn node_name(&self, node_id: u32) -> Option<&str> {
        let symbol = self.node_symbols.get(node_id as usize)?;
        Some(self.strings.get(symbol.name_id()))
    }

    // ---- strip and equality --------------------------------------------

    /// Remove all symbol info: debug strings, sources, node symbols,
    /// member/type name ids, lookup maps, and the symbol feature flag.
    pub fn strip_symbols(&mut self) {
        self.strings.clear();
        self.sources.clear();
        self.node_symbols.clear();
        self.member_name_ids.clear();
        self.type_name_ids.clear();
        self.lookup = None;
        self.features.remove(Features::SYMBOL_INFO);
    }

    /// Structural equality ignoring everything symbol-flavoured: debug
    /// strings, sources, node symbols, member/type name ids, and the
    /// feature flags (the symbol bit differs after a strip by design).
    pub fn is_same_non_debug(&self, other: &Self) -> bool {
        self.strings_non_debug == other.strings_non_debug
            && self.nodes == other.nodes
            && self.registers == other.registers
            && self.functions == other.functions
            && self.enums == other.enums
            && self.enum_values == other.enum_values
            && self.annotations == other.annotations
            && self.arrays == other.arrays
            && self.array_sizes == other.array_sizes
            && self.member_type_ids == other.member_type_ids
            && self.types == other.types
            && self.buffers == other.buffers
    }

    // Crate-internal constructors/setters used by the codec and lookup.

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_tables(
        features: Features,
        strings: StringPool,
        strings_non_debug: StringPool,
        sources: SourceTable,
        nodes: Vec<Node>,
        registers: Vec<Register>,
        functions: Vec<Function>,
        enums: Vec<EnumDesc>,
        enum_values: Vec<EnumValue>,
        annotations: Vec<Annotation>,
        arrays: Vec<ArrayDesc>,
        array_sizes: Vec<u32>,
        member_type_ids: Vec<u32>,
        types: Vec<TypeDesc>,
        buffers: Vec<Buffer>,
        node_symbols: Vec<NodeSymbol>,
        member_name_ids: Vec<u32>,
        type_name_ids: Vec<u32>,
    ) -> Self {
        Self {
            features,
            strings,
            strings_non_debug,
            sources,
            nodes,
            registers,
            functions,
            enums,
            enum_values,
            annotations,
            arrays,
            array_sizes,
            member_type_ids,
            types,
            buffers,
            node_symbols,
            member_name_ids,
            type_name_ids,
            lookup: None,
        }
    }

    pub(crate) fn set_lookup(&mut self, lookup: NameLookup) {
        self.lookup = Some(lookup);
    }
}

impl PartialEq for Reflection {
    /// Structural equality over the feature flags and every table. The
    /// intern side-tables and the lookup maps are construction/query caches
    /// and never participate.
    fn eq(&self, other: &Self) -> bool {
        self.is_same_non_debug(other)
            && self.features == other.features
            && self.strings == other.strings
            && self.sources == other.sources
            && self.node_symbols == other.node_symbols
            && self.member_name_ids == other.member_name_ids
            && self.type_name_ids == other.type_name_ids
    }
}

impl Eq for Reflection {}

/// Iterator over a node's direct children (see
/// [`Reflection::direct_children`]).
pub struct DirectChildren<'a> {
    nodes: &'a [Node],
    next: u32,
    end: u32,
}

impl Iterator for DirectChildren<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next >= self.end {
            return None;
        }
        let id = self.next;
        self.next += 1 + self.nodes[id as usize].child_count();
        Some(id)
    }
}
