//! Packed entity records.
//!
//! Every record stores exactly the words the container format serializes,
//! so structural equality and the codec operate on the same bits.
//! Constructors assert the bit-width contracts (producer-side programming
//! errors); accessors decode. Raw `*_raw` accessors exist where a field
//! holds an enum discriminant, so the validator can inspect untrusted
//! values without panicking.
//!
//! On-disk layout per record is little-endian, `SIZE` bytes with `ALIGN`
//! natural alignment (the alignment of the widest field group, matching
//! the container's section padding rules).

use crate::taxonomy::{
    CbufferType, EnumElementType, NodeType, ReturnType, ShaderInputType, SrvDimension,
    VariableClass, VariableType,
};

/// All-ones sentinel for optional 32-bit ids.
pub const NONE: u32 = u32::MAX;

/// Reserved `parent_id` of the root node.
pub const ROOT_PARENT: u32 = 0xFFFF;

/// `file_name_id` sentinel for "no source location".
pub const NO_FILE: u16 = 0xFFFF;

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// A vertex of the reflection tree (16 bytes).
///
/// Packing:
/// - word0: `local_id` (24) | `parent_id` low byte (8)
/// - word1: `parent_id` high bits (16) | `annotation_count` (10) | `node_type` (6)
/// - word2: `child_count` (transitive, 24 used)
/// - word3: `annotation_start` (20 used)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct Node {
    local_parent_lo: u32,
    parent_hi_annotations_type: u32,
    child_count: u32,
    annotation_start: u32,
}

const _: () = assert!(std::mem::size_of::<Node>() == 16);

impl Node {
    pub const SIZE: usize = 16;
    pub const ALIGN: usize = 4;

    pub fn new(
        node_type: NodeType,
        local_id: u32,
        annotation_start: u32,
        child_count: u32,
        parent_id: u32,
        annotation_count: u16,
    ) -> Self {
        assert!(local_id < (1 << 24) - 1, "local id out of bounds: {local_id}");
        assert!(parent_id < (1 << 24) - 1, "parent id out of bounds: {parent_id}");
        assert!(
            child_count < (1 << 24) - 1,
            "child count out of bounds: {child_count}"
        );
        assert!(
            annotation_count < (1 << 10),
            "annotation count out of bounds: {annotation_count}"
        );
        assert!(
            annotation_start < (1 << 20) - 1,
            "annotation start out of bounds: {annotation_start}"
        );

        Self {
            local_parent_lo: local_id | (parent_id << 24),
            parent_hi_annotations_type: (parent_id >> 8)
                | (u32::from(annotation_count) << 16)
                | ((node_type as u32) << 26),
            child_count,
            annotation_start,
        }
    }

    /// Index into the table selected by [`Self::node_type`]
    /// (for example `enums[local_id]` for an Enum node).
    pub fn local_id(&self) -> u32 {
        self.local_parent_lo & 0x00FF_FFFF
    }

    pub fn parent_id(&self) -> u32 {
        (self.local_parent_lo >> 24) | ((self.parent_hi_annotations_type & 0xFFFF) << 8)
    }

    /// Raw 6-bit kind discriminant, for validation.
    pub fn node_type_raw(&self) -> u8 {
        (self.parent_hi_annotations_type >> 26) as u8
    }

    /// Kind of this node.
    ///
    /// # Panics
    /// Panics if the kind bits are invalid (unvalidated data).
    pub fn node_type(&self) -> NodeType {
        NodeType::from_u8(self.node_type_raw())
            .unwrap_or_else(|| panic!("invalid node type bits: {}", self.node_type_raw()))
    }

    /// Transitive descendant count; children follow in pre-order.
    pub fn child_count(&self) -> u32 {
        self.child_count
    }

    pub fn annotation_start(&self) -> u32 {
        self.annotation_start
    }

    pub fn annotation_count(&self) -> u32 {
        (self.parent_hi_annotations_type >> 16) & 0x3FF
    }

    pub fn increase_child_count(&mut self) {
        assert!(self.child_count < (1 << 24) - 1, "child count out of bounds");
        self.child_count += 1;
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.local_parent_lo.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.parent_hi_annotations_type.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.child_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.annotation_start.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            local_parent_lo: read_u32(bytes, 0),
            parent_hi_annotations_type: read_u32(bytes, 4),
            child_count: read_u32(bytes, 8),
            annotation_start: read_u32(bytes, 12),
        }
    }
}

/// Per-node symbol info (16 bytes): local name and source location.
///
/// Parallel to the nodes table; present only with symbol info.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct NodeSymbol {
    name_id: u32,
    file_name_id: u16,
    source_line_count: u16,
    column_start_lo: u16,
    column_end_lo: u16,
    /// bit 0: column start bit 16; bit 1: column end bit 16; bits 2..22: line start.
    column_hi_line: u32,
}

const _: () = assert!(std::mem::size_of::<NodeSymbol>() == 16);

impl NodeSymbol {
    pub const SIZE: usize = 16;
    pub const ALIGN: usize = 8;

    pub fn new(
        name_id: u32,
        file_name_id: u16,
        source_line_count: u16,
        source_line_start: u32,
        source_column_start: u32,
        source_column_end: u32,
    ) -> Self {
        assert!(
            source_column_start < (1 << 17),
            "source column start out of bounds: {source_column_start}"
        );
        assert!(
            source_column_end < (1 << 17),
            "source column end out of bounds: {source_column_end}"
        );
        assert!(
            source_line_start < (1 << 20) - 1,
            "source line start out of bounds: {source_line_start}"
        );

        Self {
            name_id,
            file_name_id,
            source_line_count,
            column_start_lo: source_column_start as u16,
            column_end_lo: source_column_end as u16,
            column_hi_line: (source_column_start >> 16)
                | ((source_column_end >> 16) << 1)
                | (source_line_start << 2),
        }
    }

    /// Symbol for a node with no source location.
    pub fn unlocated(name_id: u32) -> Self {
        Self::new(name_id, NO_FILE, 0, 0, 0, 0)
    }

    /// Debug-string id of the local (unscoped) name.
    pub fn name_id(&self) -> u32 {
        self.name_id
    }

    /// Source-table id, or [`NO_FILE`].
    pub fn file_name_id(&self) -> u16 {
        self.file_name_id
    }

    pub fn source_line_count(&self) -> u16 {
        self.source_line_count
    }

    pub fn source_line_start(&self) -> u32 {
        self.column_hi_line >> 2
    }

    pub fn source_column_start(&self) -> u32 {
        u32::from(self.column_start_lo) | ((self.column_hi_line & 1) << 16)
    }

    pub fn source_column_end(&self) -> u32 {
        u32::from(self.column_end_lo) | ((self.column_hi_line & 2) << 15)
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.name_id.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.file_name_id.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.source_line_count.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.column_start_lo.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.column_end_lo.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.column_hi_line.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            name_id: read_u32(bytes, 0),
            file_name_id: read_u16(bytes, 4),
            source_line_count: read_u16(bytes, 6),
            column_start_lo: read_u16(bytes, 8),
            column_end_lo: read_u16(bytes, 10),
            column_hi_line: read_u32(bytes, 12),
        }
    }
}

/// A resource binding point (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct Register {
    input_type: u8,
    dimension: u8,
    return_type: u8,
    user_flags: u8,
    bind_point: u32,
    space: u32,
    bind_count: u32,
    num_samples: u32,
    node_id: u32,
    array_id: u32,
    buffer_id: u32,
}

const _: () = assert!(std::mem::size_of::<Register>() == 32);

impl Register {
    pub const SIZE: usize = 32;
    pub const ALIGN: usize = 8;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input_type: ShaderInputType,
        bind_point: u32,
        bind_count: u32,
        user_flags: u8,
        return_type: ReturnType,
        dimension: SrvDimension,
        num_samples: u32,
        space: u32,
        node_id: u32,
        array_id: u32,
        buffer_id: u32,
    ) -> Self {
        Self {
            input_type: input_type as u8,
            dimension: dimension as u8,
            return_type: return_type as u8,
            user_flags,
            bind_point,
            space,
            bind_count,
            num_samples,
            node_id,
            array_id,
            buffer_id,
        }
    }

    pub fn input_type_raw(&self) -> u8 {
        self.input_type
    }

    /// # Panics
    /// Panics on an invalid discriminant (unvalidated data).
    pub fn input_type(&self) -> ShaderInputType {
        ShaderInputType::from_u8(self.input_type)
            .unwrap_or_else(|| panic!("invalid shader input type: {}", self.input_type))
    }

    pub fn dimension_raw(&self) -> u8 {
        self.dimension
    }

    pub fn dimension(&self) -> SrvDimension {
        SrvDimension::from_u8(self.dimension)
            .unwrap_or_else(|| panic!("invalid srv dimension: {}", self.dimension))
    }

    pub fn return_type_raw(&self) -> u8 {
        self.return_type
    }

    pub fn return_type(&self) -> ReturnType {
        ReturnType::from_u8(self.return_type)
            .unwrap_or_else(|| panic!("invalid resource return type: {}", self.return_type))
    }

    pub fn user_flags(&self) -> u8 {
        self.user_flags
    }

    pub fn bind_point(&self) -> u32 {
        self.bind_point
    }

    pub fn space(&self) -> u32 {
        self.space
    }

    /// Flattened array element count; always ≥ 1.
    pub fn bind_count(&self) -> u32 {
        self.bind_count
    }

    pub fn num_samples(&self) -> u32 {
        self.num_samples
    }

    pub fn node_id(&self) -> u32 {
        self.node_id
    }

    /// Multi-dimensional array descriptor, if the binding is 2D+.
    pub fn array_id(&self) -> Option<u32> {
        if self.array_id == NONE {
            None
        } else {
            Some(self.array_id)
        }
    }

    pub fn array_id_raw(&self) -> u32 {
        self.array_id
    }

    /// Meaningful only for cbuffer/tbuffer/structured kinds; 0 otherwise.
    pub fn buffer_id(&self) -> u32 {
        self.buffer_id
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.input_type;
        bytes[1] = self.dimension;
        bytes[2] = self.return_type;
        bytes[3] = self.user_flags;
        bytes[4..8].copy_from_slice(&self.bind_point.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.space.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.bind_count.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.num_samples.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.node_id.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.array_id.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.buffer_id.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            input_type: bytes[0],
            dimension: bytes[1],
            return_type: bytes[2],
            user_flags: bytes[3],
            bind_point: read_u32(bytes, 4),
            space: read_u32(bytes, 8),
            bind_count: read_u32(bytes, 12),
            num_samples: read_u32(bytes, 16),
            node_id: read_u32(bytes, 20),
            array_id: read_u32(bytes, 24),
            buffer_id: read_u32(bytes, 28),
        }
    }
}

/// A function declaration (8 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct Function {
    node_id: u32,
    /// bits 0..30: parameter count; bit 30: has return; bit 31: has definition.
    params_return_definition: u32,
}

const _: () = assert!(std::mem::size_of::<Function>() == 8);

impl Function {
    pub const SIZE: usize = 8;
    pub const ALIGN: usize = 4;

    pub fn new(node_id: u32, num_parameters: u32, has_return: bool, has_definition: bool) -> Self {
        assert!(
            num_parameters < (1 << 30),
            "parameter count out of bounds: {num_parameters}"
        );
        Self {
            node_id,
            params_return_definition: num_parameters
                | if has_return { 1 << 30 } else { 0 }
                | if has_definition { 1 << 31 } else { 0 },
        }
    }

    pub fn node_id(&self) -> u32 {
        self.node_id
    }

    pub fn num_parameters(&self) -> u32 {
        self.params_return_definition & 0x3FFF_FFFF
    }

    pub fn has_return(&self) -> bool {
        (self.params_return_definition >> 30) & 1 != 0
    }

    pub fn has_definition(&self) -> bool {
        (self.params_return_definition >> 31) != 0
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.node_id.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.params_return_definition.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            node_id: read_u32(bytes, 0),
            params_return_definition: read_u32(bytes, 4),
        }
    }
}

/// An enum declaration (8 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct EnumDesc {
    node_id: u32,
    element_type: u32,
}

const _: () = assert!(std::mem::size_of::<EnumDesc>() == 8);

impl EnumDesc {
    pub const SIZE: usize = 8;
    pub const ALIGN: usize = 4;

    pub fn new(node_id: u32, element_type: EnumElementType) -> Self {
        Self {
            node_id,
            element_type: element_type as u32,
        }
    }

    pub fn node_id(&self) -> u32 {
        self.node_id
    }

    pub fn element_type_raw(&self) -> u32 {
        self.element_type
    }

    pub fn element_type(&self) -> EnumElementType {
        EnumElementType::from_u32(self.element_type)
            .unwrap_or_else(|| panic!("invalid enum element type: {}", self.element_type))
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.node_id.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.element_type.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            node_id: read_u32(bytes, 0),
            element_type: read_u32(bytes, 4),
        }
    }
}

/// One enumerator of an enum declaration (16 bytes on disk, 4 of them
/// trailing padding).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct EnumValue {
    value: i64,
    node_id: u32,
}

const _: () = assert!(std::mem::size_of::<EnumValue>() == 16);

impl EnumValue {
    pub const SIZE: usize = 16;
    pub const ALIGN: usize = 8;

    pub fn new(value: i64, node_id: u32) -> Self {
        Self { value, node_id }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn node_id(&self) -> u32 {
        self.node_id
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..8].copy_from_slice(&self.value.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.node_id.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            value: i64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
            node_id: read_u32(bytes, 8),
        }
    }
}

/// A node annotation (4 bytes): non-debug string id (31 bits) plus a
/// "builtin attribute" marker bit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct Annotation {
    string_builtin: u32,
}

const _: () = assert!(std::mem::size_of::<Annotation>() == 4);

impl Annotation {
    pub const SIZE: usize = 4;
    pub const ALIGN: usize = 4;

    pub fn new(string_non_debug: u32, is_builtin: bool) -> Self {
        assert!(
            string_non_debug < (1 << 31),
            "non-debug string id out of bounds: {string_non_debug}"
        );
        Self {
            string_builtin: string_non_debug | if is_builtin { 1 << 31 } else { 0 },
        }
    }

    pub fn string_non_debug(&self) -> u32 {
        self.string_builtin & 0x7FFF_FFFF
    }

    pub fn is_builtin(&self) -> bool {
        (self.string_builtin >> 31) != 0
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.string_builtin.to_le_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            string_builtin: read_u32(bytes, 0),
        }
    }
}

/// A multi-dimensional array descriptor (4 bytes): rank (4 bits, 2..=8)
/// and the start of its run in the array-sizes table (28 bits).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct ArrayDesc {
    rank_start: u32,
}

const _: () = assert!(std::mem::size_of::<ArrayDesc>() == 4);

impl ArrayDesc {
    pub const SIZE: usize = 4;
    pub const ALIGN: usize = 4;

    pub fn new(rank: u32, size_start: u32) -> Self {
        assert!(rank > 1 && rank <= 8, "array rank out of bounds: {rank}");
        assert!(
            size_start < (1 << 28),
            "array size start out of bounds: {size_start}"
        );
        Self {
            rank_start: (rank << 28) | size_start,
        }
    }

    pub fn rank(&self) -> u32 {
        self.rank_start >> 28
    }

    pub fn size_start(&self) -> u32 {
        self.rank_start & 0x0FFF_FFFF
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.rank_start.to_le_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            rank_start: read_u32(bytes, 0),
        }
    }
}

/// A type record (16 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct TypeDesc {
    /// bits 0..24: member start; bits 24..32: member count.
    member_data: u32,
    class: u8,
    var_type: u8,
    rows: u8,
    columns: u8,
    /// High bit set: low 31 bits are an array id. Otherwise a 1-D element
    /// count, 0 meaning "not an array".
    elements_or_array_id: u32,
    /// Type id of the single base class, or [`NONE`].
    base_class: u32,
}

const _: () = assert!(std::mem::size_of::<TypeDesc>() == 16);

impl TypeDesc {
    pub const SIZE: usize = 16;
    pub const ALIGN: usize = 8;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base_class: u32,
        elements_or_array_id: u32,
        class: VariableClass,
        var_type: VariableType,
        rows: u8,
        columns: u8,
        member_count: u32,
        member_start: u32,
    ) -> Self {
        assert!(
            member_start < (1 << 24),
            "member start out of bounds: {member_start}"
        );
        assert!(
            member_count < (1 << 8),
            "member count out of bounds: {member_count}"
        );
        Self {
            member_data: member_start | (member_count << 24),
            class: class as u8,
            var_type: var_type as u8,
            rows,
            columns,
            elements_or_array_id,
            base_class,
        }
    }

    pub fn member_start(&self) -> u32 {
        self.member_data & 0x00FF_FFFF
    }

    pub fn member_count(&self) -> u32 {
        self.member_data >> 24
    }

    pub fn class_raw(&self) -> u8 {
        self.class
    }

    /// # Panics
    /// Panics on an invalid discriminant (unvalidated data).
    pub fn class(&self) -> VariableClass {
        VariableClass::from_u8(self.class)
            .unwrap_or_else(|| panic!("invalid variable class: {}", self.class))
    }

    pub fn var_type_raw(&self) -> u8 {
        self.var_type
    }

    pub fn var_type(&self) -> Option<VariableType> {
        VariableType::from_u8(self.var_type)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn elements_or_array_id(&self) -> u32 {
        self.elements_or_array_id
    }

    pub fn is_array(&self) -> bool {
        self.elements_or_array_id != 0
    }

    pub fn is_multi_dimensional_array(&self) -> bool {
        (self.elements_or_array_id >> 31) != 0
    }

    /// 1-D element count; 0 for non-arrays and multi-dimensional arrays.
    pub fn element_count(&self) -> u32 {
        if self.is_multi_dimensional_array() {
            0
        } else {
            self.elements_or_array_id
        }
    }

    pub fn array_id(&self) -> Option<u32> {
        if self.is_multi_dimensional_array() {
            Some(self.elements_or_array_id & 0x7FFF_FFFF)
        } else {
            None
        }
    }

    pub fn base_class(&self) -> Option<u32> {
        if self.base_class == NONE {
            None
        } else {
            Some(self.base_class)
        }
    }

    pub fn base_class_raw(&self) -> u32 {
        self.base_class
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.member_data.to_le_bytes());
        bytes[4] = self.class;
        bytes[5] = self.var_type;
        bytes[6] = self.rows;
        bytes[7] = self.columns;
        bytes[8..12].copy_from_slice(&self.elements_or_array_id.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.base_class.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            member_data: read_u32(bytes, 0),
            class: bytes[4],
            var_type: bytes[5],
            rows: bytes[6],
            columns: bytes[7],
            elements_or_array_id: read_u32(bytes, 8),
            base_class: read_u32(bytes, 12),
        }
    }
}

/// A cbuffer/tbuffer/structured-resource descriptor (8 bytes) whose
/// contents are described by the Variable children of its node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct Buffer {
    cbuffer_type: u32,
    node_id: u32,
}

const _: () = assert!(std::mem::size_of::<Buffer>() == 8);

impl Buffer {
    pub const SIZE: usize = 8;
    pub const ALIGN: usize = 4;

    pub fn new(cbuffer_type: CbufferType, node_id: u32) -> Self {
        Self {
            cbuffer_type: cbuffer_type as u32,
            node_id,
        }
    }

    pub fn cbuffer_type_raw(&self) -> u32 {
        self.cbuffer_type
    }

    pub fn cbuffer_type(&self) -> CbufferType {
        CbufferType::from_u32(self.cbuffer_type)
            .unwrap_or_else(|| panic!("invalid cbuffer type: {}", self.cbuffer_type))
    }

    pub fn node_id(&self) -> u32 {
        self.node_id
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.cbuffer_type.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.node_id.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            cbuffer_type: read_u32(bytes, 0),
            node_id: read_u32(bytes, 4),
        }
    }
}
