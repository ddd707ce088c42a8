//! Resource-register and buffer-block construction.

use hlslr_reflection::records::{Buffer, Register, TypeDesc, NONE};
use hlslr_reflection::reflection::{Pool, Reflection};
use hlslr_reflection::taxonomy::{
    input_flags, CbufferType, NodeType, ReturnType, ShaderInputType, SrvDimension, VariableClass,
    VariableType,
};

use crate::ast::{BlockKind, BufferBlock, ResourceDecl};
use crate::classify::classify_resource;
use crate::types::register_type;

/// Reflect one resource-typed declaration: classify it, push its Register
/// node and record, its array descriptor, and (for buffer-backed kinds)
/// the Buffer record and the backing element Variable.
pub fn fill_register(
    refl: &mut Reflection,
    decl: &ResourceDecl,
    parent_node: u32,
    auto_bind_space: u32,
    default_row_major: bool,
) {
    let info = classify_resource(&decl.ty);

    let node_id = refl.push_node(
        &decl.name,
        NodeType::Register,
        parent_node,
        refl.registers().len() as u32,
        &decl.annotations,
        decl.span.as_ref(),
    );

    let flat: u32 = decl.array.iter().copied().fold(1u32, |acc, extent| {
        acc.checked_mul(extent)
            .unwrap_or_else(|| panic!("binding array overflow: {}", decl.name))
    });
    let array_id = refl.push_array(flat, &decl.array);

    let buffer_kind = info.input_type.buffer_kind();
    let buffer_id = match buffer_kind {
        Some(kind) => refl.push_buffer(Buffer::new(kind, node_id)),
        None => 0,
    };

    refl.push_register(Register::new(
        info.input_type,
        decl.assignment.bind_point,
        flat,
        info.flags,
        info.return_type,
        info.dimension,
        info.sample_count,
        decl.assignment.space.unwrap_or(auto_bind_space),
        node_id,
        array_id,
        buffer_id,
    ));

    // Buffer-backed kinds describe their contents through a child
    // Variable: `$Element` for the list kinds, the register's own name
    // for ConstantBuffer/TextureBuffer.
    if buffer_kind.is_some() {
        let element = decl
            .ty
            .template_type_arg()
            .unwrap_or_else(|| panic!("buffer resource missing element type: {}", decl.name))
            .clone();
        let type_id = register_type(refl, &element, default_row_major);
        let child_name = if info.input_type.is_list_kind() {
            "$Element"
        } else {
            decl.name.as_str()
        };
        refl.push_node(
            child_name,
            NodeType::Variable,
            node_id,
            type_id,
            &[],
            decl.span.as_ref(),
        );
    }
}

/// Reflect a `cbuffer`/`tbuffer` block: push the Register node, one
/// Variable child per field, the members and the block's synthetic Struct
/// type, then the Buffer and Register records. Returns the buffer id.
pub fn register_buffer(
    refl: &mut Reflection,
    block: &BufferBlock,
    parent_node: u32,
    auto_bind_space: u32,
    default_row_major: bool,
) -> u32 {
    assert!(
        !block.fields.is_empty(),
        "buffer block has no variables: {}",
        block.name
    );

    let node_id = refl.push_node(
        &block.name,
        NodeType::Register,
        parent_node,
        refl.registers().len() as u32,
        &block.annotations,
        block.span.as_ref(),
    );

    let mut type_ids = Vec::with_capacity(block.fields.len());
    let mut name_ids = Vec::with_capacity(block.fields.len());
    for field in &block.fields {
        let type_id = register_type(refl, &field.ty, default_row_major);
        let name_id = if refl.has_symbol_info() {
            refl.intern_string(&field.name, Pool::Debug)
        } else {
            0
        };
        refl.push_node(
            &field.name,
            NodeType::Variable,
            node_id,
            type_id,
            &[],
            field.span.as_ref().or(block.span.as_ref()),
        );
        type_ids.push(type_id);
        name_ids.push(name_id);
    }

    // The block's layout as a struct, so member lookups can resolve
    // through it.
    let member_start = refl.push_members(&type_ids, &name_ids);
    let struct_name_id = if refl.has_symbol_info() {
        refl.intern_string(&block.name, Pool::Debug)
    } else {
        NONE
    };
    refl.push_type(
        TypeDesc::new(
            NONE,
            0,
            VariableClass::Struct,
            VariableType::Void,
            0,
            0,
            block.fields.len() as u32,
            member_start,
        ),
        struct_name_id,
    );

    let (input_type, cbuffer_type) = match block.kind {
        BlockKind::CBuffer => (ShaderInputType::CBuffer, CbufferType::CBuffer),
        BlockKind::TBuffer => (ShaderInputType::TBuffer, CbufferType::TBuffer),
    };
    let buffer_id = refl.push_buffer(Buffer::new(cbuffer_type, node_id));

    refl.push_register(Register::new(
        input_type,
        block.assignment.bind_point,
        1,
        input_flags::USER_PACKED,
        ReturnType::None,
        SrvDimension::Unknown,
        0,
        block.assignment.space.unwrap_or(auto_bind_space),
        node_id,
        NONE,
        buffer_id,
    ));

    buffer_id
}
