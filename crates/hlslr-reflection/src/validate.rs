//! Post-load invariant checks.
//!
//! A pure function over an instance; every cross-reference and enum
//! discriminant is checked before a loaded instance reaches the caller.
//! Errors name the offending entity kind and index.

use crate::error::{Entity, ReflectError};
use crate::records::{NO_FILE, NONE, ROOT_PARENT};
use crate::reflection::Reflection;
use crate::taxonomy::{
    CbufferType, EnumElementType, LocalTable, NodeType, ReturnType, ShaderInputType, SrvDimension,
    VariableClass, VariableType,
};

fn fail(entity: Entity, index: usize, reason: &'static str) -> Result<(), ReflectError> {
    Err(ReflectError::invalid(entity, index as u32, reason))
}

/// Check every model invariant. Returns the first violation found.
pub fn validate(refl: &Reflection) -> Result<(), ReflectError> {
    validate_sources(refl)?;
    validate_nodes(refl)?;
    validate_registers(refl)?;
    validate_functions(refl)?;
    validate_enums(refl)?;
    validate_enum_values(refl)?;
    validate_arrays(refl)?;
    validate_annotations(refl)?;
    validate_buffers(refl)?;
    validate_members(refl)?;
    validate_types(refl)?;
    Ok(())
}

fn validate_sources(refl: &Reflection) -> Result<(), ReflectError> {
    if !refl.has_symbol_info() && (!refl.sources().is_empty() || !refl.strings().is_empty()) {
        return Err(ReflectError::DebugWithoutSymbols);
    }
    for (i, string_id) in refl.sources().iter().enumerate() {
        if string_id as usize >= refl.strings().len() {
            return fail(Entity::Source, i, "file path string out of bounds");
        }
    }
    Ok(())
}

fn validate_nodes(refl: &Reflection) -> Result<(), ReflectError> {
    let nodes = refl.nodes();
    if nodes.is_empty() {
        return fail(Entity::Node, 0, "missing root node");
    }
    let root = &nodes[0];
    if root.node_type_raw() != NodeType::Namespace as u8 || root.parent_id() != ROOT_PARENT {
        return fail(Entity::Node, 0, "root must be a parentless namespace");
    }

    let has_symbols = refl.has_symbol_info();
    if has_symbols && refl.node_symbols().len() != nodes.len() {
        return fail(Entity::Node, 0, "node symbols must parallel nodes");
    }

    // Direct-children tally to verify transitive counts exactly.
    let mut tally = vec![0u64; nodes.len()];

    for (i, node) in nodes.iter().enumerate() {
        if has_symbols {
            let symbol = &refl.node_symbols()[i];
            if symbol.name_id() as usize >= refl.strings().len() {
                return fail(Entity::Node, i, "symbol name out of bounds");
            }
            if symbol.file_name_id() != NO_FILE
                && usize::from(symbol.file_name_id()) >= refl.sources().len()
            {
                return fail(Entity::Node, i, "symbol file out of bounds");
            }
        }

        let annotation_end =
            u64::from(node.annotation_start()) + u64::from(node.annotation_count());
        if annotation_end > refl.annotations().len() as u64 {
            return fail(Entity::Node, i, "annotation range out of bounds");
        }

        let Some(node_type) = NodeType::from_u8(node.node_type_raw()) else {
            return fail(Entity::Node, i, "invalid node type");
        };

        let descendants_end = i as u64 + 1 + u64::from(node.child_count());
        if descendants_end > nodes.len() as u64 {
            return fail(Entity::Node, i, "descendants out of bounds");
        }

        if i > 0 {
            let parent_id = node.parent_id() as usize;
            if parent_id >= i {
                return fail(Entity::Node, i, "parent must precede node");
            }
            let parent = &nodes[parent_id];
            // A child's descendant range nests inside its parent's.
            if i as u64 + u64::from(node.child_count())
                > parent_id as u64 + u64::from(parent.child_count())
            {
                return fail(Entity::Node, i, "descendants escape parent range");
            }
            tally[parent_id] += 1 + u64::from(node.child_count());
        }

        let local = node.local_id() as usize;
        let valid_local = match node_type.local_table() {
            LocalTable::Registers => local < refl.registers().len(),
            LocalTable::Functions => local < refl.functions().len(),
            LocalTable::Enums => local < refl.enums().len(),
            LocalTable::EnumValues => local < refl.enum_values().len(),
            LocalTable::Types => local < refl.types().len(),
            LocalTable::Unused => local == 0,
        };
        if !valid_local {
            return fail(Entity::Node, i, "invalid local id");
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        if tally[i] != u64::from(node.child_count()) {
            return fail(Entity::Node, i, "child count does not match layout");
        }
    }
    Ok(())
}

fn validate_registers(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, reg) in refl.registers().iter().enumerate() {
        let Some(node) = refl.nodes().get(reg.node_id() as usize) else {
            return fail(Entity::Register, i, "node out of bounds");
        };
        if node.node_type_raw() != NodeType::Register as u8 || node.local_id() as usize != i {
            return fail(Entity::Register, i, "node back-reference mismatch");
        }

        let Some(input_type) = ShaderInputType::from_u8(reg.input_type_raw()) else {
            return fail(Entity::Register, i, "invalid input type");
        };
        if ReturnType::from_u8(reg.return_type_raw()).is_none() {
            return fail(Entity::Register, i, "invalid return type");
        }
        if SrvDimension::from_u8(reg.dimension_raw()).is_none() {
            return fail(Entity::Register, i, "invalid srv dimension");
        }
        if reg.bind_count() == 0 {
            return fail(Entity::Register, i, "bind count must be at least 1");
        }
        if reg.array_id_raw() != NONE {
            if reg.array_id_raw() as usize >= refl.arrays().len() {
                return fail(Entity::Register, i, "array out of bounds");
            }
            if reg.bind_count() <= 1 {
                return fail(Entity::Register, i, "array descriptor on single binding");
            }
        }

        if let Some(kind) = input_type.buffer_kind() {
            let Some(buffer) = refl.buffers().get(reg.buffer_id() as usize) else {
                return fail(Entity::Register, i, "buffer out of bounds");
            };
            if buffer.node_id() != reg.node_id() {
                return fail(Entity::Register, i, "buffer node mismatch");
            }
            if buffer.cbuffer_type_raw() != kind as u32 {
                return fail(Entity::Register, i, "buffer kind mismatch");
            }
        }
    }
    Ok(())
}

fn validate_functions(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, function) in refl.functions().iter().enumerate() {
        let Some(node) = refl.nodes().get(function.node_id() as usize) else {
            return fail(Entity::Function, i, "node out of bounds");
        };
        if node.node_type_raw() != NodeType::Function as u8 || node.local_id() as usize != i {
            return fail(Entity::Function, i, "node back-reference mismatch");
        }
    }
    Ok(())
}

fn validate_enums(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, desc) in refl.enums().iter().enumerate() {
        let Some(node) = refl.nodes().get(desc.node_id() as usize) else {
            return fail(Entity::Enum, i, "node out of bounds");
        };
        if node.node_type_raw() != NodeType::Enum as u8 || node.local_id() as usize != i {
            return fail(Entity::Enum, i, "node back-reference mismatch");
        }
        if EnumElementType::from_u32(desc.element_type_raw()).is_none() {
            return fail(Entity::Enum, i, "invalid element type");
        }

        // Every descendant is a leaf enumerator.
        let first = desc.node_id() as usize + 1;
        for j in first..first + node.child_count() as usize {
            let child = &refl.nodes()[j];
            if child.child_count() != 0 || child.node_type_raw() != NodeType::EnumValue as u8 {
                return fail(Entity::Enum, i, "non-enumerator child");
            }
        }
    }
    Ok(())
}

fn validate_enum_values(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, value) in refl.enum_values().iter().enumerate() {
        let Some(node) = refl.nodes().get(value.node_id() as usize) else {
            return fail(Entity::EnumValue, i, "node out of bounds");
        };
        if node.node_type_raw() != NodeType::EnumValue as u8 || node.local_id() as usize != i {
            return fail(Entity::EnumValue, i, "node back-reference mismatch");
        }
        let parent = &refl.nodes()[node.parent_id() as usize];
        if parent.node_type_raw() != NodeType::Enum as u8 {
            return fail(Entity::EnumValue, i, "parent is not an enum");
        }
    }
    Ok(())
}

fn validate_arrays(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, array) in refl.arrays().iter().enumerate() {
        if array.rank() <= 1 || array.rank() > 8 {
            return fail(Entity::Array, i, "invalid rank");
        }
        let end = u64::from(array.size_start()) + u64::from(array.rank());
        if end > refl.array_sizes().len() as u64 {
            return fail(Entity::Array, i, "sizes out of bounds");
        }
    }
    Ok(())
}

fn validate_annotations(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, annotation) in refl.annotations().iter().enumerate() {
        if annotation.string_non_debug() as usize >= refl.strings_non_debug().len() {
            return fail(Entity::Annotation, i, "string out of bounds");
        }
    }
    Ok(())
}

fn validate_buffers(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, buffer) in refl.buffers().iter().enumerate() {
        if CbufferType::from_u32(buffer.cbuffer_type_raw()).is_none() {
            return fail(Entity::Buffer, i, "invalid buffer kind");
        }
        let Some(node) = refl.nodes().get(buffer.node_id() as usize) else {
            return fail(Entity::Buffer, i, "node out of bounds");
        };
        if node.node_type_raw() != NodeType::Register as u8 {
            return fail(Entity::Buffer, i, "node is not a register");
        }
        let Some(reg) = refl.registers().get(node.local_id() as usize) else {
            return fail(Entity::Buffer, i, "register out of bounds");
        };
        if reg.buffer_id() as usize != i {
            return fail(Entity::Buffer, i, "register back-reference mismatch");
        }

        if node.child_count() == 0 {
            return fail(Entity::Buffer, i, "buffer requires a variable child");
        }
        let first = buffer.node_id() as usize + 1;
        for j in first..first + node.child_count() as usize {
            let child = &refl.nodes()[j];
            if child.child_count() != 0 || child.node_type_raw() != NodeType::Variable as u8 {
                return fail(Entity::Buffer, i, "children must be leaf variables");
            }
        }
    }
    Ok(())
}

fn validate_members(refl: &Reflection) -> Result<(), ReflectError> {
    for (i, &type_id) in refl.member_type_ids().iter().enumerate() {
        if type_id as usize >= refl.types().len() {
            return fail(Entity::Member, i, "type out of bounds");
        }
    }
    if refl.has_symbol_info() {
        if refl.member_name_ids().len() != refl.member_type_ids().len() {
            return fail(Entity::Member, 0, "member names must parallel member types");
        }
        for (i, &name_id) in refl.member_name_ids().iter().enumerate() {
            if name_id as usize >= refl.strings().len() {
                return fail(Entity::Member, i, "name out of bounds");
            }
        }
    }
    Ok(())
}

fn validate_types(refl: &Reflection) -> Result<(), ReflectError> {
    let has_symbols = refl.has_symbol_info();
    if has_symbols && refl.type_name_ids().len() != refl.types().len() {
        return fail(Entity::Type, 0, "type names must parallel types");
    }

    for (i, ty) in refl.types().iter().enumerate() {
        if has_symbols && refl.type_name_ids()[i] as usize >= refl.strings().len() {
            return fail(Entity::Type, i, "name out of bounds");
        }

        // Bases and member types always precede the referencing type, which
        // keeps the loaded type graph acyclic.
        if ty.base_class_raw() != NONE && ty.base_class_raw() as usize >= i {
            return fail(Entity::Type, i, "base class must precede type");
        }

        let member_end = u64::from(ty.member_start()) + u64::from(ty.member_count());
        if member_end > refl.member_type_ids().len() as u64 {
            return fail(Entity::Type, i, "member range out of bounds");
        }
        for m in ty.member_start()..ty.member_start() + ty.member_count() {
            if refl.member_type_ids()[m as usize] as usize >= i {
                return fail(Entity::Type, i, "member type must precede type");
            }
        }

        if let Some(array_id) = ty.array_id() {
            if array_id as usize >= refl.arrays().len() {
                return fail(Entity::Type, i, "array out of bounds");
            }
        }

        let Some(class) = VariableClass::from_u8(ty.class_raw()) else {
            return fail(Entity::Type, i, "invalid class");
        };
        let var_type = VariableType::from_u8(ty.var_type_raw());

        match class {
            VariableClass::Scalar | VariableClass::Vector | VariableClass::MatrixRows
            | VariableClass::MatrixColumns => {
                if class == VariableClass::Scalar && ty.columns() != 1 {
                    return fail(Entity::Type, i, "scalar must have one column");
                }
                if matches!(class, VariableClass::Scalar | VariableClass::Vector)
                    && ty.rows() != 1
                {
                    return fail(Entity::Type, i, "scalar or vector must have one row");
                }
                if ty.rows() == 0 || ty.columns() == 0 || ty.rows() > 128 || ty.columns() > 128 {
                    return fail(Entity::Type, i, "rows or columns out of range");
                }
                if !var_type.is_some_and(VariableType::is_scalar) {
                    return fail(Entity::Type, i, "element kind is not scalar");
                }
            }
            VariableClass::Struct => {
                if ty.member_count() == 0 {
                    return fail(Entity::Type, i, "struct requires members");
                }
                if ty.var_type_raw() != 0 {
                    return fail(Entity::Type, i, "struct must have void element kind");
                }
                if ty.rows() != 0 || ty.columns() != 0 {
                    return fail(Entity::Type, i, "struct must not have rows or columns");
                }
            }
            VariableClass::Object => {
                if !var_type.is_some_and(VariableType::is_object) {
                    return fail(Entity::Type, i, "element kind is not an object");
                }
                if ty.rows() != 0 || ty.columns() != 0 {
                    return fail(Entity::Type, i, "object must not have rows or columns");
                }
            }
            // Representable but never produced; accepted as non-malformed.
            VariableClass::InterfaceClass
            | VariableClass::InterfacePointer
            | VariableClass::BitField => {}
        }
    }
    Ok(())
}
