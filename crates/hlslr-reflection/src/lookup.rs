//! Fully-qualified name lookup tables.
//!
//! Walks the node tree pre-order joining names with `"::"` (`"."` below a
//! Register node) and builds reverse maps from qualified names to node ids
//! and member indices. Requires symbol info.

use indexmap::IndexMap;

use crate::reflection::{NameLookup, Reflection};
use crate::taxonomy::{CbufferType, NodeType, VariableClass};

impl Reflection {
    /// Build the name-lookup tables.
    ///
    /// Returns `false` (and builds nothing) without symbol info or nodes.
    /// Must complete before the instance is shared between readers.
    pub fn generate_name_lookup_table(&mut self) -> bool {
        if !self.has_symbol_info() || self.nodes().is_empty() {
            return false;
        }

        let mut lookup = NameLookup {
            fully_resolved_to_node_id: IndexMap::new(),
            node_id_to_fully_resolved: vec![String::new(); self.nodes().len()],
            fully_resolved_to_member_id: IndexMap::new(),
        };
        recurse_names(self, &mut lookup, 0, 0, "", false);
        self.set_lookup(lookup);
        true
    }
}

/// Register `node_id` and its subtree; returns the node's transitive child
/// count so the caller can skip past the subtree.
fn recurse_names(
    refl: &Reflection,
    lookup: &mut NameLookup,
    node_id: u32,
    index_in_parent: u32,
    parent: &str,
    dot: bool,
) -> u32 {
    let node = &refl.nodes()[node_id as usize];

    let mut name = refl
        .strings()
        .get(refl.node_symbols()[node_id as usize].name_id())
        .to_string();
    if name.is_empty() && node_id != 0 {
        // Anonymous scopes resolve as their index within the parent.
        name = index_in_parent.to_string();
    }

    let joined = if parent.is_empty() {
        name
    } else {
        let separator = if dot { "." } else { "::" };
        format!("{parent}{separator}{name}")
    };

    lookup
        .fully_resolved_to_node_id
        .insert(joined.clone(), node_id);
    lookup.node_id_to_fully_resolved[node_id as usize] = joined.clone();

    let is_dot_child = node.node_type_raw() == NodeType::Register as u8;

    let mut offset = 0;
    let mut child_index = 0;
    while offset < node.child_count() {
        offset += 1 + recurse_names(
            refl,
            lookup,
            node_id + 1 + offset,
            child_index,
            &joined,
            is_dot_child,
        );
        child_index += 1;
    }

    match node.node_type() {
        NodeType::Variable => {
            register_member_names(refl, lookup, node.local_id(), &joined);
        }
        NodeType::Register => {
            let reg = &refl.registers()[node.local_id() as usize];
            let kind = reg.input_type().buffer_kind();
            if matches!(kind, Some(CbufferType::CBuffer) | Some(CbufferType::TBuffer)) {
                if let Some(struct_id) = find_block_struct(refl, node_id) {
                    register_member_names(refl, lookup, struct_id, &joined);
                }
            }
        }
        _ => {}
    }

    node.child_count()
}

/// Register `prefix.member` entries for a Struct-class type, recursing
/// through Struct-class member types.
fn register_member_names(refl: &Reflection, lookup: &mut NameLookup, type_id: u32, prefix: &str) {
    let ty = &refl.types()[type_id as usize];
    if ty.class_raw() != VariableClass::Struct as u8 {
        return;
    }
    for k in 0..ty.member_count() {
        let member_id = ty.member_start() + k;
        let member_name = format!(
            "{prefix}.{}",
            refl.strings()
                .get(refl.member_name_ids()[member_id as usize])
        );
        lookup
            .fully_resolved_to_member_id
            .insert(member_name.clone(), member_id);
        register_member_names(
            refl,
            lookup,
            refl.member_type_ids()[member_id as usize],
            &member_name,
        );
    }
}

/// Locate the synthetic Struct registered for a cbuffer/tbuffer block: the
/// Struct whose member list matches the register node's direct Variable
/// children by type id and name id. First match wins.
fn find_block_struct(refl: &Reflection, node_id: u32) -> Option<u32> {
    let mut child_types = Vec::new();
    let mut child_names = Vec::new();
    for child_id in refl.direct_children(node_id) {
        let child = &refl.nodes()[child_id as usize];
        if child.node_type_raw() != NodeType::Variable as u8 {
            return None;
        }
        child_types.push(child.local_id());
        child_names.push(refl.node_symbols()[child_id as usize].name_id());
    }
    if child_types.is_empty() {
        return None;
    }

    refl.types()
        .iter()
        .enumerate()
        .find(|(_, ty)| {
            if ty.class_raw() != VariableClass::Struct as u8
                || ty.member_count() as usize != child_types.len()
            {
                return false;
            }
            let start = ty.member_start() as usize;
            (0..child_types.len()).all(|k| {
                refl.member_type_ids()[start + k] == child_types[k]
                    && refl.member_name_ids()[start + k] == child_names[k]
            })
        })
        .map(|(id, _)| id as u32)
}
